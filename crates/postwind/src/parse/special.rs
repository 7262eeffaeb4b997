//! Tokens handled by the document layer instead of the rule compiler.
//!
//! - `min-640:flex` / `max-320:hidden`: container queries on the element's own width
//! - `onload:fade-in`: adds `fade-in` as a plain class shortly after first sight

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix of deferred-activation tokens.
pub const ONLOAD_PREFIX: &str = "onload:";

static CONTAINER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(min|max)-(\d+):(.+)$").unwrap());

/// Which side of the threshold a container condition is active on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryMode {
    /// Active when the width is at least the threshold.
    Min,
    /// Active when the width is at most the threshold.
    Max,
}

impl QueryMode {
    pub fn matches(self, width: f64, threshold: f64) -> bool {
        match self {
            QueryMode::Min => width >= threshold,
            QueryMode::Max => width <= threshold,
        }
    }
}

/// A parsed `(min|max)-<n>:<payload>` token.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerToken {
    pub mode: QueryMode,
    pub threshold: f64,
    pub payload: String,
}

/// Parses a container-query token.
pub fn container_query(token: &str) -> Option<ContainerToken> {
    let caps = CONTAINER.captures(token)?;
    let mode = if &caps[1] == "min" {
        QueryMode::Min
    } else {
        QueryMode::Max
    };
    Some(ContainerToken {
        mode,
        threshold: caps[2].parse().ok()?,
        payload: caps[3].to_string(),
    })
}

/// The class a deferred-activation token adds, if `token` is one.
pub fn deferred_class(token: &str) -> Option<&str> {
    token
        .strip_prefix(ONLOAD_PREFIX)
        .filter(|class| !class.is_empty())
}

/// True for tokens the rule compiler must leave alone.
pub fn is_document_token(token: &str) -> bool {
    token.starts_with(ONLOAD_PREFIX) || container_query(token).is_some()
}
