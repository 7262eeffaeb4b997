//! Responsive shorthand: one token, one value per breakpoint.
//!
//! `p-10|20` and `p-10:20` both mean "padding 10 on the first breakpoint, 20
//! on the second". Values are zipped with breakpoint keys in configuration
//! order, and every produced token carries the original state prefix and
//! importance suffix. The single-value `text-sm@m` spelling is rewritten to
//! `m:text-sm` before anything else looks at the token.

use once_cell::sync::Lazy;
use regex::Regex;

use super::modifier::{parse_token, split_importance, ParsedToken, PseudoState};
use crate::config::{Breakpoints, Context};

/// Leading segment of the colon notation: a name, a dash, then a value.
static COLON_HEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[a-z][a-z0-9-]*-[^:|\s]+$").unwrap());

/// Rewrites `text-sm@m` to `m:text-sm` when the suffix names a breakpoint.
///
/// Returns `None` when the token has no such suffix.
pub fn rewrite_at_suffix(raw: &str, breakpoints: &Breakpoints) -> Option<String> {
    let (body, importance) = split_importance(raw);
    let (token, key) = body.rsplit_once('@')?;
    if token.is_empty() || !breakpoints.contains_key(key) {
        return None;
    }
    Some(format!("{}:{}{}", key, token, importance.suffix()))
}

/// Which notation a base token uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notation {
    Pipe,
    Colon,
}

fn notation(base: &str) -> Option<Notation> {
    // Bracketed arbitrary values may carry their own colons and pipes.
    if base.contains('[') {
        return None;
    }
    if base.contains('|') {
        return Some(Notation::Pipe);
    }
    let (head, _) = base.split_once(':')?;
    let is_marker = [PseudoState::Children, PseudoState::Visible]
        .iter()
        .any(|state| state.name() == head);
    if !is_marker && COLON_HEAD.is_match(head) {
        Some(Notation::Colon)
    } else {
        None
    }
}

/// Splits the first value segment into a utility stem and its value.
///
/// The stem is the shortest dash-delimited prefix the property table knows;
/// `bg-blue-500` yields `("bg", "blue-500")`.
fn split_stem<'a>(segment: &'a str, ctx: &Context) -> Option<(&'a str, &'a str)> {
    let unsigned = segment.strip_prefix('-').unwrap_or(segment);
    let offset = segment.len() - unsigned.len();
    for (idx, _) in unsigned.match_indices('-') {
        if ctx.properties.contains(&unsigned[..idx]) {
            let split = offset + idx;
            return Some((&segment[..split], &segment[split + 1..]));
        }
    }
    segment.rsplit_once('-')
}

/// Expands a parsed shorthand token into one token per breakpoint.
///
/// Returns `None` when the base token is not shorthand, or when the value
/// count does not fit the configured breakpoints.
pub fn expand_shorthand(parsed: &ParsedToken, ctx: &Context) -> Option<Vec<String>> {
    let notation = notation(&parsed.base)?;
    let normalized = parsed.base.replace(':', "|");
    let values: Vec<&str> = normalized.split('|').collect();

    let available = ctx.breakpoints.len();
    let fits = match notation {
        Notation::Pipe => values.len() == available,
        Notation::Colon => values.len() >= 2 && values.len() <= available,
    };
    if !fits {
        log::debug!(
            "shorthand '{}' has {} values for {} breakpoints; left unexpanded",
            parsed.base,
            values.len(),
            available
        );
        return None;
    }

    let stem = if values[0].contains('-') {
        split_stem(values[0], ctx)
    } else {
        None
    };

    let states = parsed.state_prefix();
    let suffix = parsed.importance.suffix();
    let mut tokens = Vec::with_capacity(values.len());

    for (position, (key, _)) in ctx.breakpoints.iter().enumerate().take(values.len()) {
        let token = match (position, stem) {
            (0, Some((stem, first))) => format!("{}-{}", stem, first),
            (_, Some((stem, _))) if values[position].starts_with(&format!("{}-", stem)) => {
                values[position].to_string()
            }
            (_, Some((stem, _))) => format!("{}-{}", stem, values[position]),
            (_, None) => values[position].to_string(),
        };
        if values[position].is_empty() {
            continue;
        }
        tokens.push(format!("{}:{}{}{}", key, states, token, suffix));
    }

    Some(tokens)
}

/// Expands `raw` if it is a fitting shorthand, otherwise returns it unchanged.
pub fn expand(raw: &str, ctx: &Context) -> Vec<String> {
    let parsed = parse_token(raw, ctx.breakpoints);
    expand_shorthand(&parsed, ctx).unwrap_or_else(|| vec![raw.to_string()])
}
