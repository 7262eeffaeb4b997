//! Width-only media-query evaluation for viewport classes.
//!
//! Understands `(min-width: <n>px)` and `(max-width: <n>px)` joined by `and`.
//! Anything else never matches.

use once_cell::sync::Lazy;
use regex::Regex;

static FEATURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\s*(min|max)-width\s*:\s*(\d+(?:\.\d+)?)px\s*\)$").unwrap());

/// Evaluates `media` against a viewport `width` in pixels.
pub fn matches_width(media: &str, width: f64) -> bool {
    let media = media.trim();
    let media = media.strip_prefix("@media").unwrap_or(media).trim();
    if media.is_empty() || media.contains(',') {
        return false;
    }

    let mut seen = 0;
    for part in media.split(" and ") {
        let Some(caps) = FEATURE.captures(part.trim()) else {
            return false;
        };
        let Ok(bound) = caps[2].parse::<f64>() else {
            return false;
        };
        let ok = match &caps[1] {
            "min" => width >= bound,
            _ => width <= bound,
        };
        if !ok {
            return false;
        }
        seen += 1;
    }
    seen > 0
}
