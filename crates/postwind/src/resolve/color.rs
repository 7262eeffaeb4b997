//! Colour recognition for arbitrary values and palette lookups.

use crate::config::Context;

const COLOR_FUNCTIONS: &[&str] = &[
    "rgb(", "rgba(", "hsl(", "hsla(", "lab(", "lch(", "oklab(", "oklch(", "color(", "var(--",
];

const CSS_WIDE: &[&str] = &["inherit", "initial", "unset", "revert", "currentcolor"];

/// Returns true when `value` reads as a CSS colour.
///
/// Hex literals, colour functions, custom-property references, CSS-wide
/// keywords and named colours all count.
pub fn is_color(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    if lower.starts_with('#') {
        return lower.len() > 1 && lower[1..].chars().all(|c| c.is_ascii_hexdigit());
    }
    if COLOR_FUNCTIONS.iter().any(|prefix| lower.starts_with(prefix)) {
        return true;
    }
    if CSS_WIDE.contains(&lower.as_str()) {
        return true;
    }
    is_named_color(&lower)
}

fn is_named_color(value: &str) -> bool {
    // Bare hex digits would parse as a colour without a leading '#'.
    if value.is_empty()
        || !value.chars().all(|c| c.is_ascii_alphabetic())
        || value.chars().all(|c| c.is_ascii_hexdigit())
    {
        return false;
    }
    value.parse::<csscolorparser::Color>().is_ok()
}

/// Looks up `name-shade` (e.g. `blue-500`) in the palette.
pub fn palette(value: &str, ctx: &Context) -> Option<String> {
    let (name, shade) = value.rsplit_once('-')?;
    ctx.colors.get(name, shade).map(str::to_string)
}

/// Resolves a utility value to a colour, trying the palette first.
pub fn color_value(value: &str, ctx: &Context) -> Option<String> {
    palette(value, ctx).or_else(|| is_color(value).then(|| value.to_string()))
}
