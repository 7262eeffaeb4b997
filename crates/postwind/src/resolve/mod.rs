//! Value resolution: base token to CSS declarations.
//!
//! Resolution is an ordered chain of total functions, each returning an
//! optional match:
//!
//! 1. keyword (`flex`, `text-sm`)
//! 2. fractional (`w-1/3`)
//! 3. plain numeric (`p-4`, `-m-2`, `w-50%`, `rotate-45`)
//! 4. arbitrary (`w-[calc(100%_-_2rem)]`, `bg-blue-500`, `text-white`)
//!
//! The first match wins. A token nothing matches resolves to `None` and is
//! simply not one of ours.

pub mod color;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Context;

/// One `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    /// Low-priority default that importance escalation leaves alone.
    pub overridable: bool,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            overridable: false,
        }
    }

    pub fn fallback(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            overridable: true,
            ..Self::new(property, value)
        }
    }

    /// Appends `!important` unless the value already carries it.
    pub fn make_important(&mut self) {
        if !self.overridable && !self.value.ends_with("!important") {
            self.value.push_str(" !important");
        }
    }

    pub fn render(&self) -> String {
        format!("{}: {};", self.property, self.value)
    }
}

/// Declarations for one base token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    pub declarations: Vec<Declaration>,
    /// Explicit positioning keyword: raise specificity one level.
    pub escalate: bool,
}

impl Resolution {
    fn from_declarations(declarations: Vec<Declaration>) -> Self {
        Self {
            declarations,
            escalate: false,
        }
    }
}

type Resolver = fn(&str, &Context) -> Option<Resolution>;

const RESOLVERS: &[Resolver] = &[
    resolve_keyword,
    resolve_fraction,
    resolve_numeric,
    resolve_arbitrary,
];

const POSITION_KEYWORDS: &[&str] = &["static", "relative", "fixed", "absolute", "sticky"];
const OFFSET_PROPERTIES: &[&str] = &["top", "right", "bottom", "left"];
const UNITLESS: &[&str] = &["z", "order", "grow", "shrink", "weight"];

/// Transform utilities and the function each one wraps its value in.
const TRANSFORMS: &[(&str, &str, TransformUnit)] = &[
    ("scale", "scale", TransformUnit::Ratio),
    ("scale-x", "scaleX", TransformUnit::Ratio),
    ("scale-y", "scaleY", TransformUnit::Ratio),
    ("rotate", "rotate", TransformUnit::Degrees),
    ("skew-x", "skewX", TransformUnit::Degrees),
    ("skew-y", "skewY", TransformUnit::Degrees),
    ("translate-x", "translateX", TransformUnit::Length),
    ("translate-y", "translateY", TransformUnit::Length),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransformUnit {
    Ratio,
    Degrees,
    Length,
}

static FRACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?)([a-z][a-z0-9-]*?)-(\d+)/(\d+)$").unwrap());

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?)([a-z][a-z0-9-]*?)-(\d+)(px|%)?$").unwrap());

/// Resolves a base token through the chain, then adds offset companions.
pub fn resolve(base: &str, ctx: &Context) -> Option<Resolution> {
    if base.is_empty() {
        return None;
    }
    let mut resolution = RESOLVERS.iter().find_map(|resolver| resolver(base, ctx))?;
    add_offset_position(&mut resolution);
    Some(resolution)
}

/// Splits a keyword block (`display: flex; align-items: center;`).
pub fn parse_block(block: &str) -> Vec<Declaration> {
    block
        .split(';')
        .filter_map(|part| {
            let (property, value) = part.split_once(':')?;
            let (property, value) = (property.trim(), value.trim());
            (!property.is_empty() && !value.is_empty()).then(|| Declaration::new(property, value))
        })
        .collect()
}

fn resolve_keyword(base: &str, ctx: &Context) -> Option<Resolution> {
    let block = ctx.keywords.get(base)?;
    let declarations = parse_block(block);
    let escalate = declarations.iter().any(|d| {
        d.property == "position" && POSITION_KEYWORDS.contains(&d.value.as_str())
    });
    Some(Resolution {
        declarations,
        escalate,
    })
}

fn resolve_fraction(base: &str, ctx: &Context) -> Option<Resolution> {
    let caps = FRACTION.captures(base)?;
    let negative = !caps[1].is_empty();
    let name = &caps[2];
    let properties = ctx.properties.get(name)?;
    let numerator: f64 = caps[3].parse().ok()?;
    let denominator: f64 = caps[4].parse().ok()?;
    if denominator == 0.0 {
        return None;
    }

    let mut percent = numerator / denominator * 100.0;
    if negative {
        percent = -percent;
    }
    let value = format!("{:.6}%", percent);
    let value = match transform(name) {
        Some((function, _)) => format!("{}({})", function, value),
        None => value,
    };
    Some(declare_all(properties, &value))
}

fn resolve_numeric(base: &str, ctx: &Context) -> Option<Resolution> {
    let caps = NUMERIC.captures(base)?;
    let sign = if caps[1].is_empty() { "" } else { "-" };
    let name = &caps[2];
    let properties = ctx.properties.get(name)?;
    let number: u64 = caps[3].parse().ok()?;
    let unit = caps.get(4).map(|m| m.as_str());

    let length = || match unit {
        Some(unit) => format!("{}{}{}", sign, number, unit),
        None if number == 0 => "0px".to_string(),
        None => format!("{}{}px", sign, number.saturating_mul(u64::from(ctx.pixel_multiplier))),
    };

    let value = if let Some((function, kind)) = transform(name) {
        let inner = match kind {
            TransformUnit::Ratio => format!("{}{}", sign, ratio(number)),
            TransformUnit::Degrees => format!("{}{}deg", sign, number),
            TransformUnit::Length => length(),
        };
        format!("{}({})", function, inner)
    } else if name == "opacity" && unit.is_none() {
        ratio(number)
    } else if UNITLESS.contains(&name) && unit.is_none() {
        format!("{}{}", sign, number)
    } else {
        length()
    };

    Some(declare_all(properties, &value))
}

fn resolve_arbitrary(base: &str, ctx: &Context) -> Option<Resolution> {
    let (negative, unsigned) = match base.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, base),
    };

    // Longest known name wins: `border-color-red-500` is not `border`.
    let (name, raw) = unsigned
        .match_indices('-')
        .map(|(idx, _)| (&unsigned[..idx], &unsigned[idx + 1..]))
        .filter(|(name, raw)| !raw.is_empty() && ctx.properties.contains(name))
        .last()?;
    let properties = ctx.properties.get(name)?;

    let value = arbitrary_value(raw)?;

    match name {
        "from" | "via" | "to" => return gradient_stop(name, &color::color_value(&value, ctx)?),
        _ => {}
    }

    if let Some(color) = color::color_value(&value, ctx) {
        if name == "text" {
            return Some(Resolution::from_declarations(vec![Declaration::new(
                "color", color,
            )]));
        }
        return Some(declare_all(properties, &color));
    }

    let value = if negative && !value.starts_with('-') {
        format!("-{}", value)
    } else {
        value
    };
    let value = match transform(name) {
        Some((function, _)) => format!("{}({})", function, value),
        None => value,
    };
    Some(declare_all(properties, &value))
}

/// Unwraps `[...]` values, rejecting unbracketed text that cannot be a value.
fn arbitrary_value(raw: &str) -> Option<String> {
    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        if inner.is_empty() {
            return None;
        }
        return Some(inner.replace('_', " "));
    }
    let rejected = ['[', ']', '|', ':', '/'];
    if raw.contains(&rejected[..]) {
        return None;
    }
    Some(raw.to_string())
}

fn gradient_stop(name: &str, color: &str) -> Option<Resolution> {
    let declarations = match name {
        "from" => vec![
            Declaration::new("--pw-gradient-from", color),
            Declaration::new(
                "--pw-gradient-stops",
                "var(--pw-gradient-from), var(--pw-gradient-to, transparent)",
            ),
        ],
        "via" => vec![Declaration::new(
            "--pw-gradient-stops",
            format!(
                "var(--pw-gradient-from), {}, var(--pw-gradient-to, transparent)",
                color
            ),
        )],
        "to" => vec![Declaration::new("--pw-gradient-to", color)],
        _ => return None,
    };
    Some(Resolution::from_declarations(declarations))
}

fn transform(name: &str) -> Option<(&'static str, TransformUnit)> {
    TRANSFORMS
        .iter()
        .find(|(utility, _, _)| *utility == name)
        .map(|(_, function, unit)| (*function, *unit))
}

/// Renders `number / 100` without trailing zeros (`105` is `1.05`).
fn ratio(number: u64) -> String {
    format!("{}", number as f64 / 100.0)
}

fn declare_all(properties: &[String], value: &str) -> Resolution {
    Resolution::from_declarations(
        properties
            .iter()
            .map(|property| Declaration::new(property.as_str(), value))
            .collect(),
    )
}

/// Offsets only work on positioned elements, so they bring a default along.
fn add_offset_position(resolution: &mut Resolution) {
    let has_offset = resolution
        .declarations
        .iter()
        .any(|d| OFFSET_PROPERTIES.contains(&d.property.as_str()));
    let has_position = resolution
        .declarations
        .iter()
        .any(|d| d.property == "position");
    if has_offset && !has_position {
        resolution
            .declarations
            .insert(0, Declaration::fallback("position", "relative"));
    }
}
