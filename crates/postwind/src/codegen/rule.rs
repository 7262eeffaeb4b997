//! Rule building for plain (non-shortcut) tokens.
//!
//! A token compiles to one or more [`CompiledDeclaration`]s: the at-rule
//! chain it lives under, an ancestor prefix (dark mode, high specificity),
//! a pseudo suffix, and its declarations. [`render_rules`] turns those into
//! flat CSS under the escaped class selector of the original token.
//!
//! Low-priority defaults (the `position: relative` offsets bring along) go
//! into a separate `:where(..)` rule. Its selector has zero specificity, so
//! an explicit rule beats it whatever modifiers either token carries.

use crate::config::Context;
use crate::parse::{
    expand_shorthand, parse_token, rewrite_at_suffix, Importance, ParsedToken, PseudoState,
    DARK_CLASS,
};
use crate::resolve::resolve;

/// Ancestor chain used instead of `!important` for `!!` tokens.
pub const HIGH_SPECIFICITY_PREFIX: &str = "html body ";

const RESERVED: &[char] = &[
    ':', '.', '!', '/', '[', ']', '|', '@', '%', '#', '(', ')', ',', '\'', '"', '+', '*', '&',
    '=', '<', '>', '~', '?', '$', '^', ';', '{', '}', ' ',
];

/// Declarations for one token under one nesting path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledDeclaration {
    /// Outermost first, e.g. `["@media (max-width: 640px)"]`.
    pub at_rules: Vec<String>,
    /// Selector text placed before the class, e.g. `".dark "`.
    pub ancestor: String,
    /// `""` for the base bucket, else `":hover"`, `"::before"`, `" > *"`.
    pub pseudo_suffix: String,
    /// Rendered `property: value;` entries.
    pub declarations: Vec<String>,
    /// Defaults rendered under a zero-specificity selector.
    pub fallbacks: Vec<String>,
}

/// Escapes characters that are not valid inside a class selector.
pub fn escape_class(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len() + 8);
    for (idx, c) in name.chars().enumerate() {
        if idx == 0 && c.is_ascii_digit() {
            escaped.push_str(&format!("\\3{} ", c));
        } else if RESERVED.contains(&c) {
            escaped.push('\\');
            escaped.push(c);
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Media-query text as an at-rule.
pub fn media_rule(media: &str) -> String {
    if media.trim_start().starts_with('@') {
        media.trim().to_string()
    } else {
        format!("@media {}", media.trim())
    }
}

/// Wraps a selector in `:where(..)`, leaving any pseudo-element outside
/// since pseudo-elements are not allowed inside it.
pub fn zero_specificity_selector(ancestor: &str, subject: &str, pseudo_suffix: &str) -> String {
    let (classes, element) = match pseudo_suffix.find("::") {
        Some(idx) => pseudo_suffix.split_at(idx),
        None => (pseudo_suffix, ""),
    };
    format!(":where({}{}{}){}", ancestor, subject, classes, element)
}

/// Compiles one already-parsed token, without shorthand expansion.
pub fn compile_parsed(parsed: &ParsedToken, ctx: &Context) -> Option<CompiledDeclaration> {
    let resolution = resolve(&parsed.base, ctx)?;
    if resolution.declarations.is_empty() {
        return None;
    }

    let importance = match parsed.importance {
        Importance::None if resolution.escalate => Importance::HighSpecificity,
        importance => importance,
    };

    let (fallbacks, mut declarations): (Vec<_>, Vec<_>) = resolution
        .declarations
        .into_iter()
        .partition(|d| d.overridable);
    if importance == Importance::Important {
        declarations.iter_mut().for_each(|d| d.make_important());
    }

    let mut ancestor = String::new();
    if importance == Importance::HighSpecificity {
        ancestor.push_str(HIGH_SPECIFICITY_PREFIX);
    }
    if parsed.has_state(PseudoState::Dark) {
        ancestor.push_str(&format!(".{} ", DARK_CLASS));
    }

    // Pseudo-elements must close the compound selector.
    let mut states: Vec<PseudoState> = parsed
        .pseudo_states
        .iter()
        .copied()
        .filter(|s| *s != PseudoState::Dark)
        .collect();
    states.sort_by_key(|s| s.is_pseudo_element());
    let pseudo_suffix = states.iter().map(|s| s.selector()).collect();

    let at_rules = parsed
        .breakpoint
        .as_ref()
        .and_then(|key| ctx.breakpoints.get(key))
        .map(|media| vec![media_rule(media)])
        .unwrap_or_default();

    Some(CompiledDeclaration {
        at_rules,
        ancestor,
        pseudo_suffix,
        declarations: declarations.iter().map(|d| d.render()).collect(),
        fallbacks: fallbacks.iter().map(|d| d.render()).collect(),
    })
}

/// Runs the single-token path: `@` rewrite, modifiers, shorthand, resolution.
///
/// Returns `None` when nothing in the token resolves.
pub fn compile_token(raw: &str, ctx: &Context) -> Option<Vec<CompiledDeclaration>> {
    let token = rewrite_at_suffix(raw, ctx.breakpoints).unwrap_or_else(|| raw.to_string());
    let parsed = parse_token(&token, ctx.breakpoints);

    let compiled: Vec<CompiledDeclaration> = match expand_shorthand(&parsed, ctx) {
        Some(tokens) => {
            // An explicit prefix scopes the whole shorthand to its media query.
            let outer = parsed
                .breakpoint
                .as_ref()
                .and_then(|key| ctx.breakpoints.get(key))
                .map(String::as_str)
                .map(media_rule);
            tokens
                .iter()
                .filter_map(|t| compile_parsed(&parse_token(t, ctx.breakpoints), ctx))
                .map(|mut c| {
                    if let Some(outer) = &outer {
                        if c.at_rules.first() != Some(outer) {
                            c.at_rules.insert(0, outer.clone());
                        }
                    }
                    c
                })
                .collect()
        }
        None => compile_parsed(&parsed, ctx).into_iter().collect(),
    };

    (!compiled.is_empty()).then_some(compiled)
}

/// Renders one compiled declaration as a flat rule under `.class_name`.
///
/// Fallbacks come first, as their own `:where(..)` rule inside the same
/// at-rules.
pub fn render_rule(class_name: &str, compiled: &CompiledDeclaration) -> String {
    let subject = format!(".{}", escape_class(class_name));
    let selector = format!("{}{}{}", compiled.ancestor, subject, compiled.pseudo_suffix);
    let mut rule = format!("{} {{ {} }}", selector, compiled.declarations.join(" "));
    if !compiled.fallbacks.is_empty() {
        let zero = zero_specificity_selector(&compiled.ancestor, &subject, &compiled.pseudo_suffix);
        rule = format!("{} {{ {} }} {}", zero, compiled.fallbacks.join(" "), rule);
    }
    for at_rule in compiled.at_rules.iter().rev() {
        rule = format!("{} {{ {} }}", at_rule, rule);
    }
    rule
}

/// Renders every compiled declaration of a token, one rule per line.
pub fn render_rules(class_name: &str, compiled: &[CompiledDeclaration]) -> String {
    compiled
        .iter()
        .map(|c| render_rule(class_name, c))
        .collect::<Vec<_>>()
        .join("\n")
}
