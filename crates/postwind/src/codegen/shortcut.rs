//! Shortcut expansion and nested rule generation.
//!
//! A shortcut maps a name to a space-separated list of tokens, any of which
//! may be another shortcut. Expansion flattens the list depth-first, keeps
//! the first occurrence of each plain token, and fails with
//! [`CompileError::CycleDetected`] as soon as a name reappears on its own
//! expansion path. Nothing is rendered for a cyclic shortcut.
//!
//! The expanded tokens are compiled through the plain-token path and then
//! regrouped into one nested block:
//!
//! ```text
//! .btn {
//!   padding: 8px;
//!   &:hover {
//!     background-color: #2563eb;
//!   }
//!   @media (max-width: 640px) {
//!     padding: 4px;
//!   }
//! }
//! ```

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;

use super::rule::{compile_token, escape_class, zero_specificity_selector, CompiledDeclaration};
use crate::config::Context;
use crate::error::CompileError;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*$").unwrap());

/// True when the shortcut name is a bare class name rather than selector text.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// The selector a shortcut's rule is emitted under.
pub fn shortcut_selector(name: &str) -> String {
    if is_identifier(name) {
        format!(".{}", escape_class(name))
    } else {
        name.trim().to_string()
    }
}

/// Fully expands `name` into its deduplicated plain tokens.
pub fn expand_shortcut(name: &str, ctx: &Context) -> Result<Vec<String>, CompileError> {
    let mut path = Vec::new();
    let mut tokens = IndexSet::new();
    expand_into(name, ctx, &mut path, &mut tokens)?;
    Ok(tokens.into_iter().collect())
}

fn expand_into(
    name: &str,
    ctx: &Context,
    path: &mut Vec<String>,
    tokens: &mut IndexSet<String>,
) -> Result<(), CompileError> {
    if path.iter().any(|seen| seen == name) {
        let mut cycle = path.clone();
        cycle.push(name.to_string());
        return Err(CompileError::CycleDetected { path: cycle });
    }
    let Some(expansion) = ctx.shortcuts.get(name) else {
        tokens.insert(name.to_string());
        return Ok(());
    };

    path.push(name.to_string());
    for token in expansion.split_whitespace() {
        if ctx.is_shortcut(token) {
            expand_into(token, ctx, path, tokens)?;
        } else {
            tokens.insert(token.to_string());
        }
    }
    path.pop();
    Ok(())
}

/// Declarations grouped by at-rule chain, then by nesting selector.
#[derive(Debug, Default)]
struct Block {
    declarations: Vec<String>,
    nested: IndexMap<String, Vec<String>>,
    at_rules: IndexMap<String, Block>,
}

impl Block {
    fn insert(&mut self, compiled: &CompiledDeclaration) {
        let mut block = self;
        for at_rule in &compiled.at_rules {
            block = block.at_rules.entry(at_rule.clone()).or_default();
        }
        if !compiled.fallbacks.is_empty() {
            let key =
                zero_specificity_selector(&compiled.ancestor, "&", &compiled.pseudo_suffix);
            merge(block.nested.entry(key).or_default(), &compiled.fallbacks);
        }
        let target = if compiled.ancestor.is_empty() && compiled.pseudo_suffix.is_empty() {
            &mut block.declarations
        } else {
            let key = format!("{}&{}", compiled.ancestor, compiled.pseudo_suffix);
            block.nested.entry(key).or_default()
        };
        merge(target, &compiled.declarations);
    }

    fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.nested.is_empty() && self.at_rules.is_empty()
    }

    fn render(&self, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        for declaration in &self.declarations {
            out.push_str(&format!("{}{}\n", indent, declaration));
        }
        for (selector, declarations) in &self.nested {
            out.push_str(&format!("{}{} {{\n", indent, selector));
            for declaration in declarations {
                out.push_str(&format!("{}  {}\n", indent, declaration));
            }
            out.push_str(&format!("{}}}\n", indent));
        }
        for (at_rule, block) in &self.at_rules {
            out.push_str(&format!("{}{} {{\n", indent, at_rule));
            block.render(depth + 1, out);
            out.push_str(&format!("{}}}\n", indent));
        }
    }
}

fn property_of(declaration: &str) -> &str {
    declaration
        .split_once(':')
        .map(|(property, _)| property.trim())
        .unwrap_or(declaration)
}

/// Appends declarations, a later one replacing an earlier one for the same property.
fn merge(target: &mut Vec<String>, declarations: &[String]) {
    for declaration in declarations {
        let property = property_of(declaration);
        target.retain(|existing| property_of(existing) != property);
        target.push(declaration.clone());
    }
}

/// Compiles a shortcut into one nested rule.
///
/// Returns `Ok(None)` when none of the expanded tokens resolve.
pub fn compile_shortcut(name: &str, ctx: &Context) -> Result<Option<String>, CompileError> {
    let tokens = expand_shortcut(name, ctx)?;

    let mut root = Block::default();
    for token in &tokens {
        match compile_token(token, ctx) {
            Some(compiled) => compiled.iter().for_each(|c| root.insert(c)),
            None => log::debug!("shortcut '{}': token '{}' did not resolve", name, token),
        }
    }
    if root.is_empty() {
        return Ok(None);
    }

    let mut out = format!("{} {{\n", shortcut_selector(name));
    root.render(1, &mut out);
    out.push('}');
    Ok(Some(out))
}
