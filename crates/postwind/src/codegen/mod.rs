//! CSS generation for plain tokens and shortcuts.

pub mod rule;
pub mod shortcut;

pub use rule::{
    compile_parsed, compile_token, escape_class, media_rule, render_rule, render_rules,
    zero_specificity_selector, CompiledDeclaration, HIGH_SPECIFICITY_PREFIX,
};
pub use shortcut::{compile_shortcut, expand_shortcut, is_identifier, shortcut_selector};
