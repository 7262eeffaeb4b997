//! Configuration documents and the per-compile context.
//!
//! [`Config`] is what authors hand to the compiler, either built in code with
//! the fluent methods or parsed from JSON/YAML. [`Context`] is the borrowed
//! view the compiler builds from its live state for every single compile, so
//! table edits affect later compiles and never earlier cache entries.
//!
//! # Example
//!
//! ```rust
//! use postwind::Config;
//!
//! let config = Config::new()
//!     .breakpoint("mobile", "(max-width: 600px)")
//!     .breakpoint("desktop", "(min-width: 601px)")
//!     .shortcut("btn", "px-4 py-2 rounded");
//!
//! assert_eq!(config.breakpoints.keys().next().map(String::as_str), Some("mobile"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tables::{ColorTable, KeywordTable, PropertyTable, Tables};

/// Pixels per scale step for plain numeric utilities (`p-4` is 16px).
pub const DEFAULT_PIXEL_MULTIPLIER: u32 = 4;

/// Ordered breakpoint key to media-query text.
pub type Breakpoints = IndexMap<String, String>;

/// Shortcut name (or raw selector) to space-separated expansion.
pub type Shortcuts = IndexMap<String, String>;

/// The default breakpoint set, in its semantic order.
pub fn default_breakpoints() -> Breakpoints {
    let mut breakpoints = IndexMap::new();
    breakpoints.insert("m".to_string(), "(max-width: 640px)".to_string());
    breakpoints.insert(
        "t".to_string(),
        "(min-width: 641px) and (max-width: 1024px)".to_string(),
    );
    breakpoints.insert("d".to_string(), "(min-width: 1025px)".to_string());
    breakpoints
}

/// Classes to compile before the first scan.
///
/// Accepts either a list or a single space-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Preload {
    List(Vec<String>),
    Text(String),
}

impl Preload {
    pub fn classes(&self) -> Vec<&str> {
        match self {
            Preload::List(list) => list
                .iter()
                .flat_map(|s| s.split_whitespace())
                .collect(),
            Preload::Text(text) => text.split_whitespace().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classes().is_empty()
    }
}

impl Default for Preload {
    fn default() -> Self {
        Preload::List(Vec::new())
    }
}

/// Options accepted at initialization and at any later point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// When non-empty, replaces the breakpoint table wholesale.
    pub breakpoints: Breakpoints,
    /// Merged into the shortcut table.
    pub shortcuts: Shortcuts,
    pub preload: Preload,
    pub pixel_multiplier: Option<u32>,
    /// Toggle `pw-<breakpoint>` classes on the root element from viewport width.
    pub body_class: bool,
    /// External framework delegation. Accepted but not supported.
    pub tailwind: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn breakpoint(mut self, key: &str, media: &str) -> Self {
        self.breakpoints.insert(key.to_string(), media.to_string());
        self
    }

    pub fn shortcut(mut self, name: &str, expansion: &str) -> Self {
        self.shortcuts.insert(name.to_string(), expansion.to_string());
        self
    }

    pub fn preload(mut self, classes: &str) -> Self {
        self.preload = Preload::Text(classes.to_string());
        self
    }

    pub fn pixel_multiplier(mut self, multiplier: u32) -> Self {
        self.pixel_multiplier = Some(multiplier);
        self
    }

    pub fn body_class(mut self, enabled: bool) -> Self {
        self.body_class = enabled;
        self
    }
}

/// Borrowed view over the live configuration used by one compile.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub properties: &'a dyn PropertyTable,
    pub keywords: &'a dyn KeywordTable,
    pub colors: &'a dyn ColorTable,
    pub breakpoints: &'a Breakpoints,
    pub shortcuts: &'a Shortcuts,
    pub pixel_multiplier: u32,
}

impl<'a> Context<'a> {
    pub fn new(tables: &'a Tables, breakpoints: &'a Breakpoints, shortcuts: &'a Shortcuts) -> Self {
        Self {
            properties: tables,
            keywords: tables,
            colors: tables,
            breakpoints,
            shortcuts,
            pixel_multiplier: DEFAULT_PIXEL_MULTIPLIER,
        }
    }

    pub fn with_pixel_multiplier(mut self, multiplier: u32) -> Self {
        self.pixel_multiplier = multiplier;
        self
    }

    pub fn is_breakpoint(&self, key: &str) -> bool {
        self.breakpoints.contains_key(key)
    }

    pub fn is_shortcut(&self, name: &str) -> bool {
        self.shortcuts.contains_key(name)
    }
}
