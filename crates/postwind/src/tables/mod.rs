//! Lookup tables the compiler reads on every compile.
//!
//! The compiler only sees these tables through three small traits:
//!
//! - [`PropertyTable`]: utility name to one or more CSS property names
//! - [`KeywordTable`]: utility name to a literal declaration block
//! - [`ColorTable`]: `(color, shade)` to a hex value
//!
//! [`Tables`] is the owned, mutable implementation the compiler uses by
//! default. It starts from a compact built-in data set (see [`defaults`]).

pub mod defaults;

use indexmap::IndexMap;

/// Maps a utility name (`p`, `bg`, `translate-x`) to CSS property names.
pub trait PropertyTable {
    fn get(&self, name: &str) -> Option<&[String]>;
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Maps a keyword utility (`flex`, `text-sm`) to a declaration block.
pub trait KeywordTable {
    fn get(&self, name: &str) -> Option<&str>;
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Maps a palette colour and shade to a concrete value.
pub trait ColorTable {
    fn get(&self, color: &str, shade: &str) -> Option<&str>;
}

/// Owned, runtime-mutable tables.
#[derive(Debug, Clone)]
pub struct Tables {
    properties: IndexMap<String, Vec<String>>,
    keywords: IndexMap<String, String>,
    colors: IndexMap<String, IndexMap<String, String>>,
}

impl Tables {
    /// Creates tables with no entries at all.
    pub fn empty() -> Self {
        Self {
            properties: IndexMap::new(),
            keywords: IndexMap::new(),
            colors: IndexMap::new(),
        }
    }

    /// Registers or overrides a property mapping.
    pub fn set_property<I, S>(&mut self, name: &str, css_properties: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties.insert(
            name.to_string(),
            css_properties.into_iter().map(Into::into).collect(),
        );
    }

    /// Registers or overrides a keyword declaration block.
    pub fn set_keyword(&mut self, name: &str, block: &str) {
        self.keywords.insert(name.to_string(), block.to_string());
    }

    /// Registers or overrides one palette entry.
    pub fn set_color(&mut self, color: &str, shade: &str, value: &str) {
        self.colors
            .entry(color.to_string())
            .or_default()
            .insert(shade.to_string(), value.to_string());
    }

    pub fn properties(&self) -> &IndexMap<String, Vec<String>> {
        &self.properties
    }

    pub fn keywords(&self) -> &IndexMap<String, String> {
        &self.keywords
    }

    /// Names of every palette colour, in registration order.
    pub fn color_names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(|s| s.as_str())
    }
}

impl Default for Tables {
    fn default() -> Self {
        let mut tables = Self::empty();
        defaults::populate(&mut tables);
        tables
    }
}

impl PropertyTable for Tables {
    fn get(&self, name: &str) -> Option<&[String]> {
        self.properties.get(name).map(|v| v.as_slice())
    }

    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.properties.keys().map(|s| s.as_str()))
    }
}

impl KeywordTable for Tables {
    fn get(&self, name: &str) -> Option<&str> {
        self.keywords.get(name).map(|s| s.as_str())
    }

    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.keywords.keys().map(|s| s.as_str()))
    }
}

impl ColorTable for Tables {
    fn get(&self, color: &str, shade: &str) -> Option<&str> {
        self.colors
            .get(color)
            .and_then(|shades| shades.get(shade))
            .map(|s| s.as_str())
    }
}
