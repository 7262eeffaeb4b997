//! The compiler facade: live configuration, cache, sheets and diagnostics.
//!
//! [`Compiler`] owns everything a compile reads and writes. Every call to
//! [`Compiler::compile`] builds a fresh [`Context`] over the current tables,
//! so registering a shortcut or keyword affects every class compiled
//! afterwards, while classes already in the cache keep their result.
//!
//! # Example
//!
//! ```rust
//! use postwind::{Compiler, Config};
//!
//! let mut compiler = Compiler::with_config(
//!     Config::new().shortcut("btn", "px-4 py-2 rounded"),
//! );
//!
//! assert_eq!(compiler.compile("p-4"), Some(".p-4 { padding: 16px; }"));
//! assert!(compiler.compile("btn").unwrap().starts_with(".btn {"));
//! assert!(compiler.compile("not-a-utility").is_none());
//!
//! assert!(compiler.sheets().utilities().contains(".p-4"));
//! assert!(compiler.sheets().shortcuts().contains(".btn"));
//! ```

use indexmap::IndexMap;

use crate::cache::{CompilationCache, Lookup, SheetKind, StyleSheets};
use crate::codegen::{
    compile_shortcut, compile_token, expand_shortcut, is_identifier, render_rules,
    HIGH_SPECIFICITY_PREFIX,
};
use crate::config::{
    default_breakpoints, Breakpoints, Config, Context, Shortcuts, DEFAULT_PIXEL_MULTIPLIER,
};
use crate::describe;
use crate::error::{Diagnostics, Warning};
use crate::parse::is_document_token;
use crate::resolve::parse_block;
use crate::tables::{KeywordTable, Tables};

/// Compiles class strings into CSS, once each.
#[derive(Debug, Clone)]
pub struct Compiler {
    tables: Tables,
    breakpoints: Breakpoints,
    shortcuts: Shortcuts,
    pixel_multiplier: u32,
    body_class: bool,
    cache: CompilationCache,
    diagnostics: Diagnostics,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::with_tables(Tables::default())
    }
}

impl Compiler {
    /// Creates a compiler with the default tables and breakpoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compiler over custom tables.
    ///
    /// [`reset`](Self::reset) restores the built-in tables, not these.
    pub fn with_tables(tables: Tables) -> Self {
        Self {
            tables,
            breakpoints: default_breakpoints(),
            shortcuts: Shortcuts::new(),
            pixel_multiplier: DEFAULT_PIXEL_MULTIPLIER,
            body_class: false,
            cache: CompilationCache::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn with_config(config: Config) -> Self {
        let mut compiler = Self::new();
        compiler.configure(config);
        compiler
    }

    /// Applies a configuration on top of the current state.
    ///
    /// A non-empty breakpoint map replaces the current one. Shortcuts are
    /// merged. Preload classes are compiled before this returns.
    pub fn configure(&mut self, config: Config) {
        if config.tailwind {
            self.diagnostics.warn(Warning::ExternalFrameworkUnsupported);
        }
        if !config.breakpoints.is_empty() {
            self.breakpoints = config.breakpoints;
        }
        if let Some(multiplier) = config.pixel_multiplier {
            self.pixel_multiplier = multiplier;
        }
        self.body_class |= config.body_class;

        for (name, expansion) in &config.shortcuts {
            self.add_shortcut(name, expansion);
        }
        for class in config.preload.classes() {
            self.compile(class);
        }
    }

    /// The view a single compile reads from.
    pub fn context(&self) -> Context<'_> {
        Context::new(&self.tables, &self.breakpoints, &self.shortcuts)
            .with_pixel_multiplier(self.pixel_multiplier)
    }

    /// Registers or overrides a breakpoint, keeping its position if it exists.
    pub fn add_breakpoint(&mut self, key: &str, media: &str) {
        self.breakpoints.insert(key.to_string(), media.to_string());
        self.retry_unresolved();
    }

    /// Registers or overrides a shortcut.
    ///
    /// Selector shortcuts are compiled right away.
    pub fn add_shortcut(&mut self, name: &str, expansion: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if KeywordTable::contains(&self.tables, name) {
            self.warn_shadowed(name);
        }
        self.shortcuts.insert(name.to_string(), expansion.to_string());
        self.retry_unresolved();
        if !is_identifier(name) {
            self.compile(name);
        }
    }

    /// Registers or overrides a keyword. A shortcut of the same name still
    /// takes precedence.
    pub fn add_keyword(&mut self, name: &str, block: &str) {
        if self.shortcuts.contains_key(name) {
            self.warn_shadowed(name);
        }
        self.tables.set_keyword(name, block);
        self.retry_unresolved();
    }

    pub fn add_property<I, S>(&mut self, name: &str, css_properties: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables.set_property(name, css_properties);
        self.retry_unresolved();
    }

    pub fn add_color(&mut self, color: &str, shade: &str, value: &str) {
        self.tables.set_color(color, shade, value);
        self.retry_unresolved();
    }

    fn warn_shadowed(&mut self, name: &str) {
        self.diagnostics.warn(Warning::ShortcutShadowsKeyword {
            name: name.to_string(),
        });
    }

    /// Any table edit may make a failed class resolve, so failures are
    /// forgotten. Resolved entries are kept until [`reset`](Self::reset).
    fn retry_unresolved(&mut self) {
        let evicted = self.cache.evict_unresolved();
        if evicted > 0 {
            log::debug!("{} unresolved classes will be compiled again", evicted);
        }
    }

    /// Compiles `class` into the cache and its sheet, returning the rule text.
    ///
    /// Returns `None` for classes that do not resolve. A second call for the
    /// same string returns the stored result and injects nothing.
    pub fn compile(&mut self, class: &str) -> Option<&str> {
        if class.trim().is_empty() {
            return None;
        }
        if self.cache.entry(class).is_none() {
            self.cache.begin(class);
            let (kind, result) = self.build(class);
            log::debug!(
                "compiled '{}': {}",
                class,
                if result.is_some() { "ok" } else { "unresolved" }
            );
            return self.cache.finish(class, kind, result);
        }
        match self.cache.lookup(class) {
            Lookup::Hit(result) => result,
            Lookup::Pending | Lookup::Miss => None,
        }
    }

    fn build(&mut self, class: &str) -> (SheetKind, Option<String>) {
        if is_document_token(class) {
            return (SheetKind::Utilities, None);
        }
        let ctx = self.context();
        if !ctx.is_shortcut(class) {
            let css = compile_token(class, &ctx).map(|compiled| render_rules(class, &compiled));
            return (SheetKind::Utilities, css);
        }
        match compile_shortcut(class, &ctx) {
            Ok(css) => (SheetKind::Shortcuts, css),
            Err(source) => {
                self.diagnostics.warn(Warning::CyclicShortcut {
                    name: class.to_string(),
                    source,
                });
                (SheetKind::Shortcuts, None)
            }
        }
    }

    /// Resolves a class to the property/value pairs it sets on the element
    /// itself, for inline application.
    ///
    /// Only unconditional declarations are kept: anything behind a
    /// breakpoint, pseudo-state or dark ancestor is dropped. `!important` is
    /// stripped. Later declarations of the same property win, and defaults
    /// such as the offset `position: relative` only fill gaps.
    pub fn inline_declarations(&mut self, class: &str) -> IndexMap<String, String> {
        let ctx = self.context();
        let tokens = if ctx.is_shortcut(class) {
            match expand_shortcut(class, &ctx) {
                Ok(tokens) => tokens,
                Err(source) => {
                    self.diagnostics.warn(Warning::CyclicShortcut {
                        name: class.to_string(),
                        source,
                    });
                    return IndexMap::new();
                }
            }
        } else {
            vec![class.to_string()]
        };

        let mut styles = IndexMap::new();
        let mut defaults = IndexMap::new();
        for token in &tokens {
            let Some(compiled) = compile_token(token, &ctx) else {
                continue;
            };
            let unconditional = compiled.iter().filter(|c| {
                c.at_rules.is_empty()
                    && c.pseudo_suffix.is_empty()
                    && (c.ancestor.is_empty() || c.ancestor == HIGH_SPECIFICITY_PREFIX)
            });
            for c in unconditional {
                for declaration in parse_block(&c.fallbacks.concat()) {
                    defaults.insert(declaration.property, declaration.value);
                }
                for declaration in parse_block(&c.declarations.concat()) {
                    let value = declaration
                        .value
                        .trim_end_matches("!important")
                        .trim_end()
                        .to_string();
                    styles.shift_remove(&declaration.property);
                    styles.insert(declaration.property, value);
                }
            }
        }
        for (property, value) in defaults {
            styles.entry(property).or_insert(value);
        }
        styles
    }

    /// Restores default tables and breakpoints and empties every cache and sheet.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn sheets(&self) -> &StyleSheets {
        self.cache.sheets()
    }

    pub fn cache(&self) -> &CompilationCache {
        &self.cache
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn shortcuts(&self) -> &Shortcuts {
        &self.shortcuts
    }

    pub fn pixel_multiplier(&self) -> u32 {
        self.pixel_multiplier
    }

    /// Whether viewport classes are toggled on the root element.
    pub fn body_class(&self) -> bool {
        self.body_class
    }

    /// Human-readable listing of breakpoints, properties, keywords and shortcuts.
    pub fn describe(&self) -> Result<String, minijinja::Error> {
        describe::describe(&self.context())
    }
}
