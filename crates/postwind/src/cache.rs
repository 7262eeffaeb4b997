//! Compilation cache and the two style-sheet buffers it feeds.
//!
//! Each distinct class string is compiled at most once per session and its
//! rule text is appended to a sheet at most once. Entries are keyed by the
//! original class string, before any parsing, and only go away when the
//! whole cache is cleared.

use std::collections::HashMap;

/// Which buffer a compiled rule is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    /// Rules from plain tokens.
    Utilities,
    /// Nested rules from shortcut expansion.
    Shortcuts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheState {
    /// Compilation has started but not produced a result yet.
    Pending,
    /// Finished; `None` when the class is not one of ours.
    Resolved(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub state: CacheState,
    pub injected: bool,
}

/// Result of looking a class up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Hit(Option<&'a str>),
    Pending,
    Miss,
}

/// Append-only rule text, split by origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheets {
    utilities: String,
    shortcuts: String,
}

impl StyleSheets {
    pub fn append(&mut self, kind: SheetKind, css: &str) {
        let sheet = match kind {
            SheetKind::Utilities => &mut self.utilities,
            SheetKind::Shortcuts => &mut self.shortcuts,
        };
        if !sheet.is_empty() {
            sheet.push('\n');
        }
        sheet.push_str(css);
    }

    pub fn text(&self, kind: SheetKind) -> &str {
        match kind {
            SheetKind::Utilities => &self.utilities,
            SheetKind::Shortcuts => &self.shortcuts,
        }
    }

    pub fn utilities(&self) -> &str {
        &self.utilities
    }

    pub fn shortcuts(&self) -> &str {
        &self.shortcuts
    }

    pub fn clear(&mut self) {
        self.utilities.clear();
        self.shortcuts.clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompilationCache {
    entries: HashMap<String, CacheEntry>,
    sheets: StyleSheets,
}

impl CompilationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, class: &str) -> Lookup<'_> {
        match self.entries.get(class) {
            Some(CacheEntry {
                state: CacheState::Resolved(result),
                ..
            }) => Lookup::Hit(result.as_deref()),
            Some(_) => Lookup::Pending,
            None => Lookup::Miss,
        }
    }

    pub fn entry(&self, class: &str) -> Option<&CacheEntry> {
        self.entries.get(class)
    }

    /// Marks `class` as being compiled.
    pub fn begin(&mut self, class: &str) {
        self.entries.insert(
            class.to_string(),
            CacheEntry {
                state: CacheState::Pending,
                injected: false,
            },
        );
    }

    /// Stores the result for `class` and injects it if it has not been yet.
    pub fn finish(&mut self, class: &str, kind: SheetKind, result: Option<String>) -> Option<&str> {
        let entry = self
            .entries
            .entry(class.to_string())
            .or_insert(CacheEntry {
                state: CacheState::Pending,
                injected: false,
            });

        if let Some(css) = result.as_deref() {
            if !css.is_empty() && !entry.injected {
                self.sheets.append(kind, css);
                entry.injected = true;
            }
        }
        entry.state = CacheState::Resolved(result);

        match &entry.state {
            CacheState::Resolved(result) => result.as_deref(),
            CacheState::Pending => None,
        }
    }

    /// Drops every resolved-to-nothing entry so those classes are compiled
    /// again on their next request.
    ///
    /// Returns how many entries were removed.
    pub fn evict_unresolved(&mut self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.state != CacheState::Resolved(None));
        before - self.entries.len()
    }

    pub fn sheets(&self) -> &StyleSheets {
        &self.sheets
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.sheets.clear();
    }
}
