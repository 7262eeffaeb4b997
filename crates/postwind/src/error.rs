//! Errors and non-fatal warnings.
//!
//! Nothing in the compiler is fatal. Token-shaped failures resolve to `None`,
//! configuration documents fail with [`ConfigError`], and everything the
//! author should hear about is recorded as a [`Warning`] in [`Diagnostics`].

use thiserror::Error;

/// Tagged failure from shortcut expansion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A shortcut was revisited while it was still being expanded.
    #[error("cycle detected in shortcuts: {}", path.join(" -> "))]
    CycleDetected { path: Vec<String> },
}

/// Error returned when a configuration document cannot be parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A non-fatal condition surfaced once per session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    /// A shortcut and a keyword share a name. The shortcut wins.
    #[error("shortcut '{name}' shadows the keyword of the same name")]
    ShortcutShadowsKeyword { name: String },
    /// A shortcut expansion revisited one of its own ancestors.
    #[error("shortcut '{name}' was not compiled: {source}")]
    CyclicShortcut { name: String, source: CompileError },
    /// The host cannot observe element sizes; container queries are disabled.
    #[error("size observation is unavailable; container queries are disabled")]
    SizeObserverUnavailable,
    /// The configuration asked for external framework delegation.
    #[error("external framework resolution is not supported; using built-in tables")]
    ExternalFrameworkUnsupported,
}

/// Ordered, deduplicated list of warnings raised during a session.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning and logs it, unless an equal warning was already seen.
    ///
    /// Returns `true` when the warning is new.
    pub fn warn(&mut self, warning: Warning) -> bool {
        if self.warnings.contains(&warning) {
            return false;
        }
        log::warn!("{}", warning);
        self.warnings.push(warning);
        true
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Removes and returns every recorded warning.
    ///
    /// Drained warnings count as unseen again.
    pub fn drain(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}
