//! Utility classes compiled to CSS on demand.
//!
//! `postwind` turns class tokens such as `p-4`, `hover:bg-blue-500`,
//! `m:text-sm`, `w-1/3`, `p-2|4|8` or `m-4!` into CSS rules the first time
//! they are seen, and appends each rule exactly once to one of two style
//! sheets. Named shortcuts expand to several tokens and compile to a single
//! nested rule.
//!
//! The crate has two layers:
//!
//! - [`Compiler`]: the pure pipeline. Token in, rule text out, with a
//!   per-session cache and live, editable tables.
//! - [`dom::Reactor`]: drives a compiler from a host document. It scans the
//!   tree, reacts to mutations, applies container queries as inline styles,
//!   and toggles visibility and deferred classes.
//!
//! # Token grammar
//!
//! ```text
//! [breakpoint:][state:]*base[!|!!]
//! ```
//!
//! - `breakpoint`: a configured key (`m`, `t`, `d` by default), wraps the
//!   rule in its media query. `text-sm@m` is the same as `m:text-sm`.
//! - `state`: `hover`, `focus`, `first`, `odd`, `before`, `dark`,
//!   `children`, `visible`, ...
//! - `!` adds `!important`; `!!` raises selector specificity instead.
//! - `p-10|20|30` and `p-10:20:30` set one value per breakpoint, in order.
//!
//! # Example
//!
//! ```rust
//! use postwind::{Compiler, Config};
//!
//! let config = Config::from_json(r#"{ "shortcuts": { "btn": "px-4 py-2 rounded" } }"#).unwrap();
//! let mut compiler = Compiler::with_config(config);
//!
//! assert_eq!(
//!     compiler.compile("m:p-4"),
//!     Some("@media (max-width: 640px) { .m\\:p-4 { padding: 16px; } }")
//! );
//! assert_eq!(compiler.compile("m-4!"), Some(".m-4\\! { margin: 16px !important; }"));
//! assert!(compiler.compile("btn").is_some());
//! ```

pub mod cache;
pub mod codegen;
pub mod compiler;
pub mod config;
pub mod describe;
pub mod dom;
pub mod error;
pub mod parse;
pub mod resolve;
pub mod tables;

pub use cache::{CompilationCache, SheetKind, StyleSheets};
pub use codegen::CompiledDeclaration;
pub use compiler::Compiler;
pub use config::{default_breakpoints, Breakpoints, Config, Context, Preload, Shortcuts};
pub use error::{CompileError, ConfigError, Diagnostics, Warning};
pub use parse::{Importance, ParsedToken, PseudoState};
pub use resolve::Declaration;
pub use tables::{ColorTable, KeywordTable, PropertyTable, Tables};
