//! The document-reactive layer.
//!
//! [`Reactor`] walks a host tree through the [`Document`] trait, compiles
//! every class it finds, and keeps two kinds of per-element state:
//!
//! - container queries ([`container`]): inline styles from the element's own width
//! - visibility and deferred classes ([`visibility`]): helper classes from
//!   intersection reports and a short timer
//!
//! [`MemoryDocument`] is an in-memory host for tests and embedders that
//! mirror a tree from elsewhere.

pub mod container;
pub mod document;
pub mod media;
pub mod memory;
pub mod reactor;
pub mod visibility;

pub use container::{Condition, ContainerQueries, ContainerQueryState};
pub use document::{Document, ElementId, Mutation};
pub use media::matches_width;
pub use memory::MemoryDocument;
pub use reactor::{Reactor, VIEWPORT_CLASS_PREFIX};
pub use visibility::{Visibility, ONLOAD_DELAY_MS, VISIBILITY_THRESHOLD};
