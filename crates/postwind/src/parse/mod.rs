//! Token grammar: modifier prefixes, importance suffixes, shorthand notations.

pub mod modifier;
pub mod shorthand;
pub mod special;

pub use modifier::{
    parse_token, split_importance, Importance, ParsedToken, PseudoState, DARK_CLASS,
    VISIBLE_CLASS,
};
pub use shorthand::{expand, expand_shorthand, rewrite_at_suffix};
pub use special::{
    container_query, deferred_class, is_document_token, ContainerToken, QueryMode, ONLOAD_PREFIX,
};
