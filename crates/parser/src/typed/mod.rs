//! Typed object-graph traversal
//!
//! Binds the document into `serde` structs first, then walks the object
//! graph. Produces the same model as [`crate::tree`] for any document that
//! binds; a document whose fields have the wrong kind is rejected as
//! malformed input.

mod converter;
mod types;

pub use converter::TypedWalker;
pub use types::*;
