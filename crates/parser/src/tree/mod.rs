//! Generic JSON tree traversal
//!
//! Reads the document through `serde_json::Value` lookups without binding it
//! to any schema first. Tolerates arbitrary structure: a field of the wrong
//! kind is treated like an absent one.

mod converter;
mod node;

pub use converter::JsonTreeWalker;
