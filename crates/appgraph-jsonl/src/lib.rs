//! JSON Lines support for appgraph registries.
//!
//! Registries keep one entity per line in plain JSONL files. This crate
//! provides the strict, line-numbered reader used by the entity store, the
//! buffered writer, and atomic file replacement used when scaffolding or
//! seeding a registry.

#![forbid(unsafe_code)]

pub mod atomic;
pub mod error;
pub mod reader;
pub mod writer;

pub use atomic::write_jsonl_atomic;
pub use error::{Error, Result};
pub use reader::{JsonlReader, read_jsonl};
pub use writer::JsonlWriter;
