#![deny(missing_docs)]

//! # protoyamltag core
//!
//! Adds YAML struct tags to Go structs generated from Protocol Buffers.
//! Each field of an exported struct gets a `yaml` entry derived from its
//! name, existing entries are kept.

/// Shared error types.
pub mod error;

/// Tagging rules and their YAML configuration file.
pub mod config;

/// Go identifier helpers.
pub mod naming;

/// Struct tag parsing and rendering.
pub mod tag;

/// Per-field tag merging.
pub mod merge;

/// Go source parsing and struct extraction.
pub mod parser;

/// Source patching.
pub mod patcher;

/// Optional gofmt pass.
pub mod formatter;

pub use config::TaggerConfig;
pub use error::{AppError, AppResult};
pub use formatter::gofmt;
pub use merge::{merge_field_tag, target_tag, FieldDescriptor};
pub use naming::{is_exported, lower_camel_case};
pub use parser::{extract_structs, FieldSite, StructSite};
pub use patcher::{annotate_file, annotate_source, Annotated};
pub use tag::{Tag, TagError, Tags};
