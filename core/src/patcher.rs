#![deny(missing_docs)]

//! # Code Patching
//!
//! Rewrites struct tags in Go source text. Only the tag spans are touched,
//! so manual formatting and comments elsewhere survive unchanged.

use crate::config::TaggerConfig;
use crate::error::{AppError, AppResult};
use crate::merge::merge_field_tag;
use crate::parser::extract_structs;
use log::debug;
use std::fs;
use std::ops::Range;
use std::path::Path;

/// Result of annotating a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotated {
    /// The rewritten source.
    pub source: String,
    /// Number of exported struct types visited.
    pub structs: usize,
    /// Number of fields whose tag was set.
    pub tagged: usize,
    /// Number of fields left untouched (no usable name).
    pub skipped: usize,
}

#[derive(Debug)]
struct Edit {
    range: Range<usize>,
    text: String,
}

/// Adds the configured tag to every field of every exported struct.
///
/// Either every field is processed or an error is returned; the first
/// malformed tag aborts the run.
pub fn annotate_source(source: &str, config: &TaggerConfig) -> AppResult<Annotated> {
    let structs = extract_structs(source)?;

    let mut edits = Vec::new();
    let mut skipped = 0;

    for st in &structs {
        for field in &st.fields {
            let literal = merge_field_tag(&field.descriptor, config).map_err(|e| match e {
                AppError::MalformedTag { field, reason } => AppError::MalformedTag {
                    field: format!("{}.{}", st.name, field),
                    reason,
                },
                other => other,
            })?;

            let Some(literal) = literal else {
                debug!("{}:{}: skipping field without a usable name", st.name, field.line);
                skipped += 1;
                continue;
            };

            debug!("{}:{}: {}", st.name, field.line, literal);
            edits.push(match &field.tag_span {
                Some(span) => Edit {
                    range: span.clone(),
                    text: literal,
                },
                None => Edit {
                    range: field.type_end..field.type_end,
                    text: format!(" {}", literal),
                },
            });
        }
    }

    let tagged = edits.len();
    Ok(Annotated {
        source: apply_edits(source, edits),
        structs: structs.len(),
        tagged,
        skipped,
    })
}

/// Reads a file and annotates its contents. The file itself is not modified.
pub fn annotate_file(path: &Path, config: &TaggerConfig) -> AppResult<Annotated> {
    let source = fs::read_to_string(path)?;
    annotate_source(&source, config)
}

// Spans come from a single parse and never overlap; applying them back to
// front keeps earlier offsets valid.
fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| e.range.start);
    let mut new_source = source.to_string();
    for edit in edits.into_iter().rev() {
        new_source.replace_range(edit.range, &edit.text);
    }
    new_source
}
