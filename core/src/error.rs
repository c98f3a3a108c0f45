//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Every failure aborts the whole run; there is no partial-success mode.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors (reading, writing or rendering output).
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The input is not syntactically valid Go source.
    #[from(ignore)]
    #[display("Parse Error at {line}:{column}: {message}")]
    Parse {
        /// 1-based line of the first offending node.
        line: usize,
        /// 1-based column of the first offending node.
        column: usize,
        /// Short description of the offending node.
        message: String,
    },

    /// An existing struct tag on a field could not be parsed.
    #[from(ignore)]
    #[display("Malformed Tag on field '{field}': {reason}")]
    MalformedTag {
        /// Name of the field carrying the tag.
        field: String,
        /// What was wrong with the tag text.
        reason: String,
    },

    /// The YAML configuration file could not be loaded.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// The external formatter failed.
    #[from(ignore)]
    #[display("Format Error: {_0}")]
    Format(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // Test that String defaults to General
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let err = AppError::Parse {
            line: 3,
            column: 7,
            message: "unexpected `}`".into(),
        };
        assert_eq!(err.to_string(), "Parse Error at 3:7: unexpected `}`");
    }

    #[test]
    fn test_malformed_tag_display() {
        let err = AppError::MalformedTag {
            field: "Name".into(),
            reason: "bad syntax for struct tag value".into(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed Tag on field 'Name': bad syntax for struct tag value"
        );
    }
}
