//! # Naming
//!
//! Identifier helpers for Go names.

/// Converts an upper-camel-case Go identifier into the lower-camel-case
/// name used by serialization formats.
///
/// Only the first character is lower-cased, so a leading acronym keeps the
/// rest of its capitals: `UserID` becomes `userID` and `RPCType` becomes
/// `rPCType`.
pub fn lower_camel_case(ident: &str) -> String {
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reports whether a Go identifier is exported (starts with an upper-case letter).
pub fn is_exported(ident: &str) -> bool {
    ident.chars().next().is_some_and(char::is_uppercase)
}
