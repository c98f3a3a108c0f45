#![deny(missing_docs)]

//! # Struct Tags
//!
//! Parsing and rendering of Go struct tags: space-separated `key:"value"`
//! pairs, where the value is a comma-separated list made of a name followed
//! by options.
//!
//! Entries that are parsed but never replaced keep their original quoted
//! text, so rendering a parsed tag reproduces it byte for byte.

pub mod literal;

use derive_more::Display;
use std::fmt;

/// Syntax errors reported while parsing a struct tag.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum TagError {
    /// A key was empty or contained forbidden characters.
    #[display("bad syntax for struct tag key")]
    KeySyntax,
    /// A key was not followed by `:`.
    #[display("bad syntax for struct tag pair")]
    PairSyntax,
    /// A value was not a well-formed quoted string.
    #[display("bad syntax for struct tag value")]
    ValueSyntax,
}

impl std::error::Error for TagError {}

/// A single `key:"name,opt1,opt2"` entry.
#[derive(Debug, Clone)]
pub struct Tag {
    /// The format namespace, e.g. `json` or `yaml`.
    pub key: String,
    /// The serialized name. `-` omits the field, an empty name keeps the Go name.
    pub name: String,
    /// Option flags following the name, e.g. `omitempty`.
    pub options: Vec<String>,
    /// Original quoted value, present only for entries read from source.
    raw: Option<String>,
}

impl Tag {
    /// Creates a new entry.
    pub fn new(key: impl Into<String>, name: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            options,
            raw: None,
        }
    }

    /// The unquoted value: the name followed by the options, comma separated.
    pub fn value(&self) -> String {
        if self.options.is_empty() {
            self.name.clone()
        } else {
            format!("{},{}", self.name, self.options.join(","))
        }
    }

    /// Whether the entry carries the given option.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.name == other.name && self.options == other.options
    }
}

impl Eq for Tag {}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => write!(f, "{}:{}", self.key, raw),
            None => write!(f, "{}:{}", self.key, literal::quote(&self.value())),
        }
    }
}

/// An ordered list of struct tag entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    tags: Vec<Tag>,
}

impl Tags {
    /// Parses unquoted struct tag text. Empty or blank text yields no entries.
    pub fn parse(text: &str) -> Result<Self, TagError> {
        let mut tags = Vec::new();
        let mut rest = text;

        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }

            let bytes = rest.as_bytes();
            let mut i = 0;
            while i < bytes.len()
                && bytes[i] > b' '
                && bytes[i] != b':'
                && bytes[i] != b'"'
                && bytes[i] != 0x7f
            {
                i += 1;
            }
            if i == 0 {
                return Err(TagError::KeySyntax);
            }
            if i + 1 >= bytes.len() || bytes[i] != b':' {
                return Err(TagError::PairSyntax);
            }
            if bytes[i + 1] != b'"' {
                return Err(TagError::ValueSyntax);
            }

            let key = &rest[..i];
            rest = &rest[i + 1..];

            // Scan to the closing quote, skipping escaped characters.
            let bytes = rest.as_bytes();
            let mut j = 1;
            while j < bytes.len() && bytes[j] != b'"' {
                if bytes[j] == b'\\' {
                    j += 1;
                }
                j += 1;
            }
            if j >= bytes.len() {
                return Err(TagError::ValueSyntax);
            }

            let quoted = &rest[..=j];
            rest = &rest[j + 1..];

            let value = literal::unquote(quoted).map_err(|_| TagError::ValueSyntax)?;
            let mut parts = value.split(',');
            let name = parts.next().unwrap_or_default().to_string();
            let options = parts.map(str::to_string).collect();

            tags.push(Tag {
                key: key.to_string(),
                name,
                options,
                raw: Some(quoted.to_string()),
            });
        }

        Ok(Self { tags })
    }

    /// Returns the first entry with the given key.
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.key == key)
    }

    /// Whether an entry with the given key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts the entry, replacing every entry with the same key in place.
    /// Appends it when the key is new.
    pub fn set(&mut self, tag: Tag) {
        let mut replaced = false;
        for existing in self.tags.iter_mut().filter(|t| t.key == tag.key) {
            *existing = tag.clone();
            replaced = true;
        }
        if !replaced {
            self.tags.push(tag);
        }
    }

    /// The keys in order.
    pub fn keys(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.key.as_str()).collect()
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", tag)?;
        }
        Ok(())
    }
}
