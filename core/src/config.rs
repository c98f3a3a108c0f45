//! # Configuration
//!
//! Tagging rules, loadable from an optional YAML file. Every key is optional
//! and falls back to the defaults used for `protoc-gen-go` output.

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Rules applied when deriving the injected tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaggerConfig {
    /// Key of the injected entry.
    pub key: String,
    /// Fields whose name starts with this prefix are marked `-`.
    pub ignore_prefix: String,
    /// Option added to derived names.
    pub omit_empty_option: String,
    /// Existing key identifying a oneof wrapper field.
    pub oneof_key: String,
    /// Option used for oneof wrapper fields.
    pub inline_option: String,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            key: "yaml".into(),
            ignore_prefix: "XXX_".into(),
            omit_empty_option: "omitempty".into(),
            oneof_key: "protobuf_oneof".into(),
            inline_option: "inline".into(),
        }
    }
}

impl TaggerConfig {
    /// Parses a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(text: &str) -> AppResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(text).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a YAML configuration file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text).map_err(|e| match e {
            AppError::Config(msg) => AppError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    fn validate(&self) -> AppResult<()> {
        let valid_key = !self.key.is_empty()
            && self
                .key
                .bytes()
                .all(|b| b > b' ' && b != b':' && b != b'"' && b != 0x7f);
        if !valid_key {
            return Err(AppError::Config(format!("invalid tag key '{}'", self.key)));
        }
        Ok(())
    }
}
