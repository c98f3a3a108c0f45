//! # Tag Merging
//!
//! Computes the new struct tag for a single field: the existing entries are
//! kept, and the configured key is upserted with a name derived from the
//! field.

use crate::config::TaggerConfig;
use crate::error::{AppError, AppResult};
use crate::naming::lower_camel_case;
use crate::tag::literal::{unquote, wrap_tag_literal};
use crate::tag::{Tag, Tags};

/// A struct field as seen by the merger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declared names. Empty for embedded fields.
    pub names: Vec<String>,
    /// Type name of an embedded field, when it is a plain identifier.
    pub embedded_type: Option<String>,
    /// The existing tag literal, still quoted (e.g. `` `json:"id"` ``).
    pub existing_tag: Option<String>,
}

impl FieldDescriptor {
    /// A named field without a tag.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            ..Self::default()
        }
    }

    /// An embedded field without a tag.
    pub fn embedded(type_name: impl Into<String>) -> Self {
        Self {
            embedded_type: Some(type_name.into()),
            ..Self::default()
        }
    }

    /// Attaches an existing tag literal.
    pub fn with_tag(mut self, literal: impl Into<String>) -> Self {
        self.existing_tag = Some(literal.into());
        self
    }

    /// The name the injected tag is derived from: the first declared name,
    /// or the embedded type name.
    pub fn base_name(&self) -> Option<&str> {
        self.names
            .first()
            .or(self.embedded_type.as_ref())
            .map(String::as_str)
    }
}

/// Builds the entry to upsert for a field.
///
/// Ignored fields get `-`, oneof wrappers get `,inline`, everything else gets
/// its lower-camel-case name with the omit-empty option.
pub fn target_tag(base_name: &str, existing: &Tags, config: &TaggerConfig) -> Tag {
    if !config.ignore_prefix.is_empty() && base_name.starts_with(&config.ignore_prefix) {
        Tag::new(&config.key, "-", vec![])
    } else if existing.contains(&config.oneof_key) {
        Tag::new(&config.key, "", vec![config.inline_option.clone()])
    } else {
        Tag::new(
            &config.key,
            lower_camel_case(base_name),
            vec![config.omit_empty_option.clone()],
        )
    }
}

/// Computes the new tag literal for a field.
///
/// Returns `Ok(None)` when the field has no usable name (e.g. an embedded
/// pointer or qualified type) and must be left untouched.
pub fn merge_field_tag(field: &FieldDescriptor, config: &TaggerConfig) -> AppResult<Option<String>> {
    let Some(base_name) = field.base_name() else {
        return Ok(None);
    };

    let malformed = |reason: String| AppError::MalformedTag {
        field: base_name.to_string(),
        reason,
    };

    let text = match field.existing_tag.as_deref() {
        None | Some("") => String::new(),
        Some(literal) => unquote(literal).map_err(malformed)?,
    };
    let mut tags = Tags::parse(&text).map_err(|e| malformed(e.to_string()))?;

    let tag = target_tag(base_name, &tags, config);
    tags.set(tag);

    Ok(Some(wrap_tag_literal(&tags.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn merge(field: &FieldDescriptor) -> String {
        merge_field_tag(field, &TaggerConfig::default())
            .unwrap()
            .expect("field should be tagged")
    }

    #[test]
    fn test_no_tag() {
        let field = FieldDescriptor::named("FieldName");
        assert_eq!(merge(&field), "`yaml:\"fieldName,omitempty\"`");
    }

    #[test]
    fn test_empty_tag_literal() {
        let field = FieldDescriptor::named("FieldName").with_tag("");
        assert_eq!(merge(&field), "`yaml:\"fieldName,omitempty\"`");

        let field = FieldDescriptor::named("FieldName").with_tag("``");
        assert_eq!(merge(&field), "`yaml:\"fieldName,omitempty\"`");
    }

    #[test]
    fn test_tag_exists() {
        let field = FieldDescriptor::named("FieldName").with_tag("`json:\"field_name,omitempty\"`");
        assert_eq!(
            merge(&field),
            "`json:\"field_name,omitempty\" yaml:\"fieldName,omitempty\"`"
        );
    }

    #[test]
    fn test_interpreted_tag_literal() {
        let field = FieldDescriptor::named("FieldName").with_tag(r#""json:\"field_name\"""#);
        assert_eq!(
            merge(&field),
            "`json:\"field_name\" yaml:\"fieldName,omitempty\"`"
        );
    }

    #[test]
    fn test_embedded_struct() {
        let field = FieldDescriptor::embedded("EmbeddedStruct");
        assert_eq!(merge(&field), "`yaml:\"embeddedStruct,omitempty\"`");
    }

    #[test]
    fn test_ignore_prefix() {
        let field = FieldDescriptor::named("XXX_FieldName");
        assert_eq!(merge(&field), "`yaml:\"-\"`");
    }

    #[test]
    fn test_ignore_prefix_is_idempotent() {
        let field = FieldDescriptor::named("XXX_unrecognized").with_tag("`json:\"-\"`");
        let once = merge(&field);
        let twice = merge(&FieldDescriptor::named("XXX_unrecognized").with_tag(once.clone()));
        assert_eq!(once, "`json:\"-\" yaml:\"-\"`");
        assert_eq!(twice, once);
    }

    #[test]
    fn test_replaces_existing_yaml_entry() {
        let field = FieldDescriptor::named("Name").with_tag("`yaml:\"legacy\" json:\"name\"`");
        assert_eq!(merge(&field), "`yaml:\"name,omitempty\" json:\"name\"`");
    }

    #[test]
    fn test_second_merge_overwrites_first() {
        let first = merge(&FieldDescriptor::named("Name"));
        let second = merge(&FieldDescriptor::named("DisplayName").with_tag(first));
        assert_eq!(second, "`yaml:\"displayName,omitempty\"`");
    }

    #[test]
    fn test_oneof_field_is_inlined() {
        let field = FieldDescriptor::named("Payload").with_tag("`protobuf_oneof:\"payload\"`");
        assert_eq!(
            merge(&field),
            "`protobuf_oneof:\"payload\" yaml:\",inline\"`"
        );
    }

    #[test]
    fn test_unrelated_entries_preserved_byte_for_byte() {
        let field = FieldDescriptor::named("UserID")
            .with_tag(r#"`protobuf:"bytes,1,opt,name=user_id,json=userId,proto3" json:"user_id"`"#);
        assert_eq!(
            merge(&field),
            r#"`protobuf:"bytes,1,opt,name=user_id,json=userId,proto3" json:"user_id" yaml:"userID,omitempty"`"#
        );
    }

    #[test]
    fn test_names_use_first_identifier() {
        let field = FieldDescriptor {
            names: vec!["Lat".into(), "Lng".into()],
            ..FieldDescriptor::default()
        };
        assert_eq!(merge(&field), "`yaml:\"lat,omitempty\"`");
    }

    #[test]
    fn test_unnamed_field_is_noop() {
        let field = FieldDescriptor::default().with_tag("`not a tag`");
        assert_eq!(merge_field_tag(&field, &TaggerConfig::default()).unwrap(), None);
    }

    #[test]
    fn test_malformed_tag() {
        let field = FieldDescriptor::named("Broken").with_tag("`json:field`");
        let err = merge_field_tag(&field, &TaggerConfig::default()).unwrap_err();
        match err {
            AppError::MalformedTag { field, reason } => {
                assert_eq!(field, "Broken");
                assert_eq!(reason, "bad syntax for struct tag value");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_literal() {
        let field = FieldDescriptor::named("Broken").with_tag(r#""json:\q""#);
        assert!(matches!(
            merge_field_tag(&field, &TaggerConfig::default()),
            Err(AppError::MalformedTag { .. })
        ));
    }

    #[test]
    fn test_custom_config() {
        let config = TaggerConfig {
            key: "toml".into(),
            ignore_prefix: "Internal".into(),
            ..TaggerConfig::default()
        };
        let tagged = merge_field_tag(&FieldDescriptor::named("Count"), &config).unwrap();
        assert_eq!(tagged.as_deref(), Some("`toml:\"count,omitempty\"`"));
        let ignored = merge_field_tag(&FieldDescriptor::named("InternalState"), &config).unwrap();
        assert_eq!(ignored.as_deref(), Some("`toml:\"-\"`"));
    }
}
