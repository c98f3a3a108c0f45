#![deny(missing_docs)]

//! # Parser Module
//!
//! Parses Go source with the tree-sitter Go grammar and extracts the fields
//! of exported struct types, together with the byte spans needed to patch
//! their tags.

use crate::error::{AppError, AppResult};
use crate::merge::FieldDescriptor;
use crate::naming::is_exported;
use std::ops::Range;
use tree_sitter::{Node, Parser, Tree};

/// A struct field located in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSite {
    /// Names, embedded type and existing tag of the field.
    pub descriptor: FieldDescriptor,
    /// Byte span of the existing tag literal.
    pub tag_span: Option<Range<usize>>,
    /// Byte offset right after the field type, where a missing tag is inserted.
    pub type_end: usize,
    /// 1-based line of the field declaration.
    pub line: usize,
}

/// An exported struct type located in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructSite {
    /// The type name.
    pub name: String,
    /// 1-based line of the type spec.
    pub line: usize,
    /// Fields in declaration order.
    pub fields: Vec<FieldSite>,
}

/// Parses Go source, failing on the first syntax error.
pub fn parse_go(source: &str) -> AppResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| AppError::General(format!("Failed to load Go grammar: {}", e)))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AppError::General("Go parser returned no syntax tree".into()))?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(syntax_error(root, source));
    }

    Ok(tree)
}

/// Extracts every exported struct type, in document order.
///
/// Type declarations inside function bodies are included. Unexported types
/// are skipped together with anything nested in them.
pub fn extract_structs(source: &str) -> AppResult<Vec<StructSite>> {
    let tree = parse_go(source)?;
    let mut structs = Vec::new();
    collect_structs(tree.root_node(), source.as_bytes(), &mut structs);
    Ok(structs)
}

fn collect_structs(node: Node, src: &[u8], out: &mut Vec<StructSite>) {
    if matches!(node.kind(), "type_spec" | "type_alias") {
        if let Some(site) = struct_site(node, src) {
            out.push(site);
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_structs(child, src, out);
    }
}

fn struct_site(spec: Node, src: &[u8]) -> Option<StructSite> {
    let name = node_text(spec.child_by_field_name("name")?, src);
    if !is_exported(name) {
        return None;
    }

    let ty = spec.child_by_field_name("type")?;
    if ty.kind() != "struct_type" {
        return None;
    }

    let mut cursor = ty.walk();
    let list = ty
        .named_children(&mut cursor)
        .find(|n| n.kind() == "field_declaration_list")?;

    let mut cursor = list.walk();
    let fields = list
        .named_children(&mut cursor)
        .filter(|n| n.kind() == "field_declaration")
        .filter_map(|decl| field_site(decl, src))
        .collect();

    Some(StructSite {
        name: name.to_string(),
        line: spec.start_position().row + 1,
        fields,
    })
}

fn field_site(decl: Node, src: &[u8]) -> Option<FieldSite> {
    let ty = decl.child_by_field_name("type")?;

    let mut cursor = decl.walk();
    let names: Vec<String> = decl
        .children_by_field_name("name", &mut cursor)
        .map(|n| node_text(n, src).to_string())
        .collect();

    // Only `T` counts as an embedded type name; `*T`, `pkg.T` and `T[U]` do not.
    let embedded_type = if names.is_empty() && ty.kind() == "type_identifier" && !is_pointer_embed(decl)
    {
        Some(node_text(ty, src).to_string())
    } else {
        None
    };

    let tag = decl.child_by_field_name("tag");

    Some(FieldSite {
        descriptor: FieldDescriptor {
            names,
            embedded_type,
            existing_tag: tag.map(|t| node_text(t, src).to_string()),
        },
        tag_span: tag.map(|t| t.byte_range()),
        type_end: ty.end_byte(),
        line: decl.start_position().row + 1,
    })
}

fn is_pointer_embed(decl: Node) -> bool {
    let mut cursor = decl.walk();
    let is_pointer = decl.children(&mut cursor).any(|c| c.kind() == "*");
    is_pointer
}

fn syntax_error(root: Node, source: &str) -> AppError {
    let node = first_error(root).unwrap_or(root);
    let pos = node.start_position();

    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let snippet: String = node_text(node, source.as_bytes())
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(32)
            .collect();
        format!("unexpected `{}`", snippet.trim())
    };

    AppError::Parse {
        line: pos.row + 1,
        column: pos.column + 1,
        message,
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

fn node_text<'a>(node: Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}
