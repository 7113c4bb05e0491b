//! Relationship parts (`_rels/*.rels`)

use crate::xml::{push_attr_pair, XML_DECLARATION};

const PACKAGE_BASE: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Relationship type URIs
pub mod types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const CUSTOM_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/custom-properties";
    pub const WORKSHEET: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const SHARED_STRINGS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
}

/// One `<Relationship>` entry of a rels part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipEntry {
    pub id: String,
    pub rel_type: String,
    /// Target relative to the source part's directory, or an absolute url
    pub target: String,
    pub external: bool,
}

/// Name of the rels part describing `source`; `""` is the package root
pub(crate) fn rels_part_name(source: &str) -> String {
    match source.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None if source.is_empty() => "_rels/.rels".to_string(),
        None => format!("_rels/{}.rels", source),
    }
}

/// Path of `target` relative to the directory holding `source`
pub(crate) fn relative_target(source: &str, target: &str) -> String {
    let source_dir: Vec<&str> = match source.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let target_parts: Vec<&str> = target.split('/').collect();

    let common = source_dir
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut path = "../".repeat(source_dir.len() - common);
    path.push_str(&target_parts[common..].join("/"));
    path
}

/// Render a rels part
pub(crate) fn render(entries: &[RelationshipEntry]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 160);
    xml.push_str(XML_DECLARATION);
    xml.push_str("<Relationships xmlns=\"");
    xml.push_str(PACKAGE_BASE);
    xml.push_str("\">");
    for entry in entries {
        xml.push_str("<Relationship");
        push_attr_pair(&mut xml, "Id", &entry.id);
        push_attr_pair(&mut xml, "Type", &entry.rel_type);
        push_attr_pair(&mut xml, "Target", &entry.target);
        if entry.external {
            xml.push_str(" TargetMode=\"External\"");
        }
        xml.push_str("/>");
    }
    xml.push_str("</Relationships>");
    xml
}
