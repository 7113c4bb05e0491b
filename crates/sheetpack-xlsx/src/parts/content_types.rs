//! `[Content_Types].xml`

use crate::xml::{push_attr_pair, XML_DECLARATION};

pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const XML: &str = "application/xml";
pub const WORKBOOK: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
pub const WORKSHEET: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
pub const STYLES: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
pub const SHARED_STRINGS: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";
pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
pub const EXTENDED_PROPERTIES: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";
pub const CUSTOM_PROPERTIES: &str =
    "application/vnd.openxmlformats-officedocument.custom-properties+xml";

/// Render the content-types part
///
/// `rels` and `xml` are covered by defaults; every part in `overrides` gets
/// its own entry, in the order given. Part names are archive paths without
/// the leading slash.
pub(crate) fn render<'a, I>(overrides: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
    );
    push_default(&mut xml, "rels", RELATIONSHIPS);
    push_default(&mut xml, "xml", XML);

    for (part, content_type) in overrides {
        xml.push_str("<Override");
        xml.push_str(" PartName=\"/");
        crate::xml::push_attr(&mut xml, part);
        xml.push('"');
        push_attr_pair(&mut xml, "ContentType", content_type);
        xml.push_str("/>");
    }
    xml.push_str("</Types>");
    xml
}

fn push_default(xml: &mut String, extension: &str, content_type: &str) {
    xml.push_str("<Default");
    push_attr_pair(xml, "Extension", extension);
    push_attr_pair(xml, "ContentType", content_type);
    xml.push_str("/>");
}
