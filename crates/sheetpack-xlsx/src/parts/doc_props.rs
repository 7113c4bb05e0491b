//! Document property parts: `docProps/core.xml`, `docProps/app.xml` and
//! `docProps/custom.xml`

use chrono::NaiveDateTime;
use sheetpack_core::{CustomProperty, CustomValue, DocProperties};

use crate::xml::{push_attr_pair, push_element, push_int_attr, push_number, XML_DECLARATION};

const APPLICATION: &str = "Microsoft Excel";
const APP_VERSION: &str = "12.0000";

/// Format id every custom property carries
const CUSTOM_FMTID: &str = "{D5CDD505-2E9C-101B-9397-08002B2CF9AE}";

/// W3CDTF timestamp as used by `dcterms` and `vt:filetime`
fn w3cdtf(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Render `docProps/core.xml`; `now` stamps the modified time and stands in
/// for a missing creation time
pub(crate) fn render_core(props: &DocProperties, now: NaiveDateTime) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        "<cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
    );

    let optional = [
        ("dc:title", &props.title),
        ("dc:subject", &props.subject),
        ("dc:creator", &props.author),
        ("cp:keywords", &props.keywords),
        ("dc:description", &props.comments),
    ];
    for (tag, value) in optional {
        if !value.is_empty() {
            push_element(&mut xml, tag, value);
        }
    }

    push_element(&mut xml, "cp:lastModifiedBy", &props.author);

    let created = w3cdtf(&props.created.unwrap_or(now));
    xml.push_str("<dcterms:created xsi:type=\"dcterms:W3CDTF\">");
    xml.push_str(&created);
    xml.push_str("</dcterms:created>");
    xml.push_str("<dcterms:modified xsi:type=\"dcterms:W3CDTF\">");
    xml.push_str(&w3cdtf(&now));
    xml.push_str("</dcterms:modified>");

    if !props.category.is_empty() {
        push_element(&mut xml, "cp:category", &props.category);
    }
    if !props.status.is_empty() {
        push_element(&mut xml, "cp:contentStatus", &props.status);
    }

    xml.push_str("</cp:coreProperties>");
    xml
}

/// Render `docProps/app.xml` listing the worksheet names
pub(crate) fn render_app<'a, I>(props: &DocProperties, sheet_names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = sheet_names.into_iter().collect();

    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        "<Properties \
         xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" \
         xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">",
    );
    push_element(&mut xml, "Application", APPLICATION);
    xml.push_str("<DocSecurity>0</DocSecurity><ScaleCrop>false</ScaleCrop>");

    xml.push_str("<HeadingPairs><vt:vector size=\"2\" baseType=\"variant\">");
    xml.push_str("<vt:variant><vt:lpstr>Worksheets</vt:lpstr></vt:variant>");
    xml.push_str("<vt:variant><vt:i4>");
    xml.push_str(itoa::Buffer::new().format(names.len()));
    xml.push_str("</vt:i4></vt:variant></vt:vector></HeadingPairs>");

    xml.push_str("<TitlesOfParts><vt:vector");
    push_int_attr(&mut xml, "size", names.len());
    xml.push_str(" baseType=\"lpstr\">");
    for name in &names {
        push_element(&mut xml, "vt:lpstr", name);
    }
    xml.push_str("</vt:vector></TitlesOfParts>");

    if !props.manager.is_empty() {
        push_element(&mut xml, "Manager", &props.manager);
    }
    push_element(&mut xml, "Company", &props.company);
    xml.push_str("<LinksUpToDate>false</LinksUpToDate>");
    xml.push_str("<SharedDoc>false</SharedDoc>");
    if !props.hyperlink_base.is_empty() {
        push_element(&mut xml, "HyperlinkBase", &props.hyperlink_base);
    }
    xml.push_str("<HyperlinksChanged>false</HyperlinksChanged>");
    push_element(&mut xml, "AppVersion", APP_VERSION);
    xml.push_str("</Properties>");
    xml
}

/// Render `docProps/custom.xml`; property ids start at 2
pub(crate) fn render_custom(properties: &[CustomProperty]) -> String {
    let mut xml = String::with_capacity(256 + properties.len() * 128);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        "<Properties \
         xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/custom-properties\" \
         xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">",
    );

    for (pid, property) in (2u32..).zip(properties) {
        xml.push_str("<property");
        push_attr_pair(&mut xml, "fmtid", CUSTOM_FMTID);
        push_int_attr(&mut xml, "pid", pid);
        push_attr_pair(&mut xml, "name", &property.name);
        xml.push('>');
        match &property.value {
            CustomValue::String(s) => push_element(&mut xml, "vt:lpwstr", s),
            CustomValue::Number(n) => {
                xml.push_str("<vt:r8>");
                push_number(&mut xml, *n);
                xml.push_str("</vt:r8>");
            }
            CustomValue::Integer(i) => {
                xml.push_str("<vt:i4>");
                xml.push_str(itoa::Buffer::new().format(*i));
                xml.push_str("</vt:i4>");
            }
            CustomValue::Boolean(b) => {
                xml.push_str("<vt:bool>");
                xml.push_str(if *b { "true" } else { "false" });
                xml.push_str("</vt:bool>");
            }
            CustomValue::DateTime(dt) => {
                xml.push_str("<vt:filetime>");
                xml.push_str(&w3cdtf(dt));
                xml.push_str("</vt:filetime>");
            }
        }
        xml.push_str("</property>");
    }

    xml.push_str("</Properties>");
    xml
}
