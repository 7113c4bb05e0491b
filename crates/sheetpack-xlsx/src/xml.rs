//! XML text helpers shared by the part renderers

/// Declaration that starts every part
pub(crate) const XML_DECLARATION: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

pub(crate) const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub(crate) const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Append `s` as element text: `& < >` become entities
pub(crate) fn push_text(out: &mut String, s: &str) {
    push_escaped(out, s, false);
}

/// Append `s` as an attribute value: `& < > "` become entities
pub(crate) fn push_attr(out: &mut String, s: &str) {
    push_escaped(out, s, true);
}

/// Append ` name="value"` with the value escaped
pub(crate) fn push_attr_pair(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    push_attr(out, value);
    out.push('"');
}

/// Append ` name="n"`
pub(crate) fn push_int_attr<I: itoa::Integer>(out: &mut String, name: &str, n: I) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(itoa::Buffer::new().format(n));
    out.push('"');
}

/// Append `<tag>text</tag>`
pub(crate) fn push_element(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    push_text(out, text);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Control characters other than tab, newline and carriage return have no
/// XML 1.0 representation; SpreadsheetML stores them as `_xHHHH_`. A literal
/// `_xHHHH_` in the input gets its underscore written as `_x005F_` so readers
/// do not decode it.
fn push_escaped(out: &mut String, s: &str, attr: bool) {
    let bytes = s.as_bytes();
    let mut last = 0;

    for (pos, c) in s.char_indices() {
        let replacement: &str = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' if attr => "&quot;",
            '_' if is_escape_sequence(&bytes[pos..]) => "_x005F_",
            '\t' | '\n' | '\r' => continue,
            c if (c as u32) < 0x20 => {
                out.push_str(&s[last..pos]);
                out.push_str(&format!("_x{:04X}_", c as u32));
                last = pos + 1;
                continue;
            }
            _ => continue,
        };
        out.push_str(&s[last..pos]);
        out.push_str(replacement);
        last = pos + 1;
    }
    out.push_str(&s[last..]);
}

/// Check for `_xHHHH_` at the start of `bytes`
fn is_escape_sequence(bytes: &[u8]) -> bool {
    bytes.len() >= 7
        && bytes[1] == b'x'
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}

/// True when leading or trailing whitespace needs `xml:space="preserve"`
pub(crate) fn needs_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
}

/// Append a cell number in its shortest round-trip form
///
/// Whole numbers below 1e15 in magnitude are written as integers; everything
/// else uses the shortest representation that parses back to the same `f64`.
/// Callers reject NaN and infinities before a value reaches a cell.
pub(crate) fn push_number(out: &mut String, n: f64) {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        out.push_str(itoa::Buffer::new().format(n as i64));
    } else {
        out.push_str(ryu::Buffer::new().format(n));
    }
}

/// Append an XML boolean as `1` or `0`
pub(crate) fn push_bool(out: &mut String, b: bool) {
    out.push(if b { '1' } else { '0' });
}
