//! Shared strings part (`xl/sharedStrings.xml`)

use std::io::{self, Write};

use sheetpack_core::StringTable;

use crate::xml::{needs_preserve, push_int_attr, push_text, NS_MAIN, XML_DECLARATION};

const FLUSH_AT: usize = 64 * 1024;

/// Stream the string table to `out` in index order
pub(crate) fn write(out: &mut dyn Write, strings: &StringTable) -> io::Result<()> {
    let mut buf = String::with_capacity(FLUSH_AT + 1024);
    buf.push_str(XML_DECLARATION);
    buf.push_str("<sst xmlns=\"");
    buf.push_str(NS_MAIN);
    buf.push('"');
    push_int_attr(&mut buf, "count", strings.total_count());
    push_int_attr(&mut buf, "uniqueCount", strings.unique_count());
    buf.push('>');

    for s in strings.iter() {
        if needs_preserve(s) {
            buf.push_str("<si><t xml:space=\"preserve\">");
        } else {
            buf.push_str("<si><t>");
        }
        push_text(&mut buf, s);
        buf.push_str("</t></si>");

        if buf.len() >= FLUSH_AT {
            out.write_all(buf.as_bytes())?;
            buf.clear();
        }
    }

    buf.push_str("</sst>");
    out.write_all(buf.as_bytes())
}
