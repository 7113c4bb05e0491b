//! Worksheet parts (`xl/worksheets/sheetN.xml`)
//!
//! Rows are rendered one at a time with [`render_row`], which is shared with
//! the temp-file spool of constant-memory worksheets so that spooled rows are
//! byte-identical to rows rendered at save time. The rest of the part is
//! streamed section by section in schema order.

use std::io::Write;

use sheetpack_core::cell::{push_cell_ref, push_range_ref};
use sheetpack_core::{
    Cell, CellValue, ColumnOptions, FormatIndex, FormulaResult, HyperlinkTarget, Row, Worksheet,
};

use crate::error::{XlsxError, XlsxResult};
use crate::xml::{
    needs_preserve, push_attr_pair, push_bool, push_int_attr, push_number, push_text, NS_MAIN,
    NS_RELATIONSHIPS, XML_DECLARATION,
};

/// Buffered output is handed to the writer once it grows past this
const FLUSH_AT: usize = 64 * 1024;

/// Column width Excel uses when none is set
const DEFAULT_COL_WIDTH: f64 = 8.43;

/// External hyperlinks of `sheet` as `(relationship id, target)` pairs
///
/// Ids are assigned in the same row-major order [`write`] uses for the
/// `r:id` attributes.
pub(crate) fn hyperlink_relationships(sheet: &Worksheet) -> Vec<(String, String)> {
    sheet
        .hyperlinks()
        .filter_map(|(_, link)| match &link.target {
            HyperlinkTarget::External { url, .. } => Some(url.clone()),
            HyperlinkTarget::Internal { .. } => None,
        })
        .enumerate()
        .map(|(i, url)| (format!("rId{}", i + 1), url))
        .collect()
}

/// Stream the worksheet part for `sheet` to `out`
///
/// Rows already spooled by a constant-memory worksheet are copied first,
/// followed by the rows still buffered in memory.
pub(crate) fn write(out: &mut dyn Write, sheet: &mut Worksheet, tab_selected: bool) -> XlsxResult<()> {
    let mut buf = String::with_capacity(FLUSH_AT + 4096);
    buf.push_str(XML_DECLARATION);
    buf.push_str("<worksheet xmlns=\"");
    buf.push_str(NS_MAIN);
    buf.push_str("\" xmlns:r=\"");
    buf.push_str(NS_RELATIONSHIPS);
    buf.push_str("\">");

    buf.push_str("<dimension ref=\"");
    match sheet.dimension() {
        Some(dim) => push_range_ref(&mut buf, &dim.to_range()),
        None => buf.push_str("A1"),
    }
    buf.push_str("\"/>");

    buf.push_str("<sheetViews><sheetView");
    if tab_selected || sheet.is_selected() {
        buf.push_str(" tabSelected=\"1\"");
    }
    buf.push_str(" workbookViewId=\"0\"/></sheetViews>");
    buf.push_str("<sheetFormatPr defaultRowHeight=\"15\"/>");

    write_cols(&mut buf, sheet.columns().iter().map(|(&c, o)| (c, o)));

    buf.push_str("<sheetData>");
    out.write_all(buf.as_bytes())?;
    buf.clear();

    if let Some(spool) = sheet.spool_mut() {
        let copied = spool.copy_to(out)?;
        log::debug!("Copied {} spooled bytes into sheet part", copied);
    }

    for (index, row) in sheet.buffered_rows() {
        render_row(&mut buf, index, row);
        if buf.len() >= FLUSH_AT {
            out.write_all(buf.as_bytes())?;
            buf.clear();
        }
    }
    buf.push_str("</sheetData>");

    let merged = sheet.merged_ranges();
    if !merged.is_empty() {
        buf.push_str("<mergeCells");
        push_int_attr(&mut buf, "count", merged.len());
        buf.push('>');
        for range in merged {
            buf.push_str("<mergeCell ref=\"");
            push_range_ref(&mut buf, range);
            buf.push_str("\"/>");
        }
        buf.push_str("</mergeCells>");
    }

    write_hyperlinks(&mut buf, sheet)?;

    buf.push_str(
        "<pageMargins left=\"0.7\" right=\"0.7\" top=\"0.75\" bottom=\"0.75\" \
         header=\"0.3\" footer=\"0.3\"/>",
    );
    buf.push_str("</worksheet>");
    out.write_all(buf.as_bytes())?;
    Ok(())
}

/// Append one `<row>` element
pub fn render_row(out: &mut String, index: u32, row: &Row) {
    let options = row.options();
    out.push_str("<row");
    push_int_attr(out, "r", index + 1);
    if let Some((first, last)) = row.span() {
        out.push_str(" spans=\"");
        out.push_str(itoa::Buffer::new().format(first as u32 + 1));
        out.push(':');
        out.push_str(itoa::Buffer::new().format(last as u32 + 1));
        out.push('"');
    }
    if let Some(format) = non_default(options.format) {
        push_int_attr(out, "s", format.get());
        out.push_str(" customFormat=\"1\"");
    }
    if let Some(height) = options.height {
        out.push_str(" ht=\"");
        push_number(out, height);
        out.push_str("\" customHeight=\"1\"");
    }
    if options.hidden {
        out.push_str(" hidden=\"1\"");
    }

    if row.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for (col, cell) in row.cells() {
        render_cell(out, index, col, cell);
    }
    out.push_str("</row>");
}

fn non_default(format: Option<FormatIndex>) -> Option<FormatIndex> {
    format.filter(|f| *f != FormatIndex::DEFAULT)
}

fn open_cell(out: &mut String, row: u32, col: u16, cell: &Cell, cell_type: Option<&str>) {
    out.push_str("<c r=\"");
    push_cell_ref(out, row, col);
    out.push('"');
    if let Some(format) = non_default(cell.format) {
        push_int_attr(out, "s", format.get());
    }
    if let Some(t) = cell_type {
        push_attr_pair(out, "t", t);
    }
}

fn render_cell(out: &mut String, row: u32, col: u16, cell: &Cell) {
    match &cell.value {
        CellValue::Number(n) => {
            open_cell(out, row, col, cell, None);
            out.push_str("><v>");
            push_number(out, *n);
            out.push_str("</v></c>");
        }
        CellValue::SharedString(idx) => {
            open_cell(out, row, col, cell, Some("s"));
            out.push_str("><v>");
            out.push_str(itoa::Buffer::new().format(idx.get()));
            out.push_str("</v></c>");
        }
        CellValue::InlineString(s) => {
            open_cell(out, row, col, cell, Some("inlineStr"));
            if needs_preserve(s) {
                out.push_str("><is><t xml:space=\"preserve\">");
            } else {
                out.push_str("><is><t>");
            }
            push_text(out, s);
            out.push_str("</t></is></c>");
        }
        CellValue::Formula { text, result } => {
            open_cell(out, row, col, cell, result_type(result.as_ref()));
            out.push_str("><f>");
            push_text(out, text);
            out.push_str("</f>");
            push_result(out, result.as_ref());
            out.push_str("</c>");
        }
        CellValue::ArrayFormula {
            text,
            range,
            result,
        } => {
            open_cell(out, row, col, cell, result_type(result.as_ref()));
            out.push_str("><f t=\"array\" ref=\"");
            push_range_ref(out, range);
            out.push_str("\">");
            push_text(out, text);
            out.push_str("</f>");
            push_result(out, result.as_ref());
            out.push_str("</c>");
        }
        CellValue::Boolean(b) => {
            open_cell(out, row, col, cell, Some("b"));
            out.push_str(if *b { "><v>1</v></c>" } else { "><v>0</v></c>" });
        }
        CellValue::Error(e) => {
            open_cell(out, row, col, cell, Some("e"));
            out.push_str("><v>");
            out.push_str(e.as_str());
            out.push_str("</v></c>");
        }
        CellValue::Blank => {
            // a blank without a format carries nothing worth writing
            if non_default(cell.format).is_some() {
                open_cell(out, row, col, cell, None);
                out.push_str("/>");
            }
        }
    }
}

fn result_type(result: Option<&FormulaResult>) -> Option<&'static str> {
    match result {
        Some(FormulaResult::String(_)) => Some("str"),
        Some(FormulaResult::Boolean(_)) => Some("b"),
        Some(FormulaResult::Error(_)) => Some("e"),
        Some(FormulaResult::Number(_)) | None => None,
    }
}

/// `<v>` of a formula cell; formulas without a cached result show 0
fn push_result(out: &mut String, result: Option<&FormulaResult>) {
    out.push_str("<v>");
    match result {
        None => out.push('0'),
        Some(FormulaResult::Number(n)) => push_number(out, *n),
        Some(FormulaResult::String(s)) => push_text(out, s),
        Some(FormulaResult::Boolean(b)) => push_bool(out, *b),
        Some(FormulaResult::Error(e)) => out.push_str(e.as_str()),
    }
    out.push_str("</v>");
}

/// Character width as stored in `<col width>`, including Excel's cell padding
fn stored_width(width: f64) -> f64 {
    const DIGIT: f64 = 7.0;
    const PADDING: f64 = 5.0;
    if width <= 0.0 {
        0.0
    } else if width < 1.0 {
        ((width * (DIGIT + PADDING)).round() / DIGIT * 256.0).trunc() / 256.0
    } else {
        (((width * DIGIT).round() + PADDING) / DIGIT * 256.0).trunc() / 256.0
    }
}

/// `<cols>`, merging runs of adjacent columns with identical settings
fn write_cols<'a, I>(out: &mut String, columns: I)
where
    I: IntoIterator<Item = (u16, &'a ColumnOptions)>,
{
    let mut runs: Vec<(u16, u16, &ColumnOptions)> = Vec::new();
    for (col, options) in columns {
        match runs.last_mut() {
            Some((_, last, prev)) if *last + 1 == col && *prev == options => *last = col,
            _ => runs.push((col, col, options)),
        }
    }
    if runs.is_empty() {
        return;
    }

    out.push_str("<cols>");
    for (first, last, options) in runs {
        out.push_str("<col");
        push_int_attr(out, "min", first as u32 + 1);
        push_int_attr(out, "max", last as u32 + 1);
        out.push_str(" width=\"");
        push_number(out, stored_width(options.width.unwrap_or(DEFAULT_COL_WIDTH)));
        out.push('"');
        if let Some(format) = non_default(options.format) {
            push_int_attr(out, "style", format.get());
        }
        if options.hidden {
            out.push_str(" hidden=\"1\"");
        }
        if options.width.is_some() {
            out.push_str(" customWidth=\"1\"");
        }
        out.push_str("/>");
    }
    out.push_str("</cols>");
}

fn write_hyperlinks(out: &mut String, sheet: &Worksheet) -> XlsxResult<()> {
    if sheet.hyperlink_count() == 0 {
        return Ok(());
    }

    let mut rel_ids = hyperlink_relationships(sheet).into_iter();
    out.push_str("<hyperlinks>");
    for ((row, col), link) in sheet.hyperlinks() {
        out.push_str("<hyperlink ref=\"");
        push_cell_ref(out, row, col);
        out.push('"');
        match &link.target {
            HyperlinkTarget::External { location, .. } => {
                let (id, _) = rel_ids.next().ok_or_else(|| {
                    XlsxError::InvalidState("hyperlink relationship ids out of step".into())
                })?;
                push_attr_pair(out, "r:id", &id);
                if let Some(location) = location {
                    push_attr_pair(out, "location", location);
                }
            }
            HyperlinkTarget::Internal { location } => {
                push_attr_pair(out, "location", location);
            }
        }
        push_attr_pair(out, "display", &link.display);
        if let Some(tooltip) = &link.tooltip {
            push_attr_pair(out, "tooltip", tooltip);
        }
        out.push_str("/>");
    }
    out.push_str("</hyperlinks>");
    Ok(())
}
