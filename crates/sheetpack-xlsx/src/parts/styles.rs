//! Styles part (`xl/styles.xml`)
//!
//! The format table has already split every registered format into fonts,
//! fills, borders and number formats, so rendering is a walk over its
//! component lists in index order.

use sheetpack_core::format::{
    Alignment, Border, BorderEdge, Color, DiagonalDirection, Fill, Font, FontVerticalAlign,
    FormatTable, Protection, StyleXfRecord, XfRecord,
};

use crate::xml::{push_attr_pair, push_int_attr, push_number, XML_DECLARATION, NS_MAIN};

/// Render the styles part for `formats`
pub(crate) fn render(formats: &FormatTable) -> String {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    xml.push_str("<styleSheet xmlns=\"");
    xml.push_str(NS_MAIN);
    xml.push_str("\">");

    let num_formats = formats.num_formats();
    if !num_formats.is_empty() {
        xml.push_str("<numFmts");
        push_int_attr(&mut xml, "count", num_formats.len());
        xml.push('>');
        for (id, code) in num_formats {
            xml.push_str("<numFmt");
            push_int_attr(&mut xml, "numFmtId", *id);
            push_attr_pair(&mut xml, "formatCode", code);
            xml.push_str("/>");
        }
        xml.push_str("</numFmts>");
    }

    xml.push_str("<fonts");
    push_int_attr(&mut xml, "count", formats.fonts().len());
    xml.push('>');
    for font in formats.fonts() {
        write_font(&mut xml, font);
    }
    xml.push_str("</fonts>");

    xml.push_str("<fills");
    push_int_attr(&mut xml, "count", formats.fills().len());
    xml.push('>');
    for fill in formats.fills() {
        write_fill(&mut xml, fill);
    }
    xml.push_str("</fills>");

    xml.push_str("<borders");
    push_int_attr(&mut xml, "count", formats.borders().len());
    xml.push('>');
    for border in formats.borders() {
        write_border(&mut xml, border);
    }
    xml.push_str("</borders>");

    let style_xfs = formats.cell_style_xfs();
    xml.push_str("<cellStyleXfs");
    push_int_attr(&mut xml, "count", style_xfs.len());
    xml.push('>');
    for (i, record) in style_xfs.iter().enumerate() {
        write_style_xf(&mut xml, record, i == 0);
    }
    xml.push_str("</cellStyleXfs>");

    xml.push_str("<cellXfs");
    push_int_attr(&mut xml, "count", formats.xf_records().len());
    xml.push('>');
    for record in formats.xf_records() {
        let parent = style_xfs
            .get(record.style_xf_id as usize)
            .copied()
            .unwrap_or_default();
        write_xf(&mut xml, record, &parent);
    }
    xml.push_str("</cellXfs>");

    let named = formats.named_styles();
    xml.push_str("<cellStyles");
    push_int_attr(&mut xml, "count", named.len());
    xml.push('>');
    for style in named {
        xml.push_str("<cellStyle");
        push_attr_pair(&mut xml, "name", style.name);
        push_int_attr(&mut xml, "xfId", style.style_xf_id);
        push_int_attr(&mut xml, "builtinId", style.builtin_id);
        xml.push_str("/>");
    }
    xml.push_str("</cellStyles>");

    xml.push_str("<dxfs count=\"0\"/>");
    xml.push_str(
        "<tableStyles count=\"0\" defaultTableStyle=\"TableStyleMedium9\" \
         defaultPivotStyle=\"PivotStyleLight16\"/>",
    );
    xml.push_str("</styleSheet>");
    xml
}

/// `<tag rgb|theme|indexed .../>`; automatic colors become system index 64
fn write_color(out: &mut String, tag: &str, color: &Color) {
    out.push('<');
    out.push_str(tag);
    match color {
        Color::Auto => push_int_attr(out, "indexed", 64u8),
        Color::Indexed(i) => push_int_attr(out, "indexed", *i),
        Color::Theme { index, .. } => {
            push_int_attr(out, "theme", *index);
            if let Some(tint) = color.tint_value() {
                out.push_str(" tint=\"");
                push_number(out, tint);
                out.push('"');
            }
        }
        Color::Rgb { .. } | Color::Argb { .. } => {
            if let Some(hex) = color.to_argb_hex() {
                push_attr_pair(out, "rgb", &hex);
            }
        }
    }
    out.push_str("/>");
}

fn write_font(out: &mut String, font: &Font) {
    out.push_str("<font>");
    if font.bold {
        out.push_str("<b/>");
    }
    if font.italic {
        out.push_str("<i/>");
    }
    if font.strikethrough {
        out.push_str("<strike/>");
    }
    if font.underline != sheetpack_core::Underline::None {
        out.push_str("<u");
        if let Some(val) = font.underline.xml_val() {
            push_attr_pair(out, "val", val);
        }
        out.push_str("/>");
    }
    match font.vertical_align {
        FontVerticalAlign::Baseline => {}
        FontVerticalAlign::Superscript => out.push_str("<vertAlign val=\"superscript\"/>"),
        FontVerticalAlign::Subscript => out.push_str("<vertAlign val=\"subscript\"/>"),
    }

    out.push_str("<sz val=\"");
    push_number(out, font.size);
    out.push_str("\"/>");

    if !font.color.is_auto() {
        write_color(out, "color", &font.color);
    }

    out.push_str("<name");
    push_attr_pair(out, "val", &font.name);
    out.push_str("/>");
    if font.family != 0 {
        out.push_str("<family");
        push_int_attr(out, "val", font.family);
        out.push_str("/>");
    }
    if let Some(scheme) = font.scheme.xml_val() {
        out.push_str("<scheme");
        push_attr_pair(out, "val", scheme);
        out.push_str("/>");
    }
    out.push_str("</font>");
}

fn write_fill(out: &mut String, fill: &Fill) {
    out.push_str("<fill><patternFill");
    match fill {
        Fill::None => out.push_str(" patternType=\"none\"/>"),
        Fill::Solid { color } => {
            out.push_str(" patternType=\"solid\">");
            write_color(out, "fgColor", color);
            out.push_str("<bgColor indexed=\"64\"/></patternFill>");
        }
        Fill::Pattern {
            pattern,
            foreground,
            background,
        } => {
            push_attr_pair(out, "patternType", pattern.as_str());
            if foreground.is_auto() && background.is_auto() {
                out.push_str("/>");
            } else {
                out.push('>');
                if !foreground.is_auto() {
                    write_color(out, "fgColor", foreground);
                }
                if !background.is_auto() {
                    write_color(out, "bgColor", background);
                }
                out.push_str("</patternFill>");
            }
        }
    }
    out.push_str("</fill>");
}

fn write_border_edge(out: &mut String, tag: &str, edge: Option<&BorderEdge>) {
    match edge {
        Some(e) if e.style != sheetpack_core::BorderLineStyle::None => {
            out.push('<');
            out.push_str(tag);
            push_attr_pair(out, "style", e.style.as_str());
            out.push('>');
            write_color(out, "color", &e.color);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        _ => {
            out.push('<');
            out.push_str(tag);
            out.push_str("/>");
        }
    }
}

fn write_border(out: &mut String, border: &Border) {
    out.push_str("<border");
    match border.diagonal_direction {
        DiagonalDirection::None => {}
        DiagonalDirection::Down => out.push_str(" diagonalDown=\"1\""),
        DiagonalDirection::Up => out.push_str(" diagonalUp=\"1\""),
        DiagonalDirection::Both => out.push_str(" diagonalUp=\"1\" diagonalDown=\"1\""),
    }
    out.push('>');
    write_border_edge(out, "left", border.left.as_ref());
    write_border_edge(out, "right", border.right.as_ref());
    write_border_edge(out, "top", border.top.as_ref());
    write_border_edge(out, "bottom", border.bottom.as_ref());
    write_border_edge(out, "diagonal", border.diagonal.as_ref());
    out.push_str("</border>");
}

fn write_alignment(out: &mut String, al: &Alignment) {
    out.push_str("<alignment");
    if let Some(h) = al.horizontal.xml_val() {
        push_attr_pair(out, "horizontal", h);
    }
    if let Some(v) = al.vertical.xml_val() {
        push_attr_pair(out, "vertical", v);
    }
    if al.text_rotation() != 0 {
        push_int_attr(out, "textRotation", al.text_rotation());
    }
    if al.wrap_text {
        out.push_str(" wrapText=\"1\"");
    }
    if al.indent != 0 {
        push_int_attr(out, "indent", al.indent);
    }
    if al.shrink_to_fit {
        out.push_str(" shrinkToFit=\"1\"");
    }
    out.push_str("/>");
}

fn write_protection(out: &mut String, p: &Protection) {
    out.push_str("<protection");
    if !p.locked {
        out.push_str(" locked=\"0\"");
    }
    if p.hidden {
        out.push_str(" hidden=\"1\"");
    }
    out.push_str("/>");
}

/// Named-style xf; every style after Normal switches its apply flags off
fn write_style_xf(out: &mut String, record: &StyleXfRecord, normal: bool) {
    out.push_str("<xf");
    push_int_attr(out, "numFmtId", record.num_fmt_id);
    push_int_attr(out, "fontId", record.font_id);
    push_int_attr(out, "fillId", record.fill_id);
    push_int_attr(out, "borderId", record.border_id);
    if !normal {
        out.push_str(
            " applyNumberFormat=\"0\" applyFill=\"0\" applyBorder=\"0\" \
             applyAlignment=\"0\" applyProtection=\"0\"",
        );
    }
    out.push_str("/>");
}

/// Cell xf; `apply*` flags mark components that differ from the parent style
fn write_xf(out: &mut String, record: &XfRecord, parent: &StyleXfRecord) {
    out.push_str("<xf");
    push_int_attr(out, "numFmtId", record.num_fmt_id);
    push_int_attr(out, "fontId", record.font_id);
    push_int_attr(out, "fillId", record.fill_id);
    push_int_attr(out, "borderId", record.border_id);
    push_int_attr(out, "xfId", record.style_xf_id);

    if record.num_fmt_id != parent.num_fmt_id {
        out.push_str(" applyNumberFormat=\"1\"");
    }
    if record.font_id != parent.font_id {
        out.push_str(" applyFont=\"1\"");
    }
    if record.fill_id != parent.fill_id {
        out.push_str(" applyFill=\"1\"");
    }
    if record.border_id != parent.border_id {
        out.push_str(" applyBorder=\"1\"");
    }
    let alignment = !record.alignment.is_default();
    let protection = !record.protection.is_default();
    if alignment {
        out.push_str(" applyAlignment=\"1\"");
    }
    if protection {
        out.push_str(" applyProtection=\"1\"");
    }

    if !alignment && !protection {
        out.push_str("/>");
        return;
    }
    out.push('>');
    if alignment {
        write_alignment(out, &record.alignment);
    }
    if protection {
        write_protection(out, &record.protection);
    }
    out.push_str("</xf>");
}
