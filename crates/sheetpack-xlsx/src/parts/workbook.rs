//! Workbook part (`xl/workbook.xml`)

use sheetpack_core::Workbook;

use crate::xml::{push_attr_pair, push_int_attr, push_text, NS_MAIN, NS_RELATIONSHIPS, XML_DECLARATION};

/// Relationship id of the `index`-th worksheet in the workbook rels part
pub(crate) fn sheet_rel_id(index: usize) -> String {
    format!("rId{}", index + 1)
}

/// Render the workbook part; worksheets are referenced by [`sheet_rel_id`]
pub(crate) fn render(workbook: &Workbook) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str("<workbook xmlns=\"");
    xml.push_str(NS_MAIN);
    xml.push_str("\" xmlns:r=\"");
    xml.push_str(NS_RELATIONSHIPS);
    xml.push_str("\">");

    xml.push_str(
        "<fileVersion appName=\"xl\" lastEdited=\"4\" lowestEdited=\"4\" rupBuild=\"4505\"/>",
    );
    if workbook.settings().date_1904 {
        xml.push_str("<workbookPr date1904=\"1\" defaultThemeVersion=\"124226\"/>");
    } else {
        xml.push_str("<workbookPr defaultThemeVersion=\"124226\"/>");
    }

    xml.push_str(
        "<bookViews><workbookView xWindow=\"240\" yWindow=\"15\" windowWidth=\"16095\" \
         windowHeight=\"9660\"",
    );
    let active = workbook.active_sheet();
    if active > 0 {
        push_int_attr(&mut xml, "activeTab", active);
        push_int_attr(&mut xml, "firstSheet", active);
    }
    xml.push_str("/></bookViews>");

    xml.push_str("<sheets>");
    for (i, sheet) in workbook.worksheets().enumerate() {
        xml.push_str("<sheet");
        push_attr_pair(&mut xml, "name", sheet.name());
        push_int_attr(&mut xml, "sheetId", i + 1);
        if sheet.is_hidden() {
            xml.push_str(" state=\"hidden\"");
        }
        push_attr_pair(&mut xml, "r:id", &sheet_rel_id(i));
        xml.push_str("/>");
    }
    xml.push_str("</sheets>");

    let names = workbook.defined_names();
    if !names.is_empty() {
        xml.push_str("<definedNames>");
        for name in names {
            xml.push_str("<definedName");
            push_attr_pair(&mut xml, "name", &name.name);
            if let Some(scope) = name.scope {
                push_int_attr(&mut xml, "localSheetId", scope);
            }
            xml.push('>');
            push_text(&mut xml, &name.formula);
            xml.push_str("</definedName>");
        }
        xml.push_str("</definedNames>");
    }

    xml.push_str("<calcPr calcId=\"124519\" fullCalcOnLoad=\"1\"/>");
    xml.push_str("</workbook>");
    xml
}
