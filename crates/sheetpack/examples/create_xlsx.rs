//! Example: Create an xlsx file with formats, formulas and a streamed sheet

use sheetpack::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    workbook.set_properties(DocProperties::new().set_title("Example").set_author("sheetpack"))?;

    let header = Format::new()
        .bold()
        .fill_color(Color::rgb(0xDD, 0xEB, 0xF7))
        .border_bottom(BorderLineStyle::Thin, Color::Auto);
    let money = Format::new().number_format("#,##0.00");

    let idx = workbook.add_worksheet_with_name("Summary")?;
    {
        let mut sheet = workbook.worksheet_mut(idx)?;
        sheet.set_column(0, 0, Some(20.0), None)?;

        // Add header row
        sheet.write_string(0, 0, "Name", Some(&header))?;
        sheet.write_string(0, 1, "Value", Some(&header))?;
        sheet.write_string(0, 2, "Double", Some(&header))?;

        // Add data rows
        for (i, (name, value)) in [("Item 1", 100.0), ("Item 2", 200.0)].iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, name, None)?;
            sheet.write_number(row, 1, *value, Some(&money))?;
            sheet.write_formula(row, 2, &format!("=B{}*2", row + 1), Some(&money))?;
        }

        // Add total row
        sheet.write_string(3, 0, "Total", Some(&Format::new().bold()))?;
        sheet.write_formula_with_result(3, 1, "=SUM(B2:B3)", 300.0, Some(&money))?;
        sheet.write_datetime(5, 0, &ExcelDateTime::from_ymd(2024, 1, 31)?, None)?;
        sheet.write_url(6, 0, "https://github.com", None)?;
    }

    // A large sheet that never holds more than one row in memory
    let log = workbook.add_constant_memory_worksheet(Some("Log"), StreamingPolicy::on_new_row())?;
    {
        let mut sheet = workbook.worksheet_mut(log)?;
        for row in 0..10_000u32 {
            sheet.write_number(row, 0, row as f64, None)?;
            sheet.write_string(row, 1, "entry", None)?;
        }
    }

    // Save the file
    workbook.save("/tmp/sheetpack-example.xlsx")?;
    println!("Created /tmp/sheetpack-example.xlsx");

    Ok(())
}
