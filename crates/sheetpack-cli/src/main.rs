//! sheetpack CLI - converts CSV files into an xlsx workbook

use anyhow::{bail, Context, Result};
use clap::Parser;
use sheetpack::prelude::*;
use sheetpack::{MAX_COLS, MAX_SHEET_NAME_LEN};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sheetpack")]
#[command(author, version, about = "Convert CSV files into an Excel workbook")]
struct Cli {
    /// Input CSV files; each one becomes a worksheet
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output xlsx file
    #[arg(short, long)]
    output: PathBuf,

    /// Worksheet name, repeated in input order (default: the file stem)
    #[arg(short = 'n', long = "sheet-name")]
    sheet_names: Vec<String>,

    /// Field delimiter (default: comma)
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// Write the first record of each file as a bold header row
    #[arg(long)]
    header: bool,

    /// Keep every field as text instead of detecting numbers and booleans
    #[arg(long)]
    text: bool,

    /// Spool finished rows to a temp file instead of keeping sheets in memory
    #[arg(long)]
    constant_memory: bool,

    /// Directory for constant-memory temp files
    #[arg(long, requires = "constant_memory")]
    temp_dir: Option<PathBuf>,

    /// Deflate compression level
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=9))]
    compression_level: Option<i64>,

    /// Title stored in the document properties
    #[arg(long)]
    title: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    convert(&cli)
}

fn convert(cli: &Cli) -> Result<()> {
    if !cli.delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character");
    }
    if cli.sheet_names.len() > cli.inputs.len() {
        bail!(
            "{} sheet names given for {} input files",
            cli.sheet_names.len(),
            cli.inputs.len()
        );
    }

    let mut workbook = Workbook::new();
    if let Some(title) = &cli.title {
        workbook
            .set_properties(DocProperties::new().set_title(title.as_str()))
            .context("Invalid document title")?;
    }

    for (i, input) in cli.inputs.iter().enumerate() {
        let name = sheet_name(cli.sheet_names.get(i), input);
        let idx = if cli.constant_memory {
            let mut policy = StreamingPolicy::on_new_row();
            if let Some(dir) = &cli.temp_dir {
                policy = policy.with_temp_dir(dir);
            }
            workbook.add_constant_memory_worksheet(Some(&name), policy)
        } else {
            workbook.add_worksheet_with_name(&name)
        }
        .with_context(|| format!("Cannot add worksheet '{}'", name))?;

        let rows = write_csv(&mut workbook, idx, input, cli)?;
        eprintln!("{}: {} rows -> '{}'", input.display(), rows, name);
    }

    let mut options = PackagerOptions::default();
    if let Some(level) = cli.compression_level {
        options = options.with_compression_level(level);
    }
    XlsxWriter::with_options(options)
        .write_file(&mut workbook, &cli.output)
        .with_context(|| format!("Failed to write '{}'", cli.output.display()))?;

    eprintln!("Wrote {}", cli.output.display());
    Ok(())
}

/// Explicit name, or the file stem cut to Excel's 31 characters
fn sheet_name(explicit: Option<&String>, input: &Path) -> String {
    match explicit {
        Some(name) => name.clone(),
        None => input
            .file_stem()
            .map(|s| s.to_string_lossy().chars().take(MAX_SHEET_NAME_LEN).collect())
            .unwrap_or_default(),
    }
}

fn write_csv(workbook: &mut Workbook, idx: usize, input: &Path, cli: &Cli) -> Result<u32> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(cli.delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_path(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    let bold = Format::new().bold();
    let mut sheet = workbook.worksheet_mut(idx)?;
    let mut rows = 0u32;

    for record in reader.records() {
        let record = record.with_context(|| format!("Failed to read '{}'", input.display()))?;
        let row = rows;
        let header = cli.header && row == 0;

        for (col, field) in record.iter().enumerate() {
            let col = u16::try_from(col)
                .ok()
                .filter(|&c| c < MAX_COLS)
                .with_context(|| format!("Row {} has more than {} columns", row + 1, MAX_COLS))?;

            let field = if header || cli.text {
                Field::Text(field)
            } else {
                detect_type(field)
            };
            let format = header.then_some(&bold);
            match field {
                Field::Blank => Ok(()),
                Field::Number(n) => sheet.write_number(row, col, n, format),
                Field::Boolean(b) => sheet.write_boolean(row, col, b, format),
                Field::Text(s) if s.is_empty() => Ok(()),
                Field::Text(s) => sheet.write_string(row, col, s, format),
            }
            .with_context(|| {
                format!("{}: cannot write row {}, column {}", input.display(), row + 1, col + 1)
            })?;
        }
        rows += 1;
    }

    Ok(rows)
}

#[derive(Debug, PartialEq)]
enum Field<'a> {
    Blank,
    Number(f64),
    Boolean(bool),
    Text(&'a str),
}

/// Detect the type of a field value
fn detect_type(field: &str) -> Field<'_> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Field::Blank;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return Field::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Field::Boolean(false);
    }

    // "inf" and "NaN" parse as floats but are not cell numbers
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Field::Number(n),
        _ => Field::Text(field),
    }
}
