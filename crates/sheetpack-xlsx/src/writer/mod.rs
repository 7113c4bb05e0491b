//! XLSX writer
//!
//! Drives part generation for a [`Workbook`] and feeds every part through a
//! [`Packager`]. Part names and relationship ids are fixed:
//!
//! | part | relationship |
//! |---|---|
//! | `xl/workbook.xml` | package `rId1` |
//! | `docProps/core.xml` | package `rId2` |
//! | `docProps/app.xml` | package `rId3` |
//! | `docProps/custom.xml` | package `rId4`, only with custom properties |
//! | `xl/worksheets/sheetN.xml` | workbook `rIdN` |
//! | `xl/styles.xml` | workbook `rId{sheets + 1}` |
//! | `xl/sharedStrings.xml` | workbook `rId{sheets + 2}`, only with strings |

use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use sheetpack_core::Workbook;
use tempfile::NamedTempFile;

use crate::error::{XlsxError, XlsxResult};
use crate::packager::{PackagerOptions, PartRelationship, Packager};
use crate::parts::relationships::types;
use crate::parts::{content_types, doc_props, shared_strings, styles, workbook as workbook_part, worksheet};

const WORKBOOK_PART: &str = "xl/workbook.xml";

/// XLSX file writer
#[derive(Debug, Clone, Default)]
pub struct XlsxWriter {
    options: PackagerOptions,
}

impl XlsxWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: PackagerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PackagerOptions {
        &self.options
    }

    /// Write a workbook to a file path
    ///
    /// The archive is assembled in a temp file next to `path` and moved into
    /// place only once it is complete; on error nothing is left behind.
    pub fn write_file<P: AsRef<Path>>(&self, workbook: &mut Workbook, path: P) -> XlsxResult<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(XlsxError::CreatingFile)?;
        let buffered = self.write(workbook, BufWriter::new(tmp.as_file_mut()))?;
        buffered
            .into_inner()
            .map_err(|e| XlsxError::Write(e.into_error()))?;

        tmp.persist(path)
            .map_err(|e| XlsxError::CreatingFile(e.error))?;
        log::info!("Saved workbook to {}", path.display());
        Ok(())
    }

    /// Write a workbook into memory
    pub fn write_to_buffer(&self, workbook: &mut Workbook) -> XlsxResult<Vec<u8>> {
        self.write(workbook, Cursor::new(Vec::new()))
            .map(Cursor::into_inner)
    }

    /// Write a workbook to `writer`, handing the writer back once the
    /// archive is closed
    ///
    /// A workbook without worksheets gets a blank "Sheet1". Constant-memory
    /// worksheets are flushed completely before their parts are written.
    pub fn write<W: Write + Seek>(&self, workbook: &mut Workbook, writer: W) -> XlsxResult<W> {
        if workbook.is_empty() {
            workbook.add_worksheet()?;
            log::debug!("Added default worksheet to empty workbook");
        }
        for sheet in workbook.worksheets_mut() {
            sheet.flush_all()?;
        }

        let mut packager = Packager::new(writer, self.options)?;

        packager.add_part(
            WORKBOOK_PART,
            content_types::WORKBOOK,
            Some(PartRelationship::new("", "rId1", types::OFFICE_DOCUMENT)),
            workbook_part::render(workbook).as_bytes(),
        )?;

        let sheet_count = workbook.sheet_count();
        let active = workbook.active_sheet();
        for (i, sheet) in workbook.worksheets_mut().enumerate() {
            let name = format!("xl/worksheets/sheet{}.xml", i + 1);
            let bytes = packager.add_part_with(
                &name,
                content_types::WORKSHEET,
                Some(PartRelationship::new(
                    WORKBOOK_PART,
                    workbook_part::sheet_rel_id(i),
                    types::WORKSHEET,
                )),
                |w| worksheet::write(w, &mut *sheet, i == active),
            )?;
            log::debug!("Worksheet '{}' written as {} ({} bytes)", sheet.name(), name, bytes);

            for (id, url) in worksheet::hyperlink_relationships(sheet) {
                packager.add_external_relationship(&name, &id, types::HYPERLINK, &url)?;
            }
        }

        packager.add_part(
            "xl/styles.xml",
            content_types::STYLES,
            Some(PartRelationship::new(
                WORKBOOK_PART,
                format!("rId{}", sheet_count + 1),
                types::STYLES,
            )),
            styles::render(workbook.formats()).as_bytes(),
        )?;

        if !workbook.strings().is_empty() {
            let strings = workbook.strings();
            packager.add_part_with(
                "xl/sharedStrings.xml",
                content_types::SHARED_STRINGS,
                Some(PartRelationship::new(
                    WORKBOOK_PART,
                    format!("rId{}", sheet_count + 2),
                    types::SHARED_STRINGS,
                )),
                |w| Ok(shared_strings::write(w, strings)?),
            )?;
        }

        let now = chrono::Utc::now().naive_utc();
        packager.add_part(
            "docProps/core.xml",
            content_types::CORE_PROPERTIES,
            Some(PartRelationship::new("", "rId2", types::CORE_PROPERTIES)),
            doc_props::render_core(workbook.properties(), now).as_bytes(),
        )?;
        packager.add_part(
            "docProps/app.xml",
            content_types::EXTENDED_PROPERTIES,
            Some(PartRelationship::new("", "rId3", types::EXTENDED_PROPERTIES)),
            doc_props::render_app(workbook.properties(), workbook.worksheets().map(|s| s.name()))
                .as_bytes(),
        )?;
        if !workbook.custom_properties().is_empty() {
            packager.add_part(
                "docProps/custom.xml",
                content_types::CUSTOM_PROPERTIES,
                Some(PartRelationship::new("", "rId4", types::CUSTOM_PROPERTIES)),
                doc_props::render_custom(workbook.custom_properties()).as_bytes(),
            )?;
        }

        let writer = packager.finalize()?;
        log::debug!(
            "Wrote workbook with {} worksheets and {} shared strings",
            sheet_count,
            workbook.strings().unique_count()
        );
        Ok(writer)
    }
}
