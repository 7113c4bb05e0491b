//! ZIP packaging of generated parts
//!
//! The [`Packager`] owns the archive writer and the manifest of everything
//! written so far. Parts stream straight into archive entries; the
//! content-types part and every relationships part are derived from the
//! manifest and written by [`Packager::finalize`].

use std::collections::HashSet;
use std::io::{self, BufWriter, Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{XlsxError, XlsxResult};
use crate::parts::content_types;
use crate::parts::relationships::{self, RelationshipEntry};

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Archive settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackagerOptions {
    /// Deflate level 0-9, the zip library default when `None`
    pub compression_level: Option<i64>,
    /// Write zip64 headers for every entry (needed past 4 GiB)
    pub zip64: bool,
}

impl PackagerOptions {
    pub fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = Some(level);
        self
    }

    pub fn with_zip64(mut self, zip64: bool) -> Self {
        self.zip64 = zip64;
        self
    }
}

/// Lifecycle of a [`Packager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackagerState {
    /// Archive opened, nothing written yet
    Opened,
    /// At least one part written
    PartsWritten,
    /// Content types and relationships written, archive closed
    Finalized,
    /// An archive error occurred; the archive handle is gone
    Failed,
}

/// Relationship from `source` to the part being added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartRelationship {
    /// Part owning the relationship, `""` for the package root
    pub source: String,
    pub id: String,
    pub rel_type: &'static str,
}

impl PartRelationship {
    pub fn new<S: Into<String>, I: Into<String>>(source: S, id: I, rel_type: &'static str) -> Self {
        Self {
            source: source.into(),
            id: id.into(),
            rel_type,
        }
    }
}

#[derive(Debug)]
struct ManifestEntry {
    name: String,
    content_type: String,
}

/// Writes parts into a ZIP archive and wires up their relationships
pub struct Packager<W: Write + Seek> {
    zip: Option<ZipWriter<W>>,
    state: PackagerState,
    file_options: SimpleFileOptions,
    manifest: Vec<ManifestEntry>,
    /// `(source part, entry)` in insertion order
    relationships: Vec<(String, RelationshipEntry)>,
    /// `(source part, id)` pairs already taken
    relationship_ids: HashSet<(String, String)>,
}

impl<W: Write + Seek> Packager<W> {
    /// Open an archive on `writer`
    pub fn new(writer: W, options: PackagerOptions) -> XlsxResult<Self> {
        if let Some(level) = options.compression_level {
            if !(0..=9).contains(&level) {
                return Err(XlsxError::ZipParameter(format!(
                    "compression level {} outside 0..=9",
                    level
                )));
            }
        }

        let file_options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(options.compression_level)
            .large_file(options.zip64)
            .last_modified_time(zip::DateTime::default());

        Ok(Self {
            zip: Some(ZipWriter::new(writer)),
            state: PackagerState::Opened,
            file_options,
            manifest: Vec::new(),
            relationships: Vec::new(),
            relationship_ids: HashSet::new(),
        })
    }

    pub fn state(&self) -> PackagerState {
        self.state
    }

    /// Names of the parts written so far, in order
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.manifest.iter().map(|e| e.name.as_str())
    }

    /// Add a part from a complete buffer
    pub fn add_part(
        &mut self,
        name: &str,
        content_type: &str,
        relationship: Option<PartRelationship>,
        bytes: &[u8],
    ) -> XlsxResult<()> {
        self.add_part_with(name, content_type, relationship, |w| {
            w.write_all(bytes)?;
            Ok(())
        })
        .map(|_| ())
    }

    /// Add a part whose body is streamed by `write`
    ///
    /// Returns the number of uncompressed bytes written.
    pub fn add_part_with<F>(
        &mut self,
        name: &str,
        content_type: &str,
        relationship: Option<PartRelationship>,
        write: F,
    ) -> XlsxResult<u64>
    where
        F: FnOnce(&mut dyn Write) -> XlsxResult<()>,
    {
        self.check_open()?;
        if name.is_empty() || name.starts_with('/') || name == CONTENT_TYPES_PART {
            return Err(XlsxError::ZipParameter(format!("invalid part name '{}'", name)));
        }
        if self.manifest.iter().any(|e| e.name == name) {
            return Err(XlsxError::InvalidState(format!("part '{}' already written", name)));
        }
        if let Some(rel) = &relationship {
            self.check_relationship_id(&rel.source, &rel.id)?;
        }

        let written = self.write_entry(name, write)?;
        log::debug!("Wrote part {} ({} bytes)", name, written);

        if let Some(rel) = relationship {
            let target = relationships::relative_target(&rel.source, name);
            self.push_relationship(
                rel.source,
                RelationshipEntry {
                    id: rel.id,
                    rel_type: rel.rel_type.to_string(),
                    target,
                    external: false,
                },
            );
        }
        self.manifest.push(ManifestEntry {
            name: name.to_string(),
            content_type: content_type.to_string(),
        });
        self.state = PackagerState::PartsWritten;
        Ok(written)
    }

    /// Record a relationship from `source` to a target outside the package
    pub fn add_external_relationship(
        &mut self,
        source: &str,
        id: &str,
        rel_type: &'static str,
        target: &str,
    ) -> XlsxResult<()> {
        self.check_open()?;
        self.check_relationship_id(source, id)?;
        self.push_relationship(
            source.to_string(),
            RelationshipEntry {
                id: id.to_string(),
                rel_type: rel_type.to_string(),
                target: target.to_string(),
                external: true,
            },
        );
        Ok(())
    }

    /// Write content types and relationships, close the archive and hand
    /// back the underlying writer
    pub fn finalize(&mut self) -> XlsxResult<W> {
        self.check_open()?;

        let content_types = content_types::render(
            self.manifest
                .iter()
                .map(|e| (e.name.as_str(), e.content_type.as_str())),
        );
        self.write_entry(CONTENT_TYPES_PART, |w| {
            w.write_all(content_types.as_bytes())?;
            Ok(())
        })?;

        let mut sources: Vec<&str> = Vec::new();
        for (source, _) in &self.relationships {
            if !sources.contains(&source.as_str()) {
                sources.push(source);
            }
        }
        let rels_parts: Vec<(String, String)> = sources
            .iter()
            .map(|source| {
                let entries: Vec<RelationshipEntry> = self
                    .relationships
                    .iter()
                    .filter(|(s, _)| s == source)
                    .map(|(_, e)| e.clone())
                    .collect();
                (
                    relationships::rels_part_name(source),
                    relationships::render(&entries),
                )
            })
            .collect();
        for (name, xml) in &rels_parts {
            self.write_entry(name, |w| {
                w.write_all(xml.as_bytes())?;
                Ok(())
            })?;
        }

        let zip = self
            .zip
            .take()
            .ok_or_else(|| XlsxError::InvalidState("archive already closed".into()))?;
        match zip.finish() {
            Ok(writer) => {
                self.state = PackagerState::Finalized;
                log::debug!(
                    "Finalized archive with {} parts and {} relationship parts",
                    self.manifest.len(),
                    rels_parts.len()
                );
                Ok(writer)
            }
            Err(e) => {
                self.state = PackagerState::Failed;
                Err(e.into())
            }
        }
    }

    fn check_open(&self) -> XlsxResult<()> {
        match self.state {
            PackagerState::Opened | PackagerState::PartsWritten => Ok(()),
            PackagerState::Finalized => Err(XlsxError::InvalidState(
                "archive has already been finalized".into(),
            )),
            PackagerState::Failed => Err(XlsxError::InvalidState(
                "archive is unusable after an earlier error".into(),
            )),
        }
    }

    fn check_relationship_id(&self, source: &str, id: &str) -> XlsxResult<()> {
        if self
            .relationship_ids
            .contains(&(source.to_string(), id.to_string()))
        {
            return Err(XlsxError::InvalidState(format!(
                "relationship id '{}' already used by '{}'",
                id, source
            )));
        }
        Ok(())
    }

    fn push_relationship(&mut self, source: String, entry: RelationshipEntry) {
        self.relationship_ids
            .insert((source.clone(), entry.id.clone()));
        self.relationships.push((source, entry));
    }

    /// Write one archive entry; any failure moves the packager to `Failed`
    fn write_entry<F>(&mut self, name: &str, write: F) -> XlsxResult<u64>
    where
        F: FnOnce(&mut dyn Write) -> XlsxResult<()>,
    {
        let zip = self
            .zip
            .as_mut()
            .ok_or_else(|| XlsxError::InvalidState("archive already closed".into()))?;

        let result = (|| -> XlsxResult<u64> {
            zip.start_file(name, self.file_options)?;
            let mut out = CountingWriter::new(BufWriter::with_capacity(64 * 1024, &mut *zip));
            write(&mut out)?;
            out.flush()?;
            Ok(out.count)
        })();

        if result.is_err() {
            self.state = PackagerState::Failed;
            if let Some(mut zip) = self.zip.take() {
                let _ = zip.abort_file();
            }
        }
        result
    }
}

/// Counts bytes on their way to the inner writer
struct CountingWriter<W: Write> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
