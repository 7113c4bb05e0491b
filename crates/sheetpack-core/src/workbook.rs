//! Workbook type

use crate::defined_name::{normalize_formula, split_scope, validate_name, DefinedName};
use crate::error::{Error, Result};
use crate::format::FormatTable;
use crate::handle::WorksheetMut;
use crate::properties::{CustomProperty, CustomValue, DocProperties};
use crate::spool::{FlushPolicy, RowSpool};
use crate::strings::StringTable;
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook under construction
///
/// Owns the worksheets together with the shared string table and format
/// table every sheet writes through.
#[derive(Debug)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
    strings: StringTable,
    formats: FormatTable,
    defined_names: Vec<DefinedName>,
    properties: DocProperties,
    custom_properties: Vec<CustomProperty>,
    settings: WorkbookSettings,
}

impl Workbook {
    /// Create an empty workbook
    ///
    /// A workbook saved without worksheets gets a blank "Sheet1".
    pub fn new() -> Self {
        Self::with_settings(WorkbookSettings::default())
    }

    pub fn with_settings(settings: WorkbookSettings) -> Self {
        Self {
            worksheets: Vec::new(),
            strings: StringTable::new(),
            formats: FormatTable::new(),
            defined_names: Vec::new(),
            properties: DocProperties::default(),
            custom_properties: Vec::new(),
            settings,
        }
    }

    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a write handle for a worksheet
    pub fn worksheet_mut(&mut self, index: usize) -> Result<WorksheetMut<'_>> {
        let count = self.worksheets.len();
        let sheet = self
            .worksheets
            .get_mut(index)
            .ok_or(Error::SheetOutOfBounds(index, count))?;
        Ok(WorksheetMut::new(
            sheet,
            &mut self.strings,
            &mut self.formats,
            self.settings.date_1904,
        ))
    }

    /// Find a worksheet by name, ignoring case like Excel does
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.sheet_index(name).map(|idx| &self.worksheets[idx])
    }

    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        let lower = name.to_lowercase();
        self.worksheets
            .iter()
            .position(|ws| ws.name().to_lowercase() == lower)
    }

    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    pub fn worksheets_mut(&mut self) -> impl Iterator<Item = &mut Worksheet> {
        self.worksheets.iter_mut()
    }

    /// Add a worksheet with a generated name ("Sheet1", "Sheet2", ...)
    pub fn add_worksheet(&mut self) -> Result<usize> {
        let name = self.generate_sheet_name();
        self.add_worksheet_with_name(&name)
    }

    /// Add a worksheet with the given name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;
        self.worksheets.push(Worksheet::new(name));
        Ok(self.worksheets.len() - 1)
    }

    /// Add a constant-memory worksheet whose rows are flushed to `spool`
    pub fn add_streaming_worksheet(
        &mut self,
        name: Option<&str>,
        policy: FlushPolicy,
        spool: Box<dyn RowSpool>,
    ) -> Result<usize> {
        let name = match name {
            Some(name) => name.to_string(),
            None => self.generate_sheet_name(),
        };
        self.validate_sheet_name(&name)?;
        self.worksheets
            .push(Worksheet::new_streaming(name, policy, spool));
        Ok(self.worksheets.len() - 1)
    }

    /// Index of the sheet shown when the file is opened
    pub fn active_sheet(&self) -> usize {
        self.settings.active_sheet
    }

    pub fn set_active_sheet(&mut self, index: usize) -> Result<()> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        self.settings.active_sheet = index;
        Ok(())
    }

    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    pub fn formats(&self) -> &FormatTable {
        &self.formats
    }

    /// Define a workbook name
    ///
    /// `Sheet1!Name` (or `'My Sheet'!Name`) scopes the name to that sheet.
    ///
    /// ```
    /// use sheetpack_core::Workbook;
    ///
    /// let mut wb = Workbook::new();
    /// wb.add_worksheet_with_name("Data").unwrap();
    /// wb.define_name("Rate", "=Data!$B$1").unwrap();
    /// wb.define_name("Data!Total", "=SUM(Data!$A:$A)").unwrap();
    /// ```
    pub fn define_name(&mut self, name: &str, formula: &str) -> Result<()> {
        let (sheet, local) = split_scope(name);
        validate_name(local)?;
        let formula = normalize_formula(formula)?;

        let scope = match sheet {
            Some(sheet) => Some(self.sheet_index(&sheet).ok_or_else(|| {
                Error::ParameterValidation(format!("unknown sheet '{}' in defined name", sheet))
            })?),
            None => None,
        };

        let lower = local.to_lowercase();
        if self
            .defined_names
            .iter()
            .any(|n| n.scope == scope && n.name.to_lowercase() == lower)
        {
            return Err(Error::ParameterValidation(format!(
                "defined name '{}' already exists",
                name
            )));
        }

        self.defined_names.push(DefinedName {
            name: local.to_string(),
            scope,
            formula,
        });
        Ok(())
    }

    /// Defined names sorted the way Excel lists them
    pub fn defined_names(&self) -> Vec<&DefinedName> {
        let mut names: Vec<&DefinedName> = self.defined_names.iter().collect();
        names.sort_by_key(|n| n.sort_key());
        names
    }

    pub fn properties(&self) -> &DocProperties {
        &self.properties
    }

    /// Replace the document properties
    pub fn set_properties(&mut self, properties: DocProperties) -> Result<()> {
        properties.validate()?;
        self.properties = properties;
        Ok(())
    }

    /// Add or replace a custom document property
    pub fn set_custom_property<V: Into<CustomValue>>(&mut self, name: &str, value: V) -> Result<()> {
        let property = CustomProperty::new(name, value.into())?;
        match self.custom_properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => *existing = property,
            None => self.custom_properties.push(property),
        }
        Ok(())
    }

    pub fn custom_properties(&self) -> &[CustomProperty] {
        &self.custom_properties
    }

    /// Validate a sheet name against Excel's rules
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::ParameterIsEmpty("sheet name"));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::SheetNameLengthExceeded(name.into()));
        }

        const INVALID_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];
        if name.contains(INVALID_CHARS) {
            return Err(Error::InvalidSheetNameCharacter(name.into()));
        }

        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(Error::SheetNameStartEndApostrophe(name.into()));
        }

        // Check for duplicate names (case-insensitive)
        if self.sheet_index(name).is_some() {
            return Err(Error::SheetNameAlreadyUsed(name.into()));
        }

        Ok(())
    }

    /// Generate a unique sheet name
    fn generate_sheet_name(&self) -> String {
        let mut n = self.worksheets.len() + 1;
        loop {
            let name = format!("Sheet{}", n);
            if self.sheet_index(&name).is_none() {
                return name;
            }
            n += 1;
        }
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

/// Workbook-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkbookSettings {
    /// Date system: false = 1900 (Windows), true = 1904 (Mac)
    pub date_1904: bool,
    /// Sheet shown when the file is opened
    pub active_sheet: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spool::MemorySpool;

    #[test]
    fn test_new_workbook() {
        let wb = Workbook::new();
        assert_eq!(wb.sheet_count(), 0);
        assert_eq!(wb.formats().len(), 1);
        assert!(wb.strings().is_empty());
    }

    #[test]
    fn test_add_worksheets() {
        let mut wb = Workbook::new();

        assert_eq!(wb.add_worksheet().unwrap(), 0);
        assert_eq!(wb.worksheet(0).unwrap().name(), "Sheet1");

        let idx = wb.add_worksheet_with_name("Data").unwrap();
        assert_eq!(idx, 1);
        assert_eq!(wb.worksheet(1).unwrap().name(), "Data");

        assert_eq!(wb.add_worksheet().unwrap(), 2);
        assert_eq!(wb.worksheet(2).unwrap().name(), "Sheet3");
    }

    #[test]
    fn test_duplicate_name() {
        let mut wb = Workbook::new();
        wb.add_worksheet_with_name("Sheet1").unwrap();

        // Case-insensitive duplicate check
        assert!(matches!(
            wb.add_worksheet_with_name("sheet1"),
            Err(Error::SheetNameAlreadyUsed(_))
        ));
        assert_eq!(wb.sheet_count(), 1);
    }

    #[test]
    fn test_lookup_by_name_ignores_case() {
        let mut wb = Workbook::new();
        wb.add_worksheet_with_name("Data").unwrap();
        wb.add_worksheet_with_name("Summary").unwrap();

        assert_eq!(wb.sheet_index("SUMMARY"), Some(1));
        assert_eq!(wb.worksheet_by_name("summary").unwrap().name(), "Summary");
        assert_eq!(wb.worksheet_by_name("data").unwrap().name(), "Data");
        assert!(wb.worksheet_by_name("Other").is_none());
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut wb = Workbook::new();

        assert!(matches!(
            wb.add_worksheet_with_name(""),
            Err(Error::ParameterIsEmpty(_))
        ));
        for name in ["Sheet/1", "Sheet:1", "Sheet[1]", "a*b", "a?b", "a\\b"] {
            assert!(matches!(
                wb.add_worksheet_with_name(name),
                Err(Error::InvalidSheetNameCharacter(_))
            ));
        }
        assert!(matches!(
            wb.add_worksheet_with_name("'quoted"),
            Err(Error::SheetNameStartEndApostrophe(_))
        ));
        assert!(wb.add_worksheet_with_name("it's fine").is_ok());

        let at_limit = "é".repeat(MAX_SHEET_NAME_LEN);
        assert!(wb.add_worksheet_with_name(&at_limit).is_ok());
        let long_name = "A".repeat(MAX_SHEET_NAME_LEN + 1);
        assert!(matches!(
            wb.add_worksheet_with_name(&long_name),
            Err(Error::SheetNameLengthExceeded(_))
        ));
    }

    #[test]
    fn test_streaming_worksheet() {
        let mut wb = Workbook::new();
        let idx = wb
            .add_streaming_worksheet(None, FlushPolicy::Explicit, Box::new(MemorySpool::new()))
            .unwrap();
        assert!(wb.worksheet(idx).unwrap().is_streaming());
        assert_eq!(wb.worksheet(idx).unwrap().name(), "Sheet1");
    }

    #[test]
    fn test_worksheet_mut_out_of_bounds() {
        let mut wb = Workbook::new();
        assert!(matches!(
            wb.worksheet_mut(0),
            Err(Error::SheetOutOfBounds(0, 0))
        ));
        assert!(wb.set_active_sheet(1).is_err());
    }

    #[test]
    fn test_defined_names() {
        let mut wb = Workbook::new();
        wb.add_worksheet_with_name("Data").unwrap();
        wb.add_worksheet_with_name("My Sheet").unwrap();

        wb.define_name("Rate", "=Data!$B$1").unwrap();
        wb.define_name("'My Sheet'!Rate", "'My Sheet'!$C$1").unwrap();
        wb.define_name("Alpha", "=1").unwrap();

        assert!(wb.define_name("rate", "=2").is_err());
        assert!(wb.define_name("Missing!Rate", "=2").is_err());
        assert!(wb.define_name("Empty", "=").is_err());

        let names: Vec<_> = wb
            .defined_names()
            .iter()
            .map(|n| (n.name.as_str(), n.scope, n.formula.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Alpha", None, "1"),
                ("Rate", None, "Data!$B$1"),
                ("Rate", Some(1), "'My Sheet'!$C$1"),
            ]
        );
    }

    #[test]
    fn test_custom_properties_replace() {
        let mut wb = Workbook::new();
        wb.set_custom_property("Checked by", "Eve").unwrap();
        wb.set_custom_property("Checked by", "Mallory").unwrap();
        wb.set_custom_property("Document number", 12345).unwrap();

        assert_eq!(wb.custom_properties().len(), 2);
        assert_eq!(
            wb.custom_properties()[0].value,
            CustomValue::String("Mallory".into())
        );
    }
}
