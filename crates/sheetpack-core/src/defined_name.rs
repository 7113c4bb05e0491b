//! Workbook defined names

use crate::cell::{strip_formula_prefix, CellAddress};
use crate::error::{check_len, Error, Result};

/// A defined name, global or scoped to one worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinedName {
    pub name: String,
    /// Index of the owning sheet for local names
    pub scope: Option<usize>,
    /// Formula the name refers to, without a leading `=`
    pub formula: String,
}

impl DefinedName {
    /// Case-insensitive sort key; Excel lists names alphabetically
    pub fn sort_key(&self) -> (String, usize) {
        let name = self
            .name
            .strip_prefix("_xlnm.")
            .unwrap_or(&self.name)
            .to_lowercase();
        (name, self.scope.map_or(0, |s| s + 1))
    }
}

/// Split `Sheet1!Name` / `'My Sheet'!Name` into sheet and name parts
pub(crate) fn split_scope(name: &str) -> (Option<String>, &str) {
    match name.rsplit_once('!') {
        Some((sheet, local)) => {
            let sheet = sheet
                .strip_prefix('\'')
                .and_then(|s| s.strip_suffix('\''))
                .map(|s| s.replace("''", "'"))
                .unwrap_or_else(|| sheet.to_string());
            (Some(sheet), local)
        }
        None => (None, name),
    }
}

/// Validate the name part of a defined name
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::ParameterIsEmpty("defined name"));
    }
    check_len(name, 255, "defined name")?;

    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .map_or(false, |c| c.is_alphabetic() || c == '_' || c == '\\');
    let rest_ok = chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '\\'));
    if !first_ok || !rest_ok {
        return Err(Error::ParameterValidation(format!(
            "invalid characters in defined name '{}'",
            name
        )));
    }

    if CellAddress::parse(name).is_ok() || looks_like_r1c1(name) {
        return Err(Error::ParameterValidation(format!(
            "defined name '{}' looks like a cell reference",
            name
        )));
    }
    Ok(())
}

pub(crate) fn normalize_formula(formula: &str) -> Result<String> {
    let formula = strip_formula_prefix(formula.trim());
    if formula.is_empty() {
        return Err(Error::ParameterIsEmpty("defined name formula"));
    }
    Ok(formula.to_string())
}

fn looks_like_r1c1(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    let Some(rest) = upper.strip_prefix('R') else {
        return false;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    match rest.strip_prefix('C') {
        Some(cols) => cols.chars().all(|c| c.is_ascii_digit()),
        None => rest.is_empty(),
    }
}
