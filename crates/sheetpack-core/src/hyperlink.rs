//! Worksheet hyperlinks

use crate::error::{check_len, Error, Result};
use crate::MAX_URL_LEN;

const URL_SCHEMES: &[&str] = &["http://", "https://", "ftp://", "ftps://", "mailto:"];

/// Where a hyperlink points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HyperlinkTarget {
    /// Target outside the workbook, wired through an external relationship
    External {
        url: String,
        /// Fragment after `#`, written as the `location` attribute
        location: Option<String>,
    },
    /// Location inside the workbook, e.g. `Sheet2!A1`
    Internal { location: String },
}

/// A hyperlink attached to a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    pub target: HyperlinkTarget,
    /// Text shown in the cell
    pub display: String,
    pub tooltip: Option<String>,
}

impl Hyperlink {
    /// Parse a url in one of the accepted forms
    ///
    /// - `http://`, `https://`, `ftp://`, `ftps://`, `mailto:` urls
    /// - `internal:Sheet2!A1` for locations in the workbook
    /// - `external:c:\path\file.xlsx` for local files
    pub fn parse(url: &str) -> Result<Self> {
        if url.is_empty() {
            return Err(Error::ParameterIsEmpty("url"));
        }
        if url.chars().count() > MAX_URL_LEN {
            return Err(Error::MaxUrlLengthExceeded);
        }

        if let Some(location) = url.strip_prefix("internal:") {
            if location.is_empty() {
                return Err(Error::ParameterIsEmpty("url"));
            }
            return Ok(Self {
                target: HyperlinkTarget::Internal {
                    location: location.to_string(),
                },
                display: location.to_string(),
                tooltip: None,
            });
        }

        let (target, display) = if let Some(path) = url.strip_prefix("external:") {
            (file_url(path), path.to_string())
        } else if URL_SCHEMES.iter().any(|s| url.starts_with(s)) {
            (url.to_string(), url.to_string())
        } else {
            return Err(Error::ParameterValidation(format!(
                "unsupported url scheme in '{}'",
                url
            )));
        };

        let (url, location) = match target.split_once('#') {
            Some((u, l)) => (u.to_string(), Some(l.to_string())),
            None => (target, None),
        };

        Ok(Self {
            target: HyperlinkTarget::External { url, location },
            display,
            tooltip: None,
        })
    }

    /// Set the text shown in the cell
    ///
    /// An empty string keeps the url as display text.
    pub fn with_display(mut self, display: &str) -> Self {
        if display.is_empty() {
            log::warn!("Ignoring empty display string for hyperlink '{}'", self.display);
        } else {
            self.display = display.to_string();
        }
        self
    }

    /// Set the tooltip (at most 255 characters)
    pub fn with_tooltip(mut self, tooltip: &str) -> Result<Self> {
        check_len(tooltip, 255, "tooltip")?;
        self.tooltip = Some(tooltip.to_string());
        Ok(self)
    }

    pub fn is_external(&self) -> bool {
        matches!(self.target, HyperlinkTarget::External { .. })
    }
}

/// Local paths become `file:///` urls when absolute, and stay relative otherwise.
fn file_url(path: &str) -> String {
    let absolute = path.starts_with('/')
        || path.starts_with("\\\\")
        || path.as_bytes().get(1) == Some(&b':');

    if path.starts_with("\\\\") {
        format!("file:///{}", path.replace('\\', "/").trim_start_matches('/'))
    } else if absolute {
        format!("file:///{}", path.trim_start_matches('/'))
    } else {
        path.to_string()
    }
}
