//! Document and custom properties

use chrono::NaiveDateTime;

use crate::error::{check_len, Error, Result};

/// Standard document properties (`docProps/core.xml` and `docProps/app.xml`)
///
/// Every string is limited to 255 characters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocProperties {
    pub title: String,
    pub subject: String,
    pub author: String,
    pub manager: String,
    pub company: String,
    pub category: String,
    pub keywords: String,
    pub comments: String,
    pub status: String,
    pub hyperlink_base: String,
    /// Creation time in UTC; the save time is used when `None`
    pub created: Option<NaiveDateTime>,
}

impl DocProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    pub fn set_author<S: Into<String>>(mut self, author: S) -> Self {
        self.author = author.into();
        self
    }

    pub fn set_company<S: Into<String>>(mut self, company: S) -> Self {
        self.company = company.into();
        self
    }

    pub fn set_created(mut self, created: NaiveDateTime) -> Self {
        self.created = Some(created);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_len(&self.title, 255, "title")?;
        check_len(&self.subject, 255, "subject")?;
        check_len(&self.author, 255, "author")?;
        check_len(&self.manager, 255, "manager")?;
        check_len(&self.company, 255, "company")?;
        check_len(&self.category, 255, "category")?;
        check_len(&self.keywords, 255, "keywords")?;
        check_len(&self.comments, 255, "comments")?;
        check_len(&self.status, 255, "status")?;
        check_len(&self.hyperlink_base, 255, "hyperlink_base")?;
        Ok(())
    }
}

/// Value of a custom document property
#[derive(Debug, Clone, PartialEq)]
pub enum CustomValue {
    String(String),
    Number(f64),
    Integer(i32),
    Boolean(bool),
    DateTime(NaiveDateTime),
}

impl From<&str> for CustomValue {
    fn from(s: &str) -> Self {
        CustomValue::String(s.to_string())
    }
}

impl From<f64> for CustomValue {
    fn from(n: f64) -> Self {
        CustomValue::Number(n)
    }
}

impl From<i32> for CustomValue {
    fn from(n: i32) -> Self {
        CustomValue::Integer(n)
    }
}

impl From<bool> for CustomValue {
    fn from(b: bool) -> Self {
        CustomValue::Boolean(b)
    }
}

impl From<NaiveDateTime> for CustomValue {
    fn from(dt: NaiveDateTime) -> Self {
        CustomValue::DateTime(dt)
    }
}

/// A named custom property (`docProps/custom.xml`)
#[derive(Debug, Clone, PartialEq)]
pub struct CustomProperty {
    pub name: String,
    pub value: CustomValue,
}

impl CustomProperty {
    pub(crate) fn new(name: &str, value: CustomValue) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::ParameterIsEmpty("custom property name"));
        }
        check_len(name, 255, "custom property name")?;
        match &value {
            CustomValue::String(s) => check_len(s, 255, "custom property value")?,
            CustomValue::Number(n) if !n.is_finite() => {
                return Err(Error::ParameterValidation(format!(
                    "custom property '{}' is not a finite number",
                    name
                )))
            }
            _ => {}
        }
        Ok(Self {
            name: name.to_string(),
            value,
        })
    }
}
