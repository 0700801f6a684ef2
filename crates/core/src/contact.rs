//! Contact-form submissions: field limits, validation, the admin search
//! filter, and bulk-delete id parsing.

use serde::Deserialize;
use serde_json::Value;
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Field limits
// ---------------------------------------------------------------------------

pub const MAX_NAME_LENGTH: usize = 120;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_SUBJECT_LENGTH: usize = 180;
pub const MAX_SOURCE_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Body of `POST /api/contact/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub consent: bool,
    /// Page or campaign tag the form was submitted from.
    #[serde(default)]
    pub source: String,
}

impl ContactSubmission {
    /// Trim every text field and validate the result.
    pub fn clean(self) -> Result<Self, CoreError> {
        let cleaned = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            consent: self.consent,
            source: self.source.trim().to_string(),
        };

        validate_consent(cleaned.consent)?;
        validate_required("name", &cleaned.name)?;
        validate_length("name", &cleaned.name, MAX_NAME_LENGTH)?;
        validate_email(&cleaned.email)?;
        validate_length("subject", &cleaned.subject, MAX_SUBJECT_LENGTH)?;
        validate_required("message", &cleaned.message)?;
        validate_length("source", &cleaned.source, MAX_SOURCE_LENGTH)?;

        Ok(cleaned)
    }
}

/// Consent to being contacted back is mandatory.
pub fn validate_consent(consent: bool) -> Result<(), CoreError> {
    if consent {
        Ok(())
    } else {
        Err(CoreError::Validation("Consent is required.".into()))
    }
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    validate_required("email", email)?;
    validate_length("email", email, MAX_EMAIL_LENGTH)?;
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}

fn validate_length(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters (got {len})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Admin search filter
// ---------------------------------------------------------------------------

/// Free-text filter of the admin listing (`?q=`).
///
/// Matches when the needle is a case-insensitive substring of the name,
/// email or subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    needle: Option<String>,
}

impl MessageFilter {
    /// Build from the raw query value. Blank input means no filter.
    pub fn from_query(q: Option<&str>) -> Self {
        let needle = q.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        Self { needle }
    }

    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    pub fn matches(&self, name: &str, email: &str, subject: &str) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        let needle = needle.to_lowercase();
        [name, email, subject]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// `ILIKE` pattern for the needle, with `\`, `%` and `_` escaped.
    pub fn like_pattern(&self) -> Option<String> {
        self.needle.as_ref().map(|needle| {
            let mut pattern = String::with_capacity(needle.len() + 2);
            pattern.push('%');
            for c in needle.chars() {
                if matches!(c, '\\' | '%' | '_') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}

// ---------------------------------------------------------------------------
// Bulk delete
// ---------------------------------------------------------------------------

/// Parse the `ids` member of a bulk-delete body.
///
/// Accepts JSON integers, floats with no fractional part, and strings holding
/// integers. A missing `ids` member
/// is treated as an empty list.
pub fn parse_delete_ids(body: &Value) -> Result<Vec<DbId>, CoreError> {
    let raw = match body.get("ids") {
        None => return Err(CoreError::Validation("ids list is empty.".into())),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(CoreError::Validation("ids must be a list.".into())),
    };

    let ids = raw
        .iter()
        .map(|item| match item {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_number)),
            Value::String(s) => s.trim().parse::<DbId>().ok(),
            _ => None,
        })
        .collect::<Option<Vec<DbId>>>()
        .ok_or_else(|| CoreError::Validation("ids must be integers.".into()))?;

    if ids.is_empty() {
        return Err(CoreError::Validation("ids list is empty.".into()));
    }
    Ok(ids)
}

fn whole_number(value: f64) -> Option<DbId> {
    // `i64::MAX as f64` is 2^63.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then(|| value as DbId)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
