//! One patient encounter as read from the line-delimited input.

use serde_json::{Map, Value};

use crate::error::{CagError, Result};
use crate::review::NOT_AVAILABLE;

/// An input record: patient demographics plus the raw review payload.
///
/// `review` is kept exactly as supplied (normally a JSON string, possibly
/// wrapped in markdown code fences); parsing happens per encounter during
/// derivation so a malformed payload never affects other records.
#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    /// 1-based input line, used in diagnostics.
    pub line: usize,
    pub patient_number: String,
    pub sex: String,
    pub age: String,
    pub date_of_angiography: String,
    pub review: Option<Value>,
}

impl Encounter {
    /// Builds an encounter from one decoded input object.
    ///
    /// # Errors
    ///
    /// Returns [`CagError::MissingRequiredField`] when the `patient_number`
    /// or `date_of_angiography` key is absent. A `null` value renders as
    /// `"N/A"` like any other empty cell.
    pub fn from_object(line: usize, object: &Map<String, Value>) -> Result<Self> {
        let required = |field: &'static str| {
            object
                .get(field)
                .map(cell_text)
                .ok_or(CagError::MissingRequiredField { line, field })
        };
        let optional = |field: &str| {
            object
                .get(field)
                .map_or_else(|| NOT_AVAILABLE.to_string(), cell_text)
        };
        Ok(Self {
            line,
            patient_number: required("patient_number")?,
            sex: optional("sex"),
            age: optional("age"),
            date_of_angiography: required("date_of_angiography")?,
            review: object.get("review").cloned(),
        })
    }
}

/// Text form of a scalar cell; `null` is `"N/A"`.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => NOT_AVAILABLE.to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
