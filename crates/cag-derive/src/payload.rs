//! Review payload parsing with empty-object fallback.

use cag_model::Review;
use serde_json::{Map, Value};

use crate::error::PayloadError;

/// A review payload ready for derivation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPayload {
    /// The parsed object as reported in the `review` column.
    pub object: Map<String, Value>,
    pub review: Review,
    /// An angiography section is present and non-empty.
    pub cag: bool,
    /// At least one intervention block is present.
    pub pci: bool,
}

impl ParsedPayload {
    fn from_review(object: Map<String, Value>, review: Review) -> Self {
        Self {
            cag: review.coronary_angiography.is_some(),
            pci: !review.pci_details.is_empty(),
            object,
            review,
        }
    }
}

/// Removes markdown code fence markers (```` ```json ```` and ```` ``` ````)
/// wherever they occur.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "")
}

/// Parses a raw review field.
///
/// Never fails: any problem yields the empty payload together with the
/// error that caused the fallback. A payload whose object parses but does
/// not decode keeps the object for reporting and derives from an empty
/// review.
pub fn parse_payload(raw: Option<&Value>) -> (ParsedPayload, Option<PayloadError>) {
    let object = match parse_object(raw) {
        Ok(object) => object,
        Err(err) => return (ParsedPayload::default(), Some(err)),
    };
    match Review::from_object(&object) {
        Ok(review) => (ParsedPayload::from_review(object, review), None),
        Err(err) => (
            ParsedPayload {
                object,
                ..ParsedPayload::default()
            },
            Some(PayloadError::Shape(err)),
        ),
    }
}

fn parse_object(raw: Option<&Value>) -> Result<Map<String, Value>, PayloadError> {
    match raw {
        None | Some(Value::Null) => Err(PayloadError::Missing),
        Some(Value::Object(object)) => Ok(object.clone()),
        Some(Value::String(text)) => {
            let parsed: Value =
                serde_json::from_str(&strip_code_fences(text)).map_err(PayloadError::Syntax)?;
            match parsed {
                Value::Object(object) => Ok(object),
                other => Err(PayloadError::NotAnObject {
                    found: value_kind(&other),
                }),
            }
        }
        Some(other) => Err(PayloadError::NotAnObject {
            found: value_kind(other),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
