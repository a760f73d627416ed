//! Nested angiography/PCI description embedded in each encounter.
//!
//! The payload is machine-extracted from free-text reports, so field shapes
//! drift between records. Decoding is permissive: lists may be `null`,
//! segment codes may be numbers or nested lists, and percentages or lengths
//! may arrive as strings. Only a structurally different object (for example
//! a list where an object is expected) fails to decode.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Decoded review payload for one encounter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Review {
    #[serde(deserialize_with = "lenient::optional")]
    pub coronary_angiography: Option<Angiography>,
    #[serde(deserialize_with = "lenient::list")]
    pub previous_stents_rearrange: Vec<StentRecord>,
    #[serde(deserialize_with = "lenient::list")]
    pub current_stents_rearrange: Vec<StentRecord>,
    #[serde(deserialize_with = "lenient::list")]
    pub pci_details: Vec<PciDetail>,
}

impl Review {
    /// Decodes a parsed payload object.
    pub fn from_object(object: &Map<String, Value>) -> serde_json::Result<Self> {
        Review::deserialize(Value::Object(object.clone()))
    }
}

/// Angiography section: lesions plus devices recorded at angiography level.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Angiography {
    #[serde(deserialize_with = "lenient::list")]
    pub lesions: Vec<Lesion>,
    #[serde(rename = "DEB_DCB", deserialize_with = "lenient::list")]
    pub deb_dcb: Vec<SegmentTarget>,
    #[serde(deserialize_with = "lenient::list")]
    pub thrombus_aspiration: Vec<SegmentTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Lesion {
    #[serde(rename = "segment_code", deserialize_with = "lenient::segment_codes")]
    pub segment_codes: Vec<String>,
    #[serde(
        rename = "luminal_narrowing_percentage",
        deserialize_with = "lenient::percentage"
    )]
    pub narrowing_percentage: Option<f64>,
    #[serde(rename = "lesion_characteristics", deserialize_with = "lenient::tags")]
    pub characteristics: Vec<String>,
}

/// Balloon (DEB/DCB) or thrombus-aspiration record; only the segments matter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SegmentTarget {
    #[serde(rename = "segment_code", deserialize_with = "lenient::segment_codes")]
    pub segment_codes: Vec<String>,
}

/// One stent as reported. Values are kept as written so display rows
/// round-trip; [`StentRecord::length`] and [`StentRecord::segment_codes`]
/// give the normalized forms.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StentRecord {
    pub device: Option<Value>,
    pub diameter_mm: Option<Value>,
    pub length_mm: Option<Value>,
    pub segment_code: Option<Value>,
}

impl StentRecord {
    pub fn length(&self) -> Measure {
        self.length_mm
            .as_ref()
            .map_or(Measure::Missing, Measure::from_value)
    }

    pub fn segment_codes(&self) -> Vec<String> {
        let mut codes = Vec::new();
        if let Some(value) = &self.segment_code {
            flatten_codes(value, &mut codes);
        }
        codes
    }

    /// Display row `[device, diameter_mm, length_mm, segment_code]`; absent
    /// values render as `"N/A"`.
    pub fn display_row(&self) -> Vec<Value> {
        [
            &self.device,
            &self.diameter_mm,
            &self.length_mm,
            &self.segment_code,
        ]
        .into_iter()
        .map(|value| value.clone().unwrap_or_else(|| Value::from(NOT_AVAILABLE)))
        .collect()
    }
}

/// One intervention block from `pci_details`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PciDetail {
    #[serde(deserialize_with = "lenient::list")]
    pub stents: Vec<StentRecord>,
    #[serde(rename = "DEB_DCB", deserialize_with = "lenient::list")]
    pub deb_dcb: Vec<SegmentTarget>,
    #[serde(deserialize_with = "lenient::list")]
    pub thrombus_aspiration: Vec<SegmentTarget>,
    #[serde(rename = "CTO", deserialize_with = "lenient::flag")]
    pub cto: bool,
}

pub(crate) const NOT_AVAILABLE: &str = "N/A";

/// A device dimension in millimeters as reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Measure {
    #[default]
    Missing,
    Single(f64),
    Many(Vec<f64>),
    /// Non-numeric text; counts as a zero entry.
    Text(String),
}

impl Measure {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Measure::Missing,
            Value::Number(number) => number.as_f64().map_or(Measure::Missing, Measure::Single),
            Value::String(text) => match text.trim().parse::<f64>() {
                Ok(parsed) => Measure::Single(parsed),
                Err(_) => Measure::Text(text.clone()),
            },
            Value::Array(items) => Measure::Many(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Number(number) => number.as_f64(),
                        Value::String(text) => text.trim().parse().ok(),
                        _ => None,
                    })
                    .collect(),
            ),
            other => Measure::Text(other.to_string()),
        }
    }

    /// Length entries this measure contributes to stent length totals.
    ///
    /// A missing or non-numeric value still contributes one zero entry.
    pub fn entries(&self) -> Vec<f64> {
        match self {
            Measure::Missing | Measure::Text(_) => vec![0.0],
            Measure::Single(value) => vec![*value],
            Measure::Many(values) => values.clone(),
        }
    }
}

/// Renders a float as a JSON integer when it has no fractional part.
pub fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

/// Python-style truthiness of a JSON value.
///
/// `null`, `false`, zero, and empty strings, lists or objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

mod lenient {
    use super::flatten_codes;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Falsy values (`null`, `{}`, `""`, `false`, ...) decode as empty.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if !super::is_truthy(&value) {
            return Ok(Vec::new());
        }
        Vec::<T>::deserialize(value).map_err(serde::de::Error::custom)
    }

    /// Empty objects and `null` decode as absent.
    pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if !super::is_truthy(&value) {
            return Ok(None);
        }
        T::deserialize(value).map(Some).map_err(serde::de::Error::custom)
    }

    pub fn segment_codes<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<String>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let mut codes = Vec::new();
        flatten_codes(&value, &mut codes);
        Ok(codes)
    }

    pub fn tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let tags = match value {
            Value::String(tag) => vec![tag.trim().to_string()],
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(tag) => Some(tag.trim().to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        Ok(tags)
    }

    pub fn percentage<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().trim_end_matches('%').trim().parse().ok(),
            _ => None,
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Bool(flag) => flag,
            Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
            Value::String(text) => matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "y" | "1"
            ),
            _ => false,
        })
    }
}

fn flatten_codes(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(code) => {
            let code = code.trim();
            if !code.is_empty() {
                out.push(code.to_string());
            }
        }
        Value::Number(number) => {
            if let Some(n) = number.as_f64() {
                out.push(number_text(n));
            }
        }
        Value::Array(items) => {
            for item in items {
                flatten_codes(item, out);
            }
        }
        _ => {}
    }
}

/// Renders a number the way segment codes are written (`6`, not `6.0`).
pub(crate) fn number_text(value: f64) -> String {
    number_value(value).to_string()
}
