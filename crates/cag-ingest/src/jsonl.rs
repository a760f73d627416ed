//! Line-delimited JSON encounter reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use cag_model::Encounter;
use serde_json::Value;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Reads all encounters from a JSONL file.
///
/// # Errors
///
/// Fails on unreadable files, lines that are not JSON objects, and
/// encounters missing `patient_number` or `date_of_angiography`. A bad
/// review payload is not an error here.
pub fn read_encounters(path: &Path) -> Result<Vec<Encounter>> {
    let file = File::open(path).map_err(|err| IngestError::open(path, err))?;
    let encounters = parse_encounters(BufReader::new(file))?;
    debug!(path = %path.display(), encounters = encounters.len(), "read encounters");
    Ok(encounters)
}

/// Parses encounters from any buffered reader. Blank lines are skipped.
pub fn parse_encounters<R: BufRead>(reader: R) -> Result<Vec<Encounter>> {
    let mut encounters = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| IngestError::LineRead {
            line: line_number,
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(trimmed).map_err(|source| {
            IngestError::InvalidJson {
                line: line_number,
                source,
            }
        })?;
        let Value::Object(object) = value else {
            return Err(IngestError::NotAnObject { line: line_number });
        };
        encounters.push(Encounter::from_object(line_number, &object)?);
    }
    Ok(encounters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cag_model::CagError;

    #[test]
    fn parses_lines_and_skips_blanks() {
        let input = concat!(
            r#"{"patient_number": 1, "sex": "M", "age": 70, "date_of_angiography": "2024-01-02", "review": "{}"}"#,
            "\n\n",
            r#"{"patient_number": "2", "date_of_angiography": "2024-01-03", "review": "not json"}"#,
            "\n"
        );
        let encounters = parse_encounters(input.as_bytes()).expect("parse");
        assert_eq!(encounters.len(), 2);
        assert_eq!(encounters[0].patient_number, "1");
        assert_eq!(encounters[1].line, 3);
        assert_eq!(encounters[1].sex, "N/A");
    }

    #[test]
    fn invalid_line_reports_line_number() {
        let input = "{\"patient_number\": 1, \"date_of_angiography\": \"d\"}\n{broken\n";
        let err = parse_encounters(input.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::InvalidJson { line: 2, .. }));
    }

    #[test]
    fn non_object_line_is_rejected() {
        let err = parse_encounters("[1, 2]\n".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::NotAnObject { line: 1 }));
    }

    #[test]
    fn null_date_does_not_abort() {
        let input = concat!(
            r#"{"patient_number": 1, "date_of_angiography": "2024-01-02", "review": "{}"}"#,
            "\n",
            r#"{"patient_number": 2, "date_of_angiography": null, "review": "{}"}"#,
            "\n"
        );
        let encounters = parse_encounters(input.as_bytes()).expect("parse");
        assert_eq!(encounters.len(), 2);
        assert_eq!(encounters[0].date_of_angiography, "2024-01-02");
        assert_eq!(encounters[1].date_of_angiography, "N/A");
    }

    #[test]
    fn missing_patient_number_aborts() {
        let input = "{\"date_of_angiography\": \"2024-01-02\", \"review\": \"{}\"}\n";
        let err = parse_encounters(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Record(CagError::MissingRequiredField {
                line: 1,
                field: "patient_number"
            })
        ));
    }
}
