use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{Result, ToolError};
use crate::model::{RecordKind, RubricDescription, RubricEntry};

// Positional field layout of the legacy format, zero-based over the
// pipe-split line.
const K300_EMPLOYEE_CODE: usize = 4;
const K300_COMPETENCY: usize = 5;
const K300_RUBRIC_CODE: usize = 6;
const K300_VALUE: usize = 7;
const K150_RUBRIC_CODE: usize = 3;
const K150_DESCRIPTION: usize = 4;

/// A recognized record line that could not be decoded, kept for caller
/// visibility after the rest of the file has been processed.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFailure {
    /// One-based line number within the source file.
    pub line_number: usize,
    /// The offending line, verbatim.
    pub line: String,
    pub reason: String,
}

/// Everything decoded from one MANAD file. Produced fresh per invocation;
/// nothing is shared across files.
#[derive(Debug, Default)]
pub struct LoadedFile {
    /// Rubric entries in file order.
    pub entries: Vec<RubricEntry>,
    /// Rubric code to description, last occurrence winning on repeats.
    pub descriptions: HashMap<String, String>,
    /// Recognized lines that failed to decode.
    pub failures: Vec<LineFailure>,
}

/// Parses a numeric field written with a comma decimal separator, the
/// convention used by MANAD value fields (`150,50`, `-32,10`).
pub fn parse_decimal_br(text: &str) -> Result<Decimal> {
    let normalized = text.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| ToolError::MalformedRecord {
        message: format!("invalid numeric value '{text}'"),
    })
}

/// Decodes a K300 rubric entry line.
pub fn decode_entry(line: &str) -> Result<RubricEntry> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() <= K300_VALUE {
        return Err(ToolError::MalformedRecord {
            message: format!(
                "K300 line has {} fields, expected at least {}",
                fields.len(),
                K300_VALUE + 1
            ),
        });
    }

    Ok(RubricEntry {
        rubric_code: fields[K300_RUBRIC_CODE].to_string(),
        value: parse_decimal_br(fields[K300_VALUE])?,
        employee_code: fields[K300_EMPLOYEE_CODE].to_string(),
        competency: fields[K300_COMPETENCY].to_string(),
    })
}

/// Decodes a K150 rubric description line.
pub fn decode_description(line: &str) -> Result<RubricDescription> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() <= K150_DESCRIPTION {
        return Err(ToolError::MalformedRecord {
            message: format!(
                "K150 line has {} fields, expected at least {}",
                fields.len(),
                K150_DESCRIPTION + 1
            ),
        });
    }

    Ok(RubricDescription {
        rubric_code: fields[K150_RUBRIC_CODE].to_string(),
        description: fields[K150_DESCRIPTION].to_string(),
    })
}

/// Scans the lines of one MANAD file, dispatching each recognized record kind
/// to its decoder.
///
/// A decode failure on a recognized line is recorded in
/// [`LoadedFile::failures`] and does not stop the scan; lines of other record
/// kinds are skipped outright.
pub fn load_lines<'a>(lines: impl Iterator<Item = &'a str>) -> LoadedFile {
    let mut loaded = LoadedFile::default();

    for (index, raw_line) in lines.enumerate() {
        let line = raw_line.trim_end_matches(['\r', '\n']);
        let outcome = match RecordKind::of_line(line) {
            RecordKind::Entry => decode_entry(line).map(|entry| {
                loaded.entries.push(entry);
            }),
            RecordKind::Description => decode_description(line).map(|record| {
                loaded
                    .descriptions
                    .insert(record.rubric_code, record.description);
            }),
            RecordKind::Other => Ok(()),
        };

        if let Err(error) = outcome {
            loaded.failures.push(LineFailure {
                line_number: index + 1,
                line: line.to_string(),
                reason: error.to_string(),
            });
        }
    }

    loaded
}

/// Reads a MANAD file from disk and decodes its recognized records.
///
/// MANAD files are ISO-8859-1 encoded; each byte maps to the identical
/// Unicode code point, so the transcoding is a plain widening.
pub fn read_file(path: &Path) -> Result<LoadedFile> {
    let bytes = fs::read(path)?;
    let text: String = bytes.iter().map(|&byte| byte as char).collect();
    Ok(load_lines(text.lines()))
}
