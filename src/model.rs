use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One occurrence of a pay rubric applied to one employee in one competency
/// period, decoded from a K300 line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricEntry {
    /// Rubric code, matched verbatim against [`RubricDescription`] codes.
    pub rubric_code: String,
    /// Monetary amount of the entry. May be negative.
    pub value: Decimal,
    /// Code of the employee or contributor the entry belongs to.
    pub employee_code: String,
    /// Competency token in `MMYYYY` layout identifying the period.
    pub competency: String,
}

/// Static metadata mapping a rubric code to its human-readable name, decoded
/// from a K150 line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricDescription {
    pub rubric_code: String,
    pub description: String,
}

/// Classification of a MANAD line by its leading record identifier.
///
/// MANAD files carry many record kinds; only rubric descriptions (K150) and
/// rubric entries (K300) are interpreted here. Everything else is [`Other`]
/// and skipped by the loader.
///
/// [`Other`]: RecordKind::Other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Description,
    Entry,
    Other,
}

impl RecordKind {
    /// Classifies a line by inspecting its first pipe-delimited field.
    pub fn of_line(line: &str) -> Self {
        match line.split('|').next().unwrap_or_default() {
            "K150" => RecordKind::Description,
            "K300" => RecordKind::Entry,
            _ => RecordKind::Other,
        }
    }
}

/// Derives the display label for a competency token: month first, the
/// remainder as the year (`012024` becomes `01/2024`).
///
/// Tokens too short to slice are returned unchanged so that aggregation never
/// fails on an odd date token.
pub fn competency_label(token: &str) -> String {
    if token.len() > 2 && token.is_char_boundary(2) {
        format!("{}/{}", &token[..2], &token[2..])
    } else {
        token.to_string()
    }
}
