//! Consolidation of decoded rubric entries into the two report tables.
//!
//! The raw table is a direct join of every entry against the description
//! lookup; the grouped table summarises one row per (competency period,
//! rubric code) pair. Both are regenerated wholesale on every call, so the
//! same input always produces identical tables.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{RubricEntry, competency_label};

/// One raw-table row: an entry joined with its resolved description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRow {
    pub competency: String,
    pub rubric_code: String,
    pub description: String,
    pub employee_code: String,
    pub value: Decimal,
}

/// One grouped-table row: the consolidated figures for a (period, rubric)
/// pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedRow {
    /// Period label in `month/year` form, derived from the competency token.
    pub period: String,
    pub rubric_code: String,
    pub description: String,
    /// Number of distinct employee codes contributing to the group.
    pub employee_count: usize,
    /// Exact sum of every entry value in the group.
    pub value_sum: Decimal,
}

/// The two tables handed to the report renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub raw: Vec<RawRow>,
    pub grouped: Vec<GroupedRow>,
}

/// Joins entries against the description lookup and consolidates them.
///
/// Entries whose rubric code has no description get an empty description in
/// both tables rather than failing; the two record kinds may arrive in any
/// order or be incomplete. The grouped table comes back sorted ascending by
/// period label then rubric code, both as plain string compares, which is the
/// order the rendered report relies on.
pub fn build_report(entries: &[RubricEntry], descriptions: &HashMap<String, String>) -> ReportData {
    let resolve = |code: &str| descriptions.get(code).cloned().unwrap_or_default();

    let raw = entries
        .iter()
        .map(|entry| RawRow {
            competency: entry.competency.clone(),
            rubric_code: entry.rubric_code.clone(),
            description: resolve(&entry.rubric_code),
            employee_code: entry.employee_code.clone(),
            value: entry.value,
        })
        .collect();

    // BTreeMap keyed by (period, rubric) yields the required sort order for
    // free when drained.
    let mut groups: BTreeMap<(String, String), Group> = BTreeMap::new();
    for entry in entries {
        let key = (
            competency_label(&entry.competency),
            entry.rubric_code.clone(),
        );
        let group = groups.entry(key).or_default();
        group.employees.insert(entry.employee_code.clone());
        group.value_sum += entry.value;
    }

    let grouped = groups
        .into_iter()
        .map(|((period, rubric_code), group)| GroupedRow {
            period,
            description: resolve(&rubric_code),
            rubric_code,
            employee_count: group.employees.len(),
            value_sum: group.value_sum,
        })
        .collect();

    ReportData { raw, grouped }
}

#[derive(Debug, Default)]
struct Group {
    employees: BTreeSet<String>,
    value_sum: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn entry(rubric: &str, value: &str, employee: &str, competency: &str) -> RubricEntry {
        RubricEntry {
            rubric_code: rubric.to_string(),
            value: dec(value),
            employee_code: employee.to_string(),
            competency: competency.to_string(),
        }
    }

    fn descriptions(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(code, text)| (code.to_string(), text.to_string()))
            .collect()
    }

    #[test]
    fn consolidates_one_group_with_distinct_employee_count() {
        let entries = vec![
            entry("0001", "150.50", "E1", "012024"),
            entry("0001", "200.00", "E1", "012024"),
            entry("0001", "50.00", "E2", "012024"),
        ];
        let lookup = descriptions(&[("0001", "Salario")]);

        let report = build_report(&entries, &lookup);

        assert_eq!(report.grouped.len(), 1);
        let row = &report.grouped[0];
        assert_eq!(row.period, "01/2024");
        assert_eq!(row.rubric_code, "0001");
        assert_eq!(row.description, "Salario");
        assert_eq!(row.employee_count, 2);
        assert_eq!(row.value_sum, dec("400.50"));
    }

    #[test]
    fn unmatched_rubric_gets_empty_description() {
        let entries = vec![entry("0002", "10.00", "E1", "012024")];
        let report = build_report(&entries, &HashMap::new());

        assert_eq!(report.raw[0].description, "");
        assert_eq!(report.grouped[0].description, "");
    }

    #[test]
    fn empty_input_yields_empty_tables() {
        let report = build_report(&[], &HashMap::new());
        assert!(report.raw.is_empty());
        assert!(report.grouped.is_empty());
    }

    #[test]
    fn raw_table_preserves_input_order() {
        let entries = vec![
            entry("0009", "1.00", "E1", "022024"),
            entry("0001", "2.00", "E2", "012024"),
        ];
        let report = build_report(&entries, &HashMap::new());

        assert_eq!(report.raw.len(), 2);
        assert_eq!(report.raw[0].rubric_code, "0009");
        assert_eq!(report.raw[1].rubric_code, "0001");
    }

    #[test]
    fn grouped_table_sorts_by_period_then_rubric() {
        let entries = vec![
            entry("0002", "1.00", "E1", "022024"),
            entry("0001", "1.00", "E1", "022024"),
            entry("0003", "1.00", "E1", "012024"),
        ];
        let report = build_report(&entries, &HashMap::new());

        let keys: Vec<(&str, &str)> = report
            .grouped
            .iter()
            .map(|row| (row.period.as_str(), row.rubric_code.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("01/2024", "0003"),
                ("02/2024", "0001"),
                ("02/2024", "0002"),
            ]
        );
        for pair in report.grouped.windows(2) {
            assert!(
                (&pair[0].period, &pair[0].rubric_code) <= (&pair[1].period, &pair[1].rubric_code)
            );
        }
    }

    #[test]
    fn duplicate_employees_count_once_but_sum_everything() {
        let entries = vec![
            entry("0001", "10.00", "E1", "012024"),
            entry("0001", "-10.00", "E1", "012024"),
            entry("0001", "0.00", "E1", "012024"),
        ];
        let report = build_report(&entries, &HashMap::new());

        let row = &report.grouped[0];
        assert_eq!(row.employee_count, 1);
        assert_eq!(row.value_sum, dec("0.00"));
    }

    #[test]
    fn group_sums_match_raw_rows() {
        let entries = vec![
            entry("0001", "10.00", "E1", "012024"),
            entry("0001", "15.00", "E2", "012024"),
            entry("0002", "7.50", "E1", "012024"),
            entry("0001", "3.25", "E3", "022024"),
        ];
        let report = build_report(&entries, &HashMap::new());

        for group in &report.grouped {
            let expected: Decimal = report
                .raw
                .iter()
                .filter(|row| {
                    competency_label(&row.competency) == group.period
                        && row.rubric_code == group.rubric_code
                })
                .map(|row| row.value)
                .sum();
            assert_eq!(group.value_sum, expected);
        }
    }

    #[test]
    fn rebuilding_from_the_same_input_is_identical() {
        let entries = vec![
            entry("0001", "10.00", "E1", "012024"),
            entry("0002", "20.00", "E2", "022024"),
        ];
        let lookup = descriptions(&[("0001", "Salario"), ("0002", "Bonus")]);

        let first = build_report(&entries, &lookup);
        let second = build_report(&entries, &lookup);
        assert_eq!(first, second);
    }
}
