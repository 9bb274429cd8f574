use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::Result;
use crate::report::ReportData;

/// Column headers of the consolidated summary sheet, in the legacy report
/// order. "Valor Informado" stays blank for manual comparison against the
/// figures declared to the auditor.
const SUMMARY_COLUMNS: [&str; 6] = [
    "Compet\u{ea}ncia",
    "Rubrica",
    "Nome da Rubrica",
    "N\u{ba} Empregados/Contribuintes",
    "Valor Informado",
    "Valor Calculado",
];

const DETAIL_COLUMNS: [&str; 5] = [
    "Compet\u{ea}ncia",
    "Rubrica",
    "Nome da Rubrica",
    "Empregado/Contribuinte",
    "Valor",
];

/// Writes the consolidated report to the given path: a `Resumo` sheet with
/// one row per grouped entry and an `Anal\u{ed}tico` sheet listing every raw row.
pub fn write_report(path: &Path, report: &ReportData) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let summary = workbook.add_worksheet();
    summary.set_name("Resumo")?;
    write_headers(summary, &SUMMARY_COLUMNS, &header_format)?;
    for (index, row) in report.grouped.iter().enumerate() {
        let row_idx = (index + 1) as u32;
        summary.write_string(row_idx, 0, &row.period)?;
        summary.write_string(row_idx, 1, &row.rubric_code)?;
        summary.write_string(row_idx, 2, &row.description)?;
        summary.write_number(row_idx, 3, row.employee_count as f64)?;
        // Column 4 (Valor Informado) is intentionally left blank.
        summary.write_number(row_idx, 5, row.value_sum.to_f64().unwrap_or_default())?;
    }
    summary.autofilter(0, 0, report.grouped.len() as u32, 5)?;
    summary.set_column_width(2, 40)?;
    summary.set_column_width(3, 26)?;
    summary.set_column_width(4, 16)?;
    summary.set_column_width(5, 16)?;

    let detail = workbook.add_worksheet();
    detail.set_name("Anal\u{ed}tico")?;
    write_headers(detail, &DETAIL_COLUMNS, &header_format)?;
    for (index, row) in report.raw.iter().enumerate() {
        let row_idx = (index + 1) as u32;
        detail.write_string(row_idx, 0, &row.competency)?;
        detail.write_string(row_idx, 1, &row.rubric_code)?;
        detail.write_string(row_idx, 2, &row.description)?;
        detail.write_string(row_idx, 3, &row.employee_code)?;
        detail.write_number(row_idx, 4, row.value.to_f64().unwrap_or_default())?;
    }
    detail.set_column_width(2, 40)?;

    workbook.save(path)?;
    Ok(())
}

fn write_headers(worksheet: &mut Worksheet, columns: &[&str], format: &Format) -> Result<()> {
    for (col_idx, header) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col_idx as u16, *header, format)?;
    }
    Ok(())
}
