use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::report::ReportData;

/// Writes the consolidated report as pretty-printed JSON, for callers that
/// want to post-process the tables instead of opening a spreadsheet.
pub fn write_report(path: &Path, report: &ReportData) -> Result<()> {
    let json_string = serde_json::to_string_pretty(report)?;
    fs::write(path, json_string)?;
    Ok(())
}
