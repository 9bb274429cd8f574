use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::io::{excel_write, json_write, manad_read};
use crate::report::{self, ReportData};

/// Output representations the pipeline can render a report into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Json,
}

impl ReportFormat {
    /// File extension used for batch outputs.
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Json => "json",
        }
    }
}

/// Counts describing one processed file, for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub entry_count: usize,
    pub description_count: usize,
    pub grouped_rows: usize,
    pub failed_lines: usize,
}

/// Runs the full pipeline for one MANAD file: load, consolidate, render.
///
/// Malformed record lines are logged and excluded; they never abort the run.
/// Only an unreadable input or an unwritable output is fatal.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn process_file(input: &Path, output: &Path, format: ReportFormat) -> Result<ReportSummary> {
    let loaded = manad_read::read_file(input)?;
    for failure in &loaded.failures {
        warn!(
            line_number = failure.line_number,
            reason = %failure.reason,
            "skipped malformed record"
        );
    }

    let report = report::build_report(&loaded.entries, &loaded.descriptions);
    info!(
        entry_count = loaded.entries.len(),
        description_count = loaded.descriptions.len(),
        grouped_rows = report.grouped.len(),
        failed_lines = loaded.failures.len(),
        "report consolidated"
    );

    render(output, &report, format)?;
    Ok(ReportSummary {
        entry_count: loaded.entries.len(),
        description_count: loaded.descriptions.len(),
        grouped_rows: report.grouped.len(),
        failed_lines: loaded.failures.len(),
    })
}

/// Processes every `.txt` file in a folder, writing one `Rel_<name>` report
/// per input into the output folder. Returns the number of files processed.
///
/// Files are visited in path order so batch runs are reproducible; state is
/// never shared between files.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input_dir.display(), output = %output_dir.display())
)]
pub fn process_folder(input_dir: &Path, output_dir: &Path, format: ReportFormat) -> Result<usize> {
    fs::create_dir_all(output_dir)?;

    let mut inputs: Vec<PathBuf> = fs::read_dir(input_dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|dir_entry| dir_entry.path())
        .filter(|path| is_manad_input(path))
        .collect();
    inputs.sort();

    for path in &inputs {
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("manad");
        let output = output_dir.join(format!("Rel_{stem}.{}", format.extension()));
        process_file(path, &output, format)?;
    }

    info!(file_count = inputs.len(), "batch complete");
    Ok(inputs.len())
}

fn render(output: &Path, report: &ReportData, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Xlsx => excel_write::write_report(output, report),
        ReportFormat::Json => json_write::write_report(output, report),
    }
}

fn is_manad_input(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("txt"))
}
