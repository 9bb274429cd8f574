use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use manad_tools::pipeline::{self, ReportFormat};
use manad_tools::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Report(args) => execute_report(args),
    }
}

fn execute_report(args: ReportArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(ToolError::MissingInput(args.input));
    }

    let format = ReportFormat::from(args.format);
    if args.input.is_dir() {
        pipeline::process_folder(&args.input, &args.output, format)?;
    } else {
        pipeline::process_file(&args.input, &args.output, format)?;
    }
    Ok(())
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Consolidate MANAD payroll files into per-rubric summary reports."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a consolidated rubric report from a MANAD file or folder.
    Report(ReportArgs),
}

#[derive(clap::Args)]
struct ReportArgs {
    /// Input MANAD file, or a folder of .TXT files for batch processing.
    #[arg(long)]
    input: PathBuf,

    /// Output report path, or the output folder when the input is a folder.
    #[arg(long)]
    output: PathBuf,

    /// Output representation.
    #[arg(long, value_enum, default_value_t = OutputFormat::Xlsx)]
    format: OutputFormat,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Xlsx,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Xlsx => write!(f, "xlsx"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Xlsx => ReportFormat::Xlsx,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}
