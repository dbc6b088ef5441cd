mod config;
mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use storelens_extract::{ExtractError, Extractor};
use storelens_generate::{GenerationError, Generator};
use storelens_validate::{ValidateError, build_profile, write_profile};

use config::{ConfigError, load_or_create};

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("validation artifact error: {0}")]
    Validate(#[from] ValidateError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging init failed: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "storelens", version, about = "Storelens e-commerce ETL")]
struct Cli {
    /// Optional JSON run log file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the extraction chain and validate the result.
    Extract(ExtractArgs),
    /// Force-generate sample data.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Pipeline config file; created with defaults when absent.
    #[arg(long, default_value = "storelens.toml")]
    config: PathBuf,
    /// Base data directory; overrides raw/sample dirs to `<dir>/raw`
    /// and `<dir>/sample`.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Where to write the data-profile JSON.
    #[arg(long)]
    profile_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Pipeline config file; created with defaults when absent.
    #[arg(long, default_value = "storelens.toml")]
    config: PathBuf,
    /// Seed override for this run.
    #[arg(long)]
    seed: Option<u64>,
    /// Output directory; defaults to the configured sample dir.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref()).map_err(CliError::Logging)?;

    match cli.command {
        Command::Extract(args) => run_extract(args),
        Command::Generate(args) => run_generate(args),
    }
}

fn run_extract(args: ExtractArgs) -> Result<(), CliError> {
    let mut config = load_or_create(&args.config)?;
    if let Some(data_dir) = args.data_dir {
        config.extract.raw_dir = data_dir.join("raw");
        config.extract.sample_dir = data_dir.join("sample");
    }

    let extractor = Extractor::new(config.extract);
    let validation = extractor.extract()?;

    for (name, validated) in &validation.tables {
        info!(
            table = %name,
            rows = validated.table.row_count(),
            null_percentage = format!("{:.1}", validated.meta.null_percentage),
            "extracted table"
        );
    }

    let profile = build_profile(&validation);
    if let Some(path) = args.profile_out {
        write_profile(&path, &profile)?;
        info!(path = %path.display(), "data profile written");
    } else {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    }

    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let config = load_or_create(&args.config)?;

    let mut options = config.extract.generate;
    if let Some(seed) = args.seed {
        options.seed = seed;
    }
    let out_dir = args.out.unwrap_or(config.extract.sample_dir);
    options.out_dir = Some(out_dir.clone());
    options.file_prefix = config.extract.file_prefix;

    let (_, report) = Generator::new(options).run()?;

    let report_path = out_dir.join("generation_report.json");
    std::fs::write(&report_path, serde_json::to_vec_pretty(&report)?)?;
    info!(path = %report_path.display(), "generation report written");

    Ok(())
}
