mod logging;
mod report;
mod settings;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::{Args, Parser, Subcommand};
use sixcities_generate::{
    GenerateOptions, GenerationEngine, GenerationError, parse_record_count, template_source,
};
use sixcities_import::{ImportEngine, ImportError};
use thiserror::Error;

use logging::init_logging;
use report::{ConsoleReporter, OutputFormat};
use settings::{Settings, load_settings};

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generate(#[from] GenerationError),
    #[error("import error: {0}")]
    Import(#[from] ImportError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("worker task failed: {0}")]
    Task(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "sixcities",
    version,
    about = "Generate and import rental offer TSV files"
)]
struct Cli {
    /// Settings file; defaults to ./sixcities.toml when present.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write COUNT generated offers to OUTPUT as TSV.
    Generate(GenerateArgs),
    /// Parse and validate a TSV file of offers.
    Import(ImportArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of offers to generate.
    #[arg(allow_hyphen_values = true)]
    count: String,
    /// Output TSV path.
    output: PathBuf,
    /// Template source: an http(s) URL or a JSON file path.
    templates: String,
    /// Seed for reproducible output; overrides the settings file.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// TSV file to import.
    input: PathBuf,
    /// How row outcomes are printed.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    init_logging(&settings.logging)?;

    match cli.command {
        Command::Generate(args) => run_generate(args, &settings).await,
        Command::Import(args) => run_import(args).await,
    }
}

async fn run_generate(args: GenerateArgs, settings: &Settings) -> Result<(), CliError> {
    let count = parse_record_count(&args.count)?;
    let options = GenerateOptions {
        seed: args.seed.or(settings.generate.seed),
        template_timeout: settings.templates.timeout(),
    };
    let source = template_source(&args.templates, options.template_timeout)?;

    let engine = GenerationEngine::new(options);
    cancel_on_ctrl_c(engine.cancel_flag());
    let report = engine.run(source.as_ref(), count, &args.output).await?;

    let summary = &report.summary;
    if summary.cancelled {
        println!(
            "cancelled after {} of {} records, {} kept",
            summary.records_written,
            report.records_requested,
            summary.path.display()
        );
    } else {
        println!(
            "{} records written to {}",
            summary.records_written,
            summary.path.display()
        );
    }
    Ok(())
}

async fn run_import(args: ImportArgs) -> Result<(), CliError> {
    let engine = ImportEngine::new();
    cancel_on_ctrl_c(engine.cancel_flag());

    let ImportArgs { input, format } = args;
    tokio::task::spawn_blocking(move || -> Result<(), CliError> {
        let mut reporter = ConsoleReporter::new(std::io::stdout().lock(), format);
        engine.run(&input, &mut reporter)?;
        reporter.finish()?.flush()?;
        Ok(())
    })
    .await
    .map_err(|err| CliError::Task(err.to_string()))?
}

fn cancel_on_ctrl_c(flag: Arc<AtomicBool>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!(event = "interrupt_received");
            flag.store(true, Ordering::Relaxed);
        }
    });
}
