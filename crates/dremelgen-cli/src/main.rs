mod config;
mod logging;

use std::io;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use dremelgen_core::Document;
use dremelgen_generate::output::json::write_json_atomic;
use dremelgen_generate::{
    GenerateOptions, GenerationEngine, GenerationError, GenerationReport, Profile, RunOutcome,
    flatten_file,
};
use schemars::schema_for;
use thiserror::Error;

use config::FileConfig;
use logging::init_logging;

const USAGE: &str = "\
dremelgen requires two arguments: <COUNT> and <SIZE>

  <COUNT>  Number of records to generate.
  <SIZE>   Average size of one record in bytes.

Run `dremelgen --fixed <COUNT>` to use constant count bounds instead.";

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "dremelgen",
    version,
    about = "Generate Dremel-style nested fixture records as JSON and CSV column tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    generate: GenerateArgs,
    /// Append JSON log events to this file instead of logging to stderr.
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flatten an existing JSON collection into column tables.
    Flatten(FlattenArgs),
    /// Print the JSON Schema of a document collection.
    Schema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of records to generate.
    #[arg(value_name = "COUNT")]
    count: Option<u64>,
    /// Average size of one record in bytes.
    #[arg(value_name = "SIZE")]
    size: Option<u64>,
    /// Positional values past SIZE; any makes the call a usage case.
    #[arg(value_name = "EXTRA", hide = true)]
    extra: Vec<String>,
    /// Use constant count bounds; takes COUNT only.
    #[arg(long, default_value_t = false)]
    fixed: bool,
    /// Seed of the random stream.
    #[arg(long)]
    seed: Option<u64>,
    /// Probability that an optional field is populated.
    #[arg(long)]
    likelihood: Option<f64>,
    /// Output directory for the JSON collection and column tables.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Write the JSON collection to stdout and skip the column tables.
    #[arg(long, default_value_t = false)]
    stdout: bool,
    /// TOML file with seed, likelihood and out_dir defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write the run report as JSON to this path.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FlattenArgs {
    /// JSON collection to flatten.
    #[arg(value_name = "FILE")]
    input: PathBuf,
    /// Output directory for the column tables.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

impl GenerateArgs {
    fn is_empty(&self) -> bool {
        self.count.is_none()
            && self.size.is_none()
            && self.extra.is_empty()
            && !self.fixed
            && self.seed.is_none()
            && self.likelihood.is_none()
            && self.out_dir.is_none()
            && !self.stdout
            && self.config.is_none()
            && self.report.is_none()
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::try_parse().and_then(check_subcommand_args).unwrap_or_else(|err| err.exit());

    init_logging(cli.log_file.as_deref())?;

    match cli.command {
        Some(Command::Flatten(args)) => run_flatten(args),
        Some(Command::Schema) => run_schema(),
        None => run_generate(cli.generate),
    }
}

/// Generate arguments only apply when no subcommand is given.
fn check_subcommand_args(cli: Cli) -> Result<Cli, clap::Error> {
    if cli.generate.is_empty() {
        return Ok(cli);
    }
    match cli.command.as_ref().map(Command::name) {
        Some(name) => Err(Cli::command().error(
            ErrorKind::ArgumentConflict,
            format!("generate arguments cannot be combined with the `{name}` subcommand"),
        )),
        None => Ok(cli),
    }
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Flatten(_) => "flatten",
            Command::Schema => "schema",
        }
    }
}

/// Profile selected by the positional arguments, `None` on a wrong count.
fn select_profile(args: &GenerateArgs) -> Option<(u64, Profile)> {
    if !args.extra.is_empty() {
        return None;
    }
    match (args.count, args.size, args.fixed) {
        (Some(count), Some(size), false) => Some((
            count,
            Profile::Sized {
                avg_record_bytes: size,
            },
        )),
        (Some(count), None, true) => Some((count, Profile::Fixed)),
        _ => None,
    }
}

fn build_options(args: &GenerateArgs) -> Result<Option<GenerateOptions>, CliError> {
    let Some((records, profile)) = select_profile(args) else {
        return Ok(None);
    };

    let mut options = GenerateOptions::new(records, profile);
    if let Some(path) = &args.config {
        FileConfig::load(path)?.apply(&mut options);
    }
    if let Some(seed) = args.seed {
        options.seed = seed;
    }
    if let Some(likelihood) = args.likelihood {
        options.likelihood = likelihood;
    }
    if let Some(out_dir) = &args.out_dir {
        options.out_dir = out_dir.clone();
    }
    Ok(Some(options))
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let Some(options) = build_options(&args)? else {
        println!("{USAGE}");
        return Ok(());
    };
    let engine = GenerationEngine::new(options)?;

    let report = if args.stdout {
        let report = engine.run_to_writer(io::stdout().lock())?;
        for line in report.summary_lines() {
            tracing::info!("{line}");
        }
        report
    } else {
        match engine.run()? {
            RunOutcome::Skipped { .. } => return Ok(()),
            RunOutcome::Generated(report) => {
                for line in report.summary_lines() {
                    println!("{line}");
                }
                report
            }
        }
    };

    if let Some(path) = &args.report {
        write_report(path, &report)?;
    }
    Ok(())
}

fn write_report(path: &std::path::Path, report: &GenerationReport) -> Result<(), CliError> {
    write_json_atomic(path, report)?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}

fn run_flatten(args: FlattenArgs) -> Result<(), CliError> {
    let tables = flatten_file(&args.input, &args.out_dir)?;
    let rows: u64 = tables.iter().map(|table| table.rows_written).sum();
    tracing::info!(
        input = %args.input.display(),
        out_dir = %args.out_dir.display(),
        tables = tables.len(),
        rows,
        "flatten finished"
    );
    Ok(())
}

fn run_schema() -> Result<(), CliError> {
    let schema = schema_for!(Vec<Document>);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
