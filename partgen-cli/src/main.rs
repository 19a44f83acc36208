//! Partgen CLI - generate component catalogs and KiCad symbol libraries.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use partgen::{GenerationOptions, PartgenCore, SeriesFailure, SeriesRegistry, SpecReport};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "partgen")]
#[command(about = "Part catalog generator for passive electronic components", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered series
    List {
        /// Only series of this family or group ("thermistor", "resistors")
        #[arg(long)]
        family: Option<String>,

        /// Directory of additional series documents
        #[arg(long, value_name = "DIR")]
        specs: Option<PathBuf>,
    },

    /// Print a series specification as JSON
    Show {
        #[arg(value_name = "SERIES")]
        series: String,

        #[arg(long, value_name = "DIR")]
        specs: Option<PathBuf>,
    },

    /// Validate every registered series
    Check {
        #[arg(long, value_name = "DIR")]
        specs: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: ReportFormat,
    },

    /// Generate catalog files
    Generate {
        /// Series to build, in output order (all when omitted)
        #[arg(value_name = "SERIES")]
        series: Vec<String>,

        /// Also build every series of this family or group
        #[arg(long)]
        family: Option<String>,

        #[arg(long, value_name = "DIR")]
        specs: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Also write one merged file per family group with this name
        #[arg(long, value_name = "NAME")]
        unified: Option<String>,

        /// Build series in parallel
        #[arg(long)]
        parallel: bool,

        /// Stop at the first failing series
        #[arg(long)]
        fail_fast: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Human-readable output
    Human,
    /// JSON output for CI/CD
    Json,
    /// GitHub Actions format
    Github,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
    KicadSym,
    Footprints,
}

impl From<OutputFormat> for partgen::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => partgen::OutputFormat::Csv,
            OutputFormat::Json => partgen::OutputFormat::Json,
            OutputFormat::KicadSym => partgen::OutputFormat::KicadSym,
            OutputFormat::Footprints => partgen::OutputFormat::Footprints,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::List { family, specs } => handle_list(family.as_deref(), specs.as_deref()),
        Commands::Show { series, specs } => handle_show(&series, specs.as_deref()),
        Commands::Check { specs, format } => handle_check(specs.as_deref(), format),
        Commands::Generate {
            series,
            family,
            specs,
            out,
            format,
            unified,
            parallel,
            fail_fast,
        } => handle_generate(GenerateArgs {
            series,
            family,
            specs,
            out,
            format,
            unified,
            options: GenerationOptions {
                parallel,
                fail_fast,
            },
        }),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };
    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_registry(specs: Option<&Path>) -> Result<SeriesRegistry> {
    let mut registry = SeriesRegistry::with_builtin();
    if let Some(dir) = specs {
        let load = registry
            .load_directory(dir)
            .with_context(|| format!("loading series from {}", dir.display()))?;
        for error in &load.errors {
            eprintln!("Warning: {}", error);
        }
    }
    Ok(registry)
}

fn handle_list(family: Option<&str>, specs: Option<&Path>) -> Result<i32> {
    let registry = load_registry(specs)?;
    let series = match family {
        Some(family) => registry.select(family)?,
        None => registry.iter().collect(),
    };
    for spec in series {
        println!("{:<22} {:<18} {}", spec.id, spec.family.as_str(), spec.manufacturer);
    }
    Ok(0)
}

fn handle_show(id: &str, specs: Option<&Path>) -> Result<i32> {
    let registry = load_registry(specs)?;
    match registry.get(id) {
        Some(spec) => {
            println!("{}", serde_json::to_string_pretty(spec)?);
            Ok(0)
        }
        None => {
            eprintln!("Error: unknown series '{}'", id);
            Ok(2)
        }
    }
}

fn handle_check(specs: Option<&Path>, format: ReportFormat) -> Result<i32> {
    let registry = load_registry(specs)?;
    let reports = PartgenCore::check_specs(&registry);
    match format {
        ReportFormat::Human => output_human(&reports),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        ReportFormat::Github => output_github(&reports),
    }
    Ok(if reports.iter().all(SpecReport::is_ok) { 0 } else { 1 })
}

fn output_human(reports: &[SpecReport]) {
    let failing: Vec<_> = reports.iter().filter(|r| !r.is_ok()).collect();
    for report in &failing {
        println!("\nSeries: {}", report.series);
        println!("{}", "─".repeat(60));
        for error in &report.errors {
            println!("    - {}", error);
        }
    }
    println!("\n  Summary:");
    println!("    Series:  {}", reports.len());
    println!("    Failing: {}", failing.len());
}

fn output_github(reports: &[SpecReport]) {
    for report in reports {
        for error in &report.errors {
            println!("::error title={}::{}", report.series, error.replace('\n', " "));
        }
    }
}

struct GenerateArgs {
    series: Vec<String>,
    family: Option<String>,
    specs: Option<PathBuf>,
    out: PathBuf,
    format: OutputFormat,
    unified: Option<String>,
    options: GenerationOptions,
}

fn handle_generate(args: GenerateArgs) -> Result<i32> {
    let registry = load_registry(args.specs.as_deref())?;

    // repeats are dropped when the ids are resolved
    let mut ids = args.series;
    if let Some(family) = args.family.as_deref() {
        let selected = registry.select(family)?;
        if selected.is_empty() && ids.is_empty() {
            anyhow::bail!("no series registered for '{}'", family);
        }
        ids.extend(selected.iter().map(|s| s.id.clone()));
    }

    let outcome = PartgenCore::generate_catalog(&registry, &ids, args.options)?;
    let written = PartgenCore::write(
        &outcome.catalog,
        args.format.into(),
        &args.out,
        args.unified.as_deref(),
    )
    .with_context(|| format!("writing to {}", args.out.display()))?;

    report_failures(&outcome.failures);
    println!(
        "Generated {} parts from {} series into {} files",
        outcome.catalog.len(),
        outcome.catalog.sections().len(),
        written.len()
    );
    Ok(if outcome.is_success() { 0 } else { 1 })
}

fn report_failures(failures: &[SeriesFailure]) {
    for failure in failures {
        eprintln!("Error: {}", failure);
    }
}
