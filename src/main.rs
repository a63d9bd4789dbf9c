mod catalog;
mod config;
mod elements;
mod pipeline;
mod propagator;
mod trace;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::catalog::load_catalog;
use crate::config::Config;
use crate::elements::ElementSource;
use crate::propagator::{Geopotential, OpsMode, Sgp4Propagator};
use crate::trace::{compare, read_trace, Trace, Tolerance};

/// Without a subcommand, `sgp4-trace <catalog> <output>` runs `generate`.
#[derive(Parser)]
#[command(name = "sgp4-trace")]
#[command(about = "Sample SGP4 state vectors from a GP catalog into a binary trace")]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(required = true)]
    catalog: Option<PathBuf>,
    #[arg(required = true)]
    output: Option<PathBuf>,
    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode and normalize a catalog without propagating
    Validate {
        catalog: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum)]
        source: Option<ElementSource>,
    },
    /// Propagate every catalog record over one period and write a trace
    Generate {
        catalog: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the header and epoch state of every record in a trace
    Inspect { trace: PathBuf },
    /// Compare two traces within a tolerance
    Compare {
        reference: PathBuf,
        candidate: PathBuf,
        /// Maximum position difference, meters
        #[arg(long, default_value_t = Tolerance::default().position_m)]
        position_tolerance: f64,
        /// Maximum velocity difference, meters/second
        #[arg(long, default_value_t = Tolerance::default().velocity_m_s)]
        velocity_tolerance: f64,
        /// Maximum sample time difference, seconds
        #[arg(long, default_value_t = Tolerance::default().time_s)]
        time_tolerance: f64,
    },
}

#[derive(clap::Args)]
struct Overrides {
    /// YAML run configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Samples per period (N); N + 1 samples are written per record
    #[arg(long)]
    samples: Option<u32>,
    #[arg(long, value_enum)]
    source: Option<ElementSource>,
    #[arg(long, value_enum)]
    geopotential: Option<Geopotential>,
    /// Use AFSPC compatibility mode
    #[arg(long)]
    afspc: bool,
    /// Worker threads for sampling
    #[arg(long)]
    jobs: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return match (cli.catalog, cli.output) {
            (Some(catalog), Some(output)) => generate(&catalog, &output, cli.overrides),
            _ => {
                eprintln!("Usage: sgp4-trace <CATALOG> <OUTPUT>");
                ExitCode::FAILURE
            }
        };
    };

    match command {
        Commands::Validate {
            catalog,
            config,
            source,
        } => validate(&catalog, config.as_deref(), source),
        Commands::Generate {
            catalog,
            output,
            overrides,
        } => generate(&catalog, &output, overrides),
        Commands::Inspect { trace } => inspect(&trace),
        Commands::Compare {
            reference,
            candidate,
            position_tolerance,
            velocity_tolerance,
            time_tolerance,
        } => compare_traces(
            &reference,
            &candidate,
            Tolerance {
                position_m: position_tolerance,
                velocity_m_s: velocity_tolerance,
                time_s: time_tolerance,
            },
        ),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

fn validate(path: &Path, config_path: Option<&Path>, source: Option<ElementSource>) -> ExitCode {
    let mut config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(source) = source {
        config.element_source = source;
    }

    let records = match load_catalog(path, config.period_tolerance) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Catalog error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Catalog is valid ({} records)", records.len());
    let mut failed = false;
    for record in &records {
        match config.element_source.mean_elements(record) {
            Ok(elements) => println!(
                "  {:>9} {:<24} epoch {}  n={:.9e} rad/s  e={:.7}  period {} min",
                record.catalog_id,
                record.name,
                elements.epoch.format("%Y-%m-%dT%H:%M:%S%.6fZ"),
                elements.mean_motion,
                elements.eccentricity,
                record.period_minutes
            ),
            Err(e) => {
                eprintln!("  {:>9} {:<24} {}", record.catalog_id, record.name, e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn generate(catalog: &Path, output: &Path, overrides: Overrides) -> ExitCode {
    let mut config = match load_config(overrides.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(samples) = overrides.samples {
        config.samples_per_period = samples;
    }
    if let Some(source) = overrides.source {
        config.element_source = source;
    }
    if let Some(geopotential) = overrides.geopotential {
        config.propagator.geopotential = geopotential;
    }
    if overrides.afspc {
        config.propagator.mode = OpsMode::Afspc;
    }
    if let Some(jobs) = overrides.jobs {
        config.jobs = jobs;
    }

    let propagator = Sgp4Propagator::new(config.propagator);
    log::info!(
        "Propagator: {:?}, {:?} mode; {} samples per period from {:?}",
        propagator.context().geopotential,
        propagator.context().mode,
        config.samples_per_period,
        config.element_source
    );

    match pipeline::generate(catalog, output, &config, &propagator) {
        Ok(summary) => {
            println!(
                "Wrote {} records ({} samples each, {} bytes) to {}",
                summary.records,
                summary.samples_per_record,
                summary.bytes,
                summary.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn inspect(path: &Path) -> ExitCode {
    let trace = match read_trace(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Trace error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{} records, {} samples per period ({} per record)",
        trace.header.record_count,
        trace.header.samples_per_period,
        trace.header.samples_per_record()
    );
    for record in &trace.records {
        if let (Some(first), Some(last)) = (record.samples.first(), record.samples.last()) {
            println!(
                "  {:>9}  r0=[{:.3}, {:.3}, {:.3}] m  v0=[{:.6}, {:.6}, {:.6}] m/s  span {} s",
                record.catalog_id,
                first.position[0],
                first.position[1],
                first.position[2],
                first.velocity[0],
                first.velocity[1],
                first.velocity[2],
                last.seconds_since_epoch
            );
        }
    }
    ExitCode::SUCCESS
}

fn compare_traces(reference: &Path, candidate: &Path, tolerance: Tolerance) -> ExitCode {
    let (a, b) = match (std::fs::read(reference), std::fs::read(candidate)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error reading trace: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if a == b {
        println!("Traces are byte-identical ({} bytes)", a.len());
        return ExitCode::SUCCESS;
    }

    let parsed = Trace::parse(&a).and_then(|reference| {
        let candidate = Trace::parse(&b)?;
        compare(&reference, &candidate)
    });
    let diffs = match parsed {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Cannot compare traces: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut outside = 0;
    for diff in &diffs {
        log::debug!("{:?}", diff);
        if !diff.within(&tolerance) {
            outside += 1;
            println!(
                "  {:>9}  max |dr| {:.6e} m  max |dv| {:.6e} m/s  max |dt| {:.3e} s",
                diff.catalog_id,
                diff.max_position_error,
                diff.max_velocity_error,
                diff.max_time_error
            );
        }
    }

    println!(
        "{} of {} records within tolerance",
        diffs.len() - outside,
        diffs.len()
    );
    if outside == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
