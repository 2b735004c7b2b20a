//! Conformance-harness CLI.
//!
//! This binary runs conformance campaigns against the built-in behavioral
//! unit models. It performs:
//! 1. **Run:** Drive one kind (or all kinds) at a chosen format, with an
//!    optional JSON config overriding seeds, tolerances, and policies.
//! 2. **List:** Enumerate the supported function kinds and formats.

use std::str::FromStr;
use std::{fs, process};

use clap::{Parser, Subcommand};

use fpverif_core::codec::FloatFormat;
use fpverif_core::common::FunctionKind;
use fpverif_core::runner::{CampaignReport, CampaignSpec};
use fpverif_core::units::{FixedLatencyUnit, MuxedFunctionUnit, VariableLatencyUnit};
use fpverif_core::{ConformanceRunner, HarnessConfig};

#[derive(Parser, Debug)]
#[command(
    name = "fpverif",
    version,
    about = "Conformance harness for pipelined floating-point functional units",
    long_about = "Drive conformance campaigns against the built-in behavioral unit models.\n\n\
        Campaigns are fully deterministic: identical (kind, format, seed) always\n\
        produces identical vectors, cycle counts, and verdicts.\n\n\
        Examples:\n  \
        fpverif run --kind add --format 32\n  \
        fpverif run --kind acos --format 16 --seed 7 --count 128\n  \
        fpverif run --kind all --format 64 --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run conformance campaigns.
    Run {
        /// Function kind to verify, or "all".
        #[arg(short, long, default_value = "all")]
        kind: String,

        /// Float format: 16, 32, or 64.
        #[arg(short, long, default_value = "32")]
        format: String,

        /// Seed override for the random vector tail.
        #[arg(long)]
        seed: Option<u64>,

        /// Override for the number of random vectors per campaign.
        #[arg(long)]
        count: Option<usize>,

        /// JSON configuration file (tolerances, policies, timing).
        #[arg(long)]
        config: Option<String>,

        /// Emit the full reports as JSON instead of a text summary.
        #[arg(long)]
        json: bool,
    },

    /// List supported function kinds and formats.
    List,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            kind,
            format,
            seed,
            count,
            config,
            json,
        } => run(&kind, &format, seed, count, config.as_deref(), json),
        Commands::List => list(),
    }
}

fn list() {
    println!("kinds:");
    for kind in FunctionKind::ALL {
        let phases = if kind.is_two_phase() { "two-phase" } else { "single-phase" };
        println!("  {:<12} arity {}  {phases}", kind.to_string(), kind.arity());
    }
    println!("formats: 16 (fp16), 32 (fp32), 64 (fp64)");
}

fn run(
    kind: &str,
    format: &str,
    seed: Option<u64>,
    count: Option<usize>,
    config_path: Option<&str>,
    json: bool,
) {
    let mut config = match config_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => match HarnessConfig::from_json(&text) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("error: failed to parse config {path}: {e}");
                    process::exit(2);
                }
            },
            Err(e) => {
                eprintln!("error: failed to read config {path}: {e}");
                process::exit(2);
            }
        },
        None => HarnessConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(count) = count {
        config.random_vectors = count;
    }

    let format = match FloatFormat::from_str(format) {
        Ok(format) => format,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    };

    let kinds: Vec<FunctionKind> = if kind.eq_ignore_ascii_case("all") {
        FunctionKind::ALL.to_vec()
    } else {
        match FunctionKind::from_str(kind) {
            Ok(kind) => vec![kind],
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(2);
            }
        }
    };

    let mut reports = Vec::with_capacity(kinds.len());
    for kind in kinds {
        reports.push(run_campaign(&config, kind, format));
    }

    let all_passed = reports.iter().all(CampaignReport::passed);

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: failed to serialize reports: {e}");
                process::exit(2);
            }
        }
    } else {
        for report in &reports {
            print_summary(report);
        }
    }

    if !all_passed {
        process::exit(1);
    }
}

/// Runs one campaign against the behavioral model matching the kind's
/// published unit class.
fn run_campaign(config: &HarnessConfig, kind: FunctionKind, format: FloatFormat) -> CampaignReport {
    let spec: CampaignSpec = config.campaign(kind, format);
    match kind {
        FunctionKind::Add
        | FunctionKind::Sub
        | FunctionKind::Mul
        | FunctionKind::FusedMulAdd => {
            let mut dut = FixedLatencyUnit::new(kind, format, config.timing.fixed_latency);
            ConformanceRunner::run(&mut dut, &spec)
        }
        FunctionKind::Div | FunctionKind::Sqrt => {
            let mut dut = VariableLatencyUnit::new(
                kind,
                format,
                config.timing.variable_latency,
                spec.policy,
            );
            ConformanceRunner::run(&mut dut, &spec)
        }
        _ => {
            let mut dut = MuxedFunctionUnit::new(
                format,
                config.timing.pipeline_depth,
                spec.policy,
                spec.smg,
            );
            ConformanceRunner::run(&mut dut, &spec)
        }
    }
}

fn print_summary(report: &CampaignReport) {
    let verdict = if report.passed() { "PASS" } else { "FAIL" };
    println!(
        "{verdict}  {:<12} {}  vectors {:>4}  passed {:>4}  failed {:>3}  exempt {:>2}  \
         fill-wait {:.1}  throughput {:.1}",
        report.kind.to_string(),
        report.format,
        report.stats.vectors,
        report.stats.passed,
        report.stats.failed,
        report.stats.exempt,
        report.stats.mean_fill_wait(),
        report.stats.mean_throughput(),
    );
    for failure in report.failures() {
        let why = match &failure.outcome {
            fpverif_core::runner::VectorOutcome::Failed(kind) => kind.to_string(),
            _ => continue,
        };
        println!(
            "      vector {:>4}  inputs {:?}  {why}",
            failure.index, failure.inputs
        );
    }
}
