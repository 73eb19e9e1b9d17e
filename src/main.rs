use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use tally_io::{ExperimentName, LabelEncoder, LyricsReader, PredictionReader, ResultWriter};
use tally_metrics::{EvaluationReport, Evaluator, SimulationConfig};

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Accuracy, precision, recall and F1 for classifier predictions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for reproducibility
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel evaluation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Score every prediction column of a CSV table against its gold column
    Evaluate {
        /// Path to the prediction CSV (header: gold,<run>,...)
        #[arg(long)]
        predictions: PathBuf,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Read a tab-separated lyrics file and summarize its records
    Inspect {
        /// Path to the lyrics file (artist<TAB>title<TAB>lyrics)
        #[arg(long)]
        data: PathBuf,

        /// Maximum number of records to read
        #[arg(long, default_value_t = 1000)]
        read_limit: usize,

        /// Keep punctuation in tokens
        #[arg(long, default_value_t = false)]
        keep_punctuation: bool,
    },

    /// Evaluate two independent binomial label draws as a self-check
    Simulate {
        /// Number of label pairs to draw
        #[arg(long, default_value_t = 500_000)]
        n_samples: usize,

        /// Bernoulli trials per draw (labels fall in 0..=trials)
        #[arg(long, default_value_t = 5)]
        trials: usize,

        /// Per-trial success probability
        #[arg(long, default_value_t = 0.5)]
        probability: f64,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct EvaluateOutput {
    experiment: String,
    n_samples: usize,
    n_classes: usize,
    runs: Vec<RunSummary>,
}

#[derive(Serialize)]
struct RunSummary {
    name: String,
    accuracy: f64,
    macro_f1: Option<f64>,
    micro_f1: Option<f64>,
}

#[derive(Serialize)]
struct InspectOutput {
    n_records: usize,
    n_artists: usize,
    n_tokens: usize,
    mean_tokens_per_record: f64,
}

#[derive(Serialize)]
struct SimulateOutput {
    seed: u64,
    #[serde(flatten)]
    report: EvaluationReport,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Evaluate {
            predictions,
            experiment,
            output_dir,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;

            // 1. Read gold labels and prediction runs
            let table = PredictionReader::new(&predictions)
                .read()
                .context("failed to read prediction CSV")?;

            // 2. Encode labels; gold defines the class set
            let mut encoder = LabelEncoder::fit(&table.gold);
            let gold = encoder.encode_all(&table.gold);
            let encoded_runs: Vec<(&str, Vec<usize>)> = table
                .runs
                .iter()
                .map(|run| (run.name.as_str(), encoder.encode_all(&run.labels)))
                .collect();
            info!(
                n_samples = gold.len(),
                n_classes = encoder.n_classes(),
                n_runs = encoded_runs.len(),
                "labels encoded"
            );

            // 3. Evaluate runs in parallel
            let reports: Vec<(&str, EvaluationReport)> = encoded_runs
                .par_iter()
                .map(|(name, pred)| {
                    Evaluator::new(&gold, pred)
                        .map(|ev| (*name, ev.report()))
                        .with_context(|| format!("failed to evaluate run {name}"))
                })
                .collect::<Result<_>>()?;

            for (name, report) in &reports {
                info!(run = *name, accuracy = report.accuracy, "run evaluated");
            }

            // 4. Write evaluation JSON
            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            let borrowed: Vec<(&str, &EvaluationReport)> =
                reports.iter().map(|(name, report)| (*name, report)).collect();
            writer
                .write_evaluation(encoder.class_names(), &borrowed)
                .context("failed to write evaluation result")?;

            // 5. Print summary
            let output = EvaluateOutput {
                experiment,
                n_samples: gold.len(),
                n_classes: encoder.n_classes(),
                runs: reports
                    .iter()
                    .map(|(name, report)| RunSummary {
                        name: (*name).to_string(),
                        accuracy: report.accuracy,
                        macro_f1: report.macro_avg.f1,
                        micro_f1: report.micro_avg.f1,
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Inspect {
            data,
            read_limit,
            keep_punctuation,
        } => {
            let dataset = LyricsReader::new(&data)
                .with_read_limit(read_limit)
                .with_keep_punctuation(keep_punctuation)
                .read()
                .context("failed to read lyrics file")?;

            let n_artists = dataset.artists().iter().collect::<HashSet<_>>().len();
            let output = InspectOutput {
                n_records: dataset.n_records(),
                n_artists,
                n_tokens: dataset.n_tokens(),
                mean_tokens_per_record: dataset.n_tokens() as f64 / dataset.n_records() as f64,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Simulate {
            n_samples,
            trials,
            probability,
        } => {
            let labels = SimulationConfig::new(n_samples)?
                .with_trials(trials)
                .with_probability(probability)
                .with_seed(cli.seed)
                .generate()
                .context("simulation failed")?;

            let evaluator = Evaluator::new(&labels.gold, &labels.pred)?;
            info!(accuracy = evaluator.accuracy(), "simulated labels evaluated");
            if !cli.quiet {
                eprintln!("{evaluator}");
            }

            let output = SimulateOutput {
                seed: cli.seed,
                report: evaluator.report(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
