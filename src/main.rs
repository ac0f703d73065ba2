//! CoT Analysis CLI

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cot_analysis::{
    analysis::analyze,
    config::Config,
    curation::curate_balanced_dataset,
    lexicon::Lexicon,
    records::{load_records_from_file, Record},
    reporting::{print_console_report, print_curation_stats, JsonSummary},
};

#[derive(Parser)]
#[command(name = "cot-analysis")]
#[command(about = "Backtracking analysis and balanced dataset curation for CoT math transcripts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON results file and print the report
    Analyze {
        /// Path to the JSON file with CoT results
        input: PathBuf,

        /// Maximum backtracking samples to print (overrides config)
        #[arg(long)]
        samples: Option<usize>,

        /// Write a JSON summary of the report to this path
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Curate a balanced backtracking vs. non-backtracking dataset
    Curate {
        /// Input JSON results files (merged in argument order)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output path for the curated dataset
        #[arg(short, long)]
        output: PathBuf,

        /// Target dataset size (overrides config)
        #[arg(short = 'n', long)]
        size: Option<usize>,

        /// Random seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate a sample configuration file
    InitConfig {
        /// Output path for the configuration file
        #[arg(short, long, default_value = "config/analysis.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("cot_analysis=debug,info")
    } else {
        EnvFilter::new("cot_analysis=info,warn")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            input,
            samples,
            summary,
        } => {
            run_analysis(&config, input, samples, summary)?;
        }

        Commands::Curate {
            inputs,
            output,
            size,
            seed,
        } => {
            run_curation(&config, inputs, output, size, seed)?;
        }

        Commands::InitConfig { output } => {
            init_config(output)?;
        }
    }

    Ok(())
}

fn run_analysis(
    config: &Config,
    input: PathBuf,
    samples: Option<usize>,
    summary: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let lexicon = Lexicon::with_extra(&config.extra_phrases);
    let records = load_records_from_file(&input)?;

    let report = analyze(&lexicon, &records);
    let sample_limit = samples.unwrap_or(config.report.sample_limit);
    print_console_report(&report, sample_limit);

    if let Some(path) = summary {
        JsonSummary::new(report).write_to_file(&path)?;
        println!("JSON summary written to: {}", path.display());
    }

    Ok(())
}

fn run_curation(
    config: &Config,
    inputs: Vec<PathBuf>,
    output: PathBuf,
    size: Option<usize>,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let lexicon = Lexicon::with_extra(&config.extra_phrases);
    let size = size.unwrap_or(config.curation.dataset_size);
    let seed = seed.unwrap_or(config.curation.seed);

    let mut pools: Vec<Vec<Record>> = Vec::with_capacity(inputs.len());
    for input in &inputs {
        pools.push(load_records_from_file(input)?);
    }

    let stats = curate_balanced_dataset(&lexicon, pools, &output, size, seed)?;
    print_curation_stats(&stats);
    println!("Curated dataset written to: {}", output.display());

    Ok(())
}

fn init_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    config.save_toml(&output)?;
    println!("Configuration written to: {}", output.display());
    Ok(())
}
