//! surfrank CLI
//!
//! Ranks every page of a directory of HTML files with both estimators.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::json;
use surfrank::{corpus, Convergence, IterativeEstimator, RankConfig, Ranking, SamplingEstimator};

#[derive(Parser)]
#[command(name = "surfrank")]
#[command(author, version, about = "PageRank for a directory of HTML pages")]
struct Cli {
    /// Directory holding the .html pages
    corpus: PathBuf,

    /// Probability of following a link instead of jumping to a random page
    #[arg(long, env = "SURFRANK_DAMPING")]
    damping: Option<f64>,

    /// Number of random-surfer samples
    #[arg(long, env = "SURFRANK_SAMPLES")]
    samples: Option<usize>,

    /// Convergence tolerance of the iterative estimator
    #[arg(long, env = "SURFRANK_TOLERANCE")]
    tolerance: Option<f64>,

    /// Iteration cap of the iterative estimator
    #[arg(long, env = "SURFRANK_MAX_ITERATIONS")]
    max_iterations: Option<usize>,

    /// Seed for reproducible sampling
    #[arg(long, env = "SURFRANK_SEED")]
    seed: Option<u64>,

    /// JSON file with default options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Flags and env vars override the config file, which overrides defaults.
    fn rank_config(&self) -> Result<RankConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RankConfig::default(),
        };
        if let Some(damping) = self.damping {
            config.damping_factor = damping;
        }
        if let Some(samples) = self.samples {
            config.sample_count = samples;
        }
        if let Some(tolerance) = self.tolerance {
            config.convergence_tolerance = tolerance;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate().context("invalid ranking options")?;
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<RankConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.rank_config()?;
    let graph = corpus::crawl(&cli.corpus)
        .with_context(|| format!("failed to load corpus {}", cli.corpus.display()))?;

    let sampler = SamplingEstimator::new(config.clone())?;
    let solver = IterativeEstimator::from_config(&config)?;

    let (sampled, iterated) = rayon::join(|| sampler.run(&graph), || solver.run(&graph));
    let sampled = sampled.context("sampling failed")?;
    let iterated = iterated.context("iteration failed")?;

    match cli.format {
        OutputFormat::Text => print_text(config.sample_count, &sampled, &iterated),
        OutputFormat::Json => {
            let report = json!({
                "sampling": sampled,
                "iteration": iterated.ranking,
                "iterations": iterated.iterations,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn print_text(samples: usize, sampled: &Ranking, iterated: &Convergence) {
    println!("PageRank Results from Sampling (n = {samples})");
    for (page, rank) in sampled.iter() {
        println!("  {page}: {rank:.4}");
    }
    println!("PageRank Results from Iteration");
    for (page, rank) in iterated.ranking.iter() {
        println!("  {page}: {rank:.4}");
    }
}
