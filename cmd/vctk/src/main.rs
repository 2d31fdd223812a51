//! vctk - prepares the VCTK corpus for speaker-conditioned training.
//!
//! Segments every roster speaker's recordings into ~5 second mono clips,
//! then writes shuffled `path|label` train and validation lists.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use voxprep_cli::{Output, OutputFormat, Overrides, PrepConfig, Summary, load_config};
use voxprep_corpus::{manifest, pipeline};

/// Which parts of the preparation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Stage {
    /// Segment the corpus, then write the manifests.
    All,
    /// Only segment the corpus.
    Segment,
    /// Only write the manifests from existing segments.
    Manifest,
}

/// Segments the VCTK corpus and writes train/validation manifests.
#[derive(Parser)]
#[command(name = "vctk")]
#[command(about = "VCTK corpus preparation tool")]
#[command(version)]
struct Cli {
    /// Base directory [default: ./]
    #[arg(short = 'b', long = "base_dir", alias = "base-dir")]
    base_dir: Option<PathBuf>,

    /// Corpus folder under the base directory [default: VCTK-Corpus]
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Sample rate of the exported segments [default: 24000]
    #[arg(short = 's', long = "sampling_rate", alias = "sampling-rate")]
    sampling_rate: Option<u32>,

    /// Segment folder under the base directory [default: Data]
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Settings file (YAML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Manifest shuffle seed [default: 1234]
    #[arg(long)]
    seed: Option<u64>,

    /// Share of segments in the validation list [default: 0.1]
    #[arg(long)]
    split: Option<f64>,

    /// Stage to run
    #[arg(long, value_enum, default_value_t = Stage::All)]
    stage: Stage,

    /// Skip any speaker whose output folder exists, finished or not
    #[arg(long)]
    trust_existing: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Write the summary to this file instead of stdout
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            base_dir: self.base_dir.clone(),
            input: self.input.clone(),
            output: self.output.clone(),
            sampling_rate: self.sampling_rate,
            seed: self.seed,
            split_fraction: self.split,
            trust_existing: self.trust_existing,
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut cfg = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PrepConfig::default(),
    };
    cfg.apply(cli.overrides());

    let input_dir = cfg.input_dir();
    let output_dir = cfg.output_dir();
    let progress = std::io::stderr().is_terminal();
    let mut summary = Summary::new(&input_dir, &output_dir, cfg.sampling_rate);

    if matches!(cli.stage, Stage::All | Stage::Segment) {
        info!("Downsampling files...");
        let opts = cfg.pipeline_options(progress);
        let report = pipeline::run(&cfg.speakers, &input_dir, &output_dir, &opts)
            .with_context(|| format!("segmenting {}", input_dir.display()))?;
        summary.segmentation = Some(report);
    }

    if matches!(cli.stage, Stage::All | Stage::Manifest) {
        info!("Creating train/test files...");
        let opts = cfg.manifest_options(progress);
        let report = manifest::build(&output_dir, &cfg.speakers, &opts)
            .with_context(|| format!("writing manifests in {}", output_dir.display()))?;
        summary.manifest = Some(report);
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Yaml
    };
    Output::new(format, cli.summary.clone()).write(&summary)
}
