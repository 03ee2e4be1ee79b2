use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use dev_alias::{run, ResolverConfig, SimilarityMetric};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MetricArg {
    Indel,
    Levenshtein,
    JaroWinkler,
}

impl From<MetricArg> for SimilarityMetric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Indel => SimilarityMetric::Indel,
            MetricArg::Levenshtein => SimilarityMetric::Levenshtein,
            MetricArg::JaroWinkler => SimilarityMetric::JaroWinkler,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "dev-alias",
    version,
    about = "Compute developer similarity pairs from an existing CSV (default) or a Git repository.",
    after_help = "CSV files are read from and written to the output directory: <file>.csv, <file>_similarity.csv, <file>_similarity_t=<t>.csv"
)]
struct Cli {
    #[arg(short, long, help = "Similarity threshold in [0, 1] (default: 0.7)")]
    threshold: Option<f64>,

    #[arg(short, long, value_name = "PREFIX", help = "File name prefix for input and output CSVs (default: devs)")]
    file: Option<String>,

    #[arg(short, long, value_name = "URL_OR_PATH", help = "Git repository to mine before classifying")]
    repo: Option<String>,

    #[arg(short, long, value_name = "DIR", help = "Directory for CSV files (default: alias-data)")]
    output_dir: Option<PathBuf>,

    #[arg(short, long, value_enum, help = "String similarity metric (default: indel)")]
    metric: Option<MetricArg>,

    #[arg(long, value_name = "JSON", help = "Load settings from a JSON file, flags override it")]
    config: Option<PathBuf>,

    #[arg(long, help = "Do not write the unfiltered all-pairs table")]
    skip_all_pairs: bool,
}

impl Cli {
    fn into_config(self) -> Result<ResolverConfig> {
        let mut config = match &self.config {
            Some(path) => ResolverConfig::from_file(path)?,
            None => ResolverConfig::default(),
        };

        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(file) = self.file {
            config.input = file;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(metric) = self.metric {
            config.metric = metric.into();
        }
        if self.repo.is_some() {
            config.repo = self.repo;
        }
        if self.skip_all_pairs {
            config.save_all_pairs = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config()?;
    let summary = run(&config)?;

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ {}", summary.summary());
    if let Some(path) = &summary.all_pairs_path {
        println!("  all pairs:  {}", path.display());
    }
    println!("  duplicates: {}", summary.duplicates_path.display());

    Ok(())
}
