use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use digit_net::{DataSource, Experiment, RunConfig};

/// Trains a 784-200-10 digit classifier on a CSV dataset and reports its
/// accuracy on a held-out set.
///
/// Settings come from the defaults, then `--config`, then the flags below.
/// Set RUST_LOG=info (or debug) for progress logging.
#[derive(Parser, Debug)]
#[command(name = "digit-net", version)]
struct Cli {
    /// JSON run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Training data (MNIST CSV)
    #[arg(long)]
    train: Option<PathBuf>,

    /// Test data (MNIST CSV)
    #[arg(long, conflicts_with = "images")]
    test: Option<PathBuf>,

    /// Test on a directory of test_image_<label>.png files instead of a CSV
    #[arg(long)]
    images: Option<PathBuf>,

    #[arg(long)]
    epochs: Option<usize>,

    /// Hidden layer size
    #[arg(long)]
    hidden: Option<usize>,

    #[arg(long)]
    learning_rate: Option<f64>,

    /// Seed for the initial weights
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON report of the run here
    #[arg(long)]
    report: Option<PathBuf>,

    /// Only print the final performance line
    #[arg(long, short)]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> Result<(RunConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load_json(path)
                .with_context(|| format!("cannot load config '{}'", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(path) = self.train {
            config.train_data = DataSource::csv(path);
        }
        if let Some(path) = self.test {
            config.test_data = DataSource::csv(path);
        }
        if let Some(dir) = self.images {
            config.test_data = DataSource::images(dir);
        }
        if let Some(epochs) = self.epochs {
            config.epochs = epochs;
        }
        if let Some(hidden) = self.hidden {
            config.network.hidden_size = hidden;
        }
        if let Some(lr) = self.learning_rate {
            config.network.learning_rate = lr;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.report.is_some() {
            config.report = self.report;
        }
        Ok((config, self.quiet))
    }
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let (config, quiet) = Cli::parse().into_config()?;
    let mut experiment = Experiment::new(config).context("invalid run configuration")?;

    let report = experiment.run().context("run failed")?;

    if !quiet {
        for prediction in &report.scoreboard.predictions {
            println!("{} correct label", prediction.actual);
            println!("{} network's answer", prediction.predicted);
        }
    }
    println!("performance = {}", report.accuracy);

    Ok(())
}
