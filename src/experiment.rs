use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::data::sample::Sample;
use crate::error::NetError;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::evaluate::{evaluate, Scoreboard};
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// Outcome of one train-then-test run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub epochs: Vec<EpochStats>,
    pub scoreboard: Scoreboard,
    pub accuracy: f64,
}

impl RunReport {
    pub fn save_json(&self, path: &Path) -> Result<(), NetError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// A configured network plus the run settings that drive it.
pub struct Experiment {
    config: RunConfig,
    network: Network,
}

impl Experiment {
    pub fn new(config: RunConfig) -> Result<Experiment, NetError> {
        config.validate()?;
        let network = config.network.build(config.seed)?;
        info!(
            "network {}-{}-{}, learning rate {}, seed {:?}",
            network.input_size(),
            network.hidden_size(),
            network.output_size(),
            network.learning_rate(),
            config.seed
        );
        Ok(Experiment { config, network })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn load_training_data(&self) -> Result<Vec<Sample>, NetError> {
        self.config
            .train_data
            .load(self.network.input_size(), self.network.output_size())
    }

    pub fn load_test_data(&self) -> Result<Vec<Sample>, NetError> {
        self.config
            .test_data
            .load(self.network.input_size(), self.network.output_size())
    }

    /// Runs the configured number of epochs over `samples`.
    pub fn train(&mut self, samples: &[Sample]) -> Result<Vec<EpochStats>, NetError> {
        train_loop(&mut self.network, samples, &TrainConfig::new(self.config.epochs))
    }

    pub fn test(&self, samples: &[Sample]) -> Result<Scoreboard, NetError> {
        evaluate(&self.network, samples)
    }

    /// Trains and tests on already-loaded data.
    pub fn run_on(&mut self, train: &[Sample], test: &[Sample]) -> Result<RunReport, NetError> {
        let epochs = self.train(train)?;
        let scoreboard = self.test(test)?;
        let accuracy = scoreboard.accuracy();
        info!("performance {} ({}/{})", accuracy, scoreboard.correct(), scoreboard.total());
        Ok(RunReport { epochs, scoreboard, accuracy })
    }

    /// Loads both datasets from their sources, trains, tests, and writes the
    /// report if the config names a path.
    pub fn run(&mut self) -> Result<RunReport, NetError> {
        let train = self.load_training_data()?;
        let test = self.load_test_data()?;
        let report = self.run_on(&train, &test)?;
        if let Some(path) = &self.config.report {
            report.save_json(path)?;
            info!("report written to {}", path.display());
        }
        Ok(report)
    }
}
