use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::source::DataSource;
use crate::error::NetError;
use crate::network::spec::NetworkSpec;

/// Everything the driver needs for one train-then-test run.
///
/// Missing fields in a JSON file take the defaults below, which reproduce the
/// classic setup: 784-200-10 network, learning rate 0.2, two epochs over the
/// 100-record MNIST sample, scored on the 10-record test sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub network: NetworkSpec,
    pub epochs: usize,
    pub train_data: DataSource,
    pub test_data: DataSource,
    /// Fixes the initial weights; `None` draws them from the thread RNG.
    pub seed: Option<u64>,
    /// Where to write the JSON run report, if anywhere.
    pub report: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            network: NetworkSpec::default(),
            epochs: 2,
            train_data: DataSource::csv("mnist_dataset/mnist_train_100.csv"),
            test_data: DataSource::csv("mnist_dataset/mnist_test_10.csv"),
            seed: None,
            report: None,
        }
    }
}

impl RunConfig {
    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> Result<(), NetError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads a config written by `save_json` (or by hand) and validates it.
    pub fn load_json(path: &Path) -> Result<RunConfig, NetError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: RunConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the run settings. Layer sizes and the learning rate are checked
    /// by `NetworkSpec::build` when the network is created.
    pub fn validate(&self) -> Result<(), NetError> {
        if self.epochs == 0 {
            return Err(NetError::Configuration("epochs must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_classic_run() {
        let config = RunConfig::default();
        assert_eq!(config.epochs, 2);
        assert_eq!(config.network, NetworkSpec::default());
        assert_eq!(config.train_data, DataSource::csv("mnist_dataset/mnist_train_100.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("digit-net-config-{}.json", std::process::id()));
        let config = RunConfig {
            epochs: 5,
            seed: Some(99),
            test_data: DataSource::images("images"),
            ..RunConfig::default()
        };
        config.save_json(&path).unwrap();
        assert_eq!(RunConfig::load_json(&path).unwrap(), config);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: RunConfig = serde_json::from_str(r#"{ "epochs": 4, "network": { "hidden_size": 50 } }"#).unwrap();
        assert_eq!(config.epochs, 4);
        assert_eq!(config.network.hidden_size, 50);
        assert_eq!(config.network.input_size, 784);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn zero_epochs_is_a_configuration_error() {
        let config = RunConfig { epochs: 0, ..RunConfig::default() };
        assert!(matches!(config.validate(), Err(NetError::Configuration(_))));
    }
}
