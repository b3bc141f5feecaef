use serde::{Deserialize, Serialize};

use crate::error::NetError;
use crate::network::network::Network;

/// Serializable description of a network's shape and learning rate.
///
/// Fields:
/// - `input_size`    — pixels per sample (784 for 28x28 digits)
/// - `hidden_size`   — nodes in the single hidden layer
/// - `output_size`   — number of classes
/// - `learning_rate` — step size used by every `train` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSpec {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub learning_rate: f64,
}

impl Default for NetworkSpec {
    fn default() -> Self {
        NetworkSpec {
            input_size: 784,
            hidden_size: 200,
            output_size: 10,
            learning_rate: 0.2,
        }
    }
}

impl NetworkSpec {
    /// Builds a network with thread-local randomness, or from `seed` when given.
    pub fn build(&self, seed: Option<u64>) -> Result<Network, NetError> {
        match seed {
            Some(seed) => Network::with_seed(
                self.input_size,
                self.hidden_size,
                self.output_size,
                self.learning_rate,
                seed,
            ),
            None => Network::new(
                self.input_size,
                self.hidden_size,
                self.output_size,
                self.learning_rate,
            ),
        }
    }
}
