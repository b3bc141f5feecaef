use serde::{Deserialize, Serialize};

/// Statistics for one completed pass over the training data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean over all records of the squared error between output and target,
    /// measured on the forward pass that preceded each update.
    pub mean_squared_error: f64,
    pub records: usize,
    pub elapsed_ms: u64,
}
