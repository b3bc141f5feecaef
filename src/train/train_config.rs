/// Configuration for a `train_loop` run.
///
/// `epochs` is the number of full passes over the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainConfig {
    pub epochs: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig { epochs }
    }
}
