pub mod activation;
pub mod config;
pub mod data;
pub mod error;
pub mod experiment;
pub mod loss;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use config::RunConfig;
pub use data::{DataSource, Sample};
pub use error::NetError;
pub use experiment::{Experiment, RunReport};
pub use loss::mse::MseLoss;
pub use math::matrix::Matrix;
pub use network::network::{ForwardPass, Network};
pub use network::spec::NetworkSpec;
pub use train::{evaluate, train_loop, EpochStats, Prediction, Scoreboard, TrainConfig};
