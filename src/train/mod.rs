pub mod epoch_stats;
pub mod evaluate;
pub mod loop_fn;
pub mod train_config;

pub use epoch_stats::EpochStats;
pub use evaluate::{argmax, evaluate, Prediction, Scoreboard};
pub use loop_fn::train_loop;
pub use train_config::TrainConfig;
