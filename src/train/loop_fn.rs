use std::time::Instant;

use log::info;

use crate::data::sample::Sample;
use crate::error::NetError;
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Trains `network` for `config.epochs` epochs, one `train` call per sample
/// in dataset order, and returns the statistics of every epoch.
///
/// Stops at the first sample that does not fit the network; updates already
/// applied are kept.
pub fn train_loop(
    network: &mut Network,
    samples: &[Sample],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>, NetError> {
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let mean_squared_error = run_one_epoch(network, samples)?;

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            mean_squared_error,
            records: samples.len(),
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            "epoch {}/{}: mse {:.6} over {} records ({} ms)",
            stats.epoch, stats.total_epochs, stats.mean_squared_error, stats.records, stats.elapsed_ms
        );
        history.push(stats);
    }

    Ok(history)
}

/// One pass over `samples`; returns the mean pre-update squared error.
fn run_one_epoch(network: &mut Network, samples: &[Sample]) -> Result<f64, NetError> {
    if samples.is_empty() {
        return Ok(0.0);
    }

    let output_size = network.output_size();
    let mut total_loss = 0.0;
    for sample in samples {
        let target = sample.target(output_size)?;
        let output = network.train_step(&sample.inputs, &target)?;
        total_loss += MseLoss::loss(&output, &target);
    }
    Ok(total_loss / samples.len() as f64)
}
