use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::sample::Sample;
use crate::error::NetError;
use crate::network::network::Network;

/// The network's answer for one test record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub actual: usize,
    pub predicted: usize,
}

impl Prediction {
    pub fn is_correct(&self) -> bool {
        self.actual == self.predicted
    }
}

/// Tally of per-record predictions, in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub predictions: Vec<Prediction>,
}

impl Scoreboard {
    pub fn record(&mut self, prediction: Prediction) {
        self.predictions.push(prediction);
    }

    pub fn correct(&self) -> usize {
        self.predictions.iter().filter(|p| p.is_correct()).count()
    }

    pub fn total(&self) -> usize {
        self.predictions.len()
    }

    /// Fraction of correct answers in [0, 1]; 0 when nothing was scored.
    pub fn accuracy(&self) -> f64 {
        if self.predictions.is_empty() {
            return 0.0;
        }
        self.correct() as f64 / self.total() as f64
    }
}

/// Queries the network once per sample and scores arg-max against the label.
pub fn evaluate(network: &Network, samples: &[Sample]) -> Result<Scoreboard, NetError> {
    let mut scoreboard = Scoreboard::default();
    for sample in samples {
        let output = network.query(&sample.inputs)?;
        let prediction = Prediction {
            actual: sample.label,
            predicted: argmax(&output),
        };
        debug!("label {} -> network answer {}", prediction.actual, prediction.predicted);
        scoreboard.record(prediction);
    }
    Ok(scoreboard)
}

/// Index of the largest element; the first one wins ties.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &x)| match best {
            Some((_, b)) if b >= x => best,
            _ => Some((i, x)),
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}
