use crate::error::NetError;

/// Target value for every class except the true one.
pub const TARGET_LOW: f64 = 0.01;
/// Target value at the true class index.
pub const TARGET_HIGH: f64 = 0.99;

/// One labelled example with its pixels already scaled for the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub label: usize,
    pub inputs: Vec<f64>,
}

impl Sample {
    /// Target vector of length `output_size` for this sample's label.
    pub fn target(&self, output_size: usize) -> Result<Vec<f64>, NetError> {
        target_vector(self.label, output_size)
    }
}

/// Maps a raw intensity in [0, 255] to (0.01, 1.0]; zero never reaches the network.
pub fn scale_pixel(raw: f64) -> f64 {
    raw / 255.0 * 0.99 + 0.01
}

/// All `TARGET_LOW` except `TARGET_HIGH` at `label`.
///
/// A label with no matching output node is a `DataFormat` error.
pub fn target_vector(label: usize, output_size: usize) -> Result<Vec<f64>, NetError> {
    if label >= output_size {
        return Err(NetError::data_format(
            "sample",
            0,
            format!("label {} is out of range for {} classes", label, output_size),
        ));
    }
    let mut target = vec![TARGET_LOW; output_size];
    target[label] = TARGET_HIGH;
    Ok(target)
}
