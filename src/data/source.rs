use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data::csv::load_csv;
use crate::data::image::{load_image_dir, DEFAULT_PREFIX};
use crate::data::sample::Sample;
use crate::error::NetError;

/// Where a dataset comes from. Every variant yields the same `Sample`s, so
/// the driver picks one and the network never knows the difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataSource {
    /// MNIST-in-CSV file: label followed by raw pixels on each line.
    Csv { path: PathBuf },
    /// Directory of `<prefix>*.png` files labelled by the last character of
    /// their name.
    Images {
        dir: PathBuf,
        #[serde(default = "default_prefix")]
        prefix: String,
        #[serde(default = "default_side")]
        width: u32,
        #[serde(default = "default_side")]
        height: u32,
    },
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_side() -> u32 {
    28
}

impl DataSource {
    pub fn csv(path: impl Into<PathBuf>) -> DataSource {
        DataSource::Csv { path: path.into() }
    }

    /// 28x28 images named `test_image_*.png` in `dir`.
    pub fn images(dir: impl Into<PathBuf>) -> DataSource {
        DataSource::Images {
            dir: dir.into(),
            prefix: default_prefix(),
            width: default_side(),
            height: default_side(),
        }
    }

    /// Loads every sample, checking each against the network's dimensions.
    pub fn load(&self, input_size: usize, output_size: usize) -> Result<Vec<Sample>, NetError> {
        match self {
            DataSource::Csv { path } => load_csv(path, input_size, output_size),
            DataSource::Images { dir, prefix, width, height } => {
                let pixels = *width as usize * *height as usize;
                if pixels != input_size {
                    return Err(NetError::Configuration(format!(
                        "{}x{} images give {} inputs but the network expects {}",
                        width, height, pixels, input_size
                    )));
                }
                load_image_dir(dir, prefix, *width, *height, output_size)
            }
        }
    }
}
