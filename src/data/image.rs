//! Loads labelled digit images from a directory.
//!
//! Files are picked by name (`<prefix><anything>.png`) and the label is the
//! last character of the file stem, so `test_image_3.png` is a 3. Images are
//! drawn dark-on-light, the opposite of the CSV data, so intensities are
//! inverted before scaling.
use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::DynamicImage;
use log::{debug, info};

use crate::data::sample::{scale_pixel, Sample};
use crate::error::NetError;

pub const DEFAULT_PREFIX: &str = "test_image_";

/// Loads every matching image in `dir`, sorted by file name.
pub fn load_image_dir(
    dir: &Path,
    prefix: &str,
    width: u32,
    height: u32,
    output_size: usize,
) -> Result<Vec<Sample>, NetError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| matches_pattern(path, prefix))
        .collect();
    paths.sort();

    let samples = paths
        .iter()
        .map(|path| load_image_sample(path, width, height, output_size))
        .collect::<Result<Vec<_>, _>>()?;
    info!("loaded {} images from {}", samples.len(), dir.display());
    Ok(samples)
}

/// Loads one image file and labels it from its name.
pub fn load_image_sample(path: &Path, width: u32, height: u32, output_size: usize) -> Result<Sample, NetError> {
    debug!("loading {}", path.display());
    let label = label_from_file_name(path, output_size)?;
    let img = image::open(path)?;
    Ok(Sample {
        label,
        inputs: image_to_inputs(&img, width, height),
    })
}

/// Converts an image to `width * height` scaled, inverted grayscale inputs.
///
/// Images of another size are resized first.
pub fn image_to_inputs(img: &DynamicImage, width: u32, height: u32) -> Vec<f64> {
    let gray = if img.width() == width && img.height() == height {
        img.to_luma8()
    } else {
        img.resize_exact(width, height, FilterType::Lanczos3).to_luma8()
    };
    gray.pixels()
        .map(|p| scale_pixel(255.0 - p.0[0] as f64))
        .collect()
}

/// `<prefix>` followed by at least one character, with a `.png` extension.
fn matches_pattern(path: &Path, prefix: &str) -> bool {
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext == "png");
    let stem_ok = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map_or(false, |stem| stem.len() > prefix.len() && stem.starts_with(prefix));
    is_png && stem_ok
}

fn label_from_file_name(path: &Path, output_size: usize) -> Result<usize, NetError> {
    let source = path.display().to_string();
    let last = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.chars().last())
        .ok_or_else(|| NetError::data_format(&source, 0, "file name carries no label"))?;
    let label = last
        .to_digit(10)
        .ok_or_else(|| NetError::data_format(&source, 0, format!("label '{}' is not a digit", last)))?
        as usize;
    if label >= output_size {
        return Err(NetError::data_format(
            &source,
            0,
            format!("label {} is out of range for {} classes", label, output_size),
        ));
    }
    Ok(label)
}
