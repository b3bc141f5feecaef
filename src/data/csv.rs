//! Loader for the MNIST-in-CSV layout.
//!
//! Each non-blank line is one record: the class label followed by one raw
//! pixel intensity (0–255) per input, comma-separated, no header. Pixels are
//! scaled with `scale_pixel` as they are read.
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::data::sample::{scale_pixel, Sample};
use crate::error::NetError;

/// Reads and parses a CSV dataset file.
pub fn load_csv(path: &Path, input_size: usize, output_size: usize) -> Result<Vec<Sample>, NetError> {
    let text = fs::read_to_string(path)?;
    let samples = parse_csv(&text, &path.display().to_string(), input_size, output_size)?;
    info!("loaded {} records from {}", samples.len(), path.display());
    Ok(samples)
}

/// Parses CSV text into samples.
///
/// `source` names the data in error messages. Every record must carry
/// exactly `1 + input_size` fields and a label below `output_size`.
pub fn parse_csv(
    text: &str,
    source: &str,
    input_size: usize,
    output_size: usize,
) -> Result<Vec<Sample>, NetError> {
    let mut samples = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            debug!("{}:{}: skipping blank line", source, line_no);
            continue;
        }

        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells.len() != input_size + 1 {
            return Err(NetError::data_format(
                source,
                line_no,
                format!("expected {} fields (label + {} pixels), got {}", input_size + 1, input_size, cells.len()),
            ));
        }

        let label = parse_label(cells[0], output_size).map_err(|reason| NetError::data_format(source, line_no, reason))?;
        let inputs = cells[1..]
            .iter()
            .map(|cell| parse_pixel(cell))
            .collect::<Result<Vec<f64>, String>>()
            .map_err(|reason| NetError::data_format(source, line_no, reason))?;

        samples.push(Sample { label, inputs });
    }

    Ok(samples)
}

fn parse_label(cell: &str, output_size: usize) -> Result<usize, String> {
    let label: usize = cell
        .parse()
        .map_err(|_| format!("label '{}' is not a non-negative integer", cell))?;
    if label >= output_size {
        return Err(format!("label {} is out of range for {} classes", label, output_size));
    }
    Ok(label)
}

fn parse_pixel(cell: &str) -> Result<f64, String> {
    let raw: f64 = cell
        .parse()
        .map_err(|_| format!("pixel '{}' is not a number", cell))?;
    if !(0.0..=255.0).contains(&raw) {
        return Err(format!("pixel {} is outside 0..=255", raw));
    }
    Ok(scale_pixel(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_and_scales_pixels() {
        let samples = parse_csv("7,0,255,51\n\n2, 102 ,0,0\n", "mem", 3, 10).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].label, 7);
        assert_eq!(samples[0].inputs[0], 0.01);
        assert!((samples[0].inputs[1] - 1.0).abs() < 1e-12);
        assert!((samples[0].inputs[2] - 0.208).abs() < 1e-12);
        assert_eq!(samples[1].label, 2);
    }

    #[test]
    fn wrong_field_count_is_reported_with_line() {
        match parse_csv("1,0,0,0\n1,0,0\n", "mem", 3, 10) {
            Err(NetError::DataFormat { line: 2, reason, .. }) => assert!(reason.contains("expected 4 fields")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn non_numeric_label_and_pixel_are_rejected() {
        assert!(matches!(parse_csv("x,0,0\n", "mem", 2, 10), Err(NetError::DataFormat { line: 1, .. })));
        assert!(matches!(parse_csv("3,0,abc\n", "mem", 2, 10), Err(NetError::DataFormat { line: 1, .. })));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(parse_csv("10,0,0\n", "mem", 2, 10), Err(NetError::DataFormat { .. })));
        assert!(matches!(parse_csv("1,0,256\n", "mem", 2, 10), Err(NetError::DataFormat { .. })));
        assert!(matches!(parse_csv("1,-1,0\n", "mem", 2, 10), Err(NetError::DataFormat { .. })));
    }

    #[test]
    fn load_csv_reports_missing_file_as_io() {
        let path = Path::new("definitely/not/here.csv");
        assert!(matches!(load_csv(path, 784, 10), Err(NetError::Io(_))));
    }
}
