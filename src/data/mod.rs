pub mod csv;
pub mod image;
pub mod sample;
pub mod source;

pub use sample::{scale_pixel, target_vector, Sample, TARGET_HIGH, TARGET_LOW};
pub use source::DataSource;
