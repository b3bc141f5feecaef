use std::fmt;

/// Everything that can go wrong while building, training or feeding a network.
#[derive(Debug)]
pub enum NetError {
    /// Non-positive layer size, non-positive learning rate, or an unusable
    /// run configuration.
    Configuration(String),
    /// A vector (or weight matrix) whose length disagrees with the network's
    /// configured dimensions.
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    /// A dataset record that cannot be turned into a sample.
    DataFormat {
        source: String,
        line: usize,
        reason: String,
    },
    Io(std::io::Error),
    Json(serde_json::Error),
    Image(image::ImageError),
}

impl NetError {
    pub(crate) fn data_format(source: impl Into<String>, line: usize, reason: impl Into<String>) -> NetError {
        NetError::DataFormat {
            source: source.into(),
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::Configuration(msg) => write!(f, "invalid configuration: {}", msg),
            NetError::ShapeMismatch { what, expected, got } => write!(
                f,
                "shape mismatch: {} has length {}, expected {}",
                what, got, expected
            ),
            NetError::DataFormat { source, line, reason } => {
                if *line == 0 {
                    write!(f, "{}: {}", source, reason)
                } else {
                    write!(f, "{}:{}: {}", source, line, reason)
                }
            }
            NetError::Io(e) => write!(f, "i/o error: {}", e),
            NetError::Json(e) => write!(f, "json error: {}", e),
            NetError::Image(e) => write!(f, "image error: {}", e),
        }
    }
}

impl std::error::Error for NetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NetError::Io(e) => Some(e),
            NetError::Json(e) => Some(e),
            NetError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NetError {
    fn from(e: std::io::Error) -> Self {
        NetError::Io(e)
    }
}

impl From<serde_json::Error> for NetError {
    fn from(e: serde_json::Error) -> Self {
        NetError::Json(e)
    }
}

impl From<image::ImageError> for NetError {
    fn from(e: image::ImageError) -> Self {
        NetError::Image(e)
    }
}
