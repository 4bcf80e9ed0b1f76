use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreqError {
    #[error("Invalid image shape: {rows}x{cols}")]
    InvalidShape { rows: usize, cols: usize },

    #[error("Ragged image rows: row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Invalid kernel: {0}")]
    InvalidKernel(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No usable stars detected above threshold {threshold}")]
    NoStarsDetected { threshold: f32 },

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, FreqError>;
