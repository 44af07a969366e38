// File: crates/screener-chart/src/error.rs
// Summary: Error type shared by dataset decoding and the raster pipeline.

use std::fmt;

use thiserror::Error;

/// Result alias for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Which input dataset a record came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Instruments drawn as bars.
    Screened,
    /// Comparison population used for the reference average.
    Universe,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Screened => f.write_str("screened"),
            Self::Universe => f.write_str("universe"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    /// A record lacks its identifying fields (`ticker`, `sector`) or is not a record at all.
    #[error("malformed {dataset} record at index {index}: {reason}")]
    MalformedInput {
        dataset: DatasetKind,
        index: usize,
        reason: String,
    },

    /// The payload as a whole is not a list of records.
    #[error("{dataset} data is not a list of records: {reason}")]
    InvalidDataset { dataset: DatasetKind, reason: String },

    #[error("failed to parse {dataset} JSON: {source}")]
    Json {
        dataset: DatasetKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {dataset} CSV: {source}")]
    Csv {
        dataset: DatasetKind,
        #[source]
        source: csv::Error,
    },

    #[error("failed to create raster surface ({width}x{height})")]
    Surface { width: i32, height: i32 },

    #[error("failed to read back rendered pixels")]
    ReadPixels,

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

impl ChartError {
    pub(crate) fn malformed(dataset: DatasetKind, index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput { dataset, index, reason: reason.into() }
    }

    /// Position of the offending record, when the error points at one.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            Self::MalformedInput { index, .. } => Some(*index),
            _ => None,
        }
    }
}
