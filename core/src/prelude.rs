use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data axis of the intensity cube: time, then the two spatial axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataAxis {
    T,
    X,
    Y,
}

impl DataAxis {
    pub const ALL: [DataAxis; 3] = [DataAxis::T, DataAxis::X, DataAxis::Y];

    /// Position of the axis inside the `(t, x, y)` cube.
    pub fn index(self) -> usize {
        match self {
            DataAxis::T => 0,
            DataAxis::X => 1,
            DataAxis::Y => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DataAxis::T => "t",
            DataAxis::X => "x",
            DataAxis::Y => "y",
        }
    }
}

impl fmt::Display for DataAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataAxis {
    type Err = PlotError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "t" | "0" => Ok(DataAxis::T),
            "x" | "1" => Ok(DataAxis::X),
            "y" | "2" => Ok(DataAxis::Y),
            other => Err(PlotError::InvalidAxis(other.to_string())),
        }
    }
}

impl TryFrom<usize> for DataAxis {
    type Error = PlotError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        DataAxis::ALL
            .get(index)
            .copied()
            .ok_or_else(|| PlotError::InvalidAxis(index.to_string()))
    }
}

impl TryFrom<u8> for DataAxis {
    type Error = PlotError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        DataAxis::try_from(usize::from(index))
    }
}

/// Graph kinds understood by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    Histogram,
}

/// Common error type for building and saving figures.
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    #[error("invalid axis `{0}`: expected t, x, y or 0, 1, 2")]
    InvalidAxis(String),
    #[error("invalid color `{color}`: {reason}")]
    InvalidColor { color: String, reason: String },
    #[error("invalid color scheme: {0}")]
    InvalidColorScheme(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("data has not been loaded")]
    DataNotLoaded,
    #[error("axis {axis} has {expected} bins but {actual} ticks were provided")]
    TickCountMismatch {
        axis: DataAxis,
        expected: usize,
        actual: usize,
    },
    #[error("chose the format {format} but the file extension is {extension}")]
    ExtensionMismatch { format: String, extension: String },
    #[error("frame encoding failed: {0}")]
    Encoding(String),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type PlotResult<T> = Result<T, PlotError>;
