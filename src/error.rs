//! Error types and result utilities for plot composition.
//!
//! Most failure modes of the engine are recoverable and never surface as an
//! `Err`: malformed input is reported through [`crate::Diagnostics`] and either
//! skipped or turns the layout into a no-op. The variants below cover the few
//! conditions that abort the generation of one artifact.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience type alias for results that may contain a [`PlotError`].
pub type PlotResult<T> = Result<T, PlotError>;

/// Error types that can occur while generating colors or persisting a canvas.
#[derive(Error, Debug)]
pub enum PlotError {
    /// Writing the output file (or creating its parent directory) failed.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The drawing backend reported an error while painting the canvas.
    #[error("Render error: {0}")]
    Render(String),

    /// The output file extension does not name a supported format.
    #[error("Unsupported output format '{extension}' for {path}")]
    UnsupportedFormat {
        /// Offending extension (may be empty).
        extension: String,
        /// Requested output path.
        path: PathBuf,
    },

    /// A color gradient was requested with a stop list that does not match its endpoints.
    #[error("Number of gradient stops ({stops}) does not match number of colors ({colors})")]
    GradientStops {
        /// Number of stops given.
        stops: usize,
        /// Number of color endpoints given.
        colors: usize,
    },

    /// Invalid parameters were provided to an operation.
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the parameter.
        parameter: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A style configuration could not be (de)serialized.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl PlotError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PlotError::GradientStops {
            stops: 2,
            colors: 3,
        };
        assert_eq!(
            err.to_string(),
            "Number of gradient stops (2) does not match number of colors (3)"
        );

        let err = PlotError::invalid_parameter("n_points", "must be > 0");
        assert_eq!(err.to_string(), "Invalid parameter 'n_points': must be > 0");
    }
}
