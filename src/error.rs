//! Error types for the llj-analysis crate.
use thiserror::Error;

/// Error type for the crate.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AnalysisError {
    /// The wind field or a profile extracted from it is structurally unusable.
    #[error("Malformed field: {0}")]
    MalformedField(FieldDefect),
    /// The jet detection configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// The specific structural problem behind an `AnalysisError::MalformedField`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FieldDefect {
    /// A variable or coordinate axis required for the analysis was not supplied.
    #[error("missing variable `{0}`")]
    MissingVariable(&'static str),
    /// The pressure levels are not strictly ordered.
    #[error("pressure levels are not strictly ordered")]
    NonMonotonicLevels,
    /// Array shapes disagree with each other or with the coordinate axes.
    #[error("array shape does not match the coordinate axes")]
    ShapeMismatch,
    /// The profile is full of missing values, cannot do analysis.
    #[error("profile is full of missing values")]
    NoDataProfile,
}

impl From<FieldDefect> for AnalysisError {
    fn from(defect: FieldDefect) -> Self {
        AnalysisError::MalformedField(defect)
    }
}

/// Shorthand for results.
pub type Result<T> = ::std::result::Result<T, AnalysisError>;
