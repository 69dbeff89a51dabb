/// Convenience result type used across drumview.
pub type DrumviewResult<T> = Result<T, DrumviewError>;

/// Top-level error taxonomy used by the frame preparation and rendering APIs.
#[derive(thiserror::Error, Debug)]
pub enum DrumviewError {
    /// Missing or unreadable particle file, empty data set, or a malformed numeric field.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// A geometric reduction was asked to operate on zero positions.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Camera position and target coincide, so no look direction exists.
    #[error("degenerate direction: {0}")]
    DegenerateDirection(String),

    /// Invalid run configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing mesh file or a renderer output that could not be written.
    #[error("asset error: {0}")]
    Asset(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DrumviewError {
    /// Build a [`DrumviewError::DataFormat`] value.
    pub fn data_format(msg: impl Into<String>) -> Self {
        Self::DataFormat(msg.into())
    }

    /// Build a [`DrumviewError::EmptyInput`] value.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Build a [`DrumviewError::DegenerateDirection`] value.
    pub fn degenerate_direction(msg: impl Into<String>) -> Self {
        Self::DegenerateDirection(msg.into())
    }

    /// Build a [`DrumviewError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DrumviewError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Stable, machine-friendly name of the error kind, used in per-frame failure logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DataFormat(_) => "data_format",
            Self::EmptyInput(_) => "empty_input",
            Self::DegenerateDirection(_) => "degenerate_direction",
            Self::Validation(_) => "validation",
            Self::Asset(_) => "asset",
            Self::Other(_) => "other",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
