//! Error types for the game core

use thiserror::Error;

/// Errors surfaced while entering a mode or talking to the platform.
///
/// The simulation itself never fails; only construction and I/O can.
#[derive(Debug, Error)]
pub enum PongError {
    /// A collaborator could not provide an image, font or sound
    #[error("failed to load {kind} asset: {name}")]
    Asset { kind: &'static str, name: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Display or audio backend failure
    #[error("platform error: {0}")]
    Platform(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PongError {
    pub fn asset(kind: &'static str, name: impl Into<String>) -> Self {
        PongError::Asset {
            kind,
            name: name.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PongError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_message() {
        let err = PongError::asset("sound", "hit");
        assert_eq!(err.to_string(), "failed to load sound asset: hit");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PongError = io.into();
        assert!(matches!(err, PongError::Io(_)));
    }
}
