//! Error types for srs-core.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias using SrsError.
pub type Result<T> = std::result::Result<T, SrsError>;

/// Contract violations detected at the engine boundary.
///
/// None of these are recoverable scheduling outcomes: they mean the caller
/// handed the engine state it should never have produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SrsError {
    #[error("invalid stage ordinal {value} (expected 0-9)")]
    InvalidStage { value: u8 },

    #[error("invalid ease factor {value}")]
    InvalidEaseFactor { value: f64 },

    #[error("invalid stage table at stage {stage}: {reason}")]
    InvalidStageTable { stage: u8, reason: &'static str },

    #[error("invalid review setting {field}: {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error("next review after {now} is out of range")]
    ScheduleOverflow { now: DateTime<Utc> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_stage() {
        let error = SrsError::InvalidStage { value: 12 };
        assert_eq!(error.to_string(), "invalid stage ordinal 12 (expected 0-9)");
    }

    #[test]
    fn test_error_display_invalid_ease() {
        let error = SrsError::InvalidEaseFactor { value: -0.5 };
        assert_eq!(error.to_string(), "invalid ease factor -0.5");
    }

    #[test]
    fn test_error_display_invalid_table() {
        let error = SrsError::InvalidStageTable {
            stage: 9,
            reason: "terminal stage must have a zero interval",
        };
        assert_eq!(
            error.to_string(),
            "invalid stage table at stage 9: terminal stage must have a zero interval"
        );
    }

    #[test]
    fn test_error_display_invalid_config() {
        let error = SrsError::InvalidConfig {
            field: "minimum_ease",
            value: 0.5,
        };
        assert_eq!(error.to_string(), "invalid review setting minimum_ease: 0.5");
    }
}
