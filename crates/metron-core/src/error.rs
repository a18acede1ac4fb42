//! Error types for metron

use thiserror::Error;

use crate::song::PatternId;

#[derive(Debug, Error)]
pub enum MetronError {
    #[error(
        "non-positive effective tempo {denominator} for pattern {pattern_index} of clip '{clip}'"
    )]
    NonPositiveTempo {
        clip: String,
        pattern_index: usize,
        denominator: f64,
    },
    #[error("non-positive rate {rate} for pattern {pattern:?}")]
    PatternRate { pattern: PatternId, rate: f64 },
    #[error("non-positive clip rate: {0}")]
    ClipRate(f64),
    #[error("non-positive scene rate: {0}")]
    SceneRate(f64),
    #[error("slot evaluation failed: {0}")]
    Evaluation(String),
}

pub type Result<T> = std::result::Result<T, MetronError>;
