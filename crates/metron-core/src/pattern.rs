//! Patterns: ordered slot expressions defining one playback cycle

use serde::{Deserialize, Serialize};

use crate::expr::SlotExpr;
use crate::scale::Scale;
use crate::song::PatternId;

/// An ordered sequence of slot expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub id: PatternId,
    /// Slot expressions in playback order
    pub slots: Vec<SlotExpr>,
    /// Local rate multiplier; must stay strictly positive
    pub rate: f64,
    /// Fixed scale, taking precedence over scene and song scales
    pub scale: Option<Scale>,
    /// Octave shift for every produced note; when unset, the track's
    /// per-pattern lookup applies
    pub octave: Option<i32>,
}

impl Pattern {
    pub fn new(id: PatternId, slots: Vec<SlotExpr>) -> Self {
        Self {
            id,
            slots,
            rate: 1.0,
            scale: None,
            octave: None,
        }
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_octave(mut self, octave: i32) -> Self {
        self.octave = Some(octave);
        self
    }

    /// Number of slots in one playback cycle
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
