//! External collaborators: song, scene, and track bindings

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scale::Scale;

/// Unique identifier for clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipId(pub u64);

/// Unique identifier for patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternId(pub u64);

/// Unique identifier for tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub u64);

/// Song-level playback settings, read fresh at every generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Tempo in BPM
    pub tempo: f64,
    /// Song-wide scale, lowest priority in scale resolution
    pub scale: Option<Scale>,
}

impl Default for Song {
    fn default() -> Self {
        Self {
            tempo: 120.0,
            scale: None,
        }
    }
}

impl Song {
    pub fn new(tempo: f64) -> Self {
        Self {
            tempo,
            ..Default::default()
        }
    }
}

/// Scene-level settings shared by the clips playing in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Scene scale, taking precedence over the song scale
    pub scale: Option<Scale>,
    /// Rate multiplier folded into slot timing
    pub rate: f64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            scale: None,
            rate: 1.0,
        }
    }
}

/// A track binding: per-pattern octave shifts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    /// Octave shift assignments (pattern id -> octaves)
    octave_shifts: HashMap<u64, i32>,
}

impl Track {
    pub fn new(id: TrackId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            octave_shifts: HashMap::new(),
        }
    }

    /// Assign an octave shift for a pattern
    pub fn set_octave_shift(&mut self, pattern: PatternId, octaves: i32) {
        self.octave_shifts.insert(pattern.0, octaves);
    }

    /// Octave shift for a pattern (defaults to 0)
    pub fn octave_shift(&self, pattern: PatternId) -> i32 {
        self.octave_shifts.get(&pattern.0).copied().unwrap_or(0)
    }
}
