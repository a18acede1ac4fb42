//! Scales, modes, and chord interval tables

use serde::{Deserialize, Serialize};

use crate::note::Note;

/// Scale/mode types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMode {
    Major,
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    HarmonicMinor,
    MelodicMinor,
    Pentatonic,
    Blues,
    Chromatic,
}

impl ScaleMode {
    /// Get scale intervals (semitones from root)
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            Self::Major => &[0, 2, 4, 5, 7, 9, 11],
            Self::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Self::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Self::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Self::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Self::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Self::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            Self::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            Self::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            Self::Pentatonic => &[0, 2, 4, 7, 9],
            Self::Blues => &[0, 3, 5, 6, 7, 10],
            Self::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Minor => "Minor",
            Self::Dorian => "Dorian",
            Self::Phrygian => "Phrygian",
            Self::Lydian => "Lydian",
            Self::Mixolydian => "Mixolydian",
            Self::Locrian => "Locrian",
            Self::HarmonicMinor => "Harmonic Minor",
            Self::MelodicMinor => "Melodic Minor",
            Self::Pentatonic => "Pentatonic",
            Self::Blues => "Blues",
            Self::Chromatic => "Chromatic",
        }
    }
}

/// Chord quality for stacked slot expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Major7,
    Minor7,
    Dominant7,
    Sus2,
    Sus4,
}

impl ChordQuality {
    /// Get chord intervals from root
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            Self::Major => &[0, 4, 7],
            Self::Minor => &[0, 3, 7],
            Self::Diminished => &[0, 3, 6],
            Self::Augmented => &[0, 4, 8],
            Self::Major7 => &[0, 4, 7, 11],
            Self::Minor7 => &[0, 3, 7, 10],
            Self::Dominant7 => &[0, 4, 7, 10],
            Self::Sus2 => &[0, 2, 7],
            Self::Sus4 => &[0, 5, 7],
        }
    }
}

/// A pitch space: a root pitch plus a mode's interval table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    /// Root MIDI pitch (60 = middle C)
    pub root: u8,
    pub mode: ScaleMode,
}

impl Scale {
    pub fn new(root: u8, mode: ScaleMode) -> Self {
        Self { root, mode }
    }

    /// The fallback scale when no scope defines one.
    pub fn chromatic(root: u8) -> Self {
        Self::new(root, ScaleMode::Chromatic)
    }

    /// The root of the scale as a fresh, untimed note.
    pub fn root_note(&self) -> Note {
        Note::new(self.root)
    }

    /// MIDI pitch for a signed scale degree, wrapping through octaves.
    ///
    /// Degree 0 is the root; negative degrees descend below it.
    pub fn degree_pitch(&self, degree: i32) -> u8 {
        let intervals = self.mode.intervals();
        let span = intervals.len() as i32;
        let octave = degree.div_euclid(span);
        let index = degree.rem_euclid(span) as usize;
        let pitch = self.root as i32 + octave * 12 + intervals[index] as i32;
        pitch.clamp(0, 127) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_pitch_walks_the_mode() {
        // C major: C D E F G A B
        let scale = Scale::new(60, ScaleMode::Major);
        assert_eq!(scale.degree_pitch(0), 60); // C
        assert_eq!(scale.degree_pitch(2), 64); // E
        assert_eq!(scale.degree_pitch(4), 67); // G
    }

    #[test]
    fn degree_pitch_wraps_octaves() {
        let scale = Scale::new(60, ScaleMode::Major);
        assert_eq!(scale.degree_pitch(7), 72); // C one octave up
        assert_eq!(scale.degree_pitch(-1), 59); // B below the root
        assert_eq!(scale.degree_pitch(-7), 48); // C one octave down
    }

    #[test]
    fn chromatic_degrees_are_semitones() {
        let scale = Scale::chromatic(60);
        assert_eq!(scale.degree_pitch(1), 61);
        assert_eq!(scale.degree_pitch(12), 72);
    }

    #[test]
    fn degree_pitch_clamps_to_midi_range() {
        let scale = Scale::chromatic(120);
        assert_eq!(scale.degree_pitch(100), 127);
    }
}
