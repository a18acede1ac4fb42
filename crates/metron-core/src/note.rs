//! Note and chord value objects

use serde::{Deserialize, Serialize};

/// A single generated note
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI pitch (0-127, 60 = middle C)
    pub pitch: u8,
    /// Velocity (0-127)
    pub velocity: u8,
    /// Absolute start in ticks
    pub start_time: i64,
    /// Absolute end in ticks
    pub end_time: i64,
    /// Sounding length in ticks
    pub length: i64,
    /// Merge this note's duration into the preceding untied note
    pub tie: bool,
    /// Drop this note before tie processing
    pub muted: bool,
    /// Subdivision count for note-repeat expansion (0 = play once)
    pub repeat: u32,
    /// Repetition index that receives the merged tie length
    pub repeat_hold: u32,
    /// Start/end shift as a fraction of length
    pub delay: f64,
    /// Length multiplier applied before repeat handling
    pub length_mod: f64,
}

impl Note {
    pub fn new(pitch: u8) -> Self {
        Self {
            pitch,
            velocity: 100,
            start_time: 0,
            end_time: 0,
            length: 0,
            tie: false,
            muted: false,
            repeat: 0,
            repeat_hold: 0,
            delay: 0.0,
            length_mod: 1.0,
        }
    }

    /// Shift the pitch by `semitones`, clamped to the MIDI range.
    pub fn transpose(&mut self, semitones: i32) {
        self.pitch = (self.pitch as i32 + semitones).clamp(0, 127) as u8;
    }
}

/// A fixed grouping of notes sharing one timing window.
///
/// The first note is the lead note; its tie flag governs how the whole
/// chord participates in tie merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    /// Notes in slot order
    pub notes: Vec<Note>,
    /// Extra duration folded in by tie merging, applied at materialization
    pub tie_bonus: i64,
}

impl Chord {
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            notes,
            tie_bonus: 0,
        }
    }

    pub fn single(note: Note) -> Self {
        Self::new(vec![note])
    }

    /// The lead note, when the chord is not empty.
    pub fn lead(&self) -> Option<&Note> {
        self.notes.first()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Shift every note by `semitones`, clamped to the MIDI range.
    pub fn transpose(&mut self, semitones: i32) {
        for note in &mut self.notes {
            note.transpose(semitones);
        }
    }

    /// Shift every note by whole octaves.
    pub fn transpose_octaves(&mut self, octaves: i32) {
        self.transpose(octaves * 12);
    }
}
