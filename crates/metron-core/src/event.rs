//! Final playback events

use serde::{Deserialize, Serialize};

use crate::note::Chord;

/// Kind of a playback event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    NoteOn,
}

/// Flattened, absolute-time unit handed to the playback engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    /// Absolute time in ticks
    pub time: i64,
    pub chord: Chord,
}

impl Event {
    pub fn note_on(time: i64, chord: Chord) -> Self {
        Self {
            kind: EventKind::NoteOn,
            time,
            chord,
        }
    }
}
