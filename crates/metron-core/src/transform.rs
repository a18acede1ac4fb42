//! Chord-list transforms applied after pattern generation

use serde::{Deserialize, Serialize};

use crate::note::Chord;
use crate::pattern::Pattern;
use crate::scale::Scale;
use crate::song::{Song, Track};

/// Arguments handed to a transform invocation.
#[derive(Debug, Clone, Copy)]
pub struct TransformArgs<'a> {
    pub song: &'a Song,
    pub pattern: &'a Pattern,
    pub scale: &'a Scale,
    pub track: &'a Track,
    /// Absolute start of the pattern's window in ticks
    pub t_start: i64,
    /// Width of one slot in ticks
    pub slot_duration: i64,
}

/// Capability interface for rewriting a generated chord list.
///
/// Implementations may reorder, split, or filter entries but must keep one
/// entry per original-or-derived sub-slot; entries that move are restamped
/// onto the pattern's slot grid.
pub trait ChordTransform {
    fn name(&self) -> &str;
    fn apply(&self, args: &TransformArgs<'_>, chords: Vec<Option<Chord>>) -> Vec<Option<Chord>>;
}

/// Re-assign slot-grid timing after entries have moved.
fn restamp(chords: &mut [Option<Chord>], t_start: i64, slot_duration: i64) {
    for (i, slot) in chords.iter_mut().enumerate() {
        if let Some(chord) = slot {
            let start = t_start + i as i64 * slot_duration;
            for note in &mut chord.notes {
                note.start_time = start;
                note.end_time = start + slot_duration;
                note.length = slot_duration;
            }
        }
    }
}

/// Shift every note by a fixed number of semitones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransposeTransform {
    pub semitones: i32,
}

impl ChordTransform for TransposeTransform {
    fn name(&self) -> &str {
        "Transpose"
    }

    fn apply(&self, _args: &TransformArgs<'_>, mut chords: Vec<Option<Chord>>) -> Vec<Option<Chord>> {
        for chord in chords.iter_mut().flatten() {
            chord.transpose(self.semitones);
        }
        chords
    }
}

/// Play the slots in reverse order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseTransform;

impl ChordTransform for ReverseTransform {
    fn name(&self) -> &str {
        "Reverse"
    }

    fn apply(&self, args: &TransformArgs<'_>, mut chords: Vec<Option<Chord>>) -> Vec<Option<Chord>> {
        chords.reverse();
        restamp(&mut chords, args.t_start, args.slot_duration);
        chords
    }
}

/// Rotate the slots left by a fixed number of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateTransform {
    pub steps: usize,
}

impl ChordTransform for RotateTransform {
    fn name(&self) -> &str {
        "Rotate"
    }

    fn apply(&self, args: &TransformArgs<'_>, mut chords: Vec<Option<Chord>>) -> Vec<Option<Chord>> {
        if !chords.is_empty() {
            let steps = self.steps % chords.len();
            chords.rotate_left(steps);
            restamp(&mut chords, args.t_start, args.slot_duration);
        }
        chords
    }
}

/// Keep every `keep`-th slot, silencing the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinTransform {
    pub keep: usize,
}

impl ChordTransform for ThinTransform {
    fn name(&self) -> &str {
        "Thin"
    }

    fn apply(&self, _args: &TransformArgs<'_>, mut chords: Vec<Option<Chord>>) -> Vec<Option<Chord>> {
        if self.keep > 1 {
            for (i, slot) in chords.iter_mut().enumerate() {
                if i % self.keep != 0 {
                    *slot = None;
                }
            }
        }
        chords
    }
}

/// Enum wrapper over the built-in transforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    Transpose(TransposeTransform),
    Reverse(ReverseTransform),
    Rotate(RotateTransform),
    Thin(ThinTransform),
}

impl Transform {
    pub fn name(&self) -> &str {
        match self {
            Self::Transpose(t) => t.name(),
            Self::Reverse(t) => t.name(),
            Self::Rotate(t) => t.name(),
            Self::Thin(t) => t.name(),
        }
    }

    pub fn apply(&self, args: &TransformArgs<'_>, chords: Vec<Option<Chord>>) -> Vec<Option<Chord>> {
        match self {
            Self::Transpose(t) => t.apply(args, chords),
            Self::Reverse(t) => t.apply(args, chords),
            Self::Rotate(t) => t.apply(args, chords),
            Self::Thin(t) => t.apply(args, chords),
        }
    }
}

/// Registration entry: a single transform or an explicit chain.
///
/// Callers may register either shape; it is collapsed into a uniform list
/// of chains before any call site has to look at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformEntry {
    Single(Transform),
    Chain(Vec<Transform>),
}

impl From<Transform> for TransformEntry {
    fn from(transform: Transform) -> Self {
        Self::Single(transform)
    }
}

impl From<Vec<Transform>> for TransformEntry {
    fn from(chain: Vec<Transform>) -> Self {
        Self::Chain(chain)
    }
}

/// Collapse mixed registration input into a uniform list of chains.
pub fn normalize_chains(entries: Vec<TransformEntry>) -> Vec<Vec<Transform>> {
    entries
        .into_iter()
        .map(|entry| match entry {
            TransformEntry::Single(transform) => vec![transform],
            TransformEntry::Chain(chain) => chain,
        })
        .collect()
}
