//! Slot expressions and their evaluation context

use serde::{Deserialize, Serialize};

use crate::error::{MetronError, Result};
use crate::note::{Chord, Note};
use crate::pattern::Pattern;
use crate::scale::{ChordQuality, Scale};
use crate::song::Song;

/// Read-only bundle handed to slot-expression evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub song: &'a Song,
    pub pattern: &'a Pattern,
    pub scale: &'a Scale,
    pub clip_name: &'a str,
    pub clip_rate: f64,
    /// Width of one slot in ticks
    pub slot_duration: i64,
}

/// Per-note articulation stamped onto every note a slot expression produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Articulation {
    pub velocity: u8,
    pub tie: bool,
    pub muted: bool,
    pub repeat: u32,
    pub repeat_hold: u32,
    pub delay: f64,
    pub length_mod: f64,
}

impl Default for Articulation {
    fn default() -> Self {
        Self {
            velocity: 100,
            tie: false,
            muted: false,
            repeat: 0,
            repeat_hold: 0,
            delay: 0.0,
            length_mod: 1.0,
        }
    }
}

impl Articulation {
    /// Articulation for a note that merges into its predecessor.
    pub fn tied() -> Self {
        Self {
            tie: true,
            ..Default::default()
        }
    }

    fn stamp(&self, note: &mut Note) {
        note.velocity = self.velocity;
        note.tie = self.tie;
        note.muted = self.muted;
        note.repeat = self.repeat;
        note.repeat_hold = self.repeat_hold;
        note.delay = self.delay;
        note.length_mod = self.length_mod;
    }
}

/// A slot expression: evaluates to a chord, or to nothing for a rest.
///
/// Dispatch is on the variant tag; every variant shares the same
/// capability interface so a pattern can mix them freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlotExpr {
    /// Silence for one slot
    Rest,
    /// A single note at a signed scale degree from the root
    Degree {
        step: i32,
        octave: i8,
        art: Articulation,
    },
    /// A chord stacked from a quality's interval table on a scale degree
    Stack {
        step: i32,
        quality: ChordQuality,
        art: Articulation,
    },
    /// `count` notes fanned out from `step`, `spacing` scale degrees apart
    Spread {
        step: i32,
        count: u8,
        spacing: i32,
        art: Articulation,
    },
}

impl SlotExpr {
    /// Evaluate against `ctx`, starting from the scale's root note `root`.
    ///
    /// `root` arrives with the slot duration already stamped; timing is
    /// overwritten by the caller's left-to-right sweep afterwards.
    pub fn evaluate(&self, ctx: &Context<'_>, root: Note) -> Result<Option<Chord>> {
        match self {
            Self::Rest => Ok(None),
            Self::Degree { step, octave, art } => {
                let mut note = root;
                note.pitch = ctx.scale.degree_pitch(*step);
                note.transpose(*octave as i32 * 12);
                art.stamp(&mut note);
                Ok(Some(Chord::single(note)))
            }
            Self::Stack { step, quality, art } => {
                let base = ctx.scale.degree_pitch(*step);
                let notes = quality
                    .intervals()
                    .iter()
                    .map(|&interval| {
                        let mut note = root;
                        note.pitch = (base as i32 + interval as i32).clamp(0, 127) as u8;
                        art.stamp(&mut note);
                        note
                    })
                    .collect();
                Ok(Some(Chord::new(notes)))
            }
            Self::Spread {
                step,
                count,
                spacing,
                art,
            } => {
                if *count == 0 {
                    return Err(MetronError::Evaluation(
                        "spread expression with zero count".into(),
                    ));
                }
                let notes = (0..*count as i32)
                    .map(|i| {
                        let mut note = root;
                        note.pitch = ctx.scale.degree_pitch(step + i * spacing);
                        art.stamp(&mut note);
                        note
                    })
                    .collect();
                Ok(Some(Chord::new(notes)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::PatternId;

    fn ctx_fixture<'a>(song: &'a Song, pattern: &'a Pattern, scale: &'a Scale) -> Context<'a> {
        Context {
            song,
            pattern,
            scale,
            clip_name: "test",
            clip_rate: 1.0,
            slot_duration: 125,
        }
    }

    #[test]
    fn rest_evaluates_to_nothing() {
        let song = Song::default();
        let pattern = Pattern::new(PatternId(1), vec![]);
        let scale = Scale::chromatic(60);
        let ctx = ctx_fixture(&song, &pattern, &scale);

        let chord = SlotExpr::Rest.evaluate(&ctx, scale.root_note()).unwrap();
        assert!(chord.is_none());
    }

    #[test]
    fn degree_maps_through_the_scale_and_octave() {
        let song = Song::default();
        let pattern = Pattern::new(PatternId(1), vec![]);
        let scale = Scale::new(60, crate::scale::ScaleMode::Major);
        let ctx = ctx_fixture(&song, &pattern, &scale);

        let expr = SlotExpr::Degree {
            step: 2,
            octave: 1,
            art: Articulation::default(),
        };
        let chord = expr.evaluate(&ctx, scale.root_note()).unwrap().unwrap();
        assert_eq!(chord.notes[0].pitch, 76); // E5
    }

    #[test]
    fn stack_builds_the_quality_intervals() {
        let song = Song::default();
        let pattern = Pattern::new(PatternId(1), vec![]);
        let scale = Scale::new(60, crate::scale::ScaleMode::Major);
        let ctx = ctx_fixture(&song, &pattern, &scale);

        let expr = SlotExpr::Stack {
            step: 0,
            quality: ChordQuality::Minor7,
            art: Articulation::default(),
        };
        let chord = expr.evaluate(&ctx, scale.root_note()).unwrap().unwrap();
        let pitches: Vec<u8> = chord.notes.iter().map(|n| n.pitch).collect();
        assert_eq!(pitches, vec![60, 63, 67, 70]);
    }

    #[test]
    fn articulation_is_stamped_on_every_note() {
        let song = Song::default();
        let pattern = Pattern::new(PatternId(1), vec![]);
        let scale = Scale::chromatic(60);
        let ctx = ctx_fixture(&song, &pattern, &scale);

        let expr = SlotExpr::Spread {
            step: 0,
            count: 3,
            spacing: 4,
            art: Articulation {
                velocity: 80,
                repeat: 2,
                ..Default::default()
            },
        };
        let chord = expr.evaluate(&ctx, scale.root_note()).unwrap().unwrap();
        assert_eq!(chord.len(), 3);
        assert!(chord.notes.iter().all(|n| n.velocity == 80 && n.repeat == 2));
    }

    #[test]
    fn zero_count_spread_is_an_evaluation_error() {
        let song = Song::default();
        let pattern = Pattern::new(PatternId(1), vec![]);
        let scale = Scale::chromatic(60);
        let ctx = ctx_fixture(&song, &pattern, &scale);

        let expr = SlotExpr::Spread {
            step: 0,
            count: 0,
            spacing: 1,
            art: Articulation::default(),
        };
        assert!(expr.evaluate(&ctx, scale.root_note()).is_err());
    }
}
