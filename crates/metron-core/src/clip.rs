//! Clip: pattern arrangement and event generation

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{MetronError, Result};
use crate::event::Event;
use crate::expr::Context;
use crate::note::Chord;
use crate::pattern::Pattern;
use crate::roller::Roller;
use crate::scale::Scale;
use crate::song::{ClipId, PatternId, Scene, Song, Track};
use crate::transform::{normalize_chains, Transform, TransformArgs, TransformEntry};

/// Ticks per minute; one tick is one millisecond.
const TICKS_BASE: f64 = 60_000.0;
/// Fraction of a beat covered by one slot (sixteenth notes).
const SLOT_SCALE: f64 = 0.25;

/// A reusable container of patterns plus modifiers (scales, transforms,
/// tempo shifts), played on a track within a scene.
///
/// The only mutable state is the roller cursors; they persist across
/// [`get_events`](Clip::get_events) calls until [`reset`](Clip::reset)
/// rewinds them, so a transport layer must serialize calls per clip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clip {
    pub id: ClipId,
    pub name: String,
    patterns: Vec<Pattern>,
    scales: Option<Roller<Scale>>,
    transforms: Roller<Vec<Transform>>,
    tempo_shifts: Roller<f64>,
    rate: f64,
    /// Default subdivision count for notes that do not set their own
    note_repeat: u32,
    pub scene: Scene,
    pub track: Track,
}

impl Clip {
    pub fn new(id: ClipId, name: impl Into<String>, scene: Scene, track: Track) -> Result<Self> {
        if scene.rate <= 0.0 {
            return Err(MetronError::SceneRate(scene.rate));
        }
        Ok(Self {
            id,
            name: name.into(),
            patterns: Vec::new(),
            scales: None,
            transforms: Roller::single(Vec::new()),
            tempo_shifts: Roller::single(0.0),
            rate: 1.0,
            note_repeat: 0,
            scene,
            track,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f64) -> Result<()> {
        if rate <= 0.0 {
            return Err(MetronError::ClipRate(rate));
        }
        self.rate = rate;
        Ok(())
    }

    pub fn add_pattern(&mut self, pattern: Pattern) -> Result<()> {
        if pattern.rate <= 0.0 {
            return Err(MetronError::PatternRate {
                pattern: pattern.id,
                rate: pattern.rate,
            });
        }
        self.patterns.push(pattern);
        Ok(())
    }

    pub fn remove_pattern(&mut self, id: PatternId) -> Option<Pattern> {
        let pos = self.patterns.iter().position(|p| p.id == id)?;
        Some(self.patterns.remove(pos))
    }

    /// Scales cycled one per pattern start; an empty list removes the
    /// roller and falls back to live resolution.
    pub fn set_scales(&mut self, scales: Vec<Scale>) {
        self.scales = Roller::new(scales);
    }

    /// Tempo shifts cycled one per pattern start.
    pub fn set_tempo_shifts(&mut self, shifts: Vec<f64>) {
        self.tempo_shifts = Roller::new(shifts).unwrap_or_else(|| Roller::single(0.0));
    }

    /// Transform chains cycled one per pattern start. Mixed single/chain
    /// input is normalized here, once.
    pub fn set_transforms(&mut self, entries: Vec<TransformEntry>) {
        let chains = normalize_chains(entries);
        self.transforms = Roller::new(chains).unwrap_or_else(|| Roller::single(Vec::new()));
    }

    /// Default subdivision applied to generated notes that leave their own
    /// repeat count at 0.
    pub fn set_note_repeat(&mut self, repeat: u32) {
        self.note_repeat = repeat;
    }

    /// Rewind every roller to its first element.
    pub fn reset(&mut self) {
        if let Some(scales) = &mut self.scales {
            scales.rewind();
        }
        self.transforms.rewind();
        self.tempo_shifts.rewind();
    }

    /// Generate the clip's note-on events for one playback loop.
    ///
    /// Roller cursors advance as a side effect, so two consecutive calls
    /// may legitimately differ; call [`reset`](Clip::reset) first to
    /// reproduce a previous run. On error nothing is returned: the event
    /// list is never partially built.
    pub fn get_events(&mut self, song: &Song) -> Result<Vec<Event>> {
        let mut slots: Vec<Option<Chord>> = Vec::new();
        let mut elapsed: i64 = 0;

        for index in 0..self.patterns.len() {
            let tempo_shift = *self.tempo_shifts.next();
            let chain = self.transforms.next().clone();
            let rolled_scale = self.scales.as_mut().map(|roller| *roller.next());

            let pattern = &self.patterns[index];
            // Resolved fresh at every pattern start; song and scene scales
            // may change between playthroughs.
            let scale =
                rolled_scale.unwrap_or_else(|| resolve_scale(pattern, &self.scene, song));
            let slot_duration = self.slot_duration(song, pattern, tempo_shift, index)?;

            let mut chords =
                self.generate_pattern(song, pattern, &scale, slot_duration, elapsed)?;
            for transform in &chain {
                let args = TransformArgs {
                    song,
                    pattern,
                    scale: &scale,
                    track: &self.track,
                    t_start: elapsed,
                    slot_duration,
                };
                chords = transform.apply(&args, chords);
            }
            trace!(
                pattern = index,
                tempo_shift,
                slot_duration,
                "pattern generated"
            );

            slots.extend(chords);
            // The nominal pattern span, even when a transform changed the
            // entry count.
            elapsed += slot_duration * pattern.len() as i64;
        }

        drop_muted(&mut slots);
        merge_ties(&mut slots);
        let events = materialize(slots);
        debug!(
            clip = %self.name,
            patterns = self.patterns.len(),
            events = events.len(),
            "generated events"
        );
        Ok(events)
    }

    /// Width of one slot in ticks for the given pattern.
    fn slot_duration(
        &self,
        song: &Song,
        pattern: &Pattern,
        tempo_shift: f64,
        index: usize,
    ) -> Result<i64> {
        let denominator =
            song.tempo * self.rate * pattern.rate * self.scene.rate + tempo_shift;
        if denominator <= 0.0 {
            return Err(MetronError::NonPositiveTempo {
                clip: self.name.clone(),
                pattern_index: index,
                denominator,
            });
        }
        // A slot is never narrower than one tick.
        Ok((((TICKS_BASE / denominator) * SLOT_SCALE).round() as i64).max(1))
    }

    /// Evaluate every slot of `pattern` and stamp absolute timing in one
    /// left-to-right sweep: slot `i` owns `[t_start + i·d, t_start + (i+1)·d)`.
    fn generate_pattern(
        &self,
        song: &Song,
        pattern: &Pattern,
        scale: &Scale,
        slot_duration: i64,
        t_start: i64,
    ) -> Result<Vec<Option<Chord>>> {
        let octave = pattern
            .octave
            .unwrap_or_else(|| self.track.octave_shift(pattern.id));
        let ctx = Context {
            song,
            pattern,
            scale,
            clip_name: &self.name,
            clip_rate: self.rate,
            slot_duration,
        };

        let mut out = Vec::with_capacity(pattern.len());
        for slot in &pattern.slots {
            let mut root = scale.root_note();
            root.length = slot_duration;
            let mut chord = slot.evaluate(&ctx, root)?;
            if let Some(chord) = &mut chord {
                if octave != 0 {
                    chord.transpose_octaves(octave);
                }
                if self.note_repeat > 0 {
                    for note in &mut chord.notes {
                        if note.repeat == 0 {
                            note.repeat = self.note_repeat;
                        }
                    }
                }
            }
            out.push(chord);
        }

        for (i, slot) in out.iter_mut().enumerate() {
            if let Some(chord) = slot {
                let start = t_start + i as i64 * slot_duration;
                for note in &mut chord.notes {
                    note.start_time = start;
                    note.end_time = start + slot_duration;
                    note.length = slot_duration;
                }
            }
        }
        Ok(out)
    }
}

/// Live scale resolution: nearer scope wins.
fn resolve_scale(pattern: &Pattern, scene: &Scene, song: &Song) -> Scale {
    pattern
        .scale
        .or(scene.scale)
        .or(song.scale)
        .unwrap_or_else(|| Scale::chromatic(60))
}

/// Drop muted notes ahead of tie processing; chords left empty become
/// empty slots.
fn drop_muted(slots: &mut [Option<Chord>]) {
    for slot in slots.iter_mut() {
        if let Some(chord) = slot {
            chord.notes.retain(|note| !note.muted);
            if chord.notes.is_empty() {
                *slot = None;
            }
        }
    }
}

/// Tie-merging pass over the whole chord list.
///
/// A run of tie-led chords is consumed into the last untied chord before
/// it: the run's combined length is recorded as that chord's tie bonus and
/// the tied slots become empty. A tie with no eligible predecessor
/// contributes nothing.
fn merge_ties(slots: &mut [Option<Chord>]) {
    let mut previous: Option<usize> = None;
    let mut tied: u32 = 0;

    for i in 0..slots.len() {
        let lead_tie = slots[i].as_ref().and_then(Chord::lead).map(|note| note.tie);
        match lead_tie {
            Some(true) => {
                if previous.is_some() {
                    tied += 1;
                }
                slots[i] = None;
            }
            Some(false) => {
                if tied > 0 {
                    fold_bonus(slots, previous, tied);
                    tied = 0;
                }
                previous = Some(i);
            }
            None => {
                if tied > 0 {
                    fold_bonus(slots, previous, tied);
                    tied = 0;
                }
                previous = None;
            }
        }
    }
    fold_bonus(slots, previous, tied);
}

fn fold_bonus(slots: &mut [Option<Chord>], previous: Option<usize>, tied: u32) {
    if tied == 0 {
        return;
    }
    if let Some(chord) = previous.and_then(|i| slots[i].as_mut()) {
        let lead_length = chord.lead().map(|note| note.length).unwrap_or(0);
        chord.tie_bonus += tied as i64 * lead_length;
    }
}

/// Repeat expansion and event materialization.
///
/// Every surviving note becomes one event, or `repeat` events subdivided
/// across its window with a 1-2 tick gap between repeats so same-pitch
/// note-off/note-on pairs cannot collide.
fn materialize(slots: Vec<Option<Chord>>) -> Vec<Event> {
    let mut events = Vec::new();
    for chord in slots.into_iter().flatten() {
        let bonus = chord.tie_bonus;
        for note in chord.notes {
            if note.tie || note.muted {
                continue;
            }
            let mut note = note;
            note.length = (note.length as f64 * note.length_mod).round() as i64;
            note.end_time = note.start_time + note.length;
            let shift = (note.length as f64 * note.delay).round() as i64;
            note.start_time += shift;
            note.end_time += shift;

            if note.repeat == 0 {
                note.length += bonus;
                note.end_time += bonus;
                events.push(Event::note_on(note.start_time, Chord::single(note)));
            } else {
                let delta = (note.end_time - note.start_time) / (note.repeat as i64 + 1);
                for x in 0..note.repeat {
                    let mut rep = note;
                    rep.repeat = 0;
                    rep.start_time = note.start_time + x as i64 * delta;
                    rep.end_time = rep.start_time + delta - 1;
                    rep.length = delta - 2;
                    if x == note.repeat_hold {
                        rep.length += bonus;
                    }
                    events.push(Event::note_on(rep.start_time, Chord::single(rep)));
                }
            }
        }
    }
    // Per-pattern accumulation is already monotonic; delay shifts can
    // locally reorder, so re-sort (stable).
    events.sort_by_key(|event| event.time);
    events
}
