//! metron-core: Event generation for a step-based sequencer
//!
//! Converts a clip (an ordered arrangement of repeatable patterns plus
//! cyclic scale/transform/tempo modifiers) into a flat list of
//! absolute-time note-on events for a downstream playback engine.

mod clip;
mod error;
mod event;
pub mod expr;
mod note;
mod pattern;
mod roller;
pub mod scale;
mod song;
pub mod transform;

pub use clip::Clip;
pub use error::{MetronError, Result};
pub use event::{Event, EventKind};
pub use expr::{Articulation, Context, SlotExpr};
pub use note::{Chord, Note};
pub use pattern::Pattern;
pub use roller::Roller;
pub use scale::{ChordQuality, Scale, ScaleMode};
pub use song::{ClipId, PatternId, Scene, Song, Track, TrackId};
pub use transform::{
    ChordTransform, ReverseTransform, RotateTransform, ThinTransform, Transform,
    TransformArgs, TransformEntry, TransposeTransform,
};
