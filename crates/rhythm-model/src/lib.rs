// Timeline model: note definitions, scorepoints, per-channel scorepoint tables

mod error;
mod note;
mod point;
mod ruleset;
mod scorepoint;
mod timeline;

pub use error::MalformedTimeline;
pub use note::{NoteDef, SliderTick};
pub use point::Point;
pub use ruleset::Ruleset;
pub use scorepoint::{Action, ObjectKind, Scorepoint};
pub use timeline::{TimelineModel, build_timeline, note_runs};

/// Index of an independent input lane. The cursor ruleset only uses channel 0.
pub type ChannelId = usize;

/// Index of a note definition in the slice passed to [`build_timeline`].
pub type NoteId = usize;
