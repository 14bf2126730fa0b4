use thiserror::Error;

use crate::{ChannelId, NoteId};

/// Structural violation found while building or validating a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedTimeline {
    #[error("note {object_id}: {kind} is not playable in the {ruleset} ruleset")]
    WrongRuleset {
        object_id: NoteId,
        kind: &'static str,
        ruleset: &'static str,
    },

    #[error("note {object_id}: lane {lane} is outside 0..{lane_count}")]
    LaneOutOfRange {
        object_id: NoteId,
        lane: usize,
        lane_count: usize,
    },

    #[error("note {object_id}: scorepoint at {time} does not come after {previous}")]
    NotTimeOrdered {
        object_id: NoteId,
        previous: i64,
        time: i64,
    },

    #[error("channel {channel}: note {object_id} starts at {time} before note {previous_id} ends at {previous_end}")]
    OverlappingNotes {
        channel: ChannelId,
        object_id: NoteId,
        time: i64,
        previous_id: NoteId,
        previous_end: i64,
    },

    #[error("channel {channel}: note {object_id} does not start with a press")]
    MissingPress { channel: ChannelId, object_id: NoteId },

    #[error("channel {channel}: note {object_id} does not end with a release")]
    MissingRelease { channel: ChannelId, object_id: NoteId },

    #[error("channel {channel}: note {object_id} has a press in the middle of its run")]
    UnexpectedPress { channel: ChannelId, object_id: NoteId },

    #[error("channel {channel}: scorepoints of note {object_id} are not contiguous")]
    SplitRun { channel: ChannelId, object_id: NoteId },

    #[error("scorepoint of note {object_id} is on channel {channel}, ruleset has {channel_count}")]
    ChannelOutOfRange {
        object_id: NoteId,
        channel: ChannelId,
        channel_count: usize,
    },
}
