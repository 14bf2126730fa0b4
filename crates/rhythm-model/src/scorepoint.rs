use serde::{Deserialize, Serialize};

use crate::{ChannelId, NoteId, Point};

/// The action a scorepoint expects from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Press,
    Hold,
    Release,
}

/// The part of a note a scorepoint was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Circle,
    SliderHead,
    SliderBody,
    SliderTail,
    Tap,
    HoldHead,
    HoldBody,
    HoldTail,
}

/// A single expected action on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scorepoint {
    /// Expected time in milliseconds
    pub time: i64,
    pub channel: ChannelId,
    pub action: Action,
    /// Note this scorepoint belongs to
    pub object_id: NoteId,
    pub object_kind: ObjectKind,
    /// Where the cursor is expected to be (cursor ruleset only)
    pub target_pos: Option<Point>,
}

impl Scorepoint {
    pub fn new(
        time: i64,
        channel: ChannelId,
        action: Action,
        object_id: NoteId,
        object_kind: ObjectKind,
        target_pos: Option<Point>,
    ) -> Self {
        Self {
            time,
            channel,
            action,
            object_id,
            object_kind,
            target_pos,
        }
    }

    pub fn is_press(&self) -> bool {
        self.action == Action::Press
    }
}
