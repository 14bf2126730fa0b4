use std::fmt;

use rhythm_model::{ChannelId, NoteId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Hit,
    Miss,
    HoldOk,
    HoldFail,
    ReleaseHit,
    ReleaseMiss,
    /// A press or release that matched nothing (only with `blank_miss`)
    Empty,
}

impl Outcome {
    pub const ALL: [Outcome; 7] = [
        Outcome::Hit,
        Outcome::Miss,
        Outcome::HoldOk,
        Outcome::HoldFail,
        Outcome::ReleaseHit,
        Outcome::ReleaseMiss,
        Outcome::Empty,
    ];

    pub fn is_success(self) -> bool {
        matches!(self, Self::Hit | Self::HoldOk | Self::ReleaseHit)
    }

    pub fn index(self) -> usize {
        match self {
            Self::Hit => 0,
            Self::Miss => 1,
            Self::HoldOk => 2,
            Self::HoldFail => 3,
            Self::ReleaseHit => 4,
            Self::ReleaseMiss => 5,
            Self::Empty => 6,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::HoldOk => "hold_ok",
            Self::HoldFail => "hold_fail",
            Self::ReleaseHit => "release_hit",
            Self::ReleaseMiss => "release_miss",
            Self::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// One resolved scorepoint, or an unmatched input with `blank_miss`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Judgement {
    /// Scorepoint time, or the input time for `Empty`
    pub time: i64,
    pub channel: ChannelId,
    pub object_id: Option<NoteId>,
    /// Input time minus scorepoint time, when an input resolved it
    pub time_offset: Option<f64>,
    /// Cursor distance from the target (cursor ruleset)
    pub pos_offset: Option<f64>,
    pub outcome: Outcome,
}

impl Judgement {
    pub fn empty(time: i64, channel: ChannelId) -> Self {
        Self {
            time,
            channel,
            object_id: None,
            time_offset: None,
            pos_offset: None,
            outcome: Outcome::Empty,
        }
    }
}
