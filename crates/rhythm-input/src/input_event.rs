use rhythm_model::{ChannelId, Point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    Press,
    Release,
}

/// A logical press or release on one channel.
///
/// Within a channel, normalized events alternate starting with a press and
/// their times strictly increase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub time: i64,
    pub channel: ChannelId,
    pub transition: Transition,
    #[serde(default)]
    pub pos: Option<Point>,
}

impl InputEvent {
    pub fn press(time: i64, channel: ChannelId, pos: Option<Point>) -> Self {
        Self {
            time,
            channel,
            transition: Transition::Press,
            pos,
        }
    }

    pub fn release(time: i64, channel: ChannelId, pos: Option<Point>) -> Self {
        Self {
            time,
            channel,
            transition: Transition::Release,
            pos,
        }
    }

    pub fn is_press(&self) -> bool {
        self.transition == Transition::Press
    }
}
