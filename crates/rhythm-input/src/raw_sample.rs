use rhythm_model::Point;
use serde::{Deserialize, Serialize};

/// Bit indices of the standard cursor-ruleset buttons.
pub mod button {
    pub const MOUSE1: u8 = 0;
    pub const MOUSE2: u8 = 1;
    pub const KEY1: u8 = 2;
    pub const KEY2: u8 = 3;
}

/// One captured input frame: every button's state plus the cursor, if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Capture time in milliseconds
    pub time: i64,
    /// Bit `i` set = physical button `i` held
    #[serde(default)]
    pub buttons: u32,
    #[serde(default)]
    pub pos: Option<Point>,
}

impl RawSample {
    pub fn new(time: i64, buttons: u32, pos: Option<Point>) -> Self {
        Self { time, buttons, pos }
    }

    /// A lane-ruleset frame with the given buttons held and no cursor.
    pub fn keys(time: i64, held: &[u8]) -> Self {
        let buttons = held.iter().fold(0u32, |mask, &b| mask | (1 << b));
        Self {
            time,
            buttons,
            pos: None,
        }
    }

    pub fn is_held(&self, button: u8) -> bool {
        button < 32 && self.buttons & (1 << button) != 0
    }
}
