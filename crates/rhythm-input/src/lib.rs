// Replay input: raw frames, button-to-channel mapping, normalized transitions

mod channel_map;
mod cursor_path;
mod error;
mod input_event;
mod normalize;
mod raw_sample;

pub use channel_map::ChannelMap;
pub use cursor_path::{CursorPath, CursorSample};
pub use error::{ChannelMapError, DegenerateInput};
pub use input_event::{InputEvent, Transition};
pub use normalize::{normalize_channels, normalize_cursor_path, normalize_input};
pub use raw_sample::{RawSample, button};
