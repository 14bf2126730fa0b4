// Judge windows, the per-channel judgement state machine, judgement summaries

mod channel_judge;
mod judge;
mod judgement;
mod note_windows;
mod spatial;
mod summary;
mod window_config;

pub use channel_judge::{ChannelJudge, JudgeState};
pub use judge::{judge, judge_channel, judge_parallel, judge_with_cursor};
pub use judgement::{Judgement, Outcome};
pub use note_windows::{Band, NoteWindows, Window};
pub use spatial::{CursorSpatial, LaneSpatial, SpatialPolicy};
pub use summary::JudgementSummary;
pub use window_config::{InvalidWindowConfig, WindowConfig};
