use rhythm_model::ChannelId;
use thiserror::Error;

/// A channel whose logical state changes on every captured frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("channel {channel} never settles over {samples} samples")]
pub struct DegenerateInput {
    pub channel: ChannelId,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelMapError {
    #[error("button {button} is assigned to channel {first} and channel {second}")]
    DuplicateButton {
        button: u8,
        first: ChannelId,
        second: ChannelId,
    },

    #[error("button {button} of channel {channel} is outside the 32-button frame")]
    ButtonOutOfRange { button: u8, channel: ChannelId },
}
