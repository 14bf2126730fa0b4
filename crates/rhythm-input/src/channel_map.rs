// Channel map: which physical buttons make up which logical channel.
//
// Several buttons may feed one channel (the cursor ruleset merges both mouse
// buttons and both keys); a button feeds at most one channel.

use rhythm_model::{ChannelId, Ruleset};

use crate::button;
use crate::error::ChannelMapError;

const FRAME_BUTTONS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMap {
    /// Physical button -> channel
    button_to_channel: [Option<ChannelId>; FRAME_BUTTONS],
    /// Channel -> physical buttons
    channel_to_buttons: Vec<Vec<u8>>,
}

impl ChannelMap {
    /// Build a map from the button list of each channel.
    pub fn new(channel_to_buttons: Vec<Vec<u8>>) -> Result<Self, ChannelMapError> {
        let mut button_to_channel = [None; FRAME_BUTTONS];
        for (channel, buttons) in channel_to_buttons.iter().enumerate() {
            for &b in buttons {
                let slot = button_to_channel
                    .get_mut(b as usize)
                    .ok_or(ChannelMapError::ButtonOutOfRange { button: b, channel })?;
                match *slot {
                    Some(first) if first != channel => {
                        return Err(ChannelMapError::DuplicateButton {
                            button: b,
                            first,
                            second: channel,
                        });
                    }
                    _ => *slot = Some(channel),
                }
            }
        }
        Ok(Self {
            button_to_channel,
            channel_to_buttons,
        })
    }

    /// Both mouse buttons and both keys act as the single cursor channel.
    pub fn cursor() -> Self {
        let mut button_to_channel = [None; FRAME_BUTTONS];
        let buttons = vec![button::MOUSE1, button::MOUSE2, button::KEY1, button::KEY2];
        for &b in &buttons {
            button_to_channel[b as usize] = Some(0);
        }
        Self {
            button_to_channel,
            channel_to_buttons: vec![buttons],
        }
    }

    /// Button `i` drives lane `i`.
    pub fn lanes(count: usize) -> Result<Self, ChannelMapError> {
        Self::new((0..count).map(|lane| vec![lane as u8]).collect())
    }

    /// The default map for a ruleset.
    pub fn for_ruleset(ruleset: Ruleset) -> Result<Self, ChannelMapError> {
        match ruleset {
            Ruleset::Cursor => Ok(Self::cursor()),
            Ruleset::Lanes { count } => Self::lanes(count),
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channel_to_buttons.len()
    }

    pub fn button_to_channel(&self, button: u8) -> Option<ChannelId> {
        self.button_to_channel.get(button as usize).copied().flatten()
    }

    pub fn channel_buttons(&self, channel: ChannelId) -> &[u8] {
        self.channel_to_buttons
            .get(channel)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Bitmask of the channel's buttons within a raw frame.
    pub fn channel_mask(&self, channel: ChannelId) -> u32 {
        self.channel_buttons(channel)
            .iter()
            .fold(0u32, |mask, &b| mask | (1 << b))
    }
}
