// Map and replay files.

use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use rhythm_input::{ChannelMap, InputEvent, RawSample, normalize_channels};
use rhythm_model::{NoteDef, Ruleset, TimelineModel, build_timeline};
use serde::{Deserialize, Serialize};

/// A map file: the ruleset plus its note definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFile {
    pub ruleset: Ruleset,
    pub notes: Vec<NoteDef>,
}

/// A replay file: captured frames and, optionally, which buttons feed which channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayFile {
    pub samples: Vec<RawSample>,
    #[serde(default)]
    pub channel_map: Option<Vec<Vec<u8>>>,
}

impl MapFile {
    pub fn read(path: &Path) -> Result<Self> {
        read_json(path, "map")
    }

    pub fn timeline(&self) -> Result<TimelineModel> {
        build_timeline(&self.notes, self.ruleset).context("invalid map")
    }
}

impl ReplayFile {
    pub fn read(path: &Path) -> Result<Self> {
        read_json(path, "replay")
    }

    /// The replay's own channel map, or the ruleset default.
    pub fn channel_map(&self, ruleset: Ruleset) -> Result<ChannelMap> {
        match &self.channel_map {
            Some(table) => ChannelMap::new(table.clone()).context("invalid channel map in replay"),
            None => ChannelMap::for_ruleset(ruleset).context("no default channel map"),
        }
    }

    /// Normalized input of every channel that settles, merged by time then
    /// channel. A degenerate channel contributes no events, so its notes
    /// time out.
    pub fn input_events(&self, channel_map: &ChannelMap) -> Vec<InputEvent> {
        let mut merged = Vec::new();
        for (channel, result) in normalize_channels(&self.samples, channel_map)
            .into_iter()
            .enumerate()
        {
            match result {
                Ok(events) => merged.extend(events),
                Err(_) => warn!("judging channel {channel} without input"),
            }
        }
        merged.sort_by_key(|e| (e.time, e.channel));
        merged
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path, what: &str) -> Result<T> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse {what} file {}", path.display()))
}
