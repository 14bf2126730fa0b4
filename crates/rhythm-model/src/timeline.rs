use std::collections::HashSet;
use std::ops::Range;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Action, ChannelId, MalformedTimeline, NoteDef, NoteId, Ruleset, Scorepoint};

/// Ordered per-channel scorepoint tables for one map.
///
/// Within a channel scorepoints ascend in time and every note is a contiguous
/// run starting with a press. A run longer than one point ends with a release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineModel {
    ruleset: Ruleset,
    channels: Vec<Vec<Scorepoint>>,
}

/// Decompose note definitions into a timeline for `ruleset`.
///
/// `object_id` of every scorepoint is the index of its definition in `note_defs`.
pub fn build_timeline(
    note_defs: &[NoteDef],
    ruleset: Ruleset,
) -> Result<TimelineModel, MalformedTimeline> {
    let mut runs: Vec<Vec<Vec<Scorepoint>>> = vec![Vec::new(); ruleset.channel_count()];
    for (object_id, def) in note_defs.iter().enumerate() {
        let run = def.scorepoints(object_id, ruleset)?;
        runs[run[0].channel].push(run);
    }

    let mut channels = Vec::with_capacity(runs.len());
    for (channel, mut notes) in runs.into_iter().enumerate() {
        // Stable: notes starting together keep definition order
        notes.sort_by_key(|run| run[0].time);

        let mut table = Vec::with_capacity(notes.iter().map(Vec::len).sum());
        let mut previous: Option<(NoteId, i64)> = None;
        for run in notes {
            let first = run[0];
            if let Some((previous_id, previous_end)) = previous
                && first.time < previous_end
            {
                return Err(MalformedTimeline::OverlappingNotes {
                    channel,
                    object_id: first.object_id,
                    time: first.time,
                    previous_id,
                    previous_end,
                });
            }
            previous = run.last().map(|last| (last.object_id, last.time));
            table.extend(run);
        }
        channels.push(table);
    }

    let timeline = TimelineModel { ruleset, channels };
    debug!(
        "built timeline: {} notes, {} scorepoints over {} channels",
        note_defs.len(),
        timeline.scorepoint_count(),
        timeline.channel_count()
    );
    Ok(timeline)
}

impl TimelineModel {
    /// Validate an externally produced scorepoint list.
    ///
    /// Points are grouped per channel in the order given; each channel must
    /// already satisfy the run and ordering rules.
    pub fn from_scorepoints(
        ruleset: Ruleset,
        scorepoints: Vec<Scorepoint>,
    ) -> Result<Self, MalformedTimeline> {
        let channel_count = ruleset.channel_count();
        let mut channels: Vec<Vec<Scorepoint>> = vec![Vec::new(); channel_count];
        for point in scorepoints {
            if point.channel >= channel_count {
                return Err(MalformedTimeline::ChannelOutOfRange {
                    object_id: point.object_id,
                    channel: point.channel,
                    channel_count,
                });
            }
            channels[point.channel].push(point);
        }
        for (channel, table) in channels.iter().enumerate() {
            validate_channel(channel, table)?;
        }
        Ok(Self { ruleset, channels })
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Scorepoints of one channel. Empty for an unknown channel.
    pub fn channel(&self, channel: ChannelId) -> &[Scorepoint] {
        self.channels.get(channel).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn channels(&self) -> impl Iterator<Item = (ChannelId, &[Scorepoint])> {
        self.channels
            .iter()
            .enumerate()
            .map(|(channel, table)| (channel, table.as_slice()))
    }

    pub fn scorepoint_count(&self) -> usize {
        self.channels.iter().map(Vec::len).sum()
    }

    /// All scorepoints, channel by channel.
    pub fn iter(&self) -> impl Iterator<Item = &Scorepoint> {
        self.channels.iter().flatten()
    }

    /// Index ranges of each note's run within a channel table.
    pub fn note_runs(&self, channel: ChannelId) -> Vec<Range<usize>> {
        note_runs(self.channel(channel))
    }

    pub fn note_count(&self) -> usize {
        (0..self.channel_count())
            .map(|channel| self.note_runs(channel).len())
            .sum()
    }
}

/// Split a channel table into per-note runs by consecutive `object_id`.
pub fn note_runs(table: &[Scorepoint]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=table.len() {
        if i == table.len() || table[i].object_id != table[start].object_id {
            runs.push(start..i);
            start = i;
        }
    }
    runs
}

fn validate_channel(channel: ChannelId, table: &[Scorepoint]) -> Result<(), MalformedTimeline> {
    let mut seen: HashSet<NoteId> = HashSet::new();
    let mut previous: Option<(NoteId, i64)> = None;

    for range in note_runs(table) {
        let run = &table[range];
        let first = run[0];
        if !seen.insert(first.object_id) {
            return Err(MalformedTimeline::SplitRun {
                channel,
                object_id: first.object_id,
            });
        }
        if first.action != Action::Press {
            return Err(MalformedTimeline::MissingPress {
                channel,
                object_id: first.object_id,
            });
        }
        if let Some((previous_id, previous_end)) = previous
            && first.time < previous_end
        {
            return Err(MalformedTimeline::OverlappingNotes {
                channel,
                object_id: first.object_id,
                time: first.time,
                previous_id,
                previous_end,
            });
        }

        for (i, pair) in run.windows(2).enumerate() {
            if pair[1].time <= pair[0].time {
                return Err(MalformedTimeline::NotTimeOrdered {
                    object_id: first.object_id,
                    previous: pair[0].time,
                    time: pair[1].time,
                });
            }
            match pair[1].action {
                Action::Press => {
                    return Err(MalformedTimeline::UnexpectedPress {
                        channel,
                        object_id: first.object_id,
                    });
                }
                // A release closes the run; anything after it is a second run
                // sharing the id.
                Action::Hold | Action::Release if pair[0].action == Action::Release => {
                    return Err(MalformedTimeline::SplitRun {
                        channel,
                        object_id: first.object_id,
                    });
                }
                Action::Hold if i + 2 == run.len() => {
                    return Err(MalformedTimeline::MissingRelease {
                        channel,
                        object_id: first.object_id,
                    });
                }
                _ => {}
            }
        }

        previous = run.last().map(|last| (last.object_id, last.time));
    }
    Ok(())
}
