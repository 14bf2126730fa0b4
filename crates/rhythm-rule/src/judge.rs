use log::debug;
use rayon::prelude::*;
use rhythm_input::{CursorPath, CursorSample, InputEvent, Transition};
use rhythm_model::{ChannelId, Ruleset, TimelineModel};

use crate::{
    ChannelJudge, CursorSpatial, InvalidWindowConfig, Judgement, LaneSpatial, SpatialPolicy,
    WindowConfig,
};

/// Judge a whole replay.
///
/// In the cursor ruleset the cursor is only known at press and release time;
/// use [`judge_with_cursor`] to supply the full cursor path.
pub fn judge(
    timeline: &TimelineModel,
    input: &[InputEvent],
    config: &WindowConfig,
) -> Result<Vec<Judgement>, InvalidWindowConfig> {
    let cursor = event_cursor(timeline, input);
    judge_with_cursor(timeline, input, &cursor, config)
}

/// Judge a whole replay with cursor movement between transitions.
pub fn judge_with_cursor(
    timeline: &TimelineModel,
    input: &[InputEvent],
    cursor: &CursorPath,
    config: &WindowConfig,
) -> Result<Vec<Judgement>, InvalidWindowConfig> {
    config.validate()?;
    let events = split_by_channel(input, timeline.channel_count());
    let per_channel = events
        .iter()
        .enumerate()
        .map(|(channel, events)| run_channel(timeline, channel, events, cursor, config))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(merge(per_channel))
}

/// Same as [`judge`], one channel per rayon task.
pub fn judge_parallel(
    timeline: &TimelineModel,
    input: &[InputEvent],
    config: &WindowConfig,
) -> Result<Vec<Judgement>, InvalidWindowConfig> {
    config.validate()?;
    let cursor = event_cursor(timeline, input);
    let events = split_by_channel(input, timeline.channel_count());
    let per_channel = events
        .par_iter()
        .enumerate()
        .map(|(channel, events)| run_channel(timeline, channel, events, &cursor, config))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(merge(per_channel))
}

/// Judge one channel in isolation. Events of other channels are ignored.
pub fn judge_channel(
    timeline: &TimelineModel,
    channel: ChannelId,
    input: &[InputEvent],
    config: &WindowConfig,
) -> Result<Vec<Judgement>, InvalidWindowConfig> {
    config.validate()?;
    let cursor = event_cursor(timeline, input);
    let mut events: Vec<InputEvent> = input
        .iter()
        .filter(|e| e.channel == channel)
        .copied()
        .collect();
    events.sort_by_key(|e| e.time);
    run_channel(timeline, channel, &events, &cursor, config)
}

fn event_cursor(timeline: &TimelineModel, input: &[InputEvent]) -> CursorPath {
    if timeline.ruleset().has_position() {
        CursorPath::from_events(input)
    } else {
        CursorPath::default()
    }
}

/// Group events per channel, each group stably ordered by time.
fn split_by_channel(input: &[InputEvent], channel_count: usize) -> Vec<Vec<InputEvent>> {
    let mut events = vec![Vec::new(); channel_count];
    let mut stray = 0usize;
    for event in input {
        match events.get_mut(event.channel) {
            Some(group) => group.push(*event),
            None => stray += 1,
        }
    }
    if stray > 0 {
        debug!("ignored {stray} events on channels outside 0..{channel_count}");
    }
    for group in &mut events {
        group.sort_by_key(|e| e.time);
    }
    events
}

fn run_channel(
    timeline: &TimelineModel,
    channel: ChannelId,
    events: &[InputEvent],
    cursor: &CursorPath,
    config: &WindowConfig,
) -> Result<Vec<Judgement>, InvalidWindowConfig> {
    let judgements = match timeline.ruleset() {
        Ruleset::Cursor => drive::<CursorSpatial>(timeline, channel, events, cursor, config)?,
        Ruleset::Lanes { .. } => drive::<LaneSpatial>(timeline, channel, events, cursor, config)?,
    };
    debug!(
        "channel {channel}: {} scorepoints, {} events, {} judgements",
        timeline.channel(channel).len(),
        events.len(),
        judgements.len()
    );
    Ok(judgements)
}

/// Feed events and cursor samples to one channel judge in time order.
/// A cursor sample is applied before an event at the same time.
fn drive<S: SpatialPolicy>(
    timeline: &TimelineModel,
    channel: ChannelId,
    events: &[InputEvent],
    cursor: &CursorPath,
    config: &WindowConfig,
) -> Result<Vec<Judgement>, InvalidWindowConfig> {
    let mut judge = ChannelJudge::<S>::new(channel, timeline.channel(channel), config)?;
    let samples: &[CursorSample] = if S::HAS_POSITION { cursor.samples() } else { &[] };

    let mut out = Vec::new();
    let mut next_sample = 0;
    for event in events {
        while next_sample < samples.len() && samples[next_sample].time <= event.time {
            let sample = samples[next_sample];
            out.extend(judge.move_cursor(sample.time, sample.pos));
            next_sample += 1;
        }
        let resolved = match event.transition {
            Transition::Press => judge.press(event.time, event.pos),
            Transition::Release => judge.release(event.time, event.pos),
        };
        out.extend(resolved);
    }
    for sample in &samples[next_sample..] {
        out.extend(judge.move_cursor(sample.time, sample.pos));
    }
    out.extend(judge.finish());
    Ok(out)
}

/// Concatenate channel outputs and order by time, then channel. The sort is
/// stable, so emission order breaks the remaining ties.
fn merge(per_channel: Vec<Vec<Judgement>>) -> Vec<Judgement> {
    let mut merged: Vec<Judgement> = per_channel.into_iter().flatten().collect();
    merged.sort_by_key(|j| (j.time, j.channel));
    merged
}
