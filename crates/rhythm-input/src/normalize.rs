// Raw frame -> transition normalization.
//
// Each channel is reduced independently: frames that do not change the
// channel's logical state are dropped, and a frame that swaps one held button
// for another becomes a release followed by a press one unit later.

use log::{debug, warn};
use rhythm_model::{ChannelId, Point};

use crate::{ChannelMap, CursorPath, CursorSample, DegenerateInput, InputEvent, RawSample};

/// Drop frames that go back in time. Equal times are kept.
fn ordered_samples(raw_samples: &[RawSample]) -> Vec<&RawSample> {
    let mut ordered = Vec::with_capacity(raw_samples.len());
    let mut last_time = i64::MIN;
    let mut dropped = 0usize;
    for sample in raw_samples {
        if sample.time < last_time {
            dropped += 1;
            continue;
        }
        last_time = sample.time;
        ordered.push(sample);
    }
    if dropped > 0 {
        debug!("dropped {dropped} out-of-order input frames");
    }
    ordered
}

/// Per-channel event writer keeping times strictly increasing.
struct EventWriter {
    channel: ChannelId,
    events: Vec<InputEvent>,
}

impl EventWriter {
    fn push_press(&mut self, time: i64, pos: Option<Point>) {
        let time = self.next_time(time);
        self.events.push(InputEvent::press(time, self.channel, pos));
    }

    fn push_release(&mut self, time: i64, pos: Option<Point>) {
        let time = self.next_time(time);
        self.events.push(InputEvent::release(time, self.channel, pos));
    }

    fn next_time(&self, time: i64) -> i64 {
        match self.events.last() {
            Some(last) if time <= last.time => last.time.saturating_add(1),
            _ => time,
        }
    }
}

fn normalize_ordered(
    samples: &[&RawSample],
    mask: u32,
    channel: ChannelId,
) -> Result<Vec<InputEvent>, DegenerateInput> {
    let mut writer = EventWriter {
        channel,
        events: Vec::new(),
    };
    let mut previous: Option<(u32, i64)> = None;
    let mut settled = false;

    for sample in samples {
        let held = sample.buttons & mask;
        let Some((prev, prev_time)) = previous else {
            if held != 0 {
                writer.push_press(sample.time, sample.pos);
            }
            previous = Some((held, sample.time));
            continue;
        };
        // A state that lasted longer than one unit was a real, stable state.
        if sample.time.saturating_sub(prev_time) > 1 {
            settled = true;
        }

        match (prev != 0, held != 0) {
            (false, true) => writer.push_press(sample.time, sample.pos),
            (true, false) => writer.push_release(sample.time, sample.pos),
            (true, true) if held & !prev != 0 && prev & !held != 0 => {
                // One button let go while another went down in the same frame:
                // the new state wins, separated by a one-unit release.
                writer.push_release(sample.time, sample.pos);
                writer.push_press(sample.time, sample.pos);
            }
            _ => settled = true,
        }
        previous = Some((held, sample.time));
    }

    if samples.len() >= 2 && !settled {
        return Err(DegenerateInput {
            channel,
            samples: samples.len(),
        });
    }
    Ok(writer.events)
}

/// Normalize every channel independently; a degenerate channel only fails its own slot.
pub fn normalize_channels(
    raw_samples: &[RawSample],
    channel_map: &ChannelMap,
) -> Vec<Result<Vec<InputEvent>, DegenerateInput>> {
    let samples = ordered_samples(raw_samples);
    (0..channel_map.channel_count())
        .map(|channel| {
            let result = normalize_ordered(&samples, channel_map.channel_mask(channel), channel);
            if let Err(err) = &result {
                warn!("{err}");
            }
            result
        })
        .collect()
}

/// Normalize all channels and merge them by time, then channel.
pub fn normalize_input(
    raw_samples: &[RawSample],
    channel_map: &ChannelMap,
) -> Result<Vec<InputEvent>, DegenerateInput> {
    let mut merged = Vec::new();
    for result in normalize_channels(raw_samples, channel_map) {
        merged.extend(result?);
    }
    merged.sort_by_key(|e| (e.time, e.channel));
    debug!(
        "normalized {} frames into {} events over {} channels",
        raw_samples.len(),
        merged.len(),
        channel_map.channel_count()
    );
    Ok(merged)
}

/// Cursor positions of the in-order frames that carry one.
pub fn normalize_cursor_path(raw_samples: &[RawSample]) -> CursorPath {
    CursorPath::new(
        ordered_samples(raw_samples)
            .into_iter()
            .filter_map(|s| s.pos.map(|pos| CursorSample { time: s.time, pos })),
    )
}
