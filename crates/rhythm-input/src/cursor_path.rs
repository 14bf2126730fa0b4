use rhythm_model::Point;
use serde::{Deserialize, Serialize};

use crate::InputEvent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorSample {
    pub time: i64,
    pub pos: Point,
}

/// Time-ordered cursor positions. The cursor stays put between samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CursorPath {
    samples: Vec<CursorSample>,
}

impl CursorPath {
    /// Build from samples already in time order, dropping repeated positions.
    pub fn new(samples: impl IntoIterator<Item = CursorSample>) -> Self {
        let mut path: Vec<CursorSample> = Vec::new();
        for sample in samples {
            match path.last() {
                Some(last) if last.time > sample.time => continue,
                Some(last) if last.pos == sample.pos => continue,
                _ => path.push(sample),
            }
        }
        Self { samples: path }
    }

    /// Positions known only at press/release time.
    pub fn from_events(events: &[InputEvent]) -> Self {
        Self::new(events.iter().filter_map(|e| {
            e.pos.map(|pos| CursorSample { time: e.time, pos })
        }))
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[CursorSample] {
        &self.samples
    }
}
