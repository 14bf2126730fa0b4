use serde::{Deserialize, Serialize};

use crate::WindowConfig;

/// A tolerance band around a scorepoint: `neg` ms before, `pos` ms after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Window {
    pub neg: i64,
    pub pos: i64,
}

impl Window {
    pub const fn new(neg: i64, pos: i64) -> Self {
        Self { neg, pos }
    }

    /// Whether `delta` (event − scorepoint) lies in `[-neg, pos]`.
    pub fn contains(self, delta: i64) -> bool {
        -self.neg <= delta && delta <= self.pos
    }
}

/// Where an offset falls relative to an inner window and its outer miss window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Inner,
    Miss,
    Outside,
}

impl Band {
    pub fn classify(delta: i64, inner: Window, outer: Window) -> Self {
        if inner.contains(delta) {
            Self::Inner
        } else if outer.contains(delta) {
            Self::Miss
        } else {
            Self::Outside
        }
    }
}

/// The windows in effect for one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteWindows {
    pub hit: Window,
    pub hit_miss: Window,
    pub rel: Window,
    pub rel_miss: Window,
    pub hld: Window,
}

impl NoteWindows {
    /// The fixed windows of `config`.
    pub fn fixed(config: &WindowConfig) -> Self {
        Self {
            hit: Window::new(config.neg_hit_range, config.pos_hit_range),
            hit_miss: Window::new(config.neg_hit_miss_range, config.pos_hit_miss_range),
            rel: Window::new(config.neg_rel_range, config.pos_rel_range),
            rel_miss: Window::new(config.neg_rel_miss_range, config.pos_rel_miss_range),
            hld: Window::new(config.neg_hld_range, config.pos_hld_range),
        }
    }

    /// Windows for a note whose press is `prev_gap` ms after the previous
    /// note's press and `next_gap` ms before the next one's.
    ///
    /// With `dynamic_window`, a side that has a neighbour uses a quarter of
    /// the gap as the inner range and half of it as the miss range, so the
    /// miss bands of two neighbours meet but never cross. Hold tolerance is a
    /// quarter of the gap. Sides without a neighbour keep the fixed value.
    pub fn for_note(config: &WindowConfig, prev_gap: Option<i64>, next_gap: Option<i64>) -> Self {
        let fixed = Self::fixed(config);
        if !config.dynamic_window {
            return fixed;
        }

        let inner = |gap: Option<i64>, fixed: i64| gap.map_or(fixed, |g| g.max(0) / 4);
        let outer = |gap: Option<i64>, fixed: i64| gap.map_or(fixed, |g| g.max(0) / 2);
        Self {
            hit: Window::new(inner(prev_gap, fixed.hit.neg), inner(next_gap, fixed.hit.pos)),
            hit_miss: Window::new(
                outer(prev_gap, fixed.hit_miss.neg),
                outer(next_gap, fixed.hit_miss.pos),
            ),
            rel: Window::new(inner(prev_gap, fixed.rel.neg), inner(next_gap, fixed.rel.pos)),
            rel_miss: Window::new(
                outer(prev_gap, fixed.rel_miss.neg),
                outer(next_gap, fixed.rel_miss.pos),
            ),
            hld: Window::new(inner(prev_gap, fixed.hld.neg), inner(next_gap, fixed.hld.pos)),
        }
    }
}
