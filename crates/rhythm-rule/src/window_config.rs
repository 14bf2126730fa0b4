use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timing and spatial tolerances for one judgement run.
///
/// All ranges are milliseconds measured away from the scorepoint: `neg_*`
/// before it, `pos_*` after it. Each `*_miss_range` is the outer boundary of
/// the band whose inner part is the matching hit/release range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub pos_hit_range: i64,
    pub neg_hit_range: i64,
    pub pos_hit_miss_range: i64,
    pub neg_hit_miss_range: i64,

    pub pos_rel_range: i64,
    pub neg_rel_range: i64,
    pub pos_rel_miss_range: i64,
    pub neg_rel_miss_range: i64,

    /// How long before a hold point the hold may already be lost
    pub neg_hld_range: i64,
    /// How long after a hold point a lost hold may be re-acquired
    pub pos_hld_range: i64,

    /// A note cannot be pressed before the previous note's hit window closes
    pub notelock: bool,
    /// Derive windows from the gaps to neighbouring notes
    pub dynamic_window: bool,
    /// Report presses and releases that match nothing as `Empty`
    pub blank_miss: bool,
    /// A hit press completes the whole note
    pub lazy_holds: bool,
    /// A press that hits a note may also resolve the next one
    pub overlap_hit_handling: bool,
    /// A press that misses a note may also resolve the next one
    pub overlap_miss_handling: bool,

    /// Press distance tolerance (cursor ruleset)
    pub hit_radius: Option<f64>,
    /// Hold and release distance tolerance (cursor ruleset)
    pub follow_radius: Option<f64>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            pos_hit_range: 300,
            neg_hit_range: 300,
            pos_hit_miss_range: 450,
            neg_hit_miss_range: 450,
            pos_rel_range: 300,
            neg_rel_range: 300,
            pos_rel_miss_range: 450,
            neg_rel_miss_range: 450,
            neg_hld_range: 50,
            pos_hld_range: 50,
            notelock: false,
            dynamic_window: false,
            blank_miss: false,
            lazy_holds: false,
            overlap_hit_handling: false,
            overlap_miss_handling: false,
            hit_radius: None,
            follow_radius: None,
        }
    }
}

/// Window boundaries that cannot describe a judgement band.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidWindowConfig {
    #[error("{name} must not be negative (got {value})")]
    NegativeRange { name: &'static str, value: i64 },

    #[error("{inner} ({inner_value}) is wider than {outer} ({outer_value})")]
    InnerWiderThanOuter {
        inner: &'static str,
        inner_value: i64,
        outer: &'static str,
        outer_value: i64,
    },

    #[error("{name} must be a finite, non-negative distance (got {value})")]
    InvalidRadius { name: &'static str, value: f64 },
}

impl WindowConfig {
    /// Check every boundary once, before any judgement pass.
    pub fn validate(&self) -> Result<(), InvalidWindowConfig> {
        let ranges = [
            ("pos_hit_range", self.pos_hit_range),
            ("neg_hit_range", self.neg_hit_range),
            ("pos_hit_miss_range", self.pos_hit_miss_range),
            ("neg_hit_miss_range", self.neg_hit_miss_range),
            ("pos_rel_range", self.pos_rel_range),
            ("neg_rel_range", self.neg_rel_range),
            ("pos_rel_miss_range", self.pos_rel_miss_range),
            ("neg_rel_miss_range", self.neg_rel_miss_range),
            ("neg_hld_range", self.neg_hld_range),
            ("pos_hld_range", self.pos_hld_range),
        ];
        if let Some(&(name, value)) = ranges.iter().find(|(_, value)| *value < 0) {
            return Err(InvalidWindowConfig::NegativeRange { name, value });
        }

        let nested = [
            (
                ("pos_hit_range", self.pos_hit_range),
                ("pos_hit_miss_range", self.pos_hit_miss_range),
            ),
            (
                ("neg_hit_range", self.neg_hit_range),
                ("neg_hit_miss_range", self.neg_hit_miss_range),
            ),
            (
                ("pos_rel_range", self.pos_rel_range),
                ("pos_rel_miss_range", self.pos_rel_miss_range),
            ),
            (
                ("neg_rel_range", self.neg_rel_range),
                ("neg_rel_miss_range", self.neg_rel_miss_range),
            ),
        ];
        for ((inner, inner_value), (outer, outer_value)) in nested {
            if inner_value > outer_value {
                return Err(InvalidWindowConfig::InnerWiderThanOuter {
                    inner,
                    inner_value,
                    outer,
                    outer_value,
                });
            }
        }

        for (name, radius) in [
            ("hit_radius", self.hit_radius),
            ("follow_radius", self.follow_radius),
        ] {
            if let Some(value) = radius
                && !(value.is_finite() && value >= 0.0)
            {
                return Err(InvalidWindowConfig::InvalidRadius { name, value });
            }
        }
        Ok(())
    }

    /// Read a config from a JSON file. Missing fields take their defaults.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read window config {}", path.display()))?;
        let config: WindowConfig = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse window config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write config to a JSON file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
