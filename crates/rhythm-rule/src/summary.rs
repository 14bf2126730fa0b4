use serde::{Deserialize, Serialize};

use crate::{Judgement, Outcome};

/// Aggregate statistics over one judgement sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JudgementSummary {
    // Outcome counts
    pub hit: usize,
    pub miss: usize,
    pub hold_ok: usize,
    pub hold_fail: usize,
    pub release_hit: usize,
    pub release_miss: usize,
    pub empty: usize,

    /// Press offsets (hits and offset misses) in judgement order
    pub press_offsets: Vec<f64>,
    /// Mean press offset (ms), 0 with no offsets
    pub mean_offset: f64,
    /// Population variance of press offsets
    pub offset_variance: f64,
    /// Mean cursor distance over judgements that carry one
    pub mean_pos_offset: Option<f64>,
}

impl JudgementSummary {
    pub fn from_judgements(judgements: &[Judgement]) -> Self {
        let mut summary = Self::default();
        let mut pos_total = 0.0;
        let mut pos_count = 0usize;

        for j in judgements {
            *summary.count_mut(j.outcome) += 1;
            if matches!(j.outcome, Outcome::Hit | Outcome::Miss)
                && let Some(offset) = j.time_offset
            {
                summary.press_offsets.push(offset);
            }
            if let Some(distance) = j.pos_offset {
                pos_total += distance;
                pos_count += 1;
            }
        }

        let n = summary.press_offsets.len();
        if n > 0 {
            let mean = summary.press_offsets.iter().sum::<f64>() / n as f64;
            summary.mean_offset = mean;
            summary.offset_variance = summary
                .press_offsets
                .iter()
                .map(|x| (x - mean).powi(2))
                .sum::<f64>()
                / n as f64;
        }
        if pos_count > 0 {
            summary.mean_pos_offset = Some(pos_total / pos_count as f64);
        }
        summary
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        match outcome {
            Outcome::Hit => self.hit,
            Outcome::Miss => self.miss,
            Outcome::HoldOk => self.hold_ok,
            Outcome::HoldFail => self.hold_fail,
            Outcome::ReleaseHit => self.release_hit,
            Outcome::ReleaseMiss => self.release_miss,
            Outcome::Empty => self.empty,
        }
    }

    fn count_mut(&mut self, outcome: Outcome) -> &mut usize {
        match outcome {
            Outcome::Hit => &mut self.hit,
            Outcome::Miss => &mut self.miss,
            Outcome::HoldOk => &mut self.hold_ok,
            Outcome::HoldFail => &mut self.hold_fail,
            Outcome::ReleaseHit => &mut self.release_hit,
            Outcome::ReleaseMiss => &mut self.release_miss,
            Outcome::Empty => &mut self.empty,
        }
    }

    /// Judgements tied to a scorepoint.
    pub fn total(&self) -> usize {
        Outcome::ALL
            .into_iter()
            .filter(|&o| o != Outcome::Empty)
            .map(|o| self.count(o))
            .sum()
    }

    /// Standard deviation of press offsets.
    pub fn offset_std_dev(&self) -> f64 {
        self.offset_variance.sqrt()
    }

    /// Share of press offsets with `|offset| <= threshold`. 0 with no offsets.
    pub fn probability_within(&self, threshold: f64) -> f64 {
        if self.press_offsets.is_empty() {
            return 0.0;
        }
        let within = self
            .press_offsets
            .iter()
            .filter(|offset| offset.abs() <= threshold)
            .count();
        within as f64 / self.press_offsets.len() as f64
    }
}
