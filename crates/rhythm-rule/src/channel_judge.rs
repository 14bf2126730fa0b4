// Per-channel judgement state machine.
//
// A channel walks its scorepoint table note by note:
//
//   AwaitPress -> AwaitHold (per Hold point) -> AwaitRelease -> AwaitPress (next note)
//
// Between inputs the channel state is constant, so every time boundary up to
// an input's time is resolved first (time-outs, hold decisions), then the
// input is applied, then boundaries at that same instant are resolved again.

use std::marker::PhantomData;
use std::ops::Range;

use rhythm_model::{Action, ChannelId, Point, Scorepoint, note_runs};

use crate::{
    Band, InvalidWindowConfig, Judgement, NoteWindows, Outcome, SpatialPolicy, WindowConfig,
};

/// What the channel is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JudgeState {
    AwaitPress,
    AwaitHold,
    AwaitRelease,
    /// Every scorepoint has been resolved
    Finished,
}

#[derive(Debug, Clone)]
struct NoteSlot {
    range: Range<usize>,
    windows: NoteWindows,
    /// With notelock, presses at or before this time cannot touch the note
    press_after: Option<i64>,
}

/// How a press resolved the current note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressResult {
    /// Hit, and nothing of the note is left
    Completed,
    /// Hit, the note continues with holds or a release
    Entered,
    Missed,
}

/// Incremental judge for one channel.
///
/// Feed it inputs in time order; each call returns the judgements it resolved
/// (possibly none). Calls with a time earlier than a previous call are treated
/// as happening at that previous time. `finish` resolves everything left.
#[derive(Debug)]
pub struct ChannelJudge<'a, S> {
    channel: ChannelId,
    config: &'a WindowConfig,
    points: &'a [Scorepoint],
    notes: Vec<NoteSlot>,
    note_idx: usize,
    point_idx: usize,
    state: JudgeState,

    pressed: bool,
    pos: Option<Point>,
    last_release: Option<i64>,
    last_release_pos: Option<Point>,
    note_pressed_at: Option<i64>,

    // hold tracking against the current hold point
    holding: bool,
    lost_at: Option<i64>,
    reacquired_at: Option<i64>,

    now: i64,
    out: Vec<Judgement>,
    _spatial: PhantomData<S>,
}

impl<'a, S: SpatialPolicy> ChannelJudge<'a, S> {
    /// Judge `points`, one channel's scorepoint table, under `config`.
    pub fn new(
        channel: ChannelId,
        points: &'a [Scorepoint],
        config: &'a WindowConfig,
    ) -> Result<Self, InvalidWindowConfig> {
        config.validate()?;

        let runs = note_runs(points);
        let press_times: Vec<i64> = runs.iter().map(|run| points[run.start].time).collect();
        let mut notes: Vec<NoteSlot> = Vec::with_capacity(runs.len());
        for (i, range) in runs.into_iter().enumerate() {
            let prev_gap = i
                .checked_sub(1)
                .map(|prev| press_times[i].saturating_sub(press_times[prev]));
            let next_gap = press_times
                .get(i + 1)
                .map(|next| next.saturating_sub(press_times[i]));
            let press_after = match notes.last() {
                Some(prev) if config.notelock => {
                    Some(press_times[i - 1].saturating_add(prev.windows.hit.pos))
                }
                _ => None,
            };
            notes.push(NoteSlot {
                range,
                windows: NoteWindows::for_note(config, prev_gap, next_gap),
                press_after,
            });
        }

        let (state, point_idx) = match notes.first() {
            Some(first) => (JudgeState::AwaitPress, first.range.start),
            None => (JudgeState::Finished, 0),
        };
        Ok(Self {
            channel,
            config,
            points,
            notes,
            note_idx: 0,
            point_idx,
            state,
            pressed: false,
            pos: None,
            last_release: None,
            last_release_pos: None,
            note_pressed_at: None,
            holding: false,
            lost_at: None,
            reacquired_at: None,
            now: i64::MIN,
            out: Vec::new(),
            _spatial: PhantomData,
        })
    }

    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    pub fn state(&self) -> JudgeState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == JudgeState::Finished
    }

    /// Let time pass to `t` with no input change.
    pub fn advance_to(&mut self, t: i64) -> Vec<Judgement> {
        let t = self.clock(t);
        self.sweep(t, false);
        self.take()
    }

    pub fn press(&mut self, t: i64, pos: Option<Point>) -> Vec<Judgement> {
        let t = self.clock(t);
        self.sweep(t, false);

        self.pressed = true;
        if pos.is_some() {
            self.pos = pos;
        }
        let matched = match self.state {
            JudgeState::AwaitPress => self.press_notes(t, self.pos),
            JudgeState::AwaitHold => {
                self.refresh_hold(t);
                true
            }
            JudgeState::AwaitRelease => true,
            JudgeState::Finished => false,
        };
        if !matched && self.config.blank_miss {
            self.out.push(Judgement::empty(t, self.channel));
        }

        self.sweep(t, false);
        self.take()
    }

    pub fn release(&mut self, t: i64, pos: Option<Point>) -> Vec<Judgement> {
        let t = self.clock(t);
        self.sweep(t, false);

        self.pressed = false;
        if pos.is_some() {
            self.pos = pos;
        }
        self.last_release = Some(t);
        self.last_release_pos = self.pos;
        match self.state {
            JudgeState::AwaitHold => self.refresh_hold(t),
            JudgeState::AwaitRelease => {
                if !self.release_note(t, self.pos) && self.config.blank_miss {
                    self.out.push(Judgement::empty(t, self.channel));
                }
            }
            JudgeState::AwaitPress | JudgeState::Finished => {}
        }

        self.sweep(t, false);
        self.take()
    }

    pub fn move_cursor(&mut self, t: i64, pos: Point) -> Vec<Judgement> {
        let t = self.clock(t);
        self.sweep(t, false);

        self.pos = Some(pos);
        if self.state == JudgeState::AwaitHold {
            self.refresh_hold(t);
        }

        self.sweep(t, false);
        self.take()
    }

    /// No more input: resolve every remaining scorepoint with the current state.
    pub fn finish(&mut self) -> Vec<Judgement> {
        let now = self.now;
        self.sweep(now, true);
        self.take()
    }

    fn clock(&mut self, t: i64) -> i64 {
        self.now = self.now.max(t);
        self.now
    }

    fn take(&mut self) -> Vec<Judgement> {
        std::mem::take(&mut self.out)
    }

    fn windows(&self) -> NoteWindows {
        self.notes[self.note_idx].windows
    }

    fn note_end(&self) -> usize {
        self.notes[self.note_idx].range.end
    }

    fn emit(
        &mut self,
        idx: usize,
        outcome: Outcome,
        time_offset: Option<i64>,
        pos_offset: Option<f64>,
    ) {
        let point = self.points[idx];
        self.out.push(Judgement {
            time: point.time,
            channel: self.channel,
            object_id: Some(point.object_id),
            time_offset: time_offset.map(|delta| delta as f64),
            pos_offset,
            outcome,
        });
    }

    fn next_note(&mut self) {
        self.note_idx += 1;
        self.note_pressed_at = None;
        match self.notes.get(self.note_idx) {
            Some(slot) => {
                self.point_idx = slot.range.start;
                self.state = JudgeState::AwaitPress;
            }
            None => {
                self.point_idx = self.points.len();
                self.state = JudgeState::Finished;
            }
        }
    }

    /// Move past the current point; `at` is the instant the move happens.
    fn advance_point(&mut self, at: i64) {
        self.point_idx += 1;
        if self.point_idx >= self.note_end() {
            self.next_note();
            return;
        }
        match self.points[self.point_idx].action {
            Action::Hold => {
                self.state = JudgeState::AwaitHold;
                self.refresh_hold(at);
            }
            Action::Release => {
                self.state = JudgeState::AwaitRelease;
                self.replay_release();
            }
            Action::Press => self.state = JudgeState::AwaitPress,
        }
    }

    /// Resolve the rest of the current note without offsets, then move on.
    fn resolve_rest(&mut self, success: bool) {
        for idx in self.point_idx + 1..self.note_end() {
            let outcome = match (self.points[idx].action, success) {
                (Action::Press, true) => Outcome::Hit,
                (Action::Press, false) => Outcome::Miss,
                (Action::Hold, true) => Outcome::HoldOk,
                (Action::Hold, false) => Outcome::HoldFail,
                (Action::Release, true) => Outcome::ReleaseHit,
                (Action::Release, false) => Outcome::ReleaseMiss,
            };
            self.emit(idx, outcome, None, None);
        }
        self.next_note();
    }

    fn sweep(&mut self, t: i64, flush: bool) {
        loop {
            let resolved = match self.state {
                JudgeState::Finished => false,
                JudgeState::AwaitPress => self.sweep_press(t, flush),
                JudgeState::AwaitHold => self.sweep_hold(t, flush),
                JudgeState::AwaitRelease => self.sweep_release(t, flush),
            };
            if !resolved {
                break;
            }
        }
    }

    fn sweep_press(&mut self, t: i64, flush: bool) -> bool {
        let deadline = self.points[self.point_idx]
            .time
            .saturating_add(self.windows().hit_miss.pos);
        if !flush && t <= deadline {
            return false;
        }
        self.emit(self.point_idx, Outcome::Miss, None, None);
        self.resolve_rest(false);
        true
    }

    fn sweep_hold(&mut self, t: i64, flush: bool) -> bool {
        let point = self.points[self.point_idx];
        let hld = self.windows().hld;
        let th = point.time;

        if self.holding {
            if !flush && t < th {
                return false;
            }
            let offset = self.reacquired_at.filter(|&r| r > th).map(|r| r.saturating_sub(th));
            let pos_offset = S::offset(self.pos, point.target_pos);
            self.emit(self.point_idx, Outcome::HoldOk, offset, pos_offset);
            self.advance_point(th);
            return true;
        }

        let lost = self.lost_at.unwrap_or(self.now);
        if lost >= th.saturating_sub(hld.neg) {
            if !flush && t < th {
                return false;
            }
            self.emit(self.point_idx, Outcome::HoldOk, Some(lost.saturating_sub(th)), None);
            self.advance_point(th);
        } else {
            if !flush && t <= th.saturating_add(hld.pos) {
                return false;
            }
            self.emit(self.point_idx, Outcome::HoldFail, Some(lost.saturating_sub(th)), None);
            self.resolve_rest(false);
        }
        true
    }

    fn sweep_release(&mut self, t: i64, flush: bool) -> bool {
        let deadline = self.points[self.point_idx]
            .time
            .saturating_add(self.windows().rel_miss.pos);
        if !flush && t <= deadline {
            return false;
        }
        self.emit(self.point_idx, Outcome::ReleaseMiss, None, None);
        self.next_note();
        true
    }

    /// Offer one press to the current note, and to following notes when an
    /// overlap flag allows it. Returns whether anything was resolved.
    fn press_notes(&mut self, t: i64, pos: Option<Point>) -> bool {
        if !self.config.overlap_miss_handling {
            self.seek_nearest(t, pos);
        }
        let mut matched = false;
        while self.state == JudgeState::AwaitPress {
            let result = self.try_press(t, pos);
            matched |= result.is_some();
            let offer_next = match result {
                Some(PressResult::Completed) => self.config.overlap_hit_handling,
                Some(PressResult::Missed) => self.config.overlap_miss_handling,
                Some(PressResult::Entered) | None => false,
            };
            if !offer_next {
                break;
            }
        }
        matched
    }

    /// Offset of a press at `t` against note `note`, if the note accepts it.
    fn press_delta(&self, note: usize, t: i64, pos: Option<Point>) -> Option<i64> {
        let slot = &self.notes[note];
        if slot.press_after.is_some_and(|after| t <= after) {
            return None;
        }
        let point = self.points[slot.range.start];
        if !S::radius_check(pos, point.target_pos, self.config.hit_radius) {
            return None;
        }
        let delta = t.saturating_sub(point.time);
        slot.windows.hit_miss.contains(delta).then_some(delta)
    }

    /// Move to the note whose press is closest to `t`. Earlier notes it
    /// passes over are resolved the way their time-out would resolve them.
    /// Ties go to the earlier note.
    fn seek_nearest(&mut self, t: i64, pos: Option<Point>) {
        let mut nearest: Option<(usize, u64)> = None;
        for note in self.note_idx..self.notes.len() {
            let slot = &self.notes[note];
            let opens = self.points[slot.range.start]
                .time
                .saturating_sub(slot.windows.hit_miss.neg);
            if t < opens {
                break;
            }
            let Some(delta) = self.press_delta(note, t, pos) else {
                continue;
            };
            if nearest.is_none_or(|(_, best)| delta.unsigned_abs() < best) {
                nearest = Some((note, delta.unsigned_abs()));
            }
        }

        let Some((target, _)) = nearest else {
            return;
        };
        while self.note_idx < target {
            self.emit(self.point_idx, Outcome::Miss, None, None);
            self.resolve_rest(false);
        }
    }

    fn try_press(&mut self, t: i64, pos: Option<Point>) -> Option<PressResult> {
        let delta = self.press_delta(self.note_idx, t, pos)?;
        let windows = self.windows();
        let end = self.note_end();
        let point = self.points[self.point_idx];
        let pos_offset = S::offset(pos, point.target_pos);
        match Band::classify(delta, windows.hit, windows.hit_miss) {
            Band::Inner => {
                self.emit(self.point_idx, Outcome::Hit, Some(delta), pos_offset);
                self.note_pressed_at = Some(t);
                if self.config.lazy_holds || self.point_idx + 1 == end {
                    self.resolve_rest(true);
                    return Some(PressResult::Completed);
                }
                self.holding = true;
                self.lost_at = None;
                self.reacquired_at = None;
                self.advance_point(t);
                Some(PressResult::Entered)
            }
            Band::Miss => {
                self.emit(self.point_idx, Outcome::Miss, Some(delta), pos_offset);
                self.resolve_rest(false);
                Some(PressResult::Missed)
            }
            Band::Outside => None,
        }
    }

    /// Judge a release against the current release point.
    fn release_note(&mut self, t: i64, pos: Option<Point>) -> bool {
        let point = self.points[self.point_idx];
        let windows = self.windows();
        if !S::radius_check(pos, point.target_pos, self.config.follow_radius) {
            return false;
        }

        let delta = t.saturating_sub(point.time);
        let outcome = match Band::classify(delta, windows.rel, windows.rel_miss) {
            Band::Inner => Outcome::ReleaseHit,
            Band::Miss => Outcome::ReleaseMiss,
            Band::Outside => return false,
        };
        self.emit(
            self.point_idx,
            outcome,
            Some(delta),
            S::offset(pos, point.target_pos),
        );
        self.next_note();
        true
    }

    /// On reaching the release point, judge a release that already happened.
    fn replay_release(&mut self) {
        if self.pressed {
            return;
        }
        if let (Some(released), Some(pressed_at)) = (self.last_release, self.note_pressed_at)
            && released > pressed_at
        {
            self.release_note(released, self.last_release_pos);
        }
    }

    /// Recompute whether the current hold point is held, recording the
    /// instant it was lost or re-acquired.
    fn refresh_hold(&mut self, t: i64) {
        let target = self.points[self.point_idx].target_pos;
        let held = self.pressed && S::radius_check(self.pos, target, self.config.follow_radius);
        if held == self.holding {
            return;
        }
        if held {
            self.reacquired_at = Some(t);
        } else {
            self.lost_at = Some(t);
            self.reacquired_at = None;
        }
        self.holding = held;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CursorSpatial, LaneSpatial};
    use rhythm_model::{NoteDef, Ruleset, SliderTick, TimelineModel, build_timeline};

    fn lanes(defs: &[NoteDef]) -> TimelineModel {
        build_timeline(defs, Ruleset::Lanes { count: 1 }).unwrap()
    }

    fn outcomes(judgements: &[Judgement]) -> Vec<(i64, Outcome)> {
        judgements.iter().map(|j| (j.time, j.outcome)).collect()
    }

    #[test]
    fn empty_table_is_finished() {
        let config = WindowConfig::default();
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, &[], &config).unwrap();
        assert!(judge.is_finished());
        assert!(judge.press(10, None).is_empty());
        assert!(judge.finish().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = WindowConfig {
            neg_hit_range: -5,
            ..WindowConfig::default()
        };
        assert!(ChannelJudge::<LaneSpatial>::new(0, &[], &config).is_err());
    }

    #[test]
    fn tap_hit_records_offset() {
        let timeline = lanes(&[NoteDef::tap(0, 1000)]);
        let config = WindowConfig::default();
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        let out = judge.press(980, None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].outcome, Outcome::Hit);
        assert_eq!(out[0].time, 1000);
        assert_eq!(out[0].time_offset, Some(-20.0));
        assert_eq!(out[0].object_id, Some(0));
        assert!(judge.is_finished());
        assert!(judge.release(1050, None).is_empty());
    }

    #[test]
    fn press_outside_miss_band_is_ignored() {
        let timeline = lanes(&[NoteDef::tap(0, 1000)]);
        let config = WindowConfig::default();
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        assert!(judge.press(549, None).is_empty());
        assert_eq!(judge.state(), JudgeState::AwaitPress);
        judge.release(560, None);
        assert_eq!(outcomes(&judge.press(560, None)), [(1000, Outcome::Miss)]);
    }

    #[test]
    fn blank_miss_reports_unmatched_press() {
        let timeline = lanes(&[NoteDef::tap(0, 1000)]);
        let config = WindowConfig {
            blank_miss: true,
            ..WindowConfig::default()
        };
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        let out = judge.press(100, None);
        assert_eq!(out, [Judgement::empty(100, 0)]);
        judge.release(150, None);
        assert_eq!(outcomes(&judge.press(1000, None)), [(1000, Outcome::Hit)]);
        judge.release(1050, None);
        assert_eq!(judge.press(1100, None), [Judgement::empty(1100, 0)]);
    }

    #[test]
    fn hold_note_success_path() {
        let timeline = lanes(&[NoteDef::hold(0, 350, 750, vec![600])]);
        let config = WindowConfig::default();
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        assert_eq!(outcomes(&judge.press(350, None)), [(350, Outcome::Hit)]);
        assert_eq!(judge.state(), JudgeState::AwaitHold);
        assert!(judge.advance_to(599).is_empty());
        assert_eq!(outcomes(&judge.advance_to(600)), [(600, Outcome::HoldOk)]);
        assert_eq!(judge.state(), JudgeState::AwaitRelease);

        let out = judge.release(760, None);
        assert_eq!(outcomes(&out), [(750, Outcome::ReleaseHit)]);
        assert_eq!(out[0].time_offset, Some(10.0));
        assert!(judge.is_finished());
    }

    #[test]
    fn hold_loss_inside_tolerance_is_forgiven() {
        let timeline = lanes(&[NoteDef::hold(0, 350, 750, vec![600])]);
        let config = WindowConfig::default();
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        judge.press(350, None);
        assert!(judge.release(550, None).is_empty());
        let out = judge.advance_to(600);
        assert_eq!(
            outcomes(&out),
            [(600, Outcome::HoldOk), (750, Outcome::ReleaseHit)]
        );
        assert_eq!(out[0].time_offset, Some(-50.0));
        assert_eq!(out[1].time_offset, Some(-200.0));
    }

    #[test]
    fn hold_loss_before_tolerance_fails_rest() {
        let timeline = lanes(&[NoteDef::hold(0, 350, 750, vec![600, 700])]);
        let config = WindowConfig::default();
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        judge.press(350, None);
        judge.release(549, None);
        assert!(judge.advance_to(650).is_empty());
        let out = judge.advance_to(651);
        assert_eq!(
            outcomes(&out),
            [
                (600, Outcome::HoldFail),
                (700, Outcome::HoldFail),
                (750, Outcome::ReleaseMiss)
            ]
        );
        assert_eq!(out[0].time_offset, Some(-51.0));
        assert_eq!(out[1].time_offset, None);
    }

    #[test]
    fn hold_reacquired_inside_tolerance() {
        let timeline = lanes(&[NoteDef::hold(0, 0, 1000, vec![500])]);
        let config = WindowConfig::default();
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        judge.press(0, None);
        judge.release(200, None);
        let out = judge.press(530, None);
        assert_eq!(outcomes(&out), [(500, Outcome::HoldOk)]);
        assert_eq!(out[0].time_offset, Some(30.0));
        assert_eq!(judge.state(), JudgeState::AwaitRelease);
    }

    #[test]
    fn finish_resolves_everything_left() {
        let timeline = lanes(&[
            NoteDef::tap(0, 100),
            NoteDef::hold(0, 500, 900, vec![700]),
        ]);
        let config = WindowConfig::default();
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        judge.press(100, None);
        judge.release(120, None);
        judge.press(500, None);
        assert_eq!(judge.state(), JudgeState::AwaitHold);
        // Still pressed: the hold keeps going forever.
        let out = judge.finish();
        assert_eq!(
            outcomes(&out),
            [(700, Outcome::HoldOk), (900, Outcome::ReleaseMiss)]
        );
        assert!(judge.is_finished());
    }

    #[test]
    fn lazy_holds_complete_on_hit() {
        let timeline = lanes(&[NoteDef::hold(0, 0, 1000, vec![250, 500])]);
        let config = WindowConfig {
            lazy_holds: true,
            ..WindowConfig::default()
        };
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        let out = judge.press(10, None);
        assert_eq!(
            outcomes(&out),
            [
                (0, Outcome::Hit),
                (250, Outcome::HoldOk),
                (500, Outcome::HoldOk),
                (1000, Outcome::ReleaseHit)
            ]
        );
        assert!(out[1..].iter().all(|j| j.time_offset.is_none()));
        assert!(judge.release(20, None).is_empty());
    }

    #[test]
    fn early_release_on_hold_without_ticks_times_out() {
        let timeline = lanes(&[NoteDef::hold(0, 0, 1000, vec![])]);
        let config = WindowConfig {
            blank_miss: true,
            ..WindowConfig::default()
        };
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        judge.press(0, None);
        assert_eq!(judge.release(100, None), [Judgement::empty(100, 0)]);
        assert!(judge.advance_to(1450).is_empty());
        assert_eq!(
            outcomes(&judge.advance_to(1451)),
            [(1000, Outcome::ReleaseMiss)]
        );
    }

    #[test]
    fn notelock_blocks_press_until_previous_window_closes() {
        let defs = [NoteDef::tap(0, 1000), NoteDef::tap(0, 1200)];
        let timeline = lanes(&defs);
        let config = WindowConfig {
            notelock: true,
            ..WindowConfig::default()
        };
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        assert_eq!(outcomes(&judge.press(1000, None)), [(1000, Outcome::Hit)]);
        judge.release(1100, None);
        // 1250 is within the second note's hit window but not past 1000 + 300.
        assert!(judge.press(1250, None).is_empty());
        judge.release(1290, None);
        assert_eq!(outcomes(&judge.press(1301, None)), [(1200, Outcome::Hit)]);
    }

    #[test]
    fn overlap_hit_offers_press_to_next_note() {
        let defs = [NoteDef::tap(0, 1000), NoteDef::tap(0, 1010)];
        let timeline = lanes(&defs);
        let single = WindowConfig::default();
        let overlap = WindowConfig {
            overlap_hit_handling: true,
            ..WindowConfig::default()
        };

        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &single).unwrap();
        assert_eq!(judge.press(1005, None).len(), 1);

        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &overlap).unwrap();
        let out = judge.press(1005, None);
        assert_eq!(outcomes(&out), [(1000, Outcome::Hit), (1010, Outcome::Hit)]);
        assert_eq!(out[1].time_offset, Some(-5.0));
    }

    #[test]
    fn overlap_miss_offers_press_to_next_note() {
        let defs = [NoteDef::tap(0, 1000), NoteDef::tap(0, 1700)];
        let timeline = lanes(&defs);
        let config = WindowConfig {
            overlap_miss_handling: true,
            ..WindowConfig::default()
        };
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        // 1400 is late for the first note and early inside the second's hit window.
        let out = judge.press(1400, None);
        assert_eq!(outcomes(&out), [(1000, Outcome::Miss), (1700, Outcome::Hit)]);
    }

    #[test]
    fn press_goes_to_nearest_note() {
        let defs = [NoteDef::tap(0, 1000), NoteDef::tap(0, 1400)];
        let timeline = lanes(&defs);
        let config = WindowConfig::default();
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        // Still inside the first note's late band, but 20 ms before the second.
        let out = judge.press(1380, None);
        assert_eq!(outcomes(&out), [(1000, Outcome::Miss), (1400, Outcome::Hit)]);
        assert_eq!(out[0].time_offset, None);
        assert_eq!(out[1].time_offset, Some(-20.0));
        assert!(judge.release(1390, None).is_empty());
        assert!(judge.is_finished());
    }

    #[test]
    fn nearest_press_ties_go_to_earlier_note() {
        let defs = [NoteDef::tap(0, 1000), NoteDef::tap(0, 1400)];
        let timeline = lanes(&defs);
        let config = WindowConfig::default();
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        let out = judge.press(1200, None);
        assert_eq!(outcomes(&out), [(1000, Outcome::Hit)]);
        assert_eq!(out[0].time_offset, Some(200.0));
        judge.release(1210, None);
        assert_eq!(outcomes(&judge.press(1390, None)), [(1400, Outcome::Hit)]);
    }

    #[test]
    fn nearest_press_skips_hold_note() {
        let defs = [NoteDef::hold(0, 1000, 1200, vec![1100]), NoteDef::tap(0, 1300)];
        let timeline = lanes(&defs);
        let config = WindowConfig::default();
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        let out = judge.press(1290, None);
        assert_eq!(
            outcomes(&out),
            [
                (1000, Outcome::Miss),
                (1100, Outcome::HoldFail),
                (1200, Outcome::ReleaseMiss),
                (1300, Outcome::Hit)
            ]
        );
    }

    #[test]
    fn dynamic_window_narrows_dense_notes() {
        let defs = [NoteDef::tap(0, 1000), NoteDef::tap(0, 1200)];
        let timeline = lanes(&defs);
        let config = WindowConfig {
            dynamic_window: true,
            ..WindowConfig::default()
        };
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        // 1060 misses the first note, the fixed window would have hit it.
        let out = judge.press(1060, None);
        assert_eq!(outcomes(&out), [(1000, Outcome::Miss)]);
        judge.release(1070, None);
        assert_eq!(outcomes(&judge.press(1160, None)), [(1200, Outcome::Hit)]);
    }

    #[test]
    fn out_of_order_calls_clamp_to_now() {
        let timeline = lanes(&[NoteDef::tap(0, 1000)]);
        let config = WindowConfig::default();
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        judge.advance_to(1400);
        let out = judge.press(900, None);
        assert_eq!(out[0].outcome, Outcome::Miss);
        assert_eq!(out[0].time_offset, Some(400.0));
    }

    #[test]
    fn extreme_times_do_not_overflow() {
        let timeline = lanes(&[NoteDef::tap(0, i64::MAX - 1000)]);
        let config = WindowConfig::default();
        let mut judge = ChannelJudge::<LaneSpatial>::new(0, timeline.channel(0), &config).unwrap();

        assert!(judge.press(i64::MIN, None).is_empty());
        judge.release(i64::MIN + 1, None);
        let out = judge.press(i64::MAX - 1010, None);
        assert_eq!(out[0].outcome, Outcome::Hit);
        assert_eq!(out[0].time_offset, Some(-10.0));
    }

    fn slider() -> TimelineModel {
        let defs = [NoteDef::slider(
            1000,
            1600,
            Point::new(0.0, 0.0),
            vec![SliderTick {
                time: 1300,
                pos: Point::new(100.0, 0.0),
            }],
            Point::new(200.0, 0.0),
        )];
        build_timeline(&defs, Ruleset::Cursor).unwrap()
    }

    fn radii() -> WindowConfig {
        WindowConfig {
            hit_radius: Some(30.0),
            follow_radius: Some(60.0),
            ..WindowConfig::default()
        }
    }

    #[test]
    fn cursor_press_outside_radius_is_ignored() {
        let timeline = slider();
        let config = radii();
        let mut judge =
            ChannelJudge::<CursorSpatial>::new(0, timeline.channel(0), &config).unwrap();

        assert!(judge.press(1000, Some(Point::new(40.0, 0.0))).is_empty());
        judge.release(1010, None);
        let out = judge.press(1020, Some(Point::new(0.0, 20.0)));
        assert_eq!(out[0].outcome, Outcome::Hit);
        assert_eq!(out[0].pos_offset, Some(20.0));
    }

    #[test]
    fn slider_followed_by_cursor() {
        let timeline = slider();
        let config = radii();
        let mut judge =
            ChannelJudge::<CursorSpatial>::new(0, timeline.channel(0), &config).unwrap();

        judge.press(1000, Some(Point::new(0.0, 0.0)));
        // Far from the tick target until the cursor catches up.
        assert!(judge.move_cursor(1200, Point::new(90.0, 0.0)).is_empty());
        let out = judge.move_cursor(1300, Point::new(150.0, 0.0));
        assert_eq!(outcomes(&out), [(1300, Outcome::HoldOk)]);
        assert_eq!(out[0].time_offset, None);

        let out = judge.release(1610, Some(Point::new(190.0, 0.0)));
        assert_eq!(outcomes(&out), [(1600, Outcome::ReleaseHit)]);
        assert_eq!(out[0].pos_offset, Some(10.0));
    }

    #[test]
    fn slider_lost_by_cursor_fails() {
        let timeline = slider();
        let config = radii();
        let mut judge =
            ChannelJudge::<CursorSpatial>::new(0, timeline.channel(0), &config).unwrap();

        judge.press(1000, Some(Point::new(0.0, 0.0)));
        // Still pressed, but never near the tick.
        let out = judge.advance_to(1351);
        assert_eq!(
            outcomes(&out),
            [(1300, Outcome::HoldFail), (1600, Outcome::ReleaseMiss)]
        );
        assert!(judge.is_finished());
    }
}
