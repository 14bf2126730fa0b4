use serde::{Deserialize, Serialize};

use crate::{Action, MalformedTimeline, NoteId, ObjectKind, Point, Ruleset, Scorepoint};

/// A slider body checkpoint: where the slider ball is at `time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderTick {
    pub time: i64,
    pub pos: Point,
}

/// A playable object as read from a map, before decomposition into scorepoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoteDef {
    /// Single click target (cursor ruleset)
    Circle { time: i64, pos: Point },
    /// Press at the head, follow the ticks, release at the tail (cursor ruleset)
    Slider {
        time: i64,
        end_time: i64,
        head: Point,
        #[serde(default)]
        ticks: Vec<SliderTick>,
        tail: Point,
    },
    /// Single key press (lane ruleset)
    Tap { lane: usize, time: i64 },
    /// Press, keep held through the ticks, release at `end_time` (lane ruleset)
    Hold {
        lane: usize,
        time: i64,
        end_time: i64,
        #[serde(default)]
        ticks: Vec<i64>,
    },
}

impl NoteDef {
    pub fn circle(time: i64, x: f64, y: f64) -> Self {
        Self::Circle {
            time,
            pos: Point::new(x, y),
        }
    }

    pub fn slider(time: i64, end_time: i64, head: Point, ticks: Vec<SliderTick>, tail: Point) -> Self {
        Self::Slider {
            time,
            end_time,
            head,
            ticks,
            tail,
        }
    }

    pub fn tap(lane: usize, time: i64) -> Self {
        Self::Tap { lane, time }
    }

    pub fn hold(lane: usize, time: i64, end_time: i64, ticks: Vec<i64>) -> Self {
        Self::Hold {
            lane,
            time,
            end_time,
            ticks,
        }
    }

    /// Time of the note's press scorepoint.
    pub fn start_time(&self) -> i64 {
        match self {
            Self::Circle { time, .. }
            | Self::Slider { time, .. }
            | Self::Tap { time, .. }
            | Self::Hold { time, .. } => *time,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::Slider { .. } => "slider",
            Self::Tap { .. } => "tap",
            Self::Hold { .. } => "hold",
        }
    }

    /// Decompose into the note's run of scorepoints, checking it fits `ruleset`.
    pub fn scorepoints(
        &self,
        object_id: NoteId,
        ruleset: Ruleset,
    ) -> Result<Vec<Scorepoint>, MalformedTimeline> {
        let run = match (self, ruleset) {
            (Self::Circle { time, pos }, Ruleset::Cursor) => vec![Scorepoint::new(
                *time,
                0,
                Action::Press,
                object_id,
                ObjectKind::Circle,
                Some(*pos),
            )],
            (
                Self::Slider {
                    time,
                    end_time,
                    head,
                    ticks,
                    tail,
                },
                Ruleset::Cursor,
            ) => {
                let mut run = Vec::with_capacity(ticks.len() + 2);
                run.push(Scorepoint::new(
                    *time,
                    0,
                    Action::Press,
                    object_id,
                    ObjectKind::SliderHead,
                    Some(*head),
                ));
                run.extend(ticks.iter().map(|tick| {
                    Scorepoint::new(
                        tick.time,
                        0,
                        Action::Hold,
                        object_id,
                        ObjectKind::SliderBody,
                        Some(tick.pos),
                    )
                }));
                run.push(Scorepoint::new(
                    *end_time,
                    0,
                    Action::Release,
                    object_id,
                    ObjectKind::SliderTail,
                    Some(*tail),
                ));
                run
            }
            (Self::Tap { lane, time }, Ruleset::Lanes { count }) => {
                check_lane(object_id, *lane, count)?;
                vec![Scorepoint::new(
                    *time,
                    *lane,
                    Action::Press,
                    object_id,
                    ObjectKind::Tap,
                    None,
                )]
            }
            (
                Self::Hold {
                    lane,
                    time,
                    end_time,
                    ticks,
                },
                Ruleset::Lanes { count },
            ) => {
                check_lane(object_id, *lane, count)?;
                let mut run = Vec::with_capacity(ticks.len() + 2);
                run.push(Scorepoint::new(
                    *time,
                    *lane,
                    Action::Press,
                    object_id,
                    ObjectKind::HoldHead,
                    None,
                ));
                run.extend(ticks.iter().map(|&tick| {
                    Scorepoint::new(tick, *lane, Action::Hold, object_id, ObjectKind::HoldBody, None)
                }));
                run.push(Scorepoint::new(
                    *end_time,
                    *lane,
                    Action::Release,
                    object_id,
                    ObjectKind::HoldTail,
                    None,
                ));
                run
            }
            (_, Ruleset::Cursor) => {
                return Err(MalformedTimeline::WrongRuleset {
                    object_id,
                    kind: self.kind_name(),
                    ruleset: "cursor",
                });
            }
            (_, Ruleset::Lanes { .. }) => {
                return Err(MalformedTimeline::WrongRuleset {
                    object_id,
                    kind: self.kind_name(),
                    ruleset: "lanes",
                });
            }
        };

        for pair in run.windows(2) {
            if pair[1].time <= pair[0].time {
                return Err(MalformedTimeline::NotTimeOrdered {
                    object_id,
                    previous: pair[0].time,
                    time: pair[1].time,
                });
            }
        }
        Ok(run)
    }
}

fn check_lane(object_id: NoteId, lane: usize, lane_count: usize) -> Result<(), MalformedTimeline> {
    if lane < lane_count {
        Ok(())
    } else {
        Err(MalformedTimeline::LaneOutOfRange {
            object_id,
            lane,
            lane_count,
        })
    }
}
