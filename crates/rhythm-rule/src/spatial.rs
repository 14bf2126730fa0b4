use rhythm_model::Point;

/// How a ruleset checks positions. The judge is generic over this so both
/// rulesets share one state machine.
pub trait SpatialPolicy {
    /// Whether inputs of this ruleset carry a cursor position.
    const HAS_POSITION: bool;

    /// Whether `pos` is close enough to `target`.
    fn radius_check(pos: Option<Point>, target: Option<Point>, radius: Option<f64>) -> bool;

    /// Distance between `pos` and `target`, when both are known.
    fn offset(pos: Option<Point>, target: Option<Point>) -> Option<f64>;
}

/// One 2D cursor judged by distance to the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorSpatial;

impl SpatialPolicy for CursorSpatial {
    const HAS_POSITION: bool = true;

    fn radius_check(pos: Option<Point>, target: Option<Point>, radius: Option<f64>) -> bool {
        let (Some(radius), Some(target)) = (radius, target) else {
            return true;
        };
        // No cursor position means the cursor is nowhere near the target.
        pos.is_some_and(|pos| pos.distance(target) <= radius)
    }

    fn offset(pos: Option<Point>, target: Option<Point>) -> Option<f64> {
        Some(pos?.distance(target?))
    }
}

/// Independent lanes with no spatial component.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneSpatial;

impl SpatialPolicy for LaneSpatial {
    const HAS_POSITION: bool = false;

    fn radius_check(_pos: Option<Point>, _target: Option<Point>, _radius: Option<f64>) -> bool {
        true
    }

    fn offset(_pos: Option<Point>, _target: Option<Point>) -> Option<f64> {
        None
    }
}
