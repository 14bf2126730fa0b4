use proptest::prelude::*;
use rhythm_model::{Action, NoteDef, Ruleset, TimelineModel, build_timeline};

/// Notes for `lanes` lanes, laid out so that no two notes of a lane overlap.
fn lane_defs(lanes: usize) -> impl Strategy<Value = Vec<NoteDef>> {
    prop::collection::vec((0..lanes, 0i64..400, any::<bool>(), 1i64..600), 0..40).prop_map(
        move |shapes| {
            let mut next_free = vec![0i64; lanes];
            shapes
                .into_iter()
                .map(|(lane, gap, is_hold, len)| {
                    let start = next_free[lane] + gap;
                    if is_hold {
                        next_free[lane] = start + len;
                        NoteDef::hold(lane, start, start + len, vec![])
                    } else {
                        next_free[lane] = start;
                        NoteDef::tap(lane, start)
                    }
                })
                .collect()
        },
    )
}

proptest! {
    /// Every channel ascends in time and every run starts with a press.
    #[test]
    fn prop_channels_are_ordered(defs in lane_defs(4)) {
        let timeline = build_timeline(&defs, Ruleset::Lanes { count: 4 }).unwrap();
        prop_assert_eq!(timeline.note_count(), defs.len());
        for (channel, table) in timeline.channels() {
            prop_assert!(table.windows(2).all(|p| p[0].time <= p[1].time));
            prop_assert!(table.iter().all(|s| s.channel == channel));
            for run in timeline.note_runs(channel) {
                prop_assert_eq!(table[run.start].action, Action::Press);
            }
        }
    }

    /// A built timeline passes external validation unchanged.
    #[test]
    fn prop_built_timeline_validates(defs in lane_defs(3)) {
        let timeline = build_timeline(&defs, Ruleset::Lanes { count: 3 }).unwrap();
        let points: Vec<_> = timeline.iter().copied().collect();
        let validated = TimelineModel::from_scorepoints(Ruleset::Lanes { count: 3 }, points).unwrap();
        prop_assert_eq!(validated, timeline);
    }

    /// Building is deterministic.
    #[test]
    fn prop_deterministic(defs in lane_defs(2)) {
        let a = build_timeline(&defs, Ruleset::Lanes { count: 2 }).unwrap();
        let b = build_timeline(&defs, Ruleset::Lanes { count: 2 }).unwrap();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn map_notes_from_json() {
    let defs: Vec<NoteDef> = serde_json::from_str(
        r#"[
            {"type": "circle", "time": 100, "pos": {"x": 10.0, "y": 20.0}},
            {"type": "slider", "time": 300, "end_time": 700,
             "head": {"x": 0.0, "y": 0.0},
             "ticks": [{"time": 500, "pos": {"x": 50.0, "y": 0.0}}],
             "tail": {"x": 100.0, "y": 0.0}}
        ]"#,
    )
    .unwrap();
    let timeline = build_timeline(&defs, Ruleset::Cursor).unwrap();
    let actions: Vec<Action> = timeline.channel(0).iter().map(|s| s.action).collect();
    assert_eq!(
        actions,
        [Action::Press, Action::Press, Action::Hold, Action::Release]
    );
}
