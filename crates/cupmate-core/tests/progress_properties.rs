//! Property tests for the intake store and progress ring invariants.

use cupmate_core::{Category, DailyGoal, IntakeStore, ProgressRing};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(Category, f64),
    Subtract(Category, f64),
    Reset(Category),
}

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (category(), 0.1f64..5000.0).prop_map(|(c, a)| Op::Add(c, a)),
        (category(), 0.1f64..5000.0).prop_map(|(c, a)| Op::Subtract(c, a)),
        category().prop_map(Op::Reset),
    ]
}

fn apply(ops: &[Op]) -> IntakeStore {
    let mut store = IntakeStore::new();
    for op in ops {
        match *op {
            Op::Add(c, a) => {
                let _ = store.add(c, a);
            }
            Op::Subtract(c, a) => {
                let _ = store.subtract(c, a);
            }
            Op::Reset(c) => store.reset(c),
        }
    }
    store
}

proptest! {
    #[test]
    fn total_is_sum_and_values_never_negative(ops in prop::collection::vec(op(), 0..64)) {
        let store = apply(&ops);
        let sum: f64 = Category::ALL.iter().map(|&c| store.get(c)).sum();
        prop_assert!((store.total() - sum).abs() < 1e-6);
        for c in Category::ALL {
            prop_assert!(store.get(c) >= 0.0);
        }
    }

    #[test]
    fn subtracting_more_than_held_gives_zero(held in 0.0f64..3000.0, extra in 0.1f64..3000.0) {
        let mut store = IntakeStore::new();
        let _ = store.add(Category::Water, held);
        let _ = store.subtract(Category::Water, held + extra);
        prop_assert_eq!(store.get(Category::Water), 0.0);
    }

    #[test]
    fn ring_is_contiguous_and_sums_to_share(
        ops in prop::collection::vec(op(), 0..32),
        goal in 1.0f64..10000.0,
    ) {
        let store = apply(&ops);
        let goal = DailyGoal::new(goal).unwrap();
        let ring = ProgressRing::compute(&store.snapshot(), goal);

        prop_assert_eq!(ring.segments.len(), Category::COUNT);
        prop_assert_eq!(ring.segments[0].start_angle, 0.0);
        for pair in ring.segments.windows(2) {
            prop_assert!((pair[0].end_angle - pair[1].start_angle).abs() < 1e-6);
        }
        for (seg, c) in ring.segments.iter().zip(Category::ALL) {
            prop_assert_eq!(seg.category, c);
            prop_assert!(seg.sweep() >= -1e-9);
        }

        let total = store.total();
        let sweep_sum: f64 = ring.segments.iter().map(|s| s.sweep()).sum();
        let expected = 360.0 * total / total.max(goal.ml());
        prop_assert!((sweep_sum - expected).abs() < 1e-6);
        prop_assert!(ring.filled_degrees() <= 360.0 + 1e-6);

        if total == 0.0 {
            prop_assert!(ring.segments.iter().all(|s| s.sweep() == 0.0));
        }
        prop_assert_eq!(ProgressRing::compute(&store.snapshot(), goal), ring);
    }
}
