//! Property-based invariant tests for measurement primitives.
//!
//! 1. `finite_or_zero` is the identity on finite input.
//! 2. `finite_or_zero` never yields a non-finite value.
//! 3. Content width is never negative and never exceeds the border width.
//! 4. Poisoned padding behaves exactly like zero padding on that edge.

use hbar_core::geometry::{BoxMetrics, Sides, finite_or_zero};
use proptest::prelude::*;

fn any_f64_including_poison() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => -1.0e6f64..1.0e6,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

proptest! {
    #[test]
    fn finite_is_identity(v in -1.0e9f64..1.0e9) {
        prop_assert_eq!(finite_or_zero(v), v);
    }

    #[test]
    fn output_always_finite(v in any_f64_including_poison()) {
        prop_assert!(finite_or_zero(v).is_finite());
    }

    #[test]
    fn content_width_bounded(
        width in 0.0f64..5000.0,
        left in 0.0f64..200.0,
        right in 0.0f64..200.0,
    ) {
        let metrics = BoxMetrics::new(width, Sides::new(0.0, right, 0.0, left));
        let content = metrics.content_width();
        prop_assert!(content >= 0.0);
        prop_assert!(content <= width);
    }

    #[test]
    fn poisoned_padding_equals_zero_padding(
        width in 0.0f64..5000.0,
        left in 0.0f64..200.0,
        poison in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)],
    ) {
        let poisoned = BoxMetrics::new(width, Sides::new(0.0, poison, 0.0, left));
        let clean = BoxMetrics::new(width, Sides::new(0.0, 0.0, 0.0, left));
        prop_assert_eq!(poisoned.content_width(), clean.content_width());
    }
}
