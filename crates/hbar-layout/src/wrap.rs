#![forbid(unsafe_code)]

//! Center-wrap decision.
//!
//! Decides whether the center region of a three-region header can share a
//! row with the leading and trailing regions, or must drop to a second row.
//! The decision is a pure function of a [`MeasurementSnapshot`]: the same
//! snapshot always produces the same answer, regardless of the current
//! wrapped state.
//!
//! # Equal-share model
//!
//! The modelled grid gives the center column exactly its intrinsic width
//! and splits the remainder evenly between leading and trailing:
//!
//! ```text
//! remaining = container - center - 2 * gap
//! remaining <= 0                      -> wrap
//! per_side  = remaining / 2
//! leading > per_side || trailing > per_side -> wrap
//! ```
//!
//! A side that fits its share exactly stays on the row.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `container <= 0` | No wrap |
//! | `center <= 0` | No wrap |
//! | Non-finite input | Treated as `0` |

use std::fmt;
use std::str::FromStr;

use hbar_core::geometry::finite_or_zero;

/// Widths sampled in one measurement pass. Sole input to the decision.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasurementSnapshot {
    /// Width available to the three regions.
    pub container_width: f64,
    /// Effective width of the leading region.
    pub leading_width: f64,
    /// Effective width of the trailing region.
    pub trailing_width: f64,
    /// Intrinsic width of the center content.
    pub center_content_width: f64,
    /// Column gap between regions.
    pub gap: f64,
}

impl MeasurementSnapshot {
    /// Create a snapshot.
    #[must_use]
    pub const fn new(
        container_width: f64,
        leading_width: f64,
        trailing_width: f64,
        center_content_width: f64,
        gap: f64,
    ) -> Self {
        Self {
            container_width,
            leading_width,
            trailing_width,
            center_content_width,
            gap,
        }
    }

    /// Copy with the container width replaced.
    #[must_use]
    pub const fn with_container_width(mut self, width: f64) -> Self {
        self.container_width = width;
        self
    }

    /// Copy with every field passed through [`finite_or_zero`].
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            container_width: finite_or_zero(self.container_width),
            leading_width: finite_or_zero(self.leading_width),
            trailing_width: finite_or_zero(self.trailing_width),
            center_content_width: finite_or_zero(self.center_content_width),
            gap: finite_or_zero(self.gap),
        }
    }

    /// Space left for the two sides once the center and both gaps are
    /// reserved. May be negative.
    #[must_use]
    pub fn remaining_for_sides(&self) -> f64 {
        self.container_width - self.center_content_width - 2.0 * self.gap
    }
}

/// Returns `true` when the center region must move to its own row.
///
/// This is the equal-share model; see [`WrapPolicy::PlainSum`] for the
/// simpler alternative.
///
/// ```
/// use hbar_layout::{MeasurementSnapshot, should_wrap_center};
///
/// let wide = MeasurementSnapshot::new(1000.0, 260.0, 240.0, 300.0, 8.0);
/// assert!(!should_wrap_center(&wide));
///
/// let narrow = wide.with_container_width(700.0);
/// assert!(should_wrap_center(&narrow));
/// ```
#[must_use]
pub fn should_wrap_center(snapshot: &MeasurementSnapshot) -> bool {
    WrapPolicy::EqualShare.should_wrap(snapshot)
}

/// Which wrap predicate to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapPolicy {
    /// Both sides must fit half of the space left beside the center.
    #[default]
    EqualShare,
    /// Wrap only when the sum of all widths and both gaps exceeds the
    /// container.
    PlainSum,
}

impl WrapPolicy {
    /// Get the stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EqualShare => "equal-share",
            Self::PlainSum => "plain-sum",
        }
    }

    /// Evaluate this policy against a snapshot.
    #[must_use]
    pub fn should_wrap(self, snapshot: &MeasurementSnapshot) -> bool {
        let s = snapshot.sanitized();
        if s.container_width <= 0.0 || s.center_content_width <= 0.0 {
            return false;
        }
        match self {
            Self::EqualShare => {
                let remaining = s.remaining_for_sides();
                if remaining <= 0.0 {
                    return true;
                }
                let per_side = remaining / 2.0;
                s.leading_width > per_side || s.trailing_width > per_side
            }
            Self::PlainSum => {
                s.leading_width + s.trailing_width + s.center_content_width + 2.0 * s.gap
                    > s.container_width
            }
        }
    }
}

impl fmt::Display for WrapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised policy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWrapPolicyError(String);

impl ParseWrapPolicyError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParseWrapPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown wrap policy {:?} (expected \"equal-share\" or \"plain-sum\")",
            self.0
        )
    }
}

impl std::error::Error for ParseWrapPolicyError {}

impl FromStr for WrapPolicy {
    type Err = ParseWrapPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "equal-share" | "equalshare" => Ok(Self::EqualShare),
            "plain-sum" | "plainsum" => Ok(Self::PlainSum),
            _ => Err(ParseWrapPolicyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> MeasurementSnapshot {
        MeasurementSnapshot::new(1000.0, 260.0, 240.0, 300.0, 8.0)
    }

    #[test]
    fn scenario_a_fits_on_one_row() {
        let s = scenario_a();
        assert_eq!(s.remaining_for_sides(), 684.0);
        assert!(!should_wrap_center(&s));
    }

    #[test]
    fn scenario_b_leading_exceeds_share() {
        let s = scenario_a().with_container_width(700.0);
        assert_eq!(s.remaining_for_sides(), 384.0);
        assert!(should_wrap_center(&s));
    }

    #[test]
    fn empty_center_never_wraps() {
        let mut s = scenario_a().with_container_width(10.0);
        s.center_content_width = 0.0;
        assert!(!should_wrap_center(&s));
        assert!(!WrapPolicy::PlainSum.should_wrap(&s));
    }

    #[test]
    fn zero_container_never_wraps() {
        let s = scenario_a().with_container_width(0.0);
        assert!(!should_wrap_center(&s));
        let s = scenario_a().with_container_width(-50.0);
        assert!(!should_wrap_center(&s));
    }

    #[test]
    fn no_room_beside_center_wraps() {
        // 300 + 2 * 8 == 316 leaves nothing for the sides.
        let s = MeasurementSnapshot::new(316.0, 0.0, 0.0, 300.0, 8.0);
        assert!(should_wrap_center(&s));
    }

    #[test]
    fn exact_fit_stays_on_row() {
        // remaining = 400 - 100 - 0 = 300, per side = 150
        let s = MeasurementSnapshot::new(400.0, 150.0, 150.0, 100.0, 0.0);
        assert!(!should_wrap_center(&s));
    }

    #[test]
    fn just_over_share_wraps() {
        let s = MeasurementSnapshot::new(400.0, 150.0 + 1e-9, 10.0, 100.0, 0.0);
        assert!(should_wrap_center(&s));
    }

    #[test]
    fn trailing_alone_can_force_wrap() {
        let s = MeasurementSnapshot::new(400.0, 10.0, 151.0, 100.0, 0.0);
        assert!(should_wrap_center(&s));
    }

    #[test]
    fn equal_share_is_stricter_than_plain_sum() {
        // Sum with gaps is exactly 440, but leading exceeds its half of 320.
        let s = MeasurementSnapshot::new(440.0, 300.0, 20.0, 100.0, 10.0);
        assert!(!WrapPolicy::PlainSum.should_wrap(&s));
        assert!(WrapPolicy::EqualShare.should_wrap(&s));
    }

    #[test]
    fn plain_sum_exact_fit_stays_on_row() {
        let s = MeasurementSnapshot::new(420.0, 100.0, 100.0, 200.0, 10.0);
        assert!(!WrapPolicy::PlainSum.should_wrap(&s));
        let s = s.with_container_width(419.0);
        assert!(WrapPolicy::PlainSum.should_wrap(&s));
    }

    #[test]
    fn non_finite_inputs_behave_like_zero() {
        let base = scenario_a();
        let mut poisoned = base;
        poisoned.leading_width = f64::NAN;
        let mut zeroed = base;
        zeroed.leading_width = 0.0;
        assert_eq!(should_wrap_center(&poisoned), should_wrap_center(&zeroed));

        let mut poisoned = base;
        poisoned.container_width = f64::INFINITY;
        assert!(!should_wrap_center(&poisoned));
    }

    #[test]
    fn policy_parses_and_displays() {
        assert_eq!("equal-share".parse::<WrapPolicy>(), Ok(WrapPolicy::EqualShare));
        assert_eq!("PLAIN_SUM".parse::<WrapPolicy>(), Ok(WrapPolicy::PlainSum));
        assert_eq!(WrapPolicy::PlainSum.to_string(), "plain-sum");
        let err = "grid".parse::<WrapPolicy>().unwrap_err();
        assert_eq!(err.input(), "grid");
    }
}
