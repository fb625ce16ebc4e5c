#![forbid(unsafe_code)]

//! Geometric primitives for width measurement.
//!
//! All values are CSS pixels as `f64`. Reads coming from a live rendering
//! surface are untrusted: anything non-finite is collapsed to `0.0` by
//! [`finite_or_zero`] before it participates in arithmetic.

/// Replace a non-finite value (`NaN`, `±Infinity`) with `0.0`.
///
/// # Example
///
/// ```
/// use hbar_core::geometry::finite_or_zero;
///
/// assert_eq!(finite_or_zero(12.5), 12.5);
/// assert_eq!(finite_or_zero(f64::NAN), 0.0);
/// assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
/// assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
/// ```
#[inline]
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Clamp a value to be non-negative, sanitizing it first.
#[inline]
#[must_use]
pub fn non_negative(value: f64) -> f64 {
    finite_or_zero(value).max(0.0)
}

/// Edge values (padding, margin) in top/right/bottom/left order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sides {
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
}

impl Sides {
    /// Zero on every edge.
    pub const ZERO: Self = Self::all(0.0);

    /// Create new sides with explicit values.
    #[inline]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create sides with the same value on every edge.
    #[inline]
    pub const fn all(val: f64) -> Self {
        Self::new(val, val, val, val)
    }

    /// Create sides with only left and right set.
    #[inline]
    pub const fn horizontal(val: f64) -> Self {
        Self::new(0.0, val, 0.0, val)
    }

    /// Sum of left and right, with each edge sanitized.
    #[inline]
    #[must_use]
    pub fn horizontal_sum(&self) -> f64 {
        finite_or_zero(self.left) + finite_or_zero(self.right)
    }

    /// Copy with every edge sanitized by [`finite_or_zero`].
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self::new(
            finite_or_zero(self.top),
            finite_or_zero(self.right),
            finite_or_zero(self.bottom),
            finite_or_zero(self.left),
        )
    }
}

/// Horizontal box metrics of a rendered node.
///
/// `border_width` is the node's bounding width as reported by the layout
/// engine; `padding` is its resolved padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMetrics {
    /// Bounding (border-box) width.
    pub border_width: f64,
    /// Resolved padding.
    pub padding: Sides,
}

impl BoxMetrics {
    /// Create metrics from a border-box width and padding.
    #[inline]
    pub const fn new(border_width: f64, padding: Sides) -> Self {
        Self {
            border_width,
            padding,
        }
    }

    /// Content-box width: bounding width minus left and right padding.
    ///
    /// Never negative, never non-finite.
    ///
    /// ```
    /// use hbar_core::geometry::{BoxMetrics, Sides};
    ///
    /// let metrics = BoxMetrics::new(1032.0, Sides::horizontal(16.0));
    /// assert_eq!(metrics.content_width(), 1000.0);
    ///
    /// let broken = BoxMetrics::new(f64::NAN, Sides::horizontal(16.0));
    /// assert_eq!(broken.content_width(), 0.0);
    /// ```
    #[must_use]
    pub fn content_width(&self) -> f64 {
        non_negative(finite_or_zero(self.border_width) - self.padding.horizontal_sum())
    }
}
