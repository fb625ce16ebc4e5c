#![forbid(unsafe_code)]

//! Resolved style values.
//!
//! Only the handful of computed properties the width measurer reads are
//! modelled here. A host translates its own computed-style representation
//! into [`ResolvedStyle`]; anything it cannot resolve stays at the default.

use std::fmt;
use std::str::FromStr;

use crate::geometry::{Sides, finite_or_zero};

/// A resolved length that may be unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Length {
    /// Unconstrained (`auto`, `normal`, `none`).
    #[default]
    Auto,
    /// An absolute length in pixels.
    Px(f64),
}

impl Length {
    /// The pixel value, or `None` when unconstrained or non-finite.
    ///
    /// ```
    /// use hbar_core::style::Length;
    ///
    /// assert_eq!(Length::Px(24.0).px(), Some(24.0));
    /// assert_eq!(Length::Auto.px(), None);
    /// assert_eq!(Length::Px(f64::NAN).px(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn px(self) -> Option<f64> {
        match self {
            Self::Px(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }

    /// The pixel value, treating unconstrained as zero.
    #[inline]
    #[must_use]
    pub fn px_or_zero(self) -> f64 {
        self.px().unwrap_or(0.0)
    }
}

/// Error returned when a length string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLengthError(String);

impl fmt::Display for ParseLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid length: {:?}", self.0)
    }
}

impl std::error::Error for ParseLengthError {}

impl FromStr for Length {
    type Err = ParseLengthError;

    /// Parse a computed CSS length (`"auto"`, `"normal"`, `"none"`, `"12px"`, `"0"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "" | "auto" | "normal" | "none" => return Ok(Self::Auto),
            _ => {}
        }
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
        number
            .parse::<f64>()
            .map(Self::Px)
            .map_err(|_| ParseLengthError(s.to_string()))
    }
}

/// The subset of a node's computed style consulted during measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedStyle {
    /// `min-width`; [`Length::Auto`] means the rendered width stands in.
    pub min_width: Length,
    /// Resolved margins.
    pub margin: Sides,
    /// Resolved padding.
    pub padding: Sides,
    /// `column-gap`; [`Length::Auto`] (`normal`) counts as zero.
    pub column_gap: Length,
}

impl ResolvedStyle {
    /// Set `min-width`.
    #[must_use]
    pub fn with_min_width(mut self, min_width: Length) -> Self {
        self.min_width = min_width;
        self
    }

    /// Set margins.
    #[must_use]
    pub fn with_margin(mut self, margin: Sides) -> Self {
        self.margin = margin;
        self
    }

    /// Set padding.
    #[must_use]
    pub fn with_padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self
    }

    /// Set `column-gap`.
    #[must_use]
    pub fn with_column_gap(mut self, gap: Length) -> Self {
        self.column_gap = gap;
        self
    }

    /// Column gap in pixels, never negative.
    #[must_use]
    pub fn gap_px(&self) -> f64 {
        finite_or_zero(self.column_gap.px_or_zero()).max(0.0)
    }
}
