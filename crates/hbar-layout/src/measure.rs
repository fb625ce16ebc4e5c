#![forbid(unsafe_code)]

//! Region width measurement.
//!
//! Widths are read through a [`GeometryPort`], so the same measurer runs
//! against a live rendering surface or against a table of literal numbers
//! in tests.
//!
//! # Policies
//!
//! - **Fixed** sub-part (e.g. a title): its intrinsic width, the width its
//!   content needs when nothing is truncated.
//! - **Flexible** sub-part (e.g. a truncating chip row): for each direct
//!   child, `max(0, min-width or rendered width) + max(0, margin-left) +
//!   max(0, margin-right)`, plus `gap * (children - 1)` using the flexible
//!   node's own column gap.
//! - Both present: `fixed + region gap + flexible`.
//! - **Center**: intrinsic width of the inner wrapping node. The center
//!   never shrinks; it either fits on the row or moves as a whole.
//!
//! A sub-part counts as present only when its node exists and measures
//! wider than zero. Missing nodes contribute zero. Every number read from
//! the port is sanitized with [`finite_or_zero`] before use.

use std::fmt;

use hbar_core::geometry::{BoxMetrics, finite_or_zero, non_negative};
use hbar_core::style::{Length, ResolvedStyle};

use crate::wrap::MeasurementSnapshot;

/// Read-only access to rendered geometry.
///
/// Implementations must not mutate layout; every method may be called any
/// number of times during one measurement pass.
pub trait GeometryPort {
    /// Handle to a node on the rendering surface.
    type Node: Clone + fmt::Debug;

    /// Bounding (border-box) width as currently rendered.
    fn rendered_width(&self, node: &Self::Node) -> f64;

    /// Width the content would occupy without clipping or truncation.
    fn intrinsic_width(&self, node: &Self::Node) -> f64;

    /// Resolved style of the node.
    fn style(&self, node: &Self::Node) -> ResolvedStyle;

    /// Direct element children, in document order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Whether any content is projected into the node.
    fn has_content(&self, node: &Self::Node) -> bool;
}

impl<P: GeometryPort + ?Sized> GeometryPort for &P {
    type Node = P::Node;

    fn rendered_width(&self, node: &Self::Node) -> f64 {
        (**self).rendered_width(node)
    }

    fn intrinsic_width(&self, node: &Self::Node) -> f64 {
        (**self).intrinsic_width(node)
    }

    fn style(&self, node: &Self::Node) -> ResolvedStyle {
        (**self).style(node)
    }

    fn children(&self, node: &Self::Node) -> Vec<Self::Node> {
        (**self).children(node)
    }

    fn has_content(&self, node: &Self::Node) -> bool {
        (**self).has_content(node)
    }
}

/// Nodes making up a leading or trailing region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionNodes<N> {
    /// The region node itself.
    pub region: N,
    /// Non-shrinkable sub-part.
    pub fixed: Option<N>,
    /// Shrinkable sub-part whose direct children carry minimum widths.
    pub flexible: Option<N>,
}

impl<N> RegionNodes<N> {
    /// A region with no measurable sub-parts.
    pub fn new(region: N) -> Self {
        Self {
            region,
            fixed: None,
            flexible: None,
        }
    }

    /// Set the fixed sub-part.
    #[must_use]
    pub fn with_fixed(mut self, node: N) -> Self {
        self.fixed = Some(node);
        self
    }

    /// Set the flexible sub-part.
    #[must_use]
    pub fn with_flexible(mut self, node: N) -> Self {
        self.flexible = Some(node);
        self
    }
}

/// Nodes making up the center region.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterNodes<N> {
    /// The region node; checked for projected content.
    pub region: N,
    /// Inner wrapping node whose unclipped width is measured.
    pub inner: N,
}

/// Every node the engine reads from one header instance.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderNodes<N> {
    /// The grid/flex container holding the regions.
    pub container: N,
    /// Fixed column preceding the regions (e.g. a back button).
    pub nav: Option<N>,
    /// Leading region.
    pub leading: RegionNodes<N>,
    /// Center region.
    pub center: CenterNodes<N>,
    /// Trailing region.
    pub trailing: RegionNodes<N>,
}

impl<N: Clone> HeaderNodes<N> {
    /// Nodes whose size changes should trigger a recomputation: the
    /// container, the navigation column when present, and the three
    /// regions.
    #[must_use]
    pub fn observed(&self) -> Vec<N> {
        let mut nodes = Vec::with_capacity(5);
        nodes.push(self.container.clone());
        if let Some(nav) = &self.nav {
            nodes.push(nav.clone());
        }
        nodes.push(self.leading.region.clone());
        nodes.push(self.center.region.clone());
        nodes.push(self.trailing.region.clone());
        nodes
    }
}

/// Width breakdown for one leading/trailing region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionWidth {
    /// Intrinsic width of the fixed sub-part (0 when absent).
    pub fixed: f64,
    /// Minimum width of the flexible sub-part (0 when absent).
    pub flexible_min: f64,
    /// Gap between the two sub-parts; 0 unless both are present.
    pub inner_gap: f64,
}

impl RegionWidth {
    /// `fixed + inner_gap + flexible_min`.
    #[must_use]
    pub fn effective(&self) -> f64 {
        self.fixed + self.inner_gap + self.flexible_min
    }
}

/// Measures regions through a [`GeometryPort`].
#[derive(Debug, Clone, Copy)]
pub struct RegionMeasurer<P> {
    port: P,
}

impl<P: GeometryPort> RegionMeasurer<P> {
    /// Create a measurer over `port`.
    pub const fn new(port: P) -> Self {
        Self { port }
    }

    /// The underlying port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Intrinsic width of a fixed sub-part; zero when absent.
    #[must_use]
    pub fn fixed_width(&self, node: Option<&P::Node>) -> f64 {
        node.map_or(0.0, |n| read("intrinsic", self.port.intrinsic_width(n)).max(0.0))
    }

    /// Summed minimum width of a flexible sub-part's children plus the
    /// gaps between them; zero when absent or childless.
    #[must_use]
    pub fn flexible_min_width(&self, node: Option<&P::Node>) -> f64 {
        let Some(node) = node else {
            return 0.0;
        };
        let children = self.port.children(node);
        if children.is_empty() {
            return 0.0;
        }
        let total: f64 = children.iter().map(|child| self.child_min_width(child)).sum();
        let gap = self.port.style(node).gap_px();
        total + gap * (children.len() - 1) as f64
    }

    fn child_min_width(&self, child: &P::Node) -> f64 {
        let style = self.port.style(child);
        let min = match style.min_width {
            Length::Px(v) => non_negative(read("min-width", v)),
            Length::Auto => non_negative(read("rendered", self.port.rendered_width(child))),
        };
        min + non_negative(style.margin.left) + non_negative(style.margin.right)
    }

    /// Full breakdown for a leading or trailing region.
    ///
    /// The gap between the fixed and flexible parts is the region node's own
    /// `column-gap`, not the container gap used between regions.
    #[must_use]
    pub fn region_width(&self, region: &RegionNodes<P::Node>) -> RegionWidth {
        let fixed = self.fixed_width(region.fixed.as_ref());
        let flexible_min = self.flexible_min_width(region.flexible.as_ref());
        let inner_gap = if fixed > 0.0 && flexible_min > 0.0 {
            self.port.style(&region.region).gap_px()
        } else {
            0.0
        };
        RegionWidth {
            fixed,
            flexible_min,
            inner_gap,
        }
    }

    /// Effective width of a leading or trailing region.
    #[must_use]
    pub fn measure_fixed_plus_flexible(&self, region: &RegionNodes<P::Node>) -> f64 {
        self.region_width(region).effective()
    }

    /// Intrinsic width of the center's inner wrapping node.
    #[must_use]
    pub fn center_content_width(&self, center: &CenterNodes<P::Node>) -> f64 {
        non_negative(read("center", self.port.intrinsic_width(&center.inner)))
    }

    /// Column gap of the container.
    #[must_use]
    pub fn container_gap(&self, container: &P::Node) -> f64 {
        self.port.style(container).gap_px()
    }

    /// Content-box width of the container minus the navigation column and
    /// its gap, i.e. the space the three regions share.
    #[must_use]
    pub fn available_width(&self, nodes: &HeaderNodes<P::Node>) -> f64 {
        let style = self.port.style(&nodes.container);
        let content = BoxMetrics::new(
            read("container", self.port.rendered_width(&nodes.container)),
            style.padding,
        )
        .content_width();
        let nav = nodes
            .nav
            .as_ref()
            .map_or(0.0, |n| non_negative(read("nav", self.port.rendered_width(n))));
        if nav > 0.0 {
            non_negative(content - nav - style.gap_px())
        } else {
            content
        }
    }

    /// Sample every width the decision needs.
    #[must_use]
    pub fn snapshot(&self, nodes: &HeaderNodes<P::Node>) -> MeasurementSnapshot {
        MeasurementSnapshot {
            container_width: self.available_width(nodes),
            leading_width: self.measure_fixed_plus_flexible(&nodes.leading),
            trailing_width: self.measure_fixed_plus_flexible(&nodes.trailing),
            center_content_width: self.center_content_width(&nodes.center),
            gap: self.container_gap(&nodes.container),
        }
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn read(what: &'static str, value: f64) -> f64 {
    if !value.is_finite() {
        hbar_core::debug!(what, value, "non-finite geometry read, using 0");
    }
    finite_or_zero(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeGeometry;
    use hbar_core::geometry::Sides;

    fn measurer(g: &FakeGeometry) -> RegionMeasurer<&FakeGeometry> {
        RegionMeasurer::new(g)
    }

    #[test]
    fn fixed_only_uses_intrinsic_not_rendered() {
        let g = FakeGeometry::new();
        g.node("title").rendered(40.0).intrinsic(120.0);
        g.node("leading");
        let region = RegionNodes::new("leading").with_fixed("title");
        assert_eq!(measurer(&g).measure_fixed_plus_flexible(&region), 120.0);
    }

    #[test]
    fn flexible_only_sums_min_widths_margins_and_gaps() {
        let g = FakeGeometry::new();
        g.node("chips").gap(4.0).children(&["a", "b", "c"]);
        g.node("a").min_width(Length::Px(30.0));
        g.node("b")
            .min_width(Length::Px(20.0))
            .margin(Sides::horizontal(2.0));
        g.node("c").rendered(15.0);
        g.node("leading");
        let region = RegionNodes::new("leading").with_flexible("chips");
        // 30 + (20 + 2 + 2) + 15 + 4 * 2
        assert_eq!(measurer(&g).measure_fixed_plus_flexible(&region), 77.0);
    }

    #[test]
    fn negative_margins_and_min_widths_are_clamped() {
        let g = FakeGeometry::new();
        g.node("chips").children(&["a"]);
        g.node("a")
            .min_width(Length::Px(-10.0))
            .margin(Sides::new(0.0, -5.0, 0.0, 3.0));
        assert_eq!(measurer(&g).flexible_min_width(Some(&"chips")), 3.0);
    }

    #[test]
    fn both_parts_add_region_gap() {
        let g = FakeGeometry::new();
        g.node("trailing").gap(8.0);
        g.node("title").intrinsic(100.0);
        g.node("chips").children(&["a"]);
        g.node("a").min_width(Length::Px(50.0));
        let region = RegionNodes::new("trailing")
            .with_fixed("title")
            .with_flexible("chips");
        let width = measurer(&g).region_width(&region);
        assert_eq!(width.inner_gap, 8.0);
        assert_eq!(width.effective(), 158.0);
    }

    #[test]
    fn inner_gap_ignores_container_gap() {
        let g = FakeGeometry::new();
        g.node("container").gap(24.0);
        g.node("trailing").gap(4.0);
        g.node("title").intrinsic(100.0);
        g.node("chips").children(&["a"]);
        g.node("a").min_width(Length::Px(50.0));
        let region = RegionNodes::new("trailing")
            .with_fixed("title")
            .with_flexible("chips");
        let m = measurer(&g);
        assert_eq!(m.region_width(&region).inner_gap, 4.0);
        assert_eq!(m.container_gap(&"container"), 24.0);
    }

    #[test]
    fn empty_sub_part_drops_inner_gap() {
        let g = FakeGeometry::new();
        g.node("trailing").gap(8.0);
        g.node("title").intrinsic(100.0);
        g.node("chips");
        let region = RegionNodes::new("trailing")
            .with_fixed("title")
            .with_flexible("chips");
        assert_eq!(measurer(&g).measure_fixed_plus_flexible(&region), 100.0);
    }

    #[test]
    fn neither_part_is_zero() {
        let g = FakeGeometry::new();
        g.node("leading").rendered(300.0).intrinsic(300.0);
        let region = RegionNodes::new("leading");
        assert_eq!(measurer(&g).measure_fixed_plus_flexible(&region), 0.0);
    }

    #[test]
    fn non_finite_reads_become_zero() {
        let g = FakeGeometry::new();
        g.node("title").intrinsic(f64::NAN);
        g.node("chips").children(&["a"]);
        g.node("a").rendered(f64::INFINITY);
        g.node("leading").gap(8.0);
        let region = RegionNodes::new("leading")
            .with_fixed("title")
            .with_flexible("chips");
        assert_eq!(measurer(&g).measure_fixed_plus_flexible(&region), 0.0);
    }

    #[test]
    fn available_width_subtracts_padding_nav_and_gap() {
        let g = FakeGeometry::new();
        g.node("container")
            .rendered(1072.0)
            .padding(Sides::horizontal(16.0))
            .gap(8.0);
        g.node("nav").rendered(32.0);
        let nodes = crate::testing::header_nodes(Some("nav"));
        // 1072 - 32 padding - 32 nav - 8 gap
        assert_eq!(measurer(&g).available_width(&nodes), 1000.0);
    }

    #[test]
    fn zero_width_nav_is_ignored() {
        let g = FakeGeometry::new();
        g.node("container").rendered(500.0).gap(8.0);
        g.node("nav").rendered(0.0);
        let nodes = crate::testing::header_nodes(Some("nav"));
        assert_eq!(measurer(&g).available_width(&nodes), 500.0);
    }

    #[test]
    fn snapshot_collects_all_fields() {
        let g = FakeGeometry::new();
        g.node("container").rendered(1000.0).gap(8.0);
        g.node("leading-title").intrinsic(260.0);
        g.node("trailing-title").intrinsic(240.0);
        g.node("center-inner").rendered(120.0).intrinsic(300.0);
        let nodes = crate::testing::header_nodes(None);
        assert_eq!(
            measurer(&g).snapshot(&nodes),
            MeasurementSnapshot::new(1000.0, 260.0, 240.0, 300.0, 8.0)
        );
    }

    #[test]
    fn observed_includes_nav_when_present() {
        let with_nav = crate::testing::header_nodes(Some("nav"));
        assert_eq!(
            with_nav.observed(),
            vec!["container", "nav", "leading", "center", "trailing"]
        );
        let without = crate::testing::header_nodes(None);
        assert_eq!(without.observed().len(), 4);
    }
}
