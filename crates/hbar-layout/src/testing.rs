#![forbid(unsafe_code)]

//! In-memory [`GeometryPort`] for tests.
//!
//! Nodes are `&'static str` keys. Unknown nodes measure zero, have no
//! children and no content. State lives behind a shared `Rc<RefCell<..>>`,
//! so clones observe each other's edits; a test can keep one handle while
//! the code under test owns another, and resize between passes.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use hbar_core::geometry::Sides;
use hbar_core::style::{Length, ResolvedStyle};

use crate::measure::{CenterNodes, GeometryPort, HeaderNodes, RegionNodes};

#[derive(Debug, Clone)]
struct FakeNode {
    rendered: f64,
    intrinsic: f64,
    style: ResolvedStyle,
    children: Vec<&'static str>,
    content: bool,
}

impl Default for FakeNode {
    fn default() -> Self {
        Self {
            rendered: 0.0,
            intrinsic: 0.0,
            style: ResolvedStyle::default(),
            children: Vec::new(),
            content: true,
        }
    }
}

/// Shared table of fake node geometry.
#[derive(Debug, Clone, Default)]
pub struct FakeGeometry {
    nodes: Rc<RefCell<HashMap<&'static str, FakeNode>>>,
    reads: Rc<Cell<u64>>,
}

impl FakeGeometry {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or reopen) a node for editing.
    pub fn node(&self, key: &'static str) -> NodeEditor<'_> {
        self.nodes.borrow_mut().entry(key).or_default();
        NodeEditor { geometry: self, key }
    }

    /// Number of width reads served so far.
    #[must_use]
    pub fn reads(&self) -> u64 {
        self.reads.get()
    }

    fn with<T>(&self, key: &'static str, f: impl FnOnce(&FakeNode) -> T, missing: T) -> T {
        self.nodes.borrow().get(key).map_or(missing, f)
    }
}

/// Chained setters for one fake node.
#[derive(Debug, Clone, Copy)]
pub struct NodeEditor<'a> {
    geometry: &'a FakeGeometry,
    key: &'static str,
}

impl NodeEditor<'_> {
    fn edit(self, f: impl FnOnce(&mut FakeNode)) -> Self {
        if let Some(node) = self.geometry.nodes.borrow_mut().get_mut(self.key) {
            f(node);
        }
        self
    }

    /// Set the rendered (bounding) width.
    pub fn rendered(self, width: f64) -> Self {
        self.edit(|n| n.rendered = width)
    }

    /// Set the intrinsic (unclipped) width.
    pub fn intrinsic(self, width: f64) -> Self {
        self.edit(|n| n.intrinsic = width)
    }

    /// Set both rendered and intrinsic width.
    pub fn width(self, width: f64) -> Self {
        self.rendered(width).intrinsic(width)
    }

    /// Set `min-width`.
    pub fn min_width(self, min: Length) -> Self {
        self.edit(|n| n.style.min_width = min)
    }

    /// Set margins.
    pub fn margin(self, margin: Sides) -> Self {
        self.edit(|n| n.style.margin = margin)
    }

    /// Set padding.
    pub fn padding(self, padding: Sides) -> Self {
        self.edit(|n| n.style.padding = padding)
    }

    /// Set `column-gap` in pixels.
    pub fn gap(self, gap: f64) -> Self {
        self.edit(|n| n.style.column_gap = Length::Px(gap))
    }

    /// Replace the child list.
    pub fn children(self, children: &[&'static str]) -> Self {
        self.edit(|n| n.children = children.to_vec())
    }

    /// Set whether the node has projected content.
    pub fn content(self, present: bool) -> Self {
        self.edit(|n| n.content = present)
    }
}

impl GeometryPort for FakeGeometry {
    type Node = &'static str;

    fn rendered_width(&self, node: &Self::Node) -> f64 {
        self.reads.set(self.reads.get() + 1);
        self.with(*node, |n| n.rendered, 0.0)
    }

    fn intrinsic_width(&self, node: &Self::Node) -> f64 {
        self.reads.set(self.reads.get() + 1);
        self.with(*node, |n| n.intrinsic, 0.0)
    }

    fn style(&self, node: &Self::Node) -> ResolvedStyle {
        self.with(*node, |n| n.style, ResolvedStyle::default())
    }

    fn children(&self, node: &Self::Node) -> Vec<Self::Node> {
        self.with(*node, |n| n.children.clone(), Vec::new())
    }

    fn has_content(&self, node: &Self::Node) -> bool {
        self.with(*node, |n| n.content, false)
    }
}

/// Standard node naming used by tests.
///
/// `container`, optional `nav`, `leading` (`leading-title`,
/// `leading-chips`), `center` (`center-inner`), `trailing`
/// (`trailing-title`, `trailing-chips`).
#[must_use]
pub fn header_nodes(nav: Option<&'static str>) -> HeaderNodes<&'static str> {
    HeaderNodes {
        container: "container",
        nav,
        leading: RegionNodes::new("leading")
            .with_fixed("leading-title")
            .with_flexible("leading-chips"),
        center: CenterNodes {
            region: "center",
            inner: "center-inner",
        },
        trailing: RegionNodes::new("trailing")
            .with_fixed("trailing-title")
            .with_flexible("trailing-chips"),
    }
}

/// Populate `geometry` so that [`header_nodes`] measures to the given
/// widths (leading/trailing via their titles) with content in the center.
pub fn populate(
    geometry: &FakeGeometry,
    container: f64,
    leading: f64,
    trailing: f64,
    center: f64,
    gap: f64,
) {
    geometry.node("container").rendered(container).gap(gap);
    geometry.node("leading");
    geometry.node("leading-title").intrinsic(leading);
    geometry.node("trailing");
    geometry.node("trailing-title").intrinsic(trailing);
    geometry.node("center").content(true);
    geometry.node("center-inner").intrinsic(center);
}
