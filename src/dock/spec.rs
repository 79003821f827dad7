//! Declarative layout description.
//!
//! A layout is an ordered list of split directives applied to the
//! full-window `root` region, followed by panel-to-region bindings.
//!
//! In a config file:
//!
//! ```toml
//! [[layout.split]]
//! parent = "root"
//! direction = "horizontal"
//! ratio = 0.75
//! first = "content_column"
//! second = "right"
//!
//! [[layout.dock]]
//! panel = "viewport"
//! region = "content"
//! ```

use super::LayoutError;
use crate::model::{PanelName, RegionName};
use serde::Deserialize;

/// Axis along which a region is divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// Children side by side; the first child is on the left.
    Horizontal,
    /// Children stacked; the first child is on top.
    Vertical,
}

/// Divide `parent` into two new regions.
///
/// `ratio` is the share of the parent's extent (along `direction`) given to
/// `first`; it must lie strictly between 0 and 1.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitDirective {
    /// Existing leaf to divide.
    pub parent: RegionName,
    /// Axis of the division.
    pub direction: SplitDirection,
    /// Share of the parent given to `first`, strictly between 0 and 1.
    pub ratio: f32,
    /// Left or top child.
    pub first: RegionName,
    /// Right or bottom child.
    pub second: RegionName,
}

impl SplitDirective {
    /// Build a directive from plain names.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::BlankRegion` if any name is blank.
    pub fn new(
        parent: &str,
        direction: SplitDirection,
        ratio: f32,
        first: &str,
        second: &str,
    ) -> Result<Self, LayoutError> {
        Ok(Self {
            parent: RegionName::new(parent)?,
            direction,
            ratio,
            first: RegionName::new(first)?,
            second: RegionName::new(second)?,
        })
    }
}

/// Place `panel` into the leaf region `region`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DockBinding {
    /// Panel to place.
    pub panel: PanelName,
    /// Leaf that receives it.
    pub region: RegionName,
}

impl DockBinding {
    /// Build a binding from plain names.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::BlankPanel`/`BlankRegion` for blank names.
    pub fn new(panel: &str, region: &str) -> Result<Self, LayoutError> {
        Ok(Self {
            panel: PanelName::new(panel)?,
            region: RegionName::new(region)?,
        })
    }
}

/// Complete layout description: splits first, then bindings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutSpec {
    /// Splits, applied in order.
    #[serde(default, rename = "split")]
    pub splits: Vec<SplitDirective>,
    /// Bindings, applied after every split.
    #[serde(default, rename = "dock")]
    pub docks: Vec<DockBinding>,
}

impl LayoutSpec {
    /// A layout with no splits: `root` is the only (empty) region.
    pub fn empty() -> Self {
        Self {
            splits: Vec::new(),
            docks: Vec::new(),
        }
    }
}

impl Default for LayoutSpec {
    /// Viewport on the left taking three quarters of the width, console
    /// under it taking a quarter of the height, and the right column split
    /// evenly between scene graph (top) and properties (bottom).
    fn default() -> Self {
        use SplitDirection::{Horizontal, Vertical};

        let split = |parent, direction, ratio, first, second| SplitDirective {
            parent: RegionName::from_static(parent),
            direction,
            ratio,
            first: RegionName::from_static(first),
            second: RegionName::from_static(second),
        };
        let dock = |panel, region| DockBinding {
            panel: PanelName::from_static(panel),
            region: RegionName::from_static(region),
        };

        Self {
            splits: vec![
                split(super::ROOT_REGION, Horizontal, 0.75, "content_column", "right"),
                split("content_column", Vertical, 0.75, "content", "bottom"),
                split("right", Vertical, 0.5, "right_top", "right_bottom"),
            ],
            docks: vec![
                dock("viewport", "content"),
                dock("scene_graph", "right_top"),
                dock("properties", "right_bottom"),
                dock("console", "bottom"),
            ],
        }
    }
}
