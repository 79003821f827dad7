//! Dock layout: which panel occupies which part of the window.
//!
//! The layout is described declaratively by a [`LayoutSpec`], validated at
//! startup, and materialized into a [`RegionTree`] exactly once, on the
//! first frame. Later frames reuse the tree unchanged.

mod spec;
mod tree;

pub use spec::{DockBinding, LayoutSpec, SplitDirection, SplitDirective};
pub use tree::{LeafArea, NodeIndex, NormalizedRect, RegionKind, RegionNode, RegionTree};

use crate::model::{InvalidPanelName, InvalidRegionName, PanelName, RegionName};
use thiserror::Error;
use tracing::info;

/// Name of the full-window region every layout starts from.
pub const ROOT_REGION: &str = "root";

/// Malformed layout description. Always fatal at startup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LayoutError {
    /// A split names a parent region that does not exist (yet).
    #[error("Unknown region '{0}'")]
    UnknownRegion(RegionName),

    /// A split targets a region that was already divided.
    #[error("Region '{0}' is already split")]
    AlreadySplit(RegionName),

    /// A split introduces a region name that is already taken.
    #[error("Region name '{0}' is used more than once")]
    DuplicateRegion(RegionName),

    /// Split ratio outside the open interval (0, 1).
    #[error("Split of '{parent}' has ratio {ratio}; it must be strictly between 0 and 1")]
    InvalidRatio {
        /// Region being split
        parent: RegionName,
        /// Offending ratio
        ratio: f32,
    },

    /// A binding targets a region that does not exist.
    #[error("Panel '{panel}' is docked into unknown region '{region}'")]
    UnknownDockRegion {
        /// Panel being docked
        panel: PanelName,
        /// Missing region
        region: RegionName,
    },

    /// A binding targets a region that was split.
    #[error("Panel '{panel}' cannot dock into '{region}': the region is split")]
    NotALeaf {
        /// Panel being docked
        panel: PanelName,
        /// Split region
        region: RegionName,
    },

    /// Two panels target the same leaf.
    #[error("Region '{region}' already holds panel '{existing}'; cannot also hold '{panel}'")]
    RegionOccupied {
        /// Contested leaf
        region: RegionName,
        /// Panel bound first
        existing: PanelName,
        /// Panel bound second
        panel: PanelName,
    },

    /// One panel is bound to more than one region.
    #[error("Panel '{0}' is docked more than once")]
    DuplicatePanel(PanelName),

    /// A binding names a panel the application does not provide.
    #[error("Panel '{0}' is not registered")]
    UnregisteredPanel(PanelName),

    /// A region name in the description is blank.
    #[error(transparent)]
    BlankRegion(#[from] InvalidRegionName),

    /// A panel name in the description is blank.
    #[error(transparent)]
    BlankPanel(#[from] InvalidPanelName),
}

/// Layout lifecycle: a validated description until the first frame, a
/// region tree from then on.
#[derive(Debug, Clone, PartialEq)]
pub enum DockLayout {
    /// Validated description waiting for the first frame.
    Unbuilt(LayoutSpec),
    /// Region tree, fixed for the rest of the run.
    Built(RegionTree),
}

impl DockLayout {
    /// Validate `spec` without building it yet.
    ///
    /// `is_registered` decides whether a panel named in a binding exists.
    ///
    /// # Errors
    ///
    /// Returns the first `LayoutError` found in the description.
    pub fn new(
        spec: LayoutSpec,
        is_registered: impl Fn(&PanelName) -> bool,
    ) -> Result<Self, LayoutError> {
        if let Some(binding) = spec.docks.iter().find(|b| !is_registered(&b.panel)) {
            return Err(LayoutError::UnregisteredPanel(binding.panel.clone()));
        }
        RegionTree::from_spec(&spec)?;
        Ok(Self::Unbuilt(spec))
    }

    /// Materialize the region tree if it does not exist yet.
    ///
    /// # Returns
    /// `true` if the tree was built by this call, `false` if it already
    /// existed (the tree is left untouched).
    ///
    /// # Errors
    ///
    /// Only for descriptions that bypassed [`DockLayout::new`].
    pub fn build_once(&mut self) -> Result<bool, LayoutError> {
        match self {
            Self::Built(_) => Ok(false),
            Self::Unbuilt(spec) => {
                let tree = RegionTree::from_spec(spec)?;
                info!(
                    regions = tree.node_count(),
                    leaves = tree.leaf_count(),
                    "Dock layout built"
                );
                *self = Self::Built(tree);
                Ok(true)
            }
        }
    }

    /// Panels the layout places, in binding order (before the build) or
    /// leaf order (after it).
    pub fn docked_panels(&self) -> Vec<&PanelName> {
        match self {
            Self::Unbuilt(spec) => spec.docks.iter().map(|binding| &binding.panel).collect(),
            Self::Built(tree) => tree.leaves().into_iter().filter_map(RegionNode::panel).collect(),
        }
    }

    /// Whether the first-frame build has happened.
    pub fn is_built(&self) -> bool {
        matches!(self, Self::Built(_))
    }

    /// The region tree, once built.
    pub fn tree(&self) -> Option<&RegionTree> {
        match self {
            Self::Built(tree) => Some(tree),
            Self::Unbuilt(_) => None,
        }
    }
}
