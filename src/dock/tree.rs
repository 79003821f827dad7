//! Region tree built from a `LayoutSpec`.
//!
//! The tree holds only proportions. Cell rectangles are resolved against
//! the current window area whenever they are needed, so a resize changes
//! absolute boundaries but never the ratios between regions.

use super::spec::{LayoutSpec, SplitDirection};
use super::LayoutError;
use crate::model::{PanelName, RegionName};
use ratatui::layout::Rect;

/// Position of a node inside the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

/// What a region is: divided further, or a leaf that may hold a panel.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionKind {
    /// Divided into two children.
    Split {
        /// Axis of the division
        direction: SplitDirection,
        /// Share given to `first`
        ratio: f32,
        /// Left or top child
        first: NodeIndex,
        /// Right or bottom child
        second: NodeIndex,
    },
    /// Never divided.
    Leaf {
        /// `None` for reserved, empty space
        panel: Option<PanelName>,
    },
}

/// A named node of the region tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionNode {
    name: RegionName,
    kind: RegionKind,
}

impl RegionNode {
    /// Name of the region.
    pub fn name(&self) -> &RegionName {
        &self.name
    }

    /// Split or leaf details.
    pub fn kind(&self) -> &RegionKind {
        &self.kind
    }

    /// Whether the region was never split.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, RegionKind::Leaf { .. })
    }

    /// Panel bound to this region, if it is an occupied leaf.
    pub fn panel(&self) -> Option<&PanelName> {
        match &self.kind {
            RegionKind::Leaf { panel } => panel.as_ref(),
            RegionKind::Split { .. } => None,
        }
    }
}

/// Region rectangle as fractions of the window (all components in 0..=1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl NormalizedRect {
    const FULL: NormalizedRect = NormalizedRect {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };
}

/// A leaf resolved against a concrete window area.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafArea<'a> {
    /// The leaf.
    pub region: &'a RegionName,
    /// Panel docked there, if any.
    pub panel: Option<&'a PanelName>,
    /// Cells covered by the leaf.
    pub rect: Rect,
}

/// Tree of regions. Node 0 is the full-window root.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTree {
    nodes: Vec<RegionNode>,
}

impl RegionTree {
    /// Apply every split, then every binding, in order.
    ///
    /// # Errors
    ///
    /// Any directive or binding that does not fit the tree built so far
    /// yields a `LayoutError`; nothing is partially applied for the caller.
    pub fn from_spec(spec: &LayoutSpec) -> Result<Self, LayoutError> {
        let mut tree = Self {
            nodes: vec![RegionNode {
                name: RegionName::root(),
                kind: RegionKind::Leaf { panel: None },
            }],
        };

        for directive in &spec.splits {
            if !(directive.ratio > 0.0 && directive.ratio < 1.0) {
                return Err(LayoutError::InvalidRatio {
                    parent: directive.parent.clone(),
                    ratio: directive.ratio,
                });
            }

            let parent = tree
                .find(&directive.parent)
                .ok_or_else(|| LayoutError::UnknownRegion(directive.parent.clone()))?;
            if !tree.nodes[parent.0].is_leaf() {
                return Err(LayoutError::AlreadySplit(directive.parent.clone()));
            }
            if directive.first == directive.second {
                return Err(LayoutError::DuplicateRegion(directive.first.clone()));
            }
            for child in [&directive.first, &directive.second] {
                if tree.find(child).is_some() {
                    return Err(LayoutError::DuplicateRegion(child.clone()));
                }
            }

            let first = tree.push_leaf(directive.first.clone());
            let second = tree.push_leaf(directive.second.clone());
            tree.nodes[parent.0].kind = RegionKind::Split {
                direction: directive.direction,
                ratio: directive.ratio,
                first,
                second,
            };
        }

        for binding in &spec.docks {
            let index = tree
                .find(&binding.region)
                .ok_or_else(|| LayoutError::UnknownDockRegion {
                    panel: binding.panel.clone(),
                    region: binding.region.clone(),
                })?;
            if tree.region_of_panel(&binding.panel).is_some() {
                return Err(LayoutError::DuplicatePanel(binding.panel.clone()));
            }

            match &mut tree.nodes[index.0].kind {
                RegionKind::Split { .. } => {
                    return Err(LayoutError::NotALeaf {
                        panel: binding.panel.clone(),
                        region: binding.region.clone(),
                    });
                }
                RegionKind::Leaf { panel: Some(existing) } => {
                    return Err(LayoutError::RegionOccupied {
                        region: binding.region.clone(),
                        existing: existing.clone(),
                        panel: binding.panel.clone(),
                    });
                }
                RegionKind::Leaf { panel } => *panel = Some(binding.panel.clone()),
            }
        }

        Ok(tree)
    }

    fn push_leaf(&mut self, name: RegionName) -> NodeIndex {
        self.nodes.push(RegionNode {
            name,
            kind: RegionKind::Leaf { panel: None },
        });
        NodeIndex(self.nodes.len() - 1)
    }

    /// The full-window region.
    pub fn root(&self) -> &RegionNode {
        &self.nodes[0]
    }

    /// Node at `index`.
    pub fn node(&self, index: NodeIndex) -> Option<&RegionNode> {
        self.nodes.get(index.0)
    }

    /// Look up a region by name.
    pub fn find(&self, name: &RegionName) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .position(|node| &node.name == name)
            .map(NodeIndex)
    }

    /// Node called `name`.
    pub fn get(&self, name: &RegionName) -> Option<&RegionNode> {
        self.find(name).map(|index| &self.nodes[index.0])
    }

    /// Number of regions, split or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Leaves in depth-first order (first child before second).
    pub fn leaves(&self) -> Vec<&RegionNode> {
        self.depth_first()
            .into_iter()
            .map(|index| &self.nodes[index.0])
            .filter(|node| node.is_leaf())
            .collect()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Region holding `panel`, if it is docked.
    pub fn region_of_panel(&self, panel: &PanelName) -> Option<&RegionName> {
        self.nodes
            .iter()
            .find(|node| node.panel() == Some(panel))
            .map(|node| &node.name)
    }

    /// Panel held by the region called `region`.
    pub fn panel_at(&self, region: &RegionName) -> Option<&PanelName> {
        self.get(region).and_then(RegionNode::panel)
    }

    /// Fractional rectangle of every node, indexed like the arena.
    pub fn normalized_rects(&self) -> Vec<NormalizedRect> {
        let mut rects = vec![NormalizedRect::FULL; self.nodes.len()];
        for index in self.depth_first() {
            let parent = rects[index.0];
            if let RegionKind::Split {
                direction,
                ratio,
                first,
                second,
            } = self.nodes[index.0].kind
            {
                let ratio = f64::from(ratio);
                let (a, b) = match direction {
                    SplitDirection::Horizontal => {
                        let first_width = parent.width * ratio;
                        (
                            NormalizedRect {
                                width: first_width,
                                ..parent
                            },
                            NormalizedRect {
                                x: parent.x + first_width,
                                width: parent.width - first_width,
                                ..parent
                            },
                        )
                    }
                    SplitDirection::Vertical => {
                        let first_height = parent.height * ratio;
                        (
                            NormalizedRect {
                                height: first_height,
                                ..parent
                            },
                            NormalizedRect {
                                y: parent.y + first_height,
                                height: parent.height - first_height,
                                ..parent
                            },
                        )
                    }
                };
                rects[first.0] = a;
                rects[second.0] = b;
            }
        }
        rects
    }

    /// Normalized rectangle of the region called `region`.
    pub fn normalized_rect_of(&self, region: &RegionName) -> Option<NormalizedRect> {
        let index = self.find(region)?;
        Some(self.normalized_rects()[index.0])
    }

    /// Cell rectangle of every node for a window covering `area`, indexed
    /// like the arena.
    ///
    /// The first child of a split gets `round(extent * ratio)` cells; the
    /// second child gets the remainder, so children always tile the parent.
    pub fn resolve(&self, area: Rect) -> Vec<Rect> {
        let mut rects = vec![area; self.nodes.len()];
        for index in self.depth_first() {
            let parent = rects[index.0];
            if let RegionKind::Split {
                direction,
                ratio,
                first,
                second,
            } = self.nodes[index.0].kind
            {
                let (a, b) = split_rect(parent, direction, ratio);
                rects[first.0] = a;
                rects[second.0] = b;
            }
        }
        rects
    }

    /// Cell rectangle of the region called `region`.
    pub fn rect_of(&self, region: &RegionName, area: Rect) -> Option<Rect> {
        let index = self.find(region)?;
        Some(self.resolve(area)[index.0])
    }

    /// Leaves with their cell rectangles, in depth-first order.
    pub fn leaf_areas(&self, area: Rect) -> Vec<LeafArea<'_>> {
        let rects = self.resolve(area);
        self.depth_first()
            .into_iter()
            .filter_map(|index| {
                let node = &self.nodes[index.0];
                node.is_leaf().then(|| LeafArea {
                    region: &node.name,
                    panel: node.panel(),
                    rect: rects[index.0],
                })
            })
            .collect()
    }

    /// Node indices with every parent before its children.
    fn depth_first(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeIndex(0)];
        while let Some(index) = stack.pop() {
            order.push(index);
            if let RegionKind::Split { first, second, .. } = self.nodes[index.0].kind {
                stack.push(second);
                stack.push(first);
            }
        }
        order
    }
}

fn split_rect(parent: Rect, direction: SplitDirection, ratio: f32) -> (Rect, Rect) {
    match direction {
        SplitDirection::Horizontal => {
            let first = scaled(parent.width, ratio);
            (
                Rect {
                    width: first,
                    ..parent
                },
                Rect {
                    x: parent.x + first,
                    width: parent.width - first,
                    ..parent
                },
            )
        }
        SplitDirection::Vertical => {
            let first = scaled(parent.height, ratio);
            (
                Rect {
                    height: first,
                    ..parent
                },
                Rect {
                    y: parent.y + first,
                    height: parent.height - first,
                    ..parent
                },
            )
        }
    }
}

fn scaled(extent: u16, ratio: f32) -> u16 {
    let cells = (f64::from(extent) * f64::from(ratio)).round();
    (cells as u16).min(extent)
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
