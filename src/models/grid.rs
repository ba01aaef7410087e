//! Split-pane layout tree.
//!
//! Nodes live in an arena keyed by [`GridNodeId`] and point at their parent
//! explicitly. A leaf holds exactly one item (an editor group in the engine);
//! a split holds at least two children with relative weights summing to 1.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use std::fmt;

new_key_type! { pub struct GridNodeId; }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// Children side by side.
    Horizontal,
    /// Children stacked.
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    InvalidNodeId,
    NotALeaf,
    NotASplit,
    SoleLeaf,
    WeightsMismatch { expected: usize, actual: usize },
    InvalidWeight,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidNodeId => write!(f, "invalid grid node id"),
            GridError::NotALeaf => write!(f, "grid node is not a leaf"),
            GridError::NotASplit => write!(f, "grid node is not a split"),
            GridError::SoleLeaf => write!(f, "cannot remove the only leaf of the grid"),
            GridError::WeightsMismatch { expected, actual } => {
                write!(f, "expected {} weights, got {}", expected, actual)
            }
            GridError::InvalidWeight => write!(f, "weights must be finite and positive"),
        }
    }
}

impl std::error::Error for GridError {}

/// Serializable form of a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridState<S> {
    Leaf {
        #[serde(rename = "editorGroup")]
        item: S,
    },
    Split {
        #[serde(rename = "splitDirection")]
        direction: SplitDirection,
        children: Vec<GridState<S>>,
        #[serde(default)]
        weights: Vec<f64>,
    },
}

impl<S> GridState<S> {
    pub fn leaf(item: S) -> Self {
        GridState::Leaf { item }
    }
}

impl<S: Default> Default for GridState<S> {
    fn default() -> Self {
        GridState::Leaf { item: S::default() }
    }
}

#[derive(Debug, Clone)]
enum NodeKind<G> {
    Leaf(G),
    Split {
        direction: SplitDirection,
        children: Vec<GridNodeId>,
        weights: Vec<f64>,
    },
}

#[derive(Debug, Clone)]
struct Node<G> {
    parent: Option<GridNodeId>,
    kind: NodeKind<G>,
}

impl<G> Node<G> {
    fn leaf(item: G, parent: Option<GridNodeId>) -> Self {
        Self {
            parent,
            kind: NodeKind::Leaf(item),
        }
    }

    fn split(direction: SplitDirection, parent: Option<GridNodeId>) -> Self {
        Self {
            parent,
            kind: NodeKind::Split {
                direction,
                children: Vec::new(),
                weights: Vec::new(),
            },
        }
    }
}

pub struct Grid<G> {
    arena: SlotMap<GridNodeId, Node<G>>,
    root: GridNodeId,
}

impl<G> Grid<G> {
    pub fn new(item: G) -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Node::leaf(item, None));
        Self { arena, root }
    }

    pub fn root(&self) -> GridNodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: GridNodeId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn parent(&self, id: GridNodeId) -> Option<GridNodeId> {
        self.arena.get(id).and_then(|node| node.parent)
    }

    pub fn item(&self, id: GridNodeId) -> Option<&G> {
        match self.arena.get(id).map(|node| &node.kind) {
            Some(NodeKind::Leaf(item)) => Some(item),
            _ => None,
        }
    }

    pub fn is_leaf(&self, id: GridNodeId) -> bool {
        self.item(id).is_some()
    }

    /// True when `id` is a leaf with no parent, i.e. the whole grid.
    pub fn is_sole_leaf(&self, id: GridNodeId) -> bool {
        id == self.root && self.is_leaf(id)
    }

    pub fn direction(&self, id: GridNodeId) -> Option<SplitDirection> {
        match self.arena.get(id).map(|node| &node.kind) {
            Some(NodeKind::Split { direction, .. }) => Some(*direction),
            _ => None,
        }
    }

    pub fn children(&self, id: GridNodeId) -> &[GridNodeId] {
        match self.arena.get(id).map(|node| &node.kind) {
            Some(NodeKind::Split { children, .. }) => children,
            _ => &[],
        }
    }

    pub fn weights(&self, id: GridNodeId) -> &[f64] {
        match self.arena.get(id).map(|node| &node.kind) {
            Some(NodeKind::Split { weights, .. }) => weights,
            _ => &[],
        }
    }

    /// Leaves in depth-first, left-to-right order.
    pub fn leaves(&self) -> Vec<GridNodeId> {
        self.leaves_under(self.root)
    }

    pub fn leaves_under(&self, id: GridNodeId) -> Vec<GridNodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            match self.arena.get(node_id).map(|node| &node.kind) {
                Some(NodeKind::Leaf(_)) => out.push(node_id),
                Some(NodeKind::Split { children, .. }) => {
                    stack.extend(children.iter().rev().copied());
                }
                None => {}
            }
        }
        out
    }

    pub fn items(&self) -> impl Iterator<Item = (GridNodeId, &G)> + '_ {
        self.leaves()
            .into_iter()
            .filter_map(move |id| self.item(id).map(|item| (id, item)))
    }

    /// Places `item` in a new leaf next to `leaf`.
    ///
    /// If `leaf` already sits in a split running in `direction`, the new leaf
    /// joins that split and takes half of `leaf`'s weight. Otherwise a new
    /// split takes `leaf`'s place. Existing node ids are never reassigned.
    pub fn split(
        &mut self,
        leaf: GridNodeId,
        direction: SplitDirection,
        item: G,
        before: bool,
    ) -> Result<GridNodeId, GridError> {
        let parent = {
            let node = self.arena.get(leaf).ok_or(GridError::InvalidNodeId)?;
            if !matches!(node.kind, NodeKind::Leaf(_)) {
                return Err(GridError::NotALeaf);
            }
            node.parent
        };

        if let Some(parent_id) = parent {
            if self.direction(parent_id) == Some(direction) {
                let pos = self
                    .children(parent_id)
                    .iter()
                    .position(|child| *child == leaf)
                    .ok_or(GridError::InvalidNodeId)?;
                let new_id = self.arena.insert(Node::leaf(item, Some(parent_id)));
                if let Some(NodeKind::Split {
                    children, weights, ..
                }) = self.arena.get_mut(parent_id).map(|node| &mut node.kind)
                {
                    let half = weights[pos] / 2.0;
                    weights[pos] = half;
                    let at = if before { pos } else { pos + 1 };
                    children.insert(at, new_id);
                    weights.insert(at, half);
                }
                return Ok(new_id);
            }
        }

        let split_id = self.arena.insert(Node::split(direction, parent));
        let new_id = self.arena.insert(Node::leaf(item, Some(split_id)));
        if let Some(NodeKind::Split {
            children, weights, ..
        }) = self.arena.get_mut(split_id).map(|node| &mut node.kind)
        {
            *children = if before {
                vec![new_id, leaf]
            } else {
                vec![leaf, new_id]
            };
            *weights = vec![0.5, 0.5];
        }
        self.replace_child(parent, leaf, split_id);
        if let Some(node) = self.arena.get_mut(leaf) {
            node.parent = Some(split_id);
        }
        Ok(new_id)
    }

    /// Detaches `leaf` and returns its item.
    ///
    /// A split left with a single child is collapsed into that child.
    pub fn remove(&mut self, leaf: GridNodeId) -> Result<G, GridError> {
        let parent_id = {
            let node = self.arena.get(leaf).ok_or(GridError::InvalidNodeId)?;
            if !matches!(node.kind, NodeKind::Leaf(_)) {
                return Err(GridError::NotALeaf);
            }
            node.parent.ok_or(GridError::SoleLeaf)?
        };

        let removed = self.arena.remove(leaf).ok_or(GridError::InvalidNodeId)?;
        let item = match removed.kind {
            NodeKind::Leaf(item) => item,
            NodeKind::Split { .. } => return Err(GridError::NotALeaf),
        };

        let mut collapse_into = None;
        let grandparent = self.parent(parent_id);
        if let Some(NodeKind::Split {
            children, weights, ..
        }) = self.arena.get_mut(parent_id).map(|node| &mut node.kind)
        {
            if let Some(pos) = children.iter().position(|child| *child == leaf) {
                children.remove(pos);
                weights.remove(pos);
            }
            normalize(weights);
            if children.len() == 1 {
                collapse_into = Some(children[0]);
            }
        }

        if let Some(only) = collapse_into {
            self.arena.remove(parent_id);
            self.replace_child(grandparent, parent_id, only);
        }

        Ok(item)
    }

    pub fn set_weights(&mut self, split: GridNodeId, weights: Vec<f64>) -> Result<(), GridError> {
        let node = self.arena.get_mut(split).ok_or(GridError::InvalidNodeId)?;
        let NodeKind::Split {
            children,
            weights: current,
            ..
        } = &mut node.kind
        else {
            return Err(GridError::NotASplit);
        };
        if weights.len() != children.len() {
            return Err(GridError::WeightsMismatch {
                expected: children.len(),
                actual: weights.len(),
            });
        }
        if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(GridError::InvalidWeight);
        }
        *current = weights;
        normalize(current);
        Ok(())
    }

    pub fn serialize<S, F>(&self, f: F) -> GridState<S>
    where
        F: Fn(&G) -> S,
    {
        self.serialize_node(self.root, &f)
    }

    fn serialize_node<S, F>(&self, id: GridNodeId, f: &F) -> GridState<S>
    where
        F: Fn(&G) -> S,
    {
        match self.arena.get(id).map(|node| &node.kind) {
            Some(NodeKind::Split {
                direction,
                children,
                weights,
            }) => GridState::Split {
                direction: *direction,
                children: children
                    .iter()
                    .map(|child| self.serialize_node(*child, f))
                    .collect(),
                weights: weights.clone(),
            },
            Some(NodeKind::Leaf(item)) => GridState::Leaf { item: f(item) },
            None => GridState::Split {
                direction: SplitDirection::Horizontal,
                children: Vec::new(),
                weights: Vec::new(),
            },
        }
    }

    /// Rebuilds a grid, calling `factory` once per leaf in depth-first order.
    ///
    /// Splits with no children load as an empty leaf and splits with one
    /// child load as that child.
    pub fn from_state<S, F>(state: GridState<S>, mut factory: F) -> Self
    where
        S: Default,
        F: FnMut(S) -> G,
    {
        let mut arena = SlotMap::with_key();
        let root = build_node(&mut arena, state, None, &mut factory);
        Self { arena, root }
    }

    fn replace_child(&mut self, parent: Option<GridNodeId>, old: GridNodeId, new: GridNodeId) {
        match parent {
            Some(parent_id) => {
                if let Some(NodeKind::Split { children, .. }) =
                    self.arena.get_mut(parent_id).map(|node| &mut node.kind)
                {
                    for child in children.iter_mut() {
                        if *child == old {
                            *child = new;
                        }
                    }
                }
            }
            None => self.root = new,
        }
        if let Some(node) = self.arena.get_mut(new) {
            node.parent = parent;
        }
    }
}

fn build_node<G, S, F>(
    arena: &mut SlotMap<GridNodeId, Node<G>>,
    state: GridState<S>,
    parent: Option<GridNodeId>,
    factory: &mut F,
) -> GridNodeId
where
    S: Default,
    F: FnMut(S) -> G,
{
    match state {
        GridState::Leaf { item } => arena.insert(Node::leaf(factory(item), parent)),
        GridState::Split {
            direction,
            mut children,
            weights,
        } => match children.len() {
            0 => arena.insert(Node::leaf(factory(S::default()), parent)),
            1 => match children.pop() {
                Some(only) => build_node(arena, only, parent, factory),
                None => arena.insert(Node::leaf(factory(S::default()), parent)),
            },
            count => {
                let id = arena.insert(Node::split(direction, parent));
                let ids: Vec<GridNodeId> = children
                    .into_iter()
                    .map(|child| build_node(arena, child, Some(id), factory))
                    .collect();
                let mut weights = if weights.len() == count
                    && weights.iter().all(|w| w.is_finite() && *w > 0.0)
                {
                    weights
                } else {
                    vec![1.0; count]
                };
                normalize(&mut weights);
                if let Some(node) = arena.get_mut(id) {
                    node.kind = NodeKind::Split {
                        direction,
                        children: ids,
                        weights,
                    };
                }
                id
            }
        },
    }
}

fn normalize(weights: &mut [f64]) {
    if weights.is_empty() {
        return;
    }
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        let equal = 1.0 / weights.len() as f64;
        weights.iter_mut().for_each(|w| *w = equal);
        return;
    }
    weights.iter_mut().for_each(|w| *w /= total);
}

#[cfg(test)]
#[path = "../../tests/unit/models/grid.rs"]
mod tests;
