use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::error::{DomainError, TreeResult};
use crate::domain::output::StructuredOutput;

/// Opaque, stable handle of a node inside a [`MenuArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "node#{}.{}", slot, generation)
    }
}

/// Variant of a menu node. Only composites carry children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Composite {
        /// Child ids in insertion (= rendering) order
        children: Vec<NodeId>,
    },
}

impl NodeKind {
    pub fn children(&self) -> &[NodeId] {
        match self {
            NodeKind::Leaf => &[],
            NodeKind::Composite { children } => children,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, NodeKind::Composite { .. })
    }
}

/// Tree node in the arena-based menu structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Text shown for this entry
    pub label: String,
    /// Leaf or composite, with the ordered children of the latter
    pub kind: NodeKind,
    /// Parent node, None for roots and detached nodes
    pub parent: Option<NodeId>,
}

/// Arena holding any number of menu trees.
///
/// Nodes are created detached and linked with [`MenuArena::add_child`], which is
/// the only mutator. It keeps the structure a forest: no cycles, one parent per
/// node. All walks use explicit stacks so arbitrarily deep trees are safe.
#[derive(Debug)]
pub struct MenuArena {
    arena: Arena<TreeNode>,
}

impl Default for MenuArena {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    #[instrument(level = "trace", skip(self, label), fields(label = %label.as_ref()))]
    pub fn create_leaf(&mut self, label: impl AsRef<str>) -> NodeId {
        self.insert(label.as_ref(), NodeKind::Leaf)
    }

    #[instrument(level = "trace", skip(self, label), fields(label = %label.as_ref()))]
    pub fn create_composite(&mut self, label: impl AsRef<str>) -> NodeId {
        self.insert(
            label.as_ref(),
            NodeKind::Composite {
                children: Vec::new(),
            },
        )
    }

    fn insert(&mut self, label: &str, kind: NodeKind) -> NodeId {
        NodeId(self.arena.insert(TreeNode {
            label: label.to_string(),
            kind,
            parent: None,
        }))
    }

    /// Appends `child` to the children of `parent`.
    ///
    /// Rejected, with the arena untouched, when:
    /// - either id does not resolve (`InvalidNode`)
    /// - `child` is `parent` or one of its ancestors (`Cycle`)
    /// - `parent` is a leaf (`NotComposite`)
    /// - `child` already hangs below another node (`AlreadyAttached`)
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;

        if self.is_ancestor_or_self(child, parent) {
            return Err(DomainError::Cycle { parent, child });
        }
        if !parent_node.kind.is_composite() {
            return Err(DomainError::NotComposite(parent));
        }
        if child_node.parent.is_some() {
            return Err(DomainError::AlreadyAttached(child));
        }

        if let Some(TreeNode {
            kind: NodeKind::Composite { children },
            ..
        }) = self.arena.get_mut(parent.0)
        {
            children.push(child);
        }
        if let Some(node) = self.arena.get_mut(child.0) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Walks the parent chain of `node` looking for `candidate`.
    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.arena.get(id.0).and_then(|n| n.parent);
        }
        false
    }

    pub fn node(&self, id: NodeId) -> TreeResult<&TreeNode> {
        self.arena.get(id.0).ok_or(DomainError::InvalidNode(id))
    }

    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena.get(id.0)
    }

    pub fn label(&self, id: NodeId) -> TreeResult<&str> {
        Ok(&self.node(id)?.label)
    }

    pub fn children(&self, id: NodeId) -> TreeResult<&[NodeId]> {
        Ok(self.node(id)?.kind.children())
    }

    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Projects the tree below `root` into a [`StructuredOutput`].
    ///
    /// Post-order over an explicit stack: a node is assembled once all of its
    /// children are, taking their outputs off the `done` stack in insertion order.
    #[instrument(level = "debug", skip(self))]
    pub fn render(&self, root: NodeId) -> TreeResult<StructuredOutput> {
        let mut stack: Vec<(NodeId, bool)> = vec![(root, false)];
        let mut done: Vec<StructuredOutput> = Vec::new();

        while let Some((id, expanded)) = stack.pop() {
            let node = self.node(id)?;
            let children = node.kind.children();
            if expanded {
                let rendered = done.split_off(done.len() - children.len());
                done.push(StructuredOutput::new(node.label.clone(), rendered));
            } else {
                stack.push((id, true));
                // Push children in reverse order for left-to-right traversal
                for &child in children.iter().rev() {
                    stack.push((child, false));
                }
            }
        }

        done.pop().ok_or(DomainError::InvalidNode(root))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self, root: NodeId) -> TreeIterator<'_> {
        TreeIterator::new(self, root)
    }

    /// Number of levels below and including `root`; 0 for an unknown id.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, root: NodeId) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(root, 1)];

        while let Some((id, depth)) = stack.pop() {
            if let Some(node) = self.get_node(id) {
                max_depth = max_depth.max(depth);
                for &child in node.kind.children() {
                    stack.push((child, depth + 1));
                }
            }
        }

        max_depth
    }

    /// Labels of all leaves below `root`, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_labels(&self, root: NodeId) -> Vec<String> {
        self.iter(root)
            .filter(|(_, node)| !node.kind.is_composite())
            .map(|(_, node)| node.label.clone())
            .collect()
    }
}

/// Pre-order iterator over a subtree.
pub struct TreeIterator<'a> {
    arena: &'a MenuArena,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a MenuArena, root: NodeId) -> Self {
        Self {
            arena,
            stack: vec![root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current) {
                for &child in node.kind.children().iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}
