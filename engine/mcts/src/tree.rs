//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. The whole arena is dropped with
//! the tree; nodes are never freed individually.

use std::cmp::Ordering;

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<M> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<M>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<M: Clone + PartialEq> MctsTree<M> {
    /// Create a new tree holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![MctsNode::new_root()],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<M> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<M> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: MctsNode<M>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<M>] {
        &self.nodes
    }

    /// Select the child of `node_id` with the highest UCB1 score.
    ///
    /// Ties go to the child that was added first. Returns None if the node
    /// has no children.
    pub fn select_child(&self, node_id: NodeId, exploration_weight: f32) -> Option<(M, NodeId)> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let parent_visits_ln = (node.visit_count.max(1) as f32).ln();

        let mut best: Option<(&(M, NodeId), f32)> = None;
        for entry in &node.children {
            let score = self.get(entry.1).ucb_score(parent_visits_ln, exploration_weight);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((entry, score)),
            }
        }

        best.map(|((mv, id), _)| (mv.clone(), *id))
    }

    /// Find the child of `parent_id` reached by `mv`.
    #[inline]
    pub fn find_child(&self, parent_id: NodeId, mv: &M) -> Option<NodeId> {
        self.get(parent_id).child(mv)
    }

    /// Add a child to a parent node with its first visit and value.
    /// Returns the new child's NodeId.
    ///
    /// The caller guarantees `mv` is not already a child of `parent_id`.
    pub fn add_child(&mut self, parent_id: NodeId, mv: M, value: f32) -> NodeId {
        debug_assert!(
            !self.get(parent_id).has_child(&mv),
            "duplicate child under node {}",
            parent_id.0
        );

        let child_id = self.allocate(MctsNode::new_child(parent_id, mv.clone(), value));

        // Add to parent's children
        self.get_mut(parent_id).children.push((mv, child_id));

        child_id
    }

    /// Fold `value` into the node's running mean. The visit that produced
    /// it must already be counted.
    pub fn backpropagate(&mut self, node_id: NodeId, value: f32) {
        self.get_mut(node_id).record(value);
    }

    /// Root children ordered by mean value, best first.
    ///
    /// The sort is stable, so equal means keep their expansion order.
    pub fn ranked_children(&self) -> Vec<(M, NodeId)> {
        let mut ranked = self.get(self.root).children.clone();
        ranked.sort_by(|(_, a), (_, b)| {
            self.get(*b)
                .mean_value
                .partial_cmp(&self.get(*a).mean_value)
                .unwrap_or(Ordering::Equal)
        });
        ranked
    }

    /// Get the best move from the root by mean value.
    /// Returns (move, mean_value) or None if root has no children.
    pub fn best_action(&self) -> Option<(M, f32)> {
        self.ranked_children()
            .into_iter()
            .next()
            .map(|(mv, id)| (mv, self.get(id).mean_value))
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_children: root.children.len(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|(_, id)| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

impl<M: Clone + PartialEq> Default for MctsTree<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_children: usize,
    pub max_depth: u32,
}
