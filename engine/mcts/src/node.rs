//! MCTS tree node representation.
//!
//! Each node represents the position reached by playing `action` from the
//! parent. Nodes store the visit statistics used for UCB1 selection.

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<M> {
    /// Parent node index (NONE for root). Read-only back reference;
    /// the arena owns every node.
    pub parent: NodeId,

    /// Move that led to this node from parent (None for root)
    pub action: Option<M>,

    /// Number of sampled paths this node has been part of
    pub visit_count: u32,

    /// Running average of backpropagated outcomes, from the perspective of
    /// the player who chose `action` at the parent
    pub mean_value: f32,

    /// Children: Vec of (move, NodeId) pairs, at most one per move
    pub children: Vec<(M, NodeId)>,
}

impl<M: PartialEq> MctsNode<M> {
    /// Create a new root node.
    ///
    /// The root starts with one visit so that UCB1 at the root always has
    /// a defined `ln(N)`.
    pub fn new_root() -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            visit_count: 1,
            mean_value: 0.0,
            children: Vec::new(),
        }
    }

    /// Create a new child node carrying its first visit.
    pub fn new_child(parent: NodeId, action: M, value: f32) -> Self {
        Self {
            parent,
            action: Some(action),
            visit_count: 1,
            mean_value: value,
            children: Vec::new(),
        }
    }

    /// Count one more pass through this node.
    #[inline]
    pub fn visit(&mut self) {
        self.visit_count += 1;
    }

    /// Fold an outcome into the running mean.
    ///
    /// The visit for this outcome must already be counted.
    #[inline]
    pub fn record(&mut self, value: f32) {
        debug_assert!(self.visit_count > 0, "record on an unvisited node");
        self.mean_value += (value - self.mean_value) / self.visit_count as f32;
    }

    /// UCB1 score for child selection.
    /// UCB(s,a) = Q(s,a) + C * sqrt(ln(N_parent) / N(s,a))
    ///
    /// Takes pre-computed ln(parent_visits) to avoid redundant ln calls
    /// when comparing multiple children.
    #[inline]
    pub fn ucb_score(&self, parent_visits_ln: f32, exploration_weight: f32) -> f32 {
        if self.visit_count == 0 {
            return f32::INFINITY;
        }
        let explore = (parent_visits_ln / self.visit_count as f32).sqrt();
        self.mean_value + exploration_weight * explore
    }

    /// Calculate UCB1 score (convenience method that computes ln internally).
    #[inline]
    pub fn ucb_score_with_parent_visits(&self, parent_visits: u32, exploration_weight: f32) -> f32 {
        self.ucb_score((parent_visits as f32).ln(), exploration_weight)
    }

    /// Look up the child reached by `mv`.
    pub fn child(&self, mv: &M) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(action, _)| action == mv)
            .map(|(_, id)| *id)
    }

    #[inline]
    pub fn has_child(&self, mv: &M) -> bool {
        self.child(mv).is_some()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node: MctsNode<u8> = MctsNode::new_root();

        assert!(node.is_root());
        assert!(node.action.is_none());
        assert_eq!(node.visit_count, 1);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_new_child_carries_first_visit() {
        let node = MctsNode::new_child(NodeId(0), 7u8, 0.25);
        assert!(!node.is_root());
        assert_eq!(node.action, Some(7));
        assert_eq!(node.visit_count, 1);
        assert!((node.mean_value - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_incremental_mean() {
        let mut node = MctsNode::new_child(NodeId(0), 0u8, 1.0);

        node.visit();
        node.record(0.0);
        assert!((node.mean_value - 0.5).abs() < 1e-6);

        node.visit();
        node.record(-1.0);
        assert!(node.mean_value.abs() < 1e-6);
        assert_eq!(node.visit_count, 3);
    }

    #[test]
    fn test_ucb_score() {
        let mut node = MctsNode::new_child(NodeId(0), 0u8, 0.5);
        node.visit_count = 4;

        // UCB = 0.5 + 1.0 * sqrt(ln(100) / 4) = 0.5 + sqrt(1.1513) ≈ 1.5730
        let ucb = node.ucb_score_with_parent_visits(100, 1.0);
        assert!((ucb - 1.5730).abs() < 1e-3);

        // Precomputed ln gives same result
        let ucb2 = node.ucb_score((100f32).ln(), 1.0);
        assert!((ucb - ucb2).abs() < 1e-6);
    }

    #[test]
    fn test_ucb_single_parent_visit_is_pure_exploitation() {
        let node = MctsNode::new_child(NodeId(0), 0u8, -0.3);
        let ucb = node.ucb_score_with_parent_visits(1, 1.0);
        assert!((ucb - (-0.3)).abs() < 1e-6);
    }

    #[test]
    fn test_child_lookup() {
        let mut node: MctsNode<u8> = MctsNode::new_root();
        node.children.push((3, NodeId(1)));
        node.children.push((5, NodeId(2)));

        assert_eq!(node.child(&5), Some(NodeId(2)));
        assert!(node.has_child(&3));
        assert!(!node.has_child(&4));
    }
}
