use crate::tree_node::TreeNode;

/// Given a set of tree nodes, get the max total claim amount. `None` on overflow
pub fn get_max_total_claim(nodes: &[TreeNode]) -> Option<u128> {
    nodes
        .iter()
        .try_fold(0u128, |acc, n| acc.checked_add(n.amount()))
}
