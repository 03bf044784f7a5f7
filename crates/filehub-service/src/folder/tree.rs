//! Subtree collection over a flat folder list.

use std::collections::{HashMap, VecDeque};

use filehub_entity::folder::FolderNode;

/// Collect `target_pk` and every descendant in breadth-first order.
///
/// The owner's folders are loaded once and walked in memory, so the number
/// of queries does not grow with the depth of the tree. Reversing the result
/// yields an order in which every child precedes its parent.
pub fn collect_subtree(nodes: &[FolderNode], target_pk: i64) -> Vec<FolderNode> {
    let mut children: HashMap<i64, Vec<&FolderNode>> = HashMap::new();
    let mut target = None;
    for node in nodes {
        if node.pk == target_pk {
            target = Some(*node);
        }
        if let Some(parent) = node.parent_pk {
            children.entry(parent).or_default().push(node);
        }
    }

    let Some(target) = target else {
        return Vec::new();
    };

    let mut visited = Vec::new();
    let mut queue = VecDeque::from([target]);
    while let Some(node) = queue.pop_front() {
        if let Some(kids) = children.get(&node.pk) {
            queue.extend(kids.iter().copied().copied());
        }
        visited.push(node);
    }
    visited
}
