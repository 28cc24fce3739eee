//! Shortest dependency chain by breadth-first search.

use super::adjacency::Adjacency;
use super::types::{DependencyPath, GraphSnapshot};
use crate::domain::ApplicationId;
use std::collections::{HashMap, HashSet, VecDeque};

/// Result of a path search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    /// A shortest path exists.
    Found(DependencyPath),
    /// This endpoint is not an application of the snapshot.
    UnknownApplication(ApplicationId),
    /// Both endpoints exist but `to` cannot be reached from `from`.
    Unreachable,
}

/// Finds a shortest consumer → provider chain from `from` to `to`.
///
/// Edges are followed in their stored direction only. Nodes are marked when
/// enqueued and keep the first predecessor found, so among equally short
/// paths the one using earlier edges wins. Intermediate ids without a node
/// (dangling targets) are traversed but contribute no code; `length` still
/// counts every hop.
#[must_use]
pub fn find_path(snapshot: &GraphSnapshot, from: ApplicationId, to: ApplicationId) -> PathOutcome {
    let Some(from_node) = snapshot.node(from) else {
        return PathOutcome::UnknownApplication(from);
    };
    let Some(to_node) = snapshot.node(to) else {
        return PathOutcome::UnknownApplication(to);
    };

    let adjacency = Adjacency::new(snapshot);
    let mut predecessor: HashMap<ApplicationId, ApplicationId> = HashMap::new();
    let mut visited = HashSet::from([from]);
    let mut queue = VecDeque::from([from]);

    while let Some(current) = queue.pop_front() {
        if current == to {
            let ids = walk_back(&predecessor, from, to);
            let path = ids
                .iter()
                .filter_map(|&id| snapshot.node(id).map(|node| node.code.clone()))
                .collect();
            return PathOutcome::Found(DependencyPath {
                from_app: from_node.code.clone(),
                to_app: to_node.code.clone(),
                path,
                length: ids.len() - 1,
            });
        }

        for edge in adjacency.edges_from(current) {
            if visited.insert(edge.target) {
                predecessor.insert(edge.target, current);
                queue.push_back(edge.target);
            }
        }
    }

    PathOutcome::Unreachable
}

fn walk_back(
    predecessor: &HashMap<ApplicationId, ApplicationId>,
    from: ApplicationId,
    to: ApplicationId,
) -> Vec<ApplicationId> {
    let mut ids = vec![to];
    let mut current = to;
    while current != from {
        match predecessor.get(&current) {
            Some(&previous) => {
                ids.push(previous);
                current = previous;
            }
            None => break,
        }
    }
    ids.reverse();
    ids
}
