//! Depth-bounded dependency tree.
//!
//! Expansion runs on an explicit stack and assembly on an index arena, so a
//! deep registry cannot overflow the call stack.

use super::adjacency::Adjacency;
use super::types::{DependencyInfo, DependencyTree, Edge, GraphSnapshot};
use crate::domain::ApplicationId;
use std::collections::HashSet;

struct Pending<'a> {
    id: ApplicationId,
    depth: usize,
    parent: Option<usize>,
    via: Option<&'a Edge>,
}

struct Slot {
    tree: DependencyTree,
    parent: Option<usize>,
}

/// Builds the dependency tree rooted at `root`, or `None` if `root` is not a
/// node of the snapshot.
///
/// The root sits at depth 0 and nothing deeper than `max_depth` is expanded,
/// so `max_depth == 0` yields a childless root. One visited set covers the
/// whole call: each application appears at most once, at the first place a
/// pre-order walk in edge order reaches it. Cycles and diamonds therefore
/// collapse into a spanning tree. Edges to ids without a node are skipped.
#[must_use]
pub fn build_tree(
    snapshot: &GraphSnapshot,
    root: ApplicationId,
    max_depth: usize,
) -> Option<DependencyTree> {
    if !snapshot.contains(root) {
        return None;
    }

    let adjacency = Adjacency::new(snapshot);
    let mut visited = HashSet::new();
    let mut arena: Vec<Slot> = Vec::new();
    let mut stack = vec![Pending {
        id: root,
        depth: 0,
        parent: None,
        via: None,
    }];

    while let Some(item) = stack.pop() {
        if item.depth > max_depth || !visited.insert(item.id) {
            continue;
        }
        let Some(node) = snapshot.node(item.id) else {
            continue;
        };

        let slot = arena.len();
        arena.push(Slot {
            tree: DependencyTree {
                app_id: node.id,
                app_code: node.code.clone(),
                app_name: node.display_name.clone(),
                children: Vec::new(),
                dependency_info: item.via.map(DependencyInfo::from),
            },
            parent: item.parent,
        });

        // Reversed so the first edge is popped, and fully expanded, first.
        for edge in adjacency.edges_from(item.id).iter().rev() {
            if snapshot.contains(edge.target) {
                stack.push(Pending {
                    id: edge.target,
                    depth: item.depth + 1,
                    parent: Some(slot),
                    via: Some(edge),
                });
            }
        }
    }

    assemble(arena)
}

/// Folds the arena into nested trees.
///
/// Descendants always come after their ancestor in the arena, so walking it
/// backwards finishes every subtree before its parent is moved. Siblings are
/// collected last-first and flipped when their parent is reached.
fn assemble(mut arena: Vec<Slot>) -> Option<DependencyTree> {
    while let Some(mut slot) = arena.pop() {
        slot.tree.children.reverse();
        match slot.parent {
            Some(parent) => arena[parent].tree.children.push(slot.tree),
            None => return Some(slot.tree),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Application, Criticality, DependencyRecord, DependencyType};
    use crate::graph::build_snapshot;
    use std::collections::HashMap;

    fn snapshot(app_ids: &[i64], edges: &[(i64, i64)]) -> GraphSnapshot {
        let apps = app_ids
            .iter()
            .map(|&id| Application::new(id, format!("app-{id}")))
            .collect();
        let deps = edges
            .iter()
            .enumerate()
            .map(|(i, &(from, to))| {
                DependencyRecord::new(
                    i as i64,
                    from,
                    Some(ApplicationId(to)),
                    format!("{from}->{to}"),
                )
            })
            .collect();
        build_snapshot(apps, deps, &HashMap::new())
    }

    fn child_codes(tree: &DependencyTree) -> Vec<&str> {
        tree.children.iter().map(|c| c.app_code.as_str()).collect()
    }

    #[test]
    fn unknown_root_has_no_tree() {
        let graph = snapshot(&[1], &[]);
        assert!(build_tree(&graph, ApplicationId(2), 5).is_none());
    }

    #[test]
    fn zero_depth_is_childless_root() {
        let graph = snapshot(&[1, 2], &[(1, 2)]);

        let tree = build_tree(&graph, ApplicationId(1), 0).unwrap();
        assert_eq!(tree.app_code, "app-1");
        assert!(tree.children.is_empty());
        assert!(tree.dependency_info.is_none());
    }

    #[test]
    fn children_follow_edge_order_with_dependency_info() {
        let mut apps: Vec<_> = (1..=3)
            .map(|id| Application::new(id, format!("app-{id}")))
            .collect();
        apps[0].display_name = "Root App".to_string();
        let mut db = DependencyRecord::new(1, 1, Some(ApplicationId(3)), "orders-db");
        db.dependency_type = DependencyType::Database;
        db.criticality = Criticality::Critical;
        let deps = vec![db, DependencyRecord::new(2, 1, Some(ApplicationId(2)), "auth")];
        let graph = build_snapshot(apps, deps, &HashMap::new());

        let tree = build_tree(&graph, ApplicationId(1), 5).unwrap();

        assert_eq!(tree.app_name, "Root App");
        assert_eq!(child_codes(&tree), vec!["app-3", "app-2"]);
        assert_eq!(
            tree.children[0].dependency_info,
            Some(DependencyInfo {
                name: "orders-db".to_string(),
                dependency_type: DependencyType::Database,
                criticality: Criticality::Critical,
            })
        );
    }

    #[test]
    fn mutual_dependency_terminates() {
        let graph = snapshot(&[1, 2], &[(1, 2), (2, 1)]);

        let tree = build_tree(&graph, ApplicationId(1), 5).unwrap();

        assert_eq!(child_codes(&tree), vec!["app-2"]);
        assert!(tree.children[0].children.is_empty());
    }

    #[test]
    fn diamond_expands_shared_node_once_in_first_branch() {
        // 1 -> 2 -> 4, 1 -> 3 -> 4
        let graph = snapshot(&[1, 2, 3, 4], &[(1, 2), (1, 3), (2, 4), (3, 4)]);

        let tree = build_tree(&graph, ApplicationId(1), 5).unwrap();

        assert_eq!(child_codes(&tree), vec!["app-2", "app-3"]);
        assert_eq!(child_codes(&tree.children[0]), vec!["app-4"]);
        assert!(tree.children[1].children.is_empty());
        assert_eq!(tree.size(), 4);
    }

    #[test]
    fn depth_limit_cuts_chain() {
        let graph = snapshot(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 4)]);

        let tree = build_tree(&graph, ApplicationId(1), 2).unwrap();

        assert_eq!(tree.size(), 3);
        assert!(tree.children[0].children[0].children.is_empty());
    }

    #[test]
    fn node_cut_by_depth_can_appear_higher_up_later() {
        // 1 -> 2 -> 3 -> 4 and 1 -> 4; with depth 2, 4 is too deep under 3
        // but still reachable directly from the root.
        let graph = snapshot(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 4), (1, 4)]);

        let tree = build_tree(&graph, ApplicationId(1), 2).unwrap();

        assert_eq!(child_codes(&tree), vec!["app-2", "app-4"]);
    }

    #[test]
    fn dangling_targets_are_skipped() {
        let graph = snapshot(&[1, 2], &[(1, 42), (1, 2)]);

        let tree = build_tree(&graph, ApplicationId(1), 5).unwrap();
        assert_eq!(child_codes(&tree), vec!["app-2"]);
    }

    #[test]
    fn deep_chain_is_built_iteratively() {
        let ids: Vec<i64> = (0..1_000).collect();
        let edges: Vec<(i64, i64)> = ids.windows(2).map(|w| (w[0], w[1])).collect();
        let graph = snapshot(&ids, &edges);

        let tree = build_tree(&graph, ApplicationId(0), usize::MAX).unwrap();
        assert_eq!(tree.size(), 1_000);
    }
}
