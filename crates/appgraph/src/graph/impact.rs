//! Reverse reachability: what breaks if an application disappears.

use super::types::{GraphSnapshot, ImpactReport, ImpactedApp};
use crate::domain::ApplicationId;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, VecDeque};

/// Lists every application that depends on `app`, directly or transitively.
///
/// Each dependent is reported once, at its minimum distance, in
/// breadth-first discovery order with incoming edges taken in edge-list
/// order. Edges touching ids without a node are ignored. Returns `None` if
/// `app` is not a node of the snapshot.
#[must_use]
pub fn analyze_impact(snapshot: &GraphSnapshot, app: ApplicationId) -> Option<ImpactReport> {
    let root_node = snapshot.node(app)?;

    let mut graph: DiGraph<ApplicationId, ()> = DiGraph::with_capacity(
        snapshot.nodes().len(),
        snapshot.edges().len(),
    );
    let index: HashMap<ApplicationId, NodeIndex> = snapshot
        .nodes()
        .iter()
        .map(|node| (node.id, graph.add_node(node.id)))
        .collect();
    for edge in snapshot.edges() {
        if let (Some(&from), Some(&to)) = (index.get(&edge.source), index.get(&edge.target)) {
            graph.add_edge(from, to, ());
        }
    }

    let root = *index.get(&app)?;
    let mut depth_of: HashMap<NodeIndex, usize> = HashMap::from([(root, 0)]);
    let mut queue = VecDeque::from([root]);
    let mut direct = Vec::new();
    let mut transitive = Vec::new();
    let mut max_depth_reached = 0;

    while let Some(current) = queue.pop_front() {
        let depth = depth_of[&current];

        let mut incoming: Vec<_> = graph.edges_directed(current, Direction::Incoming).collect();
        incoming.sort_by_key(|edge| edge.id());

        for edge in incoming {
            let dependent = edge.source();
            if depth_of.contains_key(&dependent) {
                continue;
            }
            let dependent_depth = depth + 1;
            depth_of.insert(dependent, dependent_depth);
            queue.push_back(dependent);
            max_depth_reached = max_depth_reached.max(dependent_depth);

            let Some(node) = snapshot.node(graph[dependent]) else {
                continue;
            };
            let impacted = ImpactedApp {
                app_id: node.id,
                app_code: node.code.clone(),
                app_name: node.display_name.clone(),
                depth: dependent_depth,
            };
            if dependent_depth == 1 {
                direct.push(impacted);
            } else {
                transitive.push(impacted);
            }
        }
    }

    tracing::debug!(
        app = %app,
        direct = direct.len(),
        transitive = transitive.len(),
        "Impact analysis finished"
    );

    Some(ImpactReport {
        app_id: app,
        app_code: root_node.code.clone(),
        direct_dependents: direct,
        transitive_dependents: transitive,
        max_depth_reached,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Application, DependencyRecord};
    use crate::graph::build_snapshot;

    fn snapshot(app_ids: &[i64], edges: &[(i64, i64)]) -> GraphSnapshot {
        let apps = app_ids
            .iter()
            .map(|&id| Application::new(id, format!("app-{id}")))
            .collect();
        let deps = edges
            .iter()
            .enumerate()
            .map(|(i, &(from, to))| {
                DependencyRecord::new(i as i64, from, Some(ApplicationId(to)), "uses")
            })
            .collect();
        build_snapshot(apps, deps, &HashMap::new())
    }

    fn codes(apps: &[ImpactedApp]) -> Vec<(&str, usize)> {
        apps.iter().map(|a| (a.app_code.as_str(), a.depth)).collect()
    }

    #[test]
    fn unknown_app_has_no_report() {
        let graph = snapshot(&[1], &[]);
        assert!(analyze_impact(&graph, ApplicationId(9)).is_none());
    }

    #[test]
    fn leaf_consumer_impacts_nothing() {
        let graph = snapshot(&[1, 2], &[(1, 2)]);

        let report = analyze_impact(&graph, ApplicationId(1)).unwrap();

        assert_eq!(report.total_affected(), 0);
        assert_eq!(report.max_depth_reached, 0);
    }

    #[test]
    fn splits_direct_and_transitive_dependents() {
        // 2 and 3 use 1; 4 uses 2; 5 uses 4.
        let graph = snapshot(&[1, 2, 3, 4, 5], &[(2, 1), (3, 1), (4, 2), (5, 4)]);

        let report = analyze_impact(&graph, ApplicationId(1)).unwrap();

        assert_eq!(report.app_code, "app-1");
        assert_eq!(codes(&report.direct_dependents), vec![("app-2", 1), ("app-3", 1)]);
        assert_eq!(codes(&report.transitive_dependents), vec![("app-4", 2), ("app-5", 3)]);
        assert_eq!(report.max_depth_reached, 3);
    }

    #[test]
    fn reports_minimum_depth_once() {
        // 3 uses 1 directly and through 2.
        let graph = snapshot(&[1, 2, 3], &[(3, 2), (2, 1), (3, 1)]);

        let report = analyze_impact(&graph, ApplicationId(1)).unwrap();

        assert_eq!(codes(&report.direct_dependents), vec![("app-2", 1), ("app-3", 1)]);
        assert!(report.transitive_dependents.is_empty());
    }

    #[test]
    fn cycles_do_not_loop_back_to_the_root() {
        let graph = snapshot(&[1, 2], &[(1, 2), (2, 1)]);

        let report = analyze_impact(&graph, ApplicationId(1)).unwrap();

        assert_eq!(codes(&report.direct_dependents), vec![("app-2", 1)]);
        assert_eq!(report.total_affected(), 1);
    }

    #[test]
    fn dangling_edges_are_ignored() {
        let graph = snapshot(&[1], &[(77, 1), (1, 88)]);

        let report = analyze_impact(&graph, ApplicationId(1)).unwrap();
        assert_eq!(report.total_affected(), 0);
    }
}
