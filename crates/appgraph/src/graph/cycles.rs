//! Circular dependency detection.
//!
//! A depth-first search with three states per id (unvisited, on the current
//! path, finished) driven by an explicit frame stack. An edge into an id that
//! is on the current path closes a cycle.

use super::adjacency::Adjacency;
use super::types::{Cycle, GraphSnapshot};
use crate::domain::ApplicationId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How much of the graph to report once a cycle is found.
///
/// Neither mode enumerates every elementary cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CycleSearch {
    /// Stop searching from a root at its first cycle; everything on the
    /// current path is then treated as finished.
    #[default]
    FirstPerRoot,
    /// Keep searching and report one cycle per back edge.
    EveryBackEdge,
}

impl fmt::Display for CycleSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FirstPerRoot => "first-per-root",
            Self::EveryBackEdge => "every-back-edge",
        })
    }
}

impl FromStr for CycleSearch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-per-root" => Ok(Self::FirstPerRoot),
            "every-back-edge" => Ok(Self::EveryBackEdge),
            other => Err(format!(
                "unknown cycle search '{other}' (expected first-per-root or every-back-edge)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    OnStack,
    Done,
}

struct Frame {
    id: ApplicationId,
    next_edge: usize,
}

/// Finds circular dependencies.
///
/// Searches start from every edge source in order of first appearance and
/// skip ids an earlier search already reached. Each cycle lists the ids from
/// the re-entered id to the top of the path and repeats the re-entered id at
/// the end. Edges to ids without a node take part like any other edge.
#[must_use]
pub fn find_cycles(snapshot: &GraphSnapshot, search: CycleSearch) -> Vec<Cycle> {
    let adjacency = Adjacency::new(snapshot);
    let mut state: HashMap<ApplicationId, Visit> = HashMap::new();
    let mut cycles = Vec::new();

    for &root in adjacency.sources() {
        if state.contains_key(&root) {
            continue;
        }

        state.insert(root, Visit::OnStack);
        let mut stack = vec![Frame {
            id: root,
            next_edge: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let edges = adjacency.edges_from(frame.id);
            let Some(edge) = edges.get(frame.next_edge) else {
                state.insert(frame.id, Visit::Done);
                stack.pop();
                continue;
            };
            frame.next_edge += 1;

            match state.get(&edge.target) {
                None => {
                    state.insert(edge.target, Visit::OnStack);
                    stack.push(Frame {
                        id: edge.target,
                        next_edge: 0,
                    });
                }
                Some(Visit::OnStack) => {
                    cycles.push(close_cycle(&stack, edge.target));
                    if search == CycleSearch::FirstPerRoot {
                        for frame in stack.drain(..) {
                            state.insert(frame.id, Visit::Done);
                        }
                    }
                }
                Some(Visit::Done) => {}
            }
        }
    }

    tracing::debug!(cycles = cycles.len(), %search, "Cycle search finished");
    cycles
}

fn close_cycle(stack: &[Frame], reentered: ApplicationId) -> Cycle {
    let start = stack
        .iter()
        .position(|frame| frame.id == reentered)
        .unwrap_or(0);
    let mut ids: Vec<ApplicationId> = stack[start..].iter().map(|frame| frame.id).collect();
    ids.push(reentered);
    Cycle(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Application, DependencyRecord};
    use crate::graph::build_snapshot;
    use rstest::rstest;

    fn snapshot(edges: &[(i64, i64)]) -> GraphSnapshot {
        let mut ids: Vec<i64> = edges.iter().flat_map(|&(a, b)| [a, b]).collect();
        ids.sort_unstable();
        ids.dedup();
        let apps = ids
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

    fn raw(cycles: &[Cycle]) -> Vec<Vec<i64>> {
        cycles
            .iter()
            .map(|c| c.ids().iter().map(|id| id.0).collect())
            .collect()
    }

    #[rstest]
    #[case::first_per_root(CycleSearch::FirstPerRoot)]
    #[case::every_back_edge(CycleSearch::EveryBackEdge)]
    fn dag_has_no_cycles(#[case] search: CycleSearch) {
        let graph = snapshot(&[(1, 2), (1, 3), (2, 4), (3, 4)]);
        assert!(find_cycles(&graph, search).is_empty());
    }

    #[test]
    fn mutual_dependency_is_a_cycle() {
        let graph = snapshot(&[(1, 2), (2, 1)]);

        let cycles = find_cycles(&graph, CycleSearch::FirstPerRoot);

        assert_eq!(raw(&cycles), vec![vec![1, 2, 1]]);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let graph = snapshot(&[(3, 3)]);
        assert_eq!(raw(&find_cycles(&graph, CycleSearch::FirstPerRoot)), vec![vec![3, 3]]);
    }

    #[test]
    fn cycle_starts_at_reentered_node() {
        let graph = snapshot(&[(1, 2), (2, 3), (3, 4), (4, 2)]);

        let cycles = find_cycles(&graph, CycleSearch::FirstPerRoot);

        assert_eq!(raw(&cycles), vec![vec![2, 3, 4, 2]]);
    }

    #[test]
    fn first_per_root_stops_at_first_cycle() {
        // Two cycles through 1: 1-2-1 and 1-3-1.
        let graph = snapshot(&[(1, 2), (2, 1), (1, 3), (3, 1)]);

        let cycles = find_cycles(&graph, CycleSearch::FirstPerRoot);
        assert_eq!(raw(&cycles), vec![vec![1, 2, 1]]);
    }

    #[test]
    fn nodes_on_abandoned_path_are_not_searched_again() {
        // After 1-2-1 is found from root 1, root 2 is already finished and
        // its cycle with 4 goes unreported.
        let graph = snapshot(&[(1, 2), (2, 1), (2, 4), (4, 2)]);

        let cycles = find_cycles(&graph, CycleSearch::FirstPerRoot);
        assert_eq!(raw(&cycles), vec![vec![1, 2, 1]]);
    }

    #[test]
    fn every_back_edge_reports_each_one() {
        let graph = snapshot(&[(1, 2), (2, 1), (1, 3), (3, 1)]);

        let cycles = find_cycles(&graph, CycleSearch::EveryBackEdge);
        assert_eq!(raw(&cycles), vec![vec![1, 2, 1], vec![1, 3, 1]]);
    }

    #[test]
    fn later_roots_still_find_their_cycles() {
        let graph = snapshot(&[(1, 2), (2, 1), (5, 6), (6, 5)]);

        let cycles = find_cycles(&graph, CycleSearch::FirstPerRoot);
        assert_eq!(raw(&cycles), vec![vec![1, 2, 1], vec![5, 6, 5]]);
    }

    #[test]
    fn cycle_serializes_as_id_list() {
        let cycle = Cycle(vec![ApplicationId(1), ApplicationId(2), ApplicationId(1)]);
        let json = serde_json::to_string(&cycle).unwrap();
        assert_eq!(json, "[1,2,1]");
    }

    #[rstest]
    #[case("first-per-root", CycleSearch::FirstPerRoot)]
    #[case("every-back-edge", CycleSearch::EveryBackEdge)]
    fn cycle_search_parses(#[case] input: &str, #[case] expected: CycleSearch) {
        assert_eq!(input.parse::<CycleSearch>().unwrap(), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn cycle_search_rejects_unknown_value() {
        assert!("all".parse::<CycleSearch>().is_err());
    }
}
