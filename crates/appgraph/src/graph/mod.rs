//! The dependency graph engine.
//!
//! Every query builds a fresh [`GraphSnapshot`] from store rows and runs one
//! synchronous algorithm over it:
//!
//! - [`find_path`]: shortest consumer → provider chain (BFS)
//! - [`build_tree`]: depth-bounded spanning tree of dependencies
//! - [`find_cycles`]: circular dependencies (three-state DFS)
//! - [`analyze_impact`]: everything that transitively depends on an app
//!
//! Edges point from consumer to provider. Traversals never recurse natively.

mod adjacency;
mod builder;
mod cycles;
mod impact;
mod path;
mod tree;
mod types;

pub use builder::build_snapshot;
pub use cycles::{CycleSearch, find_cycles};
pub use impact::analyze_impact;
pub use path::{PathOutcome, find_path};
pub use tree::build_tree;
pub use types::{
    Cycle, DependencyInfo, DependencyPath, DependencyTree, Edge, GraphSnapshot, GraphStats,
    ImpactReport, ImpactedApp, Node,
};
