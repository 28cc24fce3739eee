//! Consumer → provider adjacency shared by the traversals.

use super::types::{Edge, GraphSnapshot};
use crate::domain::ApplicationId;
use std::collections::HashMap;

/// Outgoing edges per consumer, in snapshot edge order.
pub(crate) struct Adjacency<'a> {
    outgoing: HashMap<ApplicationId, Vec<&'a Edge>>,
    sources: Vec<ApplicationId>,
}

impl<'a> Adjacency<'a> {
    pub(crate) fn new(snapshot: &'a GraphSnapshot) -> Self {
        let mut outgoing: HashMap<ApplicationId, Vec<&'a Edge>> = HashMap::new();
        let mut sources = Vec::new();
        for edge in snapshot.edges() {
            let targets = outgoing.entry(edge.source).or_insert_with(|| {
                sources.push(edge.source);
                Vec::new()
            });
            targets.push(edge);
        }
        Self { outgoing, sources }
    }

    /// Edges leaving `id`; empty when it has none.
    pub(crate) fn edges_from(&self, id: ApplicationId) -> &[&'a Edge] {
        self.outgoing.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every edge source, in order of first appearance in the edge list.
    pub(crate) fn sources(&self) -> &[ApplicationId] {
        &self.sources
    }
}
