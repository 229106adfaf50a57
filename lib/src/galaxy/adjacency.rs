use std::collections::BTreeMap;

use super::{super::parser::types::GameId, GalaxyGraph};

/// Outgoing hyperlanes of every system, keyed by system id.
/// Every system of the source graph has an entry, possibly empty. Targets
/// are not checked against the graph, a dangling hyperlane simply leads
/// nowhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyList {
    neighbors: BTreeMap<GameId, Vec<GameId>>,
}

impl AdjacencyList {
    /// The neighbors of a system in declaration order, [None] if the system
    /// is not part of the list.
    pub fn neighbors(&self, id: &GameId) -> Option<&[GameId]> {
        self.neighbors.get(id).map(Vec::as_slice)
    }

    pub fn contains(&self, id: &GameId) -> bool {
        self.neighbors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

impl FromIterator<(GameId, Vec<GameId>)> for AdjacencyList {
    fn from_iter<T: IntoIterator<Item = (GameId, Vec<GameId>)>>(iter: T) -> Self {
        AdjacencyList {
            neighbors: iter.into_iter().collect(),
        }
    }
}

/// Derives the [AdjacencyList] of a graph. Deterministic, the same graph
/// always yields the same list in the same order.
pub fn build_adjacency(graph: &GalaxyGraph) -> AdjacencyList {
    graph
        .nodes()
        .map(|node| (node.id, node.edges().to_vec()))
        .collect()
}
