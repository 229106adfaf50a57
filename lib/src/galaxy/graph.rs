use std::collections::{btree_map, BTreeMap};

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::parser::{
    parse_record, split_records,
    types::{GameId, GameString},
    Rejection,
};

/// Matches the `<name>=\n{` header of an extracted block. Integer keys are
/// records, not headers.
static BLOCK_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[A-Za-z_][A-Za-z0-9_]*\s*=\s*\{").unwrap());

/// A single star system.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    pub id: GameId,
    /// The localisation key, often `NAME_` prefixed
    pub name: GameString,
    pub x: f64,
    pub y: f64,
    /// Flag names in declaration order, [None] if the system has no flags
    pub flags: Option<Vec<GameString>>,
    /// Outgoing hyperlanes, [None] if the system has no hyperlane block
    pub edges: Option<Vec<GameId>>,
}

impl Node {
    /// Returns true if the system carries the given flag
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags().iter().any(|f| f.as_ref() == flag)
    }

    /// The flags of the system, empty if there are none
    pub fn flags(&self) -> &[GameString] {
        self.flags.as_deref().unwrap_or_default()
    }

    /// The hyperlane targets of the system, empty if there are none
    pub fn edges(&self) -> &[GameId] {
        self.edges.as_deref().unwrap_or_default()
    }
}

/// A record from the block that could not be turned into a [Node].
/// Kept around for diagnostics, never fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct UnparsableRecord {
    /// The id, if the record had a valid one
    pub id: Option<GameId>,
    pub reason: Rejection,
    /// The raw record text
    pub raw: String,
}

/// All the star systems of a save, keyed by id.
/// Built once by [parse_graph] and read-only afterwards. Iteration is in
/// ascending id order, so everything derived from it is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GalaxyGraph {
    systems: BTreeMap<GameId, Node>,
}

impl GalaxyGraph {
    /// Inserts a node, replacing any node with the same id
    fn insert(&mut self, node: Node) -> Option<Node> {
        self.systems.insert(node.id, node)
    }

    /// Get the system with the given id
    pub fn get(&self, id: &GameId) -> Option<&Node> {
        self.systems.get(id)
    }

    pub fn contains(&self, id: &GameId) -> bool {
        self.systems.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Iterates over the systems in ascending id order
    pub fn nodes(&self) -> btree_map::Values<'_, GameId, Node> {
        self.systems.values()
    }
}

impl<'a> IntoIterator for &'a GalaxyGraph {
    type Item = (&'a GameId, &'a Node);
    type IntoIter = btree_map::Iter<'a, GameId, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.systems.iter()
    }
}

/// Strips the `<name>=` header and the outer braces of an extracted block.
/// Text without such a header is assumed to already be a block body.
fn block_body(block: &str) -> &str {
    if let Some(header) = BLOCK_HEADER.find(block) {
        let body = &block[header.end()..];
        match body.rfind('}') {
            Some(end) => &body[..end],
            None => body,
        }
    } else {
        block
    }
}

/// Builds the [GalaxyGraph] from the `galactic_object` block text.
///
/// Each record is split off with [split_records] and parsed with
/// [parse_record]. Records failing the acceptance rule are skipped and
/// returned alongside the graph, the rest of the block is unaffected. If two
/// records share an id the later one wins.
pub fn parse_graph(block: &str) -> (GalaxyGraph, Vec<UnparsableRecord>) {
    let mut graph = GalaxyGraph::default();
    let mut rejected = Vec::new();
    for chunk in split_records(block_body(block)) {
        let fields = parse_record(chunk);
        if let Some(reason) = fields.rejection() {
            log::debug!("skipping record {:?}: {}", fields.id, reason);
            rejected.push(UnparsableRecord {
                id: fields.id,
                reason,
                raw: chunk.to_owned(),
            });
            continue;
        }
        // rejection() guarantees both are present
        if let (Some(id), Some(name)) = (fields.id, fields.name) {
            let node = Node {
                id,
                name,
                x: fields.coordinates.0,
                y: fields.coordinates.1,
                flags: fields.flags,
                edges: fields.hyperlanes,
            };
            if graph.insert(node).is_some() {
                log::debug!("system {} defined more than once, keeping the last", id);
            }
        }
    }
    log::info!(
        "parsed {} systems, {} records skipped",
        graph.len(),
        rejected.len()
    );
    (graph, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "galactic_object=\n{\n1=\n{\nkey=\"NAME_Sol\"\ncoordinates={\nx=10.0\ny=0.0\n}\nhyperlane={\n{\nto=2\n}\n}\n}\n2=\n{\nkey=\"NAME_Alpha\"\ncoordinates={\nx=20.0\ny=0.0\n}\n}\n}";

    #[test]
    fn test_scenario() {
        let (graph, rejected) = parse_graph(SCENARIO);
        assert!(rejected.is_empty());
        assert_eq!(graph.len(), 2);
        let sol = graph.get(&1).unwrap();
        assert_eq!(sol.name.as_ref(), "NAME_Sol");
        assert_eq!((sol.x, sol.y), (10.0, 0.0));
        assert_eq!(sol.edges, Some(vec![2]));
        let alpha = graph.get(&2).unwrap();
        assert_eq!(alpha.name.as_ref(), "NAME_Alpha");
        assert_eq!((alpha.x, alpha.y), (20.0, 0.0));
        assert!(alpha.edges().is_empty());
        assert!(alpha.flags.is_none());
    }

    #[test]
    fn test_missing_name_dropped() {
        let block = "galactic_object=\n{\n1=\n{\ncoordinates={ x=1 y=1 }\n}\n2=\n{\nkey=\"NAME_B\"\ncoordinates={ x=2 y=2 }\n}\n}\n";
        let (graph, rejected) = parse_graph(block);
        assert_eq!(graph.len(), 1);
        assert!(graph.contains(&2));
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].id, Some(1));
        assert_eq!(rejected[0].reason, Rejection::MissingName);
    }

    #[test]
    fn test_zero_coordinates_dropped() {
        let body = "1={ key=\"NAME_A\" coordinates={ x=0 y=0 } }\n2={ key=\"NAME_B\" }";
        let (graph, rejected) = parse_graph(body);
        assert!(graph.is_empty());
        assert_eq!(rejected.len(), 2);
        assert!(rejected
            .iter()
            .all(|r| r.reason == Rejection::MissingCoordinates));
    }

    #[test]
    fn test_last_write_wins() {
        let body = "1={ key=\"NAME_A\" x=1 y=1 }\n1={ key=\"NAME_B\" x=2 y=2 }";
        let (graph, _) = parse_graph(body);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get(&1).unwrap().name.as_ref(), "NAME_B");
    }

    #[test]
    fn test_accepted_invariants() {
        let body = "1={ key=\"NAME_A\" x=0 y=3 }\n2={ key=\"NAME_B\" x=0 y=0 }\n3={ x=1 y=1 }\n4={ key=\"NAME_D\" x=-1 y=0 }";
        let (graph, rejected) = parse_graph(body);
        assert_eq!(graph.len(), 2);
        assert_eq!(rejected.len(), 2);
        for node in graph.nodes() {
            assert!(!node.name.is_empty());
            assert!((node.x, node.y) != (0.0, 0.0));
        }
    }

    #[test]
    fn test_empty() {
        let (graph, rejected) = parse_graph("galactic_object=\n{\n}\n");
        assert!(graph.is_empty());
        assert!(rejected.is_empty());
        let (graph, _) = parse_graph("");
        assert!(graph.is_empty());
    }

    #[test]
    fn test_flags_kept() {
        let body = "5={ key=\"NAME_A\" x=1 y=1 flags={ precursor_1=100 derelict=2 } }";
        let (graph, _) = parse_graph(body);
        let node = graph.get(&5).unwrap();
        assert!(node.has_flag("derelict"));
        assert!(!node.has_flag("precursor_2"));
        assert_eq!(node.flags().len(), 2);
    }
}
