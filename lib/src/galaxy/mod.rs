/// The [GalaxyGraph] data model and its construction from block text
mod graph;
pub use graph::{parse_graph, GalaxyGraph, Node, UnparsableRecord};

/// A submodule that provides the directed [AdjacencyList]
mod adjacency;
pub use adjacency::{build_adjacency, AdjacencyList};

/// Breadth first routing over hyperlanes
mod path;
pub use path::shortest_path;

/// Distances, directions and angles between systems
pub mod geometry;

/// Notable system discovery and flag statistics
mod locator;
pub use locator::{
    aggregate_flags, display_name, find_by_name, find_precursor, match_special, precursor_name,
    route_systems, SpecialMatches, NAME_PREFIX, PRECURSOR_RADIUS,
};
