use std::collections::HashMap;

use derive_more::Display;

use super::{
    galaxy::{
        aggregate_flags, build_adjacency, find_by_name, find_precursor, geometry, match_special,
        parse_graph, route_systems, shortest_path, AdjacencyList, GalaxyGraph, Node,
        SpecialMatches, UnparsableRecord,
    },
    notable::NotableLists,
    parser::{extract_block, types::GameString},
};

/// The top-level gamestate block holding all star systems
pub const GALAXY_BLOCK: &str = "galactic_object";

/// The default radius for the nearby flag statistics
pub const NEARBY_RADIUS: f64 = 50.0;

/// An error that aborts an analysis
#[derive(Debug, Display)]
pub enum AnalysisError {
    /// The gamestate has no (complete) galaxy block
    #[display("the gamestate has no galactic_object block")]
    MissingBlock,
}

impl std::error::Error for AnalysisError {}

/// Where a system lies relative to another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bearing {
    pub distance: f64,
    /// Distance as a percentage of the galaxy diameter
    pub percent_of_galaxy: f64,
    pub direction: geometry::Direction,
    pub angle: f64,
}

/// What surrounds the home system
#[derive(Debug, Clone, PartialEq)]
pub struct Surroundings {
    pub precursor: Option<&'static str>,
    /// Flags within the radius and how often they occur, unsorted
    pub flags: HashMap<GameString, usize>,
}

/// A complete analysis session over one gamestate.
/// Owns the graph and everything derived from it, nothing is mutated after
/// construction.
#[derive(Debug)]
pub struct Analysis {
    graph: GalaxyGraph,
    adjacency: AdjacencyList,
    rejected: Vec<UnparsableRecord>,
    diameter: f64,
}

impl Analysis {
    /// Extracts the galaxy from the gamestate text and builds the graph.
    pub fn new(gamestate: &str) -> Result<Self, AnalysisError> {
        let block =
            extract_block(gamestate.lines(), GALAXY_BLOCK).ok_or(AnalysisError::MissingBlock)?;
        Ok(Self::from_block(&block))
    }

    /// Builds the session from already extracted block text
    pub fn from_block(block: &str) -> Self {
        let (graph, rejected) = parse_graph(block);
        let adjacency = build_adjacency(&graph);
        let diameter = geometry::galaxy_diameter(&graph);
        Analysis {
            graph,
            adjacency,
            rejected,
            diameter,
        }
    }

    pub fn graph(&self) -> &GalaxyGraph {
        &self.graph
    }

    pub fn adjacency(&self) -> &AdjacencyList {
        &self.adjacency
    }

    /// Records that could not be parsed into systems
    pub fn rejected(&self) -> &[UnparsableRecord] {
        &self.rejected
    }

    /// The largest distance between two systems
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Finds a system as the player would name it
    pub fn find_system(&self, name: &str) -> Option<&Node> {
        find_by_name(&self.graph, name)
    }

    /// Systems matching the notable lists
    pub fn specials(&self, lists: &NotableLists) -> SpecialMatches<'_> {
        match_special(&self.graph, lists.names.as_slice(), lists.flags.as_slice())
    }

    /// Where `to` lies as seen from `from`
    pub fn bearing(&self, from: &Node, to: &Node) -> Bearing {
        let distance = geometry::distance(from, to);
        let percent_of_galaxy = if self.diameter > 0.0 {
            distance / self.diameter * 100.0
        } else {
            0.0
        };
        Bearing {
            distance,
            percent_of_galaxy,
            direction: geometry::direction(from, to),
            angle: geometry::angle(from, to),
        }
    }

    /// The precursor and flag statistics around a system
    pub fn surroundings(&self, home: &Node, radius: f64) -> Surroundings {
        Surroundings {
            precursor: find_precursor(&self.graph, home),
            flags: aggregate_flags(&self.graph, home, radius),
        }
    }

    /// The shortest hyperlane route between two systems, as systems.
    /// Empty if there is none.
    pub fn route(&self, from: &Node, to: &Node) -> Vec<&Node> {
        route_systems(&self.graph, &shortest_path(from.id, to.id, &self.adjacency))
    }
}
