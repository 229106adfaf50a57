use derive_more::Display;

use super::{GalaxyGraph, Node};

/// A horizontal compass label.
/// Positive x is reported as [Horizontal::West], the galaxy map draws x
/// growing to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Horizontal {
    East,
    West,
}

/// A vertical compass label. Positive y is reported as [Vertical::South].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Vertical {
    North,
    South,
}

/// Coarse direction from one system to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Direction {
    #[display("{_0}")]
    Horizontal(Horizontal),
    #[display("{_0}")]
    Vertical(Vertical),
    /// Both offsets have the same magnitude
    #[display("{_0}-{_1}")]
    Diagonal(Vertical, Horizontal),
}

/// Euclidean distance between two systems
pub fn distance(a: &Node, b: &Node) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// The direction in which `to` lies when looking from `from`.
pub fn direction(from: &Node, to: &Node) -> Direction {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let horizontal = if dx > 0.0 {
        Horizontal::West
    } else {
        Horizontal::East
    };
    let vertical = if dy > 0.0 {
        Vertical::South
    } else {
        Vertical::North
    };
    if dx.abs() > dy.abs() {
        Direction::Horizontal(horizontal)
    } else if dy.abs() > dx.abs() {
        Direction::Vertical(vertical)
    } else {
        Direction::Diagonal(vertical, horizontal)
    }
}

/// The bearing from `from` to `to` in degrees, within `[0, 360)`.
pub fn angle(from: &Node, to: &Node) -> f64 {
    let angle = (to.y - from.y).atan2(to.x - from.x).to_degrees();
    if angle < 0.0 {
        // tiny negative angles round up to exactly 360
        (angle + 360.0) % 360.0
    } else {
        angle
    }
}

/// The largest distance between any two systems of the graph.
/// An exhaustive pairwise scan, exact but quadratic, which is fine for the
/// low thousands of systems a galaxy has. Zero for less than two systems.
pub fn galaxy_diameter(graph: &GalaxyGraph) -> f64 {
    let systems: Vec<&Node> = graph.nodes().collect();
    let mut max_distance: f64 = 0.0;
    for (i, a) in systems.iter().enumerate() {
        for b in &systems[i + 1..] {
            max_distance = max_distance.max(distance(a, b));
        }
    }
    max_distance
}
