use std::collections::{HashMap, VecDeque};

use super::{super::parser::types::GameId, AdjacencyList};

/// Finds one shortest route, by hyperlane count, from `start` to `end`.
///
/// Breadth first search that remembers, for every system, the system it was
/// first reached from. Neighbors are explored in declaration order, so when
/// several routes are equally short the first one found wins, which keeps
/// the result stable for a given [AdjacencyList].
///
/// # Returns
///
/// The systems of the route, `start` and `end` included. Empty if `end` is
/// unreachable or `start` is not in the adjacency list.
pub fn shortest_path(start: GameId, end: GameId, adjacency: &AdjacencyList) -> Vec<GameId> {
    if !adjacency.contains(&start) {
        return Vec::new();
    }
    if start == end {
        return vec![start];
    }
    // system -> the system it was first reached from
    let mut parents: HashMap<GameId, GameId> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for &neighbor in adjacency.neighbors(&current).unwrap_or_default() {
            if neighbor == start || parents.contains_key(&neighbor) {
                continue;
            }
            parents.insert(neighbor, current);
            if neighbor == end {
                return reconstruct(&parents, start, end);
            }
            queue.push_back(neighbor);
        }
    }
    Vec::new()
}

/// Walks the parent pointers back from `end` to `start`
fn reconstruct(parents: &HashMap<GameId, GameId>, start: GameId, end: GameId) -> Vec<GameId> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
