use std::collections::{HashMap, HashSet};

use super::{
    super::parser::types::{GameId, GameString},
    geometry::distance,
    GalaxyGraph, Node,
};

/// The prefix Stellaris puts in front of system name keys
pub const NAME_PREFIX: &str = "NAME_";

/// The radius within which precursor flags are counted if the system itself
/// has none.
pub const PRECURSOR_RADIUS: f64 = 75.0;

/// Precursor flags and the civilization they belong to
static PRECURSORS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "precursor_1" => "Vultaum",
    "precursor_2" => "Yuht",
    "precursor_3" => "First League",
    "precursor_4" => "Irassians",
    "precursor_5" => "Cybrex",
    "precursor_zroni_1" => "Zroni",
    "precursor_baol_1" => "Baol",
};

/// Returns the civilization a precursor flag belongs to, if it is one
pub fn precursor_name(flag: &str) -> Option<&'static str> {
    PRECURSORS.get(flag).copied()
}

/// Systems that matched the notable lists
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SpecialMatches<'graph> {
    /// Systems whose name is on the list
    pub by_name: Vec<&'graph Node>,
    /// Systems carrying at least one notable flag, with the flags that matched
    pub by_flag: Vec<(&'graph Node, Vec<GameString>)>,
}

impl<'graph> SpecialMatches<'graph> {
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty() && self.by_flag.is_empty()
    }

    /// All matched systems, name matches first, without duplicates
    pub fn systems(&self) -> Vec<&'graph Node> {
        let mut seen = HashSet::new();
        self.by_name
            .iter()
            .copied()
            .chain(self.by_flag.iter().map(|(node, _)| *node))
            .filter(|node| seen.insert(node.id))
            .collect()
    }
}

/// Matches systems against the notable names (case insensitive) and the
/// notable flags (exact).
pub fn match_special<'graph, N: AsRef<str>, F: AsRef<str>>(
    graph: &'graph GalaxyGraph,
    names: &[N],
    flags: &[F],
) -> SpecialMatches<'graph> {
    let names: HashSet<String> = names.iter().map(|n| n.as_ref().to_lowercase()).collect();
    let flags: HashSet<&str> = flags.iter().map(|f| f.as_ref()).collect();
    let mut matches = SpecialMatches::default();
    for node in graph.nodes() {
        if names.contains(&node.name.to_lowercase()) {
            matches.by_name.push(node);
        }
        let matched: Vec<GameString> = node
            .flags()
            .iter()
            .filter(|f| flags.contains(f.as_ref()))
            .cloned()
            .collect();
        if !matched.is_empty() {
            matches.by_flag.push((node, matched));
        }
    }
    matches
}

/// Counts how often each flag occurs on the systems within `radius` of
/// `center`, the center itself and the boundary included. Unsorted.
pub fn aggregate_flags(
    graph: &GalaxyGraph,
    center: &Node,
    radius: f64,
) -> HashMap<GameString, usize> {
    let mut counts = HashMap::new();
    for node in graph.nodes().filter(|n| distance(center, n) <= radius) {
        for flag in node.flags() {
            *counts.entry(flag.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Determines which precursor civilization is closest to `center`.
///
/// The center's own flags are checked first, in declaration order. Failing
/// that, the precursor flag occurring most often within [PRECURSOR_RADIUS]
/// is taken, equal counts going to the alphabetically first flag.
pub fn find_precursor(graph: &GalaxyGraph, center: &Node) -> Option<&'static str> {
    if let Some(name) = center.flags().iter().find_map(|f| precursor_name(f)) {
        return Some(name);
    }
    aggregate_flags(graph, center, PRECURSOR_RADIUS)
        .into_iter()
        .filter_map(|(flag, count)| precursor_name(&flag).map(|name| (flag, count, name)))
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(_, _, name)| name)
}

/// Finds a system by name as a player would type it.
/// The name is compared case insensitively, first as is and then with the
/// [NAME_PREFIX] in front. Failing both, spaces are taken as underscores,
/// so anything [display_name] prints can be typed back in. The lowest id
/// wins if several systems match.
pub fn find_by_name<'graph>(graph: &'graph GalaxyGraph, input: &str) -> Option<&'graph Node> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let find = |wanted: &str| {
        graph
            .nodes()
            .find(|node| node.name.to_lowercase() == wanted.to_lowercase())
    };
    let find_key = |key: &str| find(key).or_else(|| find(&format!("{}{}", NAME_PREFIX, key)));
    find_key(input).or_else(|| find_key(&input.replace(' ', "_")))
}

/// Turns a name key into something readable, `NAME_Alpha_Centauri` becomes
/// `Alpha Centauri`.
pub fn display_name(name: &str) -> String {
    name.strip_prefix(NAME_PREFIX)
        .unwrap_or(name)
        .replace('_', " ")
}

/// Looks up the ids of a route and returns the systems along it.
/// Ids the graph doesn't know of are skipped.
pub fn route_systems<'graph>(graph: &'graph GalaxyGraph, path: &[GameId]) -> Vec<&'graph Node> {
    path.iter().filter_map(|id| graph.get(id)).collect()
}
