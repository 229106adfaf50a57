use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{GameId, GameString};

/* Every field is looked up with an independent search over the whole record,
so field order doesn't matter. The flip side is that a record embedding a
nested object with the same keys (a planet with its own x= and y=, a nested
key="...") will have the first occurrence picked up, whichever object it
belongs to. Existing saves have the record's own fields first, so we keep it. */

static ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)=").unwrap());
static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r#"key="([^"]+)""#).unwrap());
static X: Lazy<Regex> = Lazy::new(|| Regex::new(r"x=(-?\d+\.?\d*)").unwrap());
static Y: Lazy<Regex> = Lazy::new(|| Regex::new(r"y=(-?\d+\.?\d*)").unwrap());
static FLAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"flags=\s*\{([^}]*)\}").unwrap());
static FLAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Za-z0-9_]+)=").unwrap());
static HYPERLANES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"hyperlane=\s*\{\s*((?:\{[^{}]*\}\s*)+)\}").unwrap());
static HYPERLANE_TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"to=(\d+)").unwrap());

/// The raw fields of a single galactic object record.
/// Nothing here is validated beyond the individual field syntax, see
/// [RecordFields::rejection] for the acceptance rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordFields {
    /// The record key, [None] if no `<integer>=` was found or it overflowed
    pub id: Option<GameId>,
    /// The `key="..."` value
    pub name: Option<GameString>,
    /// Coordinates, `(0, 0)` if either of them is missing
    pub coordinates: (f64, f64),
    /// Flag names in declaration order, [None] for an empty or missing block
    pub flags: Option<Vec<GameString>>,
    /// Hyperlane targets in declaration order, [None] if the block is missing
    pub hyperlanes: Option<Vec<GameId>>,
}

/// Why a record did not make it into the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Rejection {
    #[display("missing or invalid id")]
    InvalidId,
    #[display("missing name")]
    MissingName,
    #[display("missing coordinates")]
    MissingCoordinates,
}

impl RecordFields {
    /// Returns the reason this record can't become a node, if any.
    /// A record needs an id, a name and coordinates that aren't both zero,
    /// zero being what the format leaves in unset coordinates.
    pub fn rejection(&self) -> Option<Rejection> {
        if self.id.is_none() {
            Some(Rejection::InvalidId)
        } else if self.name.is_none() {
            Some(Rejection::MissingName)
        } else if self.coordinates == (0.0, 0.0) {
            Some(Rejection::MissingCoordinates)
        } else {
            None
        }
    }
}

/// Extracts all the fields we care about from a raw record chunk.
pub fn parse_record(chunk: &str) -> RecordFields {
    RecordFields {
        id: parse_id(chunk),
        name: parse_name(chunk),
        coordinates: parse_coordinates(chunk),
        flags: parse_flags(chunk),
        hyperlanes: parse_hyperlanes(chunk),
    }
}

/// The first `<integer>=` anywhere in the chunk
pub fn parse_id(chunk: &str) -> Option<GameId> {
    ID.captures(chunk)?.get(1)?.as_str().parse().ok()
}

/// The first `key="<text>"` anywhere in the chunk
pub fn parse_name(chunk: &str) -> Option<GameString> {
    NAME.captures(chunk)
        .and_then(|c| c.get(1))
        .map(|m| GameString::from(m.as_str()))
}

/// The first `x=` and first `y=` in the chunk, each found independently.
/// If either is missing both are reported as zero.
pub fn parse_coordinates(chunk: &str) -> (f64, f64) {
    match (first_number(&X, chunk), first_number(&Y, chunk)) {
        (Some(x), Some(y)) => (x, y),
        _ => (0.0, 0.0),
    }
}

fn first_number(pattern: &Regex, chunk: &str) -> Option<f64> {
    pattern.captures(chunk)?.get(1)?.as_str().parse().ok()
}

/// Flag names from the first `flags={ ... }` block.
/// Flags are stored as `name=<value>` pairs, only the names are kept.
pub fn parse_flags(chunk: &str) -> Option<Vec<GameString>> {
    let block = FLAGS.captures(chunk)?.get(1)?.as_str();
    let mut flags: Vec<GameString> = Vec::new();
    for cap in FLAG.captures_iter(block) {
        let flag = &cap[1];
        if !flags.iter().any(|f| f.as_ref() == flag) {
            flags.push(GameString::from(flag));
        }
    }
    if flags.is_empty() {
        None
    } else {
        Some(flags)
    }
}

/// Targets of the first `hyperlane={ {...} {...} }` block, in order.
pub fn parse_hyperlanes(chunk: &str) -> Option<Vec<GameId>> {
    let block = HYPERLANES.captures(chunk)?.get(1)?.as_str();
    Some(
        HYPERLANE_TARGET
            .captures_iter(block)
            .filter_map(|cap| cap[1].parse().ok())
            .collect(),
    )
}
