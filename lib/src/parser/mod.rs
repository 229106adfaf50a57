/// Commonly used types within the parser
pub mod types;

/// A submodule that provides [extract_block], isolating one top-level block
/// of the gamestate using nothing but brace depth.
mod block;
pub use block::extract_block;

/// A submodule that provides [split_records], cutting a block body into its
/// integer keyed records.
mod record;
pub use record::split_records;

/// Per record field extraction.
mod field;
pub use field::{
    parse_coordinates, parse_flags, parse_hyperlanes, parse_id, parse_name, parse_record,
    RecordFields, Rejection,
};
