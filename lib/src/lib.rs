/// Save file I/O. Wrapper over the zip container Stellaris uses, exposing the
/// decompressed `gamestate` and the [save_file::SaveMeta] header.
///
/// ## Getting Started
///
/// The facade for the entire crate is [save_file::SaveFile] combined with
/// [analysis::Analysis]. The save file yields the raw gamestate text, and the
/// analysis turns it into a [galaxy::GalaxyGraph] with everything derived
/// from it.
///
/// ## Example
///
/// ```rust
/// use stellaris_galaxy_lib::{analysis::Analysis, save_file::SaveFile};
///
/// if let Ok(save_file) = SaveFile::open("/path/to/ironman.sav") {
///     if let Ok(analysis) = Analysis::new(save_file.gamestate()) {
///         println!("{} systems", analysis.graph().len());
///     }
/// }
/// ```
pub mod save_file;

/// Lower level, scan based extraction of the `galactic_object` block.
/// Meant to be independent of the graph, it only knows about braces, records
/// and fields.
pub mod parser;

/// The parsed galaxy and the algorithms working on it.
pub mod galaxy;

/// Caller supplied lists of notable system names and flags
pub mod notable;

/// A complete analysis session over one save
pub mod analysis;
