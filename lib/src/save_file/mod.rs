/// Parser I/O and facade
mod save_file;
pub use save_file::{SaveFile, SaveFileError};

/// The save header, read with the [jomini] token reader
mod meta;
pub use meta::{MetaError, SaveMeta};
