use derive_more::{Display, Error, From};
use std::{
    fmt::Debug,
    fs::File,
    io::{self, Cursor, Read},
    path::Path,
    string::FromUtf8Error,
};
use zip::{read::ZipArchive, result::ZipError};

use super::meta::{MetaError, SaveMeta};

/// The header of an archive within a save file.
const ARCHIVE_HEADER: &[u8; 4] = b"PK\x03\x04";

/// The archive entry holding the galaxy
const GAMESTATE_ENTRY: &str = "gamestate";
/// The archive entry holding the save header
const META_ENTRY: &str = "meta";

/// An error that can occur when opening a save file.
/// Without a readable gamestate there is nothing to analyze, so all of these
/// abort the analysis.
#[derive(Debug, From, Display, Error)]
pub enum SaveFileError {
    /// Something went wrong with stdlib IO.
    IoError(io::Error),
    /// We found a problem
    #[display("{}", _0)]
    ParseError(#[error(not(source))] &'static str),
    /// Something went wrong with decompressing the save file.
    DecompressionError(ZipError),
    /// Decoding bytes failed
    DecodingError(FromUtf8Error),
}

/// A struct that represents a Stellaris save file.
/// It is just a wrapper around the decompressed contents of the save.
/// This is so that we can abstract away the compression and encoding, and
/// just hand out text.
pub struct SaveFile {
    /// The gamestate text
    gamestate: String,
    /// The meta text, only present in archived saves
    meta: Option<String>,
}

impl SaveFile {
    /// Open a save file.
    /// Internally uses [File::open] to open the file and then [SaveFile::read] to read the contents.
    pub fn open<P: AsRef<Path>>(filename: P) -> Result<SaveFile, SaveFileError> {
        let mut file = File::open(filename)?;
        let metadata = file.metadata()?;
        SaveFile::read(&mut file, Some(metadata.len() as usize))
    }

    /// Create a new SaveFile instance.
    ///
    /// # Compression
    ///
    /// Regular `.sav` files are zip archives holding a `gamestate` and a
    /// `meta` entry. The function detects the archive and decompresses both
    /// in memory. Anything else is taken to be a raw gamestate.
    pub fn read<F: Read>(
        file: &mut F,
        contents_size: Option<usize>,
    ) -> Result<SaveFile, SaveFileError> {
        let mut contents = if let Some(size) = contents_size {
            Vec::with_capacity(size)
        } else {
            Vec::new()
        };
        let read_size = file.read_to_end(&mut contents)?;
        if read_size < ARCHIVE_HEADER.len() {
            return Err(SaveFileError::ParseError("Save file is too small"));
        }
        if contents.starts_with(ARCHIVE_HEADER) {
            let mut archive = ZipArchive::new(Cursor::new(contents))?;
            let gamestate = match read_entry(&mut archive, GAMESTATE_ENTRY)? {
                Some(gamestate) => gamestate,
                None => return Err(SaveFileError::ParseError("Save file has no gamestate")),
            };
            let meta = read_entry(&mut archive, META_ENTRY)?;
            Ok(SaveFile { gamestate, meta })
        } else {
            Ok(SaveFile {
                gamestate: String::from_utf8(contents)?,
                meta: None,
            })
        }
    }

    /// The decompressed gamestate
    pub fn gamestate(&self) -> &str {
        &self.gamestate
    }

    /// Parses the save header, [None] if the save has no `meta` entry
    pub fn meta(&self) -> Option<Result<SaveMeta, MetaError>> {
        self.meta
            .as_ref()
            .map(|meta| SaveMeta::parse(meta.as_bytes()))
    }
}

/// Reads an archive entry into a string, [None] if there is no such entry
fn read_entry<R: Read + io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, SaveFileError> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if entry.is_dir() {
        return Err(SaveFileError::ParseError("Save file entry is a directory"));
    }
    let entry_size = entry.size() as usize;
    let mut contents = Vec::with_capacity(entry_size);
    if entry.read_to_end(&mut contents)? != entry_size {
        return Err(SaveFileError::ParseError("Failed to read the entire file"));
    }
    Ok(Some(String::from_utf8(contents)?))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use io::{Seek, SeekFrom};
    use zip::write::{SimpleFileOptions, ZipWriter};

    use super::*;

    fn create_zipped_test_file(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let file = Vec::new();
        let cur = Cursor::new(file);
        let mut zip = ZipWriter::new(cur);
        let options = SimpleFileOptions::default();
        for (name, contents) in entries {
            zip.start_file(*name, options).unwrap();
            if zip.write(contents.as_bytes()).unwrap() != contents.len() {
                panic!("Failed to write the entire file");
            }
        }
        let mut cur = zip.finish().unwrap();
        cur.seek(SeekFrom::Start(0)).unwrap();
        return cur;
    }

    #[test]
    fn test_open() {
        let mut file = Cursor::new(b"test");
        let save = SaveFile::read(&mut file, None).unwrap();
        assert_eq!(save.gamestate(), "test");
        assert!(save.meta().is_none());
    }

    #[test]
    fn test_too_small() {
        let mut file = Cursor::new(b"a");
        assert!(SaveFile::read(&mut file, None).is_err());
    }

    #[test]
    fn test_compressed_open() {
        let mut file = create_zipped_test_file(&[
            ("meta", "name=\"United Nations of Earth\"\ndate=\"2230.01.01\""),
            ("gamestate", "galactic_object=\n{\n}\n"),
        ]);
        let save = SaveFile::read(&mut file, None).unwrap();
        assert_eq!(save.gamestate(), "galactic_object=\n{\n}\n");
        let meta = save.meta().unwrap().unwrap();
        assert_eq!(meta.name(), Some("United Nations of Earth"));
    }

    #[test]
    fn test_compressed_same_as_plain() {
        let gamestate = "version=\"Corvus v3.0.3\"\ngalactic_object=\n{\n}\n";
        let mut zipped = create_zipped_test_file(&[("gamestate", gamestate)]);
        let mut plain = Cursor::new(gamestate.as_bytes());
        let zipped = SaveFile::read(&mut zipped, None).unwrap();
        let plain = SaveFile::read(&mut plain, None).unwrap();
        assert_eq!(zipped.gamestate(), plain.gamestate());
    }

    #[test]
    fn test_missing_gamestate() {
        let mut file = create_zipped_test_file(&[("meta", "name=\"x\"")]);
        assert!(matches!(
            SaveFile::read(&mut file, None),
            Err(SaveFileError::ParseError(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut file = Cursor::new(b"name=\"\xff\xfe\"");
        assert!(matches!(
            SaveFile::read(&mut file, None),
            Err(SaveFileError::DecodingError(_))
        ));
    }

    #[test]
    fn test_open_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"galactic_object=\n{\n}\n")?;
        let save = SaveFile::open(file.path())?;
        assert_eq!(save.gamestate(), "galactic_object=\n{\n}\n");
        assert!(SaveFile::open(file.path().with_extension("missing")).is_err());
        Ok(())
    }
}
