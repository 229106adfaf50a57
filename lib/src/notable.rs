use std::{
    fs::read_to_string,
    io::{self, ErrorKind},
    path::Path,
};

/// Parses a token list, one token per line. Tokens are trimmed and blank
/// lines are ignored.
pub fn parse_token_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Reads a token list from disk. A missing file is not an error, it just
/// yields an empty list.
pub fn load_token_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, io::Error> {
    match read_to_string(path.as_ref()) {
        Ok(contents) => Ok(parse_token_list(&contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("no {} file found", path.as_ref().display());
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// The notable system names and flags an analysis looks out for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotableLists {
    pub names: Vec<String>,
    pub flags: Vec<String>,
}

impl NotableLists {
    pub fn new(names: Vec<String>, flags: Vec<String>) -> Self {
        NotableLists { names, flags }
    }

    /// Loads both lists, a list without a path is empty
    pub fn load<N: AsRef<Path>, F: AsRef<Path>>(
        names: Option<N>,
        flags: Option<F>,
    ) -> Result<Self, io::Error> {
        Ok(NotableLists {
            names: names.map_or(Ok(Vec::new()), load_token_list)?,
            flags: flags.map_or(Ok(Vec::new()), load_token_list)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_parse() {
        let list = parse_token_list("NAME_Sol\n\n   \n  NAME_Deneb  \r\nlast");
        assert_eq!(list, vec!["NAME_Sol", "NAME_Deneb", "last"]);
        assert!(parse_token_list("").is_empty());
    }

    #[test]
    fn test_load() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        write!(file, "precursor_1\n\nderelict_ship\n")?;
        let list = load_token_list(file.path())?;
        assert_eq!(list, vec!["precursor_1", "derelict_ship"]);
        Ok(())
    }

    #[test]
    fn test_load_missing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let list = load_token_list(dir.path().join("special_flags.txt"))?;
        assert!(list.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_lists() -> Result<(), Box<dyn std::error::Error>> {
        let mut names = NamedTempFile::new()?;
        writeln!(names, "NAME_Sol")?;
        let lists = NotableLists::load(Some(names.path()), None::<&Path>)?;
        assert_eq!(lists.names, vec!["NAME_Sol"]);
        assert!(lists.flags.is_empty());
        assert!(!lists.is_empty());
        Ok(())
    }
}
