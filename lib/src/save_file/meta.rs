use std::{collections::HashMap, string::FromUtf8Error};

use derive_more::{Display, Error, From};
use jomini::{
    text::{Operator, ReaderError, Token as TextToken, TokenReader},
    Scalar,
};

/// An error that occurred while reading the save header
#[derive(Debug, From, Display, Error)]
pub enum MetaError {
    ReaderError(ReaderError),
    DecodingError(FromUtf8Error),
    /// A container was closed that was never opened
    #[display("unexpected close token at {}", _0)]
    UnexpectedClose(#[error(not(source))] usize),
}

/// Process a scalar into a string.
/// The [ToString] implementation of [Scalar] will be used if the scalar is ASCII.
fn scalar_to_string(scalar: Scalar) -> Result<String, FromUtf8Error> {
    if scalar.is_ascii() {
        Ok(scalar.to_string())
    } else {
        String::from_utf8(scalar.as_bytes().to_vec())
    }
}

/// The save header, stored as the `meta` entry of the save archive.
/// Only the root level `key=value` attributes are kept, containers like
/// `flag={...}` or `required_dlcs={...}` are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveMeta {
    attributes: HashMap<String, String>,
}

impl SaveMeta {
    /// Reads the root attributes of a meta file.
    pub fn parse(data: &[u8]) -> Result<Self, MetaError> {
        let mut tape = TokenReader::from_slice(data);
        let mut attributes = HashMap::new();
        let mut potential_key = None;
        let mut past_eq = false;
        while let Some(tok) = tape.next()? {
            match tok {
                TextToken::Open => {
                    tape.skip_container()?;
                    potential_key = None;
                    past_eq = false;
                }
                TextToken::Close => {
                    if cfg!(feature = "permissive") {
                        log::warn!("unexpected close token in save header");
                        break;
                    }
                    return Err(MetaError::UnexpectedClose(tape.position()));
                }
                TextToken::Operator(op) => {
                    past_eq = op == Operator::Equal;
                }
                TextToken::Unquoted(scalar) => {
                    let scalar = scalar_to_string(scalar)?;
                    if past_eq {
                        if let Some(key) = potential_key.take() {
                            attributes.insert(key, scalar);
                        }
                        past_eq = false;
                    } else {
                        potential_key = Some(scalar);
                    }
                }
                TextToken::Quoted(scalar) => {
                    if past_eq {
                        if let Some(key) = potential_key.take() {
                            attributes.insert(key, scalar_to_string(scalar)?);
                        }
                        past_eq = false;
                    }
                }
            }
        }
        Ok(SaveMeta { attributes })
    }

    /// Returns the value of an attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// The name of the player's empire
    pub fn name(&self) -> Option<&str> {
        self.attribute("name")
    }

    /// The in game date of the save
    pub fn date(&self) -> Option<&str> {
        self.attribute("date")
    }

    /// The game version the save was made with
    pub fn version(&self) -> Option<&str> {
        self.attribute("version")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const META: &[u8] = b"version=\"Corvus v3.0.3\"
version_control_revision=74207
name=\"Commonwealth of Man\"
date=\"2241.03.15\"
required_dlcs={
\t\"Anniversary Portraits\"
\t\"Apocalypse\"
}
player_portrait=\"human\"
flag={
\ticon={
\t\tcategory=\"human\"
\t\tfile=\"flag_human_9.dds\"
\t}
\tbackground={
\t\tcategory=\"backgrounds\"
\t\tfile=\"00_solid.dds\"
\t}
\tcolors={
\t\t\"dark_blue\"
\t\t\"blue\"
\t\t\"null\"
\t\t\"null\"
\t}
}
meta_fleets=20
meta_planets=4
";

    #[test]
    fn test_parse() -> Result<(), Box<dyn std::error::Error>> {
        let meta = SaveMeta::parse(META)?;
        assert_eq!(meta.name(), Some("Commonwealth of Man"));
        assert_eq!(meta.date(), Some("2241.03.15"));
        assert_eq!(meta.version(), Some("Corvus v3.0.3"));
        assert_eq!(meta.attribute("meta_planets"), Some("4"));
        assert_eq!(meta.attribute("version_control_revision"), Some("74207"));
        // nested keys are not promoted to the root
        assert_eq!(meta.attribute("category"), None);
        assert_eq!(meta.attribute("player_portrait"), Some("human"));
        Ok(())
    }

    #[test]
    fn test_empty() -> Result<(), Box<dyn std::error::Error>> {
        let meta = SaveMeta::parse(b"")?;
        assert_eq!(meta.name(), None);
        Ok(())
    }

    #[test]
    fn test_utf8() -> Result<(), Box<dyn std::error::Error>> {
        let meta = SaveMeta::parse("name=\"Ǝmpire\"".as_bytes())?;
        assert_eq!(meta.name(), Some("Ǝmpire"));
        Ok(())
    }

    #[cfg(not(feature = "permissive"))]
    #[test]
    fn test_unbalanced() {
        assert!(SaveMeta::parse(b"name=\"a\" }").is_err());
    }
}
