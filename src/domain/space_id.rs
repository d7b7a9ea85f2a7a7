use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// A validated identifier for a building or room.
///
/// Identifiers are lowercase ASCII alphanumeric segments separated by single
/// hyphens (e.g. `aq`, `aq-3153`, `tsc1-lounge`). They are fixed by the
/// catalog and never change once a space exists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpaceId(NonEmptyString);

impl SpaceId {
    /// Creates a new `SpaceId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the string is empty, contains characters other
    /// than lowercase letters, digits, and hyphens, or places a hyphen at a
    /// segment boundary (leading, trailing, or doubled).
    pub fn new(s: String) -> Result<Self, Error> {
        let non_empty = NonEmptyString::new(s.clone()).map_err(|_| Error::Empty)?;

        let valid_chars = s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        let valid_segments = !s.starts_with('-') && !s.ends_with('-') && !s.contains("--");
        if !valid_chars || !valid_segments {
            return Err(Error::Syntax(s));
        }

        Ok(Self(non_empty))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for SpaceId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SpaceId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl AsRef<str> for SpaceId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for SpaceId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SpaceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

/// Errors that can occur when parsing a space identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The identifier is empty.
    #[error("Invalid space identifier: cannot be empty")]
    Empty,

    /// The identifier contains invalid characters or hyphen placement.
    #[error(
        "Invalid space identifier '{0}': expected lowercase alphanumeric segments separated by single hyphens"
    )]
    Syntax(String),
}
