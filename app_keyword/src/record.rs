use std::fmt;

use serde::Serialize;

/// Field separator between a record's id and its text.
pub const SEPARATOR: char = '|';

/// Identifier taken from a matching record.
///
/// A record without a separator still yields an id, the whole record text,
/// but it is tagged so callers can tell it apart from a real id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RecordId {
    /// Text before the first separator.
    Separated(String),
    /// No separator found; the entire record.
    Unseparated(String),
}

impl RecordId {
    pub fn extract(record: &str) -> Self {
        match record.split_once(SEPARATOR) {
            Some((id, _)) => Self::Separated(id.to_owned()),
            None => Self::Unseparated(record.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Separated(id) | Self::Unseparated(id) => id,
        }
    }

    pub fn is_separated(&self) -> bool {
        matches!(self, Self::Separated(_))
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Separated(id) | Self::Unseparated(id) => id,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
