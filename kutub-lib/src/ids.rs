use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer, Deserialize, Deserializer};

use crate::serde::IdVisitor;

/// server assigned identifier.
///
/// the api is not consistent about ids, some endpoints send numbers and
/// others send strings so both are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(String);

pub type GroupId = Id;
pub type PermissionId = Id;
pub type LinkId = Id;
pub type DepartmentId = Id;
pub type DirectionId = Id;
pub type StudentGroupId = Id;
pub type AuthorId = Id;

impl Id {
    pub fn new<V>(value: V) -> Self
    where
        V: Into<String>
    {
        Id(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_number(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for Id {
    fn from(v: String) -> Self {
        Id(v)
    }
}

impl From<&str> for Id {
    fn from(v: &str) -> Self {
        Id(v.to_owned())
    }
}

impl From<i64> for Id {
    fn from(v: i64) -> Self {
        Id(v.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("id cannot be empty")]
pub struct EmptyId;

/// parses user supplied ids. surrounding whitespace is dropped and an empty
/// result is refused
impl FromStr for Id {
    type Err = EmptyId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            Err(EmptyId)
        } else {
            Ok(Id(trimmed.to_owned()))
        }
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>
    {
        deserializer.deserialize_any(IdVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserialize_number_and_string() {
        let ids: Vec<Id> = serde_json::from_str(r#"[1, "2", 30]"#).unwrap();

        assert_eq!(ids, vec![Id::from("1"), Id::from("2"), Id::from("30")]);
    }

    #[test]
    fn deserialize_rejects_other_values() {
        let result: Result<Id, _> = serde_json::from_str("true");

        assert!(result.is_err());
    }

    #[test]
    fn parse_trims_and_refuses_empty() {
        assert_eq!(" 12 ".parse::<Id>().unwrap(), "12");
        assert!("".parse::<Id>().is_err());
        assert!("   ".parse::<Id>().is_err());
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Id::from(5)).unwrap();

        assert_eq!(json, r#""5""#);
    }
}
