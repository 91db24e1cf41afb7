use std::fmt;

use serde::de;
use serde::Serializer;

use crate::ids::Id;

pub(crate) struct IdVisitor;

impl<'de> de::Visitor<'de> for IdVisitor {
    type Value = Id;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a string or integer id")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Id::from(s))
    }

    fn visit_string<E>(self, s: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Id::from(s))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Id::from(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Id::new(v.to_string()))
    }
}

/// sends a numeric id as a json number, anything else as a string.
///
/// foreign keys in request bodies are expected to be numbers by the server.
pub fn id_as_number<S>(id: &Id, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer
{
    match id.as_number() {
        Some(num) => serializer.serialize_i64(num),
        None => serializer.serialize_str(id.as_str())
    }
}
