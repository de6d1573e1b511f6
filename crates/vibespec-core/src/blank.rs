//! Serde support for closed enums stored as `""` when unset.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

pub(crate) trait Keyed: Sized + Copy {
    fn key(&self) -> &'static str;
    fn from_key(s: &str) -> Option<Self>;
}

pub(crate) fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Keyed,
    S: Serializer,
{
    serializer.serialize_str(value.map(|v| v.key()).unwrap_or(""))
}

pub(crate) fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Keyed,
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.is_empty() {
        return Ok(None);
    }
    T::from_key(&raw)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("unknown value: {raw}")))
}
