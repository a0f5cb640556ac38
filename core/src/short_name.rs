//! Account short name, validated to 1-32 Unicode scalar values.
//!
//! Displayed to the account owner above the "Edit/Publish" button; other
//! users never see it. Validation lives in the constructor and every other
//! entry point (parsing, serde) goes through it, so no `ShortName` outside
//! the length bounds can exist. The empty value is unconstructable, which
//! also means serialization always produces a JSON string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ShortNameError;

pub const MIN_LEN: usize = 1;
pub const MAX_LEN: usize = 32;

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShortName(String);

impl ShortName {
    /// Validate `raw` and wrap it. Length is counted in `char`s, so each
    /// multi-byte character counts once.
    pub fn new(raw: impl Into<String>) -> Result<Self, ShortNameError> {
        let raw = raw.into();
        let count = raw.chars().count();
        if !(MIN_LEN..=MAX_LEN).contains(&count) {
            return Err(ShortNameError::Length { count });
        }
        Ok(Self(raw))
    }

    /// Decode a quoted JSON string token such as `"\"Anonymous\""`.
    ///
    /// A token that is not a JSON string is a `Format` error; a well-formed
    /// string of the wrong length is a `Length` error.
    pub fn from_json(token: &str) -> Result<Self, ShortNameError> {
        let unquoted: String = serde_json::from_str(token).map_err(ShortNameError::Format)?;
        Self::new(unquoted)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for ShortName {
    type Err = ShortNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ShortName {
    type Error = ShortNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for ShortName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ShortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShortName({})", self.0)
    }
}

impl Serialize for ShortName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ShortName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ShortName::new(raw).map_err(serde::de::Error::custom)
    }
}
