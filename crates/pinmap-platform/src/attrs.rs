//! Electrical attribute sets.
//!
//! Attributes carry I/O constraints (standard, pull mode, drive strength)
//! from board descriptors down to the toolchain. The recognized vocabulary
//! is closed; anything else travels through the `Other` slot untouched.
//! Sets compose by override: the last-applied value for a key wins, and a
//! collision is never an error.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Recognized attribute keys plus a passthrough for vendor extensions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttrKey {
    /// I/O standard, e.g. "LVCMOS33".
    IoType,
    /// Termination pull, e.g. "UP".
    PullMode,
    /// Drive strength in mA.
    Drive,
    /// Output slew rate.
    SlewRate,
    /// Unrecognized vendor-specific key, passed through verbatim.
    Other(String),
}

impl AttrKey {
    pub fn as_str(&self) -> &str {
        match self {
            AttrKey::IoType => "IO_TYPE",
            AttrKey::PullMode => "PULL_MODE",
            AttrKey::Drive => "DRIVE",
            AttrKey::SlewRate => "SLEW_RATE",
            AttrKey::Other(key) => key,
        }
    }
}

impl From<&str> for AttrKey {
    fn from(key: &str) -> Self {
        match key {
            "IO_TYPE" => AttrKey::IoType,
            "PULL_MODE" => AttrKey::PullMode,
            "DRIVE" => AttrKey::Drive,
            "SLEW_RATE" => AttrKey::SlewRate,
            other => AttrKey::Other(other.to_string()),
        }
    }
}

impl From<String> for AttrKey {
    fn from(key: String) -> Self {
        AttrKey::from(key.as_str())
    }
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An attribute value: a string constant or a bare integer (e.g. DRIVE = 24).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Str(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Int(v) => write!(f, "{v}"),
            AttrValue::Str(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

/// An override-composable set of attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    entries: BTreeMap<AttrKey, AttrValue>,
}

impl Attrs {
    pub fn new() -> Self {
        Attrs::default()
    }

    /// Builder-style insert; replaces any existing value for the key.
    pub fn with(mut self, key: impl Into<AttrKey>, value: impl Into<AttrValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<AttrKey>, value: impl Into<AttrValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &AttrKey) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttrKey, &AttrValue)> {
        self.entries.iter()
    }

    /// Layer `overrides` on top of this set. Keys present in both take the
    /// override's value; keys absent from `overrides` are kept.
    pub fn apply(&mut self, overrides: &Attrs) {
        for (key, value) in overrides.iter() {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Key-wise override merge, lowest precedence first: platform defaults,
    /// then resource attributes, then caller overrides. Absent keys are
    /// inherited from the next lower-precedence source.
    pub fn merged(defaults: &Attrs, resource: &Attrs, overrides: &Attrs) -> Attrs {
        let mut out = defaults.clone();
        out.apply(resource);
        out.apply(overrides);
        out
    }
}

impl<K: Into<AttrKey>, V: Into<AttrValue>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attrs {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
