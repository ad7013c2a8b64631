//! Toolchain option sets with append-only merging.
//!
//! Boards carry options that are mandatory for electrical correctness
//! (e.g. releasing shared flash pins as plain I/O). Merging is therefore
//! append-only: a caller can add options or extend a board's value, but
//! can never displace one.

use std::collections::BTreeMap;

use serde::Serialize;

/// Option-name to value mapping handed to the synthesis toolchain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildOptions {
    options: BTreeMap<String, String>,
}

impl BuildOptions {
    pub fn new() -> Self {
        BuildOptions::default()
    }

    /// Set an option, replacing any previous value in this set. Use
    /// [`Self::append`] to combine two sets.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
    }

    /// Builder-style [`Self::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append-only merge: keys only present in `extra` are added; for a
    /// shared key, `extra`'s value is appended after the existing one,
    /// space-separated. Nothing already in `self` is ever dropped.
    pub fn append(&mut self, extra: &BuildOptions) {
        for (key, value) in &extra.options {
            match self.options.get_mut(key) {
                Some(existing) => {
                    existing.push(' ');
                    existing.push_str(value);
                }
                None => {
                    self.options.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BuildOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        BuildOptions {
            options: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_within_a_set() {
        let mut options = BuildOptions::new();
        options.set("opt", "a");
        options.set("opt", "b");
        assert_eq!(options.get("opt"), Some("b"));
    }

    #[test]
    fn append_unions_disjoint_keys() {
        let mut board = BuildOptions::new().with("add_options", "set_option -x 1");
        let caller = BuildOptions::new().with("nextpnr_opts", "--seed 7");
        board.append(&caller);
        assert_eq!(board.len(), 2);
        assert_eq!(board.get("add_options"), Some("set_option -x 1"));
        assert_eq!(board.get("nextpnr_opts"), Some("--seed 7"));
    }

    #[test]
    fn append_never_drops_mandatory_value() {
        let mut board = BuildOptions::new().with("gowin_pack_opts", "--sspi_as_gpio");
        let caller = BuildOptions::new().with("gowin_pack_opts", "--compress");
        board.append(&caller);
        assert_eq!(
            board.get("gowin_pack_opts"),
            Some("--sspi_as_gpio --compress")
        );
    }

    #[test]
    fn append_empty_is_identity() {
        let mut board = BuildOptions::new().with("a", "1");
        let before = board.clone();
        board.append(&BuildOptions::new());
        assert_eq!(board, before);
    }
}
