//! Physical pin addressing.
//!
//! A pin specification is either a direct package pin identifier ("4",
//! "OSCH") or an indirect reference through an expansion connector,
//! written `connector:index:position` ("j:1:18"). Specs are parsed once
//! when a platform is constructed, not on every resolve call.

use std::fmt;

use crate::error::{PlatformError, Result};

/// A single parsed pin address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PinAddr {
    /// Direct package pin identifier, passed through resolution unchanged.
    Direct(String),
    /// Reference into an expansion connector's pin table, 0-based position.
    Indirect {
        connector: String,
        index: u32,
        position: usize,
    },
}

impl PinAddr {
    /// Parse one pin spec. The spec must not contain whitespace; use
    /// [`parse_list`] for multi-pin specs.
    pub fn parse(spec: &str) -> Result<Self> {
        if spec.is_empty() {
            return invalid(spec, "empty pin spec");
        }
        if spec.chars().any(char::is_whitespace) {
            return invalid(spec, "single pin spec contains whitespace");
        }
        if !spec.contains(':') {
            if spec == crate::connector::Connector::UNCONNECTED {
                return invalid(spec, "the unconnected placeholder is not a pin");
            }
            return Ok(PinAddr::Direct(spec.to_string()));
        }

        let mut parts = spec.split(':');
        let (connector, index, position) = match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some(conn), Some(index), Some(position), None) => (conn, index, position),
            _ => return invalid(spec, "expected connector:index:position"),
        };
        if connector.is_empty() {
            return invalid(spec, "empty connector name");
        }
        let index: u32 = match index.parse() {
            Ok(i) => i,
            Err(_) => return invalid(spec, "connector index is not an unsigned integer"),
        };
        let position: usize = match position.parse() {
            Ok(p) => p,
            Err(_) => return invalid(spec, "connector position is not an unsigned integer"),
        };
        Ok(PinAddr::Indirect {
            connector: connector.to_string(),
            index,
            position,
        })
    }

    /// Parse a whitespace-delimited multi-pin spec. Order follows the
    /// spec string and is preserved through resolution; bit `k` of a
    /// multi-bit signal binds to entry `k`.
    pub fn parse_list(specs: &str) -> Result<Vec<Self>> {
        specs.split_whitespace().map(Self::parse).collect()
    }
}

impl fmt::Display for PinAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinAddr::Direct(pin) => write!(f, "{pin}"),
            PinAddr::Indirect {
                connector,
                index,
                position,
            } => write!(f, "{connector}:{index}:{position}"),
        }
    }
}

fn invalid<T>(spec: &str, detail: &str) -> Result<T> {
    Err(PlatformError::InvalidPinSpec {
        spec: spec.to_string(),
        detail: detail.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_spec() {
        assert_eq!(PinAddr::parse("4").unwrap(), PinAddr::Direct("4".into()));
        assert_eq!(
            PinAddr::parse("OSCH").unwrap(),
            PinAddr::Direct("OSCH".into())
        );
    }

    #[test]
    fn indirect_spec() {
        assert_eq!(
            PinAddr::parse("j:1:18").unwrap(),
            PinAddr::Indirect {
                connector: "j".into(),
                index: 1,
                position: 18,
            }
        );
    }

    #[test]
    fn rejects_malformed_indirect() {
        assert!(PinAddr::parse("j:1").is_err());
        assert!(PinAddr::parse("j:1:2:3").is_err());
        assert!(PinAddr::parse("j:one:2").is_err());
        assert!(PinAddr::parse("j:1:-2").is_err());
        assert!(PinAddr::parse(":1:2").is_err());
    }

    #[test]
    fn rejects_placeholder_and_empty() {
        assert!(matches!(
            PinAddr::parse("-"),
            Err(PlatformError::InvalidPinSpec { .. })
        ));
        assert!(PinAddr::parse("").is_err());
    }

    #[test]
    fn list_preserves_declaration_order() {
        let addrs = PinAddr::parse_list("42 41 j:1:2  40").unwrap();
        assert_eq!(
            addrs,
            vec![
                PinAddr::Direct("42".into()),
                PinAddr::Direct("41".into()),
                PinAddr::Indirect {
                    connector: "j".into(),
                    index: 1,
                    position: 2,
                },
                PinAddr::Direct("40".into()),
            ]
        );
    }

    #[test]
    fn display_round_trips() {
        for spec in ["4", "OSCH", "j:1:18"] {
            assert_eq!(PinAddr::parse(spec).unwrap().to_string(), spec);
        }
    }
}
