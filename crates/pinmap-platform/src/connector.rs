//! Expansion connector tables.
//!
//! A connector is an ordered table of package pin names for one expansion
//! header, addressed by (name, index, position). The reserved `-` entry
//! marks a position with no electrical connection.

use std::collections::BTreeMap;

use crate::error::{PlatformError, Result};

/// Ordered pin table for one expansion header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    name: String,
    index: u32,
    pins: Vec<Option<String>>,
}

impl Connector {
    /// Table entry marking a position with no physical pin.
    pub const UNCONNECTED: &'static str = "-";

    /// Build a connector from a whitespace-separated pin table, with
    /// [`Self::UNCONNECTED`] marking gaps. Positions are 0-based.
    pub fn from_table(name: impl Into<String>, index: u32, table: &str) -> Self {
        let pins = table
            .split_whitespace()
            .map(|pin| {
                if pin == Self::UNCONNECTED {
                    None
                } else {
                    Some(pin.to_string())
                }
            })
            .collect();
        Connector {
            name: name.into(),
            index,
            pins,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Number of positions in the table, connected or not.
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Physical pin name at a 0-based position.
    pub fn pin_at(&self, position: usize) -> Result<&str> {
        match self.pins.get(position) {
            None => Err(PlatformError::PositionOutOfRange {
                name: self.name.clone(),
                index: self.index,
                position,
                len: self.pins.len(),
            }),
            Some(None) => Err(PlatformError::UnconnectedPin {
                name: self.name.clone(),
                index: self.index,
                position,
            }),
            Some(Some(pin)) => Ok(pin),
        }
    }

    /// Iterate positions as (position, pin-or-unconnected).
    pub fn positions(&self) -> impl Iterator<Item = (usize, Option<&str>)> {
        self.pins
            .iter()
            .enumerate()
            .map(|(i, pin)| (i, pin.as_deref()))
    }
}

/// Registry of connectors keyed by (name, index). Populated once during
/// platform construction, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ConnectorRegistry {
    connectors: BTreeMap<(String, u32), Connector>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        ConnectorRegistry::default()
    }

    pub fn register(&mut self, connector: Connector) -> Result<()> {
        let key = (connector.name().to_string(), connector.index());
        if self.connectors.contains_key(&key) {
            return Err(PlatformError::DuplicateConnector {
                name: key.0,
                index: key.1,
            });
        }
        self.connectors.insert(key, connector);
        Ok(())
    }

    pub fn get(&self, name: &str, index: u32) -> Result<&Connector> {
        self.connectors
            .get(&(name.to_string(), index))
            .ok_or_else(|| PlatformError::ConnectorNotFound {
                name: name.to_string(),
                index,
            })
    }

    /// Resolve (name, index, position) to a physical pin name.
    pub fn lookup(&self, name: &str, index: u32, position: usize) -> Result<&str> {
        self.get(name, index)?.pin_at(position)
    }

    /// Connectors in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.values()
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}
