//! Immutable board platform aggregate.
//!
//! A `Platform` bundles the descriptor metadata, resource catalog, and
//! connector tables for one physical board. It is assembled and validated
//! once; everything downstream works on shared references, so resolution
//! never races and addressing mistakes surface before any external tool
//! is invoked.

use std::collections::BTreeMap;

use crate::attrs::Attrs;
use crate::catalog::ResourceCatalog;
use crate::connector::{Connector, ConnectorRegistry};
use crate::error::Result;
use crate::resolver::{PinResolver, ResolvedResource};
use crate::resource::Resource;

/// Programmer executable used when a board names none.
pub const DEFAULT_PROGRAMMER: &str = "openFPGALoader";

/// How to invoke the external programmer for a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgrammerInfo {
    /// Programmer executable name.
    pub binary: String,
    /// Board identifier passed via `-b`.
    pub board: Option<String>,
}

impl Default for ProgrammerInfo {
    fn default() -> Self {
        ProgrammerInfo {
            binary: DEFAULT_PROGRAMMER.to_string(),
            board: None,
        }
    }
}

/// Descriptor metadata for a board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardInfo {
    pub name: String,
    /// Device part id, e.g. "GW2AR-LV18QN88C8/I7".
    pub part: String,
    /// Device family id, e.g. "GW2AR-18C".
    pub family: String,
    /// Name (index 0) of the default clock resource.
    pub default_clock: Option<String>,
    /// Name (index 0) of the default reset resource.
    pub default_reset: Option<String>,
    pub programmer: ProgrammerInfo,
    /// Build options the board always passes to the toolchain. These are
    /// mandatory for electrical correctness and are never dropped when a
    /// caller supplies its own options.
    pub options: BTreeMap<String, String>,
    /// Platform-wide attribute defaults, lowest merge precedence.
    pub default_attrs: Attrs,
}

/// Immutable aggregate of a board's resources, connectors, and metadata.
#[derive(Debug, Clone)]
pub struct Platform {
    info: BoardInfo,
    resources: ResourceCatalog,
    connectors: ConnectorRegistry,
}

impl Platform {
    /// Assemble and validate a platform. All registration and addressing
    /// errors surface here.
    pub fn new(
        info: BoardInfo,
        resources: Vec<Resource>,
        connectors: Vec<Connector>,
    ) -> Result<Self> {
        let mut registry = ConnectorRegistry::new();
        for connector in connectors {
            registry.register(connector)?;
        }
        let mut catalog = ResourceCatalog::new();
        catalog.register_all(resources)?;
        let platform = Platform {
            info,
            resources: catalog,
            connectors: registry,
        };
        platform.validate()?;
        Ok(platform)
    }

    /// Every pin reference must resolve and the default clock/reset names
    /// must exist at index 0.
    fn validate(&self) -> Result<()> {
        let resolver = self.resolver();
        for resource in self.resources.iter() {
            for addr in resource.addrs() {
                resolver.resolve(addr)?;
            }
        }
        if let Some(name) = &self.info.default_clock {
            self.resources.lookup(name, 0)?;
        }
        if let Some(name) = &self.info.default_reset {
            self.resources.lookup(name, 0)?;
        }
        Ok(())
    }

    pub fn info(&self) -> &BoardInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn part(&self) -> &str {
        &self.info.part
    }

    pub fn family(&self) -> &str {
        &self.info.family
    }

    pub fn default_clock(&self) -> Option<&str> {
        self.info.default_clock.as_deref()
    }

    pub fn default_reset(&self) -> Option<&str> {
        self.info.default_reset.as_deref()
    }

    pub fn programmer(&self) -> &ProgrammerInfo {
        &self.info.programmer
    }

    /// Board-mandatory toolchain options.
    pub fn options(&self) -> &BTreeMap<String, String> {
        &self.info.options
    }

    pub fn resources(&self) -> &ResourceCatalog {
        &self.resources
    }

    pub fn connectors(&self) -> &ConnectorRegistry {
        &self.connectors
    }

    pub fn resolver(&self) -> PinResolver<'_> {
        PinResolver::new(&self.connectors)
    }

    pub fn lookup(&self, name: &str, index: u32) -> Result<&Resource> {
        self.resources.lookup(name, index)
    }

    /// Look up a resource and resolve it against the board's connectors
    /// and attribute defaults.
    pub fn resolve_resource(&self, name: &str, index: u32) -> Result<ResolvedResource> {
        self.resolve_resource_with(name, index, &Attrs::new())
    }

    /// Like [`Self::resolve_resource`], with caller attribute overrides
    /// taking highest precedence.
    pub fn resolve_resource_with(
        &self,
        name: &str,
        index: u32,
        overrides: &Attrs,
    ) -> Result<ResolvedResource> {
        let resource = self.resources.lookup(name, index)?;
        self.resolver()
            .resolve_resource(resource, &self.info.default_attrs, overrides)
    }
}
