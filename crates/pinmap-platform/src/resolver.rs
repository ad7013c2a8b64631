//! Pin address resolution against connector tables.
//!
//! Resolution is a pure function over the immutable connector registry:
//! direct addresses pass through unchanged, indirect addresses go through
//! the referenced connector's table. Resolvers borrow the registry and
//! can be used freely from multiple threads.

use crate::addr::PinAddr;
use crate::attrs::Attrs;
use crate::connector::ConnectorRegistry;
use crate::error::Result;
use crate::resource::{Binding, Dir, DiffPairs, Pins, Resource, ResourceIo};

/// Resolves pin addresses to physical package pin names.
#[derive(Debug, Clone, Copy)]
pub struct PinResolver<'a> {
    connectors: &'a ConnectorRegistry,
}

impl<'a> PinResolver<'a> {
    pub fn new(connectors: &'a ConnectorRegistry) -> Self {
        PinResolver { connectors }
    }

    /// Resolve one parsed address.
    pub fn resolve(&self, addr: &PinAddr) -> Result<String> {
        match addr {
            PinAddr::Direct(pin) => Ok(pin.clone()),
            PinAddr::Indirect {
                connector,
                index,
                position,
            } => self
                .connectors
                .lookup(connector, *index, *position)
                .map(str::to_string),
        }
    }

    /// Parse and resolve a single spec string.
    pub fn resolve_spec(&self, spec: &str) -> Result<String> {
        self.resolve(&PinAddr::parse(spec)?)
    }

    /// Parse and resolve a whitespace-delimited multi-pin spec. Results
    /// keep declaration order, mapping entry `k` onto bit `k`.
    pub fn resolve_spec_list(&self, specs: &str) -> Result<Vec<String>> {
        PinAddr::parse_list(specs)?
            .iter()
            .map(|addr| self.resolve(addr))
            .collect()
    }

    /// Resolve a single-ended binding, one pin per bit.
    pub fn resolve_pins(&self, pins: &Pins) -> Result<Vec<String>> {
        pins.addrs.iter().map(|addr| self.resolve(addr)).collect()
    }

    /// Resolve a differential binding to (positive, negative) pin lists.
    pub fn resolve_diff(&self, pairs: &DiffPairs) -> Result<(Vec<String>, Vec<String>)> {
        let pos = pairs
            .pos
            .iter()
            .map(|addr| self.resolve(addr))
            .collect::<Result<Vec<_>>>()?;
        let neg = pairs
            .neg
            .iter()
            .map(|addr| self.resolve(addr))
            .collect::<Result<Vec<_>>>()?;
        Ok((pos, neg))
    }

    /// Resolve a whole resource: every binding to physical pins, with
    /// attributes flattened by override precedence (platform defaults,
    /// then the resource's attrs, then per-subsignal attrs, then
    /// `overrides`).
    pub fn resolve_resource(
        &self,
        resource: &Resource,
        defaults: &Attrs,
        overrides: &Attrs,
    ) -> Result<ResolvedResource> {
        let mut signals = Vec::new();
        match &resource.io {
            ResourceIo::Single(binding) => {
                signals.push(self.resolve_signal(
                    &resource.name,
                    binding,
                    defaults,
                    &resource.attrs,
                    &Attrs::new(),
                    overrides,
                )?);
            }
            ResourceIo::Subsignals(subs) => {
                for sub in subs {
                    signals.push(self.resolve_signal(
                        &sub.name,
                        &sub.binding,
                        defaults,
                        &resource.attrs,
                        &sub.attrs,
                        overrides,
                    )?);
                }
            }
        }
        Ok(ResolvedResource {
            name: resource.name.clone(),
            index: resource.index,
            signals,
            clock_hz: resource.clock_hz,
        })
    }

    fn resolve_signal(
        &self,
        name: &str,
        binding: &Binding,
        defaults: &Attrs,
        resource_attrs: &Attrs,
        signal_attrs: &Attrs,
        overrides: &Attrs,
    ) -> Result<ResolvedSignal> {
        let mut attrs = Attrs::merged(defaults, resource_attrs, signal_attrs);
        attrs.apply(overrides);
        let (pins, neg_pins) = match binding {
            Binding::Pins(pins) => (self.resolve_pins(pins)?, None),
            Binding::DiffPairs(pairs) => {
                let (pos, neg) = self.resolve_diff(pairs)?;
                (pos, Some(neg))
            }
        };
        Ok(ResolvedSignal {
            name: name.to_string(),
            dir: binding.dir(),
            invert: binding.invert(),
            pins,
            neg_pins,
            attrs,
        })
    }
}

/// A resource with every pin address resolved and attributes flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub name: String,
    pub index: u32,
    pub signals: Vec<ResolvedSignal>,
    pub clock_hz: Option<u64>,
}

/// One fully-resolved signal of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSignal {
    /// Subsignal name, or the resource name for single-binding resources.
    pub name: String,
    pub dir: Dir,
    pub invert: bool,
    /// Physical pins in bit order; the positive side for differential
    /// pairs.
    pub pins: Vec<String>,
    /// Negative-side pins for differential pairs.
    pub neg_pins: Option<Vec<String>>,
    /// Effective attributes after override merging.
    pub attrs: Attrs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::{AttrKey, AttrValue};
    use crate::connector::Connector;
    use crate::error::PlatformError;
    use crate::resource::Subsignal;

    fn registry() -> ConnectorRegistry {
        let mut registry = ConnectorRegistry::new();
        registry
            .register(Connector::from_table("j", 1, "- - 4 5"))
            .unwrap();
        registry
    }

    #[test]
    fn direct_spec_passes_through() {
        let registry = registry();
        let resolver = PinResolver::new(&registry);
        assert_eq!(resolver.resolve_spec("H4").unwrap(), "H4");
        assert_eq!(resolver.resolve_spec("42").unwrap(), "42");
    }

    #[test]
    fn indirect_spec_goes_through_connector() {
        let registry = registry();
        let resolver = PinResolver::new(&registry);
        assert_eq!(resolver.resolve_spec("j:1:2").unwrap(), "4");
        assert!(matches!(
            resolver.resolve_spec("j:1:0"),
            Err(PlatformError::UnconnectedPin { .. })
        ));
        assert!(matches!(
            resolver.resolve_spec("j:1:9"),
            Err(PlatformError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn list_resolution_keeps_order() {
        let registry = registry();
        let resolver = PinResolver::new(&registry);
        assert_eq!(
            resolver.resolve_spec_list("42 j:1:2 41").unwrap(),
            vec!["42", "4", "41"]
        );
    }

    #[test]
    fn resolved_resource_flattens_attrs() {
        let registry = registry();
        let resolver = PinResolver::new(&registry);
        let resource = Resource::grouped(
            "uart",
            1,
            vec![Subsignal {
                name: "rx".to_string(),
                binding: Binding::Pins(Pins::parse("j:1:3", Dir::Input, false).unwrap()),
                attrs: Attrs::new().with("PULL_MODE", "UP"),
            }],
            Attrs::new().with("IO_TYPE", "LVCMOS33"),
        );
        let defaults = Attrs::new().with("SLEW_RATE", "SLOW");
        let overrides = Attrs::new().with("IO_TYPE", "LVCMOS18");

        let resolved = resolver
            .resolve_resource(&resource, &defaults, &overrides)
            .unwrap();
        assert_eq!(resolved.signals.len(), 1);
        let rx = &resolved.signals[0];
        assert_eq!(rx.pins, vec!["5"]);
        assert_eq!(
            rx.attrs.get(&AttrKey::IoType),
            Some(&AttrValue::Str("LVCMOS18".into()))
        );
        assert_eq!(
            rx.attrs.get(&AttrKey::PullMode),
            Some(&AttrValue::Str("UP".into()))
        );
        assert_eq!(
            rx.attrs.get(&AttrKey::SlewRate),
            Some(&AttrValue::Str("SLOW".into()))
        );
    }
}
