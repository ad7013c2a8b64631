//! Logical I/O resources and their pin bindings.

use serde::{Deserialize, Serialize};

use crate::addr::PinAddr;
use crate::attrs::Attrs;
use crate::error::{PlatformError, Result};

/// Direction of a pin binding as seen from the FPGA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    Input,
    Output,
    Bidir,
}

/// Ordered single-ended pin binding. Entry `k` binds bit `k` of the
/// signal; order comes from the spec string and is never rearranged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pins {
    pub addrs: Vec<PinAddr>,
    pub dir: Dir,
    pub invert: bool,
}

impl Pins {
    pub fn parse(spec: &str, dir: Dir, invert: bool) -> Result<Self> {
        let addrs = PinAddr::parse_list(spec)?;
        if addrs.is_empty() {
            return Err(PlatformError::InvalidPinSpec {
                spec: spec.to_string(),
                detail: "empty pin list".to_string(),
            });
        }
        Ok(Pins { addrs, dir, invert })
    }

    pub fn width(&self) -> usize {
        self.addrs.len()
    }
}

/// Differential pin binding; the positive and negative sides pair up
/// index-wise and must match in width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPairs {
    pub pos: Vec<PinAddr>,
    pub neg: Vec<PinAddr>,
    pub dir: Dir,
    pub invert: bool,
}

impl DiffPairs {
    pub fn parse(pos: &str, neg: &str, dir: Dir, invert: bool) -> Result<Self> {
        let pos = PinAddr::parse_list(pos)?;
        let neg = PinAddr::parse_list(neg)?;
        if pos.is_empty() {
            return Err(PlatformError::InvalidPinSpec {
                spec: String::new(),
                detail: "empty differential pin list".to_string(),
            });
        }
        if pos.len() != neg.len() {
            return Err(PlatformError::WidthMismatch {
                pos: pos.len(),
                neg: neg.len(),
            });
        }
        Ok(DiffPairs {
            pos,
            neg,
            dir,
            invert,
        })
    }

    pub fn width(&self) -> usize {
        self.pos.len()
    }
}

/// A pin binding attached to a resource or subsignal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Pins(Pins),
    DiffPairs(DiffPairs),
}

impl Binding {
    pub fn width(&self) -> usize {
        match self {
            Binding::Pins(pins) => pins.width(),
            Binding::DiffPairs(pairs) => pairs.width(),
        }
    }

    pub fn dir(&self) -> Dir {
        match self {
            Binding::Pins(pins) => pins.dir,
            Binding::DiffPairs(pairs) => pairs.dir,
        }
    }

    pub fn invert(&self) -> bool {
        match self {
            Binding::Pins(pins) => pins.invert,
            Binding::DiffPairs(pairs) => pairs.invert,
        }
    }

    /// Every pin address in the binding, negative sides included.
    pub fn addrs(&self) -> impl Iterator<Item = &PinAddr> {
        let (first, neg) = match self {
            Binding::Pins(pins) => (&pins.addrs, None),
            Binding::DiffPairs(pairs) => (&pairs.pos, Some(&pairs.neg)),
        };
        first.iter().chain(neg.into_iter().flatten())
    }
}

/// Named sub-binding within a multi-signal resource (e.g. one wire of a
/// bus interface). Its attributes layer on top of the parent resource's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsignal {
    pub name: String,
    pub binding: Binding,
    pub attrs: Attrs,
}

/// The I/O payload of a resource: one binding, or a set of named
/// subsignals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceIo {
    Single(Binding),
    Subsignals(Vec<Subsignal>),
}

/// A named, indexed logical I/O signal group with physical pin bindings,
/// attributes, and an optional clock constraint. Immutable once
/// registered in a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub name: String,
    pub index: u32,
    pub io: ResourceIo,
    pub attrs: Attrs,
    /// Informational clock constraint in Hz.
    pub clock_hz: Option<u64>,
}

impl Resource {
    /// Single-binding resource.
    pub fn single(name: impl Into<String>, index: u32, binding: Binding, attrs: Attrs) -> Self {
        Resource {
            name: name.into(),
            index,
            io: ResourceIo::Single(binding),
            attrs,
            clock_hz: None,
        }
    }

    /// Multi-signal resource built from named subsignals.
    pub fn grouped(
        name: impl Into<String>,
        index: u32,
        subsignals: Vec<Subsignal>,
        attrs: Attrs,
    ) -> Self {
        Resource {
            name: name.into(),
            index,
            io: ResourceIo::Subsignals(subsignals),
            attrs,
            clock_hz: None,
        }
    }

    pub fn with_clock(mut self, hz: u64) -> Self {
        self.clock_hz = Some(hz);
        self
    }

    pub fn subsignal(&self, name: &str) -> Option<&Subsignal> {
        match &self.io {
            ResourceIo::Single(_) => None,
            ResourceIo::Subsignals(subs) => subs.iter().find(|s| s.name == name),
        }
    }

    /// Every pin address bound anywhere in the resource.
    pub fn addrs(&self) -> Box<dyn Iterator<Item = &PinAddr> + '_> {
        match &self.io {
            ResourceIo::Single(binding) => Box::new(binding.addrs()),
            ResourceIo::Subsignals(subs) => {
                Box::new(subs.iter().flat_map(|s| s.binding.addrs()))
            }
        }
    }
}

/// Expand an ordered pin list into one single-pin resource per entry,
/// indexed 0..N-1. Each resource gets its own copy of `attrs`, so later
/// mutation of one cannot leak into another.
pub fn expand_numbered(
    name: &str,
    pins_spec: &str,
    dir: Dir,
    invert: bool,
    attrs: &Attrs,
) -> Result<Vec<Resource>> {
    let addrs = PinAddr::parse_list(pins_spec)?;
    if addrs.is_empty() {
        return Err(PlatformError::InvalidPinSpec {
            spec: pins_spec.to_string(),
            detail: "empty pin list".to_string(),
        });
    }
    Ok(addrs
        .into_iter()
        .enumerate()
        .map(|(i, addr)| {
            Resource::single(
                name,
                i as u32,
                Binding::Pins(Pins {
                    addrs: vec![addr],
                    dir,
                    invert,
                }),
                attrs.clone(),
            )
        })
        .collect())
}

/// UART resource with rx/tx subsignals.
pub fn uart_resource(index: u32, rx: &str, tx: &str, attrs: &Attrs) -> Result<Resource> {
    Ok(Resource::grouped(
        "uart",
        index,
        vec![
            Subsignal {
                name: "rx".to_string(),
                binding: Binding::Pins(Pins::parse(rx, Dir::Input, false)?),
                attrs: Attrs::new(),
            },
            Subsignal {
                name: "tx".to_string(),
                binding: Binding::Pins(Pins::parse(tx, Dir::Output, false)?),
                attrs: Attrs::new(),
            },
        ],
        attrs.clone(),
    ))
}

/// SPI flash resource with cs_n/clk/copi/cipo subsignals.
pub fn spi_flash_resource(
    index: u32,
    cs_n: &str,
    clk: &str,
    copi: &str,
    cipo: &str,
    attrs: &Attrs,
) -> Result<Resource> {
    let sub = |name: &str, spec: &str, dir: Dir| -> Result<Subsignal> {
        Ok(Subsignal {
            name: name.to_string(),
            binding: Binding::Pins(Pins::parse(spec, dir, false)?),
            attrs: Attrs::new(),
        })
    };
    Ok(Resource::grouped(
        "spi_flash",
        index,
        vec![
            sub("cs_n", cs_n, Dir::Output)?,
            sub("clk", clk, Dir::Output)?,
            sub("copi", copi, Dir::Output)?,
            sub("cipo", cipo, Dir::Input)?,
        ],
        attrs.clone(),
    ))
}
