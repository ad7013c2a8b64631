//! Board resource model and pin resolution for FPGA build flows.
//!
//! A board is described declaratively: named, indexed logical resources
//! (clocks, LEDs, UARTs, buses) bound to physical package pins, either
//! directly or through expansion-connector tables, plus the electrical
//! attributes and toolchain options the board requires. This crate parses
//! those descriptors, validates them eagerly, and resolves every pin
//! reference to a concrete package pin, all before any synthesis or
//! programming tool runs.

pub mod addr;
pub mod attrs;
pub mod boards;
pub mod catalog;
pub mod connector;
pub mod descriptor;
pub mod error;
pub mod platform;
pub mod resolver;
pub mod resource;

// Re-exports for convenience.
pub use addr::PinAddr;
pub use attrs::{AttrKey, AttrValue, Attrs};
pub use catalog::ResourceCatalog;
pub use connector::{Connector, ConnectorRegistry};
pub use descriptor::{board_to_toml, load_board_toml, parse_board_toml, BoardDescriptor};
pub use error::{PlatformError, Result};
pub use platform::{BoardInfo, Platform, ProgrammerInfo, DEFAULT_PROGRAMMER};
pub use resolver::{PinResolver, ResolvedResource, ResolvedSignal};
pub use resource::{
    expand_numbered, spi_flash_resource, uart_resource, Binding, DiffPairs, Dir, Pins, Resource,
    ResourceIo, Subsignal,
};
