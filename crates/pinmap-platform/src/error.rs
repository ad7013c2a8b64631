//! Error types for board model construction and pin resolution.

use std::path::PathBuf;

/// Errors that can occur while building a platform or resolving pins.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// A resource with the same (name, index) key is already registered.
    #[error("duplicate resource: '{name}' index {index}")]
    DuplicateResource { name: String, index: u32 },

    /// A connector with the same (name, index) key is already registered.
    #[error("duplicate connector: '{name}' index {index}")]
    DuplicateConnector { name: String, index: u32 },

    /// No resource registered under (name, index).
    #[error("resource not found: '{name}' index {index}")]
    ResourceNotFound { name: String, index: u32 },

    /// No connector registered under (name, index).
    #[error("connector not found: '{name}' index {index}")]
    ConnectorNotFound { name: String, index: u32 },

    /// A connector position past the end of the pin table.
    #[error("position {position} out of range for connector '{name}' index {index} ({len} pins)")]
    PositionOutOfRange {
        name: String,
        index: u32,
        position: usize,
        len: usize,
    },

    /// A connector position whose table entry is the unconnected placeholder.
    #[error("connector '{name}' index {index} has no pin at position {position}")]
    UnconnectedPin {
        name: String,
        index: u32,
        position: usize,
    },

    /// A pin specification string that parses neither as a direct pin nor
    /// as a `connector:index:position` reference.
    #[error("invalid pin spec '{spec}': {detail}")]
    InvalidPinSpec { spec: String, detail: String },

    /// Differential pair with unequal positive and negative widths.
    #[error("differential pair width mismatch: {pos} positive vs {neg} negative pins")]
    WidthMismatch { pos: usize, neg: usize },

    /// Board descriptor file not found.
    #[error("board descriptor not found: {}", path.display())]
    DescriptorNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Structural problem in a board descriptor.
    #[error("invalid board descriptor: {detail}")]
    Validation { detail: String },

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing descriptor files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
