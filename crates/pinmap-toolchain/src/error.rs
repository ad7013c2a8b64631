//! Toolchain integration errors.

use pinmap_platform::PlatformError;
use thiserror::Error;

use crate::flow::FlowState;

/// Errors from build preparation, artifact handling, and programming.
#[derive(Debug, Error)]
pub enum ToolchainError {
    /// The external programmer could not be started or exited non-zero.
    /// Never retried internally: reprogramming a device that may be in a
    /// half-written state needs an external power/reset cycle first.
    #[error("programmer invocation failed: {detail}")]
    ProgrammerInvocation { detail: String },

    /// The board descriptor names no programmer board id.
    #[error("board '{board}' has no programmer board id configured")]
    ProgrammerNotConfigured { board: String },

    /// A named build output is missing from the products directory.
    #[error("build artifact not found: {name}")]
    MissingArtifact { name: String },

    /// Empty or unusable design name.
    #[error("invalid design name: {name:?}")]
    InvalidDesignName { name: String },

    /// A flow operation called out of order.
    #[error("cannot {operation} in state {state:?}")]
    InvalidState {
        operation: &'static str,
        state: FlowState,
    },

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for toolchain operations.
pub type Result<T> = std::result::Result<T, ToolchainError>;
