//! CLI command implementations.

pub mod board;
pub mod doctor;
pub mod prepare;
pub mod program;
pub mod resolve;

use std::path::Path;

use anyhow::{Context, Result};
use pinmap_platform::{load_board_toml, BoardDescriptor, Platform};

/// Load a descriptor and build the validated platform from it.
pub fn load_platform(path: &Path) -> Result<(BoardDescriptor, Platform)> {
    let descriptor = load_board_toml(path)
        .with_context(|| format!("loading board descriptor {}", path.display()))?;
    let platform = descriptor
        .to_platform()
        .with_context(|| format!("building platform '{}'", descriptor.name))?;
    Ok((descriptor, platform))
}
