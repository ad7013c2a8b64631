//! `pinmap resolve` — pin spec resolution.

use std::path::Path;

use anyhow::{bail, Result};

use super::load_platform;

/// Resolve each spec against the board and print `spec -> pins`.
pub fn run(path: &Path, specs: &[String]) -> Result<()> {
    if specs.is_empty() {
        bail!("no pin specs given");
    }
    let (_, platform) = load_platform(path)?;
    let resolver = platform.resolver();

    for spec in specs {
        let pins = resolver.resolve_spec_list(spec)?;
        println!("{spec} -> {}", pins.join(" "));
    }
    Ok(())
}
