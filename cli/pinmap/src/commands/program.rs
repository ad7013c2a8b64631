//! `pinmap program` — device programming from a products directory.

use std::path::Path;

use anyhow::Result;
use log::info;
use pinmap_toolchain::{BuildFlow, BuildOptions, BuildProducts};

use super::load_platform;

/// Prepare the flow and hand the named design's bitstream to the
/// external programmer.
pub fn run(path: &Path, name: &str, products_dir: &Path) -> Result<()> {
    let (_, platform) = load_platform(path)?;
    let products = BuildProducts::new(products_dir);

    let mut flow = BuildFlow::new(&platform);
    let request = flow.prepare(name, &BuildOptions::new())?;
    let artifact = request.bitstream_artifact();
    info!("bitstream sha256: {}", products.digest(&artifact)?);

    flow.program(&products)?;
    println!("programmed '{name}' onto {}", platform.name());
    Ok(())
}
