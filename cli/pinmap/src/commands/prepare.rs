//! `pinmap prepare` — build request preparation.

use std::path::Path;

use anyhow::{bail, Result};
use pinmap_toolchain::{prepare, BuildOptions};

use super::load_platform;

/// Merge board and caller options and print the prepared request.
pub fn run(path: &Path, name: &str, raw_options: &[String], json: bool) -> Result<()> {
    let (_, platform) = load_platform(path)?;

    let mut caller = BuildOptions::new();
    for raw in raw_options {
        let Some((key, value)) = raw.split_once('=') else {
            bail!("malformed option '{raw}' (expected key=value)");
        };
        caller.set(key, value);
    }

    let request = prepare(&platform, name, &caller)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    println!("=== Build request: {} ===", request.design);
    println!("Part:     {}", request.part);
    println!("Family:   {}", request.family);
    if let Some(clk) = &request.default_clock {
        println!("Clock:    {clk}");
    }
    if let Some(rst) = &request.default_reset {
        println!("Reset:    {rst}");
    }
    println!("Bitstream: {}", request.bitstream_artifact());
    if !request.options.is_empty() {
        println!();
        println!("--- Options ---");
        for (key, value) in request.options.iter() {
            println!("  {key} = {value}");
        }
    }
    Ok(())
}
