//! `pinmap board` — descriptor inspection and validation.

use std::path::Path;

use anyhow::{bail, Result};
use pinmap_platform::{board_to_toml, ResourceIo};

use super::load_platform;

/// Describe a board descriptor in detail.
pub fn describe(path: &Path, format: Option<&str>) -> Result<()> {
    let (descriptor, platform) = load_platform(path)?;

    match format {
        Some("toml") => {
            print!("{}", board_to_toml(&descriptor)?);
            return Ok(());
        }
        Some("json") => {
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
            return Ok(());
        }
        Some(other) => bail!("unknown format '{other}' (expected \"toml\" or \"json\")"),
        None => {}
    }

    println!("=== Board: {} ===", platform.name());
    println!("Part:   {}", platform.part());
    println!("Family: {}", platform.family());
    if let Some(clk) = platform.default_clock() {
        println!("Default clock: {clk}");
    }
    if let Some(rst) = platform.default_reset() {
        println!("Default reset: {rst}");
    }
    println!();

    if !platform.options().is_empty() {
        println!("--- Board toolchain options ---");
        for (key, value) in platform.options() {
            println!("  {key} = {value}");
        }
        println!();
    }

    println!("--- Resources ---");
    for resource in platform.resources().iter() {
        let resolved = platform.resolve_resource(&resource.name, resource.index)?;
        let kind = match &resource.io {
            ResourceIo::Single(_) => String::new(),
            ResourceIo::Subsignals(subs) => format!(" ({} subsignals)", subs.len()),
        };
        println!("  {} {}{kind}", resource.name, resource.index);
        for signal in &resolved.signals {
            let pins = signal.pins.join(" ");
            match &signal.neg_pins {
                Some(neg) => println!(
                    "    {:<12} {:?} p[{pins}] n[{}]",
                    signal.name,
                    signal.dir,
                    neg.join(" ")
                ),
                None => println!("    {:<12} {:?} [{pins}]", signal.name, signal.dir),
            }
        }
        if let Some(hz) = resource.clock_hz {
            println!("    clock: {hz} Hz");
        }
    }
    println!();

    println!("--- Connectors ---");
    for connector in platform.connectors().iter() {
        let table: Vec<&str> = connector
            .positions()
            .map(|(_, pin)| pin.unwrap_or("-"))
            .collect();
        println!(
            "  {} {} ({} positions): {}",
            connector.name(),
            connector.index(),
            connector.len(),
            table.join(" ")
        );
    }

    Ok(())
}

/// Validate a board descriptor; building the platform runs every check.
pub fn validate(path: &Path) -> Result<()> {
    let (_, platform) = load_platform(path)?;
    println!(
        "ok: '{}' ({} resources, {} connectors)",
        platform.name(),
        platform.resources().len(),
        platform.connectors().len()
    );
    Ok(())
}
