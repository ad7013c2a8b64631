//! `pinmap doctor` — programmer and descriptor diagnostics.

use std::path::Path;

use anyhow::Result;
use pinmap_platform::DEFAULT_PROGRAMMER;
use pinmap_toolchain::Programmer;

use super::load_platform;

/// Print diagnostic information; a missing programmer is reported, not
/// treated as an error.
pub fn run(board: Option<&Path>) -> Result<()> {
    println!("=== pinmap doctor ===");
    println!();
    println!("pinmap version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    match board {
        Some(path) => {
            println!("--- Board ---");
            match load_platform(path) {
                Ok((_, platform)) => {
                    println!("  descriptor: ok ({})", platform.name());
                    println!(
                        "  resources:  {}, connectors: {}",
                        platform.resources().len(),
                        platform.connectors().len()
                    );
                    let programmer = platform.programmer();
                    match &programmer.board {
                        Some(id) => println!("  programmer: {} -b {id}", programmer.binary),
                        None => println!("  programmer: {} (no board id!)", programmer.binary),
                    }
                    println!();
                    print_programmer_status(&programmer.binary);
                }
                Err(e) => {
                    println!("  descriptor: error — {e:#}");
                }
            }
        }
        None => print_programmer_status(DEFAULT_PROGRAMMER),
    }
    Ok(())
}

fn print_programmer_status(binary: &str) {
    println!("--- Programmer ---");
    if Programmer::new(binary, "probe").is_available() {
        println!("  {binary}: found");
    } else {
        println!("  {binary}: not found in PATH");
    }
}
