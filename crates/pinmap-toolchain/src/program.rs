//! External programmer invocation.

use std::path::Path;
use std::process::Command;

use log::{debug, info};
use pinmap_platform::Platform;

use crate::error::{Result, ToolchainError};

/// Invokes the board programmer with the fixed argument template
/// `<binary> -b <board-id> <bitstream-path>`.
#[derive(Debug, Clone)]
pub struct Programmer {
    binary: String,
    board: String,
}

impl Programmer {
    pub fn new(binary: impl Into<String>, board: impl Into<String>) -> Self {
        Programmer {
            binary: binary.into(),
            board: board.into(),
        }
    }

    /// Programmer configured by a board descriptor.
    pub fn for_platform(platform: &Platform) -> Result<Self> {
        match &platform.programmer().board {
            Some(board) => Ok(Programmer::new(&platform.programmer().binary, board)),
            None => Err(ToolchainError::ProgrammerNotConfigured {
                board: platform.name().to_string(),
            }),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Blocking call into the external programmer. Exit code 0 is
    /// success; a spawn failure or non-zero exit is reported to the
    /// caller without retry. Serializing access to the physical device
    /// is the caller's responsibility.
    pub fn program(&self, bitstream: &Path) -> Result<()> {
        info!(
            "programming: {} -b {} {}",
            self.binary,
            self.board,
            bitstream.display()
        );
        let output = Command::new(&self.binary)
            .arg("-b")
            .arg(&self.board)
            .arg(bitstream)
            .output()
            .map_err(|e| ToolchainError::ProgrammerInvocation {
                detail: format!("failed to launch '{}': {e}", self.binary),
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolchainError::ProgrammerInvocation {
                detail: format!(
                    "'{}' exited with {}: {}",
                    self.binary,
                    output.status,
                    stderr.trim()
                ),
            });
        }
        debug!("programmer finished: {}", output.status);
        Ok(())
    }

    /// Whether the programmer binary can be launched at all. Exit status
    /// is ignored; many programmers exit non-zero without a device
    /// attached.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary).arg("--help").output().is_ok()
    }
}
