//! Build flow state tracking.
//!
//! One `BuildFlow` drives a single prepare-then-program run against one
//! platform and enforces the operation order. `Failed` is terminal: a
//! device left mid-programming needs operator attention, so the flow
//! never restarts itself.

use log::warn;
use pinmap_platform::Platform;

use crate::error::{Result, ToolchainError};
use crate::options::BuildOptions;
use crate::prepare::{prepare, PreparedBuildRequest};
use crate::products::BuildProducts;
use crate::program::Programmer;

/// Lifecycle of one build-and-program run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Prepared,
    Programming,
    Done,
    Failed,
}

/// Drives prepare and program for one platform.
#[derive(Debug)]
pub struct BuildFlow<'a> {
    platform: &'a Platform,
    state: FlowState,
    request: Option<PreparedBuildRequest>,
}

impl<'a> BuildFlow<'a> {
    pub fn new(platform: &'a Platform) -> Self {
        BuildFlow {
            platform,
            state: FlowState::Idle,
            request: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn request(&self) -> Option<&PreparedBuildRequest> {
        self.request.as_ref()
    }

    /// Merge options and assemble the build request. Idle -> Prepared;
    /// on error the flow stays Idle.
    pub fn prepare(
        &mut self,
        design: &str,
        caller_options: &BuildOptions,
    ) -> Result<&PreparedBuildRequest> {
        if self.state != FlowState::Idle {
            return Err(ToolchainError::InvalidState {
                operation: "prepare",
                state: self.state,
            });
        }
        let request = prepare(self.platform, design, caller_options)?;
        self.state = FlowState::Prepared;
        Ok(self.request.insert(request))
    }

    /// Extract the bitstream and hand it to the external programmer.
    /// Prepared -> Programming, then Done on success or Failed on any
    /// error (spawn failure included). The extracted bitstream copy is
    /// removed on every path.
    pub fn program(&mut self, products: &BuildProducts) -> Result<()> {
        let request = match (&self.state, &self.request) {
            (FlowState::Prepared, Some(request)) => request.clone(),
            _ => {
                return Err(ToolchainError::InvalidState {
                    operation: "program",
                    state: self.state,
                })
            }
        };
        self.state = FlowState::Programming;
        match run_programmer(self.platform, products, &request) {
            Ok(()) => {
                self.state = FlowState::Done;
                Ok(())
            }
            Err(e) => {
                warn!("programming '{}' failed: {e}", request.design);
                self.state = FlowState::Failed;
                Err(e)
            }
        }
    }
}

fn run_programmer(
    platform: &Platform,
    products: &BuildProducts,
    request: &PreparedBuildRequest,
) -> Result<()> {
    let programmer = Programmer::for_platform(platform)?;
    let bitstream = products.extract(&request.bitstream_artifact())?;
    programmer.program(bitstream.path())
}
