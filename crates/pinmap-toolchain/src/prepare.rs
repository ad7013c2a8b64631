//! Build request preparation.

use log::debug;
use pinmap_platform::Platform;
use serde::Serialize;

use crate::error::{Result, ToolchainError};
use crate::options::BuildOptions;

/// A fully-merged request for the external synthesis flow: target
/// descriptor plus the combined option set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PreparedBuildRequest {
    /// Design name; also names the bitstream artifact.
    pub design: String,
    pub part: String,
    pub family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_clock: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_reset: Option<String>,
    pub options: BuildOptions,
}

impl PreparedBuildRequest {
    /// Name of the bitstream the synthesis flow produces for this design.
    pub fn bitstream_artifact(&self) -> String {
        format!("{}.fs", self.design)
    }
}

/// Merge the board's mandatory options with caller options and assemble
/// the request. Board options are never dropped; a caller value for a
/// shared key is appended after the board's.
pub fn prepare(
    platform: &Platform,
    design: &str,
    caller_options: &BuildOptions,
) -> Result<PreparedBuildRequest> {
    if design.trim().is_empty() {
        return Err(ToolchainError::InvalidDesignName {
            name: design.to_string(),
        });
    }
    let mut options: BuildOptions = platform
        .options()
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    options.append(caller_options);
    debug!(
        "prepared build request for '{design}' on {} ({} options)",
        platform.part(),
        options.len()
    );
    Ok(PreparedBuildRequest {
        design: design.to_string(),
        part: platform.part().to_string(),
        family: platform.family().to_string(),
        default_clock: platform.default_clock().map(str::to_string),
        default_reset: platform.default_reset().map(str::to_string),
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmap_platform::boards;

    #[test]
    fn request_carries_target_descriptor() {
        let platform = boards::tang_nano_20k().unwrap();
        let request = prepare(&platform, "blinky", &BuildOptions::new()).unwrap();
        assert_eq!(request.design, "blinky");
        assert_eq!(request.part, "GW2AR-LV18QN88C8/I7");
        assert_eq!(request.family, "GW2AR-18C");
        assert_eq!(request.default_clock.as_deref(), Some("clk27"));
        assert_eq!(request.default_reset.as_deref(), Some("reset"));
        assert_eq!(request.bitstream_artifact(), "blinky.fs");
    }

    #[test]
    fn board_options_always_present() {
        let platform = boards::tang_nano_20k().unwrap();
        let request = prepare(&platform, "blinky", &BuildOptions::new()).unwrap();
        assert!(request
            .options
            .get("add_options")
            .unwrap()
            .contains("-use_mspi_as_gpio 1"));
    }

    #[test]
    fn caller_options_append_after_board_options() {
        let platform = boards::tang_nano_20k().unwrap();
        let caller = BuildOptions::new()
            .with("gowin_pack_opts", "--compress")
            .with("nextpnr_opts", "--seed 7");
        let request = prepare(&platform, "blinky", &caller).unwrap();
        assert_eq!(
            request.options.get("gowin_pack_opts"),
            Some("--sspi_as_gpio --mspi_as_gpio --compress")
        );
        assert_eq!(request.options.get("nextpnr_opts"), Some("--seed 7"));
    }

    #[test]
    fn empty_design_name_rejected() {
        let platform = boards::tang_nano_20k().unwrap();
        let err = prepare(&platform, "  ", &BuildOptions::new()).unwrap_err();
        assert!(matches!(err, ToolchainError::InvalidDesignName { .. }));
    }

    #[test]
    fn request_serializes_for_export() {
        let platform = boards::tang_nano_20k().unwrap();
        let request = prepare(&platform, "blinky", &BuildOptions::new()).unwrap();
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"design\":\"blinky\""));
        assert!(json.contains("gowin_pack_opts"));
    }
}
