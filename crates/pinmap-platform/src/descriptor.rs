//! Board descriptor files (`*.board.toml`).
//!
//! A descriptor is the declarative, per-board input of this crate: part
//! and family ids, default clock/reset names, programmer configuration,
//! board-mandatory toolchain options, and the resource and connector
//! tables. Boards are swappable without touching any code; this module
//! turns a descriptor into a validated [`Platform`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attrs::{Attrs, AttrValue};
use crate::connector::Connector;
use crate::error::{PlatformError, Result};
use crate::platform::{BoardInfo, Platform, ProgrammerInfo, DEFAULT_PROGRAMMER};
use crate::resource::{
    expand_numbered, Binding, DiffPairs, Dir, Pins, Resource, Subsignal,
};

/// Parsed board descriptor, one-to-one with the TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BoardDescriptor {
    pub name: String,
    pub part: String,
    pub family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_clock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_reset: Option<String>,
    #[serde(default)]
    pub programmer: ProgrammerDesc,
    /// Toolchain options the board always applies.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default_attrs: BTreeMap<String, AttrValue>,
    #[serde(default)]
    pub resources: Vec<ResourceDesc>,
    #[serde(default)]
    pub connectors: Vec<ConnectorDesc>,
}

/// `[programmer]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProgrammerDesc {
    #[serde(default = "default_programmer_binary")]
    pub binary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
}

impl Default for ProgrammerDesc {
    fn default() -> Self {
        ProgrammerDesc {
            binary: default_programmer_binary(),
            board: None,
        }
    }
}

fn default_programmer_binary() -> String {
    DEFAULT_PROGRAMMER.to_string()
}

/// One `[[resources]]` entry. Exactly one of `pins`, `pos`/`neg`, or
/// `subsignals` supplies the binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ResourceDesc {
    pub name: String,
    #[serde(default)]
    pub index: u32,
    /// Expand a multi-pin spec into one indexed resource per pin.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub numbered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pins: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<Dir>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub invert: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_hz: Option<u64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, AttrValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsignals: Vec<SubsignalDesc>,
}

/// One `[[resources.subsignals]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SubsignalDesc {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pins: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<Dir>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub invert: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, AttrValue>,
}

/// One `[[connectors]]` entry; `pins` is a whitespace-separated table
/// with `-` marking unconnected positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConnectorDesc {
    pub name: String,
    pub index: u32,
    pub pins: String,
}

impl BoardDescriptor {
    /// Build and validate an immutable [`Platform`] from this descriptor.
    pub fn to_platform(&self) -> Result<Platform> {
        let mut resources = Vec::new();
        for desc in &self.resources {
            resources.extend(build_resource(desc)?);
        }
        let connectors = self
            .connectors
            .iter()
            .map(|c| Connector::from_table(c.name.clone(), c.index, &c.pins))
            .collect();
        let info = BoardInfo {
            name: self.name.clone(),
            part: self.part.clone(),
            family: self.family.clone(),
            default_clock: self.default_clock.clone(),
            default_reset: self.default_reset.clone(),
            programmer: ProgrammerInfo {
                binary: self.programmer.binary.clone(),
                board: self.programmer.board.clone(),
            },
            options: self.options.clone(),
            default_attrs: to_attrs(&self.default_attrs),
        };
        Platform::new(info, resources, connectors)
    }
}

/// Load a board descriptor from a `*.board.toml` file.
pub fn load_board_toml(path: &Path) -> Result<BoardDescriptor> {
    if !path.exists() {
        return Err(PlatformError::DescriptorNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_board_toml(&content)
}

/// Parse a board descriptor from a TOML string.
pub fn parse_board_toml(toml_str: &str) -> Result<BoardDescriptor> {
    let descriptor: BoardDescriptor = toml::from_str(toml_str)?;
    Ok(descriptor)
}

/// Serialize a board descriptor to pretty TOML.
pub fn board_to_toml(descriptor: &BoardDescriptor) -> Result<String> {
    let toml_str = toml::to_string_pretty(descriptor)?;
    Ok(toml_str)
}

fn to_attrs(map: &BTreeMap<String, AttrValue>) -> Attrs {
    map.iter().map(|(k, v)| (k.as_str(), v.clone())).collect()
}

fn build_resource(desc: &ResourceDesc) -> Result<Vec<Resource>> {
    let attrs = to_attrs(&desc.attrs);
    let sources = usize::from(desc.pins.is_some())
        + usize::from(desc.pos.is_some() || desc.neg.is_some())
        + usize::from(!desc.subsignals.is_empty());
    if sources != 1 {
        return Err(validation(format!(
            "resource '{}': exactly one of pins, pos/neg, or subsignals is required",
            desc.name
        )));
    }

    if desc.numbered {
        let pins = desc.pins.as_deref().ok_or_else(|| {
            validation(format!(
                "resource '{}': numbered expansion requires a pins list",
                desc.name
            ))
        })?;
        if desc.index != 0 {
            return Err(validation(format!(
                "resource '{}': numbered resources assign their own indices",
                desc.name
            )));
        }
        if desc.clock_hz.is_some() {
            return Err(validation(format!(
                "resource '{}': numbered expansion cannot carry clock-hz",
                desc.name
            )));
        }
        return expand_numbered(
            &desc.name,
            pins,
            desc.dir.unwrap_or(Dir::Bidir),
            desc.invert,
            &attrs,
        );
    }

    let mut resource = if desc.subsignals.is_empty() {
        let binding = build_binding(
            &desc.name,
            desc.pins.as_deref(),
            desc.pos.as_deref(),
            desc.neg.as_deref(),
            desc.dir.unwrap_or(Dir::Bidir),
            desc.invert,
        )?;
        Resource::single(desc.name.clone(), desc.index, binding, attrs)
    } else {
        let subsignals = desc
            .subsignals
            .iter()
            .map(build_subsignal)
            .collect::<Result<Vec<_>>>()?;
        Resource::grouped(desc.name.clone(), desc.index, subsignals, attrs)
    };
    if let Some(hz) = desc.clock_hz {
        resource = resource.with_clock(hz);
    }
    Ok(vec![resource])
}

fn build_subsignal(desc: &SubsignalDesc) -> Result<Subsignal> {
    Ok(Subsignal {
        name: desc.name.clone(),
        binding: build_binding(
            &desc.name,
            desc.pins.as_deref(),
            desc.pos.as_deref(),
            desc.neg.as_deref(),
            desc.dir.unwrap_or(Dir::Bidir),
            desc.invert,
        )?,
        attrs: to_attrs(&desc.attrs),
    })
}

fn build_binding(
    name: &str,
    pins: Option<&str>,
    pos: Option<&str>,
    neg: Option<&str>,
    dir: Dir,
    invert: bool,
) -> Result<Binding> {
    match (pins, pos, neg) {
        (Some(pins), None, None) => Ok(Binding::Pins(Pins::parse(pins, dir, invert)?)),
        (None, Some(pos), Some(neg)) => {
            Ok(Binding::DiffPairs(DiffPairs::parse(pos, neg, dir, invert)?))
        }
        (None, Some(_), None) | (None, None, Some(_)) => Err(validation(format!(
            "signal '{name}': differential binding needs both pos and neg"
        ))),
        _ => Err(validation(format!(
            "signal '{name}': exactly one of pins or pos/neg is required"
        ))),
    }
}

fn validation(detail: String) -> PlatformError {
    PlatformError::Validation { detail }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::AttrKey;

    const MINIMAL: &str = r#"
name = "mini"
part = "GW1N-LV1QN48C6/I5"
family = "GW1N-1"
default-clock = "clk"

[programmer]
board = "tangnano"

[options]
add_options = "set_option -use_sspi_as_gpio 1"

[[resources]]
name = "clk"
pins = "35"
dir = "input"
clock-hz = 24000000
attrs = { IO_TYPE = "LVCMOS33" }

[[resources]]
name = "led"
numbered = true
pins = "16 17 18"
dir = "output"
invert = true
attrs = { IO_TYPE = "LVCMOS33" }

[[resources]]
name = "uart"
attrs = { IO_TYPE = "LVCMOS33" }

[[resources.subsignals]]
name = "rx"
pins = "j:1:2"
dir = "input"
attrs = { PULL_MODE = "UP" }

[[resources.subsignals]]
name = "tx"
pins = "j:1:3"
dir = "output"

[[connectors]]
name = "j"
index = 1
pins = "- - 40 41 42"
"#;

    #[test]
    fn parse_minimal_descriptor() {
        let descriptor = parse_board_toml(MINIMAL).unwrap();
        assert_eq!(descriptor.name, "mini");
        assert_eq!(descriptor.resources.len(), 3);
        assert_eq!(descriptor.connectors.len(), 1);
        assert_eq!(descriptor.programmer.binary, "openFPGALoader");
        assert_eq!(descriptor.programmer.board.as_deref(), Some("tangnano"));
    }

    #[test]
    fn build_platform_from_descriptor() {
        let platform = parse_board_toml(MINIMAL).unwrap().to_platform().unwrap();
        assert_eq!(platform.part(), "GW1N-LV1QN48C6/I5");
        assert_eq!(platform.default_clock(), Some("clk"));
        // numbered expansion produced led 0..2
        assert!(platform.lookup("led", 2).is_ok());
        assert!(platform.lookup("led", 3).is_err());
        // clock constraint survives
        assert_eq!(platform.lookup("clk", 0).unwrap().clock_hz, Some(24_000_000));
        // subsignal pins resolve through the connector
        let uart = platform.resolve_resource("uart", 0).unwrap();
        let rx = &uart.signals[0];
        assert_eq!(rx.name, "rx");
        assert_eq!(rx.pins, vec!["40"]);
        assert_eq!(
            rx.attrs.get(&AttrKey::PullMode),
            Some(&AttrValue::Str("UP".into()))
        );
        assert_eq!(
            rx.attrs.get(&AttrKey::IoType),
            Some(&AttrValue::Str("LVCMOS33".into()))
        );
    }

    #[test]
    fn round_trip() {
        let descriptor = parse_board_toml(MINIMAL).unwrap();
        let serialized = board_to_toml(&descriptor).unwrap();
        let reparsed = parse_board_toml(&serialized).unwrap();
        assert_eq!(descriptor, reparsed);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_board_toml("this is not toml [[[").is_err());
    }

    #[test]
    fn unknown_field_rejected() {
        let toml_str = r#"
name = "x"
part = "p"
family = "f"
bogus = 1
"#;
        assert!(matches!(
            parse_board_toml(toml_str),
            Err(PlatformError::Toml(_))
        ));
    }

    #[test]
    fn diff_pair_needs_both_sides() {
        let toml_str = r#"
name = "x"
part = "p"
family = "f"

[[resources]]
name = "hdmi_clk"
pos = "33"
dir = "output"
"#;
        let err = parse_board_toml(toml_str).unwrap().to_platform().unwrap_err();
        assert!(matches!(err, PlatformError::Validation { .. }));
    }

    #[test]
    fn dangling_connector_reference_fails_at_build() {
        let toml_str = r#"
name = "x"
part = "p"
family = "f"

[[resources]]
name = "a"
pins = "q:0:1"
dir = "input"
"#;
        let err = parse_board_toml(toml_str).unwrap().to_platform().unwrap_err();
        assert!(matches!(err, PlatformError::ConnectorNotFound { .. }));
    }

    #[test]
    fn load_not_found() {
        let result = load_board_toml(Path::new("/nonexistent/x.board.toml"));
        assert!(matches!(
            result,
            Err(PlatformError::DescriptorNotFound { .. })
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mini.board.toml");
        std::fs::write(&path, MINIMAL).unwrap();
        let descriptor = load_board_toml(&path).unwrap();
        assert_eq!(descriptor.name, "mini");
    }
}
