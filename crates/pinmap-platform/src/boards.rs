//! Reference board definitions.
//!
//! Ships as parsed-on-demand descriptor sources rather than hardcoded
//! tables, so the reference boards exercise exactly the same path as a
//! user-supplied `*.board.toml`.

use crate::descriptor::parse_board_toml;
use crate::error::Result;
use crate::platform::Platform;

/// Descriptor source for the Sipeed Tang Nano 20k (Gowin GW2AR-18C),
/// also usable as a template for new boards.
pub const TANG_NANO_20K: &str = include_str!("../boards/tang_nano_20k.board.toml");

/// Sipeed Tang Nano 20k (Gowin GW2AR-18C).
pub fn tang_nano_20k() -> Result<Platform> {
    parse_board_toml(TANG_NANO_20K)?.to_platform()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::{AttrKey, AttrValue};
    use crate::error::PlatformError;
    use crate::resource::Dir;

    #[test]
    fn descriptor_builds() {
        let platform = tang_nano_20k().unwrap();
        assert_eq!(platform.part(), "GW2AR-LV18QN88C8/I7");
        assert_eq!(platform.family(), "GW2AR-18C");
        assert_eq!(platform.default_clock(), Some("clk27"));
        assert_eq!(platform.default_reset(), Some("reset"));
        assert_eq!(platform.connectors().len(), 2);
    }

    #[test]
    fn mandatory_options_present() {
        let platform = tang_nano_20k().unwrap();
        assert!(platform.options()["add_options"].contains("-use_mspi_as_gpio 1"));
        assert!(platform.options()["gowin_pack_opts"].contains("--sspi_as_gpio"));
    }

    #[test]
    fn header_uart_resolves_through_connector() {
        let platform = tang_nano_20k().unwrap();
        let uart = platform.resolve_resource("uart", 1).unwrap();
        let rx = uart.signals.iter().find(|s| s.name == "rx").unwrap();
        let tx = uart.signals.iter().find(|s| s.name == "tx").unwrap();
        assert_eq!(rx.pins, vec!["21"]);
        assert_eq!(tx.pins, vec!["23"]);
    }

    #[test]
    fn audio_resolves_through_second_header() {
        let platform = tang_nano_20k().unwrap();
        let audio = platform.resolve_resource("audio", 0).unwrap();
        let l = audio.signals.iter().find(|s| s.name == "l").unwrap();
        let r = audio.signals.iter().find(|s| s.name == "r").unwrap();
        assert_eq!(l.pins, vec!["42"]);
        assert_eq!(r.pins, vec!["41"]);
    }

    #[test]
    fn header_placeholder_positions_stay_unconnected() {
        let platform = tang_nano_20k().unwrap();
        let resolver = platform.resolver();
        assert_eq!(resolver.resolve_spec("j:1:2").unwrap(), "4");
        assert!(matches!(
            resolver.resolve_spec("j:1:0"),
            Err(PlatformError::UnconnectedPin { .. })
        ));
        assert!(matches!(
            resolver.resolve_spec("j:1:20"),
            Err(PlatformError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn lcd_bus_keeps_declaration_order() {
        let platform = tang_nano_20k().unwrap();
        let lcd = platform.resolve_resource("lcd", 0).unwrap();
        let red = lcd.signals.iter().find(|s| s.name == "r").unwrap();
        assert_eq!(red.pins, vec!["42", "41", "40", "39", "38"]);
        assert_eq!(
            red.attrs.get(&AttrKey::Drive),
            Some(&AttrValue::Int(24))
        );
    }

    #[test]
    fn hdmi_clk_is_differential() {
        let platform = tang_nano_20k().unwrap();
        let hdmi = platform.resolve_resource("hdmi", 0).unwrap();
        let clk = hdmi.signals.iter().find(|s| s.name == "clk").unwrap();
        assert_eq!(clk.pins, vec!["33"]);
        assert_eq!(clk.neg_pins.as_deref(), Some(&["32".to_string()][..]));
        let d = hdmi.signals.iter().find(|s| s.name == "d").unwrap();
        assert_eq!(d.pins, vec!["35", "31", "29"]);
        assert_eq!(
            d.neg_pins.as_deref().unwrap(),
            &["34".to_string(), "30".to_string(), "28".to_string()][..]
        );
    }

    #[test]
    fn numbered_groups_expand() {
        let platform = tang_nano_20k().unwrap();
        for index in 0..6 {
            assert!(platform.lookup("led", index).is_ok());
        }
        assert!(platform.lookup("led", 6).is_err());
        let analog = platform.resolve_resource("analog", 3).unwrap();
        assert_eq!(analog.signals[0].pins, vec!["18"]);
        assert_eq!(analog.signals[0].dir, Dir::Bidir);
    }

    #[test]
    fn default_clock_carries_frequency() {
        let platform = tang_nano_20k().unwrap();
        assert_eq!(platform.lookup("clk27", 0).unwrap().clock_hz, Some(27_000_000));
        assert_eq!(
            platform.lookup("clk_osc", 0).unwrap().clock_hz,
            Some(250_000_000)
        );
    }
}
