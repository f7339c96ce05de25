//! Launchkey Mini Mk2
//!
//! Keyboard controller with 16 bi-color pads and two round scene buttons.
//! LEDs are only addressable in extended (InControl) mode, where the pads
//! report through the InControl port as notes 96-104 and 112-120.

use super::{ChannelPorts, DeviceFamily, DeviceProfile, ModeToggle, PortNames, NOVATION_ID};
use crate::color::ColorScheme;

/// Brightness steps accepted by [`crate::commands::CommandEncoder::all_leds`]
pub mod brightness {
    pub const OFF: u8 = 0;
    pub const LOW: u8 = 1;
    pub const MID: u8 = 2;
    pub const HIGH: u8 = 3;
}

/// Rotary encoders, CC 21-28 on the musical port
pub const ROTARY: [u8; 8] = [21, 22, 23, 24, 25, 26, 27, 28];

/// Scene up/down buttons (last column of the pad grid)
pub const SCENE_UP: u8 = 104;
pub const SCENE_DOWN: u8 = 120;

/// Pad notes in standard mode, sent on the pad channel
pub const STANDARD_PADS: [[u8; 8]; 2] = [
    [40, 41, 42, 43, 48, 49, 50, 51],
    [36, 37, 38, 39, 44, 45, 46, 47],
];

const EXTENDED_LEDS: [[u8; 9]; 2] = [
    [96, 97, 98, 99, 100, 101, 102, 103, 104],
    [112, 113, 114, 115, 116, 117, 118, 119, 120],
];

pub fn launchkey_mini_mk2() -> DeviceProfile {
    DeviceProfile {
        model: "Launchkey Mini".to_string(),
        version: "Mk2".to_string(),
        display_name: "Launchkey Mini".to_string(),
        family: DeviceFamily::Keyboard,
        ports: PortNames {
            musical: ChannelPorts::both("LK Mini MIDI"),
            control: ChannelPorts::both("LK Mini InControl"),
        },
        led_table: EXTENDED_LEDS.iter().map(|row| row.to_vec()).collect(),
        control_addresses: Vec::new(),
        led_channel: 0,
        color_scheme: ColorScheme::red_green(),
        sysex_prefix: NOVATION_ID.to_vec(),
        mode_toggle: Some(ModeToggle {
            channel: 0,
            note: 12,
        }),
        fader_lanes: 0,
    }
}
