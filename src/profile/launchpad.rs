//! Launchpad Mini Mk3
//!
//! 9x9 grid: 8x8 RGB pads, a top row of arrow/mode buttons and a right
//! column of scene launch buttons. The outer row and column are addressed
//! with Control Change, the pads with Note On. Mode, layout and fader
//! configuration go through SysEx on the DAW port.

use super::{ChannelPorts, DeviceFamily, DeviceProfile, PortNames};
use crate::color::ColorScheme;

/// Palette entries (velocity codes). The full table lives in the
/// Programmer's Reference Manual.
pub mod palette {
    pub const OFF: u8 = 0;
    pub const WHITE_LOW: u8 = 1;
    pub const WHITE_MID: u8 = 2;
    pub const WHITE_HIGH: u8 = 3;
    pub const RED: u8 = 5;
    pub const YELLOW: u8 = 13;
    pub const GREEN: u8 = 21;
}

/// Buttons addressed through Control Change
pub mod controls {
    pub const UP: u8 = 91;
    pub const DOWN: u8 = 92;
    pub const LEFT: u8 = 93;
    pub const RIGHT: u8 = 94;
    pub const SESSION: u8 = 95;
    pub const DRUMS: u8 = 96;
    pub const KEYS: u8 = 97;
    pub const USER: u8 = 98;
    pub const LOGO: u8 = 99;
    pub const SCENE1: u8 = 89;
    pub const SCENE2: u8 = 79;
    pub const SCENE3: u8 = 69;
    pub const SCENE4: u8 = 59;
    pub const SCENE5: u8 = 49;
    pub const SCENE6: u8 = 39;
    pub const SCENE7: u8 = 29;
    pub const STOP_MUTE_SOLO: u8 = 19;

    pub const ALL: [u8; 17] = [
        UP,
        DOWN,
        LEFT,
        RIGHT,
        SESSION,
        DRUMS,
        KEYS,
        USER,
        LOGO,
        SCENE1,
        SCENE2,
        SCENE3,
        SCENE4,
        SCENE5,
        SCENE6,
        SCENE7,
        STOP_MUTE_SOLO,
    ];
}

/// SysEx opcodes (first payload byte after the prefix)
pub mod opcode {
    pub const LAYOUT: u8 = 0x00;
    pub const FADERS: u8 = 0x01;
    pub const LED_LIGHTING: u8 = 0x03;
    pub const SLEEP: u8 = 0x09;
    pub const PROGRAMMER_MODE: u8 = 0x0E;
    pub const DAW_MODE: u8 = 0x10;
    pub const DAW_CLEAR: u8 = 0x12;
    pub const SESSION_COLOR: u8 = 0x14;
}

/// Novation manufacturer ID, product type, Launchpad Mini Mk3 model byte
pub const SYSEX_PREFIX: [u8; 5] = [0x00, 0x20, 0x29, 0x02, 0x0D];

/// Device inquiry (universal non-realtime, all devices)
pub const DEVICE_INQUIRY: [u8; 4] = [0x7E, 0x7F, 0x06, 0x01];

/// Rows top to bottom, columns left to right
const LEDS: [[u8; 9]; 9] = [
    [91, 92, 93, 94, 95, 96, 97, 98, 99],
    [81, 82, 83, 84, 85, 86, 87, 88, 89],
    [71, 72, 73, 74, 75, 76, 77, 78, 79],
    [61, 62, 63, 64, 65, 66, 67, 68, 69],
    [51, 52, 53, 54, 55, 56, 57, 58, 59],
    [41, 42, 43, 44, 45, 46, 47, 48, 49],
    [31, 32, 33, 34, 35, 36, 37, 38, 39],
    [21, 22, 23, 24, 25, 26, 27, 28, 29],
    [11, 12, 13, 14, 15, 16, 17, 18, 19],
];

pub fn launchpad_mini_mk3() -> DeviceProfile {
    DeviceProfile {
        model: "Launchpad Mini".to_string(),
        version: "Mk3".to_string(),
        display_name: "Launchpad Mini MK3".to_string(),
        family: DeviceFamily::Grid,
        ports: PortNames {
            musical: ChannelPorts {
                input: "LPMiniMK3 MIDI Out".to_string(),
                output: "LPMiniMK3 MIDI In".to_string(),
            },
            control: ChannelPorts {
                input: "LPMiniMK3 DAW Out".to_string(),
                output: "LPMiniMK3 DAW In".to_string(),
            },
        },
        led_table: LEDS.iter().map(|row| row.to_vec()).collect(),
        control_addresses: controls::ALL.to_vec(),
        led_channel: 0,
        color_scheme: ColorScheme::RawRgb,
        sysex_prefix: SYSEX_PREFIX.to_vec(),
        mode_toggle: None,
        fader_lanes: 8,
    }
}
