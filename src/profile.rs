//! Device profiles
//!
//! Static per-model data: port names, LED address tables, color tables and
//! the SysEx prefix. A session is parameterized by one profile; the two
//! device families differ only in these tables and a few command shapes.

pub mod launchkey;
pub mod launchpad;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::ColorScheme;
use crate::error::{Error, Result};
use crate::midi::PortRole;

/// Novation manufacturer ID
pub const NOVATION_ID: [u8; 3] = [0x00, 0x20, 0x29];

/// Command set a device understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceFamily {
    /// Keyboard with InControl pads (Launchkey)
    Keyboard,
    /// Button grid with a DAW/programmer SysEx interface (Launchpad)
    Grid,
}

/// Supported controller models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceModel {
    LaunchkeyMiniMk2,
    LaunchpadMiniMk3,
}

impl DeviceModel {
    pub fn profile(&self) -> DeviceProfile {
        match self {
            DeviceModel::LaunchkeyMiniMk2 => launchkey::launchkey_mini_mk2(),
            DeviceModel::LaunchpadMiniMk3 => launchpad::launchpad_mini_mk3(),
        }
    }
}

/// Port suffixes of one logical channel.
///
/// Some devices name the two directions differently ("MIDI In"/"MIDI Out").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPorts {
    pub input: String,
    pub output: String,
}

impl ChannelPorts {
    /// Same suffix for both directions
    pub fn both(suffix: &str) -> Self {
        Self {
            input: suffix.to_string(),
            output: suffix.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortNames {
    pub musical: ChannelPorts,
    pub control: ChannelPorts,
}

/// Note that switches a keyboard between standard and extended mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeToggle {
    pub channel: u8,
    pub note: u8,
}

/// Immutable description of one controller model
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    /// Model name shown to users, without the version
    pub model: String,
    pub version: String,
    /// Prefix of every endpoint name the driver announces
    pub display_name: String,
    pub family: DeviceFamily,
    pub ports: PortNames,
    /// `led_table[y][x]` is the note/controller addressing that LED
    pub led_table: Vec<Vec<u8>>,
    /// Addresses driven by Control Change instead of Note On
    pub control_addresses: Vec<u8>,
    /// Channel used for plain LED messages
    pub led_channel: u8,
    pub color_scheme: ColorScheme,
    /// Bytes following 0xF0 in every vendor SysEx frame
    pub sysex_prefix: Vec<u8>,
    pub mode_toggle: Option<ModeToggle>,
    /// Number of DAW fader lanes, 0 if the device has no fader layout
    pub fader_lanes: u8,
}

impl DeviceProfile {
    /// Port suffixes of a logical channel
    pub fn ports(&self, role: PortRole) -> &ChannelPorts {
        match role {
            PortRole::Musical => &self.ports.musical,
            PortRole::Control => &self.ports.control,
        }
    }

    /// Endpoint name as enumerated by the transport: "{display name} {suffix}"
    pub fn qualified_name(&self, suffix: &str) -> String {
        format!("{} {}", self.display_name, suffix)
    }

    /// Grid dimensions as (width, height), width taken from the widest row
    pub fn grid_size(&self) -> (usize, usize) {
        let width = self.led_table.iter().map(Vec::len).max().unwrap_or(0);
        (width, self.led_table.len())
    }

    /// Resolve a grid coordinate to its LED address
    pub fn address(&self, x: usize, y: usize) -> Result<u8> {
        self.led_table
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .ok_or_else(|| {
                let (width, height) = self.grid_size();
                Error::OutOfBounds {
                    x,
                    y,
                    width,
                    height,
                }
            })
    }

    /// Position of an address in the grid, if it is one
    pub fn coordinate_of(&self, address: u8) -> Option<(usize, usize)> {
        self.led_table.iter().enumerate().find_map(|(y, row)| {
            row.iter().position(|&a| a == address).map(|x| (x, y))
        })
    }

    pub fn is_control_address(&self, address: u8) -> bool {
        self.control_addresses.contains(&address)
    }

    /// Replace the color strategy, e.g. from configuration
    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.model, self.version)
    }
}
