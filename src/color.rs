//! Color quantization
//!
//! Maps a continuous color intent onto the codes a controller understands.
//! Bi-color devices (red/green LEDs) use an additive level table, RGB devices
//! take raw 7-bit components.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::midi::DATA_MAX;

/// Number of brightness steps per LED die on bi-color devices
pub const LEVELS: usize = 4;

/// Requested color, each component in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct ColorIntent {
    pub red: f32,
    pub green: f32,
    #[serde(default)]
    pub blue: f32,
}

impl ColorIntent {
    pub const OFF: ColorIntent = ColorIntent::rgb(0.0, 0.0, 0.0);
    pub const FULL: ColorIntent = ColorIntent::rgb(1.0, 1.0, 1.0);

    /// Two-component intent for red/green devices
    pub const fn rg(red: f32, green: f32) -> Self {
        Self {
            red,
            green,
            blue: 0.0,
        }
    }

    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Same intensity on every component
    pub const fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }
}

/// Color encoding strategy of a device
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum ColorScheme {
    /// Velocity code = `red_levels[r] + green_levels[g]`
    QuantizedAdditive {
        red_levels: [u8; LEVELS],
        green_levels: [u8; LEVELS],
    },
    /// Three 7-bit components, sent through SysEx
    RawRgb,
}

/// Device-level color produced by a [`ColorScheme`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceColor {
    /// Single velocity/palette code
    Code(u8),
    /// Red, green, blue, each 0-127
    Rgb([u8; 3]),
}

impl ColorScheme {
    /// Red/green table of the Launchkey Mini: red steps by 1, green by 16
    pub const fn red_green() -> Self {
        ColorScheme::QuantizedAdditive {
            red_levels: [0, 1, 2, 3],
            green_levels: [0, 16, 32, 48],
        }
    }

    pub fn quantize(&self, intent: ColorIntent) -> DeviceColor {
        match self {
            ColorScheme::QuantizedAdditive {
                red_levels,
                green_levels,
            } => {
                let red = red_levels[level_index(intent.red)];
                let green = green_levels[level_index(intent.green)];
                DeviceColor::Code(red.saturating_add(green))
            }
            ColorScheme::RawRgb => DeviceColor::Rgb([
                to_7bit(intent.red),
                to_7bit(intent.green),
                to_7bit(intent.blue),
            ]),
        }
    }

    pub fn is_rgb(&self) -> bool {
        matches!(self, ColorScheme::RawRgb)
    }

    /// Check that every code the table can produce is a valid data byte and
    /// that levels never decrease.
    pub fn validate(&self) -> Result<()> {
        let ColorScheme::QuantizedAdditive {
            red_levels,
            green_levels,
        } = self
        else {
            return Ok(());
        };

        for levels in [red_levels, green_levels] {
            if levels.windows(2).any(|w| w[0] > w[1]) {
                return Err(Error::InvalidRange {
                    what: "color level order",
                    value: levels[LEVELS - 1],
                    max: DATA_MAX,
                });
            }
        }

        let max = red_levels[LEVELS - 1].saturating_add(green_levels[LEVELS - 1]);
        if max > DATA_MAX {
            return Err(Error::InvalidRange {
                what: "color code",
                value: max,
                max: DATA_MAX,
            });
        }
        Ok(())
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn level_index(value: f32) -> usize {
    ((clamp_unit(value) * 3.0).floor() as usize).min(LEVELS - 1)
}

/// Scale a unit intensity to 0-127
pub fn to_7bit(value: f32) -> u8 {
    (clamp_unit(value) * DATA_MAX as f32).round() as u8
}
