//! Novation GW - driver layer for Novation MIDI controllers
//!
//! Connects to a Launchkey Mini or Launchpad Mini over its two MIDI channels,
//! decodes what the device sends and encodes LED, mode and layout commands.

pub mod color;
pub mod commands;
pub mod config;
pub mod error;
pub mod midi;
pub mod monitor;
pub mod profile;
pub mod session;
pub mod transport;

pub use color::{ColorIntent, ColorScheme, DeviceColor};
pub use commands::{CommandEncoder, FaderLane, Layout, LedColor, Lighting};
pub use error::{Error, Result};
pub use midi::{Command, MessageKind, MidiMessage, PortRole};
pub use profile::{DeviceModel, DeviceProfile};
pub use session::{ConnectionState, ControllerEvent, ControllerSession};
pub use transport::{MidirTransport, Transport};
