//! Error types for the controller driver

use thiserror::Error;

use crate::midi::format_hex;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// One or more qualified port names were absent at connect time
    #[error("port not found: {}", .0.join(", "))]
    PortNotFound(Vec<String>),

    /// A data byte, channel or lane index is outside protocol bounds
    #[error("{what} out of range: {value} (max {max})")]
    InvalidRange { what: &'static str, value: u8, max: u8 },

    /// Coordinate outside the device's LED grid
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("controller is not connected")]
    NotConnected,

    #[error("unrecognized MIDI frame: {}", format_hex(.raw))]
    UnknownMessage { raw: Vec<u8> },

    /// Command not part of the device's command set
    #[error("{command} is not supported by {device}")]
    Unsupported { command: &'static str, device: String },

    #[error("transport error: {0}")]
    Transport(String),
}

impl From<midir::InitError> for Error {
    fn from(e: midir::InitError) -> Self {
        Error::Transport(e.to_string())
    }
}

impl From<midir::SendError> for Error {
    fn from(e: midir::SendError) -> Self {
        Error::Transport(e.to_string())
    }
}

impl From<midir::ConnectError<midir::MidiInput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiInput>) -> Self {
        Error::Transport(e.to_string())
    }
}

impl From<midir::ConnectError<midir::MidiOutput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiOutput>) -> Self {
        Error::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
