//! MIDI transport seam
//!
//! The session only needs to list endpoints, open one by index, send bytes
//! and receive frames through a callback. [`hardware::MidirTransport`] is the
//! real implementation; tests plug in an in-memory one.

pub mod hardware;

use crate::error::Result;

pub use hardware::MidirTransport;

/// Callback invoked once per received frame
pub type InboundHandler = Box<dyn FnMut(&[u8]) + Send + 'static>;

/// Open input endpoint
pub trait InputHandle: Send {
    /// Stop delivering frames. A failed close leaves the handle usable for
    /// another attempt.
    fn close(&mut self) -> Result<()>;
}

/// Open output endpoint
pub trait OutputHandle: Send {
    fn send(&mut self, bytes: &[u8]) -> Result<()>;

    fn close(&mut self) -> Result<()>;
}

pub trait Transport {
    /// Names of the available input endpoints, in index order
    fn input_names(&self) -> Result<Vec<String>>;

    /// Names of the available output endpoints, in index order
    fn output_names(&self) -> Result<Vec<String>>;

    fn open_input(&mut self, index: usize, handler: InboundHandler) -> Result<Box<dyn InputHandle>>;

    fn open_output(&mut self, index: usize) -> Result<Box<dyn OutputHandle>>;
}
