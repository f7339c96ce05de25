//! Running status compression for outbound frames
//!
//! When enabled, a channel voice frame whose status byte matches the previous
//! one is sent without it. Any system frame cancels the running status, as
//! receivers are required to do.

/// Per-output running status tracker
#[derive(Debug, Default)]
pub struct RunningStatus {
    last: Option<u8>,
}

impl RunningStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compress `frame` against the previously sent status byte
    pub fn apply(&mut self, frame: Vec<u8>) -> Vec<u8> {
        match frame.first() {
            Some(&status) if (0x80..0xF0).contains(&status) => {
                if self.last == Some(status) {
                    frame[1..].to_vec()
                } else {
                    self.last = Some(status);
                    frame
                }
            }
            _ => {
                self.last = None;
                frame
            }
        }
    }

    /// Forget the last status, e.g. after the output was reopened
    pub fn reset(&mut self) {
        self.last = None;
    }
}
