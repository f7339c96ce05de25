//! MIDI wire codec
//!
//! Converts raw frames received from the controller into typed messages and
//! encodes outbound commands back into wire bytes.

pub mod running_status;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

pub use running_status::RunningStatus;

/// Highest value a MIDI data byte may carry
pub const DATA_MAX: u8 = 0x7F;

/// Highest MIDI channel number (zero based)
pub const CHANNEL_MAX: u8 = 0x0F;

const SYSEX_START: u8 = 0xF0;
const SYSEX_END: u8 = 0xF7;

/// Channel used by the keyboard pads outside of extended mode
pub const PAD_CHANNEL: u8 = 9;

/// Logical endpoint a frame travelled through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortRole {
    /// Musical notes (keys, pads in standard mode)
    Musical,
    /// Device and session control (InControl / DAW port)
    Control,
}

impl PortRole {
    pub const ALL: [PortRole; 2] = [PortRole::Musical, PortRole::Control];

    pub fn as_str(&self) -> &'static str {
        match self {
            PortRole::Musical => "musical",
            PortRole::Control => "control",
        }
    }
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message classification, derived from the status byte only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    NoteOff,
    NoteOn,
    ControlChange,
    /// Note On on the pad channel (status 0x99)
    PadNoteOn,
    /// Note Off on the pad channel (status 0x89)
    PadNoteOff,
    /// Complete system exclusive frame
    SysEx,
    Unknown,
}

/// A decoded MIDI frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiMessage {
    pub kind: MessageKind,
    /// Channel (0-15), 0 for system messages
    pub channel: u8,
    /// Note or controller number (0-127)
    pub data1: u8,
    /// Velocity or value (0-127)
    pub data2: u8,
    /// Bytes as received
    pub raw: Vec<u8>,
    pub origin: PortRole,
}

impl MidiMessage {
    /// Decode a raw frame received on `origin`.
    ///
    /// Never fails: frames that are not one of the supported kinds, or that
    /// are malformed, decode to [`MessageKind::Unknown`] with `raw` preserved.
    pub fn decode(raw: &[u8], origin: PortRole) -> Self {
        let mut message = MidiMessage {
            kind: MessageKind::Unknown,
            channel: 0,
            data1: 0,
            data2: 0,
            raw: raw.to_vec(),
            origin,
        };

        let Some(&status) = raw.first() else {
            return message;
        };

        if status == SYSEX_START {
            if is_complete_sysex(raw) {
                message.kind = MessageKind::SysEx;
            }
            return message;
        }

        let kind = match status {
            0x99 => MessageKind::PadNoteOn,
            0x89 => MessageKind::PadNoteOff,
            _ => match status & 0xF0 {
                0x80 => MessageKind::NoteOff,
                0x90 => MessageKind::NoteOn,
                0xB0 => MessageKind::ControlChange,
                _ => return message,
            },
        };

        // Channel voice frames are exactly three bytes with 7-bit data
        if let [_, data1, data2] = *raw {
            if data1 <= DATA_MAX && data2 <= DATA_MAX {
                message.kind = kind;
                message.channel = status & 0x0F;
                message.data1 = data1;
                message.data2 = data2;
            }
        }

        message
    }

    pub fn is_unknown(&self) -> bool {
        self.kind == MessageKind::Unknown
    }

    /// Turn an unrecognized message into [`Error::UnknownMessage`]
    pub fn known(self) -> Result<Self> {
        if self.is_unknown() {
            Err(Error::UnknownMessage { raw: self.raw })
        } else {
            Ok(self)
        }
    }

    /// Payload of a SysEx frame carrying `prefix` right after 0xF0
    pub fn sysex_payload(&self, prefix: &[u8]) -> Option<&[u8]> {
        if self.kind != MessageKind::SysEx {
            return None;
        }
        let body = &self.raw[1..self.raw.len() - 1];
        body.strip_prefix(prefix)
    }

    /// The command that would produce this message on the wire.
    ///
    /// Pad kinds map back to plain notes on the pad channel.
    pub fn to_command(&self) -> Option<Command> {
        let (channel, data1, data2) = (self.channel, self.data1, self.data2);
        match self.kind {
            MessageKind::NoteOn | MessageKind::PadNoteOn => Some(Command::NoteOn {
                channel,
                note: data1,
                velocity: data2,
            }),
            MessageKind::NoteOff | MessageKind::PadNoteOff => Some(Command::NoteOff {
                channel,
                note: data1,
                velocity: data2,
            }),
            MessageKind::ControlChange => Some(Command::ControlChange {
                channel,
                controller: data1,
                value: data2,
            }),
            MessageKind::SysEx | MessageKind::Unknown => None,
        }
    }
}

impl fmt::Display for MidiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MessageKind::NoteOff => write!(
                f,
                "NoteOff ch:{} n:{} v:{}",
                self.channel + 1,
                self.data1,
                self.data2
            ),
            MessageKind::NoteOn => write!(
                f,
                "NoteOn ch:{} n:{} v:{}",
                self.channel + 1,
                self.data1,
                self.data2
            ),
            MessageKind::PadNoteOff => write!(f, "PadOff n:{} v:{}", self.data1, self.data2),
            MessageKind::PadNoteOn => write!(f, "PadOn n:{} v:{}", self.data1, self.data2),
            MessageKind::ControlChange => write!(
                f,
                "CC ch:{} cc:{} v:{}",
                self.channel + 1,
                self.data1,
                self.data2
            ),
            MessageKind::SysEx => write!(f, "SysEx {} bytes", self.raw.len()),
            MessageKind::Unknown => write!(f, "Unknown [{}]", format_hex(&self.raw)),
        }
    }
}

/// Semantic outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    /// Vendor SysEx, sent behind the profile prefix
    SysEx { payload: Vec<u8> },
    /// Universal SysEx (e.g. device inquiry), sent without a vendor prefix
    UniversalSysEx { payload: Vec<u8> },
}

impl Command {
    /// Encode to wire bytes. `sysex_prefix` is inserted after 0xF0 for
    /// vendor SysEx frames.
    pub fn encode(&self, sysex_prefix: &[u8]) -> Result<Vec<u8>> {
        match self {
            Command::NoteOff {
                channel,
                note,
                velocity,
            } => channel_voice(0x80, *channel, *note, *velocity),
            Command::NoteOn {
                channel,
                note,
                velocity,
            } => channel_voice(0x90, *channel, *note, *velocity),
            Command::ControlChange {
                channel,
                controller,
                value,
            } => channel_voice(0xB0, *channel, *controller, *value),
            Command::SysEx { payload } => {
                check_bytes("sysex prefix byte", sysex_prefix)?;
                check_bytes("sysex payload byte", payload)?;
                let mut frame = Vec::with_capacity(sysex_prefix.len() + payload.len() + 2);
                frame.push(SYSEX_START);
                frame.extend_from_slice(sysex_prefix);
                frame.extend_from_slice(payload);
                frame.push(SYSEX_END);
                Ok(frame)
            }
            Command::UniversalSysEx { payload } => {
                check_bytes("sysex payload byte", payload)?;
                let mut frame = Vec::with_capacity(payload.len() + 2);
                frame.push(SYSEX_START);
                frame.extend_from_slice(payload);
                frame.push(SYSEX_END);
                Ok(frame)
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::NoteOn {
                channel,
                note,
                velocity,
            } => write!(f, "NoteOn ch:{} n:{} v:{}", channel + 1, note, velocity),
            Command::NoteOff {
                channel,
                note,
                velocity,
            } => write!(f, "NoteOff ch:{} n:{} v:{}", channel + 1, note, velocity),
            Command::ControlChange {
                channel,
                controller,
                value,
            } => write!(f, "CC ch:{} cc:{} v:{}", channel + 1, controller, value),
            Command::SysEx { payload } => write!(f, "SysEx [{}]", format_hex(payload)),
            Command::UniversalSysEx { payload } => {
                write!(f, "Universal SysEx [{}]", format_hex(payload))
            }
        }
    }
}

fn channel_voice(status: u8, channel: u8, data1: u8, data2: u8) -> Result<Vec<u8>> {
    let channel = check_channel(channel)?;
    Ok(vec![
        status | channel,
        check_data("data byte", data1)?,
        check_data("data byte", data2)?,
    ])
}

fn is_complete_sysex(raw: &[u8]) -> bool {
    raw.len() >= 2
        && raw[raw.len() - 1] == SYSEX_END
        && raw[1..raw.len() - 1].iter().all(|&b| b <= DATA_MAX)
}

/// Reject a data byte above 127
pub fn check_data(what: &'static str, value: u8) -> Result<u8> {
    if value > DATA_MAX {
        return Err(Error::InvalidRange {
            what,
            value,
            max: DATA_MAX,
        });
    }
    Ok(value)
}

/// Reject a channel above 15
pub fn check_channel(channel: u8) -> Result<u8> {
    if channel > CHANNEL_MAX {
        return Err(Error::InvalidRange {
            what: "channel",
            value: channel,
            max: CHANNEL_MAX,
        });
    }
    Ok(channel)
}

fn check_bytes(what: &'static str, bytes: &[u8]) -> Result<()> {
    bytes.iter().try_for_each(|&b| check_data(what, b).map(|_| ()))
}

/// Format MIDI bytes as hex string for debugging
pub fn format_hex(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NOVATION: [u8; 5] = [0x00, 0x20, 0x29, 0x02, 0x0D];

    #[test]
    fn test_note_on_parsing() {
        let msg = MidiMessage::decode(&[0x90, 60, 100], PortRole::Control);

        assert_eq!(msg.kind, MessageKind::NoteOn);
        assert_eq!(msg.channel, 0);
        assert_eq!(msg.data1, 60);
        assert_eq!(msg.data2, 100);
        assert_eq!(msg.origin, PortRole::Control);
    }

    #[test]
    fn test_note_on_velocity_zero_stays_note_on() {
        let msg = MidiMessage::decode(&[0x90, 60, 0], PortRole::Musical);
        assert_eq!(msg.kind, MessageKind::NoteOn);
        assert_eq!(msg.data2, 0);
    }

    #[test]
    fn test_control_change() {
        let msg = MidiMessage::decode(&[0xB2, 21, 64], PortRole::Musical);
        assert_eq!(msg.kind, MessageKind::ControlChange);
        assert_eq!((msg.channel, msg.data1, msg.data2), (2, 21, 64));
    }

    #[test]
    fn test_pad_variants_take_precedence() {
        let on = MidiMessage::decode(&[0x99, 36, 90], PortRole::Musical);
        assert_eq!(on.kind, MessageKind::PadNoteOn);
        assert_eq!(on.channel, PAD_CHANNEL);

        let off = MidiMessage::decode(&[0x89, 36, 0], PortRole::Musical);
        assert_eq!(off.kind, MessageKind::PadNoteOff);

        // Other channels keep the generic kinds
        let other = MidiMessage::decode(&[0x98, 36, 90], PortRole::Musical);
        assert_eq!(other.kind, MessageKind::NoteOn);
    }

    #[test]
    fn test_unsupported_status_is_unknown() {
        let msg = MidiMessage::decode(&[0xA0, 1, 1], PortRole::Control);
        assert_eq!(msg.kind, MessageKind::Unknown);
        assert_eq!(msg.raw, vec![0xA0, 1, 1]);
        assert!(matches!(
            msg.known(),
            Err(Error::UnknownMessage { raw }) if raw == vec![0xA0, 1, 1]
        ));
    }

    #[test]
    fn test_malformed_frames_are_unknown() {
        let cases: [&[u8]; 6] = [
            &[],
            &[0x90, 60],
            &[0x90, 60, 100, 1],
            &[0x90, 0x80, 100],
            &[60, 100],
            &[0xF0, 0x00, 0x20],
        ];
        for raw in cases {
            let msg = MidiMessage::decode(raw, PortRole::Musical);
            assert!(msg.is_unknown(), "{:?} should not decode", raw);
            assert_eq!((msg.data1, msg.data2), (0, 0));
        }
    }

    #[test]
    fn test_sysex_payload() {
        let raw = [0xF0, 0x00, 0x20, 0x29, 0x02, 0x0D, 0x10, 0x01, 0xF7];
        let msg = MidiMessage::decode(&raw, PortRole::Control);

        assert_eq!(msg.kind, MessageKind::SysEx);
        assert_eq!(msg.sysex_payload(&NOVATION), Some(&[0x10, 0x01][..]));
        assert_eq!(msg.sysex_payload(&[0x7E]), None);
    }

    #[test]
    fn test_encode_channel_voice() {
        let note = Command::NoteOn {
            channel: 0,
            note: 12,
            velocity: 127,
        };
        assert_eq!(note.encode(&[]).unwrap(), vec![0x90, 12, 127]);

        let cc = Command::ControlChange {
            channel: 2,
            controller: 91,
            value: 5,
        };
        assert_eq!(cc.encode(&[]).unwrap(), vec![0xB2, 91, 5]);
    }

    #[test]
    fn test_encode_sysex_with_prefix() {
        let cmd = Command::SysEx {
            payload: vec![0x0E, 0x01],
        };
        assert_eq!(
            cmd.encode(&NOVATION).unwrap(),
            vec![0xF0, 0x00, 0x20, 0x29, 0x02, 0x0D, 0x0E, 0x01, 0xF7]
        );

        let inquiry = Command::UniversalSysEx {
            payload: vec![0x7E, 0x7F, 0x06, 0x01],
        };
        assert_eq!(
            inquiry.encode(&NOVATION).unwrap(),
            vec![0xF0, 0x7E, 0x7F, 0x06, 0x01, 0xF7]
        );
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        let bad_channel = Command::NoteOn {
            channel: 16,
            note: 1,
            velocity: 1,
        };
        assert_eq!(
            bad_channel.encode(&[]),
            Err(Error::InvalidRange {
                what: "channel",
                value: 16,
                max: 15
            })
        );

        let bad_value = Command::ControlChange {
            channel: 0,
            controller: 0,
            value: 128,
        };
        assert!(matches!(
            bad_value.encode(&[]),
            Err(Error::InvalidRange { value: 128, .. })
        ));

        let bad_sysex = Command::SysEx {
            payload: vec![0x01, 0xF7],
        };
        assert!(matches!(
            bad_sysex.encode(&NOVATION),
            Err(Error::InvalidRange { value: 0xF7, .. })
        ));
    }

    fn channel_voice_command() -> impl Strategy<Value = Command> {
        (0u8..3, 0u8..=15, 0u8..=127, 0u8..=127).prop_map(|(kind, channel, d1, d2)| match kind {
            0 => Command::NoteOn {
                channel,
                note: d1,
                velocity: d2,
            },
            1 => Command::NoteOff {
                channel,
                note: d1,
                velocity: d2,
            },
            _ => Command::ControlChange {
                channel,
                controller: d1,
                value: d2,
            },
        })
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(cmd in channel_voice_command()) {
            let bytes = cmd.encode(&[]).unwrap();
            let decoded = MidiMessage::decode(&bytes, PortRole::Control);
            prop_assert_eq!(&decoded.raw, &bytes);
            prop_assert_eq!(decoded.to_command(), Some(cmd));
        }

        #[test]
        fn prop_decode_never_leaks_high_bytes(raw in proptest::collection::vec(any::<u8>(), 0..8)) {
            let msg = MidiMessage::decode(&raw, PortRole::Musical);
            prop_assert!(msg.data1 <= DATA_MAX);
            prop_assert!(msg.data2 <= DATA_MAX);
            prop_assert_eq!(msg.raw, raw);
        }
    }
}
