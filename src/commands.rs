//! Device command encoder
//!
//! Composes device operations (mode switches, LED addressing, layout and
//! fader SysEx) into [`Command`]s for a given [`DeviceProfile`]. The encoder
//! holds no state; every operation validates its inputs and returns a typed
//! error instead of sending something the device would misread.

use crate::color::{to_7bit, ColorIntent, DeviceColor};
use crate::error::{Error, Result};
use crate::midi::{check_data, Command};
use crate::profile::launchpad::{opcode, palette, DEVICE_INQUIRY};
use crate::profile::{DeviceFamily, DeviceProfile};

/// Color passed to [`CommandEncoder::led_on`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LedColor {
    /// Quantized through the profile's color scheme
    Intensity(ColorIntent),
    /// Raw velocity/palette code, sent as is
    Code(u8),
}

impl From<ColorIntent> for LedColor {
    fn from(intent: ColorIntent) -> Self {
        LedColor::Intensity(intent)
    }
}

impl From<u8> for LedColor {
    fn from(code: u8) -> Self {
        LedColor::Code(code)
    }
}

/// Per-pad lighting shapes of the LED lighting SysEx
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lighting {
    /// Palette color
    Static(u8),
    /// Alternate between two palette colors
    Flash(u8, u8),
    /// Palette color, pulsing
    Pulse(u8),
    /// Direct RGB
    Rgb(ColorIntent),
}

impl Lighting {
    fn type_code(&self) -> u8 {
        match self {
            Lighting::Static(_) => 0,
            Lighting::Flash(..) => 1,
            Lighting::Pulse(_) => 2,
            Lighting::Rgb(_) => 3,
        }
    }
}

/// MIDI channel selecting the LED behaviour of a note/CC message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingChannel {
    Static = 0,
    Flash = 1,
    Pulse = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaderOrientation {
    Vertical = 0,
    Horizontal = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaderKind {
    Unipolar = 0,
    Bipolar = 1,
}

/// Layouts selectable through the layout SysEx
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Session = 0,
    Drums = 4,
    Keys = 5,
    User = 6,
    Faders = 13,
    Programmer = 127,
}

/// One DAW fader lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaderLane {
    pub index: u8,
    pub kind: FaderKind,
    pub cc: u8,
    pub color: u8,
}

impl FaderLane {
    /// Unipolar green fader on `cc`
    pub const fn new(index: u8, cc: u8) -> Self {
        Self {
            index,
            kind: FaderKind::Unipolar,
            cc,
            color: palette::GREEN,
        }
    }

    /// Record sent for lanes the caller did not configure
    pub const fn disabled(index: u8) -> Self {
        Self {
            index,
            kind: FaderKind::Unipolar,
            cc: 0,
            color: palette::OFF,
        }
    }

    pub const fn with_kind(mut self, kind: FaderKind) -> Self {
        self.kind = kind;
        self
    }

    pub const fn with_color(mut self, color: u8) -> Self {
        self.color = color;
        self
    }

    fn record(&self) -> [u8; 4] {
        [self.index, self.kind as u8, self.cc, self.color]
    }
}

/// Stateless composer of device commands
#[derive(Debug, Clone, Copy)]
pub struct CommandEncoder<'a> {
    profile: &'a DeviceProfile,
}

impl<'a> CommandEncoder<'a> {
    pub fn new(profile: &'a DeviceProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &'a DeviceProfile {
        self.profile
    }

    /// Switch a keyboard between extended (InControl) and standard mode
    pub fn extended_mode(&self, enabled: bool) -> Result<Command> {
        let toggle = self.profile.mode_toggle.ok_or_else(|| self.unsupported("extended_mode"))?;
        Ok(Command::NoteOn {
            channel: toggle.channel,
            note: toggle.note,
            velocity: if enabled { 127 } else { 0 },
        })
    }

    pub fn standard_mode(&self) -> Result<Command> {
        self.extended_mode(false)
    }

    /// Reset all LEDs
    pub fn reset(&self) -> Command {
        Command::ControlChange {
            channel: self.profile.led_channel,
            controller: 0,
            value: 0,
        }
    }

    /// Light the LED at `(x, y)`.
    ///
    /// Intensity colors on RGB devices are sent through the lighting SysEx,
    /// everything else as a Note On (pads) or Control Change (buttons in the
    /// profile's control range).
    pub fn led_on(&self, x: usize, y: usize, color: impl Into<LedColor>) -> Result<Command> {
        let address = self.profile.address(x, y)?;
        let code = match color.into() {
            LedColor::Code(code) => check_data("color code", code)?,
            LedColor::Intensity(intent) => match self.profile.color_scheme.quantize(intent) {
                DeviceColor::Code(code) => check_data("color code", code)?,
                DeviceColor::Rgb(_) => {
                    return self.color_for_coordinate(x, y, Lighting::Rgb(intent));
                }
            },
        };
        Ok(self.address_led(address, self.profile.led_channel, code))
    }

    pub fn led_off(&self, x: usize, y: usize) -> Result<Command> {
        self.led_on(x, y, ColorIntent::OFF)
    }

    /// Light a grid LED with a palette code, static, flashing or pulsing
    pub fn led_on_with(
        &self,
        x: usize,
        y: usize,
        color: u8,
        channel: LightingChannel,
    ) -> Result<Command> {
        self.require(DeviceFamily::Grid, "led_on_with")?;
        let address = self.profile.address(x, y)?;
        Ok(self.address_led(address, channel as u8, check_data("color code", color)?))
    }

    /// Vendor SysEx `[opcode, ...args]` behind the profile prefix
    pub fn sysex_command(&self, opcode: u8, args: &[u8]) -> Result<Command> {
        let mut payload = Vec::with_capacity(args.len() + 1);
        payload.push(check_data("sysex opcode", opcode)?);
        for &arg in args {
            payload.push(check_data("sysex argument", arg)?);
        }
        Ok(Command::SysEx { payload })
    }

    /// Light every LED at one brightness step (0-3)
    pub fn all_leds(&self, brightness: u8) -> Result<Command> {
        self.require(DeviceFamily::Keyboard, "all_leds")?;
        Ok(Command::ControlChange {
            channel: self.profile.led_channel,
            controller: 0,
            value: 124 + brightness.min(3),
        })
    }

    /// Enable or disable LED flashing
    pub fn led_flash(&self, enabled: bool) -> Result<Command> {
        self.require(DeviceFamily::Keyboard, "led_flash")?;
        Ok(Command::ControlChange {
            channel: self.profile.led_channel,
            controller: 0,
            value: if enabled { 40 } else { 32 },
        })
    }

    pub fn device_inquiry(&self) -> Result<Command> {
        self.require(DeviceFamily::Grid, "device_inquiry")?;
        Ok(Command::UniversalSysEx {
            payload: DEVICE_INQUIRY.to_vec(),
        })
    }

    /// Ask the device to report DAW/standalone mode
    pub fn query_mode(&self) -> Result<Command> {
        self.grid_sysex("query_mode", opcode::DAW_MODE, &[])
    }

    pub fn daw_mode(&self, enabled: bool) -> Result<Command> {
        self.grid_sysex("daw_mode", opcode::DAW_MODE, &[enabled as u8])
    }

    pub fn standalone_mode(&self) -> Result<Command> {
        self.daw_mode(false)
    }

    /// Clear the session and/or fader state held by the device in DAW mode
    pub fn daw_clear(&self, session: bool, faders: bool) -> Result<Command> {
        self.grid_sysex(
            "daw_clear",
            opcode::DAW_CLEAR,
            &[session as u8, 0, faders as u8],
        )
    }

    pub fn programmer_mode(&self, enabled: bool) -> Result<Command> {
        self.grid_sysex("programmer_mode", opcode::PROGRAMMER_MODE, &[enabled as u8])
    }

    /// Color of the Session button when active and inactive
    pub fn led_session(&self, active: u8, inactive: u8) -> Result<Command> {
        self.grid_sysex("led_session", opcode::SESSION_COLOR, &[active, inactive])
    }

    /// Light a control button by its CC address
    pub fn led_control(&self, control: u8, color: u8, channel: LightingChannel) -> Result<Command> {
        self.require(DeviceFamily::Grid, "led_control")?;
        Ok(Command::ControlChange {
            channel: channel as u8,
            controller: check_data("control", control)?,
            value: check_data("color code", color)?,
        })
    }

    pub fn led_control_off(&self, control: u8) -> Result<Command> {
        self.led_control(control, palette::OFF, LightingChannel::Static)
    }

    pub fn query_layout(&self) -> Result<Command> {
        self.grid_sysex("query_layout", opcode::LAYOUT, &[])
    }

    pub fn layout(&self, layout: Layout) -> Result<Command> {
        self.grid_sysex("layout", opcode::LAYOUT, &[layout as u8])
    }

    /// Put the device to sleep (LEDs off) or wake it up
    pub fn sleep(&self, enabled: bool) -> Result<Command> {
        self.grid_sysex("sleep", opcode::SLEEP, &[!enabled as u8])
    }

    pub fn wake(&self) -> Result<Command> {
        self.sleep(false)
    }

    /// Configure the DAW fader layout.
    ///
    /// The frame always carries one record per lane: lanes missing from
    /// `lanes` are disabled. A lane listed twice keeps its last entry.
    pub fn daw_faders(
        &self,
        lanes: &[FaderLane],
        orientation: FaderOrientation,
    ) -> Result<Command> {
        self.require(DeviceFamily::Grid, "daw_faders")?;

        let count = self.profile.fader_lanes;
        let mut slots: Vec<FaderLane> = (0..count).map(FaderLane::disabled).collect();

        for lane in lanes {
            if lane.index >= count {
                return Err(Error::InvalidRange {
                    what: "fader lane",
                    value: lane.index,
                    max: count.saturating_sub(1),
                });
            }
            check_data("fader cc", lane.cc)?;
            check_data("fader color", lane.color)?;
            slots[lane.index as usize] = *lane;
        }

        let mut args = Vec::with_capacity(2 + 4 * slots.len());
        args.push(0);
        args.push(orientation as u8);
        for lane in &slots {
            args.extend_from_slice(&lane.record());
        }

        self.sysex_command(opcode::FADERS, &args)
    }

    /// Per-pad lighting through SysEx, for devices with RGB LEDs
    pub fn color_for_coordinate(&self, x: usize, y: usize, lighting: Lighting) -> Result<Command> {
        self.require(DeviceFamily::Grid, "color_for_coordinate")?;
        if !self.profile.color_scheme.is_rgb() {
            return Err(self.unsupported("color_for_coordinate"));
        }

        let address = self.profile.address(x, y)?;
        let values = match lighting {
            Lighting::Static(color) | Lighting::Pulse(color) => vec![color],
            Lighting::Flash(a, b) => vec![a, b],
            Lighting::Rgb(intent) => vec![
                to_7bit(intent.red),
                to_7bit(intent.green),
                to_7bit(intent.blue),
            ],
        };

        self.lighting_command(lighting.type_code(), address, &values)
    }

    fn lighting_command(&self, lighting_type: u8, address: u8, values: &[u8]) -> Result<Command> {
        let mut args = Vec::with_capacity(values.len() + 2);
        args.push(lighting_type);
        args.push(address);
        args.extend_from_slice(values);
        self.sysex_command(opcode::LED_LIGHTING, &args)
    }

    fn address_led(&self, address: u8, channel: u8, value: u8) -> Command {
        if self.profile.is_control_address(address) {
            Command::ControlChange {
                channel,
                controller: address,
                value,
            }
        } else {
            Command::NoteOn {
                channel,
                note: address,
                velocity: value,
            }
        }
    }

    fn grid_sysex(&self, command: &'static str, opcode: u8, args: &[u8]) -> Result<Command> {
        self.require(DeviceFamily::Grid, command)?;
        self.sysex_command(opcode, args)
    }

    fn require(&self, family: DeviceFamily, command: &'static str) -> Result<()> {
        if self.profile.family == family {
            Ok(())
        } else {
            Err(self.unsupported(command))
        }
    }

    fn unsupported(&self, command: &'static str) -> Error {
        Error::Unsupported {
            command,
            device: self.profile.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::launchkey::{brightness, launchkey_mini_mk2};
    use crate::profile::launchpad::{controls, launchpad_mini_mk3, SYSEX_PREFIX};

    #[test]
    fn test_extended_mode() {
        let profile = launchkey_mini_mk2();
        let enc = CommandEncoder::new(&profile);

        assert_eq!(
            enc.extended_mode(true).unwrap(),
            Command::NoteOn {
                channel: 0,
                note: 12,
                velocity: 127
            }
        );
        assert_eq!(
            enc.standard_mode().unwrap(),
            Command::NoteOn {
                channel: 0,
                note: 12,
                velocity: 0
            }
        );
    }

    #[test]
    fn test_extended_mode_needs_toggle() {
        let profile = launchpad_mini_mk3();
        let err = CommandEncoder::new(&profile).extended_mode(true).unwrap_err();
        assert!(matches!(
            err,
            Error::Unsupported {
                command: "extended_mode",
                ..
            }
        ));
    }

    #[test]
    fn test_reset() {
        let profile = launchkey_mini_mk2();
        assert_eq!(
            CommandEncoder::new(&profile).reset(),
            Command::ControlChange {
                channel: 0,
                controller: 0,
                value: 0
            }
        );
    }

    #[test]
    fn test_led_on_resolves_every_coordinate() {
        let profile = launchkey_mini_mk2();
        let enc = CommandEncoder::new(&profile);

        for (y, row) in profile.led_table.iter().enumerate() {
            for (x, &address) in row.iter().enumerate() {
                let cmd = enc.led_on(x, y, ColorIntent::rg(1.0, 0.0)).unwrap();
                assert_eq!(
                    cmd,
                    Command::NoteOn {
                        channel: 0,
                        note: address,
                        velocity: 3
                    }
                );
            }
        }
    }

    #[test]
    fn test_led_on_out_of_bounds() {
        let profile = launchkey_mini_mk2();
        let enc = CommandEncoder::new(&profile);

        assert!(matches!(
            enc.led_on(9, 0, ColorIntent::FULL),
            Err(Error::OutOfBounds { x: 9, y: 0, .. })
        ));
        assert!(matches!(
            enc.led_off(0, 2),
            Err(Error::OutOfBounds { x: 0, y: 2, .. })
        ));
    }

    #[test]
    fn test_led_off_uses_lowest_levels() {
        let profile = launchkey_mini_mk2();
        let enc = CommandEncoder::new(&profile);

        assert_eq!(
            enc.led_off(3, 1).unwrap(),
            Command::NoteOn {
                channel: 0,
                note: 115,
                velocity: 0
            }
        );
    }

    #[test]
    fn test_led_on_code_is_validated() {
        let profile = launchkey_mini_mk2();
        let enc = CommandEncoder::new(&profile);

        assert_eq!(
            enc.led_on(0, 0, 51u8).unwrap(),
            Command::NoteOn {
                channel: 0,
                note: 96,
                velocity: 51
            }
        );
        assert!(matches!(
            enc.led_on(0, 0, 200u8),
            Err(Error::InvalidRange { value: 200, .. })
        ));
    }

    #[test]
    fn test_launchpad_buttons_use_control_change() {
        let profile = launchpad_mini_mk3();
        let enc = CommandEncoder::new(&profile);

        assert_eq!(
            enc.led_on(8, 0, palette::YELLOW).unwrap(),
            Command::ControlChange {
                channel: 0,
                controller: controls::LOGO,
                value: palette::YELLOW
            }
        );
        assert_eq!(
            enc.led_on(0, 8, palette::RED).unwrap(),
            Command::NoteOn {
                channel: 0,
                note: 11,
                velocity: palette::RED
            }
        );
    }

    #[test]
    fn test_launchpad_intensity_goes_through_rgb_sysex() {
        let profile = launchpad_mini_mk3();
        let enc = CommandEncoder::new(&profile);

        assert_eq!(
            enc.led_on(0, 1, ColorIntent::rgb(1.0, 0.0, 0.5)).unwrap(),
            Command::SysEx {
                payload: vec![0x03, 3, 81, 127, 0, 64]
            }
        );
        assert_eq!(
            enc.led_off(0, 1).unwrap(),
            Command::SysEx {
                payload: vec![0x03, 3, 81, 0, 0, 0]
            }
        );
    }

    #[test]
    fn test_color_for_coordinate_shapes() {
        let profile = launchpad_mini_mk3();
        let enc = CommandEncoder::new(&profile);

        let cases = [
            (Lighting::Static(5), vec![0x03, 0, 11, 5]),
            (Lighting::Pulse(13), vec![0x03, 2, 11, 13]),
            (Lighting::Flash(5, 21), vec![0x03, 1, 11, 5, 21]),
            (Lighting::Rgb(ColorIntent::FULL), vec![0x03, 3, 11, 127, 127, 127]),
        ];
        for (lighting, payload) in cases {
            assert_eq!(
                enc.color_for_coordinate(0, 8, lighting).unwrap(),
                Command::SysEx { payload }
            );
        }

        assert!(matches!(
            enc.color_for_coordinate(0, 0, Lighting::Static(128)),
            Err(Error::InvalidRange { value: 128, .. })
        ));
        assert!(matches!(
            enc.color_for_coordinate(9, 0, Lighting::Static(1)),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_color_for_coordinate_needs_rgb_device() {
        let profile = launchkey_mini_mk2();
        assert!(matches!(
            CommandEncoder::new(&profile).color_for_coordinate(0, 0, Lighting::Static(1)),
            Err(Error::Unsupported { .. })
        ));
    }

    #[test]
    fn test_daw_faders_pads_unconfigured_lanes() {
        let profile = launchpad_mini_mk3();
        let enc = CommandEncoder::new(&profile);

        let lanes = [
            FaderLane::new(0, 1),
            FaderLane::new(1, 2)
                .with_kind(FaderKind::Bipolar)
                .with_color(palette::RED),
            FaderLane::new(2, 3).with_color(palette::YELLOW),
        ];
        let cmd = enc.daw_faders(&lanes, FaderOrientation::Vertical).unwrap();

        let Command::SysEx { payload } = &cmd else {
            panic!("expected SysEx, got {:?}", cmd);
        };
        assert_eq!(&payload[..3], &[0x01, 0, 0]);
        assert_eq!(&payload[3..7], &[0, 0, 1, palette::GREEN]);
        assert_eq!(&payload[7..11], &[1, 1, 2, palette::RED]);
        assert_eq!(&payload[11..15], &[2, 0, 3, palette::YELLOW]);
        for lane in 3..8u8 {
            let start = 3 + 4 * lane as usize;
            assert_eq!(&payload[start..start + 4], &[lane, 0, 0, palette::OFF]);
        }

        let frame = cmd.encode(&SYSEX_PREFIX).unwrap();
        assert_eq!(frame.len(), 1 + SYSEX_PREFIX.len() + 3 + 4 * 8 + 1);
    }

    #[test]
    fn test_daw_faders_fixed_length() {
        let profile = launchpad_mini_mk3();
        let enc = CommandEncoder::new(&profile);

        let empty = enc.daw_faders(&[], FaderOrientation::Horizontal).unwrap();
        let all: Vec<_> = (0..8).map(|i| FaderLane::new(i, 10 + i)).collect();
        let full = enc.daw_faders(&all, FaderOrientation::Horizontal).unwrap();

        let len = |c: &Command| c.encode(&SYSEX_PREFIX).unwrap().len();
        assert_eq!(len(&empty), len(&full));
    }

    #[test]
    fn test_daw_faders_rejects_unknown_lane() {
        let profile = launchpad_mini_mk3();
        let enc = CommandEncoder::new(&profile);

        assert_eq!(
            enc.daw_faders(&[FaderLane::new(8, 1)], FaderOrientation::Vertical),
            Err(Error::InvalidRange {
                what: "fader lane",
                value: 8,
                max: 7
            })
        );
        assert!(enc
            .daw_faders(&[FaderLane::new(0, 128)], FaderOrientation::Vertical)
            .is_err());
    }

    #[test]
    fn test_grid_sysex_commands() {
        let profile = launchpad_mini_mk3();
        let enc = CommandEncoder::new(&profile);

        let payload = |c: Result<Command>| match c.unwrap() {
            Command::SysEx { payload } => payload,
            other => panic!("expected SysEx, got {:?}", other),
        };

        assert_eq!(payload(enc.query_mode()), vec![0x10]);
        assert_eq!(payload(enc.daw_mode(true)), vec![0x10, 1]);
        assert_eq!(payload(enc.standalone_mode()), vec![0x10, 0]);
        assert_eq!(payload(enc.daw_clear(true, false)), vec![0x12, 1, 0, 0]);
        assert_eq!(payload(enc.programmer_mode(true)), vec![0x0E, 1]);
        assert_eq!(
            payload(enc.led_session(palette::YELLOW, palette::WHITE_LOW)),
            vec![0x14, 13, 1]
        );
        assert_eq!(payload(enc.query_layout()), vec![0x00]);
        assert_eq!(payload(enc.layout(Layout::Faders)), vec![0x00, 13]);
        assert_eq!(payload(enc.layout(Layout::Programmer)), vec![0x00, 127]);
        assert_eq!(payload(enc.sleep(true)), vec![0x09, 0]);
        assert_eq!(payload(enc.wake()), vec![0x09, 1]);

        assert_eq!(
            enc.device_inquiry().unwrap(),
            Command::UniversalSysEx {
                payload: vec![0x7E, 0x7F, 0x06, 0x01]
            }
        );
        assert_eq!(
            enc.led_control(controls::STOP_MUTE_SOLO, palette::WHITE_LOW, LightingChannel::Pulse)
                .unwrap(),
            Command::ControlChange {
                channel: 2,
                controller: 19,
                value: 1
            }
        );
    }

    #[test]
    fn test_family_gating() {
        let launchkey = launchkey_mini_mk2();
        let enc = CommandEncoder::new(&launchkey);
        assert!(matches!(enc.daw_mode(true), Err(Error::Unsupported { .. })));
        assert!(matches!(enc.layout(Layout::Session), Err(Error::Unsupported { .. })));
        assert_eq!(
            enc.all_leds(3).unwrap(),
            Command::ControlChange {
                channel: 0,
                controller: 0,
                value: 127
            }
        );
        assert_eq!(
            enc.led_flash(true).unwrap(),
            Command::ControlChange {
                channel: 0,
                controller: 0,
                value: 40
            }
        );

        let launchpad = launchpad_mini_mk3();
        let enc = CommandEncoder::new(&launchpad);
        assert!(matches!(enc.all_leds(1), Err(Error::Unsupported { .. })));
    }

    #[test]
    fn test_sysex_command_validates_args() {
        let profile = launchkey_mini_mk2();
        let enc = CommandEncoder::new(&profile);
        assert_eq!(
            enc.sysex_command(0x7F, &[1, 2]).unwrap(),
            Command::SysEx {
                payload: vec![0x7F, 1, 2]
            }
        );
        assert!(enc.sysex_command(0x01, &[0x80]).is_err());
    }

    #[test]
    fn test_led_on_with_lighting_channel() {
        let profile = launchpad_mini_mk3();
        let enc = CommandEncoder::new(&profile);

        assert_eq!(
            enc.led_on_with(0, 8, palette::RED, LightingChannel::Flash).unwrap(),
            Command::NoteOn {
                channel: 1,
                note: 11,
                velocity: 5
            }
        );
        assert_eq!(
            enc.led_on_with(8, 0, palette::GREEN, LightingChannel::Pulse).unwrap(),
            Command::ControlChange {
                channel: 2,
                controller: 99,
                value: 21
            }
        );
        assert!(enc.led_on_with(0, 0, 128, LightingChannel::Static).is_err());

        let launchkey = launchkey_mini_mk2();
        let enc = CommandEncoder::new(&launchkey);
        assert!(matches!(
            enc.led_on_with(0, 0, 1, LightingChannel::Static),
            Err(Error::Unsupported { .. })
        ));
    }

    #[test]
    fn test_led_control_off() {
        let profile = launchpad_mini_mk3();
        let enc = CommandEncoder::new(&profile);

        assert_eq!(
            enc.led_control_off(controls::LOGO).unwrap(),
            Command::ControlChange {
                channel: 0,
                controller: 99,
                value: 0
            }
        );
    }

    #[test]
    fn test_all_leds_brightness_steps() {
        let profile = launchkey_mini_mk2();
        let enc = CommandEncoder::new(&profile);

        let values: Vec<u8> = [brightness::OFF, brightness::LOW, brightness::MID, brightness::HIGH]
            .into_iter()
            .map(|b| match enc.all_leds(b).unwrap() {
                Command::ControlChange { value, .. } => value,
                other => panic!("expected CC, got {:?}", other),
            })
            .collect();
        assert_eq!(values, vec![124, 125, 126, 127]);
    }
}
