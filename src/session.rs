//! Controller session
//!
//! Owns the profile, the two logical channels (musical and control) and the
//! connection state. Inbound frames are decoded inside the transport callback
//! and fanned out to every subscriber as [`ControllerEvent`]s; outbound
//! commands are encoded and written to the requested channel.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::commands::CommandEncoder;
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::midi::{format_hex, Command, MessageKind, MidiMessage, PortRole, RunningStatus};
use crate::profile::DeviceProfile;
use crate::transport::{InboundHandler, InputHandle, OutputHandle, Transport};

/// Connection lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Discovering,
    Connected,
    Error,
}

/// Everything a session reports to its listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    Connected,
    Disconnected,
    Error(String),
    NoteOn(MidiMessage),
    NoteOff(MidiMessage),
    ControlChange(MidiMessage),
    PadNoteOn(MidiMessage),
    PadNoteOff(MidiMessage),
    SysEx(MidiMessage),
    /// Frame that could not be classified
    Unsupported(MidiMessage),
}

impl From<MidiMessage> for ControllerEvent {
    fn from(message: MidiMessage) -> Self {
        match message.kind {
            MessageKind::NoteOn => ControllerEvent::NoteOn(message),
            MessageKind::NoteOff => ControllerEvent::NoteOff(message),
            MessageKind::ControlChange => ControllerEvent::ControlChange(message),
            MessageKind::PadNoteOn => ControllerEvent::PadNoteOn(message),
            MessageKind::PadNoteOff => ControllerEvent::PadNoteOff(message),
            MessageKind::SysEx => ControllerEvent::SysEx(message),
            MessageKind::Unknown => ControllerEvent::Unsupported(message),
        }
    }
}

impl ControllerEvent {
    /// The decoded message, for MIDI events
    pub fn message(&self) -> Option<&MidiMessage> {
        match self {
            ControllerEvent::NoteOn(m)
            | ControllerEvent::NoteOff(m)
            | ControllerEvent::ControlChange(m)
            | ControllerEvent::PadNoteOn(m)
            | ControllerEvent::PadNoteOff(m)
            | ControllerEvent::SysEx(m)
            | ControllerEvent::Unsupported(m) => Some(m),
            ControllerEvent::Connected
            | ControllerEvent::Disconnected
            | ControllerEvent::Error(_) => None,
        }
    }
}

/// State shared with the transport callbacks.
///
/// State changes and event emission happen under one lock, so a frame that
/// races with `disconnect()` is either fully delivered or dropped.
struct Dispatch {
    state: ConnectionState,
    listeners: Vec<mpsc::UnboundedSender<ControllerEvent>>,
}

impl Dispatch {
    fn emit(&mut self, event: ControllerEvent) {
        self.listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn deliver(&mut self, origin: PortRole, bytes: &[u8]) {
        if self.state != ConnectionState::Connected {
            trace!("Dropping {} frame while {:?}: {}", origin, self.state, format_hex(bytes));
            return;
        }

        let message = MidiMessage::decode(bytes, origin);
        if message.is_unknown() {
            debug!("Unsupported MIDI on {} port: {}", origin, format_hex(bytes));
        } else {
            trace!("Received on {}: {}", origin, message);
        }
        self.emit(message.into());
    }
}

/// Open endpoints of one logical channel
#[derive(Default)]
struct Channel {
    input: Option<Box<dyn InputHandle>>,
    output: Option<Box<dyn OutputHandle>>,
    running_status: RunningStatus,
}

impl Channel {
    fn is_open(&self) -> bool {
        self.input.is_some() && self.output.is_some()
    }

    /// Close both sides; handles whose close failed are kept
    fn close(&mut self, role: PortRole) -> Vec<String> {
        let mut failures = Vec::new();

        if let Some(mut input) = self.input.take() {
            if let Err(e) = input.close() {
                failures.push(format!("{} input: {}", role, e));
                self.input = Some(input);
            }
        }
        if let Some(mut output) = self.output.take() {
            if let Err(e) = output.close() {
                failures.push(format!("{} output: {}", role, e));
                self.output = Some(output);
            }
        }
        self.running_status.reset();

        failures
    }
}

/// A connection to one controller
pub struct ControllerSession<T: Transport> {
    profile: Arc<DeviceProfile>,
    config: SessionConfig,
    transport: T,
    dispatch: Arc<Mutex<Dispatch>>,
    musical: Channel,
    control: Channel,
}

impl<T: Transport> ControllerSession<T> {
    /// Create a disconnected session. A color scheme in `config` replaces the
    /// profile's own.
    pub fn new(profile: DeviceProfile, config: SessionConfig, transport: T) -> Self {
        let profile = match &config.color_scheme {
            Some(scheme) => profile.with_color_scheme(scheme.clone()),
            None => profile,
        };

        Self {
            profile: Arc::new(profile),
            config,
            transport,
            dispatch: Arc::new(Mutex::new(Dispatch {
                state: ConnectionState::Disconnected,
                listeners: Vec::new(),
            })),
            musical: Channel::default(),
            control: Channel::default(),
        }
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Command encoder for this session's device
    pub fn encoder(&self) -> CommandEncoder<'_> {
        CommandEncoder::new(&self.profile)
    }

    pub fn state(&self) -> ConnectionState {
        self.dispatch.lock().state
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Both channels have their input and output open
    pub fn channels_open(&self) -> bool {
        self.musical.is_open() && self.control.is_open()
    }

    /// Register a listener. Events are delivered in emission order.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ControllerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.dispatch.lock().listeners.push(tx);
        rx
    }

    /// Endpoint name expected for one side of a channel
    pub fn port_name(&self, role: PortRole, input: bool) -> String {
        let overrides = self.config.port_name_overrides.get(role);
        let explicit = if input {
            overrides.and_then(|o| o.input.clone())
        } else {
            overrides.and_then(|o| o.output.clone())
        };

        explicit.unwrap_or_else(|| {
            let ports = self.profile.ports(role);
            let suffix = if input { &ports.input } else { &ports.output };
            self.profile.qualified_name(suffix)
        })
    }

    /// Discover and open both channels.
    ///
    /// Every channel is attempted even if an earlier one is missing. On
    /// failure the session ends up in [`ConnectionState::Error`] with nothing
    /// left open, and an `Error` event names the missing ports.
    pub fn connect(&mut self) -> Result<()> {
        if self.state() == ConnectionState::Connected {
            debug!("{} already connected", self.profile);
            return Ok(());
        }

        self.set_state(ConnectionState::Discovering);
        info!("Connecting to {}", self.profile);

        let names = (self.transport.input_names(), self.transport.output_names());
        let (inputs, outputs) = match names {
            (Ok(inputs), Ok(outputs)) => (inputs, outputs),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Port enumeration failed: {}", e);
                return self.fail_connect(e);
            }
        };
        debug!("Detected MIDI input ports: {:?}", inputs);
        debug!("Detected MIDI output ports: {:?}", outputs);

        let mut missing = Vec::new();
        let mut failures = Vec::new();

        for role in PortRole::ALL {
            let input_name = self.port_name(role, true);
            let output_name = self.port_name(role, false);
            let input_index = inputs.iter().position(|n| *n == input_name);
            let output_index = outputs.iter().position(|n| *n == output_name);

            if input_index.is_none() {
                warn!("Input port {} is not available", input_name);
                missing.push(format!("{} ({} input)", input_name, role));
            }
            if output_index.is_none() {
                warn!("Output port {} is not available", output_name);
                missing.push(format!("{} ({} output)", output_name, role));
            }
            let (Some(input_index), Some(output_index)) = (input_index, output_index) else {
                continue;
            };

            if let Err(e) = self.open_channel(role, input_index, output_index) {
                warn!("Unable to open {} channel: {}", role, e);
                failures.push(format!("{}: {}", role, e));
            }
        }

        if missing.is_empty() && failures.is_empty() {
            {
                let mut dispatch = self.dispatch.lock();
                dispatch.state = ConnectionState::Connected;
                dispatch.emit(ControllerEvent::Connected);
            }
            info!("{} connected", self.profile);
            return Ok(());
        }

        let error = if missing.is_empty() {
            Error::Transport(failures.join("; "))
        } else {
            Error::PortNotFound(missing)
        };
        self.fail_connect(error)
    }

    /// Close both channels.
    ///
    /// If any endpoint refuses to close the session keeps its state and
    /// emits an `Error` event.
    pub fn disconnect(&mut self) -> Result<()> {
        let previous = {
            let mut dispatch = self.dispatch.lock();
            let previous = dispatch.state;
            if previous == ConnectionState::Disconnected {
                return Ok(());
            }
            // Gate inbound delivery before tearing the ports down
            dispatch.state = ConnectionState::Disconnected;
            previous
        };

        let mut failures = self.musical.close(PortRole::Musical);
        failures.extend(self.control.close(PortRole::Control));

        if failures.is_empty() {
            self.emit(ControllerEvent::Disconnected);
            info!("{} disconnected", self.profile);
            return Ok(());
        }

        let reason = format!("Unable to disconnect: {}", failures.join("; "));
        warn!("{}", reason);
        {
            let mut dispatch = self.dispatch.lock();
            dispatch.state = previous;
            dispatch.emit(ControllerEvent::Error(reason));
        }
        Err(Error::Transport(failures.join("; ")))
    }

    /// Send on the control channel
    pub fn send(&mut self, command: Command) -> Result<()> {
        self.send_to(PortRole::Control, command)
    }

    /// Encode and send a command on one channel
    pub fn send_to(&mut self, role: PortRole, command: Command) -> Result<()> {
        if !self.is_connected() {
            debug!("Not connected, dropping {}", command);
            return Err(Error::NotConnected);
        }

        let frame = command.encode(&self.profile.sysex_prefix)?;
        let use_running_status = self.config.use_running_status;
        let channel = self.channel_mut(role);
        let output = channel.output.as_mut().ok_or(Error::NotConnected)?;

        let bytes = if use_running_status {
            channel.running_status.apply(frame)
        } else {
            frame
        };
        if let Err(e) = output.send(&bytes) {
            // The device may not have seen the status byte
            channel.running_status.reset();
            return Err(e);
        }

        trace!("Sent on {}: {} | {}", role, format_hex(&bytes), command);
        Ok(())
    }

    /// Write a frame as is, bypassing the codec. Running status restarts
    /// after it.
    pub fn send_raw(&mut self, role: PortRole, bytes: &[u8]) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }

        let channel = self.channel_mut(role);
        let output = channel.output.as_mut().ok_or(Error::NotConnected)?;
        channel.running_status.reset();
        output.send(bytes)?;

        trace!("Sent raw on {}: {}", role, format_hex(bytes));
        Ok(())
    }

    /// Send several commands in order, stopping at the first failure
    pub fn send_all(&mut self, commands: impl IntoIterator<Item = Command>) -> Result<()> {
        for command in commands {
            self.send(command)?;
        }
        Ok(())
    }

    fn open_channel(
        &mut self,
        role: PortRole,
        input_index: usize,
        output_index: usize,
    ) -> Result<()> {
        let dispatch = Arc::clone(&self.dispatch);
        let handler: InboundHandler = Box::new(move |bytes| dispatch.lock().deliver(role, bytes));

        debug!("Connecting {} input {}", role, input_index);
        let input = self.transport.open_input(input_index, handler)?;
        self.channel_mut(role).input = Some(input);

        debug!("Connecting {} output {}", role, output_index);
        let output = self.transport.open_output(output_index)?;
        let channel = self.channel_mut(role);
        channel.output = Some(output);
        channel.running_status.reset();

        Ok(())
    }

    fn channel_mut(&mut self, role: PortRole) -> &mut Channel {
        match role {
            PortRole::Musical => &mut self.musical,
            PortRole::Control => &mut self.control,
        }
    }

    fn fail_connect(&mut self, error: Error) -> Result<()> {
        for failure in self
            .musical
            .close(PortRole::Musical)
            .into_iter()
            .chain(self.control.close(PortRole::Control))
        {
            warn!("Cleanup after failed connect: {}", failure);
        }

        let reason = format!("Unable to connect: {}", error);
        {
            let mut dispatch = self.dispatch.lock();
            dispatch.state = ConnectionState::Error;
            dispatch.emit(ControllerEvent::Error(reason));
        }
        Err(error)
    }

    fn set_state(&self, state: ConnectionState) {
        self.dispatch.lock().state = state;
    }

    fn emit(&self, event: ControllerEvent) {
        self.dispatch.lock().emit(event);
    }
}

impl<T: Transport> Drop for ControllerSession<T> {
    fn drop(&mut self) {
        if self.state() != ConnectionState::Disconnected {
            let _ = self.disconnect();
        }
    }
}
