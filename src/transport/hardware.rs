//! midir-backed transport

use midir::{Ignore, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};
use tracing::debug;

use super::{InboundHandler, InputHandle, OutputHandle, Transport};
use crate::error::{Error, Result};

/// Hardware MIDI ports through midir
pub struct MidirTransport {
    client_name: String,
}

impl MidirTransport {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }

    fn input(&self, suffix: &str) -> Result<MidiInput> {
        let mut midi_in = MidiInput::new(&format!("{}-{}", self.client_name, suffix))?;
        // SysEx replies (mode/layout queries, device inquiry) are wanted
        midi_in.ignore(Ignore::TimeAndActiveSense);
        Ok(midi_in)
    }

    fn output(&self, suffix: &str) -> Result<MidiOutput> {
        Ok(MidiOutput::new(&format!("{}-{}", self.client_name, suffix))?)
    }
}

impl Default for MidirTransport {
    fn default() -> Self {
        Self::new("Novation-GW")
    }
}

impl Transport for MidirTransport {
    fn input_names(&self) -> Result<Vec<String>> {
        let midi_in = self.input("Scanner")?;
        // Keep unnamed ports so positions stay aligned with indices
        Ok(midi_in
            .ports()
            .iter()
            .map(|port| midi_in.port_name(port).unwrap_or_default())
            .collect())
    }

    fn output_names(&self) -> Result<Vec<String>> {
        let midi_out = self.output("Scanner")?;
        Ok(midi_out
            .ports()
            .iter()
            .map(|port| midi_out.port_name(port).unwrap_or_default())
            .collect())
    }

    fn open_input(
        &mut self,
        index: usize,
        mut handler: InboundHandler,
    ) -> Result<Box<dyn InputHandle>> {
        let midi_in = self.input("Input")?;
        let port = midi_in
            .ports()
            .into_iter()
            .nth(index)
            .ok_or_else(|| Error::Transport(format!("input port {} vanished", index)))?;

        debug!("Opening input port {}", index);
        let conn = midi_in.connect(
            &port,
            &self.client_name,
            move |_timestamp, data, _| handler(data),
            (),
        )?;

        Ok(Box::new(MidirInput { conn: Some(conn) }))
    }

    fn open_output(&mut self, index: usize) -> Result<Box<dyn OutputHandle>> {
        let midi_out = self.output("Output")?;
        let port = midi_out
            .ports()
            .into_iter()
            .nth(index)
            .ok_or_else(|| Error::Transport(format!("output port {} vanished", index)))?;

        debug!("Opening output port {}", index);
        let conn = midi_out.connect(&port, &self.client_name)?;

        Ok(Box::new(MidirOutput { conn: Some(conn) }))
    }
}

struct MidirInput {
    conn: Option<MidiInputConnection<()>>,
}

impl InputHandle for MidirInput {
    fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close();
        }
        Ok(())
    }
}

struct MidirOutput {
    conn: Option<MidiOutputConnection>,
}

impl OutputHandle for MidirOutput {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| Error::Transport("output port closed".to_string()))?;
        conn.send(bytes)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close();
        }
        Ok(())
    }
}
