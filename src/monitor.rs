//! Console event monitor for debugging and development
//!
//! Prints every event of a connected session, one colored line each, and
//! lists the MIDI ports the transport can see.

use anyhow::{Context, Result};
use colored::*;
use std::future::Future;
use std::time::Instant;
use tracing::info;

use crate::midi::{format_hex, MidiMessage, PortRole};
use crate::profile::DeviceProfile;
use crate::session::{ControllerEvent, ControllerSession};
use crate::transport::Transport;

fn origin_label(origin: PortRole) -> ColoredString {
    match origin {
        PortRole::Musical => "MUS".green(),
        PortRole::Control => "CTL".yellow(),
    }
}

fn message_line(message: &MidiMessage, hex: ColoredString) -> String {
    format!(
        "{} | {} => {}",
        origin_label(message.origin),
        hex,
        message.to_string().bright_blue()
    )
}

/// Render one event as a monitor line
pub fn format_event(elapsed_ms: u64, event: &ControllerEvent) -> String {
    let timestamp = format!("[{:08}ms]", elapsed_ms).dimmed();

    let body = match event {
        ControllerEvent::Connected => "Connected".bold().green().to_string(),
        ControllerEvent::Disconnected => "Disconnected".bold().yellow().to_string(),
        ControllerEvent::Error(reason) => format!("{} {}", "Error:".bold().red(), reason),
        ControllerEvent::NoteOn(m) | ControllerEvent::PadNoteOn(m) => {
            message_line(m, format_hex(&m.raw).bright_green())
        }
        ControllerEvent::NoteOff(m) | ControllerEvent::PadNoteOff(m) => {
            message_line(m, format_hex(&m.raw).bright_red())
        }
        ControllerEvent::ControlChange(m) => message_line(m, format_hex(&m.raw).bright_yellow()),
        ControllerEvent::SysEx(m) => message_line(m, format_hex(&m.raw).bright_magenta()),
        ControllerEvent::Unsupported(m) => message_line(m, format_hex(&m.raw).bright_black()),
    };

    format!("{} {}", timestamp, body)
}

/// Connect the session and print its events until `shutdown` resolves
pub async fn run_monitor<T: Transport>(
    session: &mut ControllerSession<T>,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    println!("{}", format!("=== {} Monitor ===", session.profile()).bold().cyan());
    println!("Press Ctrl+C to exit\n");

    let mut rx = session.subscribe();
    let start_time = Instant::now();

    session
        .connect()
        .with_context(|| format!("Failed to connect to {}", session.profile()))?;

    println!("{}", "Format: [timestamp] PORT | HEX => PARSED".dimmed());
    println!("{}\n", "─".repeat(80).dimmed());

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(event) = rx.recv() => {
                let elapsed_ms = start_time.elapsed().as_millis() as u64;
                println!("{}", format_event(elapsed_ms, &event));
            }
            _ = &mut shutdown => {
                info!("Stopping monitor");
                break;
            }
        }
    }

    session.disconnect().context("Failed to close MIDI ports")?;
    println!("\n{}", "Monitor stopped".yellow());
    Ok(())
}

/// List all ports, marking the ones the profile expects
pub fn list_ports_formatted<T: Transport>(transport: &T, profile: &DeviceProfile) -> Result<()> {
    let inputs = transport.input_names().context("Failed to list MIDI inputs")?;
    let outputs = transport.output_names().context("Failed to list MIDI outputs")?;

    println!("\n{}", "=== Available MIDI Ports ===".bold().cyan());
    print_ports("Input Ports:", &inputs);
    print_ports("Output Ports:", &outputs);

    println!("\n{}", format!("Expected for {}:", profile).bold());
    for role in PortRole::ALL {
        let ports = profile.ports(role);
        for (direction, suffix, available) in [
            ("input ", &ports.input, &inputs),
            ("output", &ports.output, &outputs),
        ] {
            let name = profile.qualified_name(suffix);
            let marker = if available.contains(&name) {
                "[FOUND]  ".bright_green()
            } else {
                "[MISSING]".red()
            };
            println!("  {} {:8} {} {}", marker, role.as_str(), direction, name.bright_white());
        }
    }

    println!();
    Ok(())
}

fn print_ports(title: &str, names: &[String]) {
    println!("\n{}", title.bold());
    if names.is_empty() {
        println!("  {}", "No ports found".dimmed());
    }
    for (index, name) in names.iter().enumerate() {
        println!("  {} {}", format!("[{}]", index).dimmed(), name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_note_on() {
        plain();
        let message = MidiMessage::decode(&[0x90, 60, 100], PortRole::Musical);
        let line = format_event(42, &ControllerEvent::from(message));

        assert_eq!(line, "[00000042ms] MUS | 90 3C 64 => NoteOn ch:1 n:60 v:100");
    }

    #[test]
    fn test_format_control_origin() {
        plain();
        let message = MidiMessage::decode(&[0xB0, 21, 64], PortRole::Control);
        let line = format_event(0, &ControllerEvent::from(message));

        assert!(line.contains("CTL"));
        assert!(line.contains("CC ch:1 cc:21 v:64"));
    }

    #[test]
    fn test_format_lifecycle() {
        plain();
        assert_eq!(format_event(5, &ControllerEvent::Connected), "[00000005ms] Connected");
        assert!(format_event(5, &ControllerEvent::Error("port gone".to_string()))
            .ends_with("Error: port gone"));
    }

    #[test]
    fn test_format_unsupported_keeps_bytes() {
        plain();
        let message = MidiMessage::decode(&[0xA0, 1, 1], PortRole::Control);
        let line = format_event(0, &ControllerEvent::from(message));

        assert!(line.contains("A0 01 01"));
        assert!(line.contains("Unknown"));
    }
}
