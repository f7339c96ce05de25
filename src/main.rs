//! Novation GW - command-line entry point
//!
//! Port listing, event monitor and LED/fader demos for Novation controllers.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use std::future::Future;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use novation_gw::commands::{FaderKind, FaderOrientation};
use novation_gw::config::AppConfig;
use novation_gw::monitor;
use novation_gw::profile::launchpad::palette;
use novation_gw::profile::DeviceFamily;
use novation_gw::{
    ColorIntent, ControllerEvent, ControllerSession, DeviceModel, FaderLane, Layout, Lighting,
    MidirTransport, Transport,
};

/// Controller model selectable from the command line
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Device {
    LaunchkeyMini,
    LaunchpadMini,
}

impl From<Device> for DeviceModel {
    fn from(device: Device) -> Self {
        match device {
            Device::LaunchkeyMini => DeviceModel::LaunchkeyMiniMk2,
            Device::LaunchpadMini => DeviceModel::LaunchpadMiniMk3,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Demo {
    /// Walk a color gradient across every LED
    Sweep,
    /// Launchpad DAW mode with eight fader lanes
    Faders,
    /// Launchpad programmer mode with an RGB gradient
    Programmer,
}

/// Novation GW - driver layer for Launchkey and Launchpad controllers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Controller model (overrides the configuration file)
    #[arg(short, long, env = "NOVATION_DEVICE")]
    device: Option<Device>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// List available MIDI ports
    #[arg(long)]
    list_ports: bool,

    /// Run a lighting demo instead of the event monitor
    #[arg(long)]
    demo: Option<Demo>,

    /// Demo step interval in milliseconds
    #[arg(long, default_value = "80")]
    interval_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("Starting Novation GW...");

    let mut config = load_config(&args.config).await?;
    if let Some(device) = args.device {
        config.device = device.into();
    }

    let transport = MidirTransport::new(config.client_name.clone());
    let profile = config.device.profile();
    info!("Device: {}", profile);

    if args.list_ports {
        monitor::list_ports_formatted(&transport, &profile)?;
        return Ok(());
    }

    let mut session = ControllerSession::new(profile, config.session.clone(), transport);

    match args.demo {
        None => monitor::run_monitor(&mut session, shutdown_signal()).await?,
        Some(demo) => {
            let interval = Duration::from_millis(args.interval_ms.max(1));
            run_demo(&mut session, demo, interval, shutdown_signal()).await?
        }
    }

    info!("Novation GW shutdown complete");
    Ok(())
}

async fn load_config(path: &str) -> Result<AppConfig> {
    if !Path::new(path).exists() {
        warn!("Configuration file {} not found, using defaults", path);
        return Ok(AppConfig::default());
    }

    let config = AppConfig::load(path).await?;
    info!("Configuration loaded from {}", path);
    Ok(config)
}

async fn run_demo<T: Transport>(
    session: &mut ControllerSession<T>,
    demo: Demo,
    interval: Duration,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let mut rx = session.subscribe();
    session
        .connect()
        .with_context(|| format!("Failed to connect to {}", session.profile()))?;

    let setup = {
        let encoder = session.encoder();
        match (demo, encoder.profile().family) {
            (Demo::Sweep, DeviceFamily::Keyboard) => {
                vec![encoder.extended_mode(true)?, encoder.reset()]
            }
            (Demo::Sweep, DeviceFamily::Grid) | (Demo::Programmer, _) => {
                vec![encoder.programmer_mode(true)?, encoder.layout(Layout::Programmer)?]
            }
            (Demo::Faders, _) => {
                let lanes: Vec<FaderLane> = (0..8)
                    .map(|i| {
                        let lane = FaderLane::new(i, 21 + i);
                        if i % 2 == 0 {
                            lane
                        } else {
                            lane.with_kind(FaderKind::Bipolar).with_color(palette::YELLOW)
                        }
                    })
                    .collect();
                vec![
                    encoder.daw_mode(true)?,
                    encoder.daw_clear(true, true)?,
                    encoder.daw_faders(&lanes, FaderOrientation::Vertical)?,
                    encoder.layout(Layout::Faders)?,
                ]
            }
        }
    };
    session.send_all(setup).context("Failed to initialize device")?;

    println!("{}", format!("=== {:?} demo on {} ===", demo, session.profile()).bold().cyan());
    println!("Press Ctrl+C to exit\n");

    let (width, height) = session.profile().grid_size();
    let cells: Vec<(usize, usize)> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .collect();

    if let Demo::Programmer = demo {
        for &(x, y) in &cells {
            let lighting = Lighting::Rgb(gradient(x, y, width, height));
            let command = session.encoder().color_for_coordinate(x, y, lighting)?;
            session.send(command)?;
        }
    }

    let start_time = Instant::now();
    let mut ticker = tokio::time::interval(interval);
    let mut step = 0usize;
    let mut previous: Option<(usize, usize)> = None;

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick(), if matches!(demo, Demo::Sweep) && !cells.is_empty() => {
                let (x, y) = cells[step % cells.len()];
                let commands = {
                    let encoder = session.encoder();
                    let mut commands = Vec::with_capacity(2);
                    if let Some((px, py)) = previous {
                        commands.push(encoder.led_off(px, py)?);
                    }
                    commands.push(encoder.led_on(x, y, gradient(x, y, width, height))?);
                    commands
                };
                if let Err(e) = session.send_all(commands) {
                    warn!("Failed to update LEDs: {}", e);
                }
                previous = Some((x, y));
                step += 1;
            }
            Some(event) = rx.recv() => {
                if let ControllerEvent::Error(reason) = &event {
                    warn!("{}", reason);
                }
                let elapsed_ms = start_time.elapsed().as_millis() as u64;
                println!("{}", monitor::format_event(elapsed_ms, &event));
            }
            _ = &mut shutdown => {
                break;
            }
        }
    }

    info!("Restoring device state");
    let teardown = {
        let encoder = session.encoder();
        match (demo, encoder.profile().family) {
            (Demo::Sweep, DeviceFamily::Keyboard) => {
                vec![encoder.reset(), encoder.standard_mode()?]
            }
            (Demo::Faders, _) => vec![encoder.daw_clear(true, true)?, encoder.daw_mode(false)?],
            _ => vec![encoder.reset(), encoder.programmer_mode(false)?],
        }
    };
    if let Err(e) = session.send_all(teardown) {
        warn!("Failed to restore device state: {}", e);
    }

    session.disconnect().context("Failed to close MIDI ports")?;
    Ok(())
}

/// Red grows left to right, green top to bottom, blue along the diagonal
fn gradient(x: usize, y: usize, width: usize, height: usize) -> ColorIntent {
    let fx = x as f32 / (width.max(2) - 1) as f32;
    let fy = y as f32 / (height.max(2) - 1) as f32;
    ColorIntent::rgb(fx, 1.0 - fy, (fx + fy) / 2.0)
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for CTRL+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
