//! navstate CLI
//!
//! Drives a [`SpaceNavModule`] at a fixed tick rate and prints the device
//! state whenever it changes.
//!
//! Usage:
//!   cargo run --features cli --bin navstate -- --backend socket --rate-hz 60
//!   cargo run --features cli,hid --bin navstate -- --backend hid --json

use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::info;
use tracing_subscriber::prelude::*;

use navstate::host::{HostModule, SpaceNavModule};
use navstate::{Backend, Config};

#[derive(Parser, Debug)]
#[command(name = "navstate")]
#[command(about = "Poll a space navigator and print its state")]
struct Args {
    /// TOML config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Channel backend: socket, hid or virtual (overrides the config)
    #[arg(long, short = 'b')]
    backend: Option<Backend>,

    /// spacenavd socket path (overrides the config)
    #[arg(long)]
    socket: Option<PathBuf>,

    /// Ticks per second
    #[arg(long, default_value_t = 60)]
    rate_hz: u32,

    /// Stop after this many ticks (0 = run forever)
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Print state as JSON instead of the text line
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "navstate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(backend) = args.backend {
        config.channel.backend = backend;
    }
    if let Some(socket) = args.socket {
        config.channel.socket_path = socket;
    }
    info!("using {} backend", config.channel.backend);

    let mut module = SpaceNavModule::from_config(&config);
    let tick = Duration::from_secs_f64(1.0 / f64::from(args.rate_hz.max(1)));
    let mut last = None;
    let mut prev = Instant::now();
    let mut n = 0u64;

    while args.ticks == 0 || n < args.ticks {
        let now = Instant::now();
        module.simulation_step((now - prev).as_secs_f64());
        prev = now;
        n += 1;

        let state = module.accumulator().state();
        if last != Some(state) {
            if args.json {
                println!("{}", serde_json::to_string(&state)?);
            } else {
                println!("{state}");
            }
            last = Some(state);
        }

        std::thread::sleep(tick);
    }

    Ok(())
}
