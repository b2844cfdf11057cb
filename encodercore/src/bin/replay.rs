//! Replay a recorded edge trace through an encoder and print where it ends up.
//!
//! ```text
//! replay --config encoder.json --trace trace.json --direction forward
//! ```

use std::{
    collections::HashMap,
    path::PathBuf,
    process::ExitCode,
    sync::{Arc, Weak},
    time::Duration,
};

use clap::{Parser, ValueEnum};
use defmt_or_log::{error, info};
use definitions::{Direction, EdgeEvent, EncoderConfig, parse_trace, rpm_debug_from_env};
use encodercore::{
    DirectionProvider,
    common::AtomicDirection,
    config::build_encoder,
    encoder::EDGE_QUEUE_CAPACITY,
    interrupt::BasicDigitalInterrupt,
    workers::{BackgroundWorkers, Shutdown},
};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CommandedDirection {
    Forward,
    Backward,
    Neutral,
}

impl From<CommandedDirection> for Direction {
    fn from(d: CommandedDirection) -> Self {
        match d {
            CommandedDirection::Forward => Direction::Forward,
            CommandedDirection::Backward => Direction::Backward,
            CommandedDirection::Neutral => Direction::Neutral,
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Replay a recorded edge trace through an encoder")]
struct Args {
    /// Encoder configuration (JSON)
    #[arg(short, long)]
    config: PathBuf,
    /// Edge trace, a JSON array of {"pin": ..., "high": ...}
    #[arg(short, long)]
    trace: PathBuf,
    /// Direction the motor commands while a single-channel encoder is replayed
    #[arg(short, long, value_enum, default_value = "forward")]
    direction: CommandedDirection,
    /// Warn about pulses received while the motor should be off (also RPM_DEBUG)
    #[arg(long)]
    debug: bool,
}

fn load(args: &Args) -> Result<(EncoderConfig, Vec<EdgeEvent>), String> {
    let config = std::fs::read_to_string(&args.config)
        .map_err(|e| format!("reading {}: {}", args.config.display(), e))?;
    let config: EncoderConfig = serde_json::from_str(&config)
        .map_err(|e| format!("parsing {}: {}", args.config.display(), e))?;
    let trace = std::fs::read_to_string(&args.trace)
        .map_err(|e| format!("reading {}: {}", args.trace.display(), e))?;
    let trace =
        parse_trace(&trace).map_err(|e| format!("parsing {}: {}", args.trace.display(), e))?;
    Ok((config, trace))
}

async fn replay(args: Args) -> Result<i64, String> {
    let (config, trace) = load(&args)?;

    let board: HashMap<String, Arc<BasicDigitalInterrupt>> = config
        .pins()
        .into_iter()
        .map(|pin| (pin.to_string(), Arc::new(BasicDigitalInterrupt::new(pin))))
        .collect();
    if let Some(unknown) = trace.iter().find(|e| !board.contains_key(&e.pin)) {
        return Err(format!("trace uses pin {:?} which is not in the config", unknown.pin));
    }

    let motor = Arc::new(AtomicDirection::new());
    motor.set(args.direction.into());
    let weak: Weak<dyn DirectionProvider> = Arc::downgrade(&motor) as _;
    let debug = args.debug || rpm_debug_from_env();
    let encoder = build_encoder(&config, &board, Some(weak), debug).map_err(|e| e.to_string())?;

    let shutdown = Shutdown::new();
    let workers = BackgroundWorkers::new();
    let (started_tx, started_rx) = oneshot::channel();
    encoder.start(
        &shutdown,
        &workers,
        Box::new(move || {
            let _ = started_tx.send(());
        }),
    );
    let _ = started_rx.await;

    for event in &trace {
        board[&event.pin].tick(event.high);
        // a trace replays far faster than real hardware, don't outrun the queue
        while board.values().any(|i| i.pending() >= EDGE_QUEUE_CAPACITY / 2) {
            tokio::time::sleep(Duration::from_micros(50)).await;
        }
    }

    for interrupt in board.values() {
        interrupt.close();
    }
    workers.wait().await;
    for interrupt in board.values() {
        if interrupt.dropped() > 0 {
            error!("{}: {} events dropped", interrupt.name(), interrupt.dropped());
        }
    }
    Ok(encoder.position())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match replay(args).await {
        Ok(position) => {
            info!("replay done");
            println!("position: {}", position);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("replay: {}", e);
            ExitCode::FAILURE
        }
    }
}
