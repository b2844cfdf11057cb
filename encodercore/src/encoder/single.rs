use std::sync::{Arc, Weak};

use defmt_or_log::{info, warn};
use portable_atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::mpsc::{self, Receiver};

use super::{EDGE_QUEUE_CAPACITY, note_start};
use crate::{
    DigitalInterrupt, Direction, DirectionProvider, Edge, EdgeSender, Encoder, OnStart,
    common::{Channel, TickCounter},
    workers::{BackgroundWorkers, Shutdown},
};

/// Keeps track of a motor position using a single-channel pulse encoder.
///
/// One line can't tell which way the shaft turns, so every pulse is counted in
/// the direction the motor is currently commanding. The motor is only borrowed:
/// once it is gone, pulses count as if it were stopped. A motor coasting after
/// a stop command, or a command not yet physically realized, gets miscounted.
pub struct SingleEncoder {
    pin: Arc<dyn DigitalInterrupt>,
    motor: Weak<dyn DirectionProvider>,
    position: Arc<TickCounter>,
    unexpected: Arc<AtomicU64>,
    debug: bool,
    started: AtomicBool,
}

impl SingleEncoder {
    /// `debug` turns on a warning for every pulse received while the motor
    /// should be stopped.
    pub fn new(
        pin: Arc<dyn DigitalInterrupt>,
        motor: Weak<dyn DirectionProvider>,
        debug: bool,
    ) -> Self {
        Self {
            pin,
            motor,
            position: Arc::new(TickCounter::new()),
            unexpected: Arc::new(AtomicU64::new(0)),
            debug,
            started: AtomicBool::new(false),
        }
    }

    /// Pulses received while the motor was not commanding any direction.
    pub fn unexpected_pulses(&self) -> u64 {
        self.unexpected.load(Ordering::Relaxed)
    }
}

impl Encoder for SingleEncoder {
    fn position(&self) -> i64 {
        self.position.load()
    }

    fn start(&self, shutdown: &Shutdown, workers: &BackgroundWorkers, on_start: OnStart) {
        note_start(&self.started, "single");

        let (tx, rx) = mpsc::channel(EDGE_QUEUE_CAPACITY);
        self.pin.add_callback(EdgeSender::new(Channel::A, tx));

        let counter = PulseCounter {
            motor: self.motor.clone(),
            position: self.position.clone(),
            unexpected: self.unexpected.clone(),
            debug: self.debug,
        };
        let shutdown = shutdown.clone();
        workers.spawn(async move {
            on_start();
            counter.run(rx, &shutdown).await;
        });
    }
}

/// What the background task needs from a [SingleEncoder].
struct PulseCounter {
    motor: Weak<dyn DirectionProvider>,
    position: Arc<TickCounter>,
    unexpected: Arc<AtomicU64>,
    debug: bool,
}

impl PulseCounter {
    async fn run(&self, mut rx: Receiver<Edge>, shutdown: &Shutdown) {
        info!("single encoder: counting");
        loop {
            if shutdown.is_cancelled() {
                break;
            }
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                edge = rx.recv() => if edge.is_none() {
                    info!("single encoder: line released");
                    break;
                },
            }
            self.pulse();
        }
        info!("single encoder: stopped at {}", self.position.load());
    }

    fn pulse(&self) {
        let direction = self
            .motor
            .upgrade()
            .map_or(Direction::Neutral, |motor| motor.direction());
        if direction == Direction::Neutral {
            self.unexpected.fetch_add(1, Ordering::Relaxed);
            if self.debug {
                warn!("got encoder tick but motor should be off");
            }
            return;
        }
        self.position.add(direction.tick_delta());
    }
}
