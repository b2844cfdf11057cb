use std::sync::Arc;

use defmt_or_log::{debug, info};
use portable_atomic::AtomicBool;
use tokio::sync::mpsc::{self, Receiver};

use super::{EDGE_QUEUE_CAPACITY, note_start};
use crate::{
    DigitalInterrupt, Edge, EdgeSender, Encoder, OnStart,
    common::{Channel, QuadratureDecoder, TickCounter},
    workers::{BackgroundWorkers, Shutdown},
};

/// Keeps track of a motor position using a two-channel quadrature (hall) encoder.
pub struct HallEncoder {
    a: Arc<dyn DigitalInterrupt>,
    b: Arc<dyn DigitalInterrupt>,
    position: Arc<TickCounter>,
    started: AtomicBool,
}

impl HallEncoder {
    pub fn new(a: Arc<dyn DigitalInterrupt>, b: Arc<dyn DigitalInterrupt>) -> Self {
        Self {
            a,
            b,
            position: Arc::new(TickCounter::new()),
            started: AtomicBool::new(false),
        }
    }
}

impl Encoder for HallEncoder {
    fn position(&self) -> i64 {
        self.position.load()
    }

    fn start(&self, shutdown: &Shutdown, workers: &BackgroundWorkers, on_start: OnStart) {
        note_start(&self.started, "hall");

        // one queue for both lines, so edges are decoded in delivery order
        let (tx, rx) = mpsc::channel(2 * EDGE_QUEUE_CAPACITY);
        self.a.add_callback(EdgeSender::new(Channel::A, tx.clone()));
        self.b.add_callback(EdgeSender::new(Channel::B, tx));

        let position = self.position.clone();
        let shutdown = shutdown.clone();
        workers.spawn(async move {
            on_start();
            decode(rx, &position, &shutdown).await;
        });
    }
}

/// Runs until cancelled, or until both lines have released their subscription.
async fn decode(mut rx: Receiver<Edge>, position: &TickCounter, shutdown: &Shutdown) {
    info!("hall encoder: decoding");
    let mut decoder = QuadratureDecoder::new();

    loop {
        if shutdown.is_cancelled() {
            break;
        }

        let (channel, level) = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            edge = rx.recv() => match edge {
                Some(edge) => edge,
                None => {
                    info!("hall encoder: both lines released");
                    break;
                }
            },
        };

        match decoder.step(channel, level) {
            Some(delta) => position.add(delta),
            None => debug!("hall encoder: duplicate {:?} {}, ignored", channel, level),
        }
    }
    info!("hall encoder: stopped at {}", position.load());
}
