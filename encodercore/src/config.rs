//! Building an encoder from its configuration.

use std::{
    collections::HashMap,
    sync::{Arc, Weak},
};

use definitions::EncoderConfig;

use crate::{
    DigitalInterrupt, DirectionProvider, Encoder, EncoderError,
    encoder::{HallEncoder, SingleEncoder},
};

/// Where the digital interrupts of a board are found, by name.
pub trait InterruptLookup {
    fn digital_interrupt_by_name(&self, name: &str) -> Option<Arc<dyn DigitalInterrupt>>;
}

impl<I: DigitalInterrupt + 'static> InterruptLookup for HashMap<String, Arc<I>> {
    fn digital_interrupt_by_name(&self, name: &str) -> Option<Arc<dyn DigitalInterrupt>> {
        self.get(name)
            .map(|i| i.clone() as Arc<dyn DigitalInterrupt>)
    }
}

fn interrupt(
    board: &dyn InterruptLookup,
    name: &str,
) -> Result<Arc<dyn DigitalInterrupt>, EncoderError> {
    board
        .digital_interrupt_by_name(name)
        .ok_or_else(|| EncoderError::MissingInterrupt(name.into()))
}

/// Build the encoder described by `config`.
///
/// `motor` is only needed (and only borrowed) by single-channel encoders,
/// `debug` turns on their unexpected-pulse warning, see
/// [definitions::rpm_debug_from_env].
pub fn build_encoder(
    config: &EncoderConfig,
    board: &dyn InterruptLookup,
    motor: Option<Weak<dyn DirectionProvider>>,
    debug: bool,
) -> Result<Arc<dyn Encoder>, EncoderError> {
    config.validate()?;
    match config {
        EncoderConfig::Hall { a, b } => Ok(Arc::new(HallEncoder::new(
            interrupt(board, a)?,
            interrupt(board, b)?,
        ))),
        EncoderConfig::Single { i } => {
            let motor = motor.ok_or(EncoderError::MissingDirectionProvider)?;
            Ok(Arc::new(SingleEncoder::new(interrupt(board, i)?, motor, debug)))
        }
    }
}

#[cfg(test)]
mod tests {
    use definitions::ConfigError;
    use test_log::test;

    use super::*;
    use crate::{
        Direction,
        common::AtomicDirection,
        interrupt::BasicDigitalInterrupt,
        test_harness::{started_signal, wait_for_position},
        workers::{BackgroundWorkers, Shutdown},
    };

    fn board(names: &[&str]) -> HashMap<String, Arc<BasicDigitalInterrupt>> {
        names
            .iter()
            .map(|n| (n.to_string(), Arc::new(BasicDigitalInterrupt::new(*n))))
            .collect()
    }

    #[test(tokio::test)]
    async fn test_build_hall() {
        let board = board(&["a", "b"]);
        let config = EncoderConfig::Hall {
            a: "a".into(),
            b: "b".into(),
        };
        let encoder = build_encoder(&config, &board, None, false).unwrap();
        let (shutdown, workers) = (Shutdown::new(), BackgroundWorkers::new());
        let (on_start, started) = started_signal();
        encoder.start(&shutdown, &workers, on_start);
        started.await.unwrap();
        board["b"].tick(false);
        wait_for_position(&*encoder, 1).await;
        shutdown.cancel();
        workers.wait().await;
    }

    #[test(tokio::test)]
    async fn test_build_single() {
        let board = board(&["enc"]);
        let motor = Arc::new(AtomicDirection::new());
        motor.set(Direction::Backward);
        let weak: Weak<dyn DirectionProvider> = Arc::downgrade(&motor) as _;
        let config = EncoderConfig::Single { i: "enc".into() };
        let encoder = build_encoder(&config, &board, Some(weak), false).unwrap();
        let (shutdown, workers) = (Shutdown::new(), BackgroundWorkers::new());
        let (on_start, started) = started_signal();
        encoder.start(&shutdown, &workers, on_start);
        started.await.unwrap();
        board["enc"].tick(true);
        wait_for_position(&*encoder, -1).await;
        shutdown.cancel();
        workers.wait().await;
    }

    #[test]
    fn test_missing_pieces() {
        let board = board(&["a"]);
        let hall = EncoderConfig::Hall {
            a: "a".into(),
            b: "nope".into(),
        };
        assert_eq!(
            build_encoder(&hall, &board, None, false).err(),
            Some(EncoderError::MissingInterrupt("nope".into()))
        );
        let single = EncoderConfig::Single { i: "a".into() };
        assert_eq!(
            build_encoder(&single, &board, None, false).err(),
            Some(EncoderError::MissingDirectionProvider)
        );
        let same = EncoderConfig::Hall {
            a: "a".into(),
            b: "a".into(),
        };
        assert_eq!(
            build_encoder(&same, &board, None, false).err(),
            Some(EncoderError::InvalidConfig(ConfigError::SamePin("a".into())))
        );
    }
}
