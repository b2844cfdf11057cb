/// One of the two lines of a quadrature encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    A,
    B,
}

/// Quadrature decode state machine.
///
/// ```text
///        1    2    3    4    1
///           +---------+         +--   high
///   A       |         |         |
///   --------+         +---------+     low
///                +---------+
///   B            |         |          high
///   -------------+         +-------   low
/// ```
///
/// The two lines trace the Gray-code cycle (low,low) → (low,high) →
/// (high,high) → (high,low). The pair of levels alone doesn't say which way
/// the shaft turned, the line that just moved does: landing on a state
/// because A changed counts the opposite way as landing there because B did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadratureDecoder {
    a: bool,
    b: bool,
    last: (Channel, bool),
}

impl QuadratureDecoder {
    /// Both lines high, last event from A going high.
    pub const fn new() -> Self {
        Self {
            a: true,
            b: true,
            last: (Channel::A, true),
        }
    }

    /// Feed one delivered event, returns the tick delta it stands for.
    ///
    /// An event equal to the previous one can't be a real transition (bounce
    /// or a redundant interrupt) and yields `None`.
    pub fn step(&mut self, channel: Channel, level: bool) -> Option<i64> {
        match channel {
            Channel::A => self.a = level,
            Channel::B => self.b = level,
        }

        if self.last == (channel, level) {
            return None;
        }
        self.last = (channel, level);

        let moved_by_a = match (self.a, self.b) {
            (false, false) => 1,
            (false, true) => -1,
            (true, true) => 1,
            (true, false) => -1,
        };
        Some(match channel {
            Channel::A => moved_by_a,
            Channel::B => -moved_by_a,
        })
    }

    /// Last seen levels of (A, B).
    pub fn levels(&self) -> (bool, bool) {
        (self.a, self.b)
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::{BACKWARD_CYCLE, FORWARD_CYCLE};
    use Channel::*;

    fn run(decoder: &mut QuadratureDecoder, events: &[(Channel, bool)]) -> i64 {
        events
            .iter()
            .filter_map(|&(c, l)| decoder.step(c, l))
            .sum()
    }

    #[test]
    fn test_forward_counts_up_by_one() {
        let mut d = QuadratureDecoder::new();
        for _ in 0..3 {
            for &(c, l) in FORWARD_CYCLE.iter() {
                assert_eq!(d.step(c, l), Some(1));
            }
        }
        assert_eq!(d.levels(), (true, true));
    }

    #[test]
    fn test_backward_counts_down_by_one() {
        let mut d = QuadratureDecoder::new();
        for _ in 0..3 {
            for &(c, l) in BACKWARD_CYCLE.iter() {
                assert_eq!(d.step(c, l), Some(-1));
            }
        }
    }

    #[test]
    fn test_forward_then_backward_returns_to_zero() {
        let mut d = QuadratureDecoder::new();
        assert_eq!(run(&mut d, &FORWARD_CYCLE), 4);
        assert_eq!(run(&mut d, &BACKWARD_CYCLE), -4);
    }

    #[test]
    fn test_direction_change_mid_cycle() {
        let mut d = QuadratureDecoder::new();
        // forward two steps, then back over the same two edges
        assert_eq!(run(&mut d, &[(B, false), (A, false)]), 2);
        assert_eq!(run(&mut d, &[(A, true), (B, true)]), -2);
        assert_eq!(d.levels(), (true, true));
    }

    #[test]
    fn test_duplicate_is_ignored() {
        let mut d = QuadratureDecoder::new();
        assert_eq!(d.step(B, false), Some(1));
        assert_eq!(d.step(B, false), None);
        assert_eq!(d.step(B, false), None);
        assert_eq!(d.step(A, false), Some(1));
    }

    #[test]
    fn test_initial_state_counts_as_previous_event() {
        let mut d = QuadratureDecoder::new();
        assert_eq!(d.step(A, true), None);
    }

    #[test]
    fn test_example_sequence() {
        let mut d = QuadratureDecoder::new();
        let mut position = 0;
        position += d.step(A, false).unwrap_or(0);
        assert_eq!(position, -1);
        position += d.step(B, false).unwrap_or(0);
        assert_eq!(position, -2);
        position += d.step(B, false).unwrap_or(0);
        assert_eq!(position, -2);
    }

    #[test]
    fn test_repeat_after_other_line_is_not_a_duplicate() {
        // only exact back-to-back repeats are filtered
        let mut d = QuadratureDecoder::new();
        assert_eq!(d.step(A, false), Some(-1));
        assert_eq!(d.step(B, false), Some(-1));
        assert_eq!(d.step(A, false), Some(1));
    }
}
