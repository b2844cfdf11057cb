use serde::{Deserialize, Serialize};

/// The direction a motor is currently being commanded to turn in.
///
/// This is what the motor logic *asked* for, not what the shaft is physically
/// doing: a motor coasting after a stop command reports [Direction::Neutral].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
    #[default]
    Neutral,
}

impl Direction {
    /// How many ticks a single pulse counts for while moving in this direction.
    pub fn tick_delta(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
            Direction::Neutral => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction() {
        let d: Direction = serde_json::from_str("\"backward\"").unwrap();
        assert_eq!(d, Direction::Backward);
        assert_eq!(Direction::default(), Direction::Neutral);
    }

    #[test]
    fn test_tick_delta() {
        assert_eq!(Direction::Forward.tick_delta(), 1);
        assert_eq!(Direction::Backward.tick_delta(), -1);
        assert_eq!(Direction::Neutral.tick_delta(), 0);
    }
}
