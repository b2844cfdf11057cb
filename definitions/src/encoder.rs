use core::fmt;

use serde::{Deserialize, Serialize};

/// Name of the environment variable that turns on unexpected-pulse warnings.
pub const RPM_DEBUG_ENV: &str = "RPM_DEBUG";

/// How a motor's encoder is wired to the board.
///
/// Pins are referenced by the name of the digital interrupt the board exposes
/// for them, e.g.
/// ```json
/// { "type": "hall", "a": "enc-a", "b": "enc-b" }
/// { "type": "single", "i": "enc" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EncoderConfig {
    /// Two-channel quadrature encoder, direction is read from the phase of `a` and `b`.
    Hall { a: String, b: String },
    /// Single-channel pulse encoder, direction is borrowed from the motor.
    Single { i: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A pin name is empty.
    EmptyPinName,
    /// Both channels of a hall encoder point at the same interrupt.
    SamePin(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::EmptyPinName => write!(f, "encoder pin name must not be empty"),
            ConfigError::SamePin(name) => {
                write!(f, "hall encoder channels a and b both use pin {:?}", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl EncoderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pins().iter().any(|p| p.is_empty()) {
            return Err(ConfigError::EmptyPinName);
        }
        if let EncoderConfig::Hall { a, b } = self {
            if a == b {
                return Err(ConfigError::SamePin(a.clone()));
            }
        }
        Ok(())
    }

    /// Names of every interrupt this encoder subscribes to.
    pub fn pins(&self) -> Vec<&str> {
        match self {
            EncoderConfig::Hall { a, b } => vec![a.as_str(), b.as_str()],
            EncoderConfig::Single { i } => vec![i.as_str()],
        }
    }
}

/// Whether unexpected-pulse warnings were asked for through [RPM_DEBUG_ENV].
pub fn rpm_debug_from_env() -> bool {
    std::env::var_os(RPM_DEBUG_ENV).is_some_and(|v| !v.is_empty())
}
