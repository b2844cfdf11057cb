//! Errors raised while wiring an encoder to its board.

use core::fmt;

use definitions::ConfigError;

/// Errors that can occur when building an encoder from its configuration.
///
/// Nothing in the decode path itself can fail, so this only covers setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderError {
    /// The configuration itself is malformed.
    InvalidConfig(ConfigError),

    /// The board has no digital interrupt with this name.
    MissingInterrupt(String),

    /// A single-channel encoder needs the motor's commanded direction.
    MissingDirectionProvider,
}

impl From<ConfigError> for EncoderError {
    fn from(error: ConfigError) -> Self {
        EncoderError::InvalidConfig(error)
    }
}

impl fmt::Display for EncoderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncoderError::InvalidConfig(e) => write!(f, "invalid encoder config: {}", e),
            EncoderError::MissingInterrupt(name) => {
                write!(f, "no digital interrupt named {:?}", name)
            }
            EncoderError::MissingDirectionProvider => {
                write!(f, "single encoder needs a motor to borrow the direction from")
            }
        }
    }
}

impl std::error::Error for EncoderError {}
