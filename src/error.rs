//! Crate-level error types.

use std::fmt;

/// Errors produced by the orbitview crate.
#[derive(Debug)]
pub enum ViewportError {
    /// The object to frame has no renderable geometry (empty bounding
    /// volume). The camera is left untouched.
    InvalidTarget,
    /// No on-axis placement keeps the whole volume between the near and far
    /// clip planes. The camera is left untouched.
    ExceedsClipRange {
        /// View depth the farthest corner would need.
        depth: f32,
        /// Far clip plane distance of the camera.
        zfar: f32,
    },
    /// The controller was already torn down. Raised by a second
    /// `teardown()` and by every other operation after teardown.
    DoubleTeardown {
        /// Name of the operation that was attempted.
        operation: &'static str,
    },
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Debug snapshot serialization failure.
    Serialization(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget => {
                write!(f, "invalid target: object has no renderable geometry")
            }
            Self::ExceedsClipRange { depth, zfar } => write!(
                f,
                "volume needs view depth {depth:.1} beyond the far plane \
                 at {zfar}"
            ),
            Self::DoubleTeardown { operation } => {
                write!(
                    f,
                    "viewport already torn down (attempted `{operation}`)"
                )
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Serialization(msg) => {
                write!(f, "serialization error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ViewportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ViewportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
