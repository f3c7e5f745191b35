//! Structured runtime faults
//!
//! Every recoverable failure in the runtime travels as a [`Fault`] inside a
//! `Result`. Handlers match on the [`FaultKind`] discriminant and re-propagate
//! anything they do not explicitly name, so a fault can never be absorbed by a
//! handler declared for an unrelated kind.

use std::time::Duration;
use thiserror::Error;

/// A structured fault raised by a runtime component.
///
/// Created at the point of failure and propagated up the call stack with `?`
/// until a handler matching its kind consumes it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// An array access landed outside `[0, length)`.
    #[error("array index out of bounds: index {index}, length {length}")]
    OutOfBounds {
        /// The offending index exactly as the caller supplied it
        index: i32,

        /// Length of the array that rejected the access
        length: usize,
    },

    /// The image decoder collaborator rejected its input.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// A region extraction request fell outside its source image.
    #[error("region {width}x{height}+{x}+{y} outside source image {source_width}x{source_height}")]
    Region {
        /// Region left edge
        x: i32,

        /// Region top edge
        y: i32,

        /// Region width
        width: i32,

        /// Region height
        height: i32,

        /// Width of the source image
        source_width: u32,

        /// Height of the source image
        source_height: u32,
    },

    /// A polling wait was cut short before the awaited state was reached.
    #[error("wait interrupted")]
    Interrupted,

    /// A bounded wait expired without observing the awaited composite pass.
    #[error("composite pass not observed within {waited:?}")]
    Timeout {
        /// Total time spent polling before giving up
        waited: Duration,
    },
}

/// Discriminant of a [`Fault`], used by handlers to match what they catch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Array access outside valid bounds
    OutOfBounds,

    /// Image decoding failure
    Decode,

    /// Region extraction outside the source image
    Region,

    /// Interrupted wait
    Interrupted,

    /// Expired bounded wait
    Timeout,
}

impl Fault {
    /// Get the kind discriminant for handler matching
    pub fn kind(&self) -> FaultKind {
        match self {
            Self::OutOfBounds { .. } => FaultKind::OutOfBounds,
            Self::Decode(_) => FaultKind::Decode,
            Self::Region { .. } => FaultKind::Region,
            Self::Interrupted => FaultKind::Interrupted,
            Self::Timeout { .. } => FaultKind::Timeout,
        }
    }

    /// Check whether this fault matches the given kind
    pub fn is(&self, kind: FaultKind) -> bool {
        self.kind() == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let fault = Fault::OutOfBounds { index: 10, length: 1 };
        assert_eq!(fault.kind(), FaultKind::OutOfBounds);
        assert!(fault.is(FaultKind::OutOfBounds));
        assert!(!fault.is(FaultKind::Decode));

        assert_eq!(Fault::Interrupted.kind(), FaultKind::Interrupted);
        assert_eq!(
            Fault::Timeout { waited: Duration::from_millis(500) }.kind(),
            FaultKind::Timeout
        );
    }

    #[test]
    fn out_of_bounds_carries_index_and_length() {
        let fault = Fault::OutOfBounds { index: -3, length: 8 };
        let message = fault.to_string();
        assert!(message.contains("-3"));
        assert!(message.contains('8'));
    }

    #[test]
    fn unrelated_handler_must_rethrow() {
        // A handler that names only Decode sees a bounds fault pass through.
        fn absorb_decode(result: Result<(), Fault>) -> Result<(), Fault> {
            match result {
                Err(fault) if fault.is(FaultKind::Decode) => Ok(()),
                other => other,
            }
        }

        let bounds = Err(Fault::OutOfBounds { index: 10, length: 1 });
        assert_eq!(
            absorb_decode(bounds),
            Err(Fault::OutOfBounds { index: 10, length: 1 })
        );

        let decode = Err(Fault::Decode("bad magic".to_string()));
        assert_eq!(absorb_decode(decode), Ok(()));
    }
}
