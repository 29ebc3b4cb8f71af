use std::{io, result};
use thiserror::Error;

/// A type alias for `Result<T, multi_thread_daxpy::Error>`.
pub type Result<T> = result::Result<T, Error>;

/// The error type for the DAXPY benchmark.
///
/// Every variant is fatal: the binary reports it on stderr and exits with
/// status 1.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing command line arguments
    #[error("{0}")]
    Usage(String),

    /// The requested vector size is zero or negative
    #[error("Vector size must be positive (got {0})")]
    InvalidSize(i64),

    /// One of the vectors could not be allocated
    #[error(
        "Memory allocation failed: {message} (requested {requested_size} bytes with {alignment} byte alignment)"
    )]
    Allocation {
        /// Requested size in bytes, saturated on overflow
        requested_size: usize,
        /// Requested alignment in bytes
        alignment: usize,
        /// What went wrong
        message: String,
    },

    /// A worker thread could not be created
    #[error("Failed to create thread {worker}: {source}")]
    ThreadSpawn {
        /// Index of the worker
        worker: usize,
        /// Underlying OS error
        source: io::Error,
    },

    /// A worker thread could not be joined (it panicked)
    #[error("Failed to join thread {worker}")]
    ThreadJoin {
        /// Index of the worker
        worker: usize,
    },

    /// The computed output diverges from `alpha * a + b`
    #[error("Verification failed at index {index}: got {got:.6}, expected {expected:.6}")]
    Verification {
        /// First mismatching index
        index: usize,
        /// Value found in `c`
        got: f64,
        /// Value recomputed from `a` and `b`
        expected: f64,
    },
}

impl Error {
    /// Creates a new allocation error
    pub fn allocation<T: Into<String>>(requested_size: usize, alignment: usize, msg: T) -> Self {
        Error::Allocation {
            requested_size,
            alignment,
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_their_context() {
        assert_eq!(
            Error::InvalidSize(-3).to_string(),
            "Vector size must be positive (got -3)"
        );
        assert_eq!(
            Error::ThreadJoin { worker: 1 }.to_string(),
            "Failed to join thread 1"
        );
        assert_eq!(
            Error::Verification {
                index: 7,
                got: 1.0,
                expected: 1.5
            }
            .to_string(),
            "Verification failed at index 7: got 1.000000, expected 1.500000"
        );
    }

    #[test]
    fn test_allocation_message() {
        let err = Error::allocation(128, 64, "out of memory");
        assert_eq!(
            err.to_string(),
            "Memory allocation failed: out of memory (requested 128 bytes with 64 byte alignment)"
        );
    }

    #[test]
    fn test_spawn_error_keeps_source() {
        let err = Error::ThreadSpawn {
            worker: 0,
            source: io::Error::new(io::ErrorKind::Other, "resource temporarily unavailable"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to create thread 0: resource temporarily unavailable"
        );
    }
}
