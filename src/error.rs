//!Error types

use thiserror::Error;

use crate::{Algorithm, Level};

///Failure of a `shrink` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    ///Algorithm is not compiled in or does not accept requested level.
    #[error("invalid configuration: algorithm '{algorithm}' with level '{level}'")]
    InvalidConfiguration {
        ///Requested algorithm.
        algorithm: Algorithm,
        ///Requested level.
        level: Level,
    },

    ///Operation on process-wide context before it was initialized.
    ///
    ///Only reachable through [legacy](crate::legacy).
    #[error("invalid configuration: no context initialized")]
    Uninitialized,

    ///Buffer sizes violate bounds of the algorithm.
    ///
    ///Detected before codec is invoked, so nothing is written.
    #[error("integrity error: {len} bytes of input against {capacity} bytes of capacity (bound {bound})")]
    Integrity {
        ///Input length.
        len: usize,
        ///Destination capacity.
        capacity: usize,
        ///Bound computed from `capacity`.
        bound: usize,
    },

    ///Underlying codec reported failure.
    #[error("library failure: {codec}")]
    LibraryFailure {
        ///Codec tag.
        codec: &'static str,
    },

    ///Unable to acquire memory.
    #[error("system resource failure: unable to allocate {size} bytes")]
    SystemResourceFailure {
        ///Requested size.
        size: usize,
    },
}

impl Error {
    #[inline(always)]
    pub(crate) const fn library(codec: &'static str) -> Self {
        Error::LibraryFailure {
            codec,
        }
    }

    #[inline]
    ///Returns whether error is due to invalid configuration or missing context.
    pub const fn is_invalid_configuration(&self) -> bool {
        matches!(self, Error::InvalidConfiguration { .. } | Error::Uninitialized)
    }
}

///Result type for `shrink` operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_invalid_configuration() {
        let error = Error::InvalidConfiguration {
            algorithm: Algorithm::Lzma,
            level: Level::None,
        };
        let text = error.to_string();
        assert!(text.contains("lzma"));
        assert!(text.contains("none"));
        assert!(error.is_invalid_configuration());
        assert!(Error::Uninitialized.is_invalid_configuration());
    }

    #[test]
    fn should_describe_integrity() {
        let error = Error::Integrity {
            len: 4096,
            capacity: 1024,
            bound: 1024,
        };
        let text = error.to_string();
        assert!(text.contains("4096"));
        assert!(text.contains("1024"));
        assert!(!error.is_invalid_configuration());
    }

    #[test]
    fn should_be_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<Error>();
    }
}
