//! Error types for TCP header construction and the `tcphdr` command-line
//! interface.

use std::{error, fmt, result};

/// A convenience wrapper around `Result` for [crate::Error].
pub type Result<T> = result::Result<T, Error>;

/// Set of errors that can occur while building a TCP header.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error creating a TCP header or its options.
    Header(HeaderError),
    /// Invalid command-line arguments.
    Args(String),
}

impl error::Error for Error {}

impl From<HeaderError> for Error {
    fn from(err: HeaderError) -> Error {
        Error::Header(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Header(ref err) => fmt::Display::fmt(err, f),
            Error::Args(ref msg) => write!(f, "invalid arguments: {msg}"),
        }
    }
}

/// Error occurred while trying to create a TCP header or its options.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum HeaderError {
    /// TCP options length is not a multiple of 4 bytes.
    ///
    /// The data offset counts 32-bit words, so unaligned options have no
    /// representable header length.
    MisalignedOptions { provided: usize },
    /// TCP options length exceeds the maximum allowed by the 4-bit data
    /// offset.
    OptionsTooLong { provided: usize, max: usize },
    /// Unknown TCP control flag name.
    InvalidFlag(String),
}

impl error::Error for HeaderError {}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            HeaderError::MisalignedOptions { provided } => {
                write!(
                    f,
                    "invalid TCP options length: {provided} bytes (must be a multiple of 4 bytes)"
                )
            }
            HeaderError::OptionsTooLong { provided, max } => {
                write!(
                    f,
                    "invalid TCP options length: {provided} bytes (exceeds maximum allowed {max} bytes)"
                )
            }
            HeaderError::InvalidFlag(ref name) => {
                write!(
                    f,
                    "invalid TCP control flag: {name:?} (expected one of CWR, ECE, URG, ACK, PSH, RST, SYN, FIN)"
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_forwards_header_error_valid() {
        let err = Error::from(HeaderError::MisalignedOptions { provided: 3 });

        assert_eq!(
            err.to_string(),
            "invalid TCP options length: 3 bytes (must be a multiple of 4 bytes)"
        );
    }

    #[test]
    fn error_display_args_valid() {
        let err = Error::Args("missing value for --mss".to_string());

        assert_eq!(err.to_string(), "invalid arguments: missing value for --mss");
    }
}
