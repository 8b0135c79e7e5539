//! Construction of TCP segment headers, built for learning purposes.
//!
//! Packs control bits, encodes the MSS, Window Scale, and Timestamps options
//! ([RFC 793], [RFC 7323]), and derives the data offset from the options. The
//! resulting [Header] is a plain value: checksum computation, serialization,
//! and transmission are left to the caller.
//!
//! [RFC 793]:  https://www.rfc-editor.org/rfc/rfc793
//! [RFC 7323]: https://www.rfc-editor.org/rfc/rfc7323

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod cli_args;
pub mod error;
pub mod header;
pub mod log;

pub use error::{Error, HeaderError, Result};
pub use header::{ControlFlags, Header, TcpOptions, Timestamps};
