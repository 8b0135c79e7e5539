//! Construction of TCP headers: control bits, options, and data offset.

mod flags;
pub use flags::{ACK, CWR, ControlFlags, ECE, FIN, PSH, RST, SYN, URG, control_flags};

mod options;
pub use options::{OptionKind, TcpOptions, Timestamps};

mod tcp;
pub use tcp::{Header, data_offset};

/// Length of a TCP header without options, in bytes.
pub const MIN_HEADER_LEN: usize = 20;

/// Data offset of a TCP header without options, in 32-bit words.
pub const MIN_DATA_OFFSET: u8 = 5;

/// Maximum data offset of a TCP header, limited by its 4-bit field.
pub const MAX_DATA_OFFSET: u8 = 15;
