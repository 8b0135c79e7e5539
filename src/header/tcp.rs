use std::fmt;

use super::{ControlFlags, TcpOptions};

/// TCP Segment Header.
///
/// RFC 793 (3.1), with the CWR and ECE control bits of RFC 3168.
///
/// ```text
///   0                   1                   2                   3
///     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |          Source Port          |       Destination Port        |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |                        Sequence Number                        |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |                    Acknowledgment Number                      |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |  Data |       |C|E|U|A|P|R|S|F|                               |
///    | Offset| Rsrvd |W|C|R|C|S|S|Y|I|            Window             |
///    |       |       |R|E|G|K|H|T|N|N|                               |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |           Checksum            |         Urgent Pointer        |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///    |                    Options                    |    Padding    |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// A header is built in one shot and never modified afterwards. The checksum
/// is left as zero: it covers the IPv4 pseudo header and payload, so it must
/// be filled in by whoever places the header on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// The source port number.
    src_port: u16,
    /// The destination port number.
    dst_port: u16,
    /// The sequence number of the first data octet in this segment
    /// (except when SYN is present). If SYN is present the sequence number is
    /// the initial sequence number (ISN) and the first data octet is ISN+1.
    seq_number: u32,
    /// If the ACK control bit is set this field contains the value of the next
    /// sequence number the sender of the segment is expecting to receive.
    ack_number: u32,
    /// The number of 32 bit words in the TCP Header. This indicates where the
    /// data begins.
    data_offset: u8,
    /// Control bits, see [ControlFlags].
    control_flags: u8,
    /// The number of data octets beginning with the one indicated in the
    /// acknowledgment field which the sender of this segment is willing to
    /// accept.
    window: u16,
    /// Always zero on construction.
    checksum: u16,
    /// Positive offset from the sequence number in this segment, pointing to
    /// the octet following the urgent data. Only interpreted in segments with
    /// the URG control bit set.
    urgent_pointer: u16,
    /// Options, aligned to a 32-bit boundary.
    options: TcpOptions,
}

impl Header {
    /// Creates a new TCP header from the provided fields.
    ///
    /// The data offset is derived from the length of `options`, and the
    /// checksum is set to zero.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        src_port: u16,
        dst_port: u16,
        seq_number: u32,
        ack_number: u32,
        control_flags: u8,
        window: u16,
        urgent_pointer: u16,
        options: TcpOptions,
    ) -> Self {
        Self {
            src_port,
            dst_port,
            seq_number,
            ack_number,
            data_offset: options.data_offset(),
            control_flags,
            window,
            checksum: 0,
            urgent_pointer,
            options,
        }
    }

    /// Creates a new TCP header from the provided fields and already-encoded
    /// option bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `options` is not a multiple of 4 bytes long, or
    /// exceeds [TcpOptions::MAX_OPTIONS_LEN].
    #[allow(clippy::too_many_arguments)]
    pub fn with_raw_options(
        src_port: u16,
        dst_port: u16,
        seq_number: u32,
        ack_number: u32,
        control_flags: u8,
        window: u16,
        urgent_pointer: u16,
        options: &[u8],
    ) -> crate::Result<Self> {
        let options = TcpOptions::try_from(options)?;

        Ok(Self::new(
            src_port,
            dst_port,
            seq_number,
            ack_number,
            control_flags,
            window,
            urgent_pointer,
            options,
        ))
    }

    /// Returns the Source Port field from the TCP header.
    pub fn src_port(&self) -> u16 {
        self.src_port
    }

    /// Returns the Destination Port field from the TCP header.
    pub fn dst_port(&self) -> u16 {
        self.dst_port
    }

    /// Returns the Sequence Number field from the TCP header.
    pub fn seq_number(&self) -> u32 {
        self.seq_number
    }

    /// Returns the Acknowledgment Number field from the TCP header.
    pub fn ack_number(&self) -> u32 {
        self.ack_number
    }

    /// Returns the Data Offset field from the TCP header.
    pub fn data_offset(&self) -> u8 {
        self.data_offset
    }

    /// Returns the packed control bits from the TCP header.
    pub fn control_flags(&self) -> u8 {
        self.control_flags
    }

    /// Returns the control bits from the TCP header as named flags.
    pub fn flags(&self) -> ControlFlags {
        ControlFlags::from_bits(self.control_flags)
    }

    /// Returns the Window field from the TCP header.
    pub fn window(&self) -> u16 {
        self.window
    }

    /// Returns the Checksum field from the TCP header.
    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    /// Returns the Urgent Pointer field from the TCP header.
    pub fn urgent_pointer(&self) -> u16 {
        self.urgent_pointer
    }

    /// Returns the options of the TCP header.
    pub fn options(&self) -> &TcpOptions {
        &self.options
    }

    /// Returns the length of the TCP header in bytes, including options.
    pub fn header_len(&self) -> usize {
        (self.data_offset as usize) << 2
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} [{}] seq={} ack={} win={} urp={} off={} opts={:02x?}",
            self.src_port,
            self.dst_port,
            self.flags(),
            self.seq_number,
            self.ack_number,
            self.window,
            self.urgent_pointer,
            self.data_offset,
            self.options.as_slice(),
        )
    }
}

/// Returns the data offset (in 32-bit words) of a TCP header carrying the
/// provided option bytes, i.e. `5 + options.len() / 4`.
///
/// # Errors
///
/// Returns an error if `options` is not a multiple of 4 bytes long, or
/// exceeds [TcpOptions::MAX_OPTIONS_LEN] (a data offset above 15).
pub fn data_offset(options: &[u8]) -> crate::Result<u8> {
    TcpOptions::try_from(options).map(|opts| opts.data_offset())
}
