use crate::{Error, HeaderError};

/// Values carried by the TCP Timestamps option (RFC 7323 3.2).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timestamps {
    /// Timestamp Value (TSval): the current value of the sender's timestamp
    /// clock.
    pub value: u32,
    /// Timestamp Echo Reply (TSecr): the TSval most recently received from the
    /// remote TCP. Zero when the sender has nothing to echo.
    pub echo_reply: u32,
}

impl Timestamps {
    /// Creates a new Timestamps option value.
    pub fn new(value: u32, echo_reply: u32) -> Self {
        Self { value, echo_reply }
    }
}

/// Options within a TCP header.
///
/// The options are always terminated by an End of Option List and padded with
/// zeros so their length is a multiple of 4 bytes (one 32-bit word).
#[derive(Debug, Clone, Copy)]
pub struct TcpOptions {
    /// The total number of bytes occupying the buffer.
    len: usize,
    /// Fixed-size array of raw options bytes.
    buf: [u8; Self::MAX_OPTIONS_LEN],
}

impl TcpOptions {
    /// Maximum length of TCP options in bytes.
    ///
    /// Given the 4-bit data offset, a TCP header is at most 15 words
    /// (60 bytes), 5 of which are the fixed fields.
    pub const MAX_OPTIONS_LEN: usize = 40;

    /// Length of the MSS option in bytes.
    pub const MSS_LEN: u8 = 4;

    /// Length of the Window Scale option in bytes.
    pub const WSCALE_LEN: u8 = 3;

    /// Length of the Timestamps option in bytes.
    pub const TIMESTAMPS_LEN: u8 = 10;

    /// Creates TCP options carrying each of the provided values, in the order
    /// MSS, Window Scale, Timestamps.
    ///
    /// ```text
    ///    +--------+--------+---------+--------+
    ///    |00000010|00000100|   max seg size   |   if `mss` is some
    ///    +--------+--------+---------+--------+
    ///    +--------+--------+--------+
    ///    |00000011|00000011| shift  |             if `window_scale` is some
    ///    +--------+--------+--------+
    ///    +--------+--------+-------------------+-------------------+
    ///    |00001000|00001010|   TS Value (4)    | TS Echo Reply (4) |
    ///    +--------+--------+-------------------+-------------------+
    ///                                             if `timestamps` is some
    ///    +--------+
    ///    |00000000|  End of Option List, followed by zero padding
    ///    +--------+
    /// ```
    ///
    /// The result is at most 20 bytes, so it always fits.
    pub fn new(mss: Option<u16>, window_scale: Option<u8>, timestamps: Option<Timestamps>) -> Self {
        let mut opts = Self::empty();

        if let Some(mss) = mss {
            let [hi, lo] = mss.to_be_bytes();
            opts.push(&[OptionKind::MSS as u8, Self::MSS_LEN, hi, lo]);
        }

        if let Some(shift) = window_scale {
            opts.push(&[OptionKind::WSCALE as u8, Self::WSCALE_LEN, shift]);
        }

        if let Some(ts) = timestamps {
            opts.push(&[OptionKind::TIMESTAMPS as u8, Self::TIMESTAMPS_LEN]);
            opts.push(&ts.value.to_be_bytes());
            opts.push(&ts.echo_reply.to_be_bytes());
        }

        opts.push(&[OptionKind::EOL as u8]);

        // Padding bytes are already zero in the buffer; round the length up to
        // the next 32-bit boundary.
        opts.len = (opts.len + 3) & !3;

        opts
    }

    /// Creates TCP options where a zero value marks an option as absent.
    ///
    /// `mss`, `window_scale`, and `timestamp` are omitted when zero. The
    /// Timestamps option is included whenever `timestamp` is non-zero, with
    /// `echo_timestamp` copied verbatim even if it is zero.
    pub fn from_sentinels(mss: u16, window_scale: u8, timestamp: u32, echo_timestamp: u32) -> Self {
        Self::new(
            (mss != 0).then_some(mss),
            (window_scale != 0).then_some(window_scale),
            (timestamp != 0).then(|| Timestamps::new(timestamp, echo_timestamp)),
        )
    }

    /// Creates TCP options with no bytes, for a header without options.
    pub fn empty() -> Self {
        Self {
            len: 0,
            buf: [0u8; Self::MAX_OPTIONS_LEN],
        }
    }

    /// Returns the data offset (in 32-bit words) of a TCP header carrying
    /// these options.
    pub fn data_offset(&self) -> u8 {
        debug_assert!(self.len & 0b11 == 0);

        super::MIN_DATA_OFFSET + (self.len >> 2) as u8
    }

    /// Returns the length of the TCP options in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the TCP options contains no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an immutable slice containing the TCP options.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Appends raw bytes to the options.
    fn push(&mut self, bytes: &[u8]) {
        let end = self.len + bytes.len();
        debug_assert!(end <= Self::MAX_OPTIONS_LEN);

        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
    }
}

impl TryFrom<&[u8]> for TcpOptions {
    type Error = Error;

    /// Wraps already-encoded option bytes.
    ///
    /// The bytes are not interpreted, only their length is checked: it must be
    /// a multiple of 4 and at most [TcpOptions::MAX_OPTIONS_LEN].
    fn try_from(opts_slice: &[u8]) -> Result<Self, Self::Error> {
        let len = opts_slice.len();

        if len > Self::MAX_OPTIONS_LEN {
            return Err(Error::Header(HeaderError::OptionsTooLong {
                provided: len,
                max: Self::MAX_OPTIONS_LEN,
            }));
        }

        // A multiple of 4 always has the last two bits cleared.
        if len & 0b11 != 0 {
            return Err(Error::Header(HeaderError::MisalignedOptions { provided: len }));
        }

        let mut opts = Self::empty();
        opts.push(opts_slice);

        Ok(opts)
    }
}

impl Default for TcpOptions {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

impl PartialEq for TcpOptions {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for TcpOptions {}

/// Kinds of TCP options emitted by [TcpOptions].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum OptionKind {
    /// End of Option List (RFC 793 3.1)
    ///
    /// ```text
    ///        +--------+
    ///        |00000000|
    ///        +--------+
    ///         Kind=0
    /// ```
    ///
    /// Marks the end of all options, not the end of each option. Also used as
    /// the padding byte.
    EOL = 0,
    /// Maximum Segment Size (RFC 793 3.1)
    ///
    /// ```text
    ///        +--------+--------+---------+--------+
    ///        |00000010|00000100|   max seg size   |
    ///        +--------+--------+---------+--------+
    ///         Kind=2   Length=4
    /// ```
    MSS = 2,
    /// Window Scale (RFC 7323 2.2)
    ///
    /// ```text
    ///        +---------+---------+---------+
    ///        | Kind=3  |Length=3 |shift.cnt|
    ///        +---------+---------+---------+
    /// ```
    WSCALE = 3,
    /// Timestamps (RFC 7323 3.2)
    ///
    /// ```text
    ///        +-------+-------+---------------------+---------------------+
    ///        |Kind=8 |  10   |   TS Value (TSval)  |TS Echo Reply (TSecr)|
    ///        +-------+-------+---------------------+---------------------+
    ///            1       1              4                     4
    /// ```
    TIMESTAMPS = 8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tcp_options_none_valid() {
        let opts = TcpOptions::from_sentinels(0, 0, 0, 0);

        assert_eq!(opts.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(opts, TcpOptions::default());
    }

    #[test]
    fn tcp_options_mss_valid() {
        let opts = TcpOptions::from_sentinels(65535, 0, 0, 0);
        assert_eq!(opts.as_slice(), &[2, 4, 255, 255, 0, 0, 0, 0]);

        let opts = TcpOptions::new(Some(1460), None, None);
        assert_eq!(opts.as_slice(), &[2, 4, 0x05, 0xb4, 0, 0, 0, 0]);
    }

    #[test]
    fn tcp_options_window_scale_valid() {
        let opts = TcpOptions::from_sentinels(0, 255, 0, 0);

        assert_eq!(opts.as_slice(), &[3, 3, 255, 0]);
    }

    #[test]
    fn tcp_options_timestamps_valid() {
        let opts = TcpOptions::from_sentinels(0, 0, u32::MAX, u32::MAX);

        assert_eq!(
            opts.as_slice(),
            &[8, 10, 255, 255, 255, 255, 255, 255, 255, 255, 0, 0]
        );

        let opts = TcpOptions::new(None, None, Some(Timestamps::new(0x01020304, 0x0a0b0c0d)));

        assert_eq!(
            opts.as_slice(),
            &[8, 10, 0x01, 0x02, 0x03, 0x04, 0x0a, 0x0b, 0x0c, 0x0d, 0, 0]
        );
    }

    #[test]
    fn tcp_options_all_valid() {
        let opts = TcpOptions::from_sentinels(65535, 255, u32::MAX, u32::MAX);

        assert_eq!(
            opts.as_slice(),
            &[
                2, 4, 255, 255, 3, 3, 255, 8, 10, 255, 255, 255, 255, 255, 255, 255, 255, 0, 0, 0
            ]
        );
        assert_eq!(opts.data_offset(), 10);
    }

    #[test]
    fn tcp_options_zero_echo_timestamp_valid() {
        // A zero echo reply is a legitimate value and is still emitted.
        let opts = TcpOptions::from_sentinels(0, 0, 7, 0);
        assert_eq!(opts.as_slice(), &[8, 10, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0]);

        // A zero timestamp suppresses the whole option, whatever the echo.
        let opts = TcpOptions::from_sentinels(0, 0, 0, 7);
        assert_eq!(opts.as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn tcp_options_explicit_zero_values_valid() {
        // With explicit presence, zero values are encoded rather than treated
        // as absent.
        let opts = TcpOptions::new(Some(0), Some(0), Some(Timestamps::default()));

        assert_eq!(
            opts.as_slice(),
            &[2, 4, 0, 0, 3, 3, 0, 8, 10, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn tcp_options_alignment_valid() {
        for mss in [None, Some(1)] {
            for window_scale in [None, Some(14)] {
                for timestamps in [None, Some(Timestamps::new(1, 0))] {
                    let opts = TcpOptions::new(mss, window_scale, timestamps);

                    assert_eq!(opts.len() % 4, 0, "unaligned: {:?}", opts.as_slice());
                    assert!(opts.len() <= TcpOptions::MAX_OPTIONS_LEN);
                    assert_eq!(opts.as_slice().last(), Some(&(OptionKind::EOL as u8)));
                    assert_eq!(opts.data_offset() as usize, 5 + opts.len() / 4);
                }
            }
        }
    }

    #[test]
    fn tcp_options_try_from_valid() {
        // NOP, NOP, SACK-permitted: not produced by `new`, but accepted as raw
        // bytes.
        let raw: [u8; 4] = [1, 1, 4, 2];

        let opts = TcpOptions::try_from(&raw[..]).unwrap();

        assert_eq!(opts.as_slice(), &raw);
        assert_eq!(opts.data_offset(), 6);
        assert!(TcpOptions::try_from(&[0u8; 0][..]).unwrap().is_empty());
    }

    #[test]
    fn tcp_options_try_from_misaligned_invalid() {
        let err = TcpOptions::try_from(&[3u8, 3, 7][..]).unwrap_err();

        assert!(matches!(
            err,
            Error::Header(HeaderError::MisalignedOptions { provided: 3 })
        ));
    }

    #[test]
    fn tcp_options_try_from_too_long_invalid() {
        let err = TcpOptions::try_from(&[0u8; 44][..]).unwrap_err();

        assert!(matches!(
            err,
            Error::Header(HeaderError::OptionsTooLong {
                provided: 44,
                max: 40
            })
        ));
    }
}
