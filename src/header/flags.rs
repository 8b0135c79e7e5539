use std::fmt;
use std::str::FromStr;

use crate::HeaderError;

/// Congestion Window Reduced (RFC 3168).
pub const CWR: u8 = 0b1000_0000;
/// ECN-Echo (RFC 3168).
pub const ECE: u8 = 0b0100_0000;
/// Urgent Pointer field significant.
pub const URG: u8 = 0b0010_0000;
/// Acknowledgment field significant.
pub const ACK: u8 = 0b0001_0000;
/// Push Function.
pub const PSH: u8 = 0b0000_1000;
/// Reset the connection.
pub const RST: u8 = 0b0000_0100;
/// Synchronize sequence numbers.
pub const SYN: u8 = 0b0000_0010;
/// No more data from sender.
pub const FIN: u8 = 0b0000_0001;

/// Flag names paired with their bit values, from the MSB to the LSB.
const NAMES: [(&str, u8); 8] = [
    ("CWR", CWR),
    ("ECE", ECE),
    ("URG", URG),
    ("ACK", ACK),
    ("PSH", PSH),
    ("RST", RST),
    ("SYN", SYN),
    ("FIN", FIN),
];

/// Control bits of a TCP header.
///
/// ```text
///      0   1   2   3   4   5   6   7
///    +---+---+---+---+---+---+---+---+
///    |CWR|ECE|URG|ACK|PSH|RST|SYN|FIN|
///    +---+---+---+---+---+---+---+---+
/// ```
///
/// The NS bit (RFC 3540) lives in the reserved nibble and is not represented.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct ControlFlags {
    pub cwr: bool,
    pub ece: bool,
    pub urg: bool,
    pub ack: bool,
    pub psh: bool,
    pub rst: bool,
    pub syn: bool,
    pub fin: bool,
}

impl ControlFlags {
    /// Packs the control bits into a single byte.
    ///
    /// Each set flag contributes its bit value (e.g., [SYN] and [ACK] yield
    /// `0x12`). No flags set yields `0`, all flags set yields `0xFF`.
    pub fn bits(&self) -> u8 {
        let mut bits = 0u8;

        if self.cwr {
            bits |= CWR;
        }
        if self.ece {
            bits |= ECE;
        }
        if self.urg {
            bits |= URG;
        }
        if self.ack {
            bits |= ACK;
        }
        if self.psh {
            bits |= PSH;
        }
        if self.rst {
            bits |= RST;
        }
        if self.syn {
            bits |= SYN;
        }
        if self.fin {
            bits |= FIN;
        }

        bits
    }

    /// Returns the control bits set in the provided byte.
    pub fn from_bits(bits: u8) -> Self {
        Self {
            cwr: bits & CWR != 0,
            ece: bits & ECE != 0,
            urg: bits & URG != 0,
            ack: bits & ACK != 0,
            psh: bits & PSH != 0,
            rst: bits & RST != 0,
            syn: bits & SYN != 0,
            fin: bits & FIN != 0,
        }
    }
}

/// Packs the provided control bits into a single byte.
///
/// Positional form of [ControlFlags::bits].
#[allow(clippy::too_many_arguments)]
pub fn control_flags(
    cwr: bool,
    ece: bool,
    urg: bool,
    ack: bool,
    psh: bool,
    rst: bool,
    syn: bool,
    fin: bool,
) -> u8 {
    ControlFlags {
        cwr,
        ece,
        urg,
        ack,
        psh,
        rst,
        syn,
        fin,
    }
    .bits()
}

impl From<ControlFlags> for u8 {
    fn from(flags: ControlFlags) -> u8 {
        flags.bits()
    }
}

impl fmt::Display for ControlFlags {
    /// Formats the set flags as `SYN|ACK`, or `-` if none are set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.bits();

        if bits == 0 {
            return f.write_str("-");
        }

        let mut sep = "";
        for (name, bit) in NAMES {
            if bits & bit != 0 {
                write!(f, "{sep}{name}")?;
                sep = "|";
            }
        }

        Ok(())
    }
}

impl FromStr for ControlFlags {
    type Err = HeaderError;

    /// Parses a comma or `|` separated list of flag names (case-insensitive),
    /// such as `syn,ack`. An empty string or `-` yields no flags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = 0u8;

        for name in s.split([',', '|']).map(str::trim) {
            if name.is_empty() || name == "-" {
                continue;
            }

            let bit = NAMES
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|&(_, bit)| bit)
                .ok_or_else(|| HeaderError::InvalidFlag(name.to_string()))?;

            bits |= bit;
        }

        Ok(Self::from_bits(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_flags_single_bit_valid() {
        assert_eq!(
            control_flags(true, false, false, false, false, false, false, false),
            128
        );
        assert_eq!(
            control_flags(false, true, false, false, false, false, false, false),
            64
        );
        assert_eq!(
            control_flags(false, false, true, false, false, false, false, false),
            32
        );
        assert_eq!(
            control_flags(false, false, false, true, false, false, false, false),
            16
        );
        assert_eq!(
            control_flags(false, false, false, false, true, false, false, false),
            8
        );
        assert_eq!(
            control_flags(false, false, false, false, false, true, false, false),
            4
        );
        assert_eq!(
            control_flags(false, false, false, false, false, false, true, false),
            2
        );
        assert_eq!(
            control_flags(false, false, false, false, false, false, false, true),
            1
        );
    }

    #[test]
    fn control_flags_empty_and_full_valid() {
        assert_eq!(ControlFlags::default().bits(), 0);
        assert_eq!(
            control_flags(true, true, true, true, true, true, true, true),
            255
        );
    }

    #[test]
    fn control_flags_all_combinations_valid() {
        // Every combination of the 8 inputs must yield the OR of the bits of
        // the inputs set.
        for combo in 0u16..=0xFF {
            let set = |i: u16| combo & (1 << i) != 0;

            let (cwr, ece, urg, ack) = (set(7), set(6), set(5), set(4));
            let (psh, rst, syn, fin) = (set(3), set(2), set(1), set(0));

            let expected = [cwr, ece, urg, ack, psh, rst, syn, fin]
                .iter()
                .zip(NAMES.iter())
                .filter(|(on, _)| **on)
                .fold(0u8, |acc, (_, (_, bit))| acc | bit);

            let bits = control_flags(cwr, ece, urg, ack, psh, rst, syn, fin);

            assert_eq!(bits, expected, "failed for {combo:08b}");
            assert_eq!(bits as u16, combo, "failed for {combo:08b}");
            assert_eq!(ControlFlags::from_bits(bits).bits(), bits);
        }
    }

    #[test]
    fn control_flags_display_valid() {
        let flags = ControlFlags {
            syn: true,
            ack: true,
            ..Default::default()
        };

        assert_eq!(flags.to_string(), "ACK|SYN");
        assert_eq!(ControlFlags::default().to_string(), "-");
        assert_eq!(
            ControlFlags::from_bits(0xFF).to_string(),
            "CWR|ECE|URG|ACK|PSH|RST|SYN|FIN"
        );
    }

    #[test]
    fn control_flags_parse_valid() {
        let flags: ControlFlags = "syn, ACK".parse().unwrap();
        assert_eq!(flags.bits(), SYN | ACK);

        let flags: ControlFlags = "FIN|psh".parse().unwrap();
        assert_eq!(flags.bits(), FIN | PSH);

        let flags: ControlFlags = "".parse().unwrap();
        assert_eq!(flags.bits(), 0);
    }

    #[test]
    fn control_flags_parse_invalid() {
        let err = "SYN,NS".parse::<ControlFlags>().unwrap_err();

        assert_eq!(err, HeaderError::InvalidFlag("NS".to_string()));
    }
}
