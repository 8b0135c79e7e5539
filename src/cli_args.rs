//! Command-line arguments of the `tcphdr` binary.

use std::str::FromStr;

use crate::{ControlFlags, Error, Header, Result, TcpOptions, Timestamps, warn};

/// Largest Window Scale shift count honored by receivers (RFC 7323 2.3).
const MAX_WSCALE_SHIFT: u8 = 14;

/// Usage text printed on invalid arguments.
pub const USAGE: &str = "\
Usage: tcphdr [OPTIONS]

Builds a TCP header and prints its fields.

Options:
    -s, --src-port PORT     source port (default 0)
    -d, --dst-port PORT     destination port (default 0)
        --seq N             sequence number (default 0)
        --ack N             acknowledgment number (default 0)
    -w, --window N          window size (default 0)
    -u, --urgent N          urgent pointer (default 0)
    -f, --flags LIST        control flags, e.g. SYN,ACK (default none)
        --mss N             Maximum Segment Size option
        --wscale N          Window Scale option shift count
        --ts N              Timestamps option TSval
        --ecr N             Timestamps option TSecr (requires --ts, default 0)
    -h, --help              print this help

An option is included whenever its argument is given, even with a value of 0
(e.g. `--mss 0` encodes an MSS of 0). Omit the argument to leave it out.";

/// Parsed command-line arguments.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommandLineArguments {
    src_port: u16,
    dst_port: u16,
    seq_number: u32,
    ack_number: u32,
    window: u16,
    urgent_pointer: u16,
    flags: ControlFlags,
    mss: Option<u16>,
    window_scale: Option<u8>,
    timestamp: Option<u32>,
    echo_timestamp: Option<u32>,
    help: bool,
}

impl CommandLineArguments {
    /// Parses the provided arguments, excluding the program name.
    ///
    /// # Errors
    ///
    /// Returns an error on an unknown argument, a missing or malformed value,
    /// or `--ecr` without `--ts`.
    pub fn parse<S: AsRef<str>>(args: impl IntoIterator<Item = S>) -> Result<Self> {
        let mut parsed = Self::default();

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            let arg = arg.as_ref();

            if arg == "-h" || arg == "--help" {
                parsed.help = true;
                continue;
            }

            let value = iter
                .next()
                .ok_or_else(|| Error::Args(format!("missing value for {arg}")))?;
            let value = value.as_ref();

            match arg {
                "-s" | "--src-port" => parsed.src_port = parse_value(arg, value)?,
                "-d" | "--dst-port" => parsed.dst_port = parse_value(arg, value)?,
                "--seq" => parsed.seq_number = parse_value(arg, value)?,
                "--ack" => parsed.ack_number = parse_value(arg, value)?,
                "-w" | "--window" => parsed.window = parse_value(arg, value)?,
                "-u" | "--urgent" => parsed.urgent_pointer = parse_value(arg, value)?,
                "-f" | "--flags" => parsed.flags = value.parse()?,
                "--mss" => parsed.mss = Some(parse_value(arg, value)?),
                "--wscale" => parsed.window_scale = Some(parse_value(arg, value)?),
                "--ts" => parsed.timestamp = Some(parse_value(arg, value)?),
                "--ecr" => parsed.echo_timestamp = Some(parse_value(arg, value)?),
                _ => return Err(Error::Args(format!("unknown argument {arg}"))),
            }
        }

        if let Some(shift) = parsed.window_scale.filter(|&shift| shift > MAX_WSCALE_SHIFT) {
            warn!("window scale shift count {shift} exceeds {MAX_WSCALE_SHIFT}, receivers will use {MAX_WSCALE_SHIFT}");
        }

        if parsed.echo_timestamp.is_some() && parsed.timestamp.is_none() {
            return Err(Error::Args("--ecr requires --ts".to_string()));
        }

        Ok(parsed)
    }

    /// Returns `true` if help was requested.
    pub fn help(&self) -> bool {
        self.help
    }

    /// Returns the TCP options described by the arguments.
    pub fn options(&self) -> TcpOptions {
        let timestamps = self
            .timestamp
            .map(|ts| Timestamps::new(ts, self.echo_timestamp.unwrap_or(0)));

        TcpOptions::new(self.mss, self.window_scale, timestamps)
    }

    /// Builds the TCP header described by the arguments.
    pub fn header(&self) -> Header {
        Header::new(
            self.src_port,
            self.dst_port,
            self.seq_number,
            self.ack_number,
            self.flags.bits(),
            self.window,
            self.urgent_pointer,
            self.options(),
        )
    }
}

fn parse_value<T: FromStr>(arg: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Args(format!("invalid value for {arg}: {value:?}")))
}
