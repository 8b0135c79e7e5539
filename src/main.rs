use std::{env, process};

use tcphdr::cli_args::{CommandLineArguments, USAGE};
use tcphdr::{debug, error, info};

fn main() {
    let args = CommandLineArguments::parse(env::args().skip(1)).unwrap_or_else(|err| {
        error!("{err}");
        eprintln!("{USAGE}");
        process::exit(1);
    });

    if args.help() {
        println!("{USAGE}");
        return;
    }

    debug!("parsed arguments: {args:?}");

    let header = args.header();

    info!("{header}");
    info!(
        "header length: {} bytes ({} bytes of options), checksum left as {:#06x}",
        header.header_len(),
        header.options().len(),
        header.checksum()
    );
}
