use std::str::FromStr;

use clap::{
    Parser,
    Subcommand,
};

use super::{
    decode_pair,
    encode,
    simulation_log,
};

/// Utilities for inspecting the oracle module's store
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode an oracle store entry as it was before and after a change
    #[command(arg_required_else_help = true)]
    DecodePair(decode_pair::Args),

    /// Log the differences between two snapshots of a store
    #[command(arg_required_else_help = true)]
    SimulationLog(simulation_log::Args),

    /// Print the store entry of an oracle record as JSON
    #[command(subcommand)]
    Encode(encode::Command),
}

/// Parses the command line.
///
/// # Errors
/// Returns an error if the arguments are invalid, or if help or version output was requested.
pub fn try_get() -> Result<Command, clap::Error> {
    Cli::try_parse().map(|cli| cli.command)
}

/// Hex encoded bytes, with or without a leading `0x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexBytes(pub Vec<u8>);

impl FromStr for HexBytes {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        hex::decode(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn hex_bytes_accept_optional_0x() {
        assert_eq!(HexBytes(vec![0x06, 0xab]), "06ab".parse::<HexBytes>().unwrap());
        assert_eq!(HexBytes(vec![0x06, 0xab]), "0x06AB".parse::<HexBytes>().unwrap());
        assert_eq!(HexBytes(vec![]), "".parse::<HexBytes>().unwrap());
        assert!("0x6".parse::<HexBytes>().is_err());
    }
}
