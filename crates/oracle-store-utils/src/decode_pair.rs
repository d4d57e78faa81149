use eyre::{
    Result,
    WrapErr as _,
};
use oracle_store::{
    Pair,
    StoreDecoder,
};

use crate::cli::HexBytes;

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Hex encoded store key
    #[arg(long, value_name = "HEX")]
    key: HexBytes,

    /// Hex encoded value stored under the key before the change
    #[arg(long, value_name = "HEX")]
    before: HexBytes,

    /// Hex encoded value stored under the key after the change
    #[arg(long, value_name = "HEX")]
    after: HexBytes,
}

/// Prints both values of the entry, decoded according to the key prefix.
///
/// # Errors
///
/// Returns an error if the key matches no oracle record or either value cannot be decoded.
pub fn run(
    Args {
        key,
        before,
        after,
    }: Args,
    decoder: &StoreDecoder,
) -> Result<()> {
    let a = Pair::new(key.0.clone(), before.0);
    let b = Pair::new(key.0, after.0);
    let rendered = decoder
        .try_decode(&a, &b)
        .wrap_err("failed to decode store entries")?;
    println!("{rendered}");
    Ok(())
}
