use std::{
    fs::File,
    io::BufReader,
    path::{
        Path,
        PathBuf,
    },
};

use eyre::{
    Result,
    WrapErr as _,
};
use oracle_store::{
    DecoderRegistry,
    Pair,
    StoreDecoder,
};
use tracing::info;

/// Name under which the oracle store decoder is registered.
pub const ORACLE_STORE: &str = "oracle";

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Name of the store the snapshots were taken from
    #[arg(long, default_value = ORACLE_STORE)]
    store: String,

    /// Path to a JSON array of hex encoded entries taken before the change
    #[arg(long, value_name = "PATH")]
    before: PathBuf,

    /// Path to a JSON array of hex encoded entries taken after the change
    #[arg(long, value_name = "PATH")]
    after: PathBuf,
}

/// Prints the simulation log of two store snapshots.
///
/// # Errors
///
/// Returns an error if either snapshot cannot be read, if they differ in length, or if the
/// oracle decoder fails on an entry.
pub fn run(
    Args {
        store,
        before,
        after,
    }: Args,
    decoder: StoreDecoder,
) -> Result<()> {
    let pairs_a = read_pairs(&before)?;
    let pairs_b = read_pairs(&after)?;
    info!(
        %store,
        entries = pairs_a.len(),
        "read store snapshots"
    );
    let mut registry = DecoderRegistry::new();
    registry.register(ORACLE_STORE, decoder);
    let log = registry
        .simulation_log(&store, &pairs_a, &pairs_b)
        .wrap_err("failed to compute simulation log")?;
    print!("{log}");
    Ok(())
}

fn read_pairs(path: &Path) -> Result<Vec<Pair>> {
    let file = File::open(path)
        .wrap_err_with(|| format!("failed to open snapshot file `{}`", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("failed deserializing store entries from `{}`", path.display()))
}
