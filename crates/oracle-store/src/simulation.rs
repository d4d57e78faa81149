//! Human readable logs of the differences between two store snapshots.
use std::fmt::Write as _;

use indexmap::IndexMap;
use tracing::instrument;

use crate::decoder::{
    DecodeError,
    Pair,
    StoreDecoder,
};

/// Store decoders keyed by the name of the store they read, in registration order.
#[derive(Clone, Debug, Default)]
pub struct DecoderRegistry {
    decoders: IndexMap<String, StoreDecoder>,
}

impl DecoderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `decoder` for `store`, returning the decoder it replaced.
    pub fn register(
        &mut self,
        store: impl Into<String>,
        decoder: StoreDecoder,
    ) -> Option<StoreDecoder> {
        self.decoders.insert(store.into(), decoder)
    }

    #[must_use]
    pub fn get(&self, store: &str) -> Option<&StoreDecoder> {
        self.decoders.get(store)
    }

    pub fn stores(&self) -> impl Iterator<Item = &str> {
        self.decoders.keys().map(String::as_str)
    }

    /// Writes a log entry for every position at which the two snapshots differ.
    ///
    /// Entries of a registered store are rendered by its decoder. Entries of any other store are
    /// written as uppercase hex, one line per snapshot. Positions at which both values are empty
    /// are skipped.
    ///
    /// # Errors
    /// Returns an error if the snapshots have different lengths or if the decoder of a
    /// registered store fails on one of the entries.
    #[instrument(skip_all, fields(store = %store, entries = pairs_a.len()), err)]
    pub fn simulation_log(
        &self,
        store: &str,
        pairs_a: &[Pair],
        pairs_b: &[Pair],
    ) -> Result<String, SimulationLogError> {
        if pairs_a.len() != pairs_b.len() {
            return Err(SimulationLogError::LengthMismatch {
                a: pairs_a.len(),
                b: pairs_b.len(),
            });
        }
        let decoder = self.get(store);
        let mut log = String::new();
        for (index, (a, b)) in pairs_a.iter().zip(pairs_b).enumerate() {
            if a.value.is_empty() && b.value.is_empty() {
                continue;
            }
            match decoder {
                Some(decoder) => {
                    let entry = decoder.try_decode(a, b).map_err(|source| {
                        SimulationLogError::Decode {
                            index,
                            source,
                        }
                    })?;
                    log.push_str(&entry);
                }
                None => {
                    let _ = writeln!(
                        log,
                        "store A {} => {}\nstore B {} => {}",
                        hex::encode_upper(&a.key),
                        hex::encode_upper(&a.value),
                        hex::encode_upper(&b.key),
                        hex::encode_upper(&b.value),
                    );
                }
            }
        }
        Ok(log)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SimulationLogError {
    #[error("store snapshots differ in length: A has {a} entries, B has {b}")]
    LengthMismatch { a: usize, b: usize },
    #[error("failed to decode entry {index}")]
    Decode { index: usize, source: DecodeError },
}
