//! Decoding and diffing of the oracle module's key-value store.
//!
//! A [`StoreDecoder`] classifies a store entry by its key prefix, decodes the value stored under
//! it and renders it in a canonical textual form. Given the same entry taken from two snapshots
//! it produces a two line report suitable for diffing simulation runs.

pub mod address;
pub mod decoder;
pub mod records;
pub mod render;
pub mod simulation;
pub mod storage;

pub use address::{
    Address,
    AddressPrefixes,
    Prefix,
};
pub use decoder::{
    BuildError,
    DecodeError,
    KeyPrefixes,
    Pair,
    RecordKind,
    StoreDecoder,
};
pub use simulation::{
    DecoderRegistry,
    SimulationLogError,
};
pub use storage::{
    BorshCodec,
    Codec,
};
