//! The byte-level layout of the oracle store: key prefixes and the stored value codec.
pub mod keys;
mod values;

use std::fmt::{
    self,
    Display,
    Formatter,
};

use borsh::{
    BorshDeserialize,
    BorshSerialize,
};

pub use self::values::{
    AggregatePrevote,
    AggregateVote,
    Denom,
    ExchangeRate,
    MissCounter,
};

/// The envelope every structured oracle store value is written in.
///
/// Feeder delegations are the exception: they are stored as raw address bytes.
#[derive(Clone, Debug, BorshSerialize, BorshDeserialize)]
pub enum StoredValue<'a> {
    ExchangeRate(ExchangeRate),
    MissCounter(MissCounter),
    AggregatePrevote(AggregatePrevote),
    AggregateVote(AggregateVote),
    Denom(Denom<'a>),
}

impl StoredValue<'_> {
    fn name(&self) -> &'static str {
        match self {
            StoredValue::ExchangeRate(_) => "exchange rate",
            StoredValue::MissCounter(_) => "miss counter",
            StoredValue::AggregatePrevote(_) => "aggregate prevote",
            StoredValue::AggregateVote(_) => "aggregate vote",
            StoredValue::Denom(_) => "denom",
        }
    }
}

impl Display for StoredValue<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serializes and deserializes [`StoredValue`]s.
///
/// Implementations must be deterministic: the same bytes always decode to the same value.
pub trait Codec: Send + Sync {
    /// Encodes `value` into the bytes written to the store.
    ///
    /// # Errors
    /// Returns an error if `value` cannot be serialized.
    fn encode(&self, value: &StoredValue<'_>) -> Result<Vec<u8>, CodecError>;

    /// Decodes bytes read from the store.
    ///
    /// # Errors
    /// Returns an error if `bytes` are not a complete encoding of a stored value.
    fn decode(&self, bytes: &[u8]) -> Result<StoredValue<'static>, CodecError>;
}

/// A [`Codec`] writing values with borsh.
#[derive(Clone, Copy, Debug, Default)]
pub struct BorshCodec;

impl Codec for BorshCodec {
    fn encode(&self, value: &StoredValue<'_>) -> Result<Vec<u8>, CodecError> {
        borsh::to_vec(value).map_err(CodecError::serialize)
    }

    fn decode(&self, bytes: &[u8]) -> Result<StoredValue<'static>, CodecError> {
        borsh::from_slice(bytes).map_err(CodecError::deserialize)
    }
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct CodecError(CodecErrorKind);

impl CodecError {
    fn serialize(source: std::io::Error) -> Self {
        Self(CodecErrorKind::Serialize {
            source,
        })
    }

    fn deserialize(source: std::io::Error) -> Self {
        Self(CodecErrorKind::Deserialize {
            source,
        })
    }

    pub(crate) fn type_mismatch(expected: &'static str, found: &StoredValue<'_>) -> Self {
        Self(CodecErrorKind::TypeMismatch {
            expected,
            found: found.name(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
enum CodecErrorKind {
    #[error("failed to serialize stored value")]
    Serialize { source: std::io::Error },
    #[error("failed to deserialize stored value")]
    Deserialize { source: std::io::Error },
    #[error("stored value type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = BorshCodec
            .encode(&StoredValue::from(MissCounter::from(23)))
            .unwrap();
        bytes.push(0);
        assert!(BorshCodec.decode(&bytes).is_err());
    }

    #[test]
    fn unknown_envelope_tag_is_rejected() {
        assert!(BorshCodec.decode(&[0x99]).is_err());
        assert!(BorshCodec.decode(&[]).is_err());
    }

    #[test]
    fn envelope_tags_should_not_change() {
        let miss_counter = BorshCodec
            .encode(&StoredValue::from(MissCounter::from(23)))
            .unwrap();
        insta::assert_snapshot!(hex::encode(miss_counter), @"011700000000000000");
        let denom = BorshCodec
            .encode(&StoredValue::from(Denom::from("usei")))
            .unwrap();
        insta::assert_snapshot!(hex::encode(denom), @"040400000075736569");
    }
}
