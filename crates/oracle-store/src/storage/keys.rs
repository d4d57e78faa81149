//! Oracle store keys.
//!
//! Every key starts with a one byte prefix naming the record it holds. Denom-keyed records
//! append the denom bytes; validator-keyed records append the length-prefixed validator address.
use std::fmt::{
    self,
    Display,
    Formatter,
};

use crate::{
    address::{
        Address,
        ADDRESS_LENGTH,
    },
    decoder::RecordKind,
};

pub const EXCHANGE_RATE_PREFIX: &[u8] = &[0x01];
pub const FEEDER_DELEGATION_PREFIX: &[u8] = &[0x02];
pub const MISS_COUNTER_PREFIX: &[u8] = &[0x03];
pub const AGGREGATE_PREVOTE_PREFIX: &[u8] = &[0x04];
pub const AGGREGATE_VOTE_PREFIX: &[u8] = &[0x05];
pub const VOTE_TARGET_PREFIX: &[u8] = &[0x06];

/// Example: `0x01 || b"uatom"`.
#[must_use]
pub fn exchange_rate(denom: &str) -> Vec<u8> {
    [EXCHANGE_RATE_PREFIX, denom.as_bytes()].concat()
}

/// Example: `0x02 || 0x14 || <20 address bytes>`.
#[must_use]
pub fn feeder_delegation(validator: &Address) -> Vec<u8> {
    length_prefixed(FEEDER_DELEGATION_PREFIX, validator)
}

#[must_use]
pub fn miss_counter(validator: &Address) -> Vec<u8> {
    length_prefixed(MISS_COUNTER_PREFIX, validator)
}

#[must_use]
pub fn aggregate_prevote(validator: &Address) -> Vec<u8> {
    length_prefixed(AGGREGATE_PREVOTE_PREFIX, validator)
}

#[must_use]
pub fn aggregate_vote(validator: &Address) -> Vec<u8> {
    length_prefixed(AGGREGATE_VOTE_PREFIX, validator)
}

/// Example: `0x06 || b"usei"`.
#[must_use]
pub fn vote_target(denom: &str) -> Vec<u8> {
    [VOTE_TARGET_PREFIX, denom.as_bytes()].concat()
}

const ADDRESS_LENGTH_BYTE: u8 = 20;
const _: () = assert!(ADDRESS_LENGTH_BYTE as usize == ADDRESS_LENGTH);

fn length_prefixed(prefix: &[u8], validator: &Address) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + 1 + ADDRESS_LENGTH);
    key.extend_from_slice(prefix);
    key.push(ADDRESS_LENGTH_BYTE);
    key.extend_from_slice(validator.as_bytes());
    key
}

/// What a key is about: the part of the key following its prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeySubject {
    Denom(String),
    Validator([u8; ADDRESS_LENGTH]),
}

impl KeySubject {
    /// Parses the key suffix following the prefix of a `kind` record.
    ///
    /// # Errors
    /// Returns an error if the suffix is not a UTF-8 denom for denom-keyed records, or not a
    /// length-prefixed 20 byte address for validator-keyed records.
    pub fn parse(kind: RecordKind, suffix: &[u8]) -> Result<Self, KeyError> {
        match kind {
            RecordKind::ExchangeRate | RecordKind::VoteTarget => std::str::from_utf8(suffix)
                .map(|denom| Self::Denom(denom.to_string()))
                .map_err(KeyError::denom),
            RecordKind::FeederDelegation
            | RecordKind::MissCounter
            | RecordKind::AggregatePrevote
            | RecordKind::AggregateVote => {
                let Some((&len, address)) = suffix.split_first() else {
                    return Err(KeyError::missing_length());
                };
                if usize::from(len) != address.len() {
                    return Err(KeyError::length_mismatch(len, address.len()));
                }
                <[u8; ADDRESS_LENGTH]>::try_from(address)
                    .map(Self::Validator)
                    .map_err(|_| KeyError::incorrect_address_length(address.len()))
            }
        }
    }
}

impl Display for KeySubject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KeySubject::Denom(denom) => write!(f, "denom {denom}"),
            KeySubject::Validator(bytes) => write!(f, "validator {}", hex::encode(bytes)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct KeyError(KeyErrorKind);

impl KeyError {
    fn denom(source: std::str::Utf8Error) -> Self {
        Self(KeyErrorKind::Denom {
            source,
        })
    }

    fn missing_length() -> Self {
        Self(KeyErrorKind::MissingLength)
    }

    fn length_mismatch(declared: u8, actual: usize) -> Self {
        Self(KeyErrorKind::LengthMismatch {
            declared,
            actual,
        })
    }

    fn incorrect_address_length(received: usize) -> Self {
        Self(KeyErrorKind::IncorrectAddressLength {
            received,
        })
    }
}

#[derive(Debug, thiserror::Error)]
enum KeyErrorKind {
    #[error("key suffix is not a UTF-8 denom")]
    Denom { source: std::str::Utf8Error },
    #[error("key suffix is missing the address length byte")]
    MissingLength,
    #[error("key suffix declares an address of {declared} bytes but holds {actual}")]
    LengthMismatch { declared: u8, actual: usize },
    #[error("expected an address of {ADDRESS_LENGTH} bytes, got `{received}`")]
    IncorrectAddressLength { received: usize },
}
