use borsh::{
    BorshDeserialize,
    BorshSerialize,
};

use crate::{
    address::{
        Address,
        Prefix,
        ADDRESS_LENGTH,
    },
    records::{
        AggregateExchangeRatePrevote,
        AggregateVoteHash,
    },
    storage::{
        CodecError,
        StoredValue,
    },
};

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct AggregatePrevote {
    hash: Vec<u8>,
    voter: [u8; ADDRESS_LENGTH],
    submit_block: u64,
}

impl AggregatePrevote {
    /// Restores the prevote, rendering its voter with `validator_prefix`.
    #[must_use]
    pub fn into_record(self, validator_prefix: Prefix) -> AggregateExchangeRatePrevote {
        AggregateExchangeRatePrevote {
            hash: AggregateVoteHash::from_bytes(self.hash),
            voter: Address::new(validator_prefix, self.voter),
            submit_block: self.submit_block,
        }
    }
}

impl From<&AggregateExchangeRatePrevote> for AggregatePrevote {
    fn from(prevote: &AggregateExchangeRatePrevote) -> Self {
        Self {
            hash: prevote.hash.as_bytes().to_vec(),
            voter: prevote.voter.bytes(),
            submit_block: prevote.submit_block,
        }
    }
}

impl From<AggregatePrevote> for StoredValue<'_> {
    fn from(prevote: AggregatePrevote) -> Self {
        StoredValue::AggregatePrevote(prevote)
    }
}

impl<'a> TryFrom<StoredValue<'a>> for AggregatePrevote {
    type Error = CodecError;

    fn try_from(value: StoredValue<'a>) -> Result<Self, Self::Error> {
        let StoredValue::AggregatePrevote(prevote) = value else {
            return Err(CodecError::type_mismatch("aggregate prevote", &value));
        };
        Ok(prevote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::DEFAULT_VALIDATOR_PREFIX;

    #[test]
    fn aggregate_prevote_serialization_round_trip() {
        let prefix: Prefix = DEFAULT_VALIDATOR_PREFIX.parse().unwrap();
        let record = AggregateExchangeRatePrevote {
            hash: AggregateVoteHash::from_bytes(b"12345".to_vec()),
            voter: Address::new(prefix, [3; 20]),
            submit_block: 123,
        };
        let serialized = borsh::to_vec(&AggregatePrevote::from(&record)).unwrap();
        let deserialized: AggregatePrevote = borsh::from_slice(&serialized).unwrap();
        assert_eq!(record, deserialized.into_record(prefix));
    }
}
