use borsh::{
    BorshDeserialize,
    BorshSerialize,
};

use super::ExchangeRate;
use crate::{
    address::{
        Address,
        Prefix,
        ADDRESS_LENGTH,
    },
    records::{
        self,
        AggregateExchangeRateVote,
    },
    storage::{
        CodecError,
        StoredValue,
    },
};

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
struct ExchangeRateTuple {
    denom: String,
    exchange_rate: ExchangeRate,
}

impl From<&records::ExchangeRateTuple> for ExchangeRateTuple {
    fn from(tuple: &records::ExchangeRateTuple) -> Self {
        Self {
            denom: tuple.denom.clone(),
            exchange_rate: ExchangeRate::from(tuple.exchange_rate),
        }
    }
}

impl From<ExchangeRateTuple> for records::ExchangeRateTuple {
    fn from(tuple: ExchangeRateTuple) -> Self {
        Self {
            denom: tuple.denom,
            exchange_rate: tuple.exchange_rate.get(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct AggregateVote {
    exchange_rate_tuples: Vec<ExchangeRateTuple>,
    voter: [u8; ADDRESS_LENGTH],
}

impl AggregateVote {
    /// Restores the vote, rendering its voter with `validator_prefix`.
    #[must_use]
    pub fn into_record(self, validator_prefix: Prefix) -> AggregateExchangeRateVote {
        AggregateExchangeRateVote {
            exchange_rate_tuples: self
                .exchange_rate_tuples
                .into_iter()
                .map(records::ExchangeRateTuple::from)
                .collect(),
            voter: Address::new(validator_prefix, self.voter),
        }
    }
}

impl From<&AggregateExchangeRateVote> for AggregateVote {
    fn from(vote: &AggregateExchangeRateVote) -> Self {
        Self {
            exchange_rate_tuples: vote
                .exchange_rate_tuples
                .iter()
                .map(ExchangeRateTuple::from)
                .collect(),
            voter: vote.voter.bytes(),
        }
    }
}

impl From<AggregateVote> for StoredValue<'_> {
    fn from(vote: AggregateVote) -> Self {
        StoredValue::AggregateVote(vote)
    }
}

impl<'a> TryFrom<StoredValue<'a>> for AggregateVote {
    type Error = CodecError;

    fn try_from(value: StoredValue<'a>) -> Result<Self, Self::Error> {
        let StoredValue::AggregateVote(vote) = value else {
            return Err(CodecError::type_mismatch("aggregate vote", &value));
        };
        Ok(vote)
    }
}
