//! The records the oracle module keeps in its store, in their in-memory form.
use std::{
    collections::HashSet,
    fmt::{
        self,
        Display,
        Formatter,
    },
    str::FromStr,
};

use itertools::Itertools as _;
use rust_decimal::Decimal;
use sha2::{
    Digest as _,
    Sha256,
};

use crate::address::Address;

/// Length of a vote hash computed by [`AggregateVoteHash::compute`].
pub const AGGREGATE_VOTE_HASH_LENGTH: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeRateTuple {
    pub denom: String,
    pub exchange_rate: Decimal,
}

impl Display for ExchangeRateTuple {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.exchange_rate.normalize(), self.denom)
    }
}

/// An ordered list of exchange rates, one per denom.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExchangeRateTuples(Vec<ExchangeRateTuple>);

impl ExchangeRateTuples {
    #[must_use]
    pub fn new(tuples: Vec<ExchangeRateTuple>) -> Self {
        Self(tuples)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExchangeRateTuple> {
        self.0.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<ExchangeRateTuple> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ExchangeRateTuples {
    type IntoIter = std::slice::Iter<'a, ExchangeRateTuple>;
    type Item = &'a ExchangeRateTuple;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<ExchangeRateTuple> for ExchangeRateTuples {
    fn from_iter<I: IntoIterator<Item = ExchangeRateTuple>>(iter: I) -> Self {
        Self(Vec::from_iter(iter))
    }
}

/// Writes the comma separated `<rate><denom>` form that [`ExchangeRateTuples::from_str`] reads.
impl Display for ExchangeRateTuples {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseExchangeRateTuplesError {
    #[error("exchange rate entry `{entry}` has no denom")]
    MissingDenom { entry: String },
    #[error("failed to parse exchange rate of entry `{entry}`")]
    InvalidRate {
        entry: String,
        source: rust_decimal::Error,
    },
    #[error("exchange rate of entry `{entry}` is negative")]
    NegativeRate { entry: String },
    #[error("denom `{denom}` appears more than once")]
    DuplicateDenom { denom: String },
}

/// Parses `"123.4uatom,0.5ueth"`. An empty string is an empty list.
impl FromStr for ExchangeRateTuples {
    type Err = ParseExchangeRateTuplesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }
        let mut seen = HashSet::new();
        let mut tuples = Vec::new();
        for entry in s.split(',').map(str::trim) {
            let denom_start = entry
                .find(|c: char| c.is_ascii_alphabetic())
                .ok_or_else(|| ParseExchangeRateTuplesError::MissingDenom {
                    entry: entry.to_string(),
                })?;
            let (rate, denom) = entry.split_at(denom_start);
            let exchange_rate = rate.trim().parse::<Decimal>().map_err(|source| {
                ParseExchangeRateTuplesError::InvalidRate {
                    entry: entry.to_string(),
                    source,
                }
            })?;
            if exchange_rate.is_sign_negative() && !exchange_rate.is_zero() {
                return Err(ParseExchangeRateTuplesError::NegativeRate {
                    entry: entry.to_string(),
                });
            }
            if !seen.insert(denom) {
                return Err(ParseExchangeRateTuplesError::DuplicateDenom {
                    denom: denom.to_string(),
                });
            }
            tuples.push(ExchangeRateTuple {
                denom: denom.to_string(),
                exchange_rate,
            });
        }
        Ok(Self(tuples))
    }
}

/// The commitment a validator submits in a prevote before revealing its exchange rates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateVoteHash(Vec<u8>);

impl AggregateVoteHash {
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Computes the hash over `"{salt}:{exchange_rates}:{voter}"`, truncated to 20 bytes.
    #[must_use]
    pub fn compute(salt: &str, exchange_rates: &str, voter: &Address) -> Self {
        let digest = Sha256::digest(format!("{salt}:{exchange_rates}:{voter}"));
        Self(digest[..AGGREGATE_VOTE_HASH_LENGTH].to_vec())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl Display for AggregateVoteHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl FromStr for AggregateVoteHash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s).map(Self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateExchangeRatePrevote {
    pub hash: AggregateVoteHash,
    pub voter: Address,
    pub submit_block: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateExchangeRateVote {
    pub exchange_rate_tuples: ExchangeRateTuples,
    pub voter: Address,
}

/// An asset tracked by the oracle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Denom {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::DEFAULT_VALIDATOR_PREFIX;

    fn voter() -> Address {
        Address::new(DEFAULT_VALIDATOR_PREFIX.parse().unwrap(), [9; 20])
    }

    #[test]
    fn exchange_rate_tuples_are_parsed_in_order() {
        let tuples: ExchangeRateTuples = "123.4uatom, 0.5ueth".parse().unwrap();
        assert_eq!(
            tuples.into_inner(),
            vec![
                ExchangeRateTuple {
                    denom: "uatom".to_string(),
                    exchange_rate: Decimal::new(1234, 1),
                },
                ExchangeRateTuple {
                    denom: "ueth".to_string(),
                    exchange_rate: Decimal::new(5, 1),
                },
            ]
        );
    }

    #[test]
    fn empty_string_is_empty_list() {
        assert!("".parse::<ExchangeRateTuples>().unwrap().is_empty());
    }

    #[test]
    fn exchange_rate_tuples_display_is_parseable() {
        let tuples: ExchangeRateTuples = "1.50uatom,2ueth".parse().unwrap();
        insta::assert_snapshot!(tuples.to_string(), @"1.5uatom,2ueth");
        assert_eq!(
            tuples,
            tuples.to_string().parse::<ExchangeRateTuples>().unwrap()
        );
    }

    #[test]
    fn malformed_exchange_rate_tuples_are_rejected() {
        assert!(matches!(
            "123.4".parse::<ExchangeRateTuples>(),
            Err(ParseExchangeRateTuplesError::MissingDenom { .. })
        ));
        assert!(matches!(
            "1.2.3uatom".parse::<ExchangeRateTuples>(),
            Err(ParseExchangeRateTuplesError::InvalidRate { .. })
        ));
        assert!(matches!(
            "-1uatom".parse::<ExchangeRateTuples>(),
            Err(ParseExchangeRateTuplesError::NegativeRate { .. })
        ));
        assert!(matches!(
            "1uatom,2uatom".parse::<ExchangeRateTuples>(),
            Err(ParseExchangeRateTuplesError::DuplicateDenom { .. })
        ));
    }

    #[test]
    fn computed_vote_hash_is_truncated_sha256() {
        let voter = voter();
        let hash = AggregateVoteHash::compute("salt", "123.4uatom", &voter);
        let full = Sha256::digest(format!("salt:123.4uatom:{voter}"));
        assert_eq!(hash.as_bytes(), &full[..AGGREGATE_VOTE_HASH_LENGTH]);
    }

    #[test]
    fn vote_hash_changes_with_salt() {
        let voter = voter();
        assert_ne!(
            AggregateVoteHash::compute("a", "1uatom", &voter),
            AggregateVoteHash::compute("b", "1uatom", &voter),
        );
    }

    #[test]
    fn vote_hash_displays_as_hex() {
        let hash = AggregateVoteHash::from_bytes(b"12345".to_vec());
        insta::assert_snapshot!(hash.to_string(), @"3132333435");
        assert_eq!(hash, "3132333435".parse::<AggregateVoteHash>().unwrap());
    }
}
