//! Classifies oracle store entries by key prefix and renders their values side by side.
use std::{
    fmt::{
        self,
        Debug,
        Display,
        Formatter,
    },
    sync::Arc,
};

use itertools::Itertools as _;
use rust_decimal::Decimal;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    instrument,
    warn,
};

use crate::{
    address::{
        Address,
        AddressError,
        AddressPrefixes,
        DEFAULT_ACCOUNT_PREFIX,
        DEFAULT_VALIDATOR_PREFIX,
    },
    records,
    render::Render,
    storage::{
        keys::{
            self,
            KeySubject,
        },
        AggregatePrevote,
        AggregateVote,
        Codec,
        CodecError,
        Denom,
        ExchangeRate,
        MissCounter,
    },
};

/// The records kept in the oracle store, in the order their key prefixes are matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    ExchangeRate,
    FeederDelegation,
    MissCounter,
    AggregatePrevote,
    AggregateVote,
    VoteTarget,
}

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        RecordKind::ExchangeRate,
        RecordKind::FeederDelegation,
        RecordKind::MissCounter,
        RecordKind::AggregatePrevote,
        RecordKind::AggregateVote,
        RecordKind::VoteTarget,
    ];
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::ExchangeRate => "exchange rate",
            RecordKind::FeederDelegation => "feeder delegation",
            RecordKind::MissCounter => "miss counter",
            RecordKind::AggregatePrevote => "aggregate prevote",
            RecordKind::AggregateVote => "aggregate vote",
            RecordKind::VoteTarget => "vote target",
        };
        f.write_str(name)
    }
}

/// The key prefix of every record kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPrefixes {
    pub exchange_rate: Vec<u8>,
    pub feeder_delegation: Vec<u8>,
    pub miss_counter: Vec<u8>,
    pub aggregate_prevote: Vec<u8>,
    pub aggregate_vote: Vec<u8>,
    pub vote_target: Vec<u8>,
}

impl Default for KeyPrefixes {
    fn default() -> Self {
        Self {
            exchange_rate: keys::EXCHANGE_RATE_PREFIX.to_vec(),
            feeder_delegation: keys::FEEDER_DELEGATION_PREFIX.to_vec(),
            miss_counter: keys::MISS_COUNTER_PREFIX.to_vec(),
            aggregate_prevote: keys::AGGREGATE_PREVOTE_PREFIX.to_vec(),
            aggregate_vote: keys::AGGREGATE_VOTE_PREFIX.to_vec(),
            vote_target: keys::VOTE_TARGET_PREFIX.to_vec(),
        }
    }
}

/// A raw store entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    #[serde(with = "hex::serde")]
    pub key: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub value: Vec<u8>,
}

impl Pair {
    #[must_use]
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Which of the two entries passed to [`StoreDecoder::try_decode`] an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("key `{}` does not match any known oracle store prefix", hex::encode(.key))]
    UnrecognizedKey { key: Vec<u8> },
    #[error("failed to decode value of entry {side} as {kind}")]
    Value {
        kind: RecordKind,
        side: Side,
        source: ValueError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Address(#[from] AddressError),
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("key prefix of {kind} records is empty")]
    EmptyPrefix { kind: RecordKind },
    #[error(
        "key prefix `{}` of {first} records and key prefix `{}` of {second} records overlap",
        hex::encode(.first_prefix),
        hex::encode(.second_prefix)
    )]
    OverlappingPrefixes {
        first: RecordKind,
        first_prefix: Vec<u8>,
        second: RecordKind,
        second_prefix: Vec<u8>,
    },
    #[error("invalid address prefix")]
    AddressPrefix(#[from] AddressError),
}

type DecodeFn = fn(&dyn Codec, &AddressPrefixes, &[u8]) -> Result<Box<dyn Render>, ValueError>;

struct Route {
    kind: RecordKind,
    prefix: Vec<u8>,
    decode: DecodeFn,
}

impl Route {
    fn new(kind: RecordKind, prefix: Vec<u8>, decode: DecodeFn) -> Self {
        Self {
            kind,
            prefix,
            decode,
        }
    }
}

impl Debug for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("kind", &self.kind)
            .field("prefix", &hex::encode(&self.prefix))
            .finish_non_exhaustive()
    }
}

fn decode_exchange_rate(
    codec: &dyn Codec,
    _: &AddressPrefixes,
    bytes: &[u8],
) -> Result<Box<dyn Render>, ValueError> {
    let rate = codec.decode(bytes).and_then(ExchangeRate::try_from)?;
    Ok(Box::new(Decimal::from(rate)))
}

fn decode_feeder_delegation(
    _: &dyn Codec,
    prefixes: &AddressPrefixes,
    bytes: &[u8],
) -> Result<Box<dyn Render>, ValueError> {
    let feeder = Address::try_from_slice(prefixes.account, bytes)?;
    Ok(Box::new(feeder))
}

fn decode_miss_counter(
    codec: &dyn Codec,
    _: &AddressPrefixes,
    bytes: &[u8],
) -> Result<Box<dyn Render>, ValueError> {
    let count = codec.decode(bytes).and_then(MissCounter::try_from)?;
    Ok(Box::new(count.get()))
}

fn decode_aggregate_prevote(
    codec: &dyn Codec,
    prefixes: &AddressPrefixes,
    bytes: &[u8],
) -> Result<Box<dyn Render>, ValueError> {
    let prevote = codec.decode(bytes).and_then(AggregatePrevote::try_from)?;
    Ok(Box::new(prevote.into_record(prefixes.validator)))
}

fn decode_aggregate_vote(
    codec: &dyn Codec,
    prefixes: &AddressPrefixes,
    bytes: &[u8],
) -> Result<Box<dyn Render>, ValueError> {
    let vote = codec.decode(bytes).and_then(AggregateVote::try_from)?;
    Ok(Box::new(vote.into_record(prefixes.validator)))
}

fn decode_vote_target(
    codec: &dyn Codec,
    _: &AddressPrefixes,
    bytes: &[u8],
) -> Result<Box<dyn Render>, ValueError> {
    let denom = codec.decode(bytes).and_then(Denom::try_from)?;
    Ok(Box::new(records::Denom::from(denom)))
}

/// Renders a pair of oracle store entries sharing a key as `"<A>\n<B>"`.
///
/// The dispatch table is fixed at construction; the decoder holds no mutable state and can be
/// shared freely between threads.
#[derive(Clone)]
pub struct StoreDecoder {
    codec: Arc<dyn Codec>,
    address_prefixes: AddressPrefixes,
    routes: Arc<[Route]>,
}

impl StoreDecoder {
    #[must_use = "the builder must be built to construct a decoder"]
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Returns the kind of record stored under `key`, or `None` if no prefix matches.
    ///
    /// Prefixes are tried in the order of [`RecordKind::ALL`].
    #[must_use]
    pub fn key_kind(&self, key: &[u8]) -> Option<RecordKind> {
        self.route(key).map(|route| route.kind)
    }

    fn route(&self, key: &[u8]) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| key.starts_with(&route.prefix))
    }

    /// Decodes both entries and renders them on two lines.
    ///
    /// Only the key of `a` is used to classify the pair; the key of `b` is expected to be the
    /// same.
    ///
    /// # Errors
    /// Returns [`DecodeError::UnrecognizedKey`] if the key matches no known prefix, and
    /// [`DecodeError::Value`] if either value cannot be decoded as the matched record.
    #[instrument(skip_all, fields(key = %hex::encode(&a.key)), err)]
    pub fn try_decode(&self, a: &Pair, b: &Pair) -> Result<String, DecodeError> {
        if a.key != b.key {
            warn!(
                other_key = %hex::encode(&b.key),
                "entries have different keys; classifying by the first key"
            );
        }
        let Some(route) = self.route(&a.key) else {
            return Err(DecodeError::UnrecognizedKey {
                key: a.key.clone(),
            });
        };
        match KeySubject::parse(route.kind, &a.key[route.prefix.len()..]) {
            Ok(subject) => debug!(kind = %route.kind, %subject, "classified store key"),
            Err(error) => debug!(
                kind = %route.kind,
                %error,
                "classified store key with an unparseable suffix"
            ),
        }
        let rendered_a = self.decode_value(route, Side::A, &a.value)?;
        let rendered_b = self.decode_value(route, Side::B, &b.value)?;
        Ok(format!("{rendered_a}\n{rendered_b}"))
    }

    /// Like [`StoreDecoder::try_decode`], but an unrecognized key or undecodable value is fatal.
    ///
    /// # Panics
    /// Panics on any error [`StoreDecoder::try_decode`] would return.
    #[must_use]
    pub fn decode(&self, a: &Pair, b: &Pair) -> String {
        match self.try_decode(a, b) {
            Ok(rendered) => rendered,
            Err(error) => panic!("failed decoding oracle store entries: {error}"),
        }
    }

    fn decode_value(&self, route: &Route, side: Side, bytes: &[u8]) -> Result<String, DecodeError> {
        (route.decode)(self.codec.as_ref(), &self.address_prefixes, bytes)
            .map(|record| record.render())
            .map_err(|source| DecodeError::Value {
                kind: route.kind,
                side,
                source,
            })
    }
}

impl Debug for StoreDecoder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreDecoder")
            .field("address_prefixes", &self.address_prefixes)
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

pub struct NoCodec;
pub struct WithCodec(Arc<dyn Codec>);

pub struct Builder<TCodec = NoCodec> {
    codec: TCodec,
    key_prefixes: KeyPrefixes,
    account_prefix: String,
    validator_prefix: String,
}

impl Builder<NoCodec> {
    fn new() -> Self {
        Self {
            codec: NoCodec,
            key_prefixes: KeyPrefixes::default(),
            account_prefix: DEFAULT_ACCOUNT_PREFIX.to_string(),
            validator_prefix: DEFAULT_VALIDATOR_PREFIX.to_string(),
        }
    }
}

impl<TCodec> Builder<TCodec> {
    #[must_use = "the builder must be built to construct a decoder"]
    pub fn codec<C: Codec + 'static>(self, codec: C) -> Builder<WithCodec> {
        Builder {
            codec: WithCodec(Arc::new(codec)),
            key_prefixes: self.key_prefixes,
            account_prefix: self.account_prefix,
            validator_prefix: self.validator_prefix,
        }
    }

    #[must_use = "the builder must be built to construct a decoder"]
    pub fn key_prefixes(self, key_prefixes: KeyPrefixes) -> Self {
        Self {
            key_prefixes,
            ..self
        }
    }

    #[must_use = "the builder must be built to construct a decoder"]
    pub fn address_prefixes(
        self,
        account_prefix: impl Into<String>,
        validator_prefix: impl Into<String>,
    ) -> Self {
        Self {
            account_prefix: account_prefix.into(),
            validator_prefix: validator_prefix.into(),
            ..self
        }
    }
}

impl Builder<WithCodec> {
    /// Builds the decoder's dispatch table.
    ///
    /// # Errors
    /// Returns an error if one of the following conditions is violated:
    /// + every key prefix is non-empty;
    /// + no key prefix is a prefix of (or equal to) another;
    /// + both address prefixes are valid bech32 human readable parts.
    pub fn try_build(self) -> Result<StoreDecoder, BuildError> {
        let Self {
            codec: WithCodec(codec),
            key_prefixes,
            account_prefix,
            validator_prefix,
        } = self;
        let address_prefixes = AddressPrefixes::try_new(&account_prefix, &validator_prefix)?;
        let KeyPrefixes {
            exchange_rate,
            feeder_delegation,
            miss_counter,
            aggregate_prevote,
            aggregate_vote,
            vote_target,
        } = key_prefixes;
        let routes = vec![
            Route::new(RecordKind::ExchangeRate, exchange_rate, decode_exchange_rate),
            Route::new(
                RecordKind::FeederDelegation,
                feeder_delegation,
                decode_feeder_delegation,
            ),
            Route::new(RecordKind::MissCounter, miss_counter, decode_miss_counter),
            Route::new(
                RecordKind::AggregatePrevote,
                aggregate_prevote,
                decode_aggregate_prevote,
            ),
            Route::new(
                RecordKind::AggregateVote,
                aggregate_vote,
                decode_aggregate_vote,
            ),
            Route::new(RecordKind::VoteTarget, vote_target, decode_vote_target),
        ];
        ensure_prefixes_are_disjoint(&routes)?;
        Ok(StoreDecoder {
            codec,
            address_prefixes,
            routes: routes.into(),
        })
    }
}

fn ensure_prefixes_are_disjoint(routes: &[Route]) -> Result<(), BuildError> {
    if let Some(route) = routes.iter().find(|route| route.prefix.is_empty()) {
        return Err(BuildError::EmptyPrefix {
            kind: route.kind,
        });
    }
    for (first, second) in routes.iter().tuple_combinations() {
        if first.prefix.starts_with(&second.prefix) || second.prefix.starts_with(&first.prefix) {
            return Err(BuildError::OverlappingPrefixes {
                first: first.kind,
                first_prefix: first.prefix.clone(),
                second: second.kind,
                second_prefix: second.prefix.clone(),
            });
        }
    }
    Ok(())
}
