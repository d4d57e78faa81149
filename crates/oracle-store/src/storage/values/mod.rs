mod aggregate_prevote;
mod aggregate_vote;
mod denom;
mod exchange_rate;
mod miss_counter;

pub use self::{
    aggregate_prevote::AggregatePrevote,
    aggregate_vote::AggregateVote,
    denom::Denom,
    exchange_rate::ExchangeRate,
    miss_counter::MissCounter,
};
