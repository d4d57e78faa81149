//! Fixtures: the exact key and value bytes the oracle module writes for a record.
use clap::{
    ArgGroup,
    Subcommand,
};
use eyre::{
    Result,
    WrapErr as _,
};
use oracle_store::{
    records::{
        AggregateExchangeRatePrevote,
        AggregateExchangeRateVote,
        AggregateVoteHash,
        ExchangeRateTuples,
    },
    storage::{
        keys,
        AggregatePrevote,
        AggregateVote,
        Denom,
        ExchangeRate,
        MissCounter,
        StoredValue,
    },
    Address,
    BorshCodec,
    Codec as _,
    Pair,
};
use rust_decimal::Decimal;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// The exchange rate of a denom
    ExchangeRate(ExchangeRateArgs),
    /// The account a validator delegated its price feeding to
    FeederDelegation(FeederDelegationArgs),
    /// The number of vote periods a validator missed
    MissCounter(MissCounterArgs),
    /// A validator's commitment to its upcoming vote
    AggregatePrevote(AggregatePrevoteArgs),
    /// A validator's exchange rate vote
    AggregateVote(AggregateVoteArgs),
    /// A denom the oracle collects votes for
    VoteTarget(VoteTargetArgs),
}

#[derive(clap::Args, Debug)]
pub struct ExchangeRateArgs {
    #[arg(long)]
    denom: String,
    /// The exchange rate as a decimal, e.g. 123.4
    #[arg(long)]
    rate: Decimal,
}

#[derive(clap::Args, Debug)]
pub struct FeederDelegationArgs {
    /// Bech32 address of the delegating validator
    #[arg(long)]
    validator: Address,
    /// Bech32 address of the feeder account
    #[arg(long)]
    feeder: Address,
}

#[derive(clap::Args, Debug)]
pub struct MissCounterArgs {
    #[arg(long)]
    validator: Address,
    #[arg(long)]
    count: u64,
}

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("commitment").required(true).args(["hash", "salt"])))]
pub struct AggregatePrevoteArgs {
    #[arg(long)]
    validator: Address,
    /// Hex encoded vote hash
    #[arg(long)]
    hash: Option<AggregateVoteHash>,
    /// Salt to compute the vote hash with, together with --exchange-rates
    #[arg(long, requires = "exchange_rates")]
    salt: Option<String>,
    /// Exchange rates the computed vote hash commits to, e.g. 123.4uatom,0.5ueth
    #[arg(long, requires = "salt")]
    exchange_rates: Option<String>,
    #[arg(long)]
    submit_block: u64,
}

#[derive(clap::Args, Debug)]
pub struct AggregateVoteArgs {
    #[arg(long)]
    validator: Address,
    /// Comma separated exchange rates, e.g. 123.4uatom,0.5ueth
    #[arg(long, allow_hyphen_values = true)]
    exchange_rates: ExchangeRateTuples,
}

#[derive(clap::Args, Debug)]
pub struct VoteTargetArgs {
    #[arg(long)]
    denom: String,
}

/// Prints the store entry of the record as a JSON object with hex encoded key and value.
///
/// # Errors
///
/// Returns an error if the record cannot be encoded.
pub fn run(command: Command) -> Result<()> {
    let pair = match command {
        Command::ExchangeRate(ExchangeRateArgs {
            denom,
            rate,
        }) => Pair::new(
            keys::exchange_rate(&denom),
            encode(ExchangeRate::from(rate))?,
        ),
        Command::FeederDelegation(FeederDelegationArgs {
            validator,
            feeder,
        }) => Pair::new(keys::feeder_delegation(&validator), feeder.bytes()),
        Command::MissCounter(MissCounterArgs {
            validator,
            count,
        }) => Pair::new(
            keys::miss_counter(&validator),
            encode(MissCounter::from(count))?,
        ),
        Command::AggregatePrevote(args) => aggregate_prevote(args)?,
        Command::AggregateVote(AggregateVoteArgs {
            validator,
            exchange_rates,
        }) => {
            let vote = AggregateExchangeRateVote {
                exchange_rate_tuples: exchange_rates,
                voter: validator,
            };
            Pair::new(
                keys::aggregate_vote(&validator),
                encode(AggregateVote::from(&vote))?,
            )
        }
        Command::VoteTarget(VoteTargetArgs {
            denom,
        }) => Pair::new(
            keys::vote_target(&denom),
            encode(Denom::from(denom.as_str()))?,
        ),
    };
    let json = serde_json::to_string(&pair).wrap_err("failed serializing store entry as JSON")?;
    println!("{json}");
    Ok(())
}

fn aggregate_prevote(
    AggregatePrevoteArgs {
        validator,
        hash,
        salt,
        exchange_rates,
        submit_block,
    }: AggregatePrevoteArgs,
) -> Result<Pair> {
    let hash = match (hash, salt, exchange_rates) {
        (Some(hash), ..) => hash,
        (None, Some(salt), Some(exchange_rates)) => {
            AggregateVoteHash::compute(&salt, &exchange_rates, &validator)
        }
        _ => eyre::bail!("either --hash or both --salt and --exchange-rates must be given"),
    };
    let prevote = AggregateExchangeRatePrevote {
        hash,
        voter: validator,
        submit_block,
    };
    Ok(Pair::new(
        keys::aggregate_prevote(&validator),
        encode(AggregatePrevote::from(&prevote))?,
    ))
}

fn encode<'a>(value: impl Into<StoredValue<'a>>) -> Result<Vec<u8>> {
    BorshCodec
        .encode(&value.into())
        .wrap_err("failed encoding stored value")
}
