//! Canonical string forms of decoded store records.
//!
//! These are meant for display and diffing; nothing parses them back.
use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::{
    address::Address,
    records::{
        AggregateExchangeRatePrevote,
        AggregateExchangeRateVote,
        Denom,
    },
};

/// A record with a single canonical textual form.
pub trait Render {
    fn render(&self) -> String;
}

/// Normalized: `123.4`, never `123.400`.
impl Render for Decimal {
    fn render(&self) -> String {
        self.normalize().to_string()
    }
}

impl Render for Address {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for u64 {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for AggregateExchangeRatePrevote {
    fn render(&self) -> String {
        format!(
            "hash: {}\nvoter: {}\nsubmit_block: {}\n",
            self.hash, self.voter, self.submit_block,
        )
    }
}

impl Render for AggregateExchangeRateVote {
    fn render(&self) -> String {
        let mut out = String::new();
        if self.exchange_rate_tuples.is_empty() {
            out.push_str("exchange_rate_tuples: []\n");
        } else {
            out.push_str("exchange_rate_tuples:\n");
            for tuple in &self.exchange_rate_tuples {
                // writing to a String never fails
                let _ = write!(
                    out,
                    "- denom: {}\n  exchange_rate: \"{}\"\n",
                    tuple.denom,
                    tuple.exchange_rate.render(),
                );
            }
        }
        let _ = writeln!(out, "voter: {}", self.voter);
        out
    }
}

impl Render for Denom {
    fn render(&self) -> String {
        format!("name: {}\n", self.name)
    }
}
