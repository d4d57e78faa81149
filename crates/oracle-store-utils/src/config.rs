use figment::{
    providers::Env,
    Figment,
};
use oracle_store::{
    address::{
        DEFAULT_ACCOUNT_PREFIX,
        DEFAULT_VALIDATOR_PREFIX,
    },
    BorshCodec,
    BuildError,
    StoreDecoder,
};
use serde::{
    Deserialize,
    Serialize,
};

pub const PREFIX: &str = "ORACLE_STORE_UTILS_";

const DEFAULT_LOG: &str = "warn";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Log directives for the stderr subscriber.
    #[serde(default = "default_log")]
    pub log: String,
    #[serde(default = "default_account_address_prefix")]
    pub account_address_prefix: String,
    #[serde(default = "default_validator_address_prefix")]
    pub validator_address_prefix: String,
}

fn default_log() -> String {
    DEFAULT_LOG.to_string()
}

fn default_account_address_prefix() -> String {
    DEFAULT_ACCOUNT_PREFIX.to_string()
}

fn default_validator_address_prefix() -> String {
    DEFAULT_VALIDATOR_PREFIX.to_string()
}

impl Config {
    /// Reads the config from `RUST_LOG` and all variables prefixed `ORACLE_STORE_UTILS_`.
    ///
    /// # Errors
    /// Returns an error if a variable has an invalid value or is not a known config field.
    pub fn get() -> Result<Self, figment::Error> {
        Self::get_with_prefix(PREFIX)
    }

    fn get_with_prefix(prefix: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Env::prefixed("RUST_").split("_").only(&["log"]))
            .merge(Env::prefixed(prefix))
            .extract()
    }

    /// Builds the oracle store decoder rendering addresses with the configured prefixes.
    ///
    /// # Errors
    /// Returns an error if either address prefix is not a valid bech32 human readable part.
    pub fn decoder(&self) -> Result<StoreDecoder, BuildError> {
        StoreDecoder::builder()
            .codec(BorshCodec)
            .address_prefixes(
                self.account_address_prefix.as_str(),
                self.validator_address_prefix.as_str(),
            )
            .try_build()
    }
}
