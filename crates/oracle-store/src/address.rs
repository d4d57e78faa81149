//! Bech32 addresses of accounts and validators as written to the oracle store.
use std::{
    fmt::{
        self,
        Display,
        Formatter,
    },
    str::FromStr,
};

use bech32::{
    primitives::decode::CheckedHrpstring,
    Bech32,
    Hrp,
};

pub const ADDRESS_LENGTH: usize = 20;

pub const DEFAULT_ACCOUNT_PREFIX: &str = "sei";
pub const DEFAULT_VALIDATOR_PREFIX: &str = "seivaloper";

/// A validated bech32 human readable part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prefix(Hrp);

impl Prefix {
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for Prefix {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hrp::parse(s).map(Self).map_err(AddressError::invalid_prefix)
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The prefixes used to render the two kinds of addresses found in the oracle store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressPrefixes {
    pub account: Prefix,
    pub validator: Prefix,
}

impl AddressPrefixes {
    /// Parses both prefixes.
    ///
    /// # Errors
    /// Returns an error if either string is not a valid bech32 human readable part.
    pub fn try_new(account: &str, validator: &str) -> Result<Self, AddressError> {
        Ok(Self {
            account: account.parse()?,
            validator: validator.parse()?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Address {
    bytes: [u8; ADDRESS_LENGTH],
    prefix: Prefix,
}

impl Address {
    #[must_use]
    pub const fn new(prefix: Prefix, bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self {
            bytes,
            prefix,
        }
    }

    /// Constructs an address from raw bytes as they are stored, e.g. a feeder delegation value.
    ///
    /// # Errors
    /// Returns an error if `bytes` is not exactly 20 bytes long.
    pub fn try_from_slice(prefix: Prefix, bytes: &[u8]) -> Result<Self, AddressError> {
        let bytes = <[u8; ADDRESS_LENGTH]>::try_from(bytes)
            .map_err(|_| AddressError::incorrect_length(bytes.len()))?;
        Ok(Self::new(prefix, bytes))
    }

    #[must_use]
    pub fn bytes(self) -> [u8; ADDRESS_LENGTH] {
        self.bytes
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.bytes
    }

    #[must_use]
    pub fn prefix(&self) -> Prefix {
        self.prefix
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let checked = CheckedHrpstring::new::<Bech32>(s).map_err(AddressError::decode)?;
        let prefix = Prefix(checked.hrp());
        let bytes: Vec<u8> = checked.byte_iter().collect();
        Self::try_from_slice(prefix, &bytes)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use bech32::EncodeError;
        match bech32::encode_lower_to_fmt::<Bech32, _>(f, self.prefix.0, self.as_bytes()) {
            Ok(()) => Ok(()),
            Err(EncodeError::Fmt(err)) => Err(err),
            Err(err) => panic!(
                "only formatting errors can occur when encoding a 20 byte address with a \
                 validated prefix; encoding failed with:\n{err:?}",
            ),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct AddressError(AddressErrorKind);

impl AddressError {
    fn decode(source: bech32::primitives::decode::CheckedHrpstringError) -> Self {
        Self(AddressErrorKind::Decode {
            source,
        })
    }

    fn invalid_prefix(source: bech32::primitives::hrp::Error) -> Self {
        Self(AddressErrorKind::InvalidPrefix {
            source,
        })
    }

    fn incorrect_length(received: usize) -> Self {
        Self(AddressErrorKind::IncorrectLength {
            received,
        })
    }
}

#[derive(Debug, thiserror::Error)]
enum AddressErrorKind {
    #[error("failed decoding provided string as bech32")]
    Decode {
        source: bech32::primitives::decode::CheckedHrpstringError,
    },
    #[error("expected an address of {ADDRESS_LENGTH} bytes, got `{received}`")]
    IncorrectLength { received: usize },
    #[error("the provided prefix was not a valid bech32 human readable part")]
    InvalidPrefix {
        source: bech32::primitives::hrp::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator_prefix() -> Prefix {
        DEFAULT_VALIDATOR_PREFIX.parse().unwrap()
    }

    #[track_caller]
    fn assert_wrong_address_bytes(bad_account: &[u8]) {
        let error = Address::try_from_slice(validator_prefix(), bad_account).expect_err(
            "constructing an address from an incorrectly sized byte slice succeeded where it \
             should have failed",
        );
        let AddressError(AddressErrorKind::IncorrectLength {
            received,
        }) = error
        else {
            panic!("expected AddressErrorKind::IncorrectLength, got {error:?}");
        };
        assert_eq!(bad_account.len(), received);
    }

    #[test]
    fn address_of_incorrect_length_gives_error() {
        assert_wrong_address_bytes(&[42; 0]);
        assert_wrong_address_bytes(&[42; 19]);
        assert_wrong_address_bytes(&[42; 21]);
        assert_wrong_address_bytes(&[42; 100]);
    }

    #[test]
    fn display_then_parse_gives_same_address() {
        let expected = Address::new(validator_prefix(), [42; 20]);
        let actual = expected.to_string().parse::<Address>().unwrap();
        assert_eq!(expected, actual);
    }

    #[test]
    fn display_starts_with_prefix_and_separator() {
        let address = Address::new(validator_prefix(), [1; 20]);
        assert!(address.to_string().starts_with("seivaloper1"));
    }

    #[test]
    fn prefix_must_be_a_valid_human_readable_part() {
        assert!("SEI".parse::<Prefix>().is_ok());
        assert!("Sei".parse::<Prefix>().is_err());
        assert!("".parse::<Prefix>().is_err());
        assert!("sei prefix".parse::<Prefix>().is_err());
    }

    #[test]
    fn bech32m_encoded_address_is_rejected() {
        let bech32m = bech32::encode::<bech32::Bech32m>(Hrp::parse("sei").unwrap(), &[7; 20])
            .unwrap();
        let error = bech32m.parse::<Address>().expect_err("bech32m must not parse");
        assert!(matches!(
            error,
            AddressError(AddressErrorKind::Decode {
                ..
            })
        ));
    }
}
