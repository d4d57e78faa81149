use borsh::{
    io::{
        Read,
        Write,
    },
    BorshDeserialize,
    BorshSerialize,
};
use rust_decimal::Decimal;

use crate::storage::{
    CodecError,
    StoredValue,
};

/// A decimal written as its `i128` mantissa followed by its `u32` scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    #[must_use]
    pub fn get(self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for ExchangeRate {
    fn from(rate: Decimal) -> Self {
        ExchangeRate(rate)
    }
}

impl From<ExchangeRate> for Decimal {
    fn from(rate: ExchangeRate) -> Self {
        rate.0
    }
}

impl BorshSerialize for ExchangeRate {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.0.mantissa().serialize(writer)?;
        self.0.scale().serialize(writer)
    }
}

impl BorshDeserialize for ExchangeRate {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mantissa = i128::deserialize_reader(reader)?;
        let scale = u32::deserialize_reader(reader)?;
        let rate = Decimal::try_from_i128_with_scale(mantissa, scale)
            .map_err(std::io::Error::other)?;
        Ok(ExchangeRate(rate))
    }
}

impl From<ExchangeRate> for StoredValue<'_> {
    fn from(rate: ExchangeRate) -> Self {
        StoredValue::ExchangeRate(rate)
    }
}

impl<'a> TryFrom<StoredValue<'a>> for ExchangeRate {
    type Error = CodecError;

    fn try_from(value: StoredValue<'a>) -> Result<Self, Self::Error> {
        let StoredValue::ExchangeRate(rate) = value else {
            return Err(CodecError::type_mismatch("exchange rate", &value));
        };
        Ok(rate)
    }
}
