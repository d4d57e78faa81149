use std::borrow::Cow;

use borsh::{
    io::{
        Read,
        Write,
    },
    BorshDeserialize,
    BorshSerialize,
};

use crate::{
    records,
    storage::{
        CodecError,
        StoredValue,
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Denom<'a>(Cow<'a, str>);

impl<'a> From<&'a str> for Denom<'a> {
    fn from(name: &'a str) -> Self {
        Denom(Cow::Borrowed(name))
    }
}

impl<'a> From<&'a records::Denom> for Denom<'a> {
    fn from(denom: &'a records::Denom) -> Self {
        Denom(Cow::Borrowed(denom.name.as_str()))
    }
}

impl<'a> From<Denom<'a>> for records::Denom {
    fn from(denom: Denom<'a>) -> Self {
        records::Denom {
            name: denom.0.into_owned(),
        }
    }
}

impl BorshSerialize for Denom<'_> {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let name: &str = &self.0;
        name.serialize(writer)
    }
}

impl BorshDeserialize for Denom<'_> {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let name = String::deserialize_reader(reader)?;
        Ok(Denom(Cow::Owned(name)))
    }
}

impl<'a> From<Denom<'a>> for StoredValue<'a> {
    fn from(denom: Denom<'a>) -> Self {
        StoredValue::Denom(denom)
    }
}

impl<'a> TryFrom<StoredValue<'a>> for Denom<'a> {
    type Error = CodecError;

    fn try_from(value: StoredValue<'a>) -> Result<Self, Self::Error> {
        let StoredValue::Denom(denom) = value else {
            return Err(CodecError::type_mismatch("denom", &value));
        };
        Ok(denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denom_serialization_round_trip() {
        let denom = Denom::from("usei");
        let serialized = borsh::to_vec(&denom).unwrap();
        let deserialized: Denom = borsh::from_slice(&serialized).unwrap();
        assert_eq!(denom, deserialized);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let bytes = [2, 0, 0, 0, 0xff, 0xfe];
        assert!(borsh::from_slice::<Denom>(&bytes).is_err());
    }
}
