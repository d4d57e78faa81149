use borsh::{
    BorshDeserialize,
    BorshSerialize,
};

use crate::storage::{
    CodecError,
    StoredValue,
};

/// The number of vote periods a validator failed to vote in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MissCounter(u64);

impl MissCounter {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for MissCounter {
    fn from(count: u64) -> Self {
        MissCounter(count)
    }
}

impl From<MissCounter> for u64 {
    fn from(count: MissCounter) -> Self {
        count.0
    }
}

impl From<MissCounter> for StoredValue<'_> {
    fn from(count: MissCounter) -> Self {
        StoredValue::MissCounter(count)
    }
}

impl<'a> TryFrom<StoredValue<'a>> for MissCounter {
    type Error = CodecError;

    fn try_from(value: StoredValue<'a>) -> Result<Self, Self::Error> {
        let StoredValue::MissCounter(count) = value else {
            return Err(CodecError::type_mismatch("miss counter", &value));
        };
        Ok(count)
    }
}
