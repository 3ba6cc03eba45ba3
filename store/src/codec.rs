//! Static record codec.
//!
//! Every persisted record kind implements [`Record`]; encoding is `bincode`
//! and a decode failure is reported as [`StoreError::Corruption`], since it
//! means the bytes on disk are not what this code wrote.

use crate::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tcr_types::{Ballot, Listing, QueueItem, Vote};

/// A value that can be persisted in a column.
pub trait Record: Serialize + DeserializeOwned {
    /// Record kind, used in error messages.
    const KIND: &'static str;
}

impl Record for Ballot {
    const KIND: &'static str = "ballot";
}

impl Record for Listing {
    const KIND: &'static str = "listing";
}

impl Record for Vote {
    const KIND: &'static str = "vote";
}

impl Record for Vec<QueueItem> {
    const KIND: &'static str = "queue";
}

pub fn encode<R: Record>(record: &R) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(record).map_err(|e| StoreError::Serialization(format!("{}: {e}", R::KIND)))
}

pub fn decode<R: Record>(bytes: &[u8]) -> Result<R, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Corruption(format!("{}: {e}", R::KIND)))
}

/// Balances are stored as 16 big-endian bytes.
pub fn encode_amount(amount: u128) -> [u8; 16] {
    amount.to_be_bytes()
}

pub fn decode_amount(bytes: &[u8]) -> Result<u128, StoreError> {
    let arr: [u8; 16] = bytes
        .try_into()
        .map_err(|_| StoreError::Corruption(format!("amount has {} bytes", bytes.len())))?;
    Ok(u128::from_be_bytes(arr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcr_types::{AccountAddress, BlockHeight, Identifier};

    #[test]
    fn ballot_roundtrip() {
        let ballot = Ballot::new(
            Identifier::new("coffee"),
            AccountAddress::new("tcr_owner"),
            150,
            BlockHeight::new(12),
        )
        .with_details("a coffee shop");
        let bytes = encode(&ballot).unwrap();
        assert_eq!(decode::<Ballot>(&bytes).unwrap(), ballot);
    }

    #[test]
    fn garbage_is_corruption() {
        let err = decode::<Listing>(&[0xff]).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("listing"));
    }

    #[test]
    fn amount_roundtrip_and_length_check() {
        assert_eq!(decode_amount(&encode_amount(u128::MAX)).unwrap(), u128::MAX);
        assert!(decode_amount(&[1, 2, 3]).is_err());
    }
}
