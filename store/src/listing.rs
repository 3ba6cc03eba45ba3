use crate::codec::{decode, encode};
use crate::{Column, KvStore, StoreError};
use tcr_types::{Identifier, Listing};

/// Accepted listings, keyed by identifier.
pub trait ListingStore: KvStore {
    fn get_listing(&self, identifier: &Identifier) -> Result<Option<Listing>, StoreError> {
        self.get(Column::Listings, identifier.as_bytes())?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    fn put_listing(&self, listing: &Listing) -> Result<(), StoreError> {
        self.put(Column::Listings, listing.identifier.as_bytes(), &encode(listing)?)
    }

    fn delete_listing(&self, identifier: &Identifier) -> Result<(), StoreError> {
        self.delete(Column::Listings, identifier.as_bytes())
    }

    fn listing_exists(&self, identifier: &Identifier) -> Result<bool, StoreError> {
        self.contains(Column::Listings, identifier.as_bytes())
    }

    fn iter_listings(&self) -> Result<Vec<Listing>, StoreError> {
        self.scan(Column::Listings)?
            .into_iter()
            .map(|(_, value)| decode(&value))
            .collect()
    }
}

impl<T: KvStore + ?Sized> ListingStore for T {}
