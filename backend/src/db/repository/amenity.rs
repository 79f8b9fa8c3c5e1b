//! Amenity repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Amenity, VenueId};

/// Read access to amenities.
#[async_trait]
pub trait AmenityRepository: Send + Sync {
    /// Fetch every amenity owned by any of `venue_ids`, in one batch.
    ///
    /// Amenities come back in the store's insertion order; that order decides
    /// which amenity is a venue's primary one.
    async fn fetch_amenities(&self, venue_ids: &[VenueId]) -> RepositoryResult<Vec<Amenity>>;

    /// Amenities of a single venue. An unknown venue yields an empty list.
    async fn get_amenities_for_venue(&self, venue_id: VenueId) -> RepositoryResult<Vec<Amenity>>;
}
