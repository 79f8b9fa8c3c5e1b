//! Venue repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{SearchScope, Venue, VenueId};

/// Read access to venues.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// Check if the backing store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Fetch candidate venues for a search.
    ///
    /// Only venues flagged as having an amenity are returned, in the store's
    /// stable order, and at most `limit` of them. Resolving a text hint to a
    /// geographic area is the implementation's responsibility.
    ///
    /// # Arguments
    /// * `scope` - Proximity or text scope
    /// * `limit` - Maximum number of venues to return
    async fn fetch_venues(&self, scope: &SearchScope, limit: usize) -> RepositoryResult<Vec<Venue>>;

    /// Retrieve a single venue.
    ///
    /// # Returns
    /// * `Ok(Venue)` - The venue
    /// * `Err(RepositoryError::NotFound)` - If the venue doesn't exist
    async fn get_venue(&self, venue_id: VenueId) -> RepositoryResult<Venue>;
}
