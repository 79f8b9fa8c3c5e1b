//! In-memory local repository implementation.
//!
//! Stores venues and amenities in insertion order behind a `RwLock`. Suitable
//! for tests, local development and small fixed directories loaded from a
//! JSON seed file.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::db::repository::*;
use crate::models::{Amenity, SearchScope, Venue, VenueId};
use crate::services::dispatcher::normalize_location_text;
use crate::services::geo::distance_miles;

/// Seed file layout: `{ "venues": [...], "amenities": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
}

/// In-memory local repository.
///
/// # Example
/// ```
/// use barfinder::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.venue_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    venues: Vec<Venue>,
    amenities: Vec<Amenity>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            venues: Vec::new(),
            amenities: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository pre-populated with seed data.
    pub fn from_seed(seed: SeedData) -> Self {
        let repo = Self::new();
        for venue in seed.venues {
            repo.add_venue(venue);
        }
        for amenity in seed.amenities {
            repo.add_amenity(amenity);
        }
        repo
    }

    /// Parse seed data from a JSON string.
    pub fn from_json_str(json: &str) -> RepositoryResult<Self> {
        let seed: SeedData = serde_json::from_str(json)?;
        Ok(Self::from_seed(seed))
    }

    /// Load seed data from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            ))
        })?;
        let repo = Self::from_json_str(&content)
            .map_err(|e| e.with_operation("load_seed_file"))?;
        debug!(
            path = %path.display(),
            venues = repo.venue_count(),
            amenities = repo.amenity_count(),
            "loaded seed data"
        );
        Ok(repo)
    }

    /// Add a venue, replacing any stored venue with the same ID in place.
    pub fn add_venue(&self, venue: Venue) {
        let mut data = self.data.write();
        match data.venues.iter_mut().find(|v| v.id == venue.id) {
            Some(existing) => *existing = venue,
            None => data.venues.push(venue),
        }
    }

    /// Add an amenity. Amenities are kept in insertion order.
    pub fn add_amenity(&self, amenity: Amenity) {
        let mut data = self.data.write();
        if !data.venues.iter().any(|v| v.id == amenity.venue_id) {
            warn!(
                amenity_id = %amenity.id,
                venue_id = %amenity.venue_id,
                "amenity references an unknown venue"
            );
        }
        data.amenities.push(amenity);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        data.venues.clear();
        data.amenities.clear();
    }

    pub fn venue_count(&self) -> usize {
        self.data.read().venues.len()
    }

    pub fn amenity_count(&self) -> usize {
        self.data.read().amenities.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Repository is not healthy",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a venue lies inside a search scope.
///
/// Proximity scopes skip venues without coordinates and keep venues whose
/// stored coordinate is malformed, so the aggregator can report them instead
/// of treating them as out of range. Text scopes match the hint exactly
/// against the venue's city, state, postal code, or city and state combined.
fn in_scope(venue: &Venue, scope: &SearchScope) -> bool {
    match scope {
        SearchScope::Nearby {
            center,
            radius_miles,
        } => match venue.coordinates() {
            None => false,
            Some(location) => match distance_miles(*center, location) {
                Ok(miles) => miles <= f64::from(*radius_miles),
                Err(_) => {
                    warn!(venue_id = %venue.id, "venue has an invalid coordinate");
                    true
                }
            },
        },
        SearchScope::Text { hint } => {
            let candidates = [
                venue.city.clone(),
                venue.state.clone(),
                venue.zip.clone(),
                format!("{}, {}", venue.city, venue.state),
                format!("{} {}", venue.city, venue.state),
            ];
            candidates
                .iter()
                .any(|candidate| normalize_location_text(candidate) == *hint)
        }
    }
}

#[async_trait]
impl VenueRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn fetch_venues(
        &self,
        scope: &SearchScope,
        limit: usize,
    ) -> RepositoryResult<Vec<Venue>> {
        self.check_health("fetch_venues")?;
        let data = self.data.read();
        Ok(data
            .venues
            .iter()
            .filter(|venue| venue.has_amenity && in_scope(venue, scope))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_venue(&self, venue_id: VenueId) -> RepositoryResult<Venue> {
        self.check_health("get_venue")?;
        let data = self.data.read();
        data.venues
            .iter()
            .find(|venue| venue.id == venue_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Venue {} not found", venue_id),
                    ErrorContext::new("get_venue")
                        .with_entity("venue")
                        .with_entity_id(venue_id),
                )
            })
    }
}

#[async_trait]
impl AmenityRepository for LocalRepository {
    async fn fetch_amenities(&self, venue_ids: &[VenueId]) -> RepositoryResult<Vec<Amenity>> {
        self.check_health("fetch_amenities")?;
        let data = self.data.read();
        Ok(data
            .amenities
            .iter()
            .filter(|amenity| venue_ids.contains(&amenity.venue_id))
            .cloned()
            .collect())
    }

    async fn get_amenities_for_venue(&self, venue_id: VenueId) -> RepositoryResult<Vec<Amenity>> {
        self.fetch_amenities(&[venue_id]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AmenityCategory, AmenityId, Coordinates, WeeklySchedule};

    fn venue(id: i64, city: &str, state: &str, coords: Option<(f64, f64)>) -> Venue {
        Venue {
            id: VenueId::new(id),
            name: format!("Hotel {}", id),
            brand: None,
            address: "1 Main St".to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip: format!("{:05}", id),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            phone: None,
            website: None,
            star_rating: None,
            has_amenity: true,
        }
    }

    fn amenity(id: i64, venue_id: i64) -> Amenity {
        Amenity {
            id: AmenityId::new(id),
            venue_id: VenueId::new(venue_id),
            name: None,
            category: AmenityCategory::Bar,
            serves_food: false,
            hours: WeeklySchedule::new(),
            happy_hour: None,
            features: vec![],
            phone_number: None,
            description: None,
        }
    }

    fn text(hint: &str) -> SearchScope {
        SearchScope::Text {
            hint: hint.to_string(),
        }
    }

    #[tokio::test]
    async fn test_text_scope_matches_exact_location_fields() {
        let repo = LocalRepository::new();
        repo.add_venue(venue(1, "New York", "NY", None));
        repo.add_venue(venue(2, "York", "PA", None));
        repo.add_venue(venue(3, "Chicago", "IL", None));

        let ids = |venues: Vec<Venue>| venues.iter().map(|v| v.id.value()).collect::<Vec<_>>();
        assert_eq!(ids(repo.fetch_venues(&text("new york"), 50).await.unwrap()), vec![1]);
        assert_eq!(ids(repo.fetch_venues(&text("york"), 50).await.unwrap()), vec![2]);
        assert_eq!(ids(repo.fetch_venues(&text("chicago, il"), 50).await.unwrap()), vec![3]);
        assert_eq!(ids(repo.fetch_venues(&text("il"), 50).await.unwrap()), vec![3]);
        assert_eq!(ids(repo.fetch_venues(&text("00002"), 50).await.unwrap()), vec![2]);
        assert!(repo.fetch_venues(&text("chi"), 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_nearby_scope_uses_radius() {
        let repo = LocalRepository::new();
        repo.add_venue(venue(1, "Chicago", "IL", Some((41.88, -87.63))));
        repo.add_venue(venue(2, "Milwaukee", "WI", Some((43.04, -87.91))));
        repo.add_venue(venue(3, "Nowhere", "IL", None));

        let scope = |radius_miles| SearchScope::Nearby {
            center: Coordinates::new(41.8781, -87.6298),
            radius_miles,
        };
        assert_eq!(repo.fetch_venues(&scope(10), 50).await.unwrap().len(), 1);
        assert_eq!(repo.fetch_venues(&scope(100), 50).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_nearby_scope_keeps_malformed_coordinates() {
        let repo = LocalRepository::new();
        repo.add_venue(venue(1, "Chicago", "IL", Some((41.88, -87.63))));
        repo.add_venue(venue(2, "Chicago", "IL", Some((95.0, -87.63))));
        repo.add_venue(venue(3, "Chicago", "IL", Some((f64::NAN, -87.63))));

        let scope = SearchScope::Nearby {
            center: Coordinates::new(41.8781, -87.6298),
            radius_miles: 10,
        };
        let ids: Vec<i64> = repo
            .fetch_venues(&scope, 50)
            .await
            .unwrap()
            .iter()
            .map(|v| v.id.value())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_fetch_venues_skips_venues_without_amenity_and_limits() {
        let repo = LocalRepository::new();
        let mut no_bar = venue(1, "Chicago", "IL", None);
        no_bar.has_amenity = false;
        repo.add_venue(no_bar);
        for id in 2..6 {
            repo.add_venue(venue(id, "Chicago", "IL", None));
        }
        let venues = repo.fetch_venues(&text("chicago"), 3).await.unwrap();
        let ids: Vec<i64> = venues.iter().map(|v| v.id.value()).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn test_fetch_amenities_keeps_insertion_order() {
        let repo = LocalRepository::new();
        repo.add_venue(venue(1, "Chicago", "IL", None));
        repo.add_venue(venue(2, "Chicago", "IL", None));
        repo.add_amenity(amenity(30, 2));
        repo.add_amenity(amenity(10, 1));
        repo.add_amenity(amenity(20, 1));

        let all = repo
            .fetch_amenities(&[VenueId::new(1), VenueId::new(2)])
            .await
            .unwrap();
        let ids: Vec<i64> = all.iter().map(|a| a.id.value()).collect();
        assert_eq!(ids, vec![30, 10, 20]);

        let own = repo.get_amenities_for_venue(VenueId::new(1)).await.unwrap();
        assert_eq!(own.len(), 2);
    }

    #[tokio::test]
    async fn test_get_venue_not_found() {
        let repo = LocalRepository::new();
        let err = repo.get_venue(VenueId::new(9)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.context().entity_id, Some("9".to_string()));
    }

    #[tokio::test]
    async fn test_unhealthy_repository_fails_with_retryable_error() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        let err = repo.fetch_venues(&text("chicago"), 10).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.context().operation, Some("fetch_venues".to_string()));
    }

    #[test]
    fn test_add_venue_replaces_same_id() {
        let repo = LocalRepository::new();
        repo.add_venue(venue(1, "Chicago", "IL", None));
        repo.add_venue(venue(1, "Evanston", "IL", None));
        assert_eq!(repo.venue_count(), 1);
    }

    #[test]
    fn test_from_json_str() {
        let repo = LocalRepository::from_json_str(
            r#"{
                "venues": [{"id": 1, "name": "A", "address": "1 St", "city": "Chicago",
                            "state": "IL", "zip": "60601"}],
                "amenities": [{"id": 5, "venueId": 1, "type": "lounge"}]
            }"#,
        )
        .unwrap();
        assert_eq!(repo.venue_count(), 1);
        assert_eq!(repo.amenity_count(), 1);

        let err = LocalRepository::from_json_str("{not json").err().unwrap();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }

    #[test]
    fn test_from_json_str_rejects_out_of_range_rating() {
        let err = LocalRepository::from_json_str(
            r#"{"venues": [{"id": 1, "name": "A", "address": "1 St", "city": "Chicago",
                            "state": "IL", "zip": "60601", "starRating": 9}]}"#,
        )
        .err()
        .unwrap();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert!(err.to_string().contains("between 1 and 5"));
    }
}
