//! Venue and amenity records as supplied by the repository.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

use super::time::{PromotionalWindow, WeeklySchedule};

crate::define_id_type!(i64, VenueId);
crate::define_id_type!(i64, AmenityId);

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A lodging venue (hotel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Quality rating, 1 to 5 stars.
    #[serde(default, deserialize_with = "deserialize_star_rating")]
    pub star_rating: Option<u8>,
    #[serde(default = "default_true")]
    pub has_amenity: bool,
}

fn default_true() -> bool {
    true
}

fn deserialize_star_rating<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<u8>::deserialize(deserializer)? {
        Some(rating) if !(1..=5).contains(&rating) => Err(de::Error::custom(format!(
            "star rating must be between 1 and 5, got {}",
            rating
        ))),
        rating => Ok(rating),
    }
}

impl Venue {
    /// Coordinates when both components are known.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }
}

/// Category of an amenity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityCategory {
    Bar,
    Lounge,
    Rooftop,
    Poolside,
    RestaurantBar,
}

impl AmenityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmenityCategory::Bar => "bar",
            AmenityCategory::Lounge => "lounge",
            AmenityCategory::Rooftop => "rooftop",
            AmenityCategory::Poolside => "poolside",
            AmenityCategory::RestaurantBar => "restaurant_bar",
        }
    }
}

impl FromStr for AmenityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "bar" => Ok(Self::Bar),
            "lounge" => Ok(Self::Lounge),
            "rooftop" => Ok(Self::Rooftop),
            "poolside" => Ok(Self::Poolside),
            "restaurant_bar" => Ok(Self::RestaurantBar),
            _ => Err(format!("Unknown bar type: {}", s)),
        }
    }
}

impl fmt::Display for AmenityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Well-known feature tags the search filters test for.
pub const FEATURE_LIVE_MUSIC: &str = "live_music";
pub const FEATURE_OUTDOOR_SEATING: &str = "outdoor_seating";

/// Canonical form of a feature tag: lowercase, with `-` and spaces folded to `_`.
pub fn normalize_feature(tag: &str) -> String {
    tag.trim().to_lowercase().replace(['-', ' '], "_")
}

/// A bar (or similar) attached to a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub id: AmenityId,
    /// Back-reference to the owning venue.
    pub venue_id: VenueId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category: AmenityCategory,
    #[serde(default)]
    pub serves_food: bool,
    #[serde(default)]
    pub hours: WeeklySchedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub happy_hour: Option<PromotionalWindow>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Amenity {
    pub fn has_feature(&self, feature: &str) -> bool {
        let wanted = normalize_feature(feature);
        self.features.iter().any(|f| normalize_feature(f) == wanted)
    }
}
