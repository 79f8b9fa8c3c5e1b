//! Repository traits for the external data collaborator.
//!
//! The search engine never talks to storage directly. It receives a
//! [`FullRepository`] at construction and asks it for candidate venues and
//! their amenities.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`venue`]: Venue lookup and candidate selection
//! - [`amenity`]: Amenity lookup by owning venue
//!
//! # Trait Composition
//!
//! ```ignore
//! impl VenueRepository for MyRepo { ... }
//! impl AmenityRepository for MyRepo { ... }
//! // MyRepo: FullRepository via the blanket impl
//! ```

pub mod amenity;
pub mod error;
pub mod venue;

pub use amenity::AmenityRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use venue::VenueRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type implementing both
/// [`VenueRepository`] and [`AmenityRepository`].
pub trait FullRepository: VenueRepository + AmenityRepository {}

impl<T> FullRepository for T where T: VenueRepository + AmenityRepository {}
