//! Data access for the venue directory.
//!
//! Search never reads storage directly: it is handed a [`FullRepository`] at
//! construction and asks it for candidate venues and their amenities.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP layer / embedding application                     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  services::SearchDispatcher                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository traits (repository/)                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │        (in-memory, optional JSON seed)        │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! - `repository`: trait definitions and error types
//! - `repositories::local`: in-memory implementation
//! - `factory`: construct a repository from configuration

pub mod factory;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repositories::{LocalRepository, SeedData};
pub use repository::{
    AmenityRepository, ErrorContext, FullRepository, RepositoryError, RepositoryResult,
    VenueRepository,
};
