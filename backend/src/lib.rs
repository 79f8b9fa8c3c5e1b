//! # Bar Finder
//!
//! Search engine for hotel bars and lounges.
//!
//! Given a city or a coordinate plus filter toggles, the engine fetches
//! candidate venues and their bar amenities from a repository, decides whether
//! each amenity is open and whether its happy hour is running at the
//! evaluation instant, measures distance to the reference point, and returns a
//! filtered, ranked list.
//!
//! ## Architecture
//!
//! - [`models`]: venues, amenities, schedules and search types
//! - [`services`]: schedule and promotion evaluation, distance, aggregation,
//!   and the [`SearchDispatcher`](services::SearchDispatcher)
//! - [`db`]: repository traits and the in-memory implementation
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: axum REST API (feature `http-server`)
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use barfinder::config::SearchSettings;
//! use barfinder::db::LocalRepository;
//! use barfinder::models::SearchRequest;
//! use barfinder::services::SearchDispatcher;
//!
//! let repo = Arc::new(LocalRepository::new());
//! let dispatcher = SearchDispatcher::new(repo, SearchSettings::default());
//! let request = SearchRequest { text: Some("Chicago".into()), ..Default::default() };
//! assert!(dispatcher.normalize(&request).is_ok());
//! ```

// RepositoryError carries a structured context
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
