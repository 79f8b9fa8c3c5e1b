//! Service layer: the availability and ranking engine.
//!
//! - [`schedule`]: open/closed state from a weekly schedule
//! - [`promotion`]: active/inactive state of a promotional window
//! - [`geo`]: great-circle distance
//! - [`aggregator`]: join, filter and sort
//! - [`dispatcher`]: request normalization and orchestration
//!
//! Everything except the dispatcher is synchronous and free of I/O.

pub mod aggregator;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod geo;
pub mod promotion;
pub mod schedule;

pub use aggregator::{aggregate, amenity_status, matches_filters, sort_results, with_status};
pub use dispatcher::{evaluation_instant, resolve_scope, SearchDispatcher};
pub use error::{SearchError, SearchResult};
pub use geo::distance_miles;
pub use promotion::evaluate_promotion;
pub use schedule::{evaluate_schedule, is_open};
