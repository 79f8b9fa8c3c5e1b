//! Domain model shared by the engine, the repository layer and the HTTP API.
//!
//! All values here are plain data: they are built fresh for every search from
//! records supplied by the repository and discarded once the response is sent.

pub mod macros;
pub mod search;
pub mod time;
pub mod venue;

pub use search::*;
pub use time::*;
pub use venue::*;
