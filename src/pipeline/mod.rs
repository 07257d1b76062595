//! Pipeline entry points.
//!
//! - `run_search`: Validate configuration and search a single shop

pub mod search;

pub use search::run_search;
