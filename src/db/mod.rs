//! Persistence layer

pub mod sqlite;

pub use sqlite::{DocumentStore, Filter, MAX_FIND_RESULTS};
