//! Campus-life dashboard data: built-in mock snapshots, the persisted
//! store for user changes, and the query/mutation interface the assistant's
//! tools are written against.

mod baseline;
mod dashboard;
mod error;
mod store;
mod summary;
mod types;

pub use dashboard::{CampusData, Dashboard};
pub use error::CampusDataError;
pub use store::UserDataStore;
pub use summary::ContextSummary;
pub use types::*;
