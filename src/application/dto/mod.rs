//! Data Transfer Objects - For API boundaries
//!
//! View models are built in the application layer so the HTTP layer only
//! serializes them and never reaches into the domain model.

pub mod search;
pub mod sheet;
pub mod wizard;

pub use search::*;
pub use sheet::*;
pub use wizard::*;
