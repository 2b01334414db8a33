//! Rules catalog adapter

mod catalog;

pub use catalog::ContentCatalog;
