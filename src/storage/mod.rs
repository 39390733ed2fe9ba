//! Persistence of saved listings behind a table-oriented row store

pub mod memory;
pub mod rest;
pub mod row_store;
pub mod saved;

pub use memory::MemoryRowStore;
pub use rest::RestRowStore;
pub use row_store::{Filter, RowStore};
pub use saved::{SavedListing, SavedListings};
