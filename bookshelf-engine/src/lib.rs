//! Bookshelf Engine - in-memory book catalogue
//!
//! Keeps one collection of book records reachable three ways: in insertion
//! order, in title order, and by ISBN. Inserts update all three indexes
//! together; deletes by ISBN update the ISBN index only, unless the store is
//! configured to cascade.

pub mod error;
pub mod config;
pub mod storage;
pub mod store;

pub use error::{ShelfError, ShelfResult, StatusCode};
pub use config::{DeletePolicy, StoreConfig};
pub use storage::Record;
pub use store::{RecordStore, SharedRecordStore, StoreStats};
