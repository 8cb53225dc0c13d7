//! Record store: the facade drivers call, plus a lock-guarded handle

pub mod facade;
pub mod shared;

pub use facade::{RecordStore, StoreStats};
pub use shared::SharedRecordStore;
