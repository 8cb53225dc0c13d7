//! Storage layer: the record type and the three indexes over it
//!
//! - Insertion-order sequence
//! - Title binary search tree
//! - ISBN hash table
//!
//! No index knows about the others; `RecordStore` keeps them in step.

pub mod record;
pub mod order;
pub mod title_tree;
pub mod isbn_table;

pub use record::Record;
pub use order::InsertionOrderIndex;
pub use title_tree::{InOrder, TitleTree};
pub use isbn_table::{hash_isbn, IsbnTable, DEFAULT_BUCKET_COUNT, MAX_BUCKET_COUNT, MIN_LOAD_FACTOR};
