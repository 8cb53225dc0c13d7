//! Record store facade - fans every operation out to the three indexes
//!
//! This is the single entry point for drivers. Inserts reach all three
//! indexes; deletes reach only the ISBN index unless the store was built
//! with `DeletePolicy::Cascade`.

use tracing::{debug, info, warn};

use crate::config::{DeletePolicy, StoreConfig};
use crate::error::ShelfResult;
use crate::storage::{InOrder, InsertionOrderIndex, IsbnTable, Record, TitleTree};

/// Smallest tree the height check applies to
const DEGENERATE_MIN_NODES: usize = 32;

/// Height above which a tree of `nodes` nodes counts as degenerate:
/// four times its bit length, roughly `4 * log2(nodes)`
fn degenerate_height_bound(nodes: usize) -> usize {
    4 * (usize::BITS - nodes.leading_zeros()) as usize
}

/// Point-in-time sizes of the indexes
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStats {
    /// Records in the insertion-order index
    pub ordered: usize,
    /// Live records in the title index
    pub titled: usize,
    /// Records in the ISBN index
    pub identified: usize,
    /// Order-index entries with no ISBN-index counterpart
    pub stale: usize,
    pub tree_height: usize,
    /// Tree height is past the size-relative bound
    pub tree_degenerate: bool,
    pub bucket_count: usize,
    pub load_factor: f64,
    pub longest_chain: usize,
}

/// Three coordinated indexes over one logical set of book records
#[derive(Debug, Clone)]
pub struct RecordStore {
    order: InsertionOrderIndex,
    titles: TitleTree,
    isbns: IsbnTable,
    delete_policy: DeletePolicy,
    tree_degenerate: bool,
}

impl RecordStore {
    /// Create a store with the reference layout
    pub fn new() -> Self {
        RecordStore {
            order: InsertionOrderIndex::new(),
            titles: TitleTree::new(),
            isbns: IsbnTable::default(),
            delete_policy: DeletePolicy::default(),
            tree_degenerate: false,
        }
    }

    /// Create a store from a configuration, validating it first
    pub fn with_config(config: &StoreConfig) -> ShelfResult<Self> {
        config.validate()?;

        let store = RecordStore {
            order: InsertionOrderIndex::new(),
            titles: TitleTree::new(),
            isbns: IsbnTable::with_config(&config.identifier_index),
            delete_policy: config.consistency.delete_policy,
            tree_degenerate: false,
        };

        info!(
            "Record store ready: {} ISBN buckets ({}), delete policy {:?}",
            store.isbns.bucket_count(),
            match config.identifier_index.max_load_factor {
                Some(max) => format!("grow above load factor {}", max),
                None => "fixed".to_string(),
            },
            store.delete_policy
        );

        Ok(store)
    }

    /// Build a record and add it to every index
    pub fn add_record(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) {
        self.insert(Record::new(title, author, isbn));
    }

    /// Add a record to every index: order, then title, then ISBN
    pub fn insert(&mut self, record: Record) {
        debug!("Adding {:?} (ISBN {:?})", record.title, record.isbn);

        self.order.append(record.clone());
        self.titles.insert(record.clone());
        self.isbns.insert(record);

        self.check_tree_shape();
    }

    /// Warn once when the title tree's height crosses the bound for its
    /// size. The warning re-arms if the height falls back within it.
    fn check_tree_shape(&mut self) {
        let nodes = self.titles.len() + self.titles.tombstones();
        let height = self.titles.height();
        let degenerate =
            nodes >= DEGENERATE_MIN_NODES && height > degenerate_height_bound(nodes);

        if degenerate && !self.tree_degenerate {
            warn!(
                "Title index reached height {} with {} nodes (bound {}); titles are arriving in sorted order",
                height,
                nodes,
                degenerate_height_bound(nodes)
            );
        }
        self.tree_degenerate = degenerate;
    }

    /// True while the title tree is taller than its size warrants
    pub fn title_index_degenerate(&self) -> bool {
        self.tree_degenerate
    }

    /// Delete the first record with this ISBN; true if one was removed
    pub fn delete_record(&mut self, isbn: &str) -> bool {
        let Some(removed) = self.isbns.remove(isbn) else {
            warn!("Delete of unknown ISBN {:?}", isbn);
            return false;
        };

        match self.delete_policy {
            DeletePolicy::IdentifierOnly => {
                debug!(
                    "Deleted ISBN {:?} from identifier index; {:?} remains in order and title indexes",
                    isbn, removed.title
                );
            }
            DeletePolicy::Cascade => {
                let in_order = self.order.remove_first(isbn).is_some();
                let in_tree = self.titles.tombstone_first(isbn);
                debug!(
                    "Deleted ISBN {:?} ({:?}) from all indexes (order: {}, title: {})",
                    isbn, removed.title, in_order, in_tree
                );
            }
        }

        true
    }

    /// Shallowest title-index match for this title
    pub fn find_by_title(&self, title: &str) -> Option<&Record> {
        self.titles.search(title)
    }

    /// First ISBN-index match for this ISBN
    pub fn find_by_id(&self, isbn: &str) -> Option<&Record> {
        self.isbns.search(isbn)
    }

    /// All records in insertion order
    pub fn list_all(&self) -> std::slice::Iter<'_, Record> {
        self.order.iter()
    }

    /// All records in ascending title order
    pub fn list_by_title(&self) -> InOrder<'_> {
        self.titles.iter_in_order()
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Number of records reachable by ISBN
    pub fn len(&self) -> usize {
        self.isbns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.isbns.is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            ordered: self.order.len(),
            titled: self.titles.len(),
            identified: self.isbns.len(),
            stale: self.order.len().saturating_sub(self.isbns.len()),
            tree_height: self.titles.height(),
            tree_degenerate: self.tree_degenerate,
            bucket_count: self.isbns.bucket_count(),
            load_factor: self.isbns.load_factor(),
            longest_chain: self.isbns.longest_chain(),
        }
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
