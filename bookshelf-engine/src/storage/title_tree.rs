//! Title index: unbalanced binary search tree keyed by title
//!
//! Nodes live in an arena and link to their children by index. Insert,
//! search and traversal are all iterative, so a degenerate tree (titles
//! inserted in sorted order) costs O(n) time but no call-stack depth.
//!
//! Ordering rules:
//! - a title strictly less than the node's title goes left
//! - an equal or greater title goes right, so duplicates collect down the
//!   right spine in insertion order
//! - search returns the shallowest match; later duplicates are unreachable

use super::record::Record;

/// Arena slot for one tree node
#[derive(Debug, Clone)]
struct TitleNode {
    record: Record,
    left: Option<usize>,
    right: Option<usize>,
    /// False once removed by a cascade delete. The node keeps its place in
    /// the tree so the shape of the remaining nodes does not change.
    live: bool,
}

/// Binary search tree over record titles
#[derive(Debug, Default, Clone)]
pub struct TitleTree {
    nodes: Vec<TitleNode>,
    root: Option<usize>,
    live: usize,
    height: usize,
}

impl TitleTree {
    pub fn new() -> Self {
        TitleTree {
            nodes: Vec::new(),
            root: None,
            live: 0,
            height: 0,
        }
    }

    /// Insert a record, returning the depth of the new node (root = 1)
    pub fn insert(&mut self, record: Record) -> usize {
        let id = self.nodes.len();
        let mut depth = 1;

        if let Some(mut cursor) = self.root {
            loop {
                depth += 1;
                let node = &mut self.nodes[cursor];
                let slot = if record.title < node.record.title {
                    &mut node.left
                } else {
                    &mut node.right
                };
                match *slot {
                    Some(next) => cursor = next,
                    None => {
                        *slot = Some(id);
                        break;
                    }
                }
            }
        } else {
            self.root = Some(id);
        }

        self.nodes.push(TitleNode {
            record,
            left: None,
            right: None,
            live: true,
        });
        self.live += 1;
        self.height = self.height.max(depth);
        depth
    }

    /// Find the shallowest record with exactly this title
    pub fn search(&self, title: &str) -> Option<&Record> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            if node.live && node.record.title == title {
                return Some(&node.record);
            }
            cursor = if title < node.record.title.as_str() {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    /// Iterate records in ascending title order. Calling again restarts.
    pub fn iter_in_order(&self) -> InOrder<'_> {
        let mut iter = InOrder {
            nodes: &self.nodes,
            stack: Vec::with_capacity(self.height),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Hide the earliest-inserted live node carrying this ISBN
    pub(crate) fn tombstone_first(&mut self, isbn: &str) -> bool {
        match self.nodes.iter_mut().find(|n| n.live && n.record.isbn == isbn) {
            Some(node) => {
                node.live = false;
                self.live -= 1;
                true
            }
            None => false,
        }
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Nodes hidden by cascade deletes
    pub fn tombstones(&self) -> usize {
        self.nodes.len() - self.live
    }

    /// Longest root-to-leaf path, counted in nodes
    pub fn height(&self) -> usize {
        self.height
    }
}

/// In-order traversal driven by an explicit stack
pub struct InOrder<'a> {
    nodes: &'a [TitleNode],
    stack: Vec<usize>,
}

impl<'a> InOrder<'a> {
    fn push_left_spine(&mut self, mut cursor: Option<usize>) {
        while let Some(id) = cursor {
            self.stack.push(id);
            cursor = self.nodes[id].left;
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.stack.pop()?;
            let node = &self.nodes[id];
            self.push_left_spine(node.right);
            if node.live {
                return Some(&node.record);
            }
        }
    }
}
