//! Recency List Module
//!
//! Implements Least Recently Used ordering for cache eviction.

// == Position ==
/// Stable handle to a node in a [`RecencyList`].
///
/// A position stays valid until the node it names is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(usize);

#[derive(Debug)]
struct Node {
    key: String,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// Doubly linked list stored in a slot arena, linked by index rather than by
/// pointer:
/// - Head = Least recently used
/// - Tail = Most recently used
///
/// Touch, remove and pop are O(1). Freed slots are reused by later inserts.
#[derive(Debug, Default)]
pub struct RecencyList {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Back ==
    /// Appends a key as the most recently used and returns its position.
    pub fn push_back(&mut self, key: String) -> Position {
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.link_back(idx);
        self.len += 1;
        Position(idx)
    }

    // == Touch ==
    /// Marks a position as most recently used (moves it to the tail).
    pub fn touch(&mut self, position: Position) {
        if self.tail == Some(position.0) || self.slot(position.0).is_none() {
            return;
        }
        self.unlink(position.0);
        self.link_back(position.0);
    }

    // == Remove ==
    /// Removes a position from the list, returning its key.
    pub fn remove(&mut self, position: Position) -> Option<String> {
        self.slot(position.0)?;
        self.unlink(position.0);
        let node = self.nodes.get_mut(position.0)?.take()?;
        self.free.push(position.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Pop Front ==
    /// Removes and returns the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_front(&mut self) -> Option<String> {
        let head = self.head?;
        self.remove(Position(head))
    }

    // == Front ==
    /// Returns the least recently used key without removing it.
    pub fn front(&self) -> Option<&str> {
        self.head
            .and_then(|idx| self.slot(idx))
            .map(|node| node.key.as_str())
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every node and releases the arena.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iterate ==
    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn slot(&self, idx: usize) -> Option<&Node> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, idx: usize) -> Option<&mut Node> {
        self.nodes.get_mut(idx).and_then(Option::as_mut)
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.slot(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev.and_then(|p| self.slot_mut(p)) {
            Some(node) => node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.slot_mut(n)) {
            Some(node) => node.prev = prev,
            None => self.tail = prev,
        }

        if let Some(node) = self.slot_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    fn link_back(&mut self, idx: usize) {
        let old_tail = self.tail;
        if let Some(node) = self.slot_mut(idx) {
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail.and_then(|t| self.slot_mut(t)) {
            Some(node) => node.next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }
}

// == Iterator ==
/// Head-to-tail iterator over the keys of a [`RecencyList`].
pub struct Iter<'a> {
    list: &'a RecencyList,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.slot(self.cursor?)?;
        self.cursor = node.next;
        Some(node.key.as_str())
    }
}
