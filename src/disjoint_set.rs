//! Union-find over densely indexed elements.
//!
//! The set does not store values, only the order in which elements were
//! added: the `n`-th call to [`DisjointSet::add`] returns index `n - 1`.
//! Callers keep their own mapping from indices to whatever the elements stand
//! for (for mazes, the node index of a cell doubles as its element index).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisjointSetError {
    #[error("capacity must be positive and scale factor above 1, got capacity {capacity} and scale factor {scale_factor}")]
    InvalidConfiguration { capacity: usize, scale_factor: usize },

    #[error("cannot add {count} elements")]
    InvalidRequest { count: usize },

    #[error("element {index} not found in a set of {size} elements")]
    MissingElement { index: usize, size: usize },
}

#[derive(Debug, Clone)]
pub struct DisjointSet {
    /// Number of slots reserved before the next growth.
    capacity: usize,
    /// Growth multiplier applied to `capacity` when it is exhausted.
    scale_factor: usize,
    /// Each element's value is the index of its parent.
    parent: Vec<usize>,
    /// Each element's value is the rank of the tree rooted at that element.
    rank: Vec<u32>,
}

impl Default for DisjointSet {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            scale_factor: Self::DEFAULT_SCALE_FACTOR,
            parent: Vec::with_capacity(Self::DEFAULT_CAPACITY),
            rank: Vec::with_capacity(Self::DEFAULT_CAPACITY),
        }
    }
}

impl DisjointSet {
    pub const DEFAULT_CAPACITY: usize = 10;
    pub const DEFAULT_SCALE_FACTOR: usize = 2;

    pub fn new(capacity: usize, scale_factor: usize) -> Result<Self, DisjointSetError> {
        if capacity == 0 || scale_factor <= 1 {
            return Err(DisjointSetError::InvalidConfiguration {
                capacity,
                scale_factor,
            });
        }

        Ok(DisjointSet {
            capacity,
            scale_factor,
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
        })
    }

    /// Number of elements added so far.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Reserved slots. Grows by the scale factor whenever it is exhausted.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the next free index, growing the storage if it is full.
    fn ensure_slot(&mut self) -> usize {
        let next = self.parent.len();
        if next >= self.capacity {
            let grown = self.capacity.saturating_mul(self.scale_factor);
            self.parent.reserve_exact(grown - next);
            self.rank.reserve_exact(grown - next);
            self.capacity = grown;
        }
        next
    }

    /// Adds a singleton element and returns its index.
    pub fn add(&mut self) -> usize {
        let index = self.ensure_slot();
        self.parent.push(index);
        self.rank.push(0);
        index
    }

    /// Adds `count` singleton elements and returns the index of the last one.
    pub fn add_many(&mut self, count: usize) -> Result<usize, DisjointSetError> {
        if count == 0 {
            return Err(DisjointSetError::InvalidRequest { count });
        }

        let mut last = 0;
        for _ in 0..count {
            last = self.add();
        }
        Ok(last)
    }

    fn check_index(&self, index: usize) -> Result<(), DisjointSetError> {
        if index < self.parent.len() {
            Ok(())
        } else {
            Err(DisjointSetError::MissingElement {
                index,
                size: self.parent.len(),
            })
        }
    }

    /// Returns the root of the tree containing `index`.
    ///
    /// Every node visited on the way up is re-pointed straight to the root.
    pub fn find(&mut self, index: usize) -> Result<usize, DisjointSetError> {
        self.check_index(index)?;

        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Second pass over the same path keeps the compression iterative
        let mut node = index;
        while node != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        Ok(root)
    }

    /// Whether `a` and `b` currently share a root.
    pub fn same(&mut self, a: usize, b: usize) -> Result<bool, DisjointSetError> {
        Ok(self.find(a)? == self.find(b)?)
    }

    /// Merges the sets containing `a` and `b`. Merging a set with itself is a no-op.
    pub fn union(&mut self, a: usize, b: usize) -> Result<(), DisjointSetError> {
        let root_a = self.find(a)?;
        let root_b = self.find(b)?;

        if root_a == root_b {
            return Ok(()); // Already in same set
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_b] = root_a;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_a] = root_b;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        Ok(())
    }
}
