//! Fixed-capacity ordered history buffers.
//!
//! # Responsibility
//! - Retain a bounded, ordered history of sketches or planted objects.
//! - Apply one named eviction policy per gallery, fixed at construction.
//!
//! # Invariants
//! - `len() <= capacity()` at every point, including inside `insert`.
//! - Storage grows with `len()`, never with `capacity()`.
//! - `insert` never fails; overflow evicts exactly one item (the oldest).
//! - `head()` always returns the most recently inserted item in O(1).

use log::debug;
use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Ordering and eviction rule of a `BoundedGallery`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// New item becomes index 0; overflow drops the tail.
    MostRecentFirst,
    /// New item is appended at the end; overflow drops the head.
    OldestEvicted,
}

impl EvictionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MostRecentFirst => "most_recent_first",
            Self::OldestEvicted => "oldest_evicted",
        }
    }
}

/// Gallery construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    InvalidCapacity(usize),
}

impl Display for GalleryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCapacity(value) => {
                write!(f, "gallery capacity must be positive, got {value}")
            }
        }
    }
}

impl Error for GalleryError {}

/// Bounded ordered collection with a deterministic eviction order.
#[derive(Debug, Clone)]
pub struct BoundedGallery<T> {
    items: VecDeque<T>,
    capacity: usize,
    policy: EvictionPolicy,
}

impl<T> BoundedGallery<T> {
    /// Creates an empty gallery.
    ///
    /// # Errors
    /// - `InvalidCapacity` when `capacity == 0`.
    pub fn new(capacity: usize, policy: EvictionPolicy) -> Result<Self, GalleryError> {
        if capacity == 0 {
            return Err(GalleryError::InvalidCapacity(capacity));
        }
        Ok(Self {
            items: VecDeque::new(),
            capacity,
            policy,
        })
    }

    /// Inserts one item and returns the evicted item, if any.
    pub fn insert(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            match self.policy {
                EvictionPolicy::MostRecentFirst => self.items.pop_back(),
                EvictionPolicy::OldestEvicted => self.items.pop_front(),
            }
        } else {
            None
        };
        match self.policy {
            EvictionPolicy::MostRecentFirst => self.items.push_front(item),
            EvictionPolicy::OldestEvicted => self.items.push_back(item),
        }
        if evicted.is_some() {
            debug!(
                "event=gallery_evict module=gallery status=ok policy={} capacity={}",
                self.policy.as_str(),
                self.capacity
            );
        }
        evicted
    }

    /// Returns the most recently inserted item.
    pub fn head(&self) -> Option<&T> {
        match self.policy {
            EvictionPolicy::MostRecentFirst => self.items.front(),
            EvictionPolicy::OldestEvicted => self.items.back(),
        }
    }

    /// Alias of [`BoundedGallery::head`].
    pub fn most_recent(&self) -> Option<&T> {
        self.head()
    }

    /// Iterates items in gallery order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }
}

impl<T: Clone> BoundedGallery<T> {
    /// Returns a snapshot of the current ordered sequence.
    pub fn all(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }

    /// Returns the first `count` items in gallery order.
    pub fn take_front(&self, count: usize) -> Vec<T> {
        self.items.iter().take(count).cloned().collect()
    }
}
