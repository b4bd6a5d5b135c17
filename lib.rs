use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

/// Errors reported by [`CircularBuffer`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid capacity {capacity}: a circular buffer needs at least one slot")]
    InvalidCapacity { capacity: usize },

    #[error("circular buffer holds no items")]
    EmptyBuffer,
}

/// A fixed-capacity circular buffer with a movable cursor.
///
/// The buffer keeps at most `capacity` items. Each [`add`](Self::add) places
/// the new item in the slot after the cursor and makes it current; once every
/// slot is filled, adding overwrites whatever sits after the cursor and the
/// item count stops growing.
///
/// ```text
///   capacity = 3, add a, b, c, d
///
///   items = [d, b, c]
///   head  = 0          (d is current)
///   count = 3          (full, stays full)
/// ```
///
/// [`prev`](Self::prev) and [`next`](Self::next) move the cursor one step
/// and wrap at `count`, so before the buffer is full they only cycle through
/// the items added so far.
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    // Allocated with exactly `capacity` slots; `items[..len]` are all live.
    items: Vec<T>,
    capacity: usize,
    head: usize,
}

impl<T> CircularBuffer<T> {
    /// Creates a buffer of `capacity` slots seeded with `initial` as the
    /// current item.
    pub fn new(initial: T, capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity { capacity });
        }
        debug!(capacity, "creating circular buffer");

        let mut buffer = Self {
            items: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        };
        buffer.add(initial);
        Ok(buffer)
    }

    /// Adds `item` after the cursor and makes it the current item.
    pub fn add(&mut self, item: T) {
        let count = self.items.len();
        if count > 0 {
            self.head = (self.head + 1) % self.capacity;
        }

        if self.head == count {
            self.items.push(item);
            trace!(slot = self.head, count = self.items.len(), "item added");
            if self.items.len() == self.capacity {
                debug!(capacity = self.capacity, "circular buffer is full");
            }
        } else {
            self.items[self.head] = item;
            trace!(slot = self.head, count, "item overwritten");
        }
    }

    /// Moves the cursor back one item, wrapping to the last filled slot, and
    /// returns the new current item.
    pub fn prev(&mut self) -> Result<&T, Error> {
        let count = self.items.len();
        if count == 0 {
            return Err(Error::EmptyBuffer);
        }
        self.head = if self.head == 0 { count - 1 } else { self.head - 1 };
        trace!(head = self.head, "cursor moved back");
        self.cur()
    }

    /// Moves the cursor forward one item, wrapping to slot 0 after the last
    /// filled slot, and returns the new current item.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&T, Error> {
        let count = self.items.len();
        if count == 0 {
            return Err(Error::EmptyBuffer);
        }
        self.head = if self.head == count - 1 { 0 } else { self.head + 1 };
        trace!(head = self.head, "cursor moved forward");
        self.cur()
    }

    /// Returns the current item without moving the cursor.
    pub fn cur(&self) -> Result<&T, Error> {
        self.items.get(self.head).ok_or(Error::EmptyBuffer)
    }

    /// Returns the fixed capacity, not the number of stored items.
    pub fn size(&self) -> usize {
        self.capacity
    }

    /// Returns the number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the cursor position.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns true when no items are stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true when at least one item is stored; the inverse of
    /// [`is_empty`](Self::is_empty).
    pub fn has_items(&self) -> bool {
        !self.is_empty()
    }

    /// Returns true once every slot has been filled.
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.capacity > 0);
        assert!(self.items.capacity() >= self.capacity);
        assert!(self.items.len() <= self.capacity);
        if self.items.is_empty() {
            assert_eq!(self.head, 0);
        } else {
            assert!(self.head < self.items.len());
        }
    }
}

impl<T: fmt::Display> fmt::Display for CircularBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CircularBuffer")?;
        write!(f, "\n\tBUF_SIZE = {}", self.capacity)?;
        write!(f, "\n\tcount = {}", self.items.len())?;
        write!(f, "\n\thead  = {}", self.head)?;
        for (i, item) in self.items.iter().enumerate() {
            write!(f, "\n\tdata[{}] = {}", i + 1, item)?;
        }
        writeln!(f)
    }
}
