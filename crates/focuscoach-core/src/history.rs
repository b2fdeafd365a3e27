//! Bounded, oldest-first-evicting history buffers.

/// Keeps the most recent `capacity` items in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingBuffer<T> {
    capacity: usize,
    items: Vec<T>,
}

impl<T> RollingBuffer<T> {
    /// A zero capacity is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: Vec::with_capacity(capacity + 1),
        }
    }

    /// Append an item, then drop the oldest items beyond capacity.
    /// Returns how many items were dropped.
    pub fn push(&mut self, item: T) -> usize {
        self.items.push(item);
        let excess = self.items.len().saturating_sub(self.capacity);
        if excess > 0 {
            self.items.drain(..excess);
        }
        excess
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest first.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Extend<T> for RollingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}
