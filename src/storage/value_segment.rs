// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

use std::mem;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::types::ColumnType;

/// An append-only dense vector of one column's values.
///
/// This is the segment type every chunk starts with. The values live behind
/// a `RwLock` so the table's append path can extend the segment while
/// readers hold a shared chunk handle; a full chunk is never appended to
/// again, so its readers never contend.
#[derive(Debug, Default)]
pub struct ValueSegment<T: ColumnType> {
    values: RwLock<Vec<T>>,
}

impl<T: ColumnType> ValueSegment<T> {
    pub fn new() -> Self {
        ValueSegment {
            values: RwLock::new(Vec::new()),
        }
    }

    /// Appends a value to the back of the segment.
    pub fn push(&self, value: T) {
        self.values.write().push(value);
    }

    /// Returns the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> T {
        self.values.read()[index].clone()
    }

    /// Locks the segment for reading and exposes the backing values.
    ///
    /// Scans use this to iterate the raw slice instead of paying one lock
    /// acquisition per element.
    pub fn values(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.values.read()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Estimated memory footprint: capacity times element size.
    pub fn estimated_size(&self) -> usize {
        self.values.read().capacity() * mem::size_of::<T>()
    }
}

impl<T: ColumnType> FromIterator<T> for ValueSegment<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ValueSegment {
            values: RwLock::new(iter.into_iter().collect()),
        }
    }
}
