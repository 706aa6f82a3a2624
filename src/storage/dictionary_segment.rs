// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

use std::mem;

use super::attribute_vector::AttributeVector;
use super::error::StorageResult;
use super::value_segment::ValueSegment;
use crate::types::{ColumnType, ValueId, INVALID_VALUE_ID};

/// A dictionary-compressed column segment.
///
/// Holds the distinct values of the source segment in sorted order plus an
/// attribute vector whose entry `i` is the dictionary position of the
/// source's `i`-th value, packed to the smallest width that can encode the
/// dictionary. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionarySegment<T: ColumnType> {
    dictionary: Vec<T>,
    attribute_vector: AttributeVector,
}

impl<T: ColumnType> DictionarySegment<T> {
    /// Compresses a value segment.
    ///
    /// Fails with [`StorageError::DictionaryTooLarge`] if the segment holds
    /// more than `2^32` distinct values.
    ///
    /// [`StorageError::DictionaryTooLarge`]: super::StorageError::DictionaryTooLarge
    pub fn from_value_segment(segment: &ValueSegment<T>) -> StorageResult<Self> {
        let values = segment.values();

        let mut dictionary: Vec<T> = values.clone();
        dictionary.sort_unstable();
        dictionary.dedup();
        dictionary.shrink_to_fit();

        let mut attribute_vector =
            AttributeVector::for_dictionary_size(dictionary.len(), values.len())?;
        for (index, value) in values.iter().enumerate() {
            // every source value was copied into the dictionary above
            let Ok(code) = dictionary.binary_search(value) else {
                unreachable!()
            };
            attribute_vector.set(index, ValueId(code as u32));
        }

        Ok(DictionarySegment {
            dictionary,
            attribute_vector,
        })
    }

    /// Position of the first dictionary entry `>= value`, or
    /// [`INVALID_VALUE_ID`] if every entry is smaller.
    pub fn lower_bound(&self, value: &T) -> ValueId {
        let index = self.dictionary.partition_point(|entry| entry < value);
        if index == self.dictionary.len() {
            INVALID_VALUE_ID
        } else {
            ValueId(index as u32)
        }
    }

    /// Position of the first dictionary entry `> value`, or
    /// [`INVALID_VALUE_ID`] if every entry is smaller or equal.
    pub fn upper_bound(&self, value: &T) -> ValueId {
        let index = self.dictionary.partition_point(|entry| entry <= value);
        if index == self.dictionary.len() {
            INVALID_VALUE_ID
        } else {
            ValueId(index as u32)
        }
    }

    /// Decodes a dictionary code back into its value.
    ///
    /// # Panics
    ///
    /// Panics if `value_id` is not a valid dictionary position.
    pub fn value_of(&self, value_id: ValueId) -> T {
        self.dictionary[value_id.as_usize()].clone()
    }

    /// Returns the decoded value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> T {
        self.value_of(self.attribute_vector.get(index))
    }

    pub fn unique_values_count(&self) -> usize {
        self.dictionary.len()
    }

    pub fn len(&self) -> usize {
        self.attribute_vector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attribute_vector.is_empty()
    }

    pub fn dictionary(&self) -> &[T] {
        &self.dictionary
    }

    pub fn attribute_vector(&self) -> &AttributeVector {
        &self.attribute_vector
    }

    /// Estimated memory footprint: dictionary payload plus packed codes.
    pub fn estimated_size(&self) -> usize {
        self.dictionary.len() * mem::size_of::<T>() + self.len() * self.attribute_vector.width()
    }
}
