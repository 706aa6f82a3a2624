// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

//! Bit-packed code vectors for dictionary segments.

use std::mem;

use super::error::{StorageError, StorageResult};
use crate::types::ValueId;

/// A backing integer for a [`FixedWidthVector`].
pub trait CodeInt: Copy + TryFrom<u32> + Into<u32> + Send + Sync + 'static {}

impl CodeInt for u8 {}
impl CodeInt for u16 {}
impl CodeInt for u32 {}

/// A sequence of codes stored at a fixed width per element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedWidthVector<T: CodeInt> {
    codes: Vec<T>,
}

impl<T: CodeInt> FixedWidthVector<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        FixedWidthVector {
            codes: Vec::with_capacity(capacity),
        }
    }

    /// Returns the code at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> ValueId {
        ValueId(self.codes[index].into())
    }

    /// Writes `code` at `index`. Writing at `len` extends the vector by one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the end, or if `code` does not fit the
    /// backing width.
    pub fn set(&mut self, index: usize, code: ValueId) {
        assert!(
            index <= self.codes.len(),
            "index {index} is past the end of the attribute vector ({} codes)",
            self.codes.len()
        );
        let Ok(code) = T::try_from(code.0) else {
            panic!("code {code} does not fit into {} bytes", mem::size_of::<T>())
        };
        if index == self.codes.len() {
            self.codes.push(code);
        } else {
            self.codes[index] = code;
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Width of a single code in bytes.
    pub fn width(&self) -> usize {
        mem::size_of::<T>()
    }
}

/// The three attribute-vector widths, keyed by the backing integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeVector {
    Width8(FixedWidthVector<u8>),
    Width16(FixedWidthVector<u16>),
    Width32(FixedWidthVector<u32>),
}

impl AttributeVector {
    /// Selects the smallest width able to encode `unique_values` distinct
    /// codes, with room for `capacity` entries.
    pub fn for_dictionary_size(unique_values: usize, capacity: usize) -> StorageResult<Self> {
        Ok(if unique_values <= 1 << 8 {
            Self::Width8(FixedWidthVector::with_capacity(capacity))
        } else if unique_values <= 1 << 16 {
            Self::Width16(FixedWidthVector::with_capacity(capacity))
        } else if unique_values as u64 <= 1 << 32 {
            Self::Width32(FixedWidthVector::with_capacity(capacity))
        } else {
            return Err(StorageError::DictionaryTooLarge(unique_values));
        })
    }

    /// Returns the code at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> ValueId {
        match self {
            Self::Width8(vector) => vector.get(index),
            Self::Width16(vector) => vector.get(index),
            Self::Width32(vector) => vector.get(index),
        }
    }

    /// Writes `code` at `index`. Writing at `len` extends the vector by one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the end, or if `code` does not fit the width.
    pub fn set(&mut self, index: usize, code: ValueId) {
        match self {
            Self::Width8(vector) => vector.set(index, code),
            Self::Width16(vector) => vector.set(index, code),
            Self::Width32(vector) => vector.set(index, code),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Width8(vector) => vector.len(),
            Self::Width16(vector) => vector.len(),
            Self::Width32(vector) => vector.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of a single code in bytes.
    pub fn width(&self) -> usize {
        match self {
            Self::Width8(vector) => vector.width(),
            Self::Width16(vector) => vector.width(),
            Self::Width32(vector) => vector.width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_extends_and_overwrites() {
        let mut vector = FixedWidthVector::<u8>::with_capacity(4);

        vector.set(0, ValueId(1));
        vector.set(1, ValueId(2));
        vector.set(2, ValueId(1));
        vector.set(1, ValueId(3));

        assert_eq!(vector.len(), 3);
        assert_eq!(vector.get(1), ValueId(3));
        assert_eq!(vector.width(), 1);
    }

    #[test]
    #[should_panic(expected = "past the end")]
    fn test_set_past_end() {
        let mut vector = FixedWidthVector::<u8>::with_capacity(0);
        vector.set(1, ValueId(0));
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn test_set_code_too_wide() {
        let mut vector = FixedWidthVector::<u8>::with_capacity(1);
        vector.set(0, ValueId(256));
    }

    #[test]
    fn test_width_selection() {
        assert_eq!(
            AttributeVector::for_dictionary_size(1 << 8, 0).unwrap().width(),
            1
        );
        assert_eq!(
            AttributeVector::for_dictionary_size((1 << 8) + 1, 0)
                .unwrap()
                .width(),
            2
        );
        assert_eq!(
            AttributeVector::for_dictionary_size((1 << 16) + 1, 0)
                .unwrap()
                .width(),
            4
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_range() {
        let vector = FixedWidthVector::<u16>::with_capacity(0);
        vector.get(0);
    }
}
