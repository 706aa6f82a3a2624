// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

//! The closed sum over all segment shapes and element types.

use std::sync::Arc;

use super::dictionary_segment::DictionarySegment;
use super::error::{StorageError, StorageResult};
use super::reference_segment::ReferenceSegment;
use super::value_segment::ValueSegment;
use crate::for_all_variants;
use crate::types::{DataType, DataValue};

/// Embeds the value segments of all element types.
#[derive(Debug)]
pub enum ValueSegmentImpl {
    Int32(ValueSegment<i32>),
    Int64(ValueSegment<i64>),
    Float32(ValueSegment<crate::types::F32>),
    Float64(ValueSegment<crate::types::F64>),
    Utf8(ValueSegment<String>),
}

/// Embeds the dictionary segments of all element types.
#[derive(Debug, Clone)]
pub enum DictionarySegmentImpl {
    Int32(DictionarySegment<i32>),
    Int64(DictionarySegment<i64>),
    Float32(DictionarySegment<crate::types::F32>),
    Float64(DictionarySegment<crate::types::F64>),
    Utf8(DictionarySegment<String>),
}

/// The per-column payload of a chunk.
#[derive(Debug)]
pub enum SegmentImpl {
    Value(ValueSegmentImpl),
    Dictionary(DictionarySegmentImpl),
    Reference(ReferenceSegment),
}

pub type SegmentRef = Arc<SegmentImpl>;

/// Implement the type-dispatched operations on the segment enums.
macro_rules! impl_segment_dispatch {
    ($( { $Abc:ident, $Type:ty, $Value:ident } ),*) => {
        impl ValueSegmentImpl {
            /// Create an empty value segment of the given element type.
            pub fn new(data_type: DataType) -> Self {
                match data_type {
                    $(DataType::$Value => Self::$Abc(ValueSegment::new()),)*
                }
            }

            pub fn get(&self, index: usize) -> DataValue {
                match self {
                    $(Self::$Abc(segment) => DataValue::$Value(segment.get(index)),)*
                }
            }

            /// Appends an element to the back of the segment.
            pub fn push(&self, value: &DataValue) -> StorageResult<()> {
                match (self, value) {
                    $(
                        (Self::$Abc(segment), DataValue::$Value(value)) => {
                            segment.push(value.clone());
                            Ok(())
                        }
                    )*
                    _ => Err(StorageError::TypeMismatch {
                        expected: self.data_type(),
                        actual: value.data_type(),
                    }),
                }
            }

            pub fn len(&self) -> usize {
                match self {
                    $(Self::$Abc(segment) => segment.len(),)*
                }
            }

            pub fn data_type(&self) -> DataType {
                match self {
                    $(Self::$Abc(_) => DataType::$Value,)*
                }
            }

            pub fn estimated_size(&self) -> usize {
                match self {
                    $(Self::$Abc(segment) => segment.estimated_size(),)*
                }
            }

            /// Builds the dictionary-compressed form of this segment.
            pub fn compress(&self) -> StorageResult<DictionarySegmentImpl> {
                match self {
                    $(
                        Self::$Abc(segment) => Ok(DictionarySegmentImpl::$Abc(
                            DictionarySegment::from_value_segment(segment)?,
                        )),
                    )*
                }
            }
        }

        impl DictionarySegmentImpl {
            pub fn get(&self, index: usize) -> DataValue {
                match self {
                    $(Self::$Abc(segment) => DataValue::$Value(segment.get(index)),)*
                }
            }

            pub fn len(&self) -> usize {
                match self {
                    $(Self::$Abc(segment) => segment.len(),)*
                }
            }

            pub fn data_type(&self) -> DataType {
                match self {
                    $(Self::$Abc(_) => DataType::$Value,)*
                }
            }

            pub fn unique_values_count(&self) -> usize {
                match self {
                    $(Self::$Abc(segment) => segment.unique_values_count(),)*
                }
            }

            pub fn estimated_size(&self) -> usize {
                match self {
                    $(Self::$Abc(segment) => segment.estimated_size(),)*
                }
            }
        }
    };
}

for_all_variants! { impl_segment_dispatch }

impl SegmentImpl {
    /// Returns the value at `index`, decoded or resolved as needed.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> DataValue {
        match self {
            Self::Value(segment) => segment.get(index),
            Self::Dictionary(segment) => segment.get(index),
            Self::Reference(segment) => segment.get(index),
        }
    }

    /// Appends an element to the back of the segment.
    ///
    /// Only value segments are mutable; appending to a dictionary or
    /// reference segment fails.
    pub fn append(&self, value: &DataValue) -> StorageResult<()> {
        match self {
            Self::Value(segment) => segment.push(value),
            Self::Dictionary(_) | Self::Reference(_) => {
                Err(StorageError::SegmentImmutable(self.kind()))
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Value(segment) => segment.len(),
            Self::Dictionary(segment) => segment.len(),
            Self::Reference(segment) => segment.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Self::Value(segment) => segment.data_type(),
            Self::Dictionary(segment) => segment.data_type(),
            Self::Reference(segment) => segment
                .referenced_table()
                .column_type(segment.referenced_column_id()),
        }
    }

    /// Builds the dictionary-compressed form of this segment.
    pub fn compress(&self) -> StorageResult<SegmentImpl> {
        match self {
            Self::Value(segment) => Ok(Self::Dictionary(segment.compress()?)),
            Self::Dictionary(segment) => Ok(Self::Dictionary(segment.clone())),
            Self::Reference(_) => Err(StorageError::Uncompressible(self.kind())),
        }
    }

    pub fn estimated_size(&self) -> usize {
        match self {
            Self::Value(segment) => segment.estimated_size(),
            Self::Dictionary(segment) => segment.estimated_size(),
            Self::Reference(segment) => segment.estimated_size(),
        }
    }

    pub fn as_reference(&self) -> Option<&ReferenceSegment> {
        match self {
            Self::Reference(segment) => Some(segment),
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Dictionary(_) => "dictionary",
            Self::Reference(_) => "reference",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_type_checked() {
        let segment = ValueSegmentImpl::new(DataType::Int32);
        segment.push(&DataValue::Int32(1)).unwrap();
        assert_eq!(
            segment.push(&DataValue::Int64(1)),
            Err(StorageError::TypeMismatch {
                expected: DataType::Int32,
                actual: DataType::Int64,
            })
        );
        assert_eq!(segment.len(), 1);
        assert_eq!(segment.get(0), DataValue::Int32(1));
    }

    #[test]
    fn test_compressed_segments_reject_append() {
        let value_segment = ValueSegmentImpl::new(DataType::String);
        value_segment
            .push(&DataValue::String("Hasso".into()))
            .unwrap();
        let segment = SegmentImpl::Dictionary(value_segment.compress().unwrap());
        assert_eq!(
            segment.append(&DataValue::String("Bill".into())),
            Err(StorageError::SegmentImmutable("dictionary"))
        );
        assert_eq!(segment.get(0), DataValue::String("Hasso".into()));
    }
}
