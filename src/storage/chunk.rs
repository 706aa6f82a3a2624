// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

use std::sync::Arc;

use smallvec::SmallVec;

use super::error::{StorageError, StorageResult};
use super::segment::{SegmentImpl, SegmentRef};
use crate::types::{ColumnId, DataValue};

/// A horizontal partition of a table: one segment per column, all reporting
/// the same number of rows.
#[derive(Debug, Default)]
pub struct Chunk {
    segments: SmallVec<[SegmentRef; 16]>,
}

pub type ChunkRef = Arc<Chunk>;

impl Chunk {
    pub fn new() -> Self {
        Chunk::default()
    }

    /// Appends a segment. Only used while assembling a chunk, before it is
    /// shared.
    pub fn add_segment(&mut self, segment: SegmentRef) {
        self.segments.push(segment);
    }

    /// Appends one row, dispatching each value to its column's segment.
    ///
    /// The row is validated against every segment up front, so a rejected
    /// append leaves all segments at their previous size.
    pub fn append(&self, row: &[DataValue]) -> StorageResult<()> {
        if row.len() != self.segments.len() {
            return Err(StorageError::ArityMismatch(row.len(), self.segments.len()));
        }
        for (value, segment) in row.iter().zip(&self.segments) {
            if !matches!(&**segment, SegmentImpl::Value(_)) {
                return Err(StorageError::SegmentImmutable(segment.kind()));
            }
            let expected = segment.data_type();
            if value.data_type() != expected {
                return Err(StorageError::TypeMismatch {
                    expected,
                    actual: value.data_type(),
                });
            }
        }
        for (value, segment) in row.iter().zip(&self.segments) {
            segment.append(value)?;
        }
        Ok(())
    }

    /// Returns the segment of the given column.
    ///
    /// # Panics
    ///
    /// Panics if `column_id` is out of range.
    pub fn get_segment(&self, column_id: ColumnId) -> SegmentRef {
        self.segments[column_id.as_usize()].clone()
    }

    pub fn column_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of rows: the size of the first segment, or zero for a chunk
    /// with no columns.
    pub fn len(&self) -> usize {
        self.segments.first().map_or(0, |segment| segment.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ValueSegmentImpl;
    use crate::types::DataType;

    fn two_column_chunk() -> Chunk {
        let mut chunk = Chunk::new();
        chunk.add_segment(Arc::new(SegmentImpl::Value(ValueSegmentImpl::new(
            DataType::Int32,
        ))));
        chunk.add_segment(Arc::new(SegmentImpl::Value(ValueSegmentImpl::new(
            DataType::String,
        ))));
        chunk
    }

    #[test]
    fn test_append_row() {
        let chunk = two_column_chunk();
        chunk
            .append(&[DataValue::Int32(3), DataValue::String("three".into())])
            .unwrap();
        assert_eq!(chunk.len(), 1);
        assert_eq!(chunk.get_segment(ColumnId(1)).get(0), DataValue::String("three".into()));
    }

    #[test]
    fn test_append_arity_checked() {
        let chunk = two_column_chunk();
        assert_eq!(
            chunk.append(&[DataValue::Int32(3)]),
            Err(StorageError::ArityMismatch(1, 2))
        );
    }

    #[test]
    fn test_rejected_append_leaves_sizes_intact() {
        let chunk = two_column_chunk();
        let result = chunk.append(&[DataValue::Int32(3), DataValue::Int32(4)]);
        assert_eq!(
            result,
            Err(StorageError::TypeMismatch {
                expected: DataType::String,
                actual: DataType::Int32,
            })
        );
        assert_eq!(chunk.len(), 0);
        assert_eq!(chunk.get_segment(ColumnId(0)).len(), 0);
    }

    #[test]
    fn test_empty_chunk_has_no_rows() {
        assert_eq!(Chunk::new().len(), 0);
    }
}
