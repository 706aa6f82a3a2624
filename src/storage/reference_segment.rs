// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

use std::mem;
use std::sync::Arc;

use super::table::TableRef;
use crate::types::{ColumnId, DataValue, PosList};

/// A materialization-free view of one column of a base table.
///
/// Holds a shared handle to the referenced table, a column within it, and a
/// shared position list; indexed access resolves through the position list
/// into the physical segments. Immutable.
#[derive(Debug, Clone)]
pub struct ReferenceSegment {
    table: TableRef,
    column_id: ColumnId,
    pos_list: Arc<PosList>,
}

impl ReferenceSegment {
    pub fn new(table: TableRef, column_id: ColumnId, pos_list: Arc<PosList>) -> Self {
        ReferenceSegment {
            table,
            column_id,
            pos_list,
        }
    }

    /// Resolves the `index`-th referenced row to its value.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> DataValue {
        let row = self.pos_list[index];
        self.table
            .get_chunk(row.chunk_id)
            .get_segment(self.column_id)
            .get(row.chunk_offset.as_usize())
    }

    pub fn len(&self) -> usize {
        self.pos_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos_list.is_empty()
    }

    pub fn referenced_table(&self) -> &TableRef {
        &self.table
    }

    pub fn referenced_column_id(&self) -> ColumnId {
        self.column_id
    }

    pub fn pos_list(&self) -> &Arc<PosList> {
        &self.pos_list
    }

    /// A reference segment owns no values; only the handles count.
    pub fn estimated_size(&self) -> usize {
        mem::size_of::<TableRef>() + mem::size_of::<ColumnId>() + mem::size_of::<Arc<PosList>>()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::Table;
    use crate::types::{ChunkId, ChunkOffset, DataType, RowId};

    #[test]
    fn test_resolves_through_pos_list() {
        let table = Arc::new(Table::new(2));
        table.add_column("a", DataType::Int32).unwrap();
        for value in [10, 11, 12, 13] {
            table.append(vec![DataValue::Int32(value)]).unwrap();
        }

        let pos_list = Arc::new(vec![
            RowId::new(ChunkId(1), ChunkOffset(1)),
            RowId::new(ChunkId(0), ChunkOffset(0)),
        ]);
        let segment = ReferenceSegment::new(table, ColumnId(0), pos_list);

        assert_eq!(segment.len(), 2);
        assert_eq!(segment.get(0), DataValue::Int32(13));
        assert_eq!(segment.get(1), DataValue::Int32(10));
    }
}
