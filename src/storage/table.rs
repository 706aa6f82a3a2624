// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

use std::sync::Arc;

use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::{debug, trace};

use super::chunk::{Chunk, ChunkRef};
use super::error::{StorageError, StorageResult};
use super::segment::{SegmentImpl, SegmentRef, ValueSegmentImpl};
use crate::types::{ChunkId, ColumnId, DataType, Row};

/// Chunk size used when the embedder does not specify one.
pub const DEFAULT_TARGET_CHUNK_SIZE: usize = 65_535;

/// A columnar table: an ordered list of chunks plus the column schema.
///
/// All chunks before the last are full (`target_chunk_size` rows); the last
/// chunk may be partial. The chunk list and the schema are guarded by a
/// single structural mutex; chunk handles obtained from [`get_chunk`] are
/// read without any locking.
///
/// [`get_chunk`]: Table::get_chunk
pub struct Table {
    target_chunk_size: usize,
    inner: Mutex<TableInner>,
}

#[derive(Default)]
struct TableInner {
    chunks: Vec<ChunkRef>,
    column_names: Vec<String>,
    column_types: Vec<DataType>,
}

pub type TableRef = Arc<Table>;

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Table")
            .field("columns", &inner.column_names)
            .field("rows", &inner.row_count())
            .field("chunks", &inner.chunks.len())
            .finish()
    }
}

impl TableInner {
    fn row_count(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.len()).sum()
    }

    fn build_chunk(&self) -> Chunk {
        let mut chunk = Chunk::new();
        for data_type in &self.column_types {
            chunk.add_segment(Arc::new(SegmentImpl::Value(ValueSegmentImpl::new(
                *data_type,
            ))));
        }
        chunk
    }
}

impl Default for Table {
    fn default() -> Self {
        Table::new(DEFAULT_TARGET_CHUNK_SIZE)
    }
}

impl Table {
    /// Creates an empty table with one empty chunk. The target chunk size is
    /// fixed for the lifetime of the table.
    ///
    /// # Panics
    ///
    /// Panics if `target_chunk_size` is zero.
    pub fn new(target_chunk_size: usize) -> Table {
        assert!(target_chunk_size > 0, "target chunk size must be positive");
        Table {
            target_chunk_size,
            inner: Mutex::new(TableInner {
                chunks: vec![Arc::new(Chunk::new())],
                ..TableInner::default()
            }),
        }
    }

    /// Used by operators to wrap a prebuilt single-chunk view sharing a base
    /// table's schema.
    pub(crate) fn with_single_chunk(
        column_names: Vec<String>,
        column_types: Vec<DataType>,
        target_chunk_size: usize,
        chunk: Chunk,
    ) -> Table {
        Table {
            target_chunk_size,
            inner: Mutex::new(TableInner {
                chunks: vec![Arc::new(chunk)],
                column_names,
                column_types,
            }),
        }
    }

    /// Registers a column and adds a matching empty value segment to the
    /// single existing chunk. Fails once the table holds any row.
    pub fn add_column(&self, name: impl Into<String>, data_type: DataType) -> StorageResult<()> {
        let mut inner = self.inner.lock();
        if inner.row_count() != 0 {
            return Err(StorageError::TableNotEmpty);
        }
        let name = name.into();
        debug!(column = %name, %data_type, "add column");
        inner.column_names.push(name);
        inner.column_types.push(data_type);
        let chunk = inner.build_chunk();
        *inner.chunks.last_mut().unwrap() = Arc::new(chunk);
        Ok(())
    }

    /// Appends one row, rolling over to a fresh chunk when the last one is
    /// full.
    ///
    /// A rejected row leaves the chunk list untouched; the rollover chunk is
    /// only published once the row has landed in it.
    pub fn append(&self, row: Row) -> StorageResult<()> {
        let mut inner = self.inner.lock();
        if inner.chunks.last().unwrap().len() >= self.target_chunk_size {
            trace!(chunk_id = inner.chunks.len(), "chunk full, rolling over");
            let chunk = inner.build_chunk();
            chunk.append(&row)?;
            inner.chunks.push(Arc::new(chunk));
            return Ok(());
        }
        inner.chunks.last().unwrap().append(&row)
    }

    /// Materializes one fresh chunk matching the declared column types.
    pub fn create_new_chunk(&self) {
        let mut inner = self.inner.lock();
        let chunk = inner.build_chunk();
        inner.chunks.push(Arc::new(chunk));
    }

    /// Replaces the chunk at `chunk_id` with its dictionary-compressed form.
    ///
    /// Only full chunks can be compressed. The per-column dictionary
    /// segments are built in parallel outside the structural lock; the
    /// finished chunk is swapped in under it. Readers holding the old chunk
    /// handle keep a consistent uncompressed snapshot.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_id` is out of range.
    pub fn compress_chunk(&self, chunk_id: ChunkId) -> StorageResult<()> {
        let chunk = self.get_chunk(chunk_id);
        if chunk.len() != self.target_chunk_size {
            return Err(StorageError::ChunkNotFull(
                chunk_id,
                chunk.len(),
                self.target_chunk_size,
            ));
        }

        let segments = (0..chunk.column_count())
            .into_par_iter()
            .map(|index| {
                let segment = chunk.get_segment(ColumnId(index as u32));
                segment.compress().map(Arc::new)
            })
            .collect::<StorageResult<Vec<SegmentRef>>>()?;

        let mut compressed = Chunk::new();
        for segment in segments {
            compressed.add_segment(segment);
        }
        debug!(%chunk_id, rows = compressed.len(), "compressed chunk");

        let mut inner = self.inner.lock();
        inner.chunks[chunk_id.as_usize()] = Arc::new(compressed);
        Ok(())
    }

    pub fn column_count(&self) -> usize {
        self.inner.lock().column_names.len()
    }

    /// Total number of rows across all chunks.
    pub fn row_count(&self) -> usize {
        self.inner.lock().row_count()
    }

    pub fn chunk_count(&self) -> usize {
        self.inner.lock().chunks.len()
    }

    /// Resolves a column name to its id.
    pub fn column_id_by_name(&self, name: &str) -> StorageResult<ColumnId> {
        let inner = self.inner.lock();
        inner
            .column_names
            .iter()
            .position(|column| column == name)
            .map(|index| ColumnId(index as u32))
            .ok_or_else(|| StorageError::ColumnNotFound(name.into()))
    }

    /// # Panics
    ///
    /// Panics if `column_id` is out of range.
    pub fn column_name(&self, column_id: ColumnId) -> String {
        self.inner.lock().column_names[column_id.as_usize()].clone()
    }

    /// # Panics
    ///
    /// Panics if `column_id` is out of range.
    pub fn column_type(&self, column_id: ColumnId) -> DataType {
        self.inner.lock().column_types[column_id.as_usize()]
    }

    pub fn column_names(&self) -> Vec<String> {
        self.inner.lock().column_names.clone()
    }

    pub fn column_types(&self) -> Vec<DataType> {
        self.inner.lock().column_types.clone()
    }

    /// Returns a shared handle to the chunk at `chunk_id`.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_id` is out of range.
    pub fn get_chunk(&self, chunk_id: ChunkId) -> ChunkRef {
        self.inner.lock().chunks[chunk_id.as_usize()].clone()
    }

    pub fn target_chunk_size(&self) -> usize {
        self.target_chunk_size
    }

    /// Estimated memory footprint of all segments.
    pub fn estimated_size(&self) -> usize {
        let chunks = self.inner.lock().chunks.clone();
        chunks
            .iter()
            .flat_map(|chunk| {
                (0..chunk.column_count())
                    .map(move |index| chunk.get_segment(ColumnId(index as u32)).estimated_size())
            })
            .sum()
    }
}
