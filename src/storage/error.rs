// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

use thiserror::Error;

use crate::types::{ChunkId, DataType};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("columns can only be added to an empty table")]
    TableNotEmpty,
    #[error("chunk {0} has {1} of {2} rows and cannot be compressed")]
    ChunkNotFull(ChunkId, usize, usize),
    #[error("row has {0} values but the chunk has {1} columns")]
    ArityMismatch(usize, usize),
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: DataType,
        actual: DataType,
    },
    #[error("{0} segments are immutable")]
    SegmentImmutable(&'static str),
    #[error("{0} segments cannot be dictionary-compressed")]
    Uncompressible(&'static str),
    #[error("dictionary with {0} distinct values exceeds the 32-bit code space")]
    DictionaryTooLarge(usize),
    #[error("column not found: {0}")]
    ColumnNotFound(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
