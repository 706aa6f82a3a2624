// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

//! Columnar in-memory storage.
//!
//! A [`Table`] owns an ordered list of [`Chunk`]s, horizontal partitions of
//! at most `target_chunk_size` rows. Each column of a chunk is a segment:
//! a plain [`ValueSegment`] while the chunk is being filled, a
//! [`DictionarySegment`] once the chunk is full and has been compressed, or
//! a [`ReferenceSegment`] when the chunk is an operator output viewing rows
//! of another table.
//!
//! Full chunks and compressed segments are immutable; handles to them can be
//! shared freely. All structural mutation goes through the table's lock.

mod attribute_vector;
mod chunk;
mod dictionary_segment;
mod error;
mod reference_segment;
mod segment;
mod table;
mod value_segment;

pub use self::attribute_vector::{AttributeVector, FixedWidthVector};
pub use self::chunk::{Chunk, ChunkRef};
pub use self::dictionary_segment::DictionarySegment;
pub use self::error::{StorageError, StorageResult};
pub use self::reference_segment::ReferenceSegment;
pub use self::segment::{DictionarySegmentImpl, SegmentImpl, SegmentRef, ValueSegmentImpl};
pub use self::table::{Table, TableRef, DEFAULT_TARGET_CHUNK_SIZE};
pub use self::value_segment::ValueSegment;
