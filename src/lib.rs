// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

//! Granite is a teaching-grade columnar in-memory storage engine.
//!
//! Tables are stored column-wise and partitioned into fixed-size chunks.
//! Each column of a chunk is a segment: a plain value vector, a
//! dictionary-compressed pair of (sorted unique values, bit-packed codes),
//! or a reference view produced by an operator. The filter operator scans a
//! column and materializes nothing but a position list over the base table,
//! so chained operators stay cheap.
//!
//! ```
//! use std::sync::Arc;
//!
//! use granite::operator::{Operator, ScanType, TableScan, TableWrapper};
//! use granite::storage::Table;
//! use granite::types::{ChunkId, ColumnId, DataType, DataValue};
//!
//! let table = Arc::new(Table::new(4));
//! table.add_column("x", DataType::Int32).unwrap();
//! for value in [1, 2, 3, 4, 5] {
//!     table.append(vec![DataValue::Int32(value)]).unwrap();
//! }
//! table.compress_chunk(ChunkId(0)).unwrap();
//!
//! let mut scan = TableScan::new(
//!     Box::new(TableWrapper::new(table)),
//!     ColumnId(0),
//!     ScanType::GreaterThan,
//!     DataValue::Int32(2),
//! );
//! scan.execute().unwrap();
//! assert_eq!(scan.get_output().row_count(), 3);
//! ```

#![deny(unused_must_use)]

pub mod catalog;
pub mod operator;
pub mod storage;
pub mod types;
