// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

//! The relational operator framework.
//!
//! An operator is a dataflow node with up to two input operators and a
//! lazily computed, cached output table. Execution is a caller-driven tree
//! walk: leaves are executed first, each node reads its inputs' outputs
//! through [`Operator::get_output`]. Every intermediate result is a
//! single-chunk table of reference segments viewing a base table, so
//! operators compose without copying values.

use thiserror::Error;

use crate::storage::{StorageError, TableRef};
use crate::types::{ChunkId, ConvertError};

mod table_scan;
mod table_wrapper;

pub use self::table_scan::{ScanType, TableScan};
pub use self::table_wrapper::TableWrapper;

/// The error type of operator execution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperatorError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("convert error: {0}")]
    Convert(#[from] ConvertError),
}

/// A dataflow node with a cached output table.
pub trait Operator {
    /// Computes the node's output. Calling this a second time is a
    /// programming error and panics.
    fn execute(&mut self) -> Result<(), OperatorError>;

    /// Returns the cached output table.
    ///
    /// # Panics
    ///
    /// Panics if the node has not been executed, or if the output violates
    /// the empty-chunk rule (an empty chunk is tolerated only as the sole
    /// chunk of the output).
    fn get_output(&self) -> TableRef;
}

pub type BoxedOperator = Box<dyn Operator>;

/// The output slot shared by all operator implementations: enforces the
/// execute-once state machine and the empty-chunk rule.
#[derive(Default)]
pub(crate) struct Output(Option<TableRef>);

impl Output {
    pub fn fill(&mut self, table: TableRef) {
        assert!(self.0.is_none(), "operator was executed twice");
        self.0 = Some(table);
    }

    pub fn get(&self) -> TableRef {
        let table = self.0.as_ref().expect("operator has not been executed");
        let chunk_count = table.chunk_count();
        for index in 0..chunk_count {
            if table.get_chunk(ChunkId(index as u32)).is_empty() {
                assert_eq!(
                    chunk_count, 1,
                    "detected an empty chunk in an operator result with 2 or more chunks"
                );
            }
        }
        table.clone()
    }
}
