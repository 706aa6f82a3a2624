// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

use super::{Operator, OperatorError, Output};
use crate::storage::TableRef;

/// The leaf operator: exposes an existing base table as operator output.
pub struct TableWrapper {
    table: TableRef,
    output: Output,
}

impl TableWrapper {
    pub fn new(table: TableRef) -> Self {
        TableWrapper {
            table,
            output: Output::default(),
        }
    }
}

impl Operator for TableWrapper {
    fn execute(&mut self) -> Result<(), OperatorError> {
        self.output.fill(self.table.clone());
        Ok(())
    }

    fn get_output(&self) -> TableRef {
        self.output.get()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::Table;

    #[test]
    fn test_exposes_table() {
        let table = Arc::new(Table::default());
        let mut wrapper = TableWrapper::new(table.clone());
        wrapper.execute().unwrap();
        assert!(Arc::ptr_eq(&wrapper.get_output(), &table));
    }

    #[test]
    #[should_panic(expected = "executed twice")]
    fn test_execute_twice_panics() {
        let mut wrapper = TableWrapper::new(Arc::new(Table::default()));
        wrapper.execute().unwrap();
        let _ = wrapper.execute();
    }

    #[test]
    #[should_panic(expected = "has not been executed")]
    fn test_output_before_execute_panics() {
        TableWrapper::new(Arc::new(Table::default())).get_output();
    }
}
