// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

//! The filter operator: a predicate scan producing position lists.

use std::sync::Arc;

use itertools::Itertools;
use parse_display::Display;
use tracing::debug;

use super::{BoxedOperator, Operator, OperatorError, Output};
use crate::for_all_variants;
use crate::storage::{
    Chunk, DictionarySegment, DictionarySegmentImpl, ReferenceSegment, SegmentImpl, Table,
    TableRef, ValueSegment, ValueSegmentImpl,
};
use crate::types::{
    ChunkId, ChunkOffset, ColumnId, ColumnType, DataValue, PosList, RowId, ValueId,
    INVALID_VALUE_ID,
};

/// The comparison kinds a scan supports.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ScanType {
    #[display("=")]
    Equals,
    #[display("!=")]
    NotEquals,
    #[display("<")]
    LessThan,
    #[display("<=")]
    LessThanEquals,
    #[display(">")]
    GreaterThan,
    #[display(">=")]
    GreaterThanEquals,
}

impl ScanType {
    fn matches<T: ColumnType>(self, value: &T, search: &T) -> bool {
        match self {
            Self::Equals => value.scan_eq(search),
            Self::NotEquals => !value.scan_eq(search),
            Self::LessThan => value < search,
            Self::LessThanEquals => value <= search,
            Self::GreaterThan => value > search,
            Self::GreaterThanEquals => value >= search,
        }
    }
}

/// A predicate over dictionary codes, derived once per segment from the
/// dictionary bounds of the search value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodePredicate {
    EmitNone,
    EmitAll,
    Eq(ValueId),
    Ne(ValueId),
    Lt(ValueId),
    Le(ValueId),
    Ge(ValueId),
}

impl CodePredicate {
    fn classify<T: ColumnType>(
        segment: &DictionarySegment<T>,
        search: &T,
        scan_type: ScanType,
    ) -> Self {
        let lower = segment.lower_bound(search);
        let upper = segment.upper_bound(search);
        let present = lower != INVALID_VALUE_ID && segment.value_of(lower).scan_eq(search);
        match scan_type {
            ScanType::Equals if present => Self::Eq(lower),
            ScanType::Equals => Self::EmitNone,
            ScanType::NotEquals if present => Self::Ne(lower),
            ScanType::NotEquals => Self::EmitAll,
            // every dictionary entry is smaller than the search value
            ScanType::LessThan if lower == INVALID_VALUE_ID => Self::EmitAll,
            ScanType::LessThan => Self::Lt(lower),
            ScanType::LessThanEquals if upper == INVALID_VALUE_ID => Self::EmitAll,
            ScanType::LessThanEquals if upper == ValueId(0) => Self::EmitNone,
            ScanType::LessThanEquals => Self::Le(ValueId(upper.0 - 1)),
            ScanType::GreaterThan if upper == INVALID_VALUE_ID => Self::EmitNone,
            ScanType::GreaterThan => Self::Ge(upper),
            ScanType::GreaterThanEquals if lower == INVALID_VALUE_ID => Self::EmitNone,
            ScanType::GreaterThanEquals => Self::Ge(lower),
        }
    }

    fn matches(self, code: ValueId) -> bool {
        match self {
            Self::EmitNone => false,
            Self::EmitAll => true,
            Self::Eq(bound) => code == bound,
            Self::Ne(bound) => code != bound,
            Self::Lt(bound) => code < bound,
            Self::Le(bound) => code <= bound,
            Self::Ge(bound) => code >= bound,
        }
    }
}

fn scan_value_segment<T: ColumnType>(
    segment: &ValueSegment<T>,
    search: &T,
    scan_type: ScanType,
    rows: impl Iterator<Item = RowId>,
    pos_list: &mut PosList,
) {
    let values = segment.values();
    for row in rows {
        if scan_type.matches(&values[row.chunk_offset.as_usize()], search) {
            pos_list.push(row);
        }
    }
}

fn scan_dictionary_segment<T: ColumnType>(
    segment: &DictionarySegment<T>,
    search: &T,
    scan_type: ScanType,
    rows: impl Iterator<Item = RowId>,
    pos_list: &mut PosList,
) {
    let predicate = CodePredicate::classify(segment, search, scan_type);
    if predicate == CodePredicate::EmitNone {
        return;
    }
    let codes = segment.attribute_vector();
    for row in rows {
        if predicate.matches(codes.get(row.chunk_offset.as_usize())) {
            pos_list.push(row);
        }
    }
}

/// Generate the monomorphic entry point scanning one base segment over the
/// given row positions.
macro_rules! impl_scan_segment {
    ($( { $Abc:ident, $Type:ty, $Value:ident } ),*) => {
        fn scan_segment(
            segment: &SegmentImpl,
            search: &DataValue,
            scan_type: ScanType,
            rows: impl Iterator<Item = RowId>,
            pos_list: &mut PosList,
        ) {
            match (segment, search) {
                $(
                    (
                        SegmentImpl::Value(ValueSegmentImpl::$Abc(segment)),
                        DataValue::$Value(search),
                    ) => scan_value_segment(segment, search, scan_type, rows, pos_list),
                    (
                        SegmentImpl::Dictionary(DictionarySegmentImpl::$Abc(segment)),
                        DataValue::$Value(search),
                    ) => scan_dictionary_segment(segment, search, scan_type, rows, pos_list),
                )*
                (SegmentImpl::Reference(_), _) => {
                    unreachable!("base chunks never contain reference segments")
                }
                _ => unreachable!("search value was cast to the column type"),
            }
        }
    };
}

for_all_variants! { impl_scan_segment }

/// The filter operator.
///
/// Scans one column of the input for values satisfying `<column> <op>
/// <search_value>` and outputs a single-chunk table of reference segments
/// over the underlying base table, all sharing one position list. A scan
/// over another scan's output follows the reference segments back to the
/// base table, so chained filters compose without stacking views.
pub struct TableScan {
    input: BoxedOperator,
    column_id: ColumnId,
    scan_type: ScanType,
    search_value: DataValue,
    output: Output,
}

impl TableScan {
    pub fn new(
        input: BoxedOperator,
        column_id: ColumnId,
        scan_type: ScanType,
        search_value: DataValue,
    ) -> Self {
        TableScan {
            input,
            column_id,
            scan_type,
            search_value,
            output: Output::default(),
        }
    }

    pub fn column_id(&self) -> ColumnId {
        self.column_id
    }

    pub fn scan_type(&self) -> ScanType {
        self.scan_type
    }

    pub fn search_value(&self) -> &DataValue {
        &self.search_value
    }
}

impl Operator for TableScan {
    fn execute(&mut self) -> Result<(), OperatorError> {
        self.input.execute()?;
        let input = self.input.get_output();
        let data_type = input.column_type(self.column_id);
        let search = self.search_value.cast_to(data_type)?;

        // An input with exactly one chunk of reference segments is a prior
        // operator's output; anything else is scanned as a base table.
        let reference_input = if input.chunk_count() == 1 {
            input
                .get_chunk(ChunkId(0))
                .get_segment(self.column_id)
                .as_reference()
                .cloned()
        } else {
            None
        };

        let mut pos_list = PosList::new();
        let base = match reference_input {
            Some(reference) => {
                let base = reference.referenced_table().clone();
                let column_id = reference.referenced_column_id();
                let groups = reference.pos_list().iter().chunk_by(|row| row.chunk_id);
                for (chunk_id, rows) in &groups {
                    let segment = base.get_chunk(chunk_id).get_segment(column_id);
                    scan_segment(&segment, &search, self.scan_type, rows.copied(), &mut pos_list);
                }
                base
            }
            None => {
                for index in 0..input.chunk_count() {
                    let chunk_id = ChunkId(index as u32);
                    let chunk = input.get_chunk(chunk_id);
                    let segment = chunk.get_segment(self.column_id);
                    let rows = (0..chunk.len())
                        .map(|offset| RowId::new(chunk_id, ChunkOffset(offset as u32)));
                    scan_segment(&segment, &search, self.scan_type, rows, &mut pos_list);
                }
                input
            }
        };
        debug!(
            scan_type = %self.scan_type,
            search = %search,
            rows = pos_list.len(),
            "table scan finished"
        );

        let pos_list = Arc::new(pos_list);
        let mut chunk = Chunk::new();
        for index in 0..base.column_count() {
            chunk.add_segment(Arc::new(SegmentImpl::Reference(ReferenceSegment::new(
                base.clone(),
                ColumnId(index as u32),
                pos_list.clone(),
            ))));
        }
        let output = Table::with_single_chunk(
            base.column_names(),
            base.column_types(),
            base.target_chunk_size(),
            chunk,
        );
        self.output.fill(Arc::new(output));
        Ok(())
    }

    fn get_output(&self) -> TableRef {
        self.output.get()
    }
}
