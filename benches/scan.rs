// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

use std::sync::Arc;

use criterion::*;
use granite::operator::{Operator, ScanType, TableScan, TableWrapper};
use granite::storage::{Table, TableRef};
use granite::types::{ChunkId, ColumnId, DataType, DataValue};

fn make_int_table(size: usize, compressed: bool) -> TableRef {
    let table = Arc::new(Table::new(size));
    table.add_column("x", DataType::Int32).unwrap();
    for i in 0..size {
        // a few hundred distinct values so dictionaries stay narrow
        table
            .append(vec![DataValue::Int32((i % 300) as i32)])
            .unwrap();
    }
    if compressed {
        table.compress_chunk(ChunkId(0)).unwrap();
    }
    table
}

fn run_scan(table: &TableRef, scan_type: ScanType, value: i32) -> usize {
    let mut scan = TableScan::new(
        Box::new(TableWrapper::new(table.clone())),
        ColumnId(0),
        scan_type,
        DataValue::Int32(value),
    );
    scan.execute().unwrap();
    scan.get_output().row_count()
}

fn scan_segments(c: &mut Criterion) {
    for (name, compressed) in [("value", false), ("dictionary", true)] {
        let mut group = c.benchmark_group(format!("scan({name}, >)"));
        group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
        for size in [4096, 65536, 1 << 20] {
            group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
                let table = make_int_table(size, compressed);
                b.iter(|| run_scan(&table, ScanType::GreaterThan, 150));
            });
        }
        group.finish();
    }
}

criterion_group!(benches, scan_segments);
criterion_main!(benches);
