// Copyright 2025 Granite Project Authors. Licensed under Apache-2.0.

//! Primitive identifiers and the value domain of the engine.

use std::fmt::Debug;

use ordered_float::OrderedFloat;
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A wrapper around floats providing implementations of `Eq`, `Ord`, and `Hash`.
pub type F32 = OrderedFloat<f32>;
pub type F64 = OrderedFloat<f64>;

/// Index of a chunk within a table.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display("{0}")]
pub struct ChunkId(pub u32);

/// Row index within a chunk.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display("{0}")]
pub struct ChunkOffset(pub u32);

/// Column index within a table.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display("{0}")]
pub struct ColumnId(pub u32);

/// Code within a dictionary.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display("{0}")]
pub struct ValueId(pub u32);

/// Sentinel denoting "no such dictionary entry".
pub const INVALID_VALUE_ID: ValueId = ValueId(u32::MAX);

impl ChunkId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl ChunkOffset {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl ColumnId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl ValueId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// A physical row reference into a base table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId {
    pub chunk_id: ChunkId,
    pub chunk_offset: ChunkOffset,
}

impl RowId {
    pub const fn new(chunk_id: ChunkId, chunk_offset: ChunkOffset) -> RowId {
        RowId {
            chunk_id,
            chunk_offset,
        }
    }
}

/// An ordered sequence of row references into a base table.
pub type PosList = Vec<RowId>;

/// The element type of a column.
///
/// The `Display`/`FromStr` pair round-trips through the schema tag strings
/// (`"int"`, `"long"`, `"float"`, `"double"`, `"string"`).
#[derive(
    Debug, Display, FromStr, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum DataType {
    #[display("int")]
    Int32,
    #[display("long")]
    Int64,
    #[display("float")]
    Float32,
    #[display("double")]
    Float64,
    #[display("string")]
    String,
}

/// Primitive column value.
#[derive(
    Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DataValue {
    #[display("{0}")]
    Int32(i32),
    #[display("{0}")]
    Int64(i64),
    #[display("{0}")]
    Float32(F32),
    #[display("{0}")]
    Float64(F64),
    #[display("'{0}'")]
    String(String),
}

/// memory table row type
pub type Row = Vec<DataValue>;

/// The error type of value type conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("failed to cast {0} value to type {1}")]
    Cast(DataType, DataType),
}

impl DataValue {
    /// Get the type of value.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Int32(_) => DataType::Int32,
            Self::Int64(_) => DataType::Int64,
            Self::Float32(_) => DataType::Float32,
            Self::Float64(_) => DataType::Float64,
            Self::String(_) => DataType::String,
        }
    }

    /// Cast the value to another element type.
    ///
    /// Casts between the numeric types are performed (integer casts are
    /// checked, float-to-integer truncates). Any cast between `String` and a
    /// numeric type fails.
    pub fn cast_to(&self, data_type: DataType) -> Result<Self, ConvertError> {
        if self.data_type() == data_type {
            return Ok(self.clone());
        }
        let cast_err = || ConvertError::Cast(self.data_type(), data_type);
        Ok(match (self, data_type) {
            (&Self::Int32(v), DataType::Int64) => Self::Int64(i64::from(v)),
            (&Self::Int32(v), DataType::Float32) => Self::Float32((v as f32).into()),
            (&Self::Int32(v), DataType::Float64) => Self::Float64(f64::from(v).into()),
            (&Self::Int64(v), DataType::Int32) => {
                Self::Int32(i32::try_from(v).map_err(|_| cast_err())?)
            }
            (&Self::Int64(v), DataType::Float32) => Self::Float32((v as f32).into()),
            (&Self::Int64(v), DataType::Float64) => Self::Float64((v as f64).into()),
            (&Self::Float32(v), DataType::Int32) => Self::Int32(v.into_inner() as i32),
            (&Self::Float32(v), DataType::Int64) => Self::Int64(v.into_inner() as i64),
            (&Self::Float32(v), DataType::Float64) => {
                Self::Float64(f64::from(v.into_inner()).into())
            }
            (&Self::Float64(v), DataType::Int32) => Self::Int32(v.into_inner() as i32),
            (&Self::Float64(v), DataType::Int64) => Self::Int64(v.into_inner() as i64),
            (&Self::Float64(v), DataType::Float32) => {
                Self::Float32((v.into_inner() as f32).into())
            }
            _ => return Err(cast_err()),
        })
    }
}

/// A trait over all column element types.
///
/// Implemented exactly for the five types the engine recognizes; adding a
/// type means implementing this trait and extending [`for_all_variants!`].
pub trait ColumnType: Clone + Ord + Debug + Send + Sync + 'static {
    /// The tag values of this type are stored under.
    const DATA_TYPE: DataType;

    /// Equality as seen by scan predicates.
    ///
    /// For floats this is IEEE equality, so a NaN search value matches
    /// nothing; dictionary ordering still uses the total order.
    fn scan_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl ColumnType for i32 {
    const DATA_TYPE: DataType = DataType::Int32;
}

impl ColumnType for i64 {
    const DATA_TYPE: DataType = DataType::Int64;
}

impl ColumnType for F32 {
    const DATA_TYPE: DataType = DataType::Float32;

    fn scan_eq(&self, other: &Self) -> bool {
        self.into_inner() == other.into_inner()
    }
}

impl ColumnType for F64 {
    const DATA_TYPE: DataType = DataType::Float64;

    fn scan_eq(&self, other: &Self) -> bool {
        self.into_inner() == other.into_inner()
    }
}

impl ColumnType for String {
    const DATA_TYPE: DataType = DataType::String;
}

/// Expands a macro over every element type of the engine.
///
/// Each entry is `{ SegmentVariant, RustType, ValueVariant }`, where
/// `SegmentVariant` names the variant in the segment enums, `RustType` is the
/// backing element type, and `ValueVariant` names the variant in both
/// [`DataValue`] and [`DataType`].
#[macro_export]
macro_rules! for_all_variants {
    ($macro:ident) => {
        $macro! {
            { Int32, i32, Int32 },
            { Int64, i64, Int64 },
            { Float32, $crate::types::F32, Float32 },
            { Float64, $crate::types::F64, Float64 },
            { Utf8, String, String }
        }
    };
}
