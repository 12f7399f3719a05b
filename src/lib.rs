// 特定の警告を無効化
#![allow(clippy::needless_lifetimes)]
#![allow(clippy::len_without_is_empty)]

//! Typed columnar in-memory DataFrame engine.
//!
//! Columns own a typed store plus an NA bitmap. Binary operators between
//! columns and scalars are resolved at runtime through a dispatch table
//! keyed by operator and operand kinds, see [`ops`].

pub mod column;
pub mod config;
pub mod cursor;
pub mod dataframe;
pub mod error;
pub mod na;
pub mod ops;
pub mod series;

// Re-export commonly used types
pub use column::{
    invert_permutation, AggregatedFunction, BitMask, Column, ColumnData, GetterAt, Kind, Mask,
    Primitive, RowIndexSet, Scalar,
};
pub use config::FrameConfig;
pub use cursor::{FrameCursor, RowCursor, ValueGetter};
pub use dataframe::DataFrame;
pub use error::{Error, Result};
pub use na::NA;
pub use ops::{BinaryOp, Operand, UnaryOp};
pub use series::NumericColumn;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
