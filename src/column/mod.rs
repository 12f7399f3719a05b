mod aggregate;
mod bitmask;
mod compare;
mod convert;
mod core;
mod kind;
mod primitive;
mod scalar;
mod sort;

pub use self::core::{Column, GetterAt};
pub use aggregate::AggregatedFunction;
pub use bitmask::BitMask;
pub use kind::Kind;
pub use primitive::{ColumnData, Primitive};
pub use scalar::Scalar;
pub use sort::invert_permutation;

pub(crate) use convert::promote_scalar;
pub(crate) use primitive::with_data;

/// Row selection flags, one per row.
pub type Mask = Vec<bool>;

/// Row positions; duplicates and any order are allowed.
pub type RowIndexSet = Vec<usize>;
