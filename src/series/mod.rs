//! Operator façade over columns.

mod numeric_column;

pub use self::numeric_column::NumericColumn;
