use std::fmt::Debug;

use crate::column::{Kind, Scalar};
use crate::error::{Error, Result};

/// Typed backing store of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Bool(Vec<bool>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Text(Vec<String>),
}

/// Runs `$body` with `$v` bound to the typed vector of whatever variant `$data` holds.
macro_rules! with_data {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            $crate::column::ColumnData::Bool($v) => $body,
            $crate::column::ColumnData::Int32($v) => $body,
            $crate::column::ColumnData::Int64($v) => $body,
            $crate::column::ColumnData::Float32($v) => $body,
            $crate::column::ColumnData::Float64($v) => $body,
            $crate::column::ColumnData::Text($v) => $body,
        }
    };
}

/// Like `with_data!` but rewraps the produced vector in the same variant.
macro_rules! map_data {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            $crate::column::ColumnData::Bool($v) => $crate::column::ColumnData::Bool($body),
            $crate::column::ColumnData::Int32($v) => $crate::column::ColumnData::Int32($body),
            $crate::column::ColumnData::Int64($v) => $crate::column::ColumnData::Int64($body),
            $crate::column::ColumnData::Float32($v) => $crate::column::ColumnData::Float32($body),
            $crate::column::ColumnData::Float64($v) => $crate::column::ColumnData::Float64($body),
            $crate::column::ColumnData::Text($v) => $crate::column::ColumnData::Text($body),
        }
    };
}

pub(crate) use with_data;

impl ColumnData {
    pub fn kind(&self) -> Kind {
        match self {
            ColumnData::Bool(_) => Kind::Bool,
            ColumnData::Int32(_) => Kind::Int32,
            ColumnData::Int64(_) => Kind::Int64,
            ColumnData::Float32(_) => Kind::Float32,
            ColumnData::Float64(_) => Kind::Float64,
            ColumnData::Text(_) => Kind::Text,
        }
    }

    pub fn len(&self) -> usize {
        with_data!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store of `length` default values.
    pub fn filled(kind: Kind, length: usize) -> Self {
        match kind {
            Kind::Bool => ColumnData::Bool(vec![false; length]),
            Kind::Int32 => ColumnData::Int32(vec![0; length]),
            Kind::Int64 => ColumnData::Int64(vec![0; length]),
            Kind::Float32 => ColumnData::Float32(vec![0.0; length]),
            Kind::Float64 => ColumnData::Float64(vec![0.0; length]),
            Kind::Text => ColumnData::Text(vec![String::new(); length]),
        }
    }

    /// Gathers `rows` in order; callers validate the indices.
    pub(crate) fn take(&self, rows: &[usize]) -> Self {
        map_data!(self, v => rows.iter().map(|&r| v[r].clone()).collect())
    }

    pub(crate) fn resize(&mut self, length: usize) {
        with_data!(self, v => v.resize(length, Default::default()))
    }

    /// Appends `other`, which must be of the same kind.
    pub(crate) fn extend_from(&mut self, other: &ColumnData) -> Result<()> {
        let kinds = [self.kind(), other.kind()];
        match (self, other) {
            (ColumnData::Bool(a), ColumnData::Bool(b)) => a.extend_from_slice(b),
            (ColumnData::Int32(a), ColumnData::Int32(b)) => a.extend_from_slice(b),
            (ColumnData::Int64(a), ColumnData::Int64(b)) => a.extend_from_slice(b),
            (ColumnData::Float32(a), ColumnData::Float32(b)) => a.extend_from_slice(b),
            (ColumnData::Float64(a), ColumnData::Float64(b)) => a.extend_from_slice(b),
            (ColumnData::Text(a), ColumnData::Text(b)) => a.extend_from_slice(b),
            _ => return Err(Error::unsupported("concatenation", &kinds)),
        }
        Ok(())
    }

    pub(crate) fn scalar_at(&self, row: usize) -> Scalar {
        match self {
            ColumnData::Bool(v) => Scalar::Bool(v[row]),
            ColumnData::Int32(v) => Scalar::Int32(v[row]),
            ColumnData::Int64(v) => Scalar::Int64(v[row]),
            ColumnData::Float32(v) => Scalar::Float32(v[row]),
            ColumnData::Float64(v) => Scalar::Float64(v[row]),
            ColumnData::Text(v) => Scalar::Text(v[row].clone()),
        }
    }

    /// Writes a scalar already converted to this store's kind.
    pub(crate) fn write(&mut self, row: usize, value: Scalar) {
        match (self, value) {
            (ColumnData::Bool(v), Scalar::Bool(x)) => v[row] = x,
            (ColumnData::Int32(v), Scalar::Int32(x)) => v[row] = x,
            (ColumnData::Int64(v), Scalar::Int64(x)) => v[row] = x,
            (ColumnData::Float32(v), Scalar::Float32(x)) => v[row] = x,
            (ColumnData::Float64(v), Scalar::Float64(x)) => v[row] = x,
            (ColumnData::Text(v), Scalar::Text(x)) => v[row] = x,
            (data, value) => debug_assert!(
                false,
                "kind mismatch writing {:?} into {:?}",
                value.kind(),
                data.kind()
            ),
        }
    }
}

/// Rust element types a column can physically hold.
pub trait Primitive: Clone + Default + PartialEq + PartialOrd + Debug + Send + Sync + 'static {
    const KIND: Kind;

    fn slice(data: &ColumnData) -> Option<&[Self]>;

    fn wrap(values: Vec<Self>) -> ColumnData;

    fn into_scalar(self) -> Scalar;

    /// Exact-kind extraction, no conversion.
    fn from_scalar(value: Scalar) -> Option<Self>;

    fn scalar_ref(value: &Scalar) -> Option<&Self>;

    /// Structural equality: NaN is the only value unequal to itself and
    /// counts as equal to another NaN here.
    #[allow(clippy::eq_op)]
    fn same(&self, other: &Self) -> bool {
        self == other || (self != self && other != other)
    }
}

macro_rules! impl_primitive {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl Primitive for $t {
                const KIND: Kind = Kind::$variant;

                fn slice(data: &ColumnData) -> Option<&[Self]> {
                    match data {
                        ColumnData::$variant(v) => Some(v.as_slice()),
                        _ => None,
                    }
                }

                fn wrap(values: Vec<Self>) -> ColumnData {
                    ColumnData::$variant(values)
                }

                fn into_scalar(self) -> Scalar {
                    Scalar::$variant(self)
                }

                fn from_scalar(value: Scalar) -> Option<Self> {
                    match value {
                        Scalar::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                fn scalar_ref(value: &Scalar) -> Option<&Self> {
                    match value {
                        Scalar::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_primitive!(
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => Text,
);
