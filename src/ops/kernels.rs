//! Typed elementwise kernels.
//!
//! Every kernel receives both operands already promoted to the kind it is
//! instantiated for. A scalar operand is read at every row without being
//! materialized into a column.

use std::borrow::Cow;

use crate::column::{BitMask, Column, ColumnData, Primitive, Scalar};
use crate::error::{Error, Result};
use crate::ops::BinaryOp;

/// One promoted operand.
pub(crate) enum Side<'a> {
    Column {
        data: Cow<'a, ColumnData>,
        na: &'a BitMask,
    },
    Scalar(Scalar),
}

pub(crate) type Kernel = fn(BinaryOp, &Side<'_>, &Side<'_>, usize) -> Result<Column>;

enum Typed<'a, T> {
    Column(&'a [T], &'a BitMask),
    Scalar(&'a T),
}

impl<'a, T> Typed<'a, T> {
    #[inline]
    fn at(&self, row: usize) -> Option<&'a T> {
        match *self {
            Typed::Column(values, na) => (!na.get(row)).then(|| &values[row]),
            Typed::Scalar(value) => Some(value),
        }
    }
}

fn typed<'s, T: Primitive>(side: &'s Side<'_>) -> Result<Typed<'s, T>> {
    let typed = match side {
        Side::Column { data, na } => T::slice(data).map(|v| Typed::Column(v, *na)),
        Side::Scalar(value) => T::scalar_ref(value).map(Typed::Scalar),
    };
    typed.ok_or_else(|| Error::unsupported("kernel operand", &[T::KIND]))
}

/// Numeric element operations. `div` returns `None` on an integer zero
/// divisor; integer overflow wraps.
pub(crate) trait Arith: Primitive + Copy {
    fn add(a: Self, b: Self) -> Option<Self>;
    fn sub(a: Self, b: Self) -> Option<Self>;
    fn mul(a: Self, b: Self) -> Option<Self>;
    fn div(a: Self, b: Self) -> Option<Self>;
    fn neg(a: Self) -> Self;
}

macro_rules! impl_int_arith {
    ($($t:ty),*) => {
        $(
            impl Arith for $t {
                fn add(a: Self, b: Self) -> Option<Self> { Some(a.wrapping_add(b)) }
                fn sub(a: Self, b: Self) -> Option<Self> { Some(a.wrapping_sub(b)) }
                fn mul(a: Self, b: Self) -> Option<Self> { Some(a.wrapping_mul(b)) }
                fn div(a: Self, b: Self) -> Option<Self> {
                    if b == 0 { None } else { Some(a.wrapping_div(b)) }
                }
                fn neg(a: Self) -> Self { a.wrapping_neg() }
            }
        )*
    };
}

macro_rules! impl_float_arith {
    ($($t:ty),*) => {
        $(
            impl Arith for $t {
                fn add(a: Self, b: Self) -> Option<Self> { Some(a + b) }
                fn sub(a: Self, b: Self) -> Option<Self> { Some(a - b) }
                fn mul(a: Self, b: Self) -> Option<Self> { Some(a * b) }
                fn div(a: Self, b: Self) -> Option<Self> { Some(a / b) }
                fn neg(a: Self) -> Self { -a }
            }
        )*
    };
}

impl_int_arith!(i32, i64);
impl_float_arith!(f32, f64);

pub(crate) fn arithmetic<T: Arith>(op: BinaryOp, l: &Side<'_>, r: &Side<'_>, n: usize) -> Result<Column> {
    let f: fn(T, T) -> Option<T> = match op {
        BinaryOp::Add => T::add,
        BinaryOp::Sub => T::sub,
        BinaryOp::Mul => T::mul,
        BinaryOp::Div => T::div,
        _ => return Err(Error::unsupported(op.symbol(), &[T::KIND])),
    };
    let (l, r) = (typed::<T>(l)?, typed::<T>(r)?);

    let mut values = Vec::with_capacity(n);
    let mut na = BitMask::zeros(n);
    for row in 0..n {
        match (l.at(row), r.at(row)) {
            (Some(&a), Some(&b)) => values.push(f(a, b).ok_or(Error::DivisionByZero { row })?),
            _ => {
                values.push(T::default());
                na.set(row, true);
            }
        }
    }
    Column::from_parts(T::wrap(values), na)
}

/// IEEE-style: a missing operand compares false, except under `!=`.
pub(crate) fn comparison<T: Primitive>(op: BinaryOp, l: &Side<'_>, r: &Side<'_>, n: usize) -> Result<Column> {
    let f: fn(&T, &T) -> bool = match op {
        BinaryOp::Eq => |a, b| a == b,
        BinaryOp::Ne => |a, b| a != b,
        BinaryOp::Lt => |a, b| a < b,
        BinaryOp::Le => |a, b| a <= b,
        BinaryOp::Gt => |a, b| a > b,
        BinaryOp::Ge => |a, b| a >= b,
        _ => return Err(Error::unsupported(op.symbol(), &[T::KIND])),
    };
    let (l, r) = (typed::<T>(l)?, typed::<T>(r)?);

    let values: Vec<bool> = (0..n)
        .map(|row| match (l.at(row), r.at(row)) {
            (Some(a), Some(b)) => f(a, b),
            _ => op == BinaryOp::Ne,
        })
        .collect();
    Ok(Column::from_vec(values))
}

pub(crate) fn logical(op: BinaryOp, l: &Side<'_>, r: &Side<'_>, n: usize) -> Result<Column> {
    let f: fn(bool, bool) -> bool = match op {
        BinaryOp::And => |a, b| a && b,
        BinaryOp::Or => |a, b| a || b,
        _ => return Err(Error::unsupported(op.symbol(), &[crate::column::Kind::Bool])),
    };
    let (l, r) = (typed::<bool>(l)?, typed::<bool>(r)?);

    let mut values = Vec::with_capacity(n);
    let mut na = BitMask::zeros(n);
    for row in 0..n {
        match (l.at(row), r.at(row)) {
            (Some(&a), Some(&b)) => values.push(f(a, b)),
            _ => {
                values.push(false);
                na.set(row, true);
            }
        }
    }
    Column::from_parts(ColumnData::Bool(values), na)
}

/// `+` on text concatenates.
pub(crate) fn concat_text(op: BinaryOp, l: &Side<'_>, r: &Side<'_>, n: usize) -> Result<Column> {
    if op != BinaryOp::Add {
        return Err(Error::unsupported(op.symbol(), &[crate::column::Kind::Text]));
    }
    let (l, r) = (typed::<String>(l)?, typed::<String>(r)?);

    let mut values = Vec::with_capacity(n);
    let mut na = BitMask::zeros(n);
    for row in 0..n {
        match (l.at(row), r.at(row)) {
            (Some(a), Some(b)) => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                values.push(joined);
            }
            _ => {
                values.push(String::new());
                na.set(row, true);
            }
        }
    }
    Column::from_parts(ColumnData::Text(values), na)
}

pub(crate) fn negate<T: Arith>(values: &[T], na: &BitMask) -> Result<Column> {
    let out = values.iter().map(|&v| T::neg(v)).collect();
    Column::from_parts(T::wrap(out), na.clone())
}

pub(crate) fn not(values: &[bool], na: &BitMask) -> Result<Column> {
    let out = values.iter().map(|&v| !v).collect();
    Column::from_parts(ColumnData::Bool(out), na.clone())
}
