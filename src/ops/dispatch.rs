//! Operator resolution.
//!
//! A table keyed by `(operator, left kind, right kind)` is built once on
//! first use. Each entry names the kind both operands are promoted to, the
//! kind of the result, and the typed kernel that computes it. Pairs with no
//! entry are unsupported.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::column::{promote_scalar, Column, ColumnData, Kind, Scalar};
use crate::error::{Error, Result};
use crate::ops::kernels::{self, Kernel, Side};
use crate::ops::{BinaryOp, OpFamily, UnaryOp};

/// Resolved implementation of one `(operator, left, right)` triple.
#[derive(Clone, Copy)]
pub struct Resolution {
    /// Kind both operands are promoted to before the kernel runs.
    pub operand_kind: Kind,
    pub result_kind: Kind,
    kernel: Kernel,
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("operand_kind", &self.operand_kind)
            .field("result_kind", &self.result_kind)
            .finish()
    }
}

/// Either side of a binary operator.
#[derive(Debug, Clone)]
pub enum Operand<'a> {
    Column(&'a Column),
    Scalar(Scalar),
}

impl Operand<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Operand::Column(c) => c.kind(),
            Operand::Scalar(s) => s.kind(),
        }
    }
}

impl<'a> From<&'a Column> for Operand<'a> {
    fn from(column: &'a Column) -> Self {
        Operand::Column(column)
    }
}

macro_rules! impl_operand_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand<'_> {
                fn from(value: $t) -> Self {
                    Operand::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

impl_operand_from!(bool, i32, i64, f32, f64, String, &str, Scalar);

lazy_static! {
    static ref DISPATCH: HashMap<(BinaryOp, Kind, Kind), Resolution> = build_table();
}

fn build_table() -> HashMap<(BinaryOp, Kind, Kind), Resolution> {
    let mut table = HashMap::new();
    for op in BinaryOp::ALL {
        for left in Kind::ALL {
            for right in Kind::ALL {
                if let Some(resolution) = rule(op, left, right) {
                    table.insert((op, left, right), resolution);
                }
            }
        }
    }
    log::trace!("operator dispatch table built with {} entries", table.len());
    table
}

/// Promotion and kernel selection for one triple.
fn rule(op: BinaryOp, left: Kind, right: Kind) -> Option<Resolution> {
    let common = left.promote(right);
    let (result_kind, kernel): (Kind, Kernel) = match op.family() {
        OpFamily::Arithmetic => match common {
            Kind::Bool => return None,
            Kind::Int32 => (common, kernels::arithmetic::<i32> as Kernel),
            Kind::Int64 => (common, kernels::arithmetic::<i64> as Kernel),
            Kind::Float32 => (common, kernels::arithmetic::<f32> as Kernel),
            Kind::Float64 => (common, kernels::arithmetic::<f64> as Kernel),
            Kind::Text if op == BinaryOp::Add => (common, kernels::concat_text as Kernel),
            Kind::Text => return None,
        },
        OpFamily::Comparison => match common {
            Kind::Bool => (Kind::Bool, kernels::comparison::<bool> as Kernel),
            Kind::Int32 => (Kind::Bool, kernels::comparison::<i32> as Kernel),
            Kind::Int64 => (Kind::Bool, kernels::comparison::<i64> as Kernel),
            Kind::Float32 => (Kind::Bool, kernels::comparison::<f32> as Kernel),
            Kind::Float64 => (Kind::Bool, kernels::comparison::<f64> as Kernel),
            Kind::Text => (Kind::Bool, kernels::comparison::<String> as Kernel),
        },
        OpFamily::Logical => match (left, right) {
            (Kind::Bool, Kind::Bool) => (Kind::Bool, kernels::logical as Kernel),
            _ => return None,
        },
    };
    Some(Resolution {
        operand_kind: common,
        result_kind,
        kernel,
    })
}

/// Looks up the implementation of `op` for the given operand kinds.
pub fn resolve(op: BinaryOp, left: Kind, right: Kind) -> Result<Resolution> {
    DISPATCH
        .get(&(op, left, right))
        .copied()
        .ok_or_else(|| Error::unsupported(op.symbol(), &[left, right]))
}

/// Evaluates `left op right` into a new column. Neither operand is modified.
pub fn binary<'l, 'r>(
    op: BinaryOp,
    left: impl Into<Operand<'l>>,
    right: impl Into<Operand<'r>>,
) -> Result<Column> {
    let (left, right) = (left.into(), right.into());
    let length = match (&left, &right) {
        (Operand::Column(l), Operand::Column(r)) => {
            if l.len() != r.len() {
                return Err(Error::ShapeMismatch {
                    left: l.len(),
                    right: r.len(),
                });
            }
            l.len()
        }
        (Operand::Column(c), Operand::Scalar(_)) => c.len(),
        (Operand::Scalar(_), Operand::Column(c)) => c.len(),
        (Operand::Scalar(_), Operand::Scalar(_)) => {
            return Err(Error::unsupported(
                format!("{} without a column operand", op),
                &[left.kind(), right.kind()],
            ))
        }
    };

    let resolution = resolve(op, left.kind(), right.kind())?;
    log::debug!(
        "dispatch {:?} {} {:?} -> {:?} over {} rows",
        left.kind(),
        op,
        right.kind(),
        resolution.result_kind,
        length
    );

    let l = promote(&left, resolution.operand_kind)?;
    let r = promote(&right, resolution.operand_kind)?;
    (resolution.kernel)(op, &l, &r, length)
}

fn promote<'a>(operand: &Operand<'a>, kind: Kind) -> Result<Side<'a>> {
    match operand {
        Operand::Column(column) => Ok(Side::Column {
            data: column.promote_to(kind)?,
            na: column.na_mask(),
        }),
        Operand::Scalar(value) => promote_scalar(value, kind)
            .map(Side::Scalar)
            .ok_or_else(|| Error::unsupported("promotion", &[value.kind(), kind])),
    }
}

/// Evaluates a unary operator into a new column.
pub fn unary(op: UnaryOp, column: &Column) -> Result<Column> {
    let na = column.na_mask();
    match (op, column.data()) {
        (UnaryOp::Neg, ColumnData::Int32(v)) => kernels::negate(v, na),
        (UnaryOp::Neg, ColumnData::Int64(v)) => kernels::negate(v, na),
        (UnaryOp::Neg, ColumnData::Float32(v)) => kernels::negate(v, na),
        (UnaryOp::Neg, ColumnData::Float64(v)) => kernels::negate(v, na),
        (UnaryOp::Not, ColumnData::Bool(v)) => kernels::not(v, na),
        _ => Err(Error::unsupported(op.to_string(), &[column.kind()])),
    }
}
