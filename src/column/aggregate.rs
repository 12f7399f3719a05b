//! Reducers over a column. NA rows never take part in a reduction.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::column::{with_data, Column, ColumnData, Kind, Primitive, Scalar};
use crate::error::{Error, Result};
use crate::na::NA;

/// Built-in reducers with per-kind numeric semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregatedFunction {
    /// Int64 for Bool/integer columns, Float64 for float columns.
    Sum,
    /// Float64; numeric columns only.
    Mean,
    Min,
    Max,
    /// Number of non-NA rows, as Int64.
    Count,
    /// Sample standard deviation as Float64; numeric columns only.
    Std,
}

impl Column {
    /// Applies a built-in reducer over `rows` (all rows when `None`).
    pub fn aggregate(&self, func: AggregatedFunction, rows: Option<&[usize]>) -> Result<NA<Scalar>> {
        let rows = self.present_rows(rows)?;
        match func {
            AggregatedFunction::Sum => self.sum(&rows).map(NA::Value),
            AggregatedFunction::Mean => {
                let values = self.numeric_values(&rows, "mean")?;
                if values.is_empty() {
                    return Ok(NA::NA);
                }
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                Ok(NA::Value(Scalar::Float64(mean)))
            }
            AggregatedFunction::Std => {
                let values = self.numeric_values(&rows, "std")?;
                if values.len() < 2 {
                    return Ok(NA::NA);
                }
                let n = values.len() as f64;
                let mean = values.iter().sum::<f64>() / n;
                let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
                Ok(NA::Value(Scalar::Float64(var.sqrt())))
            }
            AggregatedFunction::Min => Ok(with_data!(&self.data, v => extreme(v, &rows, false))),
            AggregatedFunction::Max => Ok(with_data!(&self.data, v => extreme(v, &rows, true))),
            AggregatedFunction::Count => Ok(NA::Value(Scalar::Int64(rows.len() as i64))),
        }
    }

    /// Folds `f` over the selected non-NA values in row order. The function
    /// is applied left to right and need not be associative. Returns NA when
    /// no value is selected.
    pub fn aggregate_pairwise<T, F>(&self, mut f: F, rows: Option<&[usize]>) -> Result<NA<T>>
    where
        T: Primitive,
        F: FnMut(T, T) -> T,
    {
        let values = self.typed_values::<T>("pairwise aggregate")?;
        let mut acc: Option<T> = None;
        for row in self.present_rows(rows)? {
            let value = values[row].clone();
            acc = Some(match acc {
                Some(prev) => f(prev, value),
                None => value,
            });
        }
        Ok(acc.into())
    }

    /// Hands the selected non-NA values to `f` as one slice.
    pub fn aggregate_slice<T, F>(&self, f: F, rows: Option<&[usize]>) -> Result<T>
    where
        T: Primitive,
        F: FnOnce(&[T]) -> T,
    {
        let values = self.typed_values::<T>("slice aggregate")?;
        let selected: Cow<'_, [T]> = if rows.is_none() && !self.na.any() {
            Cow::Borrowed(values)
        } else {
            Cow::Owned(
                self.present_rows(rows)?
                    .into_iter()
                    .map(|row| values[row].clone())
                    .collect(),
            )
        };
        Ok(f(&*selected))
    }

    fn typed_values<T: Primitive>(&self, operation: &str) -> Result<&[T]> {
        T::slice(&self.data).ok_or_else(|| Error::unsupported(operation, &[self.kind(), T::KIND]))
    }

    /// Selected rows that are not NA, in selection order.
    fn present_rows(&self, rows: Option<&[usize]>) -> Result<Vec<usize>> {
        match rows {
            Some(rows) => {
                self.check_rows(rows)?;
                Ok(rows.iter().copied().filter(|&r| !self.na.get(r)).collect())
            }
            None => Ok((0..self.len()).filter(|&r| !self.na.get(r)).collect()),
        }
    }

    fn sum(&self, rows: &[usize]) -> Result<Scalar> {
        match &self.data {
            ColumnData::Bool(v) => checked_sum(rows.iter().map(|&r| i64::from(v[r]))),
            ColumnData::Int32(v) => checked_sum(rows.iter().map(|&r| i64::from(v[r]))),
            ColumnData::Int64(v) => checked_sum(rows.iter().map(|&r| v[r])),
            ColumnData::Float32(v) => Ok(Scalar::Float64(rows.iter().map(|&r| f64::from(v[r])).sum())),
            ColumnData::Float64(v) => Ok(Scalar::Float64(rows.iter().map(|&r| v[r]).sum())),
            ColumnData::Text(_) => Err(Error::unsupported("sum", &[Kind::Text])),
        }
    }

    fn numeric_values(&self, rows: &[usize], operation: &str) -> Result<Vec<f64>> {
        if !self.kind().is_numeric() {
            return Err(Error::unsupported(operation, &[self.kind()]));
        }
        Ok(rows
            .iter()
            .filter_map(|&r| self.data.scalar_at(r).as_f64())
            .collect())
    }
}

fn checked_sum(mut values: impl Iterator<Item = i64>) -> Result<Scalar> {
    values
        .try_fold(0i64, |acc, v| acc.checked_add(v))
        .map(Scalar::Int64)
        .ok_or_else(|| Error::overflow("integer sum", Kind::Int64))
}

/// Smallest or greatest value, NaN skipped.
#[allow(clippy::eq_op)]
fn extreme<T: Primitive>(values: &[T], rows: &[usize], greatest: bool) -> NA<Scalar> {
    let mut best: Option<&T> = None;
    for &row in rows {
        let value = &values[row];
        if value != value {
            continue;
        }
        best = match best {
            Some(b) if (greatest && value <= b) || (!greatest && value >= b) => Some(b),
            _ => Some(value),
        };
    }
    best.cloned().map(Primitive::into_scalar).into()
}
