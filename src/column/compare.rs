use crate::column::{Column, ColumnData, Primitive};
use crate::error::{Error, Result};

impl Column {
    /// Exact structural comparison: same kind, same length, same NA rows
    /// and the same values elsewhere. Two NA rows are equal, and so are two
    /// NaN values.
    pub fn equals(&self, other: &Column) -> bool {
        if self.kind() != other.kind() || self.len() != other.len() || self.na != other.na {
            return false;
        }
        match (&self.data, &other.data) {
            (ColumnData::Bool(a), ColumnData::Bool(b)) => self.same_values(a, b),
            (ColumnData::Int32(a), ColumnData::Int32(b)) => self.same_values(a, b),
            (ColumnData::Int64(a), ColumnData::Int64(b)) => self.same_values(a, b),
            (ColumnData::Float32(a), ColumnData::Float32(b)) => self.same_values(a, b),
            (ColumnData::Float64(a), ColumnData::Float64(b)) => self.same_values(a, b),
            (ColumnData::Text(a), ColumnData::Text(b)) => self.same_values(a, b),
            _ => false,
        }
    }

    fn same_values<T: Primitive>(&self, a: &[T], b: &[T]) -> bool {
        a.iter()
            .zip(b)
            .enumerate()
            .all(|(i, (x, y))| self.na.get(i) || x.same(y))
    }

    /// Maximum absolute elementwise difference with `other`.
    ///
    /// Rows NA on one side only count as an infinite difference. When `exc`
    /// is set a difference above `precision` is an error.
    pub fn assert_almost_equal(&self, other: &Column, precision: f64, exc: bool) -> Result<f64> {
        if self.len() != other.len() {
            return Err(Error::ShapeMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        let left = self.distances()?;
        let right = other.distances()?;

        let mut max_diff = 0.0f64;
        for row in 0..self.len() {
            let diff = match (self.na.get(row), other.na.get(row)) {
                (true, true) => 0.0,
                (true, false) | (false, true) => f64::INFINITY,
                (false, false) => {
                    let (a, b) = (left[row], right[row]);
                    if a.is_nan() && b.is_nan() {
                        0.0
                    } else if a == b {
                        // equal infinities
                        0.0
                    } else {
                        let d = (a - b).abs();
                        if d.is_nan() {
                            f64::INFINITY
                        } else {
                            d
                        }
                    }
                }
            };
            max_diff = max_diff.max(diff);
        }

        if exc && max_diff > precision {
            return Err(Error::ToleranceExceeded {
                difference: max_diff,
                precision,
            });
        }
        Ok(max_diff)
    }

    /// Values as f64 for distance computations. Text has no distance.
    fn distances(&self) -> Result<Vec<f64>> {
        match &self.data {
            ColumnData::Text(_) => Err(Error::unsupported("distance", &[self.kind()])),
            data => Ok((0..data.len())
                .map(|i| data.scalar_at(i).as_f64().unwrap_or(f64::NAN))
                .collect()),
        }
    }
}
