//! Column storage: a typed backing store plus a parallel NA bitmap.

use crate::column::{BitMask, ColumnData, Kind, Mask, Primitive, Scalar};
use crate::error::{Error, Result};
use crate::na::NA;

/// Exclusive owner of one homogeneous, fixed-length store.
///
/// `data.len() == na.len()` always holds. A set NA bit means the stored
/// value at that row is a placeholder and must not be read.
#[derive(Debug, Clone)]
pub struct Column {
    pub(crate) data: ColumnData,
    pub(crate) na: BitMask,
}

/// Typed random-access reader bound to one column.
#[derive(Debug, Clone, Copy)]
pub struct GetterAt<'a, T> {
    values: &'a [T],
    na: &'a BitMask,
}

impl<'a, T: Primitive> GetterAt<'a, T> {
    pub fn get(&self, row: usize) -> Result<NA<&'a T>> {
        if row >= self.values.len() {
            return Err(Error::IndexOutOfRange {
                index: row,
                length: self.values.len(),
            });
        }
        if self.na.get(row) {
            Ok(NA::NA)
        } else {
            Ok(NA::Value(&self.values[row]))
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Column {
    /// Column of `length` rows of `kind`, all NA when `with_na` is set,
    /// otherwise filled with the kind's default value.
    pub fn create(kind: Kind, length: usize, with_na: bool) -> Self {
        let na = if with_na {
            BitMask::ones(length)
        } else {
            BitMask::zeros(length)
        };
        Self {
            data: ColumnData::filled(kind, length),
            na,
        }
    }

    pub fn from_vec<T: Primitive>(values: Vec<T>) -> Self {
        let na = BitMask::zeros(values.len());
        Self {
            data: T::wrap(values),
            na,
        }
    }

    pub fn from_options<T: Primitive>(values: Vec<Option<T>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(Option::is_none).collect();
        let data = values.into_iter().map(Option::unwrap_or_default).collect();
        Self {
            data: T::wrap(data),
            na: BitMask::from_bools(&nulls),
        }
    }

    pub fn from_parts(data: ColumnData, na: BitMask) -> Result<Self> {
        if data.len() != na.len() {
            return Err(Error::ShapeMismatch {
                left: data.len(),
                right: na.len(),
            });
        }
        Ok(Self { data, na })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn kind(&self) -> Kind {
        self.data.kind()
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn na_mask(&self) -> &BitMask {
        &self.na
    }

    pub fn na_count(&self) -> usize {
        self.na.count_ones()
    }

    pub fn is_na(&self, row: usize) -> Result<bool> {
        self.check_row(row)?;
        Ok(self.na.get(row))
    }

    /// Per-row NA flags.
    pub fn is_na_mask(&self) -> Mask {
        self.na.to_bools()
    }

    pub fn get(&self, row: usize) -> Result<NA<Scalar>> {
        self.check_row(row)?;
        Ok(self.value_at(row))
    }

    /// Typed accessor for callers that already know the kind.
    pub fn getter_at<T: Primitive>(&self) -> Result<GetterAt<'_, T>> {
        let values = T::slice(&self.data)
            .ok_or_else(|| Error::unsupported("typed getter", &[self.kind(), T::KIND]))?;
        Ok(GetterAt {
            values,
            na: &self.na,
        })
    }

    /// Bool column as a selection mask; NA rows are not selected.
    pub fn to_mask(&self) -> Result<Mask> {
        match &self.data {
            ColumnData::Bool(values) => Ok(values
                .iter()
                .enumerate()
                .map(|(i, &v)| v && !self.na.get(i))
                .collect()),
            _ => Err(Error::unsupported("mask", &[self.kind()])),
        }
    }

    pub fn set(&mut self, row: usize, value: impl Into<NA<Scalar>>) -> Result<()> {
        self.check_row(row)?;
        let value = self.convert_for_write(value.into())?;
        self.write(row, value);
        Ok(())
    }

    /// Sets every row to `value`.
    pub fn fill(&mut self, value: impl Into<NA<Scalar>>) -> Result<()> {
        let value = self.convert_for_write(value.into())?;
        for row in 0..self.len() {
            self.write(row, value.clone());
        }
        Ok(())
    }

    /// Sets the rows selected by `mask` to `value`.
    pub fn set_mask(&mut self, mask: &[bool], value: impl Into<NA<Scalar>>) -> Result<()> {
        self.check_mask(mask)?;
        let value = self.convert_for_write(value.into())?;
        for row in selected(mask) {
            self.write(row, value.clone());
        }
        Ok(())
    }

    /// Sets each row of `rows` to `value`. Duplicate rows are allowed.
    pub fn set_rows(&mut self, rows: &[usize], value: impl Into<NA<Scalar>>) -> Result<()> {
        self.check_rows(rows)?;
        let value = self.convert_for_write(value.into())?;
        for &row in rows {
            self.write(row, value.clone());
        }
        Ok(())
    }

    /// Sets every selected row `i` to `values[i]`; `values` is aligned with
    /// the mask, unselected entries are ignored.
    pub fn set_mask_values(&mut self, mask: &[bool], values: &[NA<Scalar>]) -> Result<()> {
        self.check_mask(mask)?;
        if values.len() != mask.len() {
            return Err(Error::IndexOutOfRange {
                index: values.len(),
                length: self.len(),
            });
        }
        let staged = selected(mask)
            .map(|row| Ok((row, self.convert_for_write(values[row].clone())?)))
            .collect::<Result<Vec<_>>>()?;
        for (row, value) in staged {
            self.write(row, value);
        }
        Ok(())
    }

    /// Sets `rows[i]` to `values[i]`. When a row repeats, the last write wins.
    pub fn set_rows_values(&mut self, rows: &[usize], values: &[NA<Scalar>]) -> Result<()> {
        self.check_rows(rows)?;
        if values.len() != rows.len() {
            return Err(Error::IndexOutOfRange {
                index: values.len(),
                length: rows.len(),
            });
        }
        let staged = values
            .iter()
            .map(|v| self.convert_for_write(v.clone()))
            .collect::<Result<Vec<_>>>()?;
        for (&row, value) in rows.iter().zip(staged) {
            self.write(row, value);
        }
        Ok(())
    }

    /// Deep copy with independent storage.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Deep copy of `rows`, in that order; duplicates are kept.
    pub fn copy_rows(&self, rows: &[usize]) -> Result<Self> {
        self.check_rows(rows)?;
        Ok(Self {
            data: self.data.take(rows),
            na: self.na.take(rows),
        })
    }

    /// Grows or shrinks the column. With `keep_data` the common prefix
    /// survives and new rows are NA; otherwise every row becomes NA.
    pub fn resize(&mut self, length: usize, keep_data: bool) {
        if keep_data {
            self.data.resize(length);
            self.na.resize(length, true);
        } else {
            self.data = ColumnData::filled(self.kind(), length);
            self.na = BitMask::ones(length);
        }
    }

    /// Appends the columns in order, promoting them to their common kind.
    pub fn concat(columns: &[&Column]) -> Result<Column> {
        let kind = Kind::promote_all(columns.iter().map(|c| c.kind()))
            .ok_or_else(|| Error::SchemaMismatch("cannot concatenate zero columns".to_string()))?;
        let total = columns.iter().map(|c| c.len()).sum();
        let mut data = ColumnData::filled(kind, 0);
        let mut na = BitMask::zeros(0);
        for column in columns {
            let part = column.promote_to(kind)?;
            data.extend_from(&part)?;
            na.extend(&column.na);
        }
        debug_assert_eq!(data.len(), total);
        Ok(Column { data, na })
    }

    pub(crate) fn value_at(&self, row: usize) -> NA<Scalar> {
        if self.na.get(row) {
            NA::NA
        } else {
            NA::Value(self.data.scalar_at(row))
        }
    }

    fn write(&mut self, row: usize, value: NA<Scalar>) {
        match value {
            NA::Value(v) => {
                self.data.write(row, v);
                self.na.set(row, false);
            }
            NA::NA => self.na.set(row, true),
        }
    }

    fn convert_for_write(&self, value: NA<Scalar>) -> Result<NA<Scalar>> {
        match value {
            NA::Value(v) => super::convert::convert_scalar(v, self.kind()),
            NA::NA => Ok(NA::NA),
        }
    }

    pub(crate) fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.len() {
            return Err(Error::IndexOutOfRange {
                index: row,
                length: self.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_rows(&self, rows: &[usize]) -> Result<()> {
        match rows.iter().find(|&&r| r >= self.len()) {
            Some(&index) => Err(Error::IndexOutOfRange {
                index,
                length: self.len(),
            }),
            None => Ok(()),
        }
    }

    fn check_mask(&self, mask: &[bool]) -> Result<()> {
        if mask.len() != self.len() {
            return Err(Error::IndexOutOfRange {
                index: mask.len(),
                length: self.len(),
            });
        }
        Ok(())
    }
}

/// Positions of the `true` entries of a mask.
pub(crate) fn selected(mask: &[bool]) -> impl Iterator<Item = usize> + '_ {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &keep)| keep.then_some(i))
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}
