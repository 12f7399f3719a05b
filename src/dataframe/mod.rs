//! Ordered, named collection of equal-length columns.

mod display;
mod sample;

use std::collections::HashMap;

use crate::column::{Column, Kind};
use crate::config::FrameConfig;
use crate::error::{Error, Result};
use crate::series::NumericColumn;

/// 列指向のDataFrame
///
/// Every column holds exactly `row_count` rows. Operations that change the
/// row count apply to all columns or fail before touching any of them.
#[derive(Clone)]
pub struct DataFrame {
    // 列データ
    columns: Vec<Column>,
    // 列名→インデックスのマッピング
    column_indices: HashMap<String, usize>,
    // 列の順序
    column_names: Vec<String>,
    // 行数
    row_count: usize,
    config: FrameConfig,
}

impl Default for DataFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl DataFrame {
    /// 新しい空のDataFrameを作成
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            column_indices: HashMap::new(),
            column_names: Vec::new(),
            row_count: 0,
            config: FrameConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FrameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// 列を追加
    pub fn add_column(&mut self, name: impl Into<String>, column: impl Into<Column>) -> Result<()> {
        let name = name.into();
        let column = column.into();

        // 列名の重複チェック
        if self.column_indices.contains_key(&name) {
            return Err(Error::DuplicateColumnName(name));
        }

        // 行数の整合性チェック
        if !self.columns.is_empty() && column.len() != self.row_count {
            return Err(Error::ShapeMismatch {
                left: self.row_count,
                right: column.len(),
            });
        }

        if self.columns.is_empty() {
            self.row_count = column.len();
        }
        self.column_indices.insert(name.clone(), self.columns.len());
        self.column_names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// 既存の列を置き換え、元の列を返す
    pub fn replace_column(&mut self, name: &str, column: impl Into<Column>) -> Result<Column> {
        let column = column.into();
        let idx = self.index_of(name)?;
        if column.len() != self.row_count {
            return Err(Error::ShapeMismatch {
                left: self.row_count,
                right: column.len(),
            });
        }
        Ok(std::mem::replace(&mut self.columns[idx], column))
    }

    /// 列の参照を取得
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.index_of(name).map(|idx| &self.columns[idx])
    }

    /// Operator view borrowing the named column.
    pub fn numeric(&self, name: &str) -> Result<NumericColumn<'_>> {
        self.column(name).map(NumericColumn::new)
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column_indices.contains_key(name)
    }

    /// 列名のリストを取得
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Columns with their names, in frame order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter())
    }

    /// 行数を取得
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// 列数を取得
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.columns.len())
    }

    pub fn schema(&self) -> Vec<(String, Kind)> {
        self.iter_columns()
            .map(|(name, column)| (name.to_string(), column.kind()))
            .collect()
    }

    /// Deep copy; the result shares no storage with `self`.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// New frame holding `rows` in the given order. Duplicates are kept.
    pub fn take(&self, rows: &[usize]) -> Result<Self> {
        if let Some(&index) = rows.iter().find(|&&r| r >= self.row_count) {
            return Err(Error::IndexOutOfRange {
                index,
                length: self.row_count,
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|c| c.copy_rows(rows))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_columns(columns, rows.len()))
    }

    /// New frame holding the rows where `mask` is set.
    pub fn filter(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.row_count {
            return Err(Error::IndexOutOfRange {
                index: mask.len(),
                length: self.row_count,
            });
        }
        let rows: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();
        self.take(&rows)
    }

    /// 先頭n行を取得
    pub fn head(&self, n: usize) -> Result<Self> {
        let rows: Vec<usize> = (0..n.min(self.row_count)).collect();
        self.take(&rows)
    }

    /// Appends frames that share names and kinds, in the same column order.
    pub fn concat(frames: &[&DataFrame]) -> Result<Self> {
        let first = frames
            .first()
            .ok_or_else(|| Error::SchemaMismatch("cannot concatenate zero frames".to_string()))?;
        let schema = first.schema();
        for (i, frame) in frames.iter().enumerate().skip(1) {
            let other = frame.schema();
            if other != schema {
                return Err(Error::SchemaMismatch(format!(
                    "frame {} has schema {:?}, expected {:?}",
                    i, other, schema
                )));
            }
        }

        let columns = (0..first.columns.len())
            .map(|idx| {
                let parts: Vec<&Column> = frames.iter().map(|f| &f.columns[idx]).collect();
                Column::concat(&parts)
            })
            .collect::<Result<Vec<_>>>()?;
        let row_count = frames.iter().map(|f| f.row_count).sum();
        log::debug!(
            "concatenated {} frames into {} rows x {} columns",
            frames.len(),
            row_count,
            columns.len()
        );
        Ok(first.with_columns(columns, row_count))
    }

    /// Sorts every column by the values of `name`. Returns the applied
    /// permutation.
    pub fn sort_by(&mut self, name: &str, ascending: bool) -> Result<Vec<usize>> {
        let order = self.column(name)?.sort_order(ascending);
        for column in &mut self.columns {
            column.order(&order)?;
        }
        Ok(order)
    }

    /// Grows or shrinks every column, see [`Column::resize`].
    pub fn resize(&mut self, length: usize, keep_data: bool) {
        for column in &mut self.columns {
            column.resize(length, keep_data);
        }
        self.row_count = length;
    }

    /// Structural equality over names, order and column contents.
    pub fn equals(&self, other: &DataFrame) -> bool {
        self.column_names == other.column_names
            && self.row_count == other.row_count
            && self
                .columns
                .iter()
                .zip(&other.columns)
                .all(|(a, b)| a.equals(b))
    }

    /// Largest absolute difference between matching columns of two frames.
    ///
    /// The tolerance is this frame's `almost_equal_precision`. Columns are
    /// paired by name, so both frames must share the same schema. Text
    /// columns have no distance and fail with `UnsupportedKind`.
    pub fn assert_almost_equal(&self, other: &DataFrame, exc: bool) -> Result<f64> {
        if self.schema() != other.schema() {
            return Err(Error::SchemaMismatch(
                "frames compared for near-equality have different schemas".to_string(),
            ));
        }
        let precision = self.config.almost_equal_precision;
        let mut max_diff = 0.0f64;
        for (a, b) in self.columns.iter().zip(&other.columns) {
            max_diff = max_diff.max(a.assert_almost_equal(b, precision, exc)?);
        }
        Ok(max_diff)
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.column_indices
            .get(name)
            .copied()
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Frame with this frame's names and config over new columns.
    fn with_columns(&self, columns: Vec<Column>, row_count: usize) -> Self {
        debug_assert!(columns.iter().all(|c| c.len() == row_count));
        Self {
            columns,
            column_indices: self.column_indices.clone(),
            column_names: self.column_names.clone(),
            row_count,
            config: self.config.clone(),
        }
    }
}

impl PartialEq for DataFrame {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Scalar;
    use crate::na::NA;

    fn frame() -> DataFrame {
        let mut df = DataFrame::new();
        df.add_column("id", Column::from_vec(vec![3i32, 1, 2])).unwrap();
        df.add_column("score", Column::from_options(vec![Some(0.5f64), None, Some(1.5)]))
            .unwrap();
        df
    }

    #[test]
    fn test_add_column_checks_length_and_name() {
        let mut df = frame();
        assert!(matches!(
            df.add_column("x", Column::from_vec(vec![1i64])),
            Err(Error::ShapeMismatch { left: 3, right: 1 })
        ));
        assert!(matches!(
            df.add_column("id", Column::from_vec(vec![1i64, 2, 3])),
            Err(Error::DuplicateColumnName(_))
        ));
        assert_eq!(df.shape(), (3, 2));
    }

    #[test]
    fn test_sort_by_moves_whole_rows() {
        let mut df = frame();
        let order = df.sort_by("id", true).unwrap();
        assert_eq!(order, vec![1, 2, 0]);
        let score = df.column("score").unwrap();
        assert!(score.is_na(0).unwrap());
        assert_eq!(score.get(2).unwrap(), NA::Value(Scalar::Float64(0.5)));
    }

    #[test]
    fn test_resize_applies_to_every_column() {
        let mut df = frame();
        df.resize(5, true);
        assert_eq!(df.row_count(), 5);
        assert!(df.iter_columns().all(|(_, c)| c.len() == 5));
    }
}
