//! Operator-bearing view over a column.

use std::borrow::Cow;
use std::ops;

use crate::column::{AggregatedFunction, Column, GetterAt, Kind, Mask, Primitive, Scalar};
use crate::error::Result;
use crate::na::NA;
use crate::ops::{binary, unary, BinaryOp, Operand, UnaryOp};

/// Wraps exactly one [`Column`] and exposes named vectorized operators.
///
/// A view created with [`NumericColumn::new`] borrows its column, so the
/// column cannot be mutated elsewhere while the view is alive. Operator
/// results own their storage. Mutating methods called on a borrowed view
/// first move it onto private storage; use [`NumericColumn::copy`] to get an
/// independent column explicitly.
#[derive(Debug, Clone)]
pub struct NumericColumn<'a> {
    column: Cow<'a, Column>,
}

impl<'a> NumericColumn<'a> {
    /// Borrowing view.
    pub fn new(column: &'a Column) -> Self {
        Self {
            column: Cow::Borrowed(column),
        }
    }

    /// View that owns `column`.
    pub fn from_column(column: Column) -> NumericColumn<'static> {
        NumericColumn {
            column: Cow::Owned(column),
        }
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn into_column(self) -> Column {
        self.column.into_owned()
    }

    /// Whether this view owns its storage.
    pub fn is_owned(&self) -> bool {
        matches!(self.column, Cow::Owned(_))
    }

    pub fn len(&self) -> usize {
        self.column.len()
    }

    pub fn is_empty(&self) -> bool {
        self.column.is_empty()
    }

    pub fn kind(&self) -> Kind {
        self.column.kind()
    }

    pub fn get(&self, row: usize) -> Result<NA<Scalar>> {
        self.column.get(row)
    }

    pub fn getter_at<T: Primitive>(&self) -> Result<GetterAt<'_, T>> {
        self.column.getter_at()
    }

    /// Deep copy with independent storage.
    pub fn copy(&self) -> NumericColumn<'static> {
        NumericColumn::from_column(self.column.copy())
    }

    pub fn copy_rows(&self, rows: &[usize]) -> Result<NumericColumn<'static>> {
        self.column.copy_rows(rows).map(NumericColumn::from_column)
    }

    /// Exact structural comparison, see [`Column::equals`].
    pub fn structural_equals(&self, other: &NumericColumn<'_>) -> bool {
        self.column.equals(&other.column)
    }

    pub fn assert_almost_equal(&self, other: &NumericColumn<'_>, precision: f64, exc: bool) -> Result<f64> {
        self.column.assert_almost_equal(&other.column, precision, exc)
    }

    pub fn add<'b>(&self, rhs: impl Into<Operand<'b>>) -> Result<NumericColumn<'static>> {
        self.binary(BinaryOp::Add, rhs)
    }

    pub fn sub<'b>(&self, rhs: impl Into<Operand<'b>>) -> Result<NumericColumn<'static>> {
        self.binary(BinaryOp::Sub, rhs)
    }

    pub fn mul<'b>(&self, rhs: impl Into<Operand<'b>>) -> Result<NumericColumn<'static>> {
        self.binary(BinaryOp::Mul, rhs)
    }

    pub fn div<'b>(&self, rhs: impl Into<Operand<'b>>) -> Result<NumericColumn<'static>> {
        self.binary(BinaryOp::Div, rhs)
    }

    /// Elementwise `==`; the result is a Bool column, not a structural
    /// comparison.
    pub fn eq<'b>(&self, rhs: impl Into<Operand<'b>>) -> Result<NumericColumn<'static>> {
        self.binary(BinaryOp::Eq, rhs)
    }

    pub fn ne<'b>(&self, rhs: impl Into<Operand<'b>>) -> Result<NumericColumn<'static>> {
        self.binary(BinaryOp::Ne, rhs)
    }

    pub fn lt<'b>(&self, rhs: impl Into<Operand<'b>>) -> Result<NumericColumn<'static>> {
        self.binary(BinaryOp::Lt, rhs)
    }

    pub fn le<'b>(&self, rhs: impl Into<Operand<'b>>) -> Result<NumericColumn<'static>> {
        self.binary(BinaryOp::Le, rhs)
    }

    pub fn gt<'b>(&self, rhs: impl Into<Operand<'b>>) -> Result<NumericColumn<'static>> {
        self.binary(BinaryOp::Gt, rhs)
    }

    pub fn ge<'b>(&self, rhs: impl Into<Operand<'b>>) -> Result<NumericColumn<'static>> {
        self.binary(BinaryOp::Ge, rhs)
    }

    pub fn and<'b>(&self, rhs: impl Into<Operand<'b>>) -> Result<NumericColumn<'static>> {
        self.binary(BinaryOp::And, rhs)
    }

    pub fn or<'b>(&self, rhs: impl Into<Operand<'b>>) -> Result<NumericColumn<'static>> {
        self.binary(BinaryOp::Or, rhs)
    }

    pub fn neg(&self) -> Result<NumericColumn<'static>> {
        unary(UnaryOp::Neg, &self.column).map(NumericColumn::from_column)
    }

    pub fn not(&self) -> Result<NumericColumn<'static>> {
        unary(UnaryOp::Not, &self.column).map(NumericColumn::from_column)
    }

    fn binary<'b>(&self, op: BinaryOp, rhs: impl Into<Operand<'b>>) -> Result<NumericColumn<'static>> {
        binary(op, &*self.column, rhs).map(NumericColumn::from_column)
    }

    /// Maps every non-NA value through `mapper`; NA rows stay NA and are not
    /// passed to `mapper`.
    pub fn apply<S, D, F>(&self, mut mapper: F) -> Result<NumericColumn<'static>>
    where
        S: Primitive,
        D: Primitive,
        F: FnMut(&S) -> D,
    {
        let getter = self.column.getter_at::<S>()?;
        let mut out = Vec::with_capacity(self.len());
        for row in 0..self.len() {
            out.push(match getter.get(row)? {
                NA::Value(v) => mapper(v),
                NA::NA => D::default(),
            });
        }
        let column = Column::from_parts(D::wrap(out), self.column.na_mask().clone())?;
        Ok(NumericColumn::from_column(column))
    }

    /// One flag per row telling whether `predicate` holds. NA rows are
    /// `false` and are not passed to `predicate`.
    pub fn filter<S, F>(&self, mut predicate: F) -> Result<Mask>
    where
        S: Primitive,
        F: FnMut(&S) -> bool,
    {
        let getter = self.column.getter_at::<S>()?;
        (0..self.len())
            .map(|row| Ok(getter.get(row)?.map(&mut predicate).into_option().unwrap_or(false)))
            .collect()
    }

    pub fn aggregate(&self, func: AggregatedFunction, rows: Option<&[usize]>) -> Result<NA<Scalar>> {
        self.column.aggregate(func, rows)
    }

    pub fn aggregate_pairwise<T, F>(&self, f: F, rows: Option<&[usize]>) -> Result<NA<T>>
    where
        T: Primitive,
        F: FnMut(T, T) -> T,
    {
        self.column.aggregate_pairwise(f, rows)
    }

    pub fn aggregate_slice<T, F>(&self, f: F, rows: Option<&[usize]>) -> Result<T>
    where
        T: Primitive,
        F: FnOnce(&[T]) -> T,
    {
        self.column.aggregate_slice(f, rows)
    }

    pub fn sort_order(&self, ascending: bool) -> Vec<usize> {
        self.column.sort_order(ascending)
    }

    pub fn sort(&mut self, ascending: bool) -> Vec<usize> {
        self.column.to_mut().sort(ascending)
    }

    pub fn order(&mut self, order: &[usize]) -> Result<()> {
        self.column.to_mut().order(order)
    }

    pub fn resize(&mut self, length: usize, keep_data: bool) {
        self.column.to_mut().resize(length, keep_data)
    }

    pub fn as_type(&self, kind: Kind) -> Result<NumericColumn<'static>> {
        self.column.as_type(kind).map(NumericColumn::from_column)
    }

    /// Bool view as a selection mask; NA rows are not selected.
    pub fn to_mask(&self) -> Result<Mask> {
        self.column.to_mask()
    }

    pub fn concat(columns: &[&NumericColumn<'_>]) -> Result<NumericColumn<'static>> {
        let inner: Vec<&Column> = columns.iter().map(|c| c.column()).collect();
        Column::concat(&inner).map(NumericColumn::from_column)
    }
}

impl<'b> From<&'b NumericColumn<'_>> for Operand<'b> {
    fn from(column: &'b NumericColumn<'_>) -> Self {
        Operand::Column(column.column())
    }
}

impl From<Column> for NumericColumn<'static> {
    fn from(column: Column) -> Self {
        NumericColumn::from_column(column)
    }
}

macro_rules! impl_operator_sugar {
    ($($trait:ident :: $method:ident => $named:ident),*) => {
        $(
            impl<'a, 'b, R: Into<Operand<'b>>> ops::$trait<R> for &NumericColumn<'a> {
                type Output = Result<NumericColumn<'static>>;

                fn $method(self, rhs: R) -> Self::Output {
                    NumericColumn::$named(self, rhs)
                }
            }
        )*
    };
}

impl_operator_sugar!(
    Add::add => add,
    Sub::sub => sub,
    Mul::mul => mul,
    Div::div => div,
    BitAnd::bitand => and,
    BitOr::bitor => or
);

impl ops::Neg for &NumericColumn<'_> {
    type Output = Result<NumericColumn<'static>>;

    fn neg(self) -> Self::Output {
        NumericColumn::neg(self)
    }
}

impl ops::Not for &NumericColumn<'_> {
    type Output = Result<NumericColumn<'static>>;

    fn not(self) -> Self::Output {
        NumericColumn::not(self)
    }
}
