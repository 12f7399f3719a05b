use std::cmp::Ordering;

use crate::column::{with_data, BitMask, Column};
use crate::error::{Error, Result};

impl Column {
    /// Stable permutation that orders the column.
    ///
    /// `order[i]` is the source row that lands at position `i`. NA rows go
    /// last in both directions; NaN values sit between the numbers and NA.
    /// The column itself is not modified.
    pub fn sort_order(&self, ascending: bool) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        with_data!(&self.data, v => order.sort_by(|&a, &b| compare_rows(v, &self.na, a, b, ascending)));
        order
    }

    /// Sorts in place and returns the permutation that was applied.
    pub fn sort(&mut self, ascending: bool) -> Vec<usize> {
        let order = self.sort_order(ascending);
        self.data = self.data.take(&order);
        self.na = self.na.take(&order);
        order
    }

    /// Reorders the rows so that row `i` becomes former row `order[i]`.
    ///
    /// `order` must be a bijection on `0..len()`.
    pub fn order(&mut self, order: &[usize]) -> Result<()> {
        check_permutation(order, self.len())?;
        self.data = self.data.take(order);
        self.na = self.na.take(order);
        Ok(())
    }
}

/// Inverse of a permutation: applying it after `order` restores the
/// original row positions.
pub fn invert_permutation(order: &[usize]) -> Result<Vec<usize>> {
    check_permutation(order, order.len())?;
    let mut inverse = vec![0; order.len()];
    for (position, &row) in order.iter().enumerate() {
        inverse[row] = position;
    }
    Ok(inverse)
}

fn check_permutation(order: &[usize], length: usize) -> Result<()> {
    if order.len() != length {
        return Err(Error::InvalidPermutation(format!(
            "expected {} positions, got {}",
            length,
            order.len()
        )));
    }
    let mut seen = vec![false; length];
    for &row in order {
        if row >= length {
            return Err(Error::InvalidPermutation(format!(
                "row {} is outside 0..{}",
                row, length
            )));
        }
        if std::mem::replace(&mut seen[row], true) {
            return Err(Error::InvalidPermutation(format!("row {} appears twice", row)));
        }
    }
    Ok(())
}

#[allow(clippy::eq_op)]
fn rank<T: PartialOrd>(values: &[T], na: &BitMask, row: usize) -> u8 {
    if na.get(row) {
        2
    } else if values[row] != values[row] {
        1
    } else {
        0
    }
}

fn compare_rows<T: PartialOrd>(values: &[T], na: &BitMask, a: usize, b: usize, ascending: bool) -> Ordering {
    match rank(values, na, a).cmp(&rank(values, na, b)) {
        Ordering::Equal if rank(values, na, a) == 0 => {
            let ord = values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }
        ord => ord,
    }
}
