use std::fmt::{self, Debug, Display};

use crate::column::{Column, Scalar};
use crate::dataframe::DataFrame;
use crate::na::NA;

impl DataFrame {
    fn format_cell(&self, column: &Column, row: usize) -> String {
        let precision = self.config().float_precision;
        match column.value_at(row) {
            NA::NA => "NA".to_string(),
            NA::Value(Scalar::Float32(v)) => format!("{:.*}", precision, v),
            NA::Value(Scalar::Float64(v)) => format!("{:.*}", precision, v),
            NA::Value(Scalar::Text(v)) => format!("\"{}\"", v),
            NA::Value(v) => v.to_string(),
        }
    }
}

impl Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.shape();
        if cols == 0 {
            return write!(f, "DataFrame (0 rows x 0 columns)");
        }

        writeln!(f, "DataFrame ({} rows x {} columns):", rows, cols)?;

        // 列ヘッダー
        write!(f, "{:<5} |", "idx")?;
        for (name, column) in self.iter_columns() {
            write!(f, " {:<15} |", format!("{} ({:?})", name, column.kind()))?;
        }
        writeln!(f)?;

        // 区切り線
        write!(f, "{:-<5}-+", "")?;
        for _ in 0..cols {
            write!(f, "-{:-<15}-+", "")?;
        }
        writeln!(f)?;

        let max_rows = self.config().display_max_rows;
        for row in 0..rows.min(max_rows) {
            write!(f, "{:<5} |", row)?;
            for (_, column) in self.iter_columns() {
                write!(f, " {:<15} |", self.format_cell(column, row))?;
            }
            writeln!(f)?;
        }

        // 省略表示
        if rows > max_rows {
            writeln!(f, "... ({} more rows)", rows - max_rows)?;
        }
        Ok(())
    }
}

impl Debug for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::column::Column;
    use crate::config::FrameConfig;
    use crate::dataframe::DataFrame;

    #[test]
    fn test_display_truncates_and_rounds() {
        let mut df = DataFrame::new().with_config(FrameConfig::new().with_display_max_rows(2));
        df.add_column("x", Column::from_options(vec![Some(1.23456f64), None, Some(3.0)]))
            .unwrap();
        let text = df.to_string();
        assert!(text.starts_with("DataFrame (3 rows x 1 columns):"));
        assert!(text.contains("1.235"));
        assert!(text.contains("NA"));
        assert!(text.contains("... (1 more rows)"));
    }
}
