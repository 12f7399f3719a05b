use thiserror::Error;

use crate::column::Kind;

/// エラー型の定義
#[derive(Error, Debug)]
pub enum Error {
    #[error("shape mismatch: left has {left} rows, right has {right} rows")]
    ShapeMismatch { left: usize, right: usize },

    #[error("unsupported kind for {operation}: {kinds}")]
    UnsupportedKind { operation: String, kinds: String },

    #[error("cannot represent {value} as {target:?}")]
    ConversionOverflow { value: String, target: Kind },

    #[error("index out of range: index {index}, length {length}")]
    IndexOutOfRange { index: usize, length: usize },

    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),

    #[error("integer division by zero at row {row}")]
    DivisionByZero { row: usize },

    #[error("columns differ by {difference} which exceeds precision {precision}")]
    ToleranceExceeded { difference: f64, precision: f64 },

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error")]
    Io(#[source] std::io::Error),
}

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn unsupported(operation: impl Into<String>, kinds: &[Kind]) -> Self {
        let kinds = kinds
            .iter()
            .map(|k| format!("{:?}", k))
            .collect::<Vec<_>>()
            .join(", ");
        Error::UnsupportedKind {
            operation: operation.into(),
            kinds,
        }
    }

    pub(crate) fn overflow(value: impl ToString, target: Kind) -> Self {
        Error::ConversionOverflow {
            value: value.to_string(),
            target,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}
