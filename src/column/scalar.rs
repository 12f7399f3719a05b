use std::fmt::{self, Display};

use crate::column::Kind;
use crate::na::NA;

/// A single value of any column kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Text(String),
}

impl Scalar {
    pub fn kind(&self) -> Kind {
        match self {
            Scalar::Bool(_) => Kind::Bool,
            Scalar::Int32(_) => Kind::Int32,
            Scalar::Int64(_) => Kind::Int64,
            Scalar::Float32(_) => Kind::Float32,
            Scalar::Float64(_) => Kind::Float64,
            Scalar::Text(_) => Kind::Text,
        }
    }

    /// Numeric view used by distances and means. Text has none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            Scalar::Int32(v) => Some(*v as f64),
            Scalar::Int64(v) => Some(*v as f64),
            Scalar::Float32(v) => Some(*v as f64),
            Scalar::Float64(v) => Some(*v),
            Scalar::Text(_) => None,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Int32(v) => write!(f, "{}", v),
            Scalar::Int64(v) => write!(f, "{}", v),
            Scalar::Float32(v) => write!(f, "{}", v),
            Scalar::Float64(v) => write!(f, "{}", v),
            Scalar::Text(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_scalar_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Scalar {
                fn from(value: $t) -> Self {
                    Scalar::$variant(value)
                }
            }

            impl From<$t> for NA<Scalar> {
                fn from(value: $t) -> Self {
                    NA::Value(Scalar::$variant(value))
                }
            }
        )*
    };
}

impl_scalar_from!(
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => Text,
);

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<&str> for NA<Scalar> {
    fn from(value: &str) -> Self {
        NA::Value(Scalar::Text(value.to_string()))
    }
}
