//! Kind conversions.
//!
//! Two flavours exist. `as_type` is checked: a value that cannot be
//! represented exactly in the target kind is an error, and unparsable text
//! becomes NA. Promotion (`promote_to`) only moves up the kind lattice and
//! follows the usual numeric widening, possibly rounding large integers
//! into floats; it backs operator dispatch and concatenation.

use std::borrow::Cow;
use std::num::IntErrorKind;

use num_traits::ToPrimitive;

use crate::column::{Column, ColumnData, Kind, Scalar};
use crate::error::{Error, Result};
use crate::na::NA;

impl Column {
    /// Converts every element to `target`.
    pub fn as_type(&self, target: Kind) -> Result<Column> {
        if target == self.kind() {
            return Ok(self.copy());
        }

        let mut data = ColumnData::filled(target, self.len());
        let mut na = self.na.clone();
        let mut unparsed = 0usize;
        for row in 0..self.len() {
            if self.na.get(row) {
                continue;
            }
            match convert_scalar(self.data.scalar_at(row), target)? {
                NA::Value(v) => data.write(row, v),
                NA::NA => {
                    if self.kind() == Kind::Text {
                        unparsed += 1;
                    }
                    na.set(row, true);
                }
            }
        }
        if unparsed > 0 {
            log::warn!(
                "{} text value(s) could not be parsed as {:?} and became NA",
                unparsed,
                target
            );
        }
        Column::from_parts(data, na)
    }

    /// Store widened to `target`, borrowed when no conversion is needed.
    pub(crate) fn promote_to(&self, target: Kind) -> Result<Cow<'_, ColumnData>> {
        promote_data(&self.data, target)
            .ok_or_else(|| Error::unsupported("promotion", &[self.kind(), target]))
    }
}

/// Checked conversion of one value.
pub(crate) fn convert_scalar(value: Scalar, target: Kind) -> Result<NA<Scalar>> {
    if value.kind() == target {
        return Ok(NA::Value(value));
    }
    if target == Kind::Text {
        return Ok(NA::Value(Scalar::Text(value.to_string())));
    }

    let converted = match value {
        Scalar::Bool(b) => from_integer(b as i64, target)?,
        Scalar::Int32(v) => from_integer(v as i64, target)?,
        Scalar::Int64(v) => from_integer(v, target)?,
        Scalar::Float32(v) => from_float(v as f64, true, target)?,
        Scalar::Float64(v) => from_float(v, false, target)?,
        Scalar::Text(s) => return parse_text(&s, target),
    };
    Ok(converted)
}

fn from_integer(v: i64, target: Kind) -> Result<NA<Scalar>> {
    let out = match target {
        Kind::Bool => match v {
            0 => Some(Scalar::Bool(false)),
            1 => Some(Scalar::Bool(true)),
            _ => None,
        },
        Kind::Int32 => v.to_i32().map(Scalar::Int32),
        Kind::Int64 => Some(Scalar::Int64(v)),
        Kind::Float32 => {
            let f = v as f32;
            (f as i128 == v as i128).then_some(Scalar::Float32(f))
        }
        Kind::Float64 => {
            let f = v as f64;
            (f as i128 == v as i128).then_some(Scalar::Float64(f))
        }
        Kind::Text => Some(Scalar::Text(v.to_string())),
    };
    out.map(NA::Value).ok_or_else(|| Error::overflow(v, target))
}

fn from_float(v: f64, single: bool, target: Kind) -> Result<NA<Scalar>> {
    if v.is_nan() && !target.is_float() {
        return Ok(NA::NA);
    }
    let integral = v.fract() == 0.0;
    let out = match target {
        Kind::Bool if v == 0.0 => Some(Scalar::Bool(false)),
        Kind::Bool if v == 1.0 => Some(Scalar::Bool(true)),
        Kind::Bool => None,
        Kind::Int32 if integral => v.to_i32().map(Scalar::Int32),
        Kind::Int64 if integral => v.to_i64().map(Scalar::Int64),
        Kind::Int32 | Kind::Int64 => None,
        Kind::Float32 => {
            let f = v as f32;
            (single || !v.is_finite() || f as f64 == v).then_some(Scalar::Float32(f))
        }
        Kind::Float64 => Some(Scalar::Float64(v)),
        Kind::Text => Some(Scalar::Text(v.to_string())),
    };
    out.map(NA::Value).ok_or_else(|| Error::overflow(v, target))
}

/// Unparsable text is NA. Text holding a number outside the range of
/// `target` is an overflow, as for any other narrowing.
fn parse_text(s: &str, target: Kind) -> Result<NA<Scalar>> {
    let s = s.trim();
    match target {
        Kind::Bool => {
            let parsed = if s.eq_ignore_ascii_case("true") {
                Some(Scalar::Bool(true))
            } else if s.eq_ignore_ascii_case("false") {
                Some(Scalar::Bool(false))
            } else {
                None
            };
            Ok(parsed.into())
        }
        Kind::Int32 | Kind::Int64 => match s.parse::<i64>() {
            Ok(v) => from_integer(v, target),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    Err(Error::overflow(s, target))
                }
                _ => Ok(NA::NA),
            },
        },
        Kind::Float32 => match s.parse::<f32>() {
            Ok(v) if v.is_infinite() && !names_infinity(s) => Err(Error::overflow(s, target)),
            Ok(v) => Ok(NA::Value(Scalar::Float32(v))),
            Err(_) => Ok(NA::NA),
        },
        Kind::Float64 => match s.parse::<f64>() {
            Ok(v) if v.is_infinite() && !names_infinity(s) => Err(Error::overflow(s, target)),
            Ok(v) => Ok(NA::Value(Scalar::Float64(v))),
            Err(_) => Ok(NA::NA),
        },
        Kind::Text => Ok(NA::Value(Scalar::Text(s.to_string()))),
    }
}

// "inf", "-Infinity", ...
fn names_infinity(s: &str) -> bool {
    s.trim_start_matches(['+', '-'])
        .to_ascii_lowercase()
        .starts_with("inf")
}

fn widen<S: Copy, D>(values: &[S], f: impl Fn(S) -> D) -> Vec<D> {
    values.iter().map(|&v| f(v)).collect()
}

fn stringify<S: ToString>(values: &[S]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Widens `data` to `target`; `None` when `target` is below `data`'s kind.
pub(crate) fn promote_data(data: &ColumnData, target: Kind) -> Option<Cow<'_, ColumnData>> {
    use ColumnData as D;

    if data.kind() == target {
        return Some(Cow::Borrowed(data));
    }
    let out = match (data, target) {
        (D::Bool(v), Kind::Int32) => D::Int32(widen(v, i32::from)),
        (D::Bool(v), Kind::Int64) => D::Int64(widen(v, i64::from)),
        (D::Bool(v), Kind::Float32) => D::Float32(widen(v, |b| if b { 1.0 } else { 0.0 })),
        (D::Bool(v), Kind::Float64) => D::Float64(widen(v, |b| if b { 1.0 } else { 0.0 })),
        (D::Int32(v), Kind::Int64) => D::Int64(widen(v, i64::from)),
        (D::Int32(v), Kind::Float32) => D::Float32(widen(v, |x| x as f32)),
        (D::Int32(v), Kind::Float64) => D::Float64(widen(v, f64::from)),
        (D::Int64(v), Kind::Float32) => D::Float32(widen(v, |x| x as f32)),
        (D::Int64(v), Kind::Float64) => D::Float64(widen(v, |x| x as f64)),
        (D::Float32(v), Kind::Float64) => D::Float64(widen(v, f64::from)),
        (D::Bool(v), Kind::Text) => D::Text(stringify(v)),
        (D::Int32(v), Kind::Text) => D::Text(stringify(v)),
        (D::Int64(v), Kind::Text) => D::Text(stringify(v)),
        (D::Float32(v), Kind::Text) => D::Text(stringify(v)),
        (D::Float64(v), Kind::Text) => D::Text(stringify(v)),
        _ => return None,
    };
    Some(Cow::Owned(out))
}

/// Widens a single value to `target`.
pub(crate) fn promote_scalar(value: &Scalar, target: Kind) -> Option<Scalar> {
    let data = match value.clone() {
        Scalar::Bool(v) => ColumnData::Bool(vec![v]),
        Scalar::Int32(v) => ColumnData::Int32(vec![v]),
        Scalar::Int64(v) => ColumnData::Int64(vec![v]),
        Scalar::Float32(v) => ColumnData::Float32(vec![v]),
        Scalar::Float64(v) => ColumnData::Float64(vec![v]),
        Scalar::Text(v) => ColumnData::Text(vec![v]),
    };
    promote_data(&data, target).map(|d| d.scalar_at(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_to_int_requires_integral_value() {
        assert!(convert_scalar(Scalar::Float64(2.0), Kind::Int32).is_ok());
        assert!(matches!(
            convert_scalar(Scalar::Float64(2.5), Kind::Int32),
            Err(Error::ConversionOverflow { .. })
        ));
        assert!(matches!(
            convert_scalar(Scalar::Float64(f64::INFINITY), Kind::Int64),
            Err(Error::ConversionOverflow { .. })
        ));
    }

    #[test]
    fn test_nan_to_integer_is_missing() {
        let out = convert_scalar(Scalar::Float32(f32::NAN), Kind::Int64).unwrap();
        assert!(out.is_na());
    }

    #[test]
    fn test_large_integer_to_float32_overflows() {
        assert!(convert_scalar(Scalar::Int32(16_777_216), Kind::Float32).is_ok());
        assert!(convert_scalar(Scalar::Int32(16_777_217), Kind::Float32).is_err());
        assert!(convert_scalar(Scalar::Int64(i64::MAX), Kind::Float64).is_err());
    }

    #[test]
    fn test_promote_scalar_widens_only() {
        assert_eq!(
            promote_scalar(&Scalar::Int32(3), Kind::Float64),
            Some(Scalar::Float64(3.0))
        );
        assert_eq!(
            promote_scalar(&Scalar::Bool(true), Kind::Text),
            Some(Scalar::Text("true".to_string()))
        );
        assert_eq!(promote_scalar(&Scalar::Float64(1.0), Kind::Int32), None);
    }
}
