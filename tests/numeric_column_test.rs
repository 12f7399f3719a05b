use colframe::error::{Error, Result};
use colframe::{AggregatedFunction, Column, Kind, NumericColumn, Scalar, NA};

#[test]
fn test_aggregate_and_filter_scenario() -> Result<()> {
    let col = Column::from_vec(vec![1i32, 2, 3, 4]);
    let view = NumericColumn::new(&col);

    assert_eq!(view.aggregate(AggregatedFunction::Sum, None)?, NA::Value(Scalar::Int64(10)));
    assert_eq!(view.aggregate(AggregatedFunction::Mean, None)?, NA::Value(Scalar::Float64(2.5)));
    assert_eq!(view.filter(|x: &i32| *x > 2)?, vec![false, false, true, true]);
    Ok(())
}

#[test]
fn test_named_operators_return_new_columns() -> Result<()> {
    let a = Column::from_vec(vec![1i32, 2, 3]);
    let b = Column::from_vec(vec![3i32, 2, 1]);
    let (va, vb) = (NumericColumn::new(&a), NumericColumn::new(&b));

    let sum = va.add(&vb)?;
    assert!(sum.is_owned());
    assert!(sum.structural_equals(&NumericColumn::from_column(Column::from_vec(vec![4i32, 4, 4]))));

    let gt = va.gt(&vb)?;
    assert_eq!(gt.kind(), Kind::Bool);
    assert_eq!(gt.to_mask()?, vec![false, false, true]);

    let eq = va.eq(2i32)?;
    assert_eq!(eq.to_mask()?, vec![false, true, false]);

    let both = gt.or(&eq)?.and(true)?;
    assert_eq!(both.to_mask()?, vec![false, true, true]);
    assert_eq!(both.not()?.to_mask()?, vec![true, false, false]);

    assert_eq!(va.sub(1i32)?.get(0)?, NA::Value(Scalar::Int32(0)));
    assert_eq!(va.mul(2.0f64)?.get(2)?, NA::Value(Scalar::Float64(6.0)));
    assert_eq!(va.div(&vb)?.get(2)?, NA::Value(Scalar::Int32(3)));
    assert_eq!(va.neg()?.get(1)?, NA::Value(Scalar::Int32(-2)));
    assert_eq!(va.ne(&vb)?.to_mask()?, vec![true, false, true]);
    assert_eq!(va.le(2i32)?.to_mask()?, vec![true, true, false]);
    assert_eq!(va.lt(2i32)?.to_mask()?, vec![true, false, false]);
    assert_eq!(va.ge(2i32)?.to_mask()?, vec![false, true, true]);

    // 元の列は変更されない
    assert_eq!(a, Column::from_vec(vec![1i32, 2, 3]));
    Ok(())
}

#[test]
fn test_operator_sugar() -> Result<()> {
    let a = NumericColumn::from_column(Column::from_vec(vec![2.0f64, 4.0]));
    let b = NumericColumn::from_column(Column::from_vec(vec![1.0f64, 2.0]));
    let quotient = (&a / &b)?;
    assert_eq!(quotient.get(1)?, NA::Value(Scalar::Float64(2.0)));
    let shifted = (&a + 1.0f64)?;
    assert_eq!(shifted.get(0)?, NA::Value(Scalar::Float64(3.0)));
    let negated = (-&a)?;
    assert_eq!(negated.get(0)?, NA::Value(Scalar::Float64(-2.0)));
    Ok(())
}

#[test]
fn test_apply_skips_na_rows() -> Result<()> {
    let col = Column::from_options(vec![Some(1i32), None, Some(3)]);
    let view = NumericColumn::new(&col);
    let mut calls = 0;
    let out = view.apply(|x: &i32| {
        calls += 1;
        format!("#{}", x)
    })?;
    assert_eq!(calls, 2);
    assert_eq!(out.kind(), Kind::Text);
    assert_eq!(out.get(2)?, NA::Value(Scalar::Text("#3".to_string())));
    assert!(out.get(1)?.is_na());
    Ok(())
}

#[test]
fn test_filter_rejects_wrong_kind() {
    let col = Column::from_vec(vec![1.0f64]);
    let view = NumericColumn::new(&col);
    assert!(matches!(
        view.filter(|x: &i32| *x > 0),
        Err(Error::UnsupportedKind { .. })
    ));
}

#[test]
fn test_filter_na_rows_are_false() -> Result<()> {
    let col = Column::from_options(vec![None, Some(5i64)]);
    let mask = NumericColumn::new(&col).filter(|_: &i64| true)?;
    assert_eq!(mask, vec![false, true]);
    Ok(())
}

#[test]
fn test_pairwise_and_slice_aggregates() -> Result<()> {
    let col = Column::from_options(vec![Some(5i64), None, Some(3), Some(2)]);
    let view = NumericColumn::new(&col);

    // 左から順に適用される
    let folded = view.aggregate_pairwise(|acc: i64, x: i64| acc - x, None)?;
    assert_eq!(folded, NA::Value(0));
    let subset = view.aggregate_pairwise(|acc: i64, x: i64| acc * x, Some(&[3, 0][..]))?;
    assert_eq!(subset, NA::Value(10));
    let empty = view.aggregate_pairwise(|acc: i64, x: i64| acc + x, Some(&[1][..]))?;
    assert!(empty.is_na());

    let longest = view.aggregate_slice(|xs: &[i64]| xs.len() as i64, None)?;
    assert_eq!(longest, 3);
    Ok(())
}

#[test]
fn test_builtin_aggregates_by_kind() -> Result<()> {
    let floats = Column::from_options(vec![Some(1.0f32), Some(f32::NAN), None, Some(-2.0)]);
    let view = NumericColumn::new(&floats);
    assert_eq!(view.aggregate(AggregatedFunction::Count, None)?, NA::Value(Scalar::Int64(3)));
    assert_eq!(view.aggregate(AggregatedFunction::Min, None)?, NA::Value(Scalar::Float32(-2.0)));
    assert_eq!(view.aggregate(AggregatedFunction::Max, None)?, NA::Value(Scalar::Float32(1.0)));

    let ints = Column::from_vec(vec![2i32, 4, 4, 4, 5, 5, 7, 9]);
    let std = NumericColumn::new(&ints).aggregate(AggregatedFunction::Std, None)?;
    let std = std.into_option().and_then(|s| s.as_f64()).unwrap();
    assert!((std - 2.138089935).abs() < 1e-6);

    let big = Column::from_vec(vec![i64::MAX, 1]);
    assert!(matches!(
        NumericColumn::new(&big).aggregate(AggregatedFunction::Sum, None),
        Err(Error::ConversionOverflow { .. })
    ));

    let text = Column::from_vec(vec!["a".to_string()]);
    let text = NumericColumn::new(&text);
    assert!(matches!(
        text.aggregate(AggregatedFunction::Mean, None),
        Err(Error::UnsupportedKind { .. })
    ));
    assert_eq!(text.aggregate(AggregatedFunction::Max, None)?, NA::Value(Scalar::Text("a".to_string())));
    Ok(())
}

#[test]
fn test_mutation_detaches_borrowed_view() -> Result<()> {
    let col = Column::from_vec(vec![3i32, 1, 2]);
    let mut view = NumericColumn::new(&col);
    assert!(!view.is_owned());

    let order = view.sort(true);
    assert_eq!(order, vec![1, 2, 0]);
    assert!(view.is_owned());
    assert_eq!(view.get(0)?, NA::Value(Scalar::Int32(1)));
    assert_eq!(col.get(0)?, NA::Value(Scalar::Int32(3)));
    Ok(())
}

#[test]
fn test_copy_is_independent() -> Result<()> {
    let col = Column::from_vec(vec![1i64, 2]);
    let view = NumericColumn::new(&col);
    let mut copy = view.copy();
    copy.resize(3, true);
    assert_eq!(copy.len(), 3);
    assert_eq!(view.len(), 2);
    assert!(copy.get(2)?.is_na());
    Ok(())
}

#[test]
fn test_as_type_and_concat_delegate() -> Result<()> {
    let a = NumericColumn::from_column(Column::from_vec(vec![1i32, 2]));
    let b = NumericColumn::from_column(Column::from_vec(vec![3i32]));
    let both = NumericColumn::concat(&[&a, &b])?;
    assert_eq!(both.len(), 3);

    let wide = both.as_type(Kind::Float64)?;
    assert_eq!(wide.get(2)?, NA::Value(Scalar::Float64(3.0)));
    assert_eq!(wide.assert_almost_equal(&both, 0.0, true)?, 0.0);

    let mut ordered = wide.copy();
    ordered.order(&[2, 1, 0])?;
    assert_eq!(ordered.sort_order(true), vec![2, 1, 0]);
    let rows = ordered.copy_rows(&[0, 0])?;
    assert_eq!(rows.get(1)?, NA::Value(Scalar::Float64(3.0)));
    Ok(())
}
