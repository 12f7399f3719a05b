use colframe::error::{Error, Result};
use colframe::{BinaryOp, Column, DataFrame, Kind, Scalar, NA};

fn sample_frame() -> Result<DataFrame> {
    let mut df = DataFrame::new();
    df.add_column("id", Column::from_vec(vec![1i32, 2, 3, 4]))?;
    df.add_column(
        "name",
        Column::from_vec(vec!["a", "b", "c", "d"].into_iter().map(String::from).collect::<Vec<_>>()),
    )?;
    df.add_column("score", Column::from_options(vec![Some(0.5f64), None, Some(2.5), Some(1.0)]))?;
    Ok(df)
}

#[test]
fn test_structure() -> Result<()> {
    let df = sample_frame()?;
    assert_eq!(df.shape(), (4, 3));
    assert_eq!(df.row_count(), 4);
    assert_eq!(df.column_count(), 3);
    assert_eq!(df.column_names(), &["id", "name", "score"]);
    assert_eq!(
        df.schema(),
        vec![
            ("id".to_string(), Kind::Int32),
            ("name".to_string(), Kind::Text),
            ("score".to_string(), Kind::Float64),
        ]
    );
    assert!(df.contains_column("name"));
    assert!(matches!(df.column("missing"), Err(Error::ColumnNotFound(_))));
    Ok(())
}

#[test]
fn test_copy_shares_no_storage() -> Result<()> {
    let df = sample_frame()?;
    let mut copy = df.copy();
    assert!(copy.equals(&df));

    let mut id = copy.column("id")?.copy();
    id.set(0, 100i32)?;
    copy.replace_column("id", id)?;
    assert_eq!(df.column("id")?.get(0)?, NA::Value(Scalar::Int32(1)));
    assert!(!copy.equals(&df));
    Ok(())
}

#[test]
fn test_replace_column_checks_length() -> Result<()> {
    let mut df = sample_frame()?;
    assert!(matches!(
        df.replace_column("id", Column::from_vec(vec![1i32])),
        Err(Error::ShapeMismatch { .. })
    ));
    let old = df.replace_column("id", Column::from_vec(vec![9i64, 8, 7, 6]))?;
    assert_eq!(old.kind(), Kind::Int32);
    assert_eq!(df.column("id")?.kind(), Kind::Int64);
    Ok(())
}

#[test]
fn test_take_with_duplicates_and_reordering() -> Result<()> {
    let df = sample_frame()?;
    let picked = df.take(&[3, 1, 1])?;
    assert_eq!(picked.row_count(), 3);
    assert_eq!(picked.column("id")?.get(0)?, NA::Value(Scalar::Int32(4)));
    assert_eq!(picked.column("name")?.get(2)?, NA::Value(Scalar::Text("b".to_string())));
    assert!(picked.column("score")?.is_na(1)?);

    assert!(matches!(df.take(&[4]), Err(Error::IndexOutOfRange { index: 4, length: 4 })));
    Ok(())
}

#[test]
fn test_filter_by_comparison_mask() -> Result<()> {
    let df = sample_frame()?;
    // score > 0.9 の行を選択（NA は選ばれない）
    let mask = df.numeric("score")?.gt(0.9f64)?.to_mask()?;
    let filtered = df.filter(&mask)?;
    assert_eq!(filtered.row_count(), 2);
    assert_eq!(filtered.column("id")?, &Column::from_vec(vec![3i32, 4]));

    assert!(df.filter(&[true]).is_err());
    Ok(())
}

#[test]
fn test_concat_frames() -> Result<()> {
    let a = sample_frame()?;
    let b = a.head(2)?;
    let both = DataFrame::concat(&[&a, &b])?;
    assert_eq!(both.row_count(), 6);
    assert_eq!(both.column("id")?.get(4)?, NA::Value(Scalar::Int32(1)));
    assert!(both.column("score")?.is_na(5)?);
    Ok(())
}

#[test]
fn test_concat_schema_mismatch() -> Result<()> {
    let a = sample_frame()?;
    let mut b = DataFrame::new();
    b.add_column("id", Column::from_vec(vec![1i32]))?;
    assert!(matches!(DataFrame::concat(&[&a, &b]), Err(Error::SchemaMismatch(_))));

    let mut c = a.copy();
    c.replace_column("id", Column::from_vec(vec![1i64, 2, 3, 4]))?;
    assert!(matches!(DataFrame::concat(&[&a, &c]), Err(Error::SchemaMismatch(_))));

    assert!(matches!(DataFrame::concat(&[]), Err(Error::SchemaMismatch(_))));
    Ok(())
}

#[test]
fn test_sort_by_descending_puts_na_last() -> Result<()> {
    let mut df = sample_frame()?;
    df.sort_by("score", false)?;
    assert_eq!(df.column("id")?, &Column::from_vec(vec![3i32, 4, 1, 2]));
    assert!(df.column("score")?.is_na(3)?);
    assert!(matches!(df.sort_by("nope", true), Err(Error::ColumnNotFound(_))));
    Ok(())
}

#[test]
fn test_head_and_resize() -> Result<()> {
    let mut df = sample_frame()?;
    assert_eq!(df.head(10)?.row_count(), 4);
    assert_eq!(df.head(1)?.row_count(), 1);

    df.resize(2, true);
    assert_eq!(df.shape(), (2, 3));
    df.resize(3, false);
    assert!(df.iter_columns().all(|(_, c)| c.na_count() == 3));
    Ok(())
}

#[test]
fn test_numeric_view_over_frame_column() -> Result<()> {
    let df = sample_frame()?;
    let ids = df.numeric("id")?;
    let doubled = colframe::ops::binary(BinaryOp::Mul, &ids, 2i32)?;
    assert_eq!(doubled, Column::from_vec(vec![2i32, 4, 6, 8]));
    Ok(())
}

#[test]
fn test_resample_is_reproducible() -> Result<()> {
    let df = sample_frame()?;
    let a = df.resample(2.0, 11)?;
    let b = df.resample(2.0, 11)?;
    assert!(a.equals(&b));
    assert_eq!(a.schema(), df.schema());
    Ok(())
}

#[test]
fn test_assert_almost_equal_uses_config_precision() -> Result<()> {
    use colframe::FrameConfig;

    let mut a = DataFrame::new().with_config(FrameConfig::new().with_almost_equal_precision(0.1));
    a.add_column("v", Column::from_vec(vec![1.0f64, 2.0]))?;
    let mut b = DataFrame::new();
    b.add_column("v", Column::from_vec(vec![1.05f64, 2.0]))?;

    let diff = a.assert_almost_equal(&b, true)?;
    assert!((diff - 0.05).abs() < 1e-12);
    // 既定の精度 1e-5 では許容されない
    assert!(matches!(
        b.assert_almost_equal(&a, true),
        Err(Error::ToleranceExceeded { .. })
    ));

    let text = sample_frame()?;
    assert!(matches!(a.assert_almost_equal(&text, false), Err(Error::SchemaMismatch(_))));
    Ok(())
}
