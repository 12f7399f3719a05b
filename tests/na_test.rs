use colframe::{Scalar, NA};

#[test]
fn test_na_creation() {
    // NA型の基本的な作成と操作
    let value: NA<i32> = NA::Value(42);
    let na: NA<i32> = NA::NA;

    assert!(!value.is_na());
    assert!(value.is_value());
    assert_eq!(value.value(), Some(&42));

    assert!(na.is_na());
    assert!(!na.is_value());
    assert_eq!(na.value(), None);
}

#[test]
fn test_na_conversions() {
    let from_some: NA<i64> = Some(3).into();
    let from_none: NA<i64> = None.into();
    assert_eq!(from_some, NA::Value(3));
    assert!(from_none.is_na());

    let back: Option<i64> = from_some.into();
    assert_eq!(back, Some(3));
    assert_eq!(from_none.into_option(), None);

    let scalar: NA<Scalar> = 2.5f32.into();
    assert_eq!(scalar, NA::Value(Scalar::Float32(2.5)));
    let text: NA<Scalar> = "hi".into();
    assert_eq!(text, NA::Value(Scalar::Text("hi".to_string())));
}

#[test]
fn test_na_equality_and_order() {
    // 構造的な比較: NA 同士は等しい
    assert_eq!(NA::<f64>::NA, NA::NA);
    assert_ne!(NA::Value(1.0), NA::NA);
    assert!(NA::Value(1) < NA::Value(2));
    assert!(NA::Value(i32::MAX) < NA::NA);
}

#[test]
fn test_na_display() {
    assert_eq!(NA::<i32>::NA.to_string(), "NA");
    assert_eq!(NA::Value(7).to_string(), "7");
    assert_eq!(format!("{:?}", NA::<i32>::NA), "NA");
    assert_eq!(NA::Value(3).map(|v| v * 2), NA::Value(6));
    assert_eq!(*NA::<i32>::NA.value_or(&5), 5);
}
