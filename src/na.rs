use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};

/// 欠損値（NA, Not Available）を表現する型
///
/// 列の値を読み出すときは必ずこの型を経由します。NAビットが立っている行の
/// 物理的な値は意味を持たないため、`NA::NA` として返されます。
#[derive(Clone, Copy)]
pub enum NA<T> {
    /// 値が存在する場合
    Value(T),
    /// 値が存在しない場合
    NA,
}

impl<T> NA<T> {
    /// 値があるかどうかをチェック
    pub fn is_na(&self) -> bool {
        match self {
            NA::Value(_) => false,
            NA::NA => true,
        }
    }

    /// 値があるかどうかをチェック
    pub fn is_value(&self) -> bool {
        !self.is_na()
    }

    /// 値を取得（存在する場合）
    pub fn value(&self) -> Option<&T> {
        match self {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }

    /// 値を取り出す
    pub fn into_option(self) -> Option<T> {
        self.into()
    }

    /// 値を取得（存在する場合）、存在しない場合はデフォルト値を返す
    pub fn value_or<'a>(&'a self, default: &'a T) -> &'a T {
        match self {
            NA::Value(v) => v,
            NA::NA => default,
        }
    }

    /// 参照版
    pub fn as_ref(&self) -> NA<&T> {
        match self {
            NA::Value(v) => NA::Value(v),
            NA::NA => NA::NA,
        }
    }

    /// 値を変換する
    pub fn map<U, F>(self, f: F) -> NA<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            NA::Value(v) => NA::Value(f(v)),
            NA::NA => NA::NA,
        }
    }
}

impl<T: Clone> NA<&T> {
    /// 参照を外して複製する
    pub fn cloned(self) -> NA<T> {
        self.map(Clone::clone)
    }
}

impl<T> Default for NA<T> {
    fn default() -> Self {
        NA::NA
    }
}

// From実装：T型からNA<T>への自動変換
impl<T> From<T> for NA<T> {
    fn from(value: T) -> Self {
        NA::Value(value)
    }
}

// From実装：Option<T>からNA<T>への自動変換
impl<T> From<Option<T>> for NA<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => NA::Value(v),
            None => NA::NA,
        }
    }
}

// Into実装：NA<T>からOption<T>への自動変換
impl<T> From<NA<T>> for Option<T> {
    fn from(na: NA<T>) -> Self {
        match na {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }
}

impl<T: Debug> Debug for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{:?}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}

impl<T: Display> Display for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}

// NA同士は等しい（構造的な比較）
impl<T: PartialEq> PartialEq for NA<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NA::Value(a), NA::Value(b)) => a == b,
            (NA::NA, NA::NA) => true,
            _ => false,
        }
    }
}

impl<T: Eq> Eq for NA<T> {}

// NAは常に他の値より大きい（ソート時に末尾へ）
impl<T: PartialOrd> PartialOrd for NA<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (NA::Value(a), NA::Value(b)) => a.partial_cmp(b),
            (NA::NA, NA::NA) => Some(Ordering::Equal),
            (NA::NA, _) => Some(Ordering::Greater),
            (_, NA::NA) => Some(Ordering::Less),
        }
    }
}
