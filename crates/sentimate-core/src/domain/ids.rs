//! Domain identifiers (strongly-typed IDs).
//!
//! Review の ID とレコードの ID はどちらも整数ですが、混同しないように
//! Phantom type パターンで別の型にしています。
//!
//! ## Phantom Type パターン
//! `Id<T>` というジェネリック型で共通実装を提供しつつ、
//! `T` は実行時には使わない（PhantomData）マーカー型として、
//! コンパイル時の型安全性を提供します。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// IdMarker は各 ID 型のマーカー trait
pub trait IdMarker: Send + Sync + 'static {
    /// ログ出力で使うラベル（例: "review", "review_sentiment"）
    fn label() -> &'static str;
}

/// ジェネリック ID 型
///
/// 中身はホスト側 DB の整数主キーです。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    value: i64,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn get(&self) -> i64 {
        self.value
    }

    pub fn label(&self) -> &'static str {
        T::label()
    }
}

impl<T: IdMarker> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T: IdMarker> FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self::new)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Review（ホスト側エンティティ）のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Review {}

impl IdMarker for Review {
    fn label() -> &'static str {
        "review"
    }
}

/// 永続化された sentiment レコードのマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReviewSentiment {}

impl IdMarker for ReviewSentiment {
    fn label() -> &'static str {
        "review_sentiment"
    }
}

/// Identifier of a product review, owned by the host platform.
pub type ReviewId = Id<Review>;

/// Primary key of a stored review sentiment record.
pub type RecordId = Id<ReviewSentiment>;
