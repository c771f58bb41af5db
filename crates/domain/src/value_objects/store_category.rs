//! Store category tag for nearby search results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cuisine/business category assigned to a store found by POI search
///
/// Serialized with the Korean labels shown in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StoreCategory {
    #[serde(rename = "치킨")]
    Chicken,
    #[serde(rename = "피자")]
    Pizza,
    #[serde(rename = "햄버거")]
    Burger,
    #[serde(rename = "중식")]
    Chinese,
    #[serde(rename = "일식")]
    Japanese,
    #[serde(rename = "카페")]
    Cafe,
    #[serde(rename = "한식")]
    Korean,
    #[serde(rename = "양식")]
    Western,
    /// Generic restaurant without a more specific cuisine
    #[serde(rename = "음식점")]
    Restaurant,
    /// Anything that matched no classification rule
    #[default]
    #[serde(rename = "기타")]
    Other,
}

impl StoreCategory {
    /// Korean display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Chicken => "치킨",
            Self::Pizza => "피자",
            Self::Burger => "햄버거",
            Self::Chinese => "중식",
            Self::Japanese => "일식",
            Self::Cafe => "카페",
            Self::Korean => "한식",
            Self::Western => "양식",
            Self::Restaurant => "음식점",
            Self::Other => "기타",
        }
    }
}

impl fmt::Display for StoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
