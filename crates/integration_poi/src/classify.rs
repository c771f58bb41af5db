//! Store classification rules
//!
//! These tables are independent of the chat category context table; the
//! two are configured separately.

use domain::StoreCategory;

struct CategoryRule {
    category: StoreCategory,
    business_terms: &'static [&'static str],
    name_terms: &'static [&'static str],
}

/// Ordered rule list, first match wins
const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: StoreCategory::Chicken,
        business_terms: &["치킨"],
        name_terms: &["치킨"],
    },
    CategoryRule {
        category: StoreCategory::Pizza,
        business_terms: &["피자"],
        name_terms: &["피자"],
    },
    CategoryRule {
        category: StoreCategory::Burger,
        business_terms: &["햄버거"],
        name_terms: &["버거", "맥도날드", "버거킹", "맘스터치", "롯데리아"],
    },
    CategoryRule {
        category: StoreCategory::Chinese,
        business_terms: &["중국", "중식"],
        name_terms: &["짜장", "짬뽕"],
    },
    CategoryRule {
        category: StoreCategory::Japanese,
        business_terms: &["일식"],
        name_terms: &["초밥", "라멘", "돈까스"],
    },
    CategoryRule {
        category: StoreCategory::Cafe,
        business_terms: &["카페"],
        name_terms: &["카페", "커피"],
    },
    CategoryRule {
        category: StoreCategory::Korean,
        business_terms: &["한식"],
        name_terms: &["한식"],
    },
    CategoryRule {
        category: StoreCategory::Western,
        business_terms: &["양식"],
        name_terms: &[],
    },
    CategoryRule {
        category: StoreCategory::Restaurant,
        business_terms: &["음식", "식당"],
        name_terms: &[],
    },
];

const DINING_BUSINESS_TERMS: &[&str] = &[
    "음식", "식당", "카페", "치킨", "피자", "햄버거", "중국", "한식", "양식", "일식",
];

const DINING_NAME_TERMS: &[&str] = &["식당", "카페"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Classify a POI by its business hint and name
///
/// Matching is case-insensitive substring matching. Returns `None` when no
/// rule matches so the caller can pick its own default.
#[must_use]
pub fn classify(business_hint: &str, name: &str) -> Option<StoreCategory> {
    let business = business_hint.to_lowercase();
    let name = name.to_lowercase();

    RULES
        .iter()
        .find(|rule| {
            contains_any(&business, rule.business_terms) || contains_any(&name, rule.name_terms)
        })
        .map(|rule| rule.category)
}

/// Whether a POI looks like a place to eat
#[must_use]
pub fn is_dining(business_hint: &str, name: &str) -> bool {
    contains_any(&business_hint.to_lowercase(), DINING_BUSINESS_TERMS)
        || contains_any(&name.to_lowercase(), DINING_NAME_TERMS)
}
