//! Search keyword tables

/// Keyword pool for the primary nearby search, in priority order
pub const DEFAULT_KEYWORD_POOL: &[&str] = &["맛집", "음식점", "식당", "카페", "치킨", "피자", "햄버거"];

/// Single generic keyword used by the broader fallback search
pub const FALLBACK_KEYWORD: &str = "음식점";

const FOOD_KEYWORDS: &[(&str, &str)] = &[
    // 한식
    ("한식", "한식"),
    ("김치찌개", "한식 김치찌개"),
    ("불고기", "한식 불고기"),
    ("비빔밥", "한식 비빔밥"),
    ("냉면", "한식 냉면"),
    ("갈비", "한식 갈비"),
    // 중식
    ("중식", "중식"),
    ("짜장면", "중식 짜장면"),
    ("짬뽕", "중식 짬뽕"),
    ("탕수육", "중식 탕수육"),
    ("마파두부", "중식"),
    // 일식
    ("일식", "일식"),
    ("초밥", "일식 초밥"),
    ("라멘", "일식 라멘"),
    ("돈까스", "일식 돈까스"),
    ("우동", "일식 우동"),
    ("회", "일식 회"),
    // 양식
    ("양식", "양식"),
    ("파스타", "양식 파스타"),
    ("피자", "피자"),
    ("스테이크", "양식 스테이크"),
    ("햄버거", "햄버거"),
    // 기타
    ("치킨", "치킨"),
    ("족발", "족발"),
    ("보쌈", "보쌈"),
    ("곱창", "곱창"),
    ("삼겹살", "삼겹살"),
    ("카페", "카페"),
    ("디저트", "디저트"),
    ("빵", "베이커리"),
];

/// Map a food type to the keyword that searches best for it
///
/// Unknown food types are searched verbatim.
#[must_use]
pub fn food_keyword(food_type: &str) -> &str {
    let food_type = food_type.trim();
    FOOD_KEYWORDS
        .iter()
        .find(|(food, _)| *food == food_type)
        .map_or(food_type, |(_, keyword)| *keyword)
}
