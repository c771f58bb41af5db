//! Category lookup tables
//!
//! Every table is an exhaustive `match`, so adding a [`MealCategory`]
//! variant fails to compile until each table has an entry for it.

use domain::MealCategory;

const UNTAGGED_CONTEXT: &str = "일반 음식 추천";

const BASE_PROMPT: &str = "당신은 \"얌이\"라는 이름의 친근하고 귀여운 음식 추천 및 길 안내 AI입니다. \n\
어린이들이 좋아할 만한 톤으로 대화합니다.\n\
응답은 한국어로 하며, 200자 이내로 간결하게 답변해주세요.\n\
이모지를 적절히 사용해서 친근하게 답변해주세요.";

/// Context string sent alongside a message to the recommendation service
#[must_use]
pub const fn category_context(category: Option<MealCategory>) -> &'static str {
    match category {
        Some(MealCategory::Distance) => "거리/접근성을 고려한 음식 추천",
        Some(MealCategory::Cost) => "가격/영양을 고려한 경제적인 음식 추천",
        Some(MealCategory::Preference) => "아이들의 선호도를 고려한 인기 메뉴 추천",
        Some(MealCategory::Allergy) => "알레르기 정보를 고려한 안전한 식사 추천",
        None => UNTAGGED_CONTEXT,
    }
}

/// Canned question asked when the user taps a category shortcut
#[must_use]
pub const fn category_question(category: MealCategory) -> &'static str {
    match category {
        MealCategory::Distance => {
            "학교 근처에서 쉽게 구할 수 있는 재료로 만든 오늘의 급식 메뉴를 추천해주세요"
        },
        MealCategory::Cost => "경제적이면서도 영양가 높은 급식 메뉴를 추천해주세요",
        MealCategory::Preference => "아이들이 가장 좋아하는 인기 급식 메뉴를 추천해주세요",
        MealCategory::Allergy => "급식의 알레르기 주의사항과 안전한 식사 방법에 대해 알려주세요",
    }
}

const fn category_instruction(category: MealCategory) -> &'static str {
    match category {
        MealCategory::Distance => {
            "지금은 \"거리/접근성\" 관련 급식 추천을 요청받았습니다. 현재 위치 주변에서 먹을 수 있는 메뉴를 추천해주세요."
        },
        MealCategory::Cost => {
            "지금은 \"가격/영양\" 관련 음식 추천을 요청받았습니다. 경제적이면서도 영양가 높은 메뉴를 추천해주세요."
        },
        MealCategory::Preference => {
            "지금은 \"선호도\" 관련 급식 추천을 요청받았습니다. 평소에 뭐 좋아하는지 물어보고 그에 맞는 음식 및 음식점 추천해주세요."
        },
        MealCategory::Allergy => {
            "지금은 \"알레르기\" 관련 정보를 요청받았습니다. 사용자의 알레르기 정보를 물어보고 안전한 식사에 대해 안내해주세요."
        },
    }
}

/// System prompt for LLM-style backends
#[must_use]
pub fn system_prompt(category: Option<MealCategory>) -> String {
    match category {
        Some(category) => format!("{BASE_PROMPT}\n{}", category_instruction(category)),
        None => BASE_PROMPT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_for_every_category() {
        assert_eq!(
            category_context(Some(MealCategory::Cost)),
            "가격/영양을 고려한 경제적인 음식 추천"
        );
        assert_eq!(category_context(None), "일반 음식 추천");
        for category in MealCategory::ALL {
            assert!(!category_context(Some(category)).is_empty());
            assert!(!category_question(category).is_empty());
        }
    }

    #[test]
    fn prompt_starts_with_persona() {
        let prompt = system_prompt(None);
        assert!(prompt.starts_with("당신은 \"얌이\""));
        assert_eq!(prompt.lines().count(), 4);
    }

    #[test]
    fn prompt_appends_category_line() {
        let prompt = system_prompt(Some(MealCategory::Allergy));
        assert!(prompt.starts_with(&system_prompt(None)));
        assert!(prompt.ends_with("안전한 식사에 대해 안내해주세요."));
        assert_eq!(prompt.lines().count(), 5);
    }
}
