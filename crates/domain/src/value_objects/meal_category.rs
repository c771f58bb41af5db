//! Meal recommendation category

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag attached to a chat request
///
/// Biases the assistant toward a particular kind of recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    /// Distance / accessibility aware recommendations
    Distance,
    /// Budget and nutrition aware recommendations
    Cost,
    /// Recommendations based on what children like
    Preference,
    /// Allergy-safe recommendations
    Allergy,
}

impl MealCategory {
    /// All categories in display order
    pub const ALL: [Self; 4] = [Self::Distance, Self::Cost, Self::Preference, Self::Allergy];

    /// Wire representation sent to the chat backend
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Cost => "cost",
            Self::Preference => "preference",
            Self::Allergy => "allergy",
        }
    }

    /// Short Korean label for menus
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Distance => "거리",
            Self::Cost => "가격",
            Self::Preference => "선호도",
            Self::Allergy => "알레르기",
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MealCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "distance" | "거리" => Ok(Self::Distance),
            "cost" | "가격" => Ok(Self::Cost),
            "preference" | "선호도" => Ok(Self::Preference),
            "allergy" | "알레르기" => Ok(Self::Allergy),
            _ => Err(format!(
                "Invalid category: {s}. Use distance, cost, preference or allergy"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names_and_labels() {
        assert_eq!("distance".parse::<MealCategory>(), Ok(MealCategory::Distance));
        assert_eq!("COST".parse::<MealCategory>(), Ok(MealCategory::Cost));
        assert_eq!("선호도".parse::<MealCategory>(), Ok(MealCategory::Preference));
        assert_eq!(" allergy ".parse::<MealCategory>(), Ok(MealCategory::Allergy));
        assert!("price".parse::<MealCategory>().is_err());
    }

    #[test]
    fn display_matches_wire_name() {
        for category in MealCategory::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&MealCategory::Preference).unwrap();
        assert_eq!(json, "\"preference\"");
        let parsed: MealCategory = serde_json::from_str("\"allergy\"").unwrap();
        assert_eq!(parsed, MealCategory::Allergy);
    }
}
