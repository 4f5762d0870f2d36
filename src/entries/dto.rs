use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::nutrition::Nutrition;

pub const DEFAULT_PORTION: &str = "1 serving";

/// Time-of-day bucket, used only for grouping entries on display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    #[default]
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Display order of the meal slots.
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(ValidationError::UnknownMeal(s.to_string())),
        }
    }
}

/// One logged food item. Immutable once stored; removed only by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub id: String,
    pub name: String,
    pub meal_type: MealType,
    #[serde(default = "default_portion")]
    pub portion: String,
    pub nutrition: Nutrition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>, // data URL
    pub timestamp: i64, // unix millis
    pub date: String,   // YYYY-MM-DD (UTC)
}

fn default_portion() -> String {
    DEFAULT_PORTION.to_string()
}

/// Raw add-entry form input, exactly as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub name: String,
    pub meal_type: MealType,
    pub portion: Option<String>,
    pub calories: Option<String>,
    pub protein: Option<String>,
    pub carbs: Option<String>,
    pub fat: Option<String>,
    pub photo: Option<String>,
}

#[cfg(test)]
mod dto_tests {
    use super::*;

    #[test]
    fn meal_type_parses_case_insensitively() {
        assert_eq!(" Dinner ".parse::<MealType>().unwrap(), MealType::Dinner);
        assert_eq!("SNACK".parse::<MealType>().unwrap(), MealType::Snack);
        assert!(matches!(
            "brunch".parse::<MealType>(),
            Err(ValidationError::UnknownMeal(_))
        ));
    }

    #[test]
    fn entry_json_shape() {
        let raw = r#"{
            "id": "1700000000000",
            "name": "tomato egg stir-fry",
            "mealType": "lunch",
            "nutrition": {"calories": 250, "protein": 14},
            "timestamp": 1700000000000,
            "date": "2023-11-14"
        }"#;
        let entry: FoodEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.meal_type, MealType::Lunch);
        assert_eq!(entry.portion, DEFAULT_PORTION);
        assert_eq!(entry.nutrition, Nutrition::new(250.0, 14.0, 0.0, 0.0));
        assert_eq!(entry.photo, None);
    }
}
