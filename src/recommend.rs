//! Rule-based dietary suggestions.
//!
//! The rules form a fixed decision table evaluated top to bottom. Each rule
//! contributes at most one message and never suppresses a later one.

use serde::Serialize;

use crate::nutrition::Nutrition;

pub const GENEROUS_BUDGET: &str =
    "You still have plenty of calorie budget today. Enjoy a hearty dinner!";
pub const MODERATE_BUDGET: &str =
    "Calorie intake is moderate today. A light dinner is a good choice.";
pub const GOAL_REACHED: &str =
    "You've reached today's calorie goal. Pick low-calorie foods or add some exercise.";
pub const PROTEIN_SHORTFALL: &str =
    "🥩 Protein still needs topping up. Try chicken breast, fish or tofu.";
pub const CARBS_OVER: &str = "🥗 Carbs are running high. Fill dinner with vegetables and lean meat.";
pub const LOW_PROTEIN_RATIO: &str = "💪 Your protein ratio is low. Add more quality protein.";

/// What a rule gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct Intake {
    pub today: Nutrition,
    pub remaining: Nutrition,
}

struct Rule {
    applies: fn(&Intake) -> bool,
    message: &'static str,
}

// The three calorie tiers partition every f64, NaN included, so exactly one fires.
const RULES: &[Rule] = &[
    Rule {
        applies: |i: &Intake| i.remaining.calories > 500.0,
        message: GENEROUS_BUDGET,
    },
    Rule {
        applies: |i: &Intake| i.remaining.calories > 0.0 && i.remaining.calories <= 500.0,
        message: MODERATE_BUDGET,
    },
    Rule {
        applies: |i: &Intake| !(i.remaining.calories > 0.0),
        message: GOAL_REACHED,
    },
    Rule {
        applies: |i: &Intake| i.remaining.protein > 20.0,
        message: PROTEIN_SHORTFALL,
    },
    Rule {
        applies: |i: &Intake| i.remaining.carbs < 0.0,
        message: CARBS_OVER,
    },
    Rule {
        // calorie guard first: the ratio is never computed for zero calories
        applies: |i: &Intake| {
            i.today.calories > 500.0 && i.today.protein / i.today.calories < 0.15
        },
        message: LOW_PROTEIN_RATIO,
    },
];

/// Ordered advisory messages for today's totals against the daily goal.
pub fn recommend(today: Nutrition, goal: Nutrition) -> Vec<String> {
    let intake = Intake {
        today,
        remaining: goal - today,
    };
    RULES
        .iter()
        .filter(|rule| (rule.applies)(&intake))
        .map(|rule| rule.message.to_string())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SuggestedFood {
    pub name: &'static str,
    pub calories: u32,
    pub protein: u32,
    pub icon: &'static str,
}

const SUGGESTED_FOODS: [SuggestedFood; 4] = [
    SuggestedFood {
        name: "grilled chicken breast with salad",
        calories: 350,
        protein: 45,
        icon: "🥗",
    },
    SuggestedFood {
        name: "salmon with brown rice",
        calories: 450,
        protein: 35,
        icon: "🍱",
    },
    SuggestedFood {
        name: "tofu vegetable soup",
        calories: 200,
        protein: 15,
        icon: "🍲",
    },
    SuggestedFood {
        name: "avocado toast with boiled egg",
        calories: 320,
        protein: 18,
        icon: "🥑",
    },
];

/// Static, non-personalised suggestions shown next to the recommendations.
pub fn suggested_foods() -> &'static [SuggestedFood] {
    &SUGGESTED_FOODS
}
