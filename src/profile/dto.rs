use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::nutrition::Nutrition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub daily_goal: Nutrition,
    #[serde(default)]
    pub preferences: Vec<String>, // not read by any rule yet
}

/// Partial goal edit; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalUpdate {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

impl UserProfile {
    /// Every goal threshold must be finite and above zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let g = self.daily_goal;
        check_goal("calories", g.calories)?;
        check_goal("protein", g.protein)?;
        check_goal("carbs", g.carbs)?;
        check_goal("fat", g.fat)?;
        Ok(())
    }
}

fn check_goal(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidGoal {
            field,
            value: value.to_string(),
        })
    }
}

impl GoalUpdate {
    pub fn apply(self, goal: Nutrition) -> Result<Nutrition, ValidationError> {
        let pick = |field, new: Option<f64>, old: f64| match new {
            Some(v) => check_goal(field, v),
            None => Ok(old),
        };
        Ok(Nutrition {
            calories: pick("calories", self.calories, goal.calories)?,
            protein: pick("protein", self.protein, goal.protein)?,
            carbs: pick("carbs", self.carbs, goal.carbs)?,
            fat: pick("fat", self.fat, goal.fat)?,
        })
    }
}
