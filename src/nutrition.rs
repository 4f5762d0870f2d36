use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

use crate::entries::FoodEntry;

/// Calories in kcal, macros in grams. Values are not checked for sign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Nutrition {
    pub const ZERO: Nutrition = Nutrition {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
    };

    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }
}

impl Add for Nutrition {
    type Output = Nutrition;

    fn add(self, rhs: Nutrition) -> Nutrition {
        Nutrition {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl AddAssign for Nutrition {
    fn add_assign(&mut self, rhs: Nutrition) {
        *self = *self + rhs;
    }
}

impl Sub for Nutrition {
    type Output = Nutrition;

    fn sub(self, rhs: Nutrition) -> Nutrition {
        Nutrition {
            calories: self.calories - rhs.calories,
            protein: self.protein - rhs.protein,
            carbs: self.carbs - rhs.carbs,
            fat: self.fat - rhs.fat,
        }
    }
}

impl Sum for Nutrition {
    fn sum<I: Iterator<Item = Nutrition>>(iter: I) -> Nutrition {
        iter.fold(Nutrition::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Nutrition> for Nutrition {
    fn sum<I: Iterator<Item = &'a Nutrition>>(iter: I) -> Nutrition {
        iter.copied().sum()
    }
}

/// Sum the nutrition of every entry. Rounding is left to the caller.
pub fn aggregate(entries: &[FoodEntry]) -> Nutrition {
    entries.iter().map(|e| &e.nutrition).sum()
}

#[cfg(test)]
mod aggregate_tests {
    use super::*;
    use crate::entries::MealType;

    fn entry(id: &str, n: Nutrition) -> FoodEntry {
        FoodEntry {
            id: id.into(),
            name: format!("food {id}"),
            meal_type: MealType::Lunch,
            portion: "1 serving".into(),
            nutrition: n,
            photo: None,
            timestamp: 0,
            date: "2025-01-01".into(),
        }
    }

    fn close(a: Nutrition, b: Nutrition) -> bool {
        let eps = 1e-9;
        (a.calories - b.calories).abs() < eps
            && (a.protein - b.protein).abs() < eps
            && (a.carbs - b.carbs).abs() < eps
            && (a.fat - b.fat).abs() < eps
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(aggregate(&[]), Nutrition::ZERO);
    }

    #[test]
    fn order_does_not_matter() {
        let a = entry("a", Nutrition::new(120.5, 3.2, 20.1, 1.1));
        let b = entry("b", Nutrition::new(430.0, 25.0, 40.3, 18.7));
        let c = entry("c", Nutrition::new(88.8, 0.4, 22.9, 0.3));

        let forward = aggregate(&[a.clone(), b.clone(), c.clone()]);
        let backward = aggregate(&[c.clone(), b.clone(), a.clone()]);
        let shuffled = aggregate(&[b, a, c]);
        assert!(close(forward, backward));
        assert!(close(forward, shuffled));
    }

    #[test]
    fn sum_of_parts_equals_whole() {
        let e1 = entry("1", Nutrition::new(350.0, 45.0, 10.0, 8.0));
        let e2 = entry("2", Nutrition::new(200.0, 15.0, 20.0, 5.0));
        let whole = aggregate(&[e1.clone(), e2.clone()]);
        assert!(close(whole, aggregate(&[e1]) + aggregate(&[e2])));
        assert_eq!(whole, Nutrition::new(550.0, 60.0, 30.0, 13.0));
    }

    #[test]
    fn negative_values_pass_through() {
        let e = entry("neg", Nutrition::new(100.0, -5.0, 0.0, 0.0));
        assert_eq!(aggregate(&[e]).protein, -5.0);
    }

    #[test]
    fn remaining_may_go_negative() {
        let goal = Nutrition::new(2000.0, 50.0, 250.0, 70.0);
        let today = Nutrition::new(2500.0, 40.0, 300.0, 80.0);
        assert_eq!(goal - today, Nutrition::new(-500.0, 10.0, -50.0, -10.0));
    }

    #[test]
    fn missing_macros_default_to_zero() {
        let n: Nutrition = serde_json::from_str(r#"{"calories": 300}"#).unwrap();
        assert_eq!(n, Nutrition::new(300.0, 0.0, 0.0, 0.0));
    }
}
