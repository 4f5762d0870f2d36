//! Daily view: totals against the goal, entries by meal slot, recommendations.

use std::fmt;

use serde::Serialize;
use time::Date;

use crate::dates::{display_date, format_time};
use crate::entries::{EntryStore, FoodEntry, MealType};
use crate::error::StoreError;
use crate::nutrition::{aggregate, Nutrition};
use crate::recommend::{recommend, suggested_foods};

#[derive(Debug, Clone, Serialize)]
pub struct MealGroup {
    pub meal: MealType,
    pub entries: Vec<FoodEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub date: String,
    pub totals: Nutrition,
    pub goal: Nutrition,
    pub meals: Vec<MealGroup>,
    pub recommendations: Vec<String>,
}

/// Re-read the day from the store and run the whole pipeline.
pub async fn build_daily_report(store: &EntryStore, date: &str) -> Result<DailyReport, StoreError> {
    let entries = store.list_entries_by_date(date).await?;
    let goal = store.profile_or_default().await?.daily_goal;
    let totals = aggregate(&entries);
    Ok(DailyReport {
        date: date.to_string(),
        totals,
        goal,
        recommendations: recommend(totals, goal),
        meals: group_by_meal(entries),
    })
}

/// Newest first within each slot; slots in breakfast → snack order; empty slots dropped.
pub fn group_by_meal(mut entries: Vec<FoodEntry>) -> Vec<MealGroup> {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    MealType::ALL
        .iter()
        .map(|&meal| MealGroup {
            meal,
            entries: entries
                .iter()
                .filter(|e| e.meal_type == meal)
                .cloned()
                .collect(),
        })
        .filter(|g| !g.entries.is_empty())
        .collect()
}

/// Share of the goal reached, capped at 100. A non-positive goal reads as 0.
pub fn progress_percent(current: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 0.0;
    }
    (current / goal * 100.0).min(100.0)
}

impl DailyReport {
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn summary(&self, today: Date) -> Summary<'_> {
        Summary { report: self, today }
    }

    pub fn entries(&self) -> EntryList<'_> {
        EntryList(self)
    }

    pub fn advice(&self) -> Advice<'_> {
        Advice(self)
    }
}

pub struct Summary<'a> {
    report: &'a DailyReport,
    today: Date,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        writeln!(f, "Nutrition for {} ({})", display_date(&r.date, self.today), r.date)?;
        let rows = [
            ("Calories", r.totals.calories, r.goal.calories, "kcal"),
            ("Protein", r.totals.protein, r.goal.protein, "g"),
            ("Carbs", r.totals.carbs, r.goal.carbs, "g"),
            ("Fat", r.totals.fat, r.goal.fat, "g"),
        ];
        for (label, current, goal, unit) in rows {
            writeln!(
                f,
                "  {label:<9}{:>6} / {goal} {unit:<4} {:>3.0}%",
                current.round(),
                progress_percent(current, goal)
            )?;
        }
        Ok(())
    }
}

pub struct EntryList<'a>(&'a DailyReport);

impl fmt::Display for EntryList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No entries yet.")?;
            return writeln!(f, "Use `add` to start logging your meals!");
        }
        for group in &self.0.meals {
            writeln!(f, "{}", group.meal)?;
            for e in &group.entries {
                let n = e.nutrition;
                writeln!(
                    f,
                    "  {} {} ({}) {} kcal · protein {}g · carbs {}g · fat {}g{}",
                    format_time(e.timestamp),
                    e.name,
                    e.portion,
                    n.calories,
                    n.protein,
                    n.carbs,
                    n.fat,
                    if e.photo.is_some() { " [photo]" } else { "" }
                )?;
                writeln!(f, "      id: {}", e.id)?;
            }
        }
        Ok(())
    }
}

pub struct Advice<'a>(&'a DailyReport);

impl fmt::Display for Advice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recommendations")?;
        for rec in &self.0.recommendations {
            writeln!(f, "  - {rec}")?;
        }
        writeln!(f, "Suggested foods")?;
        for food in suggested_foods() {
            writeln!(
                f,
                "  {} {} ({} kcal · {}g protein)",
                food.icon, food.name, food.calories, food.protein
            )?;
        }
        Ok(())
    }
}
