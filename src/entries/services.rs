use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dates::{date_key, unix_millis};
use crate::entries::dto::{FoodEntry, NewEntry, DEFAULT_PORTION};
use crate::entries::repo::EntryStore;
use crate::error::ValidationError;
use crate::nutrition::Nutrition;

/// Turn raw form input into an entry stamped with `now`.
///
/// Name and calories are required. The macro fields are lenient: missing,
/// blank or non-numeric input becomes zero.
pub fn create_entry(form: NewEntry, now: OffsetDateTime) -> Result<FoodEntry, ValidationError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    let calories = match form.calories.as_deref().map(str::trim) {
        None | Some("") => return Err(ValidationError::MissingCalories),
        Some(raw) => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => return Err(ValidationError::InvalidCalories(raw.to_string())),
        },
    };

    let portion = form
        .portion
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PORTION.to_string());

    Ok(FoodEntry {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        meal_type: form.meal_type,
        portion,
        nutrition: Nutrition::new(
            calories,
            lenient_number(form.protein.as_deref()),
            lenient_number(form.carbs.as_deref()),
            lenient_number(form.fat.as_deref()),
        ),
        photo: form.photo.filter(|p| !p.is_empty()),
        timestamp: unix_millis(now),
        date: date_key(now),
    })
}

fn lenient_number(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        None | Some("") => 0.0,
        Some(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                warn!(input = s, "non-numeric value coerced to zero");
                0.0
            }
        },
    }
}

/// Validate, persist and return the new entry.
pub async fn record_entry(
    store: &EntryStore,
    form: NewEntry,
    now: OffsetDateTime,
) -> anyhow::Result<FoodEntry> {
    let entry = create_entry(form, now)?;
    store.add_entry(entry.clone()).await?;
    info!(id = %entry.id, name = %entry.name, meal = %entry.meal_type, "food entry recorded");
    Ok(entry)
}
