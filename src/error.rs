use thiserror::Error;

/// Failures of the blob store and the repositories built on top of it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("blob {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode blob {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Rejections of user input (the add-entry form, goal edits). Nothing is persisted when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("food name is required")]
    MissingName,

    #[error("calories are required")]
    MissingCalories,

    #[error("calories must be a number, got {0:?}")]
    InvalidCalories(String),

    #[error("unknown meal slot {0:?} (expected breakfast, lunch, dinner or snack)")]
    UnknownMeal(String),

    #[error("invalid date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("daily {field} goal must be a positive number, got {value}")]
    InvalidGoal { field: &'static str, value: String },
}
