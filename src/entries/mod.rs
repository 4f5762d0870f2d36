mod dto;
pub mod repo;
pub mod services;

pub use dto::{FoodEntry, MealType, NewEntry};
pub use repo::EntryStore;
