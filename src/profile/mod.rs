mod dto;
pub mod repo;

pub use dto::{GoalUpdate, UserProfile};
