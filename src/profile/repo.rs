use tracing::{info, instrument};

use crate::entries::EntryStore;
use crate::error::StoreError;
use crate::nutrition::Nutrition;
use crate::profile::dto::UserProfile;

pub const PROFILE_KEY: &str = "foodie-tracker-profile";

/// Goal used until the user saves one of their own.
pub fn default_profile() -> UserProfile {
    UserProfile {
        daily_goal: Nutrition::new(2000.0, 50.0, 250.0, 70.0),
        preferences: Vec::new(),
    }
}

impl EntryStore {
    pub async fn get_profile(&self) -> Result<Option<UserProfile>, StoreError> {
        self.read_json(PROFILE_KEY).await
    }

    /// Overwrites the stored profile wholesale. Non-positive or non-finite goals are rejected.
    #[instrument(skip(self, profile))]
    pub async fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        profile.validate()?;
        self.write_json(PROFILE_KEY, profile).await?;
        info!(calories = profile.daily_goal.calories, "profile saved");
        Ok(())
    }

    pub async fn profile_or_default(&self) -> Result<UserProfile, StoreError> {
        Ok(self.get_profile().await?.unwrap_or_else(default_profile))
    }
}

#[cfg(test)]
mod profile_tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::profile::GoalUpdate;
    use crate::state::AppState;

    #[tokio::test]
    async fn missing_profile_falls_back_to_default() {
        let state = AppState::fake();
        assert_eq!(state.store.get_profile().await.unwrap(), None);
        assert_eq!(state.store.profile_or_default().await.unwrap(), default_profile());
    }

    #[test]
    fn default_goal_values() {
        let p = default_profile();
        assert_eq!(p.daily_goal, Nutrition::new(2000.0, 50.0, 250.0, 70.0));
        assert!(p.preferences.is_empty());
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let state = AppState::fake();
        let profile = UserProfile {
            daily_goal: Nutrition::new(1800.0, 90.5, 180.0, 60.0),
            preferences: vec!["vegetarian".into(), "low sodium".into()],
        };
        state.store.save_profile(&profile).await.unwrap();
        assert_eq!(state.store.get_profile().await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn save_overwrites_without_merging() {
        let state = AppState::fake();
        let first = UserProfile {
            daily_goal: Nutrition::new(1500.0, 60.0, 150.0, 50.0),
            preferences: vec!["keto".into()],
        };
        state.store.save_profile(&first).await.unwrap();

        let second = UserProfile {
            daily_goal: GoalUpdate {
                calories: Some(2200.0),
                ..Default::default()
            }
            .apply(first.daily_goal)
            .unwrap(),
            preferences: Vec::new(),
        };
        state.store.save_profile(&second).await.unwrap();

        let got = state.store.get_profile().await.unwrap().unwrap();
        assert_eq!(got.daily_goal, Nutrition::new(2200.0, 60.0, 150.0, 50.0));
        assert!(got.preferences.is_empty());
    }

    #[test]
    fn goal_update_rejects_non_finite_and_non_positive() {
        let goal = default_profile().daily_goal;
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0, -100.0] {
            let err = GoalUpdate {
                calories: Some(bad),
                ..Default::default()
            }
            .apply(goal)
            .unwrap_err();
            assert!(matches!(err, ValidationError::InvalidGoal { field: "calories", .. }));
        }
        let err = GoalUpdate {
            fat: Some(-1.0),
            ..Default::default()
        }
        .apply(goal)
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidGoal { field: "fat", .. }));
    }

    #[tokio::test]
    async fn bad_goal_is_never_persisted() {
        let state = AppState::fake();
        let good = UserProfile {
            daily_goal: Nutrition::new(1800.0, 60.0, 200.0, 60.0),
            preferences: vec![],
        };
        state.store.save_profile(&good).await.unwrap();

        let broken = UserProfile {
            daily_goal: Nutrition {
                calories: "NaN".parse().unwrap(),
                ..good.daily_goal
            },
            preferences: vec![],
        };
        let err = state.store.save_profile(&broken).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Invalid(ValidationError::InvalidGoal { field: "calories", .. })
        ));

        // stored profile still reads back and can be updated
        assert_eq!(state.store.profile_or_default().await.unwrap(), good);
        let fixed = UserProfile {
            daily_goal: GoalUpdate {
                calories: Some(2000.0),
                ..Default::default()
            }
            .apply(good.daily_goal)
            .unwrap(),
            preferences: vec![],
        };
        state.store.save_profile(&fixed).await.unwrap();
        assert_eq!(state.store.get_profile().await.unwrap(), Some(fixed));
    }
}
