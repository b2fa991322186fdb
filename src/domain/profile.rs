//! User Profile Entity
//!
//! Body metrics and goals collected during onboarding, plus the auth session.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    LoseWeight,
    #[default]
    Maintain,
    BuildMuscle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub goal: FitnessGoal,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            age: None,
            height_cm: None,
            weight_kg: None,
            goal: FitnessGoal::default(),
            activity_level: ActivityLevel::default(),
            dietary_preferences: Vec::new(),
        }
    }

    /// Apply every field set in `update`
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.display_name {
            self.display_name = name;
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(height) = update.height_cm {
            self.height_cm = Some(height);
        }
        if let Some(weight) = update.weight_kg {
            self.weight_kg = Some(weight);
        }
        if let Some(goal) = update.goal {
            self.goal = goal;
        }
        if let Some(level) = update.activity_level {
            self.activity_level = level;
        }
        if let Some(prefs) = update.dietary_preferences {
            self.dietary_preferences = prefs;
        }
    }
}

impl Entity for UserProfile {
    type Id = str;

    fn id(&self) -> &str {
        &self.user_id
    }
}

/// Partial profile update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<FitnessGoal>,
    pub activity_level: Option<ActivityLevel>,
    pub dietary_preferences: Option<Vec<String>>,
}

/// Auth session handed out by the identity provider. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
    /// Unix seconds
    pub expires_at: i64,
}

impl Session {
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}
