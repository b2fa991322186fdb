//! User Profile Store
//!
//! Profile and onboarding state survive restarts; the auth session does not.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::{ProfileUpdate, Session, UserProfile};
use crate::repository::{decode, encode, KeyValueStore, WriteThrough};

pub const PROFILE_STORAGE_KEY: &str = "user-profile-storage";

const PROFILE_STATE_VERSION: u32 = 0;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedProfileRef<'a> {
    profile: Option<&'a UserProfile>,
    onboarding_completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedProfile {
    profile: Option<UserProfile>,
    #[serde(default)]
    onboarding_completed: bool,
}

pub struct ProfileStore {
    profile: Option<UserProfile>,
    onboarding_completed: bool,
    session: Option<Session>,
    key: String,
    writer: WriteThrough,
}

impl ProfileStore {
    pub async fn open(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::open_with_key(kv, PROFILE_STORAGE_KEY).await
    }

    pub async fn open_with_key(kv: Arc<dyn KeyValueStore>, key: &str) -> Self {
        let restored = match kv.get(key).await {
            Ok(Some(bytes)) => decode::<PersistedProfile>(&bytes, PROFILE_STATE_VERSION)
                .map_err(|e| log::warn!("Discarding persisted profile: {}", e))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read profile state: {}", e);
                None
            }
        };
        let PersistedProfile {
            profile,
            onboarding_completed,
        } = restored.unwrap_or(PersistedProfile {
            profile: None,
            onboarding_completed: false,
        });

        Self {
            profile,
            onboarding_completed,
            session: None,
            key: key.to_string(),
            writer: WriteThrough::spawn(kv),
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn onboarding_completed(&self) -> bool {
        self.onboarding_completed
    }

    /// Session present and not expired at `now` (unix seconds)
    pub fn is_authenticated(&self, now: i64) -> bool {
        self.session.as_ref().is_some_and(|s| !s.is_expired(now))
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
        self.persist();
    }

    /// Apply a partial update; ignored when no profile exists yet
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        if let Some(profile) = self.profile.as_mut() {
            profile.apply(update);
        }
        self.persist();
    }

    pub fn complete_onboarding(&mut self) {
        self.onboarding_completed = true;
        self.persist();
    }

    pub fn sign_in(&mut self, session: Session) {
        self.session = Some(session);
        self.persist();
    }

    /// Drop the session, keep the profile
    pub fn sign_out(&mut self) {
        self.session = None;
        self.persist();
    }

    /// Forget everything, including what is stored
    pub fn reset(&mut self) {
        self.profile = None;
        self.onboarding_completed = false;
        self.session = None;
        self.writer.submit_remove(&self.key);
    }

    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    /// Allow-list: the session never reaches storage
    fn partialize(&self) -> PersistedProfileRef<'_> {
        PersistedProfileRef {
            profile: self.profile.as_ref(),
            onboarding_completed: self.onboarding_completed,
        }
    }

    fn persist(&self) {
        match encode(&self.partialize(), PROFILE_STATE_VERSION) {
            Ok(bytes) => self.writer.submit(&self.key, bytes),
            Err(e) => log::error!("Failed to serialize profile state: {}", e),
        }
    }
}
