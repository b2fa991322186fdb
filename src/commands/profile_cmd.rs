//! Profile Commands

use crate::domain::{ProfileUpdate, Session, UserProfile};
use crate::AppState;

pub async fn get_profile(state: &AppState) -> Result<Option<UserProfile>, String> {
    Ok(state.profile.lock().await.profile().cloned())
}

/// Create the profile, or merge `update` into the existing one
pub async fn save_profile(
    state: &AppState,
    user_id: &str,
    update: ProfileUpdate,
) -> Result<UserProfile, String> {
    let mut store = state.profile.lock().await;

    let owner = store.profile().map(|p| p.user_id.clone());
    match owner {
        Some(owner) if owner != user_id => {
            return Err(format!("Profile belongs to another user ({})", owner));
        }
        Some(_) => store.update_profile(update),
        None => {
            let name = update.display_name.clone().unwrap_or_default();
            let mut profile = UserProfile::new(user_id, name);
            profile.apply(update);
            store.set_profile(profile);
        }
    }

    store
        .profile()
        .cloned()
        .ok_or_else(|| "Profile was not saved".to_string())
}

pub async fn complete_onboarding(state: &AppState) -> Result<(), String> {
    let mut store = state.profile.lock().await;
    if store.profile().is_none() {
        return Err("Finish your profile before completing onboarding".to_string());
    }
    store.complete_onboarding();
    Ok(())
}

pub async fn sign_in(state: &AppState, session: Session) -> Result<(), String> {
    let now = chrono::Utc::now().timestamp();
    if session.is_expired(now) {
        return Err("Session already expired".to_string());
    }
    log::info!("User {} signed in", session.user_id);
    state.profile.lock().await.sign_in(session);
    Ok(())
}

pub async fn sign_out(state: &AppState) -> Result<(), String> {
    state.profile.lock().await.sign_out();
    Ok(())
}

/// Sign out and delete the stored profile
pub async fn reset_profile(state: &AppState) -> Result<(), String> {
    state.profile.lock().await.reset();
    log::info!("Profile reset");
    Ok(())
}
