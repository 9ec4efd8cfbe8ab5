//! Local session
//!
//! Keeps the logged-in user profile in its key-value slot. There is no real
//! authentication: logging in just stores the profile.

pub mod preferences;

pub use preferences::{Preferences, Theme};

use crate::storage::{KeyValueStore, StorageError, USER_KEY};
use crate::types::{ProfileUpdate, UserProfile};

/// Current user, if any, backed by the `user` slot
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    slots: S,
    user: Option<UserProfile>,
}

impl<S: KeyValueStore> Session<S> {
    /// Restore the saved profile. An unreadable profile counts as logged out.
    pub fn open(slots: S) -> Result<Self, StorageError> {
        let user = match slots.get(USER_KEY)? {
            Some(json) => match serde_json::from_str::<UserProfile>(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable user profile: {}", e);
                    None
                }
            },
            None => None,
        };

        if let Some(user) = &user {
            tracing::info!("Resumed session for {}", user.name);
        }
        Ok(Self { slots, user })
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, profile: UserProfile) -> Result<(), StorageError> {
        let json = serde_json::to_string(&profile)?;
        self.slots.set(USER_KEY, &json)?;
        tracing::info!("Logged in as {}", profile.name);
        self.user = Some(profile);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.slots.remove(USER_KEY)?;
        self.user = None;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Merge `update` into the current profile. Does nothing when logged out.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<(), StorageError> {
        let Some(user) = self.user.as_mut() else {
            tracing::debug!("update_profile: no user logged in");
            return Ok(());
        };
        user.apply(update);
        let json = serde_json::to_string(user)?;
        self.slots.set(USER_KEY, &json)
    }

    pub fn into_slots(self) -> S {
        self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn lucia() -> UserProfile {
        UserProfile {
            name: "Lucía".into(),
            avatar: "https://ui-avatars.com/api/?name=Lucia".into(),
            email: "lucia@example.com".into(),
        }
    }

    #[test]
    fn test_starts_logged_out() {
        let session = Session::open(MemoryStore::new()).unwrap();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_login_is_restored() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        session.login(lucia()).unwrap();

        let resumed = Session::open(session.into_slots()).unwrap();
        assert_eq!(resumed.user(), Some(&lucia()));
    }

    #[test]
    fn test_logout_clears_slot() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        session.login(lucia()).unwrap();
        session.logout().unwrap();
        assert!(session.user().is_none());

        let slots = session.into_slots();
        assert_eq!(slots.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_update_profile_merges_and_persists() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        session.login(lucia()).unwrap();
        session
            .update_profile(ProfileUpdate {
                name: Some("Lu".into()),
                ..Default::default()
            })
            .unwrap();

        let resumed = Session::open(session.into_slots()).unwrap();
        let user = resumed.user().unwrap();
        assert_eq!(user.name, "Lu");
        assert_eq!(user.email, "lucia@example.com");
    }

    #[test]
    fn test_update_profile_when_logged_out() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        session
            .update_profile(ProfileUpdate {
                name: Some("Nadie".into()),
                ..Default::default()
            })
            .unwrap();
        assert!(session.user().is_none());
    }

    #[test]
    fn test_corrupt_profile_is_logged_out() {
        let mut slots = MemoryStore::new();
        slots.set(USER_KEY, "not json").unwrap();
        let session = Session::open(slots).unwrap();
        assert!(!session.is_logged_in());
    }
}
