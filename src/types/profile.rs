//! User profile types

use serde::{Deserialize, Serialize};

/// The locally logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub email: String,
}

/// Partial update applied to a profile. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub email: Option<String>,
}

impl UserProfile {
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_partial_update() {
        let mut profile = UserProfile {
            name: "Lucía".into(),
            avatar: String::new(),
            email: "lucia@example.com".into(),
        };
        profile.apply(ProfileUpdate {
            name: Some("Lu".into()),
            ..Default::default()
        });
        assert_eq!(profile.name, "Lu");
        assert_eq!(profile.email, "lucia@example.com");
    }
}
