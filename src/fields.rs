//! Field deltas for profile updates.

use soroban_sdk::{contracttype, String};

use crate::profile::UserProfile;
use crate::validation::{validate_email, validate_text, validate_username};

/// Per-field instruction in a profile update.
///
/// Distinguishes "leave alone" from "clear" so an absent value never
/// silently wipes stored data.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldUpdate {
    /// Leave the stored value unchanged.
    Keep,

    /// Remove an optional value. Ignored for required fields.
    Clear,

    /// Replace the stored value if it passes validation.
    Set(String),
}

/// Requested changes to the mutable fields of a profile.
///
/// Identity, timestamps, role and active flag are not represented here and
/// cannot be changed through an update.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileUpdate {
    pub username: FieldUpdate,
    pub email: FieldUpdate,
    pub full_name: FieldUpdate,
    pub bio: FieldUpdate,
    pub avatar_url: FieldUpdate,
}

impl ProfileUpdate {
    /// An update that changes nothing.
    pub fn keep_all() -> Self {
        Self {
            username: FieldUpdate::Keep,
            email: FieldUpdate::Keep,
            full_name: FieldUpdate::Keep,
            bio: FieldUpdate::Keep,
            avatar_url: FieldUpdate::Keep,
        }
    }

    /// Merge this update into `profile`.
    ///
    /// Values failing validation are dropped and the stored value is kept;
    /// the rest of the update still applies. Returns the number of fields
    /// actually changed.
    pub fn apply(self, profile: &mut UserProfile) -> u32 {
        let mut changed = 0;

        if apply_required(self.username, &mut profile.username, validate_username) {
            changed += 1;
        }
        if apply_required(self.email, &mut profile.email, validate_email) {
            changed += 1;
        }
        if apply_optional(self.full_name, &mut profile.full_name) {
            changed += 1;
        }
        if apply_optional(self.bio, &mut profile.bio) {
            changed += 1;
        }
        if apply_optional(self.avatar_url, &mut profile.avatar_url) {
            changed += 1;
        }

        changed
    }
}

fn apply_required(update: FieldUpdate, slot: &mut String, is_valid: fn(&String) -> bool) -> bool {
    match update {
        FieldUpdate::Set(value) if is_valid(&value) => {
            *slot = value;
            true
        }
        _ => false,
    }
}

fn apply_optional(update: FieldUpdate, slot: &mut Option<String>) -> bool {
    match update {
        FieldUpdate::Keep => false,
        FieldUpdate::Clear => slot.take().is_some(),
        FieldUpdate::Set(value) if validate_text(&value) => {
            *slot = Some(value);
            true
        }
        FieldUpdate::Set(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ProfileDetails, Role};
    use soroban_sdk::{testutils::Address as _, Address, Env};

    fn profile(env: &Env) -> UserProfile {
        UserProfile::new(
            Address::generate(env),
            String::from_str(env, "bob"),
            String::from_str(env, "bob@x.com"),
            ProfileDetails {
                full_name: Some(String::from_str(env, "Bob")),
                bio: None,
                avatar_url: None,
            },
            7,
        )
    }

    #[test]
    fn test_keep_all_changes_nothing() {
        let env = Env::default();
        let mut p = profile(&env);
        let before = p.clone();

        assert_eq!(ProfileUpdate::keep_all().apply(&mut p), 0);
        assert_eq!(p, before);
    }

    #[test]
    fn test_invalid_email_is_dropped() {
        let env = Env::default();
        let mut p = profile(&env);

        let mut update = ProfileUpdate::keep_all();
        update.email = FieldUpdate::Set(String::from_str(&env, "bad"));
        update.bio = FieldUpdate::Set(String::from_str(&env, "hello"));

        assert_eq!(update.apply(&mut p), 1);
        assert_eq!(p.email, String::from_str(&env, "bob@x.com"));
        assert_eq!(p.bio, Some(String::from_str(&env, "hello")));
    }

    #[test]
    fn test_oversized_text_is_dropped() {
        let env = Env::default();
        let mut p = profile(&env);
        let long = [b'a'; crate::validation::MAX_TEXT_LENGTH as usize + 1];

        let mut update = ProfileUpdate::keep_all();
        update.full_name = FieldUpdate::Set(String::from_bytes(&env, &long));
        update.avatar_url = FieldUpdate::Set(String::from_bytes(&env, &long));

        assert_eq!(update.apply(&mut p), 0);
        assert_eq!(p.full_name, Some(String::from_str(&env, "Bob")));
        assert_eq!(p.avatar_url, None);
    }

    #[test]
    fn test_clear_optional_but_not_required() {
        let env = Env::default();
        let mut p = profile(&env);

        let mut update = ProfileUpdate::keep_all();
        update.full_name = FieldUpdate::Clear;
        update.username = FieldUpdate::Clear;
        update.email = FieldUpdate::Clear;

        assert_eq!(update.apply(&mut p), 1);
        assert_eq!(p.full_name, None);
        assert_eq!(p.username, String::from_str(&env, "bob"));
        assert_eq!(p.email, String::from_str(&env, "bob@x.com"));
    }

    #[test]
    fn test_update_never_touches_authorization() {
        let env = Env::default();
        let mut p = profile(&env);

        let update = ProfileUpdate {
            username: FieldUpdate::Set(String::from_str(&env, "robert")),
            email: FieldUpdate::Set(String::from_str(&env, "robert@x.com")),
            full_name: FieldUpdate::Set(String::from_str(&env, "Robert")),
            bio: FieldUpdate::Set(String::from_str(&env, "bio")),
            avatar_url: FieldUpdate::Set(String::from_str(&env, "https://x.com/a.png")),
        };

        assert_eq!(update.apply(&mut p), 5);
        assert_eq!(p.role, Role::Visitor);
        assert!(p.is_active);
        assert_eq!(p.created_at, 7);
    }
}
