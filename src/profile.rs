//! Profile struct and related types.

use soroban_sdk::{contracttype, Address, String};

/// Authorization role attached to every profile.
///
/// New registrations always start as `Visitor`. Only an existing admin can
/// move a profile to another role.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 0,
    Moderator = 1,
    Supporter = 2,
    Visitor = 3,
}

/// Optional free-text details supplied at registration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileDetails {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// A registered user.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserProfile {
    /// Principal identifier. Primary key, never changes.
    pub id: Address,

    /// Required handle (3-32 chars).
    pub username: String,

    /// Required contact address, validated on every write.
    pub email: String,

    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,

    /// Ledger timestamp (seconds) at creation. Write-once.
    pub created_at: u64,

    /// Ledger timestamp (seconds) of the last mutation.
    pub updated_at: u64,

    pub role: Role,

    /// Cleared by an admin to suspend a user without deleting the record.
    pub is_active: bool,
}

impl UserProfile {
    /// Create a new profile with the lowest role.
    pub fn new(
        id: Address,
        username: String,
        email: String,
        details: ProfileDetails,
        created_at: u64,
    ) -> Self {
        Self {
            id,
            username,
            email,
            full_name: details.full_name,
            bio: details.bio,
            avatar_url: details.avatar_url,
            created_at,
            updated_at: created_at,
            role: Role::Visitor,
            is_active: true,
        }
    }

    /// Stamp a mutation.
    pub fn touch(&mut self, now: u64) {
        self.updated_at = now;
    }
}

/// Whether `profile` may perform privileged operations.
///
/// Every admin-gated entry point goes through this check. A suspended
/// admin loses its privileges until reactivated.
pub fn has_privilege(profile: &UserProfile) -> bool {
    profile.role == Role::Admin && profile.is_active
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Env};

    fn sample(env: &Env) -> UserProfile {
        UserProfile::new(
            Address::generate(env),
            String::from_str(env, "bob"),
            String::from_str(env, "bob@x.com"),
            ProfileDetails {
                full_name: None,
                bio: None,
                avatar_url: None,
            },
            42,
        )
    }

    #[test]
    fn test_new_profile_defaults() {
        let env = Env::default();
        let profile = sample(&env);

        assert_eq!(profile.created_at, 42);
        assert_eq!(profile.updated_at, 42);
        assert_eq!(profile.role, Role::Visitor);
        assert!(profile.is_active);
        assert!(!has_privilege(&profile));
    }

    #[test]
    fn test_privilege_requires_active_admin() {
        let env = Env::default();
        let mut profile = sample(&env);

        profile.role = Role::Moderator;
        assert!(!has_privilege(&profile));

        profile.role = Role::Admin;
        assert!(has_privilege(&profile));

        profile.is_active = false;
        assert!(!has_privilege(&profile));
    }
}
