//! # Soroban User Registry
//!
//! Role-gated user identity registry for Soroban.
//!
//! Each user is keyed by the `Address` that registered it. The contract
//! provides:
//!
//! - Registration with validated username and email
//! - Self-service profile updates with per-field deltas
//! - Admin-only role and status changes, listing and deletion of others
//! - Export/import of the whole store for migrations across upgrades
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Bootstrap with the first admin
//! client.init(&operator, &username, &email);
//!
//! // Self-registration always starts as a visitor
//! let profile = client.create_user(&user, &username, &email, &details, &None);
//!
//! // Promote through the privileged path
//! client.set_role(&operator, &user, &Role::Moderator);
//!
//! // Carry the store over to a new deployment
//! let entries = old_client.export(&operator, &None, &None);
//! new_client.import(&operator, &entries, &true);
//! ```

#![no_std]

mod config;
mod events;
mod fields;
mod profile;
mod storage;
mod validation;

pub use config::{RegistryConfig, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use fields::{FieldUpdate, ProfileUpdate};
pub use profile::{has_privilege, ProfileDetails, Role, UserProfile};
pub use storage::StoreKey;
pub use validation::{
    validate_email, validate_username, MAX_EMAIL_LENGTH, MAX_TEXT_LENGTH, MAX_USERNAME_LENGTH,
    MIN_EMAIL_LENGTH, MIN_USERNAME_LENGTH,
};

use soroban_sdk::{
    contract, contracterror, contractimpl, log, Address, BytesN, Env, Map, String, Vec,
};

use crate::events::*;

/// Error codes for the registry contract.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    /// Contract has already been initialized.
    AlreadyInitialized = 1,
    /// Contract has not been initialized.
    NotInitialized = 2,
    /// Acting principal is unknown or lacks the required privilege.
    NotAuthorized = 3,
    /// Input failed validation.
    InvalidInput = 4,
    /// A profile already exists for this address.
    AlreadyExists = 5,
    /// No profile exists for this address.
    UserNotFound = 6,
}

#[contract]
pub struct UserRegistryContract;

#[contractimpl]
impl UserRegistryContract {
    // ========== Initialization ==========

    /// Initialize the registry.
    ///
    /// `operator` becomes the lifecycle operator and receives the first
    /// admin profile. Must be called once before any other operation.
    pub fn init(
        env: Env,
        operator: Address,
        username: String,
        email: String,
    ) -> Result<UserProfile, RegistryError> {
        if storage::operator(&env).is_some() {
            return Err(RegistryError::AlreadyInitialized);
        }

        operator.require_auth();

        if !validate_username(&username) || !validate_email(&email) {
            return Err(RegistryError::InvalidInput);
        }

        let details = ProfileDetails {
            full_name: None,
            bio: None,
            avatar_url: None,
        };
        let mut profile = UserProfile::new(
            operator.clone(),
            username.clone(),
            email,
            details,
            env.ledger().timestamp(),
        );
        profile.role = Role::Admin;

        storage::set_operator(&env, &operator);
        storage::set_config(&env, &RegistryConfig::default());
        storage::insert_user(&env, &profile);

        log!(&env, "registry initialized", operator);
        emit_user_created(&env, &operator, &username);

        Ok(profile)
    }

    /// Get the lifecycle operator address.
    pub fn operator(env: Env) -> Result<Address, RegistryError> {
        storage::operator(&env).ok_or(RegistryError::NotInitialized)
    }

    /// Get the current registry limits.
    pub fn config(env: Env) -> RegistryConfig {
        storage::config(&env)
    }

    /// Replace the registry limits (admin only).
    pub fn set_config(
        env: Env,
        acting: Address,
        config: RegistryConfig,
    ) -> Result<(), RegistryError> {
        Self::require_privileged(&env, &acting)?;

        if !config.is_valid() {
            return Err(RegistryError::InvalidInput);
        }

        storage::set_config(&env, &config);
        Ok(())
    }

    // ========== Registration ==========

    /// Register a new user.
    ///
    /// # Arguments
    /// * `id` - Address of the registering user, becomes the primary key
    /// * `username` - 3-32 chars of letters, digits, `_`, `.`, `-`
    /// * `email` - Syntactically plausible email address
    /// * `details` - Optional full name, bio and avatar URL
    /// * `requested_role` - Must be `None` or `Visitor`
    ///
    /// # Errors
    /// - `AlreadyExists` if `id` already has a profile
    /// - `NotAuthorized` if a role above `Visitor` is requested
    /// - `InvalidInput` if any field fails validation
    pub fn create_user(
        env: Env,
        id: Address,
        username: String,
        email: String,
        details: ProfileDetails,
        requested_role: Option<Role>,
    ) -> Result<UserProfile, RegistryError> {
        if storage::operator(&env).is_none() {
            return Err(RegistryError::NotInitialized);
        }

        id.require_auth();

        if storage::has_user(&env, &id) {
            return Err(RegistryError::AlreadyExists);
        }

        // Elevated roles are only granted through set_role.
        // An existing id reports AlreadyExists first, whatever the role asked.
        if matches!(requested_role, Some(role) if role != Role::Visitor) {
            return Err(RegistryError::NotAuthorized);
        }

        if !validate_username(&username)
            || !validate_email(&email)
            || !validation::validate_details(&details.full_name, &details.bio, &details.avatar_url)
        {
            return Err(RegistryError::InvalidInput);
        }

        let profile = UserProfile::new(
            id.clone(),
            username.clone(),
            email,
            details,
            env.ledger().timestamp(),
        );
        storage::insert_user(&env, &profile);

        emit_user_created(&env, &id, &username);

        Ok(profile)
    }

    // ========== Queries ==========

    /// Get a profile by address.
    pub fn get_profile(env: Env, id: Address) -> Option<UserProfile> {
        storage::load_user(&env, &id)
    }

    /// Get total user count.
    pub fn count_users(env: Env) -> u32 {
        storage::count(&env)
    }

    /// List profiles in registration order (admin only).
    ///
    /// `limit` defaults to the configured page size and is capped at the
    /// configured maximum. An `offset` past the end yields an empty page.
    pub fn list_users(
        env: Env,
        acting: Address,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<UserProfile>, RegistryError> {
        Self::require_privileged(&env, &acting)?;

        let mut page = Vec::new(&env);
        for (_, profile) in Self::page(&env, limit, offset).iter() {
            page.push_back(profile);
        }

        Ok(page)
    }

    // ========== Profile Updates ==========

    /// Apply field deltas to the caller's own profile.
    ///
    /// Invalid values are dropped and the stored value is kept; the call
    /// still succeeds. Role, status and timestamps other than `updated_at`
    /// are never changed here.
    pub fn update_profile(
        env: Env,
        id: Address,
        update: ProfileUpdate,
    ) -> Result<UserProfile, RegistryError> {
        id.require_auth();

        let mut profile = storage::load_user(&env, &id).ok_or(RegistryError::UserNotFound)?;

        let changed = update.apply(&mut profile);
        profile.touch(env.ledger().timestamp());
        storage::save_user(&env, &profile);

        emit_profile_updated(&env, &id, changed);

        Ok(profile)
    }

    // ========== Admin Functions ==========

    /// Activate or suspend a user (admin only).
    pub fn set_status(
        env: Env,
        acting: Address,
        target: Address,
        active: bool,
    ) -> Result<UserProfile, RegistryError> {
        Self::require_privileged(&env, &acting)?;

        let mut profile =
            storage::load_user(&env, &target).ok_or(RegistryError::UserNotFound)?;

        profile.is_active = active;
        profile.touch(env.ledger().timestamp());
        storage::save_user(&env, &profile);

        emit_status_changed(&env, &acting, &target, active);

        Ok(profile)
    }

    /// Change a user's role (admin only).
    pub fn set_role(
        env: Env,
        acting: Address,
        target: Address,
        role: Role,
    ) -> Result<UserProfile, RegistryError> {
        Self::require_privileged(&env, &acting)?;

        let mut profile =
            storage::load_user(&env, &target).ok_or(RegistryError::UserNotFound)?;

        profile.role = role;
        profile.touch(env.ledger().timestamp());
        storage::save_user(&env, &profile);

        emit_role_changed(&env, &acting, &target, role);

        Ok(profile)
    }

    /// Delete a user.
    ///
    /// Allowed for an active user on itself, or for an admin. An acting
    /// address with no profile of its own is never authorized, and a
    /// suspended user cannot delete itself to shed the suspension.
    pub fn delete_user(env: Env, target: Address, acting: Address) -> Result<(), RegistryError> {
        acting.require_auth();

        let actor = storage::load_user(&env, &acting).ok_or(RegistryError::NotAuthorized)?;
        let allowed = if acting == target {
            actor.is_active
        } else {
            has_privilege(&actor)
        };
        if !allowed {
            return Err(RegistryError::NotAuthorized);
        }

        if !storage::has_user(&env, &target) {
            return Err(RegistryError::UserNotFound);
        }

        storage::delete_user(&env, &target);

        emit_user_deleted(&env, &acting, &target);

        Ok(())
    }

    // ========== Lifecycle ==========

    /// Export a page of `(id, profile)` pairs in enumeration order
    /// (operator only).
    ///
    /// Paged like `list_users`; walk `offset` until an empty page to export
    /// the whole store.
    pub fn export(
        env: Env,
        operator: Address,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<(Address, UserProfile)>, RegistryError> {
        Self::require_operator(&env, &operator)?;

        Ok(Self::page(&env, limit, offset))
    }

    /// Load exported entries into the store (operator only).
    ///
    /// With `replace` the existing store is cleared first; otherwise the
    /// entries are appended after the current ones, which lets a large
    /// export be imported page by page. Every entry is validated before
    /// anything is written; on error the store is left untouched. Returns
    /// the new user count.
    pub fn import(
        env: Env,
        operator: Address,
        entries: Vec<(Address, UserProfile)>,
        replace: bool,
    ) -> Result<u32, RegistryError> {
        Self::require_operator(&env, &operator)?;
        Self::validate_entries(&env, &entries, replace)?;

        if replace {
            storage::clear(&env);
        }

        for (_, profile) in entries.iter() {
            storage::insert_user(&env, &profile);
        }

        let count = storage::count(&env);
        log!(&env, "store imported", count);
        emit_store_imported(&env, count);

        Ok(count)
    }

    /// Upgrade the contract WASM (operator only).
    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), RegistryError> {
        let operator = storage::operator(&env).ok_or(RegistryError::NotInitialized)?;

        operator.require_auth();

        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    // ========== Internal Helpers ==========

    fn require_privileged(env: &Env, acting: &Address) -> Result<UserProfile, RegistryError> {
        acting.require_auth();

        let profile = storage::load_user(env, acting).ok_or(RegistryError::NotAuthorized)?;
        if !has_privilege(&profile) {
            return Err(RegistryError::NotAuthorized);
        }

        Ok(profile)
    }

    fn require_operator(env: &Env, caller: &Address) -> Result<(), RegistryError> {
        let operator = storage::operator(env).ok_or(RegistryError::NotInitialized)?;

        if *caller != operator {
            return Err(RegistryError::NotAuthorized);
        }

        caller.require_auth();
        Ok(())
    }

    /// Collect the `[offset, offset + limit)` window of the store.
    fn page(env: &Env, limit: Option<u32>, offset: Option<u32>) -> Vec<(Address, UserProfile)> {
        let size = storage::config(env).page_size(limit);
        let (start, end) = config::page_bounds(storage::count(env), offset.unwrap_or(0), size);

        let mut entries = Vec::new(env);
        for pos in start..end {
            if let Some(id) = storage::slot(env, pos) {
                if let Some(profile) = storage::load_user(env, &id) {
                    entries.push_back((id, profile));
                }
            }
        }

        entries
    }

    fn validate_entries(
        env: &Env,
        entries: &Vec<(Address, UserProfile)>,
        replace: bool,
    ) -> Result<(), RegistryError> {
        let mut seen: Map<Address, bool> = Map::new(env);

        for (id, profile) in entries.iter() {
            let valid = id == profile.id
                && !seen.contains_key(id.clone())
                && (replace || !storage::has_user(env, &id))
                && validate_username(&profile.username)
                && validate_email(&profile.email)
                && validation::validate_details(
                    &profile.full_name,
                    &profile.bio,
                    &profile.avatar_url,
                )
                && profile.created_at <= profile.updated_at;

            if !valid {
                return Err(RegistryError::InvalidInput);
            }
            seen.set(id, true);
        }

        Ok(())
    }
}
