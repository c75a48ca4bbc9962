//! Storage keys and typed accessors for the registry contract.

use soroban_sdk::{contracttype, Address, Env};

use crate::config::RegistryConfig;
use crate::profile::UserProfile;

/// Storage keys for the registry contract.
#[contracttype]
#[derive(Clone, Debug)]
pub enum StoreKey {
    /// Lifecycle operator allowed to export, import and upgrade.
    Operator,

    /// Registry limits.
    Config,

    /// Number of stored profiles, and the next free slot.
    Count,

    /// Maps an enumeration slot to the Address stored there.
    /// Drives listing and export pagination.
    Slot(u32),

    /// Maps Address to its enumeration slot.
    Position(Address),

    /// Maps Address to UserProfile.
    /// Primary storage for profile data.
    User(Address),
}

/// Time-to-live for profile data in ledger entries.
pub const PROFILE_TTL_THRESHOLD: u32 = 518400; // ~30 days
pub const PROFILE_TTL_EXTEND: u32 = 2592000; // ~150 days

pub fn operator(env: &Env) -> Option<Address> {
    env.storage().instance().get(&StoreKey::Operator)
}

pub fn set_operator(env: &Env, operator: &Address) {
    env.storage().instance().set(&StoreKey::Operator, operator);
}

pub fn config(env: &Env) -> RegistryConfig {
    env.storage()
        .instance()
        .get(&StoreKey::Config)
        .unwrap_or_default()
}

pub fn set_config(env: &Env, config: &RegistryConfig) {
    env.storage().instance().set(&StoreKey::Config, config);
}

pub fn has_user(env: &Env, id: &Address) -> bool {
    env.storage().persistent().has(&StoreKey::User(id.clone()))
}

pub fn load_user(env: &Env, id: &Address) -> Option<UserProfile> {
    env.storage().persistent().get(&StoreKey::User(id.clone()))
}

/// Write a profile and extend its TTL.
pub fn save_user(env: &Env, profile: &UserProfile) {
    let key = StoreKey::User(profile.id.clone());
    env.storage().persistent().set(&key, profile);
    env.storage()
        .persistent()
        .extend_ttl(&key, PROFILE_TTL_THRESHOLD, PROFILE_TTL_EXTEND);
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&StoreKey::Count).unwrap_or(0)
}

fn set_count(env: &Env, count: u32) {
    env.storage().instance().set(&StoreKey::Count, &count);
}

/// Address stored at enumeration slot `slot`.
pub fn slot(env: &Env, slot: u32) -> Option<Address> {
    env.storage().persistent().get(&StoreKey::Slot(slot))
}

fn set_slot(env: &Env, slot: u32, id: &Address) {
    let slot_key = StoreKey::Slot(slot);
    let position_key = StoreKey::Position(id.clone());
    let persistent = env.storage().persistent();

    persistent.set(&slot_key, id);
    persistent.set(&position_key, &slot);
    persistent.extend_ttl(&slot_key, PROFILE_TTL_THRESHOLD, PROFILE_TTL_EXTEND);
    persistent.extend_ttl(&position_key, PROFILE_TTL_THRESHOLD, PROFILE_TTL_EXTEND);
}

/// Insert a new profile at the next free slot.
pub fn insert_user(env: &Env, profile: &UserProfile) {
    let next = count(env);
    set_slot(env, next, &profile.id);
    set_count(env, next + 1);
    save_user(env, profile);
}

/// Remove a profile and its slot.
///
/// The last slot moves into the freed one, so enumeration order is
/// registration order only until the first deletion.
pub fn delete_user(env: &Env, id: &Address) {
    let persistent = env.storage().persistent();
    let position_key = StoreKey::Position(id.clone());

    if let Some(pos) = persistent.get::<_, u32>(&position_key) {
        let last = count(env).saturating_sub(1);
        if pos != last {
            if let Some(moved) = slot(env, last) {
                set_slot(env, pos, &moved);
            }
        }
        persistent.remove(&StoreKey::Slot(last));
        persistent.remove(&position_key);
        set_count(env, last);
    }

    persistent.remove(&StoreKey::User(id.clone()));
}

/// Remove every profile and slot.
pub fn clear(env: &Env) {
    let persistent = env.storage().persistent();

    for pos in 0..count(env) {
        if let Some(id) = slot(env, pos) {
            persistent.remove(&StoreKey::User(id.clone()));
            persistent.remove(&StoreKey::Position(id));
        }
        persistent.remove(&StoreKey::Slot(pos));
    }
    set_count(env, 0);
}
