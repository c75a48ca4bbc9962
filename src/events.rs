//! Event emission helpers for the registry contract.

use soroban_sdk::{Address, Env, String, Symbol};

use crate::profile::Role;

/// Emit an event when a user is created.
pub fn emit_user_created(env: &Env, id: &Address, username: &String) {
    let topics = (Symbol::new(env, "user_created"), id.clone());
    env.events().publish(topics, username.clone());
}

/// Emit an event when a user updates their own profile.
pub fn emit_profile_updated(env: &Env, id: &Address, changed: u32) {
    let topics = (Symbol::new(env, "profile_updated"), id.clone());
    env.events().publish(topics, changed);
}

/// Emit an event when an admin changes a user's active flag.
pub fn emit_status_changed(env: &Env, acting: &Address, target: &Address, active: bool) {
    let topics = (Symbol::new(env, "status_changed"), target.clone());
    env.events().publish(topics, (acting.clone(), active));
}

/// Emit an event when an admin changes a user's role.
pub fn emit_role_changed(env: &Env, acting: &Address, target: &Address, role: Role) {
    let topics = (Symbol::new(env, "role_changed"), target.clone());
    env.events().publish(topics, (acting.clone(), role));
}

/// Emit an event when a user is deleted.
pub fn emit_user_deleted(env: &Env, acting: &Address, target: &Address) {
    let topics = (Symbol::new(env, "user_deleted"), target.clone());
    env.events().publish(topics, acting.clone());
}

/// Emit an event when the store is rebuilt from an export.
pub fn emit_store_imported(env: &Env, count: u32) {
    let topics = (Symbol::new(env, "store_imported"),);
    env.events().publish(topics, count);
}
