use bond_types::{PoolConfig, PoolParams, PoolState, Position};
use soroban_sdk::{contracttype, Address, Env};

/// Storage keys for the pool contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Pool collaborators (Instance storage)
    Config,
    /// Tunable parameters (Instance storage)
    Params,
    /// Reserves and liabilities (Instance storage)
    State,
    /// Origination/liquidation pause flag (Instance storage)
    Paused,
    /// Next position id counter (Instance storage)
    NextPositionId,
    /// Position records: id -> Position (Persistent storage)
    Position(u64),
    /// Reentrancy flag (Temporary storage, lives one invocation)
    Guard,
    /// Flash-loan defense: caller -> ledger sequence of its last mutation
    /// (Temporary storage)
    LastMutation(Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend persistent storage TTL for a key
pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Config ===

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> PoolConfig {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .expect("Not initialized")
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === Params ===

pub fn get_params(env: &Env) -> PoolParams {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Params)
        .expect("Not initialized")
}

pub fn set_params(env: &Env, params: &PoolParams) {
    env.storage().instance().set(&DataKey::Params, params);
    extend_instance_ttl(env);
}

// === State ===

pub fn get_state(env: &Env) -> PoolState {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::State)
        .expect("Not initialized")
}

pub fn set_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
}

// === Pause flag ===

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
    extend_instance_ttl(env);
}

// === Positions ===

/// Store a new position under the next id and advance the counter.
/// Ids start at 1 and are never reused.
pub fn allocate_position(env: &Env, position: &Position) -> u64 {
    let id = next_position_id(env);
    env.storage()
        .instance()
        .set(&DataKey::NextPositionId, &(id + 1));

    let key = DataKey::Position(id);
    env.storage().persistent().set(&key, position);
    extend_persistent_ttl(env, &key);
    id
}

pub fn get_position(env: &Env, id: u64) -> Option<Position> {
    let key = DataKey::Position(id);
    let position: Option<Position> = env.storage().persistent().get(&key);
    if position.is_some() {
        extend_persistent_ttl(env, &key);
    }
    position
}

pub fn set_position(env: &Env, id: u64, position: &Position) {
    let key = DataKey::Position(id);
    env.storage().persistent().set(&key, position);
    extend_persistent_ttl(env, &key);
}

pub fn next_position_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::NextPositionId)
        .unwrap_or(1)
}
