use soroban_sdk::{Address, Env};

use crate::storage::DataKey;

/// Reject nested entry into a mutating operation. The Soroban host already
/// forbids contract reentrancy; the flag keeps the serialization contract
/// explicit and local.
pub fn enter(env: &Env) {
    if env.storage().temporary().has(&DataKey::Guard) {
        panic!("Reentrant call");
    }
    env.storage().temporary().set(&DataKey::Guard, &true);
}

pub fn exit(env: &Env) {
    env.storage().temporary().remove(&DataKey::Guard);
}

/// Flash-loan defense: a caller may mutate the pool at most once per ledger.
/// The record is written before the operation body runs; a failed operation
/// rolls it back and does not consume the allowance.
pub fn check_same_ledger(env: &Env, caller: &Address) {
    let sequence = env.ledger().sequence();
    let key = DataKey::LastMutation(caller.clone());
    if let Some(last) = env.storage().temporary().get::<DataKey, u32>(&key) {
        if last == sequence {
            panic!("Flash loan detected");
        }
    }
    env.storage().temporary().set(&key, &sequence);
}
