pub mod manager;
pub mod share_ledger;
pub mod strategy_vault;
pub mod vault_registry;

pub use manager::*;
pub use share_ledger::*;
pub use strategy_vault::*;
pub use vault_registry::*;
