// Constants for the Liquidity Manager program

/// Seed for the manager's claim-share ledger PDA
pub const SHARE_LEDGER_SEED: &[u8] = b"share_ledger";

/// Seed for the vault registry PDA
pub const VAULT_REGISTRY_SEED: &[u8] = b"vault_registry";

/// Seed for the manager's unallocated-lamports reserve PDA
pub const MANAGER_RESERVE_SEED: &[u8] = b"manager_reserve";

/// Seed for a strategy vault's local claim ledger PDA
pub const VAULT_SHARES_SEED: &[u8] = b"vault_shares";

/// Seed for a strategy vault's idle-lamports reserve PDA
pub const VAULT_RESERVE_SEED: &[u8] = b"vault_reserve";

/// Seed for a strategy vault's token authority PDA
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// Maximum registered vaults before hitting account size limits
pub const MAX_VAULTS: usize = 10;

/// Maximum distinct claim holders per ledger account
pub const MAX_HOLDERS: usize = 64;

/// Venue portions are percentage points; their sum may not exceed this
pub const PORTION_DENOMINATOR: u64 = 100;

/// Default venue split for a newly created strategy vault
pub const DEFAULT_UNISWAP_PORTION: u8 = 50;
pub const DEFAULT_BALANCER_PORTION: u8 = 50;

/// Claim-token metadata exposed on the read surface
pub const SHARE_TOKEN_NAME: &str = "Aggregated Staked SOL";
pub const SHARE_TOKEN_SYMBOL: &str = "agSOL";

/// Space for ManagerState account (8 discriminator + 32 authority +
/// 8 total_assets + 8 allocated_assets + 1 reserve_bump + 128 padding)
pub const MANAGER_STATE_SIZE: usize = 8 + 32 + 8 + 8 + 1 + 128;

/// Space for StrategyVaultState account (8 discriminator + 32 admin +
/// 32 manager + 32 lst_mint + 33 restake_target + 8 idle_balance +
/// 8 manager_allocated + 8 staked_lp_balance + 8 total_deposited +
/// 1 + 1 venue portions + 1 phase + 1 reserve_bump + 1 authority_bump +
/// 120 padding)
pub const STRATEGY_VAULT_STATE_SIZE: usize =
    8 + 32 + 32 + 32 + 33 + 8 + 8 + 8 + 8 + 1 + 1 + 1 + 1 + 1 + 120;
