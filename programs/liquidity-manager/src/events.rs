use anchor_lang::prelude::*;

/// Event emitted when a new manager is initialized
#[event]
pub struct ManagerInitialized {
    pub manager: Pubkey,
    pub authority: Pubkey,
    pub share_token_name: String,
    pub share_token_symbol: String,
    pub timestamp: i64,
}

/// Event emitted when lamports are staked into the manager
#[event]
pub struct Staked {
    pub manager: Pubkey,
    pub depositor: Pubkey,
    pub lamports: u64,
    pub shares_minted: u64,
    pub allocated: u64,
    pub total_assets: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when shares are redeemed for lamports
#[event]
pub struct Unstaked {
    pub manager: Pubkey,
    pub unstaker: Pubkey,
    pub shares_burned: u64,
    pub lamports_out: u64,
    pub total_assets: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when a vault is registered for allocation
#[event]
pub struct VaultAdded {
    pub manager: Pubkey,
    pub vault: Pubkey,
    pub weight: u64,
    pub total_weight: u64,
    pub timestamp: i64,
}

/// Event emitted when a vault is removed from the registry
#[event]
pub struct VaultRemoved {
    pub manager: Pubkey,
    pub vault: Pubkey,
    pub total_weight: u64,
    pub timestamp: i64,
}

/// Event emitted when idle funds are recalled from a vault reserve
#[event]
pub struct VaultFundsRecalled {
    pub manager: Pubkey,
    pub vault: Pubkey,
    pub lamports: u64,
    pub allocated_assets: u64,
    pub timestamp: i64,
}

/// Event emitted when a strategy vault is created
#[event]
pub struct VaultCreated {
    pub vault: Pubkey,
    pub admin: Pubkey,
    pub manager: Pubkey,
    pub lst_mint: Pubkey,
    pub restake_target: Option<Pubkey>,
    pub timestamp: i64,
}

/// Event emitted on a direct deposit into a strategy vault
#[event]
pub struct VaultDeposited {
    pub vault: Pubkey,
    pub depositor: Pubkey,
    pub lamports: u64,
    pub shares_minted: u64,
    pub idle_balance: u64,
    pub timestamp: i64,
}

/// Event emitted when a vault's venue portions are changed
#[event]
pub struct WeightsUpdated {
    pub vault: Pubkey,
    pub uniswap_portion: u8,
    pub balancer_portion: u8,
    pub timestamp: i64,
}

/// Event emitted when a vault swaps its idle balance into the LST
#[event]
pub struct VaultStaked {
    pub vault: Pubkey,
    pub lamports_in: u64,
    pub tokens_received: u64,
    pub restaked: bool,
    pub staked_lp_balance: u64,
    pub timestamp: i64,
}

/// Event emitted when a vault swaps its LST position back to lamports
#[event]
pub struct VaultUnstaked {
    pub vault: Pubkey,
    pub tokens_in: u64,
    pub lamports_received: u64,
    pub idle_balance: u64,
    pub timestamp: i64,
}

/// Event emitted when a holder withdraws LST against their vault claim
#[event]
pub struct VaultWithdrawn {
    pub vault: Pubkey,
    pub holder: Pubkey,
    pub lp_amount: u64,
    pub shares_burned: u64,
    pub timestamp: i64,
}
