use anchor_lang::prelude::*;

use crate::{constants::*, events::*, state::*};

/// Initialize a new liquidity manager
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Manager authority - can manage the registry and recall funds
    /// Security: Must be signer, stored in state
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Manager state, a fresh keypair account
    #[account(init, payer = authority, space = MANAGER_STATE_SIZE)]
    pub manager_state: Account<'info, ManagerState>,

    /// Claim-share ledger PDA for this manager
    #[account(
        init,
        payer = authority,
        space = ShareLedger::SPACE,
        seeds = [SHARE_LEDGER_SEED, manager_state.key().as_ref()],
        bump
    )]
    pub share_ledger: Account<'info, ShareLedger>,

    /// Vault registry PDA for this manager
    #[account(
        init,
        payer = authority,
        space = VaultRegistry::SPACE,
        seeds = [VAULT_REGISTRY_SEED, manager_state.key().as_ref()],
        bump
    )]
    pub vault_registry: Account<'info, VaultRegistry>,

    /// Reserve PDA holding the manager's unallocated lamports
    #[account(
        seeds = [MANAGER_RESERVE_SEED, manager_state.key().as_ref()],
        bump
    )]
    pub manager_reserve: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_initialize(ctx: Context<Initialize>) -> Result<()> {
    let manager_key = ctx.accounts.manager_state.key();

    let manager = &mut ctx.accounts.manager_state;
    manager.authority = ctx.accounts.authority.key();
    manager.total_assets = 0;
    manager.allocated_assets = 0;
    manager.reserve_bump = ctx.bumps.manager_reserve;
    manager._reserved = [0; 128];

    let ledger = &mut ctx.accounts.share_ledger;
    ledger.owner = manager_key;
    ledger.total_shares = 0;
    ledger.holders = Vec::new();
    ledger.bump = ctx.bumps.share_ledger;

    let registry = &mut ctx.accounts.vault_registry;
    registry.manager = manager_key;
    registry.total_weight = 0;
    registry.entries = Vec::new();
    registry.bump = ctx.bumps.vault_registry;

    emit!(ManagerInitialized {
        manager: manager_key,
        authority: ctx.accounts.authority.key(),
        share_token_name: SHARE_TOKEN_NAME.to_string(),
        share_token_symbol: SHARE_TOKEN_SYMBOL.to_string(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
