use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Register a strategy vault for weighted allocation
#[derive(Accounts)]
pub struct AddVault<'info> {
    /// Manager authority - only they can mutate the registry
    pub authority: Signer<'info>,

    /// Security: has_one constraint validates authority from state
    #[account(has_one = authority @ LiquidityError::Unauthorized)]
    pub manager_state: Account<'info, ManagerState>,

    #[account(
        mut,
        seeds = [VAULT_REGISTRY_SEED, manager_state.key().as_ref()],
        bump = vault_registry.bump,
    )]
    pub vault_registry: Account<'info, VaultRegistry>,

    /// Vault being registered; must belong to this manager
    #[account(
        mut,
        constraint = vault_state.manager == manager_state.key()
            @ LiquidityError::VaultAccountMismatch,
    )]
    pub vault_state: Account<'info, StrategyVaultState>,
}

pub fn handle_add_vault(
    ctx: Context<AddVault>,
    weight: u64,
    restake_target: Option<Pubkey>,
) -> Result<()> {
    let registry = &mut ctx.accounts.vault_registry;
    let vault_key = ctx.accounts.vault_state.key();

    registry.add(vault_key, weight, restake_target)?;

    // the registry entry is the single source of the restake hook; a
    // re-add without a target clears a previously configured one
    ctx.accounts.vault_state.set_restake_target(restake_target);

    emit!(VaultAdded {
        manager: registry.manager,
        vault: vault_key,
        weight,
        total_weight: registry.total_weight,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
