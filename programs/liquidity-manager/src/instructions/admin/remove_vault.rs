use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Remove a vault from the registry
///
/// Removal only clears the registry slot and its weight: funds already
/// pushed into the vault stay where they are and keep backing the manager's
/// claims. Draining is a separate, explicit operation (`recall_vault`), so
/// it also works after removal.
#[derive(Accounts)]
pub struct RemoveVault<'info> {
    /// Manager authority - only they can mutate the registry
    pub authority: Signer<'info>,

    #[account(has_one = authority @ LiquidityError::Unauthorized)]
    pub manager_state: Account<'info, ManagerState>,

    #[account(
        mut,
        seeds = [VAULT_REGISTRY_SEED, manager_state.key().as_ref()],
        bump = vault_registry.bump,
    )]
    pub vault_registry: Account<'info, VaultRegistry>,
}

pub fn handle_remove_vault(ctx: Context<RemoveVault>, vault: Pubkey) -> Result<()> {
    let registry = &mut ctx.accounts.vault_registry;

    registry.remove(&vault)?;

    emit!(VaultRemoved {
        manager: registry.manager,
        vault,
        total_weight: registry.total_weight,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
