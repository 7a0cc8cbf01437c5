use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Recall idle lamports from a vault reserve back to the manager reserve
///
/// The explicit counterpart to `remove_vault`'s no-drain policy. Works
/// whether or not the vault is still registered, so a removed vault can be
/// drained afterwards. Only idle funds move; a staked position must go
/// through `unstake_all` first.
#[derive(Accounts)]
pub struct RecallVault<'info> {
    /// Manager authority - only they can move allocated funds
    pub authority: Signer<'info>,

    #[account(mut, has_one = authority @ LiquidityError::Unauthorized)]
    pub manager_state: Account<'info, ManagerState>,

    #[account(
        mut,
        constraint = vault_state.manager == manager_state.key()
            @ LiquidityError::VaultAccountMismatch,
    )]
    pub vault_state: Account<'info, StrategyVaultState>,

    #[account(
        mut,
        seeds = [VAULT_RESERVE_SEED, vault_state.key().as_ref()],
        bump = vault_state.reserve_bump,
    )]
    pub vault_reserve: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [MANAGER_RESERVE_SEED, manager_state.key().as_ref()],
        bump = manager_state.reserve_bump,
    )]
    pub manager_reserve: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_recall_vault(ctx: Context<RecallVault>, lamports: u64) -> Result<()> {
    require!(lamports > 0, LiquidityError::InvalidAmount);

    // EFFECTS: bounded by the manager's own allocation, so a recall can
    // never take direct depositors' idle lamports
    ctx.accounts.vault_state.release_allocation(lamports)?;
    let manager = &mut ctx.accounts.manager_state;
    manager.allocated_assets = manager
        .allocated_assets
        .checked_sub(lamports)
        .ok_or(LiquidityError::MathOverflow)?;

    // INTERACTIONS: move the lamports, signed by the vault reserve PDA
    let vault_key = ctx.accounts.vault_state.key();
    let reserve_seeds: &[&[u8]] = &[
        VAULT_RESERVE_SEED,
        vault_key.as_ref(),
        &[ctx.accounts.vault_state.reserve_bump],
    ];
    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault_reserve.to_account_info(),
                to: ctx.accounts.manager_reserve.to_account_info(),
            },
            &[reserve_seeds],
        ),
        lamports,
    )?;

    emit!(VaultFundsRecalled {
        manager: ctx.accounts.manager_state.key(),
        vault: vault_key,
        lamports,
        allocated_assets: ctx.accounts.manager_state.allocated_assets,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
