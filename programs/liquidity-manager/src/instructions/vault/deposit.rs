use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Deposit lamports directly into a strategy vault
///
/// Mints the depositor's proportional claim on the vault-local ledger and
/// raises the idle balance; the funds join the next `stake_all` swap.
#[derive(Accounts)]
pub struct VaultDeposit<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

    #[account(mut)]
    pub vault_state: Account<'info, StrategyVaultState>,

    #[account(
        mut,
        seeds = [VAULT_SHARES_SEED, vault_state.key().as_ref()],
        bump = vault_shares.bump,
    )]
    pub vault_shares: Account<'info, ShareLedger>,

    #[account(
        mut,
        seeds = [VAULT_RESERVE_SEED, vault_state.key().as_ref()],
        bump = vault_state.reserve_bump,
    )]
    pub vault_reserve: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_vault_deposit(ctx: Context<VaultDeposit>, lamports: u64) -> Result<()> {
    // CHECKS
    require!(lamports > 0, LiquidityError::InvalidAmount);

    let depositor_key = ctx.accounts.depositor.key();

    let shares_to_mint = ctx
        .accounts
        .vault_state
        .calculate_claim_shares(lamports, ctx.accounts.vault_shares.total_shares)?;

    // EFFECTS
    ctx.accounts
        .vault_shares
        .mint(&depositor_key, shares_to_mint)?;

    let vault = &mut ctx.accounts.vault_state;
    vault.idle_balance = vault
        .idle_balance
        .checked_add(lamports)
        .ok_or(LiquidityError::MathOverflow)?;
    vault.total_deposited = vault
        .total_deposited
        .checked_add(lamports)
        .ok_or(LiquidityError::MathOverflow)?;

    // INTERACTIONS
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.depositor.to_account_info(),
                to: ctx.accounts.vault_reserve.to_account_info(),
            },
        ),
        lamports,
    )?;

    emit!(VaultDeposited {
        vault: ctx.accounts.vault_state.key(),
        depositor: depositor_key,
        lamports,
        shares_minted: shares_to_mint,
        idle_balance: ctx.accounts.vault_state.idle_balance,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
