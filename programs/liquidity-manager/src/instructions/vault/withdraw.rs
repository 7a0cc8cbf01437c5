use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Withdraw LST from a vault against the holder's local claim
#[derive(Accounts)]
pub struct VaultWithdraw<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(mut)]
    pub vault_state: Account<'info, StrategyVaultState>,

    #[account(
        mut,
        seeds = [VAULT_SHARES_SEED, vault_state.key().as_ref()],
        bump = vault_shares.bump,
    )]
    pub vault_shares: Account<'info, ShareLedger>,

    /// CHECK: PDA used as token authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = vault_lst_account.mint == vault_state.lst_mint
            @ LiquidityError::InvalidMint,
        constraint = vault_lst_account.owner == vault_authority.key()
            @ LiquidityError::InvalidOwner,
    )]
    pub vault_lst_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = holder_lst_account.mint == vault_state.lst_mint
            @ LiquidityError::InvalidMint,
        constraint = holder_lst_account.owner == holder.key()
            @ LiquidityError::InvalidOwner,
    )]
    pub holder_lst_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_vault_withdraw(ctx: Context<VaultWithdraw>, lp_amount: u64) -> Result<()> {
    // CHECKS
    require!(lp_amount > 0, LiquidityError::InvalidAmount);

    let holder_key = ctx.accounts.holder.key();
    let vault_key = ctx.accounts.vault_state.key();

    require!(
        ctx.accounts.vault_shares.balance_of(&holder_key) >= lp_amount,
        LiquidityError::InsufficientBalance
    );
    require!(
        ctx.accounts.vault_state.staked_lp_balance >= lp_amount,
        LiquidityError::InsufficientVaultLiquidity
    );

    // deposited value the burned claim represented, at the pre-burn ratio
    let deposited_out = ctx
        .accounts
        .vault_state
        .calculate_claim_assets(lp_amount, ctx.accounts.vault_shares.total_shares)?;

    // EFFECTS
    ctx.accounts.vault_shares.burn(&holder_key, lp_amount)?;

    let vault = &mut ctx.accounts.vault_state;
    vault.staked_lp_balance -= lp_amount;
    vault.total_deposited = vault
        .total_deposited
        .checked_sub(deposited_out)
        .ok_or(LiquidityError::MathOverflow)?;

    // INTERACTIONS
    let authority_bump = ctx.accounts.vault_state.authority_bump;
    let authority_seeds: &[&[u8]] =
        &[VAULT_AUTHORITY_SEED, vault_key.as_ref(), &[authority_bump]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault_lst_account.to_account_info(),
                to: ctx.accounts.holder_lst_account.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            &[authority_seeds],
        ),
        lp_amount,
    )?;

    emit!(VaultWithdrawn {
        vault: vault_key,
        holder: holder_key,
        lp_amount,
        shares_burned: lp_amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
