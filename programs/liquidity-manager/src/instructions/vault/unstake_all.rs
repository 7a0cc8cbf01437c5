use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, router, state::*};

/// Swap the vault's whole LST position back to lamports
///
/// Runs the Staked -> Unstaking -> Idle leg through the router's reverse
/// entry point; the lamport delta on the vault reserve is verified against
/// the caller's minimum-output bound. A restake-configured vault must have
/// its tokens back in the vault token account before the reverse swap.
#[derive(Accounts)]
pub struct UnstakeAll<'info> {
    /// Vault administrator - only they can drive the swap lifecycle
    pub admin: Signer<'info>,

    #[account(mut, has_one = admin @ LiquidityError::Unauthorized)]
    pub vault_state: Account<'info, StrategyVaultState>,

    #[account(
        mut,
        seeds = [VAULT_RESERVE_SEED, vault_state.key().as_ref()],
        bump = vault_state.reserve_bump,
    )]
    pub vault_reserve: SystemAccount<'info>,

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

    /// External swap router program
    /// CHECK: external program, output is verified by balance delta
    pub router_program: UncheckedAccount<'info>,

    /// Router-owned state, passed through opaquely
    /// CHECK: owned and validated by the router program
    #[account(mut)]
    pub router_state: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handle_unstake_all(
    ctx: Context<UnstakeAll>,
    min_lamports_out: u64,
    ideal_lamports_out: u64,
) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();

    let tokens_in = ctx.accounts.vault_state.begin_unstake()?;

    // the reverse swap needs the tokens locally
    require!(
        ctx.accounts.vault_lst_account.amount >= tokens_in,
        LiquidityError::InsufficientVaultLiquidity
    );

    let lamports_before = ctx.accounts.vault_reserve.lamports();

    // INTERACTIONS: the token authority PDA signs so the router can pull
    // the LST in; proceeds land on the vault reserve
    let authority_bump = ctx.accounts.vault_state.authority_bump;
    let authority_seeds: &[&[u8]] =
        &[VAULT_AUTHORITY_SEED, vault_key.as_ref(), &[authority_bump]];
    router::swap_from(
        &router::SwapAccounts {
            router_program: &ctx.accounts.router_program.to_account_info(),
            router_state: &ctx.accounts.router_state.to_account_info(),
            reserve: &ctx.accounts.vault_reserve.to_account_info(),
            token_account: &ctx.accounts.vault_lst_account.to_account_info(),
            token_authority: &ctx.accounts.vault_authority.to_account_info(),
            token_program: &ctx.accounts.token_program.to_account_info(),
            system_program: &ctx.accounts.system_program.to_account_info(),
        },
        &router::SwapFromArgs {
            uniswap_portion: ctx.accounts.vault_state.uniswap_portion,
            balancer_portion: ctx.accounts.vault_state.balancer_portion,
            min_lamports_out,
            ideal_lamports_out,
            tokens_in,
        },
        &[authority_seeds],
    )?;

    // never trust the router: measure what actually arrived
    let received = ctx
        .accounts
        .vault_reserve
        .lamports()
        .checked_sub(lamports_before)
        .ok_or(LiquidityError::MathOverflow)?;
    require!(
        received >= min_lamports_out,
        LiquidityError::ExternalCallFailed
    );

    // EFFECTS
    ctx.accounts.vault_state.finish_unstake(received)?;

    emit!(VaultUnstaked {
        vault: vault_key,
        tokens_in,
        lamports_received: received,
        idle_balance: ctx.accounts.vault_state.idle_balance,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
