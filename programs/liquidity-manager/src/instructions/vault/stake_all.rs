use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, router, state::*};

/// Swap the vault's whole idle balance into the LST
///
/// Runs the Idle -> Staking -> Staked leg: splits the idle lamports by the
/// configured venue portions, invokes the external router, verifies the
/// received amount against the caller's minimum-output bound, then either
/// retains the proceeds or forwards them to the configured restake target.
/// Any failure aborts the transaction, so balances never misstate holdings.
#[derive(Accounts)]
pub struct StakeAll<'info> {
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

    /// Restake destination token account; required when the vault has a
    /// restake target configured
    #[account(
        mut,
        constraint = restake_token_account.mint == vault_state.lst_mint
            @ LiquidityError::InvalidMint,
    )]
    pub restake_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handle_stake_all(
    ctx: Context<StakeAll>,
    min_tokens_out: u64,
    ideal_tokens_out: u64,
) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();

    // the split is exhaustive: the two legs always cover the whole idle
    // balance, scaled to the configured portion ratio
    let amount = ctx.accounts.vault_state.begin_stake()?;
    let (uni, bal) = ctx.accounts.vault_state.venue_split(amount)?;
    let lamports_in = uni.checked_add(bal).ok_or(LiquidityError::MathOverflow)?;

    let tokens_before = ctx.accounts.vault_lst_account.amount;

    // INTERACTIONS: the reserve PDA funds and signs the swap
    let reserve_bump = ctx.accounts.vault_state.reserve_bump;
    let reserve_seeds: &[&[u8]] = &[VAULT_RESERVE_SEED, vault_key.as_ref(), &[reserve_bump]];
    router::swap_to(
        &router::SwapAccounts {
            router_program: &ctx.accounts.router_program.to_account_info(),
            router_state: &ctx.accounts.router_state.to_account_info(),
            reserve: &ctx.accounts.vault_reserve.to_account_info(),
            token_account: &ctx.accounts.vault_lst_account.to_account_info(),
            token_authority: &ctx.accounts.vault_authority.to_account_info(),
            token_program: &ctx.accounts.token_program.to_account_info(),
            system_program: &ctx.accounts.system_program.to_account_info(),
        },
        &router::SwapToArgs {
            uniswap_portion: ctx.accounts.vault_state.uniswap_portion,
            balancer_portion: ctx.accounts.vault_state.balancer_portion,
            min_tokens_out,
            ideal_tokens_out,
            lamports_in,
        },
        &[reserve_seeds],
    )?;

    // never trust the router: measure what actually arrived
    ctx.accounts.vault_lst_account.reload()?;
    let received = ctx
        .accounts
        .vault_lst_account
        .amount
        .checked_sub(tokens_before)
        .ok_or(LiquidityError::MathOverflow)?;
    require!(received >= min_tokens_out, LiquidityError::ExternalCallFailed);

    // Strategy variation point: with a restake target the proceeds move on,
    // without one they stay in the vault's token account. The accounting is
    // identical either way.
    let restake_target = ctx.accounts.vault_state.restake_target;
    if let Some(target) = restake_target {
        let restake_account = ctx
            .accounts
            .restake_token_account
            .as_ref()
            .ok_or(LiquidityError::VaultAccountMismatch)?;
        require_keys_eq!(
            restake_account.key(),
            target,
            LiquidityError::VaultAccountMismatch
        );

        let authority_bump = ctx.accounts.vault_state.authority_bump;
        let authority_seeds: &[&[u8]] =
            &[VAULT_AUTHORITY_SEED, vault_key.as_ref(), &[authority_bump]];
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.vault_lst_account.to_account_info(),
                    to: restake_account.to_account_info(),
                    authority: ctx.accounts.vault_authority.to_account_info(),
                },
                &[authority_seeds],
            ),
            received,
        )?;
    }

    // EFFECTS
    ctx.accounts.vault_state.finish_stake(received)?;

    emit!(VaultStaked {
        vault: vault_key,
        lamports_in,
        tokens_received: received,
        restaked: restake_target.is_some(),
        staked_lp_balance: ctx.accounts.vault_state.staked_lp_balance,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
