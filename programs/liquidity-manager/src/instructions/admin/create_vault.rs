use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, events::*, state::*};

/// Create a new strategy vault under a manager
///
/// Creation is open: the signer becomes the vault's admin, as the vault owns
/// its own balances. Allocation only ever reaches a vault once the manager
/// authority registers it via `add_vault`.
#[derive(Accounts)]
pub struct CreateVault<'info> {
    /// Vault administrator
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Manager the vault is created under
    pub manager_state: Account<'info, ManagerState>,

    /// Vault state, a fresh keypair account
    #[account(init, payer = admin, space = STRATEGY_VAULT_STATE_SIZE)]
    pub vault_state: Account<'info, StrategyVaultState>,

    /// Vault-local claim ledger PDA
    #[account(
        init,
        payer = admin,
        space = ShareLedger::SPACE,
        seeds = [VAULT_SHARES_SEED, vault_state.key().as_ref()],
        bump
    )]
    pub vault_shares: Account<'info, ShareLedger>,

    /// Reserve PDA holding the vault's idle lamports
    #[account(
        seeds = [VAULT_RESERVE_SEED, vault_state.key().as_ref()],
        bump
    )]
    pub vault_reserve: SystemAccount<'info>,

    /// Vault token authority PDA
    /// CHECK: PDA used as token authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Mint of the liquid-staking token this vault swaps into
    pub lst_mint: Account<'info, Mint>,

    /// Vault's LST token account
    #[account(
        init,
        payer = admin,
        associated_token::mint = lst_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_lst_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handle_create_vault(
    ctx: Context<CreateVault>,
    restake_target: Option<Pubkey>,
) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();

    let vault = &mut ctx.accounts.vault_state;
    vault.admin = ctx.accounts.admin.key();
    vault.manager = ctx.accounts.manager_state.key();
    vault.lst_mint = ctx.accounts.lst_mint.key();
    vault.restake_target = restake_target;
    vault.idle_balance = 0;
    vault.manager_allocated = 0;
    vault.staked_lp_balance = 0;
    vault.total_deposited = 0;
    vault.uniswap_portion = DEFAULT_UNISWAP_PORTION;
    vault.balancer_portion = DEFAULT_BALANCER_PORTION;
    vault.phase = VaultPhase::Idle;
    vault.reserve_bump = ctx.bumps.vault_reserve;
    vault.authority_bump = ctx.bumps.vault_authority;
    vault._reserved = [0; 120];

    let shares = &mut ctx.accounts.vault_shares;
    shares.owner = vault_key;
    shares.total_shares = 0;
    shares.holders = Vec::new();
    shares.bump = ctx.bumps.vault_shares;

    emit!(VaultCreated {
        vault: vault_key,
        admin: vault.admin,
        manager: vault.manager,
        lst_mint: vault.lst_mint,
        restake_target,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
