use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::{allocation, constants::*, errors::*, events::*, state::*};

/// Stake lamports into the manager: mint claim shares, then push the
/// deposit across the registered vaults by weight
///
/// Remaining accounts: one `[vault_state, vault_reserve]` writable pair per
/// registry entry, in registration order. With an empty registry the deposit
/// simply stays unallocated in the manager reserve.
#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

    #[account(mut)]
    pub manager_state: Account<'info, ManagerState>,

    #[account(
        mut,
        seeds = [SHARE_LEDGER_SEED, manager_state.key().as_ref()],
        bump = share_ledger.bump,
    )]
    pub share_ledger: Account<'info, ShareLedger>,

    #[account(
        seeds = [VAULT_REGISTRY_SEED, manager_state.key().as_ref()],
        bump = vault_registry.bump,
    )]
    pub vault_registry: Account<'info, VaultRegistry>,

    #[account(
        mut,
        seeds = [MANAGER_RESERVE_SEED, manager_state.key().as_ref()],
        bump = manager_state.reserve_bump,
    )]
    pub manager_reserve: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_stake<'info>(
    ctx: Context<'_, '_, '_, 'info, Stake<'info>>,
    lamports: u64,
) -> Result<()> {
    // CHECKS
    require!(lamports > 0, LiquidityError::InvalidAmount);

    let manager_key = ctx.accounts.manager_state.key();
    let depositor_key = ctx.accounts.depositor.key();

    // shares at the pre-deposit price
    let shares_to_mint = ctx
        .accounts
        .manager_state
        .calculate_shares(lamports, ctx.accounts.share_ledger.total_shares)?;

    // EFFECTS: ledger and totals before any transfer
    ctx.accounts
        .share_ledger
        .mint(&depositor_key, shares_to_mint)?;

    let manager = &mut ctx.accounts.manager_state;
    manager.total_assets = manager
        .total_assets
        .checked_add(lamports)
        .ok_or(LiquidityError::MathOverflow)?;

    // INTERACTIONS: pull the deposit into the reserve
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.depositor.to_account_info(),
                to: ctx.accounts.manager_reserve.to_account_info(),
            },
        ),
        lamports,
    )?;

    // Fan out across the registry. An empty registry is not an error here:
    // the deposit stays idle and only total_assets grows.
    let mut pushed: u64 = 0;
    if ctx.accounts.vault_registry.total_weight > 0 {
        let slices = allocation::split_incoming(
            lamports,
            &ctx.accounts.vault_registry.entries,
            ctx.accounts.vault_registry.total_weight,
        )?;

        require!(
            ctx.remaining_accounts.len() == slices.len() * 2,
            LiquidityError::VaultAccountMismatch
        );

        let reserve_bump = ctx.accounts.manager_state.reserve_bump;
        let reserve_seeds: &[&[u8]] =
            &[MANAGER_RESERVE_SEED, manager_key.as_ref(), &[reserve_bump]];

        for (i, slice) in slices.iter().enumerate() {
            let vault_info = &ctx.remaining_accounts[2 * i];
            let reserve_info = &ctx.remaining_accounts[2 * i + 1];

            require_keys_eq!(
                *vault_info.key,
                slice.vault,
                LiquidityError::VaultAccountMismatch
            );
            require_keys_eq!(
                *vault_info.owner,
                crate::ID,
                LiquidityError::VaultAccountMismatch
            );
            let (expected_reserve, _) = Pubkey::find_program_address(
                &[VAULT_RESERVE_SEED, slice.vault.as_ref()],
                &crate::ID,
            );
            require_keys_eq!(
                *reserve_info.key,
                expected_reserve,
                LiquidityError::VaultAccountMismatch
            );

            if slice.amount == 0 {
                continue;
            }

            let mut vault: StrategyVaultState = {
                let data = vault_info.try_borrow_data()?;
                let mut slice_ref: &[u8] = &data;
                StrategyVaultState::try_deserialize(&mut slice_ref)?
            };
            vault.receive_allocation(slice.amount)?;

            system_program::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.system_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.manager_reserve.to_account_info(),
                        to: reserve_info.clone(),
                    },
                    &[reserve_seeds],
                ),
                slice.amount,
            )?;

            {
                let mut data = vault_info.try_borrow_mut_data()?;
                let mut cursor: &mut [u8] = &mut data;
                vault.try_serialize(&mut cursor)?;
            }

            pushed = pushed
                .checked_add(slice.amount)
                .ok_or(LiquidityError::MathOverflow)?;
        }

        let manager = &mut ctx.accounts.manager_state;
        manager.allocated_assets = manager
            .allocated_assets
            .checked_add(pushed)
            .ok_or(LiquidityError::MathOverflow)?;
    }

    emit!(Staked {
        manager: manager_key,
        depositor: depositor_key,
        lamports,
        shares_minted: shares_to_mint,
        allocated: pushed,
        total_assets: ctx.accounts.manager_state.total_assets,
        total_shares: ctx.accounts.share_ledger.total_shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
