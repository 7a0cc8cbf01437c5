use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::{allocation, constants::*, errors::*, events::*, state::*};

/// Redeem claim shares for lamports
///
/// The lamports owed are pulled from the manager's unallocated reserve
/// first, then proportionally (by registry weight) from the vault reserves.
/// The pull is all-or-nothing: any vault that cannot cover its slice fails
/// the whole withdrawal, so claims are never partially honored.
///
/// Remaining accounts: one `[vault_state, vault_reserve]` writable pair per
/// registry entry, in registration order (only required when the withdrawal
/// reaches into allocated funds).
#[derive(Accounts)]
pub struct Unstake<'info> {
    #[account(mut)]
    pub unstaker: Signer<'info>,

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

pub fn handle_unstake<'info>(
    ctx: Context<'_, '_, '_, 'info, Unstake<'info>>,
    share_amount: u64,
) -> Result<()> {
    // CHECKS
    require!(share_amount > 0, LiquidityError::InvalidAmount);

    let manager_key = ctx.accounts.manager_state.key();
    let unstaker_key = ctx.accounts.unstaker.key();

    require!(
        ctx.accounts.share_ledger.balance_of(&unstaker_key) >= share_amount,
        LiquidityError::InsufficientBalance
    );

    // lamports owed at the pre-burn price
    let owed = ctx
        .accounts
        .manager_state
        .calculate_assets(share_amount, ctx.accounts.share_ledger.total_shares)?;

    // EFFECTS: burn before paying out
    ctx.accounts.share_ledger.burn(&unstaker_key, share_amount)?;

    let unallocated = ctx.accounts.manager_state.unallocated()?;
    let from_reserve = owed.min(unallocated);
    let from_vaults = owed
        .checked_sub(from_reserve)
        .ok_or(LiquidityError::MathOverflow)?;

    // INTERACTIONS: pull the allocated part from the vaults, all-or-nothing
    if from_vaults > 0 {
        let slices = allocation::split_outgoing(
            from_vaults,
            &ctx.accounts.vault_registry.entries,
            ctx.accounts.vault_registry.total_weight,
        )?;

        require!(
            ctx.remaining_accounts.len() == slices.len() * 2,
            LiquidityError::VaultAccountMismatch
        );

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

            // bounded by the idle lamports present AND the manager's own
            // allocation, so a shortfall fails the whole withdrawal and
            // direct depositors' funds never pay a manager claim
            vault.release_allocation(slice.amount)?;

            let reserve_seeds: &[&[u8]] = &[
                VAULT_RESERVE_SEED,
                slice.vault.as_ref(),
                &[vault.reserve_bump],
            ];
            system_program::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.system_program.to_account_info(),
                    Transfer {
                        from: reserve_info.clone(),
                        to: ctx.accounts.unstaker.to_account_info(),
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
        }
    }

    if from_reserve > 0 {
        let reserve_bump = ctx.accounts.manager_state.reserve_bump;
        let reserve_seeds: &[&[u8]] =
            &[MANAGER_RESERVE_SEED, manager_key.as_ref(), &[reserve_bump]];
        system_program::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.manager_reserve.to_account_info(),
                    to: ctx.accounts.unstaker.to_account_info(),
                },
                &[reserve_seeds],
            ),
            from_reserve,
        )?;
    }

    let manager = &mut ctx.accounts.manager_state;
    manager.total_assets = manager
        .total_assets
        .checked_sub(owed)
        .ok_or(LiquidityError::MathOverflow)?;
    manager.allocated_assets = manager
        .allocated_assets
        .checked_sub(from_vaults)
        .ok_or(LiquidityError::MathOverflow)?;

    emit!(Unstaked {
        manager: manager_key,
        unstaker: unstaker_key,
        shares_burned: share_amount,
        lamports_out: owed,
        total_assets: ctx.accounts.manager_state.total_assets,
        total_shares: ctx.accounts.share_ledger.total_shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
