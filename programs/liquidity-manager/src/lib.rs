// Liquidity Manager - two-tier weighted allocation engine for staked SOL
// Tier one: the manager mints/burns claim shares and routes deposits across
// a registry of weighted strategy vaults. Tier two: each vault swaps its
// allocation into a liquid-staking token via an external two-venue router,
// optionally forwarding the proceeds into a restaking target.
// Security: checks-effects-interactions throughout, checked math everywhere.

use anchor_lang::prelude::*;

pub mod allocation;
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod router;
pub mod state;

use instructions::*;

declare_id!("4VpXLLCPsXpyf6b81PoXZm67EiYvimUsUvFe4qDuuX7V");

#[program]
pub mod liquidity_manager {
    use super::*;

    /// Initialize a new manager with an empty ledger and registry
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handle_initialize(ctx)
    }

    /// Stake lamports: mint claim shares and push the deposit across the
    /// registered vaults by weight
    ///
    /// Remaining accounts: one `[vault_state, vault_reserve]` pair per
    /// registry entry, in registration order. With no vaults registered the
    /// deposit stays unallocated in the manager reserve.
    pub fn stake<'info>(
        ctx: Context<'_, '_, '_, 'info, Stake<'info>>,
        lamports: u64,
    ) -> Result<()> {
        instructions::users::stake::handle_stake(ctx, lamports)
    }

    /// Redeem claim shares for lamports, pulled from the unallocated reserve
    /// first and proportionally from the vaults for the rest, all-or-nothing
    pub fn unstake<'info>(
        ctx: Context<'_, '_, '_, 'info, Unstake<'info>>,
        share_amount: u64,
    ) -> Result<()> {
        instructions::users::unstake::handle_unstake(ctx, share_amount)
    }

    /// Create a strategy vault under a manager; the signer becomes its admin
    pub fn create_vault(
        ctx: Context<CreateVault>,
        restake_target: Option<Pubkey>,
    ) -> Result<()> {
        instructions::admin::create_vault::handle_create_vault(ctx, restake_target)
    }

    /// Register a vault for weighted allocation
    ///
    /// Security considerations:
    /// - Manager-authority-only (has_one constraint)
    /// - Rejects duplicate vaults and zero weights
    pub fn add_vault(
        ctx: Context<AddVault>,
        weight: u64,
        restake_target: Option<Pubkey>,
    ) -> Result<()> {
        instructions::admin::add_vault::handle_add_vault(ctx, weight, restake_target)
    }

    /// Remove a vault from the registry
    ///
    /// Only clears the registry slot and weight; funds already pushed into
    /// the vault stay there until explicitly recalled
    pub fn remove_vault(ctx: Context<RemoveVault>, vault: Pubkey) -> Result<()> {
        instructions::admin::remove_vault::handle_remove_vault(ctx, vault)
    }

    /// Recall idle lamports from a vault reserve back to the manager reserve
    pub fn recall_vault(ctx: Context<RecallVault>, lamports: u64) -> Result<()> {
        instructions::admin::recall_vault::handle_recall_vault(ctx, lamports)
    }

    /// Deposit lamports directly into a strategy vault for a local claim
    pub fn vault_deposit(ctx: Context<VaultDeposit>, lamports: u64) -> Result<()> {
        instructions::vault::deposit::handle_vault_deposit(ctx, lamports)
    }

    /// Set a vault's two-venue swap split; the portions may not sum past 100
    pub fn set_weight(
        ctx: Context<SetWeight>,
        uniswap_portion: u8,
        balancer_portion: u8,
    ) -> Result<()> {
        instructions::vault::set_weight::handle_set_weight(ctx, uniswap_portion, balancer_portion)
    }

    /// Swap the vault's idle balance into the LST with slippage protection
    pub fn stake_all(
        ctx: Context<StakeAll>,
        min_tokens_out: u64,
        ideal_tokens_out: u64,
    ) -> Result<()> {
        instructions::vault::stake_all::handle_stake_all(ctx, min_tokens_out, ideal_tokens_out)
    }

    /// Swap the vault's LST position back to lamports with slippage protection
    pub fn unstake_all(
        ctx: Context<UnstakeAll>,
        min_lamports_out: u64,
        ideal_lamports_out: u64,
    ) -> Result<()> {
        instructions::vault::unstake_all::handle_unstake_all(
            ctx,
            min_lamports_out,
            ideal_lamports_out,
        )
    }

    /// Withdraw LST from a vault against the holder's local claim
    pub fn vault_withdraw(ctx: Context<VaultWithdraw>, lp_amount: u64) -> Result<()> {
        instructions::vault::withdraw::handle_vault_withdraw(ctx, lp_amount)
    }
}
