use anchor_lang::prelude::*;

use crate::constants::PORTION_DENOMINATOR;
use crate::errors::LiquidityError;

/// Strategy vault lifecycle: Idle -> Staking -> Staked -> Unstaking -> Idle
///
/// The transient phases only exist inside a single instruction; observable
/// state is always Idle or Staked.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VaultPhase {
    Idle,
    Staking,
    Staked,
    Unstaking,
}

/// Per-vault strategy state
///
/// Holds the vault's idle lamports (in its reserve PDA), its position in the
/// liquid-staking token, and the two-venue swap split. The vault is
/// referenced by the manager's registry but owns its balances exclusively.
#[account]
pub struct StrategyVaultState {
    /// Administrator of this vault (venue weights, swap lifecycle)
    pub admin: Pubkey,

    /// Manager this vault was created under
    pub manager: Pubkey,

    /// Mint of the liquid-staking token the vault swaps into
    pub lst_mint: Pubkey,

    /// When set, swap proceeds are forwarded here instead of being retained
    pub restake_target: Option<Pubkey>,

    /// Lamports received but not yet swapped (mirrors the reserve PDA)
    pub idle_balance: u64,

    /// Lamports the manager pushed in and has not yet pulled back; caps how
    /// much the manager may ever debit from this vault
    pub manager_allocated: u64,

    /// LST units this vault has claim to (held locally or restaked)
    pub staked_lp_balance: u64,

    /// Lamport value deposited against the local claim ledger
    pub total_deposited: u64,

    /// Percentage of idle balance routed through the Uniswap leg
    pub uniswap_portion: u8,

    /// Percentage of idle balance routed through the Balancer leg
    pub balancer_portion: u8,

    /// Current lifecycle phase
    pub phase: VaultPhase,

    /// Bump seed for the vault reserve PDA
    pub reserve_bump: u8,

    /// Bump seed for the vault token authority PDA
    pub authority_bump: u8,

    // Padding for future upgrades
    pub _reserved: [u8; 120],
}

impl StrategyVaultState {
    /// Update the venue split; the portions may not sum past 100
    pub fn set_portions(&mut self, uniswap_portion: u8, balancer_portion: u8) -> Result<()> {
        require!(
            uniswap_portion as u64 + balancer_portion as u64 <= PORTION_DENOMINATOR,
            LiquidityError::InvalidWeight
        );
        self.uniswap_portion = uniswap_portion;
        self.balancer_portion = balancer_portion;
        Ok(())
    }

    /// Registration is the single source of the restake hook: a re-add
    /// without a target clears a previously configured one
    pub fn set_restake_target(&mut self, target: Option<Pubkey>) {
        self.restake_target = target;
    }

    /// Credit a manager allocation into the idle balance
    pub fn receive_allocation(&mut self, lamports: u64) -> Result<()> {
        self.idle_balance = self
            .idle_balance
            .checked_add(lamports)
            .ok_or(LiquidityError::MathOverflow)?;
        self.manager_allocated = self
            .manager_allocated
            .checked_add(lamports)
            .ok_or(LiquidityError::MathOverflow)?;
        Ok(())
    }

    /// Release part of the manager's allocation from the idle balance
    ///
    /// Bounded by both the idle lamports actually present and the amount the
    /// manager ever pushed in, so direct depositors' funds can never pay a
    /// manager claim.
    pub fn release_allocation(&mut self, lamports: u64) -> Result<()> {
        require!(
            self.idle_balance >= lamports && self.manager_allocated >= lamports,
            LiquidityError::InsufficientVaultLiquidity
        );
        self.idle_balance -= lamports;
        self.manager_allocated -= lamports;
        Ok(())
    }

    /// Split `amount` across the two venues
    ///
    /// The legs are scaled to the ratio of the configured portions, so the
    /// whole amount is always routed and nothing stays idle; the Balancer
    /// leg absorbs the flooring remainder.
    pub fn venue_split(&self, amount: u64) -> Result<(u64, u64)> {
        let portion_sum = self.uniswap_portion as u128 + self.balancer_portion as u128;
        require!(portion_sum > 0, LiquidityError::InvalidWeight);

        let uni = (amount as u128)
            .checked_mul(self.uniswap_portion as u128)
            .ok_or(LiquidityError::MathOverflow)?
            / portion_sum;
        let uni = u64::try_from(uni).map_err(|_| error!(LiquidityError::MathOverflow))?;
        let bal = amount
            .checked_sub(uni)
            .ok_or(LiquidityError::MathOverflow)?;

        Ok((uni, bal))
    }

    /// Shares to mint against the vault-local claim ledger for a deposit
    pub fn calculate_claim_shares(&self, lamports: u64, total_shares: u64) -> Result<u64> {
        if total_shares == 0 || self.total_deposited == 0 {
            return Ok(lamports);
        }

        let shares = (lamports as u128)
            .checked_mul(total_shares as u128)
            .ok_or(LiquidityError::MathOverflow)?
            .checked_div(self.total_deposited as u128)
            .ok_or(LiquidityError::DivisionByZero)?;

        u64::try_from(shares).map_err(|_| error!(LiquidityError::MathOverflow))
    }

    /// Deposited value represented by `shares` of the local claim ledger
    pub fn calculate_claim_assets(&self, shares: u64, total_shares: u64) -> Result<u64> {
        if total_shares == 0 {
            return Ok(0);
        }

        let lamports = (shares as u128)
            .checked_mul(self.total_deposited as u128)
            .ok_or(LiquidityError::MathOverflow)?
            .checked_div(total_shares as u128)
            .ok_or(LiquidityError::DivisionByZero)?;

        u64::try_from(lamports).map_err(|_| error!(LiquidityError::MathOverflow))
    }

    /// Enter the staking leg; returns the idle amount to be swapped
    pub fn begin_stake(&mut self) -> Result<u64> {
        require!(self.phase == VaultPhase::Idle, LiquidityError::InvalidPhase);
        require!(self.idle_balance > 0, LiquidityError::InvalidAmount);
        self.phase = VaultPhase::Staking;
        Ok(self.idle_balance)
    }

    /// Commit a completed stake: the whole idle balance left the reserve,
    /// `received` LST units were credited
    pub fn finish_stake(&mut self, received: u64) -> Result<()> {
        self.idle_balance = 0;
        self.staked_lp_balance = self
            .staked_lp_balance
            .checked_add(received)
            .ok_or(LiquidityError::MathOverflow)?;
        self.phase = VaultPhase::Staked;
        Ok(())
    }

    /// Enter the unstaking leg; returns the LST amount to swap back
    pub fn begin_unstake(&mut self) -> Result<u64> {
        require!(self.phase == VaultPhase::Staked, LiquidityError::InvalidPhase);
        require!(self.staked_lp_balance > 0, LiquidityError::InvalidAmount);
        self.phase = VaultPhase::Unstaking;
        Ok(self.staked_lp_balance)
    }

    /// Commit a completed unstake: the whole position returned as lamports
    pub fn finish_unstake(&mut self, lamports_received: u64) -> Result<()> {
        self.staked_lp_balance = 0;
        self.idle_balance = self
            .idle_balance
            .checked_add(lamports_received)
            .ok_or(LiquidityError::MathOverflow)?;
        self.phase = VaultPhase::Idle;
        Ok(())
    }
}
