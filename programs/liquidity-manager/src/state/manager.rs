use anchor_lang::prelude::*;

use crate::errors::LiquidityError;

/// Top-level manager state: the conservation invariant lives here
///
/// `total_assets` is the lamport value backed by outstanding claim shares;
/// `allocated_assets` is the portion currently pushed into vault reserves.
/// Invariant: `allocated_assets <= total_assets` after every instruction.
#[account]
pub struct ManagerState {
    /// Authority that can manage the vault registry and recall funds
    pub authority: Pubkey,

    /// Lamport value the manager considers backed by outstanding shares
    pub total_assets: u64,

    /// Portion of total_assets pushed into vault reserves
    pub allocated_assets: u64,

    /// Bump seed for the manager reserve PDA
    pub reserve_bump: u8,

    // Padding for future upgrades
    pub _reserved: [u8; 128],
}

impl ManagerState {
    /// Calculate shares to mint for a lamport deposit
    ///
    /// ERC-4626 formula:
    /// - If first deposit: shares = lamports
    /// - Otherwise: shares = lamports * total_shares / total_assets
    ///
    /// The proportional branch is what makes later depositors pay the
    /// accrued-yield price even though a fresh pool always mints 1:1.
    pub fn calculate_shares(&self, lamports: u64, total_shares: u64) -> Result<u64> {
        if total_shares == 0 || self.total_assets == 0 {
            return Ok(lamports);
        }

        let shares = (lamports as u128)
            .checked_mul(total_shares as u128)
            .ok_or(LiquidityError::MathOverflow)?
            .checked_div(self.total_assets as u128)
            .ok_or(LiquidityError::DivisionByZero)?;

        u64::try_from(shares).map_err(|_| error!(LiquidityError::MathOverflow))
    }

    /// Calculate the lamport value owed for a share redemption
    ///
    /// ERC-4626 formula: lamports = shares * total_assets / total_shares
    pub fn calculate_assets(&self, shares: u64, total_shares: u64) -> Result<u64> {
        if total_shares == 0 {
            return Ok(0);
        }

        let lamports = (shares as u128)
            .checked_mul(self.total_assets as u128)
            .ok_or(LiquidityError::MathOverflow)?
            .checked_div(total_shares as u128)
            .ok_or(LiquidityError::DivisionByZero)?;

        u64::try_from(lamports).map_err(|_| error!(LiquidityError::MathOverflow))
    }

    /// Lamports held idle in the manager reserve
    pub fn unallocated(&self) -> Result<u64> {
        self.total_assets
            .checked_sub(self.allocated_assets)
            .ok_or(error!(LiquidityError::MathOverflow))
    }
}
