use anchor_lang::prelude::*;

use crate::constants::MAX_HOLDERS;
use crate::errors::LiquidityError;

/// Per-holder claim balance entry
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct HolderBalance {
    pub holder: Pubkey,
    pub shares: u64,
}

/// Claim-share ledger: holder balances plus total supply
///
/// Two instances exist per deployment: the manager's claim ledger and one
/// local ledger per strategy vault. Mutated only through `mint` and `burn`,
/// so `total_shares` always equals the sum of holder balances.
///
/// A holder whose balance reaches zero is removed from the list; a zero
/// balance is indistinguishable from an unregistered holder.
#[account]
pub struct ShareLedger {
    /// Manager or vault state this ledger belongs to
    pub owner: Pubkey,

    /// Total claim shares outstanding
    pub total_shares: u64,

    /// Holder balances, bounded by MAX_HOLDERS
    pub holders: Vec<HolderBalance>,

    /// Bump seed for PDA
    pub bump: u8,
}

impl ShareLedger {
    /// 8 (discriminator) + 32 (owner) + 8 (total_shares) + 4 (vec len)
    /// + MAX_HOLDERS * 40 + 1 (bump) + 64 (padding)
    pub const SPACE: usize = 8 + 32 + 8 + 4 + MAX_HOLDERS * 40 + 1 + 64;

    pub fn balance_of(&self, holder: &Pubkey) -> u64 {
        self.holders
            .iter()
            .find(|h| h.holder == *holder)
            .map(|h| h.shares)
            .unwrap_or(0)
    }

    /// Credit `amount` shares to `holder`
    pub fn mint(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
        require!(amount > 0, LiquidityError::InvalidAmount);

        match self.holders.iter_mut().find(|h| h.holder == *holder) {
            Some(entry) => {
                entry.shares = entry
                    .shares
                    .checked_add(amount)
                    .ok_or(LiquidityError::MathOverflow)?;
            }
            None => {
                require!(self.holders.len() < MAX_HOLDERS, LiquidityError::LedgerFull);
                self.holders.push(HolderBalance {
                    holder: *holder,
                    shares: amount,
                });
            }
        }

        self.total_shares = self
            .total_shares
            .checked_add(amount)
            .ok_or(LiquidityError::MathOverflow)?;

        Ok(())
    }

    /// Debit `amount` shares from `holder`
    pub fn burn(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
        require!(amount > 0, LiquidityError::InvalidAmount);

        let pos = self
            .holders
            .iter()
            .position(|h| h.holder == *holder)
            .ok_or(LiquidityError::InsufficientBalance)?;

        require!(
            self.holders[pos].shares >= amount,
            LiquidityError::InsufficientBalance
        );

        self.holders[pos].shares -= amount;
        if self.holders[pos].shares == 0 {
            self.holders.remove(pos);
        }

        self.total_shares = self
            .total_shares
            .checked_sub(amount)
            .ok_or(LiquidityError::MathOverflow)?;

        Ok(())
    }
}
