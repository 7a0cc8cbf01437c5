use anchor_lang::prelude::*;

use crate::constants::MAX_VAULTS;
use crate::errors::LiquidityError;

/// A registered allocation target
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct VaultEntry {
    /// StrategyVaultState address this entry points at (referenced, not owned)
    pub vault: Pubkey,

    /// Relative allocation weight, always > 0 for a live entry
    pub weight: u64,

    /// Optional restaking destination for the vault's swap proceeds
    pub restake_target: Option<Pubkey>,
}

/// Ordered registry of weighted strategy vaults
///
/// Entries keep registration order: allocation iterates the list front to
/// back and the last entry absorbs the integer-division remainder, so the
/// order is part of the allocation contract, not an implementation detail.
///
/// `total_weight` is maintained incrementally and always equals the sum of
/// registered entry weights.
#[account]
pub struct VaultRegistry {
    /// Manager this registry belongs to
    pub manager: Pubkey,

    /// Sum of all registered weights
    pub total_weight: u64,

    /// Registered vaults in registration order, bounded by MAX_VAULTS
    pub entries: Vec<VaultEntry>,

    /// Bump seed for PDA
    pub bump: u8,
}

impl VaultRegistry {
    /// 8 (discriminator) + 32 (manager) + 8 (total_weight) + 4 (vec len)
    /// + MAX_VAULTS * 73 + 1 (bump) + 64 (padding)
    pub const SPACE: usize = 8 + 32 + 8 + 4 + MAX_VAULTS * 73 + 1 + 64;

    pub fn contains(&self, vault: &Pubkey) -> bool {
        self.entries.iter().any(|e| e.vault == *vault)
    }

    /// Presence read: the id itself when registered, the default sentinel
    /// otherwise
    pub fn lookup(&self, vault: &Pubkey) -> Pubkey {
        if self.contains(vault) {
            *vault
        } else {
            Pubkey::default()
        }
    }

    pub fn add(
        &mut self,
        vault: Pubkey,
        weight: u64,
        restake_target: Option<Pubkey>,
    ) -> Result<()> {
        require!(weight > 0, LiquidityError::InvalidWeight);
        require!(!self.contains(&vault), LiquidityError::DuplicateVault);
        require!(self.entries.len() < MAX_VAULTS, LiquidityError::RegistryFull);

        self.entries.push(VaultEntry {
            vault,
            weight,
            restake_target,
        });
        self.total_weight = self
            .total_weight
            .checked_add(weight)
            .ok_or(LiquidityError::MathOverflow)?;

        Ok(())
    }

    pub fn remove(&mut self, vault: &Pubkey) -> Result<()> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.vault == *vault)
            .ok_or(LiquidityError::UnknownVault)?;

        let removed = self.entries.remove(pos);
        self.total_weight = self
            .total_weight
            .checked_sub(removed.weight)
            .ok_or(LiquidityError::MathOverflow)?;

        Ok(())
    }
}
