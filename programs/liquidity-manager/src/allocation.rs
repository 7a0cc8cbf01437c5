use anchor_lang::prelude::*;

use crate::errors::LiquidityError;
use crate::state::VaultEntry;

/// One vault's portion of a split amount
#[derive(Clone, Debug, PartialEq)]
pub struct AllocationSlice {
    pub vault: Pubkey,
    pub amount: u64,
}

/// floor(amount * weight / total_weight) with u128 intermediates
fn weighted_portion(amount: u64, weight: u64, total_weight: u64) -> Result<u64> {
    let portion = (amount as u128)
        .checked_mul(weight as u128)
        .ok_or(LiquidityError::MathOverflow)?
        .checked_div(total_weight as u128)
        .ok_or(LiquidityError::DivisionByZero)?;
    u64::try_from(portion).map_err(|_| error!(LiquidityError::MathOverflow))
}

fn split(amount: u64, entries: &[VaultEntry], total_weight: u64) -> Result<Vec<AllocationSlice>> {
    require!(
        total_weight > 0 && !entries.is_empty(),
        LiquidityError::NoVaults
    );

    let mut slices = Vec::with_capacity(entries.len());
    let mut assigned: u64 = 0;
    for entry in entries {
        let portion = weighted_portion(amount, entry.weight, total_weight)?;
        assigned = assigned
            .checked_add(portion)
            .ok_or(LiquidityError::MathOverflow)?;
        slices.push(AllocationSlice {
            vault: entry.vault,
            amount: portion,
        });
    }

    // Tie-break policy: the last entry in registration order absorbs the
    // integer-division remainder, so repeated small amounts never lose dust.
    let remainder = amount
        .checked_sub(assigned)
        .ok_or(LiquidityError::MathOverflow)?;
    if remainder > 0 {
        if let Some(last) = slices.last_mut() {
            last.amount = last
                .amount
                .checked_add(remainder)
                .ok_or(LiquidityError::MathOverflow)?;
        }
    }

    Ok(slices)
}

/// Split an incoming deposit across the registry by weight
pub fn split_incoming(
    amount: u64,
    entries: &[VaultEntry],
    total_weight: u64,
) -> Result<Vec<AllocationSlice>> {
    split(amount, entries, total_weight)
}

/// Split an outgoing withdrawal across the registry by weight
///
/// Same arithmetic as the incoming split. The caller enforces all-or-nothing:
/// a vault that cannot supply its slice fails the whole withdrawal, partial
/// pulls are never silently truncated.
pub fn split_outgoing(
    amount: u64,
    entries: &[VaultEntry],
    total_weight: u64,
) -> Result<Vec<AllocationSlice>> {
    split(amount, entries, total_weight)
}
