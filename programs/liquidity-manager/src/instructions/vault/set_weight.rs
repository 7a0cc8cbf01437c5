use anchor_lang::prelude::*;

use crate::{errors::*, events::*, state::*};

/// Change a vault's two-venue swap split
#[derive(Accounts)]
pub struct SetWeight<'info> {
    /// Vault administrator - only they can retune the venue split
    pub admin: Signer<'info>,

    #[account(mut, has_one = admin @ LiquidityError::Unauthorized)]
    pub vault_state: Account<'info, StrategyVaultState>,
}

pub fn handle_set_weight(
    ctx: Context<SetWeight>,
    uniswap_portion: u8,
    balancer_portion: u8,
) -> Result<()> {
    let vault = &mut ctx.accounts.vault_state;

    vault.set_portions(uniswap_portion, balancer_portion)?;

    emit!(WeightsUpdated {
        vault: vault.key(),
        uniswap_portion,
        balancer_portion,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
