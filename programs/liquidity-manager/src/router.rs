use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;

use crate::errors::LiquidityError;

/// Swap-router boundary
///
/// The router is an external program that turns lamports into the LST and
/// back, splitting each swap across its Uniswap-style and Balancer-style
/// legs. Both entry points must fail, not partially apply, when the minimum
/// output cannot be met; this program additionally verifies the output delta
/// itself and never trusts the router's accounting.
///
/// Wire format: a single-byte tag followed by Borsh-serialized args.
pub const SWAP_TO_TAG: u8 = 0;
pub const SWAP_FROM_TAG: u8 = 1;

/// Args for the lamports -> LST leg
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct SwapToArgs {
    pub uniswap_portion: u8,
    pub balancer_portion: u8,
    pub min_tokens_out: u64,
    pub ideal_tokens_out: u64,
    pub lamports_in: u64,
}

/// Args for the LST -> lamports leg
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct SwapFromArgs {
    pub uniswap_portion: u8,
    pub balancer_portion: u8,
    pub min_lamports_out: u64,
    pub ideal_lamports_out: u64,
    pub tokens_in: u64,
}

/// Accounts handed through to the router on either leg
pub struct SwapAccounts<'a, 'info> {
    /// External router program
    pub router_program: &'a AccountInfo<'info>,
    /// Router-owned state, passed through opaquely
    pub router_state: &'a AccountInfo<'info>,
    /// Vault reserve PDA: lamport source (swap_to) or destination (swap_from)
    pub reserve: &'a AccountInfo<'info>,
    /// Vault LST token account: destination (swap_to) or source (swap_from)
    pub token_account: &'a AccountInfo<'info>,
    /// Vault token authority PDA, signs the swap_from leg
    pub token_authority: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
    pub system_program: &'a AccountInfo<'info>,
}

impl<'a, 'info> SwapAccounts<'a, 'info> {
    fn infos(&self) -> Vec<AccountInfo<'info>> {
        vec![
            self.reserve.clone(),
            self.token_account.clone(),
            self.token_authority.clone(),
            self.router_state.clone(),
            self.token_program.clone(),
            self.system_program.clone(),
        ]
    }
}

fn encode(tag: u8, args: &impl AnchorSerialize) -> Result<Vec<u8>> {
    let mut data = vec![tag];
    args.serialize(&mut data)
        .map_err(|_| error!(LiquidityError::ExternalCallFailed))?;
    Ok(data)
}

/// Invoke the router's lamports -> LST entry point, funded and signed by the
/// vault reserve PDA
pub fn swap_to(
    accounts: &SwapAccounts,
    args: &SwapToArgs,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let ix = Instruction {
        program_id: *accounts.router_program.key,
        accounts: vec![
            AccountMeta::new(*accounts.reserve.key, true),
            AccountMeta::new(*accounts.token_account.key, false),
            AccountMeta::new_readonly(*accounts.token_authority.key, false),
            AccountMeta::new(*accounts.router_state.key, false),
            AccountMeta::new_readonly(*accounts.token_program.key, false),
            AccountMeta::new_readonly(*accounts.system_program.key, false),
        ],
        data: encode(SWAP_TO_TAG, args)?,
    };

    invoke_signed(&ix, &accounts.infos(), signer_seeds)
        .map_err(|_| error!(LiquidityError::ExternalCallFailed))
}

/// Invoke the router's LST -> lamports entry point, signed by the vault
/// token authority PDA so the router can move the tokens in
pub fn swap_from(
    accounts: &SwapAccounts,
    args: &SwapFromArgs,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let ix = Instruction {
        program_id: *accounts.router_program.key,
        accounts: vec![
            AccountMeta::new(*accounts.reserve.key, false),
            AccountMeta::new(*accounts.token_account.key, false),
            AccountMeta::new_readonly(*accounts.token_authority.key, true),
            AccountMeta::new(*accounts.router_state.key, false),
            AccountMeta::new_readonly(*accounts.token_program.key, false),
            AccountMeta::new_readonly(*accounts.system_program.key, false),
        ],
        data: encode(SWAP_FROM_TAG, args)?,
    };

    invoke_signed(&ix, &accounts.infos(), signer_seeds)
        .map_err(|_| error!(LiquidityError::ExternalCallFailed))
}
