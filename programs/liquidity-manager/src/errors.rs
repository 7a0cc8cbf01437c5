use anchor_lang::prelude::*;

/// Custom error codes for the Liquidity Manager program
///
/// Security: Descriptive error messages without information leakage
#[error_code]
pub enum LiquidityError {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Holder's claim balance is insufficient")]
    InsufficientBalance,

    #[msg("Vault already registered")]
    DuplicateVault,

    #[msg("Vault not found in registry")]
    UnknownVault,

    #[msg("Invalid weight - zero vault weight or venue portions above 100")]
    InvalidWeight,

    #[msg("Unauthorized - only the configured authority can perform this action")]
    Unauthorized,

    #[msg("No vaults registered - nothing to allocate against")]
    NoVaults,

    #[msg("External call failed - swap or restake did not meet its minimum-output bound")]
    ExternalCallFailed,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Cannot divide by zero")]
    DivisionByZero,

    #[msg("Vault registry is full - maximum vaults reached")]
    RegistryFull,

    #[msg("Share ledger is full - maximum holders reached")]
    LedgerFull,

    #[msg("Account does not match the registry entry at this position")]
    VaultAccountMismatch,

    #[msg("Vault cannot supply its proportional share of the withdrawal")]
    InsufficientVaultLiquidity,

    #[msg("Invalid token mint")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,

    #[msg("Vault is not in the required lifecycle phase for this operation")]
    InvalidPhase,
}
