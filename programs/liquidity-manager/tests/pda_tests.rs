//! PDA derivation tests
//!
//! Every manager- and vault-scoped PDA is seeded by the owning state
//! account's key, so two managers (or two vaults) can never collide on a
//! ledger, registry, reserve or token authority.
//!
//! Note: full integration tests with mollusk-svm would require aligning
//! Solana SDK versions between Anchor 0.32.1 and mollusk-svm 0.7.2, which
//! have version conflicts. The pure logic is covered in unit_tests.rs.

use anchor_lang::prelude::*;

use liquidity_manager::constants::*;

#[test]
fn manager_scoped_pdas_are_unique_per_manager() {
    let program_id = liquidity_manager::id();
    let manager_1 = Pubkey::new_unique();
    let manager_2 = Pubkey::new_unique();

    for seed in [SHARE_LEDGER_SEED, VAULT_REGISTRY_SEED, MANAGER_RESERVE_SEED] {
        let (pda_1, bump_1) =
            Pubkey::find_program_address(&[seed, manager_1.as_ref()], &program_id);
        let (pda_2, _) = Pubkey::find_program_address(&[seed, manager_2.as_ref()], &program_id);
        assert_ne!(pda_1, pda_2, "PDAs should be unique per manager");
        assert!(bump_1 <= 255);
    }
}

#[test]
fn manager_pdas_do_not_collide_across_seeds() {
    let program_id = liquidity_manager::id();
    let manager = Pubkey::new_unique();

    let (ledger, _) =
        Pubkey::find_program_address(&[SHARE_LEDGER_SEED, manager.as_ref()], &program_id);
    let (registry, _) =
        Pubkey::find_program_address(&[VAULT_REGISTRY_SEED, manager.as_ref()], &program_id);
    let (reserve, _) =
        Pubkey::find_program_address(&[MANAGER_RESERVE_SEED, manager.as_ref()], &program_id);

    assert_ne!(ledger, registry);
    assert_ne!(ledger, reserve);
    assert_ne!(registry, reserve);
}

#[test]
fn vault_scoped_pdas_are_unique_per_vault() {
    let program_id = liquidity_manager::id();
    let vault_1 = Pubkey::new_unique();
    let vault_2 = Pubkey::new_unique();

    for seed in [VAULT_SHARES_SEED, VAULT_RESERVE_SEED, VAULT_AUTHORITY_SEED] {
        let (pda_1, _) = Pubkey::find_program_address(&[seed, vault_1.as_ref()], &program_id);
        let (pda_2, _) = Pubkey::find_program_address(&[seed, vault_2.as_ref()], &program_id);
        assert_ne!(pda_1, pda_2, "PDAs should be unique per vault");
    }
}

#[test]
fn vault_pdas_do_not_collide_across_seeds() {
    let program_id = liquidity_manager::id();
    let vault = Pubkey::new_unique();

    let (shares, _) =
        Pubkey::find_program_address(&[VAULT_SHARES_SEED, vault.as_ref()], &program_id);
    let (reserve, _) =
        Pubkey::find_program_address(&[VAULT_RESERVE_SEED, vault.as_ref()], &program_id);
    let (authority, _) =
        Pubkey::find_program_address(&[VAULT_AUTHORITY_SEED, vault.as_ref()], &program_id);

    assert_ne!(shares, reserve);
    assert_ne!(shares, authority);
    assert_ne!(reserve, authority);
}
