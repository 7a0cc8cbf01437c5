//! Host-side tests for the manager's pure accounting and allocation logic.
//!
//! These drive the same state methods the instruction handlers call, in the
//! same order, without an SVM: ledger mint/burn, registry mutation, weighted
//! splits, per-vault allocation tracking and the share-price math. Account
//! plumbing (signers, PDAs, CPIs) is covered by the constraint checks in the
//! Accounts structs.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use liquidity_manager::allocation::{split_incoming, split_outgoing};
use liquidity_manager::errors::LiquidityError;
use liquidity_manager::state::{
    ManagerState, ShareLedger, StrategyVaultState, VaultPhase, VaultRegistry,
};

const ONE_SOL: u64 = 1_000_000_000;

fn new_manager() -> ManagerState {
    ManagerState {
        authority: Pubkey::new_unique(),
        total_assets: 0,
        allocated_assets: 0,
        reserve_bump: 0,
        _reserved: [0; 128],
    }
}

fn new_ledger(owner: Pubkey) -> ShareLedger {
    ShareLedger {
        owner,
        total_shares: 0,
        holders: Vec::new(),
        bump: 0,
    }
}

fn new_registry(manager: Pubkey) -> VaultRegistry {
    VaultRegistry {
        manager,
        total_weight: 0,
        entries: Vec::new(),
        bump: 0,
    }
}

fn new_vault(manager: Pubkey) -> StrategyVaultState {
    StrategyVaultState {
        admin: Pubkey::new_unique(),
        manager,
        lst_mint: Pubkey::new_unique(),
        restake_target: None,
        idle_balance: 0,
        manager_allocated: 0,
        staked_lp_balance: 0,
        total_deposited: 0,
        uniswap_portion: 50,
        balancer_portion: 50,
        phase: VaultPhase::Idle,
        reserve_bump: 0,
        authority_bump: 0,
        _reserved: [0; 120],
    }
}

/// The effects half of the stake handler: mint at the pre-deposit price,
/// grow totals, push slices into the vault states
fn stake(
    manager: &mut ManagerState,
    ledger: &mut ShareLedger,
    registry: &VaultRegistry,
    vaults: &mut BTreeMap<Pubkey, StrategyVaultState>,
    depositor: &Pubkey,
    lamports: u64,
) -> Result<()> {
    let shares = manager.calculate_shares(lamports, ledger.total_shares)?;
    ledger.mint(depositor, shares)?;
    manager.total_assets += lamports;

    if registry.total_weight > 0 {
        for slice in split_incoming(lamports, &registry.entries, registry.total_weight)? {
            vaults
                .get_mut(&slice.vault)
                .expect("registered vault")
                .receive_allocation(slice.amount)?;
            manager.allocated_assets += slice.amount;
        }
    }
    Ok(())
}

/// The effects half of the unstake handler: settle the allocated part from
/// the vaults, burn, shrink totals
///
/// On chain a failed slice aborts the whole transaction; here the slices are
/// verified before anything is mutated, so a failure leaves every piece of
/// state untouched just like the reverted transaction would.
fn unstake(
    manager: &mut ManagerState,
    ledger: &mut ShareLedger,
    registry: &VaultRegistry,
    vaults: &mut BTreeMap<Pubkey, StrategyVaultState>,
    unstaker: &Pubkey,
    share_amount: u64,
) -> Result<u64> {
    require!(
        ledger.balance_of(unstaker) >= share_amount,
        LiquidityError::InsufficientBalance
    );
    let owed = manager.calculate_assets(share_amount, ledger.total_shares)?;
    let unallocated = manager.unallocated()?;
    let from_vaults = owed.saturating_sub(unallocated);

    if from_vaults > 0 {
        let slices = split_outgoing(from_vaults, &registry.entries, registry.total_weight)?;
        for slice in &slices {
            let vault = vaults.get(&slice.vault).expect("registered vault");
            require!(
                vault.idle_balance >= slice.amount && vault.manager_allocated >= slice.amount,
                LiquidityError::InsufficientVaultLiquidity
            );
        }
        for slice in &slices {
            vaults
                .get_mut(&slice.vault)
                .expect("registered vault")
                .release_allocation(slice.amount)?;
        }
        manager.allocated_assets -= from_vaults;
    }

    ledger.burn(unstaker, share_amount)?;
    manager.total_assets -= owed;
    Ok(owed)
}

/// The effects half of the recall handler: pull idle manager funds back
fn recall(manager: &mut ManagerState, vault: &mut StrategyVaultState, lamports: u64) -> Result<()> {
    vault.release_allocation(lamports)?;
    manager.allocated_assets -= lamports;
    Ok(())
}

/// The effects half of the vault deposit handler: a direct deposit raises
/// the idle balance and the local claim, never the manager's allocation
fn vault_deposit(
    vault: &mut StrategyVaultState,
    shares: &mut ShareLedger,
    depositor: &Pubkey,
    lamports: u64,
) -> Result<()> {
    let minted = vault.calculate_claim_shares(lamports, shares.total_shares)?;
    shares.mint(depositor, minted)?;
    vault.idle_balance += lamports;
    vault.total_deposited += lamports;
    Ok(())
}

#[test]
fn stake_distributes_sixty_forty_across_vaults() {
    let mut manager = new_manager();
    let manager_key = Pubkey::new_unique();
    let mut ledger = new_ledger(manager_key);
    let mut registry = new_registry(manager_key);
    let v1 = Pubkey::new_unique();
    let v2 = Pubkey::new_unique();
    registry.add(v1, 60, None).unwrap();
    registry.add(v2, 40, None).unwrap();
    let mut vaults = BTreeMap::from([(v1, new_vault(manager_key)), (v2, new_vault(manager_key))]);

    let user = Pubkey::new_unique();
    stake(&mut manager, &mut ledger, &registry, &mut vaults, &user, ONE_SOL).unwrap();

    assert_eq!(vaults[&v1].idle_balance, 600_000_000);
    assert_eq!(vaults[&v1].manager_allocated, 600_000_000);
    assert_eq!(vaults[&v2].idle_balance, 400_000_000);
    assert_eq!(manager.total_assets, ONE_SOL);
    assert_eq!(manager.allocated_assets, ONE_SOL);
    assert_eq!(ledger.balance_of(&user), ONE_SOL);
}

#[test]
fn single_vault_receives_the_whole_deposit() {
    let mut manager = new_manager();
    let manager_key = Pubkey::new_unique();
    let mut ledger = new_ledger(manager_key);
    let mut registry = new_registry(manager_key);
    let v1 = Pubkey::new_unique();
    registry.add(v1, 10, None).unwrap();
    let mut vaults = BTreeMap::from([(v1, new_vault(manager_key))]);

    let user = Pubkey::new_unique();
    stake(&mut manager, &mut ledger, &registry, &mut vaults, &user, ONE_SOL).unwrap();

    assert_eq!(vaults[&v1].idle_balance, ONE_SOL);
    assert_eq!(ledger.balance_of(&user), ONE_SOL);
    assert_eq!(manager.total_assets, ONE_SOL);
    // nothing left idle in the manager reserve
    assert_eq!(manager.unallocated().unwrap(), 0);
}

#[test]
fn stake_then_full_unstake_returns_to_zero() {
    let mut manager = new_manager();
    let manager_key = Pubkey::new_unique();
    let mut ledger = new_ledger(manager_key);
    let mut registry = new_registry(manager_key);
    let v1 = Pubkey::new_unique();
    registry.add(v1, 100, None).unwrap();
    let mut vaults = BTreeMap::from([(v1, new_vault(manager_key))]);

    let user = Pubkey::new_unique();
    stake(&mut manager, &mut ledger, &registry, &mut vaults, &user, ONE_SOL).unwrap();

    let minted = ledger.balance_of(&user);
    let owed = unstake(&mut manager, &mut ledger, &registry, &mut vaults, &user, minted).unwrap();

    assert_eq!(owed, ONE_SOL);
    assert_eq!(manager.total_assets, 0);
    assert_eq!(manager.allocated_assets, 0);
    assert_eq!(ledger.total_shares, 0);
    assert_eq!(vaults[&v1].idle_balance, 0);
    assert_eq!(vaults[&v1].manager_allocated, 0);
}

#[test]
fn stake_with_empty_registry_stays_unallocated() {
    let mut manager = new_manager();
    let manager_key = Pubkey::new_unique();
    let mut ledger = new_ledger(manager_key);
    let registry = new_registry(manager_key);
    let mut vaults = BTreeMap::new();

    let user = Pubkey::new_unique();
    stake(&mut manager, &mut ledger, &registry, &mut vaults, &user, ONE_SOL).unwrap();

    assert_eq!(manager.total_assets, ONE_SOL);
    assert_eq!(manager.allocated_assets, 0);
    // fully redeemable from the idle reserve
    let owed = unstake(&mut manager, &mut ledger, &registry, &mut vaults, &user, ONE_SOL).unwrap();
    assert_eq!(owed, ONE_SOL);
    assert_eq!(manager.total_assets, 0);
}

#[test]
fn zero_amount_stake_and_unstake_are_rejected() {
    let mut manager = new_manager();
    let manager_key = Pubkey::new_unique();
    let mut ledger = new_ledger(manager_key);
    let registry = new_registry(manager_key);
    let mut vaults = BTreeMap::new();

    let user = Pubkey::new_unique();
    stake(&mut manager, &mut ledger, &registry, &mut vaults, &user, 100).unwrap();

    assert!(stake(&mut manager, &mut ledger, &registry, &mut vaults, &user, 0).is_err());
    assert!(unstake(&mut manager, &mut ledger, &registry, &mut vaults, &user, 0).is_err());
    assert_eq!(manager.total_assets, 100);
    assert_eq!(ledger.balance_of(&user), 100);
}

#[test]
fn unstake_more_than_claim_fails() {
    let mut manager = new_manager();
    let manager_key = Pubkey::new_unique();
    let mut ledger = new_ledger(manager_key);
    let registry = new_registry(manager_key);
    let mut vaults = BTreeMap::new();

    let user = Pubkey::new_unique();
    stake(&mut manager, &mut ledger, &registry, &mut vaults, &user, 100).unwrap();

    assert!(unstake(&mut manager, &mut ledger, &registry, &mut vaults, &user, 101).is_err());
    // state unchanged after the failed redemption
    assert_eq!(manager.total_assets, 100);
    assert_eq!(ledger.balance_of(&user), 100);
}

#[test]
fn unstake_shortfall_in_one_vault_fails_the_whole_withdrawal() {
    let mut manager = new_manager();
    let manager_key = Pubkey::new_unique();
    let mut ledger = new_ledger(manager_key);
    let mut registry = new_registry(manager_key);
    let v1 = Pubkey::new_unique();
    let v2 = Pubkey::new_unique();
    registry.add(v1, 50, None).unwrap();
    registry.add(v2, 50, None).unwrap();
    let mut vaults = BTreeMap::from([(v1, new_vault(manager_key)), (v2, new_vault(manager_key))]);

    let user = Pubkey::new_unique();
    stake(&mut manager, &mut ledger, &registry, &mut vaults, &user, 1000).unwrap();

    // v2 swapped its idle lamports away mid-lifecycle
    let v2_state = vaults.get_mut(&v2).unwrap();
    v2_state.begin_stake().unwrap();
    v2_state.finish_stake(480).unwrap();

    // v1 could cover its 300 slice, but v2 cannot; nothing moves at all
    let res = unstake(&mut manager, &mut ledger, &registry, &mut vaults, &user, 600);
    assert!(res.is_err());
    assert_eq!(ledger.balance_of(&user), 1000);
    assert_eq!(manager.total_assets, 1000);
    assert_eq!(manager.allocated_assets, 1000);
    assert_eq!(vaults[&v1].idle_balance, 500);
    assert_eq!(vaults[&v1].manager_allocated, 500);
}

#[test]
fn unstake_cannot_consume_direct_vault_deposits() {
    let mut manager = new_manager();
    let manager_key = Pubkey::new_unique();
    let mut ledger = new_ledger(manager_key);
    let mut registry = new_registry(manager_key);
    let v1 = Pubkey::new_unique();
    let v2 = Pubkey::new_unique();
    registry.add(v1, 10, None).unwrap();
    registry.add(v2, 90, None).unwrap();
    let mut vaults = BTreeMap::from([(v1, new_vault(manager_key)), (v2, new_vault(manager_key))]);
    let mut v1_shares = new_ledger(v1);

    let user = Pubkey::new_unique();
    stake(&mut manager, &mut ledger, &registry, &mut vaults, &user, 1000).unwrap();
    assert_eq!(vaults[&v1].manager_allocated, 100);

    // v2 leaves the registry with the manager's 900 still inside it, and a
    // direct depositor then puts 500 of their own lamports into v1
    registry.remove(&v2).unwrap();
    let depositor = Pubkey::new_unique();
    vault_deposit(vaults.get_mut(&v1).unwrap(), &mut v1_shares, &depositor, 500).unwrap();
    assert_eq!(vaults[&v1].idle_balance, 600);

    // v1 has 600 idle lamports, but only 100 of them are the manager's;
    // the redemption must not drain the direct depositor's 500
    let res = unstake(&mut manager, &mut ledger, &registry, &mut vaults, &user, 600);
    assert!(res.is_err());
    assert_eq!(vaults[&v1].idle_balance, 600);
    assert_eq!(vaults[&v1].manager_allocated, 100);
    assert_eq!(ledger.balance_of(&user), 1000);

    // recalling the manager's money from the removed vault makes the same
    // redemption whole again
    recall(&mut manager, vaults.get_mut(&v2).unwrap(), 900).unwrap();
    let owed = unstake(&mut manager, &mut ledger, &registry, &mut vaults, &user, 600).unwrap();
    assert_eq!(owed, 600);
    assert_eq!(manager.total_assets, 400);
    assert_eq!(vaults[&v1].idle_balance, 600);
}

#[test]
fn second_depositor_pays_the_accrued_yield_price() {
    let mut manager = new_manager();
    let manager_key = Pubkey::new_unique();
    let mut ledger = new_ledger(manager_key);
    let registry = new_registry(manager_key);
    let mut vaults = BTreeMap::new();

    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();

    stake(&mut manager, &mut ledger, &registry, &mut vaults, &alice, 1000).unwrap();
    // yield accrues: tracked assets double, supply unchanged
    manager.total_assets = 2000;

    stake(&mut manager, &mut ledger, &registry, &mut vaults, &bob, 500).unwrap();
    assert_eq!(ledger.balance_of(&bob), 250);
    assert_eq!(ledger.total_shares, 1250);

    // bob's 250 shares redeem for his 500 lamports
    let owed = unstake(&mut manager, &mut ledger, &registry, &mut vaults, &bob, 250).unwrap();
    assert_eq!(owed, 500);
    // alice still holds claim to the remaining 2000
    let owed = unstake(&mut manager, &mut ledger, &registry, &mut vaults, &alice, 1000).unwrap();
    assert_eq!(owed, 2000);
    assert_eq!(manager.total_assets, 0);
}

#[test]
fn registry_rejects_duplicates_and_double_removal() {
    let mut registry = new_registry(Pubkey::new_unique());
    let v = Pubkey::new_unique();

    registry.add(v, 50, None).unwrap();
    assert!(registry.add(v, 50, None).is_err());

    registry.remove(&v).unwrap();
    assert!(registry.remove(&v).is_err());
    assert_eq!(registry.total_weight, 0);
    assert_eq!(registry.lookup(&v), Pubkey::default());
}

#[test]
fn removal_does_not_touch_allocated_funds() {
    let mut manager = new_manager();
    let manager_key = Pubkey::new_unique();
    let mut ledger = new_ledger(manager_key);
    let mut registry = new_registry(manager_key);
    let v = Pubkey::new_unique();
    registry.add(v, 100, None).unwrap();
    let mut vaults = BTreeMap::from([(v, new_vault(manager_key))]);

    let user = Pubkey::new_unique();
    stake(&mut manager, &mut ledger, &registry, &mut vaults, &user, ONE_SOL).unwrap();

    registry.remove(&v).unwrap();
    // registry slot is gone but the allocation accounting is untouched
    assert_eq!(registry.lookup(&v), Pubkey::default());
    assert_eq!(manager.allocated_assets, ONE_SOL);
    assert_eq!(vaults[&v].manager_allocated, ONE_SOL);
    assert_eq!(manager.total_assets, ONE_SOL);
}

#[test]
fn vault_venue_split_and_lifecycle() {
    let mut vault = new_vault(Pubkey::new_unique());

    vault.set_portions(60, 40).unwrap();
    assert!(vault.set_portions(60, 50).is_err());

    vault.idle_balance = ONE_SOL;
    let amount = vault.begin_stake().unwrap();
    let (uni, bal) = vault.venue_split(amount).unwrap();
    assert_eq!(uni, 600_000_000);
    assert_eq!(bal, 400_000_000);

    vault.finish_stake(990_000_000).unwrap();
    assert_eq!(vault.phase, VaultPhase::Staked);
    assert_eq!(vault.idle_balance, 0);

    let tokens = vault.begin_unstake().unwrap();
    assert_eq!(tokens, 990_000_000);
    vault.finish_unstake(985_000_000).unwrap();
    assert_eq!(vault.phase, VaultPhase::Idle);
    assert_eq!(vault.idle_balance, 985_000_000);
    assert_eq!(vault.staked_lp_balance, 0);
}
