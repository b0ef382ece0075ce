//! In-memory credit ledger.
//!
//! Stands in for the billing service until one exists. Balances live in a
//! mutex-guarded map; every debit is a read-modify-write under the lock, so
//! concurrent debits for one account cannot overdraw it.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{CreditStore, CreditStoreError};
use crate::domain::{AccountId, Credits};

/// Credit store keeping balances in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCreditStore {
    balances: Mutex<HashMap<AccountId, Credits>>,
}

impl InMemoryCreditStore {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn balances(&self) -> Result<MutexGuard<'_, HashMap<AccountId, Credits>>, CreditStoreError> {
        self.balances
            .lock()
            .map_err(|_| CreditStoreError::unavailable("credit ledger poisoned"))
    }

    /// Record an opening balance, replacing any existing one.
    pub fn open_account(
        &self,
        account_id: AccountId,
        credits: Credits,
    ) -> Result<(), CreditStoreError> {
        self.balances()?.insert(account_id, credits);
        Ok(())
    }

    /// Add credits bought through billing. Unknown accounts are opened.
    pub fn top_up(&self, account_id: AccountId, amount: u32) -> Result<Credits, CreditStoreError> {
        let mut balances = self.balances()?;
        let balance = balances.entry(account_id).or_default();
        *balance = balance.top_up(amount);
        Ok(*balance)
    }
}

#[async_trait]
impl CreditStore for InMemoryCreditStore {
    async fn balance(&self, account_id: &AccountId) -> Result<Credits, CreditStoreError> {
        self.balances()?
            .get(account_id)
            .copied()
            .ok_or_else(|| CreditStoreError::unknown_account(account_id.to_string()))
    }

    async fn debit_one(&self, account_id: &AccountId) -> Result<Credits, CreditStoreError> {
        let mut balances = self.balances()?;
        let balance = balances
            .get_mut(account_id)
            .ok_or_else(|| CreditStoreError::unknown_account(account_id.to_string()))?;
        let remaining = balance
            .debit_one()
            .ok_or_else(|| CreditStoreError::insufficient(account_id.to_string()))?;
        *balance = remaining;
        debug!(account_id = %account_id, remaining = remaining.get(), "debited one credit");
        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn account() -> AccountId {
        AccountId::random()
    }

    #[rstest]
    #[tokio::test]
    async fn debit_decrements_by_exactly_one(account: AccountId) {
        let store = InMemoryCreditStore::new();
        store.open_account(account, Credits::new(5)).expect("open");

        let remaining = store.debit_one(&account).await.expect("debit");

        assert_eq!(remaining, Credits::new(4));
        assert_eq!(store.balance(&account).await.expect("balance"), Credits::new(4));
    }

    #[rstest]
    #[tokio::test]
    async fn debit_never_goes_below_zero(account: AccountId) {
        let store = InMemoryCreditStore::new();
        store.open_account(account, Credits::new(1)).expect("open");

        store.debit_one(&account).await.expect("first debit");
        let err = store.debit_one(&account).await.expect_err("second debit");

        assert_eq!(err, CreditStoreError::insufficient(account.to_string()));
        assert_eq!(store.balance(&account).await.expect("balance"), Credits::ZERO);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_accounts_are_reported(account: AccountId) {
        let store = InMemoryCreditStore::new();
        let err = store.balance(&account).await.expect_err("unknown");
        assert_eq!(err, CreditStoreError::unknown_account(account.to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn top_up_opens_and_replenishes(account: AccountId) {
        let store = InMemoryCreditStore::new();
        assert_eq!(store.top_up(account, 2).expect("top up"), Credits::new(2));
        assert_eq!(store.top_up(account, 3).expect("top up"), Credits::new(5));
        assert_eq!(store.balance(&account).await.expect("balance"), Credits::new(5));
    }
}
