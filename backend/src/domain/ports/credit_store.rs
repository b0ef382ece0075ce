//! Driven port for the billing collaborator that owns credit balances.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{AccountId, Credits};

define_port_error! {
    /// Errors surfaced by the credit store.
    pub enum CreditStoreError {
        /// No balance is recorded for the account.
        UnknownAccount { account_id: String } => "no credit balance recorded for account {account_id}",
        /// A debit was requested on an empty balance.
        Insufficient { account_id: String } => "account {account_id} has no credits to debit",
        /// The store could not be reached.
        Unavailable { message: String } => "credit store unavailable: {message}",
    }
}

/// Source of truth for account credit balances.
///
/// The lifecycle reads the balance at submission time and asks for a single
/// debit when a generation succeeds. It never persists balances itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreditStore: Send + Sync {
    /// Current balance for the account.
    async fn balance(&self, account_id: &AccountId) -> Result<Credits, CreditStoreError>;

    /// Remove exactly one credit, returning the new balance.
    ///
    /// Must fail with [`CreditStoreError::Insufficient`] rather than go
    /// below zero.
    async fn debit_one(&self, account_id: &AccountId) -> Result<Credits, CreditStoreError>;
}

/// Stateless store double reporting a fixed balance.
#[derive(Debug, Clone, Copy)]
pub struct FixtureCreditStore {
    balance: Credits,
}

impl FixtureCreditStore {
    /// Report `balance` for every account.
    pub const fn new(balance: Credits) -> Self {
        Self { balance }
    }
}

#[async_trait]
impl CreditStore for FixtureCreditStore {
    async fn balance(&self, _account_id: &AccountId) -> Result<Credits, CreditStoreError> {
        Ok(self.balance)
    }

    async fn debit_one(&self, account_id: &AccountId) -> Result<Credits, CreditStoreError> {
        self.balance
            .debit_one()
            .ok_or_else(|| CreditStoreError::insufficient(account_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_store_refuses_to_debit_an_empty_balance() {
        let store = FixtureCreditStore::new(Credits::ZERO);
        let account = AccountId::random();

        let err = store.debit_one(&account).await.expect_err("empty balance");

        assert_eq!(err, CreditStoreError::insufficient(account.to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_store_reports_balance_less_one_after_debit() {
        let store = FixtureCreditStore::new(Credits::new(3));
        let remaining = store
            .debit_one(&AccountId::random())
            .await
            .expect("debit succeeds");
        assert_eq!(remaining, Credits::new(2));
    }
}
