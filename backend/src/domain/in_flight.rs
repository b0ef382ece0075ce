//! Per-account in-flight request tokens.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{AccountId, GenerationRequestId};

/// Tracks which account currently has a pending generation request.
///
/// At most one token exists per account. Acquisition is a single
/// check-and-insert under the lock, so two racing submissions for the same
/// account cannot both succeed. Different accounts never contend on the same
/// entry.
#[derive(Debug, Default)]
pub struct InFlightRegistry {
    entries: Mutex<HashMap<AccountId, GenerationRequestId>>,
}

impl InFlightRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // Entries are inserted and removed whole, so a poisoned map is still
    // consistent.
    fn entries(&self) -> MutexGuard<'_, HashMap<AccountId, GenerationRequestId>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim the account's token for `request`.
    ///
    /// Returns the identifier of the request already holding the token when
    /// the account is busy.
    pub fn try_acquire(
        &self,
        account_id: AccountId,
        request: GenerationRequestId,
    ) -> Result<(), GenerationRequestId> {
        let mut entries = self.entries();
        if let Some(existing) = entries.get(&account_id) {
            return Err(*existing);
        }
        entries.insert(account_id, request);
        Ok(())
    }

    /// Release the token if `request` still holds it.
    pub fn release(&self, account_id: &AccountId, request: GenerationRequestId) -> bool {
        let mut entries = self.entries();
        if entries.get(account_id) == Some(&request) {
            entries.remove(account_id);
            return true;
        }
        false
    }

    /// Request currently holding the account's token.
    pub fn in_flight(&self, account_id: &AccountId) -> Option<GenerationRequestId> {
        self.entries().get(account_id).copied()
    }

    /// Number of accounts with a pending request.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether no account has a pending request.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
