use crate::account::{Account, AccountId};
use crate::error::LedgerError;
use crate::store::TransferStore;
use crate::transfer::RawTransfer;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// In-memory account book with a log of the transfers made through it.
/// Balances never go negative; a transfer that cannot complete leaves both
/// balances and the log untouched.
pub struct Ledger {
    accounts: HashMap<AccountId, Account>,
    transfers: Vec<RawTransfer>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            transfers: Vec::new(),
        }
    }

    pub fn open_account(
        &mut self,
        id: &str,
        opening_balance: Decimal,
    ) -> Result<(), LedgerError> {
        if self.accounts.contains_key(id) {
            return Err(LedgerError::DuplicateAccount(id.to_string()));
        }
        self.accounts
            .insert(id.to_string(), Account::new(id, opening_balance));
        Ok(())
    }

    pub fn balance(&self, id: &str) -> Option<Decimal> {
        self.accounts.get(id).map(|account| account.balance)
    }

    pub fn deposit(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount);
        }
        let account = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))?;
        account.balance += amount;
        Ok(())
    }

    pub fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount);
        }
        let account = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))?;
        if !account.can_cover(amount) {
            return Err(LedgerError::InsufficientFunds {
                account: id.to_string(),
                requested: amount,
                available: account.balance,
            });
        }
        account.balance -= amount;
        Ok(())
    }

    /// Move `amount` between two accounts and record the transfer in the
    /// log. Debit and credit happen together or not at all.
    pub fn transfer_funds(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount);
        }
        if !self.accounts.contains_key(to) {
            return Err(LedgerError::AccountNotFound(to.to_string()));
        }

        let source = self
            .accounts
            .get_mut(from)
            .ok_or_else(|| LedgerError::AccountNotFound(from.to_string()))?;
        if !source.can_cover(amount) {
            return Err(LedgerError::InsufficientFunds {
                account: from.to_string(),
                requested: amount,
                available: source.balance,
            });
        }
        source.balance -= amount;

        if let Some(dest) = self.accounts.get_mut(to) {
            dest.balance += amount;
        }

        self.transfers.push(RawTransfer {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            timestamp: Some(at.to_rfc3339()),
        });

        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferStore for Ledger {
    fn transfers(&self) -> Result<Vec<RawTransfer>, anyhow::Error> {
        Ok(self.transfers.clone())
    }
}
