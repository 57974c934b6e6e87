use crate::account::AccountId;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Account already exists: {0}")]
    DuplicateAccount(AccountId),

    #[error("Insufficient funds in {account}: {requested} requested, {available} available")]
    InsufficientFunds {
        account: AccountId,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Amount must be positive")]
    NonPositiveAmount,
}
