//! Monthly totals of outgoing transfers, one row per (account, year, month).
//!
//! A four-stage pass over the transfer collection: coerce timestamps, drop
//! records whose timestamp is not a date, group what remains by source
//! account and calendar month (UTC), and emit the groups in ascending
//! (account, year, month) order.

use crate::account::AccountId;
use crate::store::TransferStore;
use crate::transfer::{RawTransfer, RejectedTransfer};

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated outgoing transfers for one account in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub account: AccountId,
    pub year: i32,
    pub month: u32,
    pub sum: Decimal,
    pub count: u64,
}

// Field order gives the output order: account first, then year, then month.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    account: AccountId,
    year: i32,
    month: u32,
}

#[derive(Debug, Default)]
struct MonthTotals {
    sum: Decimal,
    count: u64,
}

/// Summarize a transfer collection. Records with a missing or unconvertible
/// timestamp are excluded without any report; use
/// [`summarize_with_rejected`] to see them.
pub fn summarize<I>(records: I) -> Vec<MonthlySummary>
where
    I: IntoIterator<Item = RawTransfer>,
{
    summarize_with_rejected(records).0
}

/// Same pipeline, but also returns the excluded records with the sentinel
/// text explaining each exclusion.
pub fn summarize_with_rejected<I>(records: I) -> (Vec<MonthlySummary>, Vec<RejectedTransfer>)
where
    I: IntoIterator<Item = RawTransfer>,
{
    let mut groups: BTreeMap<GroupKey, MonthTotals> = BTreeMap::new();
    let mut rejected = Vec::new();

    for raw in records {
        match raw.normalize().into_dated() {
            Ok(transfer) => {
                let key = GroupKey {
                    account: transfer.from,
                    year: transfer.timestamp.year(),
                    month: transfer.timestamp.month(),
                };
                let totals = groups.entry(key).or_default();
                totals.sum += transfer.amount;
                totals.count += 1;
            }
            Err(reject) => rejected.push(reject),
        }
    }

    let summaries = groups
        .into_iter()
        .map(|(key, totals)| MonthlySummary {
            account: key.account,
            year: key.year,
            month: key.month,
            sum: totals.sum,
            count: totals.count,
        })
        .collect();

    (summaries, rejected)
}

/// Run the pipeline against a store. The store is passed in explicitly;
/// its failures come back unmodified.
pub fn summarize_store(store: &impl TransferStore) -> Result<Vec<MonthlySummary>, anyhow::Error> {
    Ok(summarize(store.transfers()?))
}
