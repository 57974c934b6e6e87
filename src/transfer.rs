use crate::account::AccountId;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// One transfer row exactly as the store hands it over. `from`, `to` and
/// `amount` are trusted; the timestamp column is not. It may be absent, a
/// date or datetime string, an epoch value rendered as digits, or garbage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTransfer {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
    pub timestamp: Option<String>,
}

/// Timestamp field after coercion: either a proper UTC date or the sentinel
/// text that routes the record to exclusion downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedTimestamp {
    Date(DateTime<Utc>),
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTransfer {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
    pub timestamp: NormalizedTimestamp,
}

/// A transfer that survived filtering and carries a real date.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// A transfer excluded from aggregation, with the sentinel text explaining
/// what was wrong with its timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedTransfer {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
    pub reason: String,
}

impl RawTransfer {
    /// Coerce the raw timestamp to a date. Records that cannot be coerced
    /// are tagged, not dropped; filtering is the next stage's job.
    pub fn normalize(self) -> NormalizedTransfer {
        let timestamp = match &self.timestamp {
            None => NormalizedTimestamp::Invalid("Missing timestamp.".to_string()),
            Some(raw) => match parse_date(raw) {
                Some(ts) => NormalizedTimestamp::Date(ts),
                None => NormalizedTimestamp::Invalid(format!(
                    "Could not convert {} to type date.",
                    raw
                )),
            },
        };

        NormalizedTransfer {
            from: self.from,
            to: self.to,
            amount: self.amount,
            timestamp,
        }
    }
}

impl NormalizedTransfer {
    /// Keep the record only if its timestamp really is a date.
    pub fn into_dated(self) -> Result<Transfer, RejectedTransfer> {
        match self.timestamp {
            NormalizedTimestamp::Date(timestamp) => Ok(Transfer {
                from: self.from,
                to: self.to,
                amount: self.amount,
                timestamp,
            }),
            NormalizedTimestamp::Invalid(reason) => Err(RejectedTransfer {
                from: self.from,
                to: self.to,
                amount: self.amount,
                reason,
            }),
        }
    }
}

/// Accepted timestamp shapes, tried in order: RFC 3339, naive datetime
/// (read as UTC), date-only (midnight UTC), epoch milliseconds.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    if let Ok(millis) = raw.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn raw(timestamp: Option<&str>) -> RawTransfer {
        RawTransfer {
            from: "alice".to_string(),
            to: "bob".to_string(),
            amount: dec!(10),
            timestamp: timestamp.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_timestamp_sentinel() {
        let normalized = raw(None).normalize();
        assert_eq!(
            normalized.timestamp,
            NormalizedTimestamp::Invalid("Missing timestamp.".to_string())
        );
    }

    #[test]
    fn test_unparseable_timestamp_sentinel() {
        let normalized = raw(Some("not-a-date")).normalize();
        assert_eq!(
            normalized.timestamp,
            NormalizedTimestamp::Invalid(
                "Could not convert not-a-date to type date.".to_string()
            )
        );
    }

    #[test]
    fn test_rfc3339_timestamp() {
        let normalized = raw(Some("2024-01-05T10:30:00Z")).normalize();
        let expected = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        assert_eq!(normalized.timestamp, NormalizedTimestamp::Date(expected));
    }

    #[test]
    fn test_offset_timestamp_converted_to_utc() {
        let normalized = raw(Some("2024-01-05T12:00:00+02:00")).normalize();
        let expected = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        assert_eq!(normalized.timestamp, NormalizedTimestamp::Date(expected));
    }

    #[test]
    fn test_date_only_timestamp() {
        let normalized = raw(Some("2024-01-05")).normalize();
        let expected = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(normalized.timestamp, NormalizedTimestamp::Date(expected));
    }

    #[test]
    fn test_naive_datetime_timestamp() {
        let normalized = raw(Some("2024-01-05 08:15:00")).normalize();
        let expected = Utc.with_ymd_and_hms(2024, 1, 5, 8, 15, 0).unwrap();
        assert_eq!(normalized.timestamp, NormalizedTimestamp::Date(expected));
    }

    #[test]
    fn test_epoch_millis_timestamp() {
        // 2024-01-05T00:00:00Z
        let normalized = raw(Some("1704412800000")).normalize();
        let expected = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(normalized.timestamp, NormalizedTimestamp::Date(expected));
    }

    #[test]
    fn test_out_of_range_epoch_sentinel() {
        let normalized = raw(Some("99999999999999999999")).normalize();
        assert!(matches!(
            normalized.timestamp,
            NormalizedTimestamp::Invalid(_)
        ));
    }

    #[test]
    fn test_into_dated_carries_reason() {
        let rejected = raw(Some("tomorrow")).normalize().into_dated().unwrap_err();
        assert_eq!(rejected.from, "alice");
        assert_eq!(rejected.amount, dec!(10));
        assert_eq!(rejected.reason, "Could not convert tomorrow to type date.");
    }
}
