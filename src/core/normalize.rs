//! Normalization of raw backend records into dashboard types.
//!
//! The backend spreadsheet columns have shifted names over time, so every
//! field is resolved through an ordered list of known keys. Values are
//! coerced totally: a record that is missing fields, or carries them with
//! the wrong type, still normalizes to a usable default instead of failing
//! the whole load.

use crate::core::dashboard::{BalancePoint, CategoryTotal, DashboardCounts, MonthlyPoint};
use chrono::{DateTime, Datelike, NaiveDate};
use serde_json::Value;

/// Month labels used across the backend data, indexed by zero-based month.
pub const MONTH_LABELS: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

/// Placeholder for categories the backend returns without a usable name.
pub const UNNAMED_CATEGORY: &str = "Sem nome";

/// Returns the first non-null value among `keys`, in order.
///
/// A key that is present but null does not win the fallback; the next key is
/// tried instead.
fn first_present<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(key))
        .find(|value| !value.is_null())
}

/// Coerces a raw JSON value to a number. Finite numbers pass through,
/// numeric strings are parsed, everything else becomes `0.0`.
fn coerce_number(value: Option<&Value>) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite()).unwrap_or(0.0)
}

fn coerce_count(value: Option<&Value>) -> u64 {
    coerce_number(value).max(0.0) as u64
}

fn string_field(record: &Value, keys: &[&str]) -> Option<String> {
    first_present(record, keys)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn numeric_field(record: &Value, keys: &[&str]) -> f64 {
    coerce_number(first_present(record, keys))
}

/// Derives a month label from a date string, either `YYYY-MM-DD` or RFC 3339.
fn month_from_date(raw: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })?;
    Some(MONTH_LABELS[date.month0() as usize].to_string())
}

/// Resolves the month label for a record: an explicit label field wins,
/// otherwise the label is derived from the record's date, otherwise empty.
fn month_label(record: &Value) -> String {
    if let Some(label) = string_field(record, &["month", "mes"]) {
        return label;
    }
    record
        .get("date")
        .and_then(Value::as_str)
        .and_then(month_from_date)
        .unwrap_or_default()
}

pub fn normalize_monthly(records: &[Value]) -> Vec<MonthlyPoint> {
    records
        .iter()
        .map(|record| MonthlyPoint {
            month: month_label(record),
            income: numeric_field(record, &["income", "entradas", "total_in"]),
            expense: numeric_field(record, &["expense", "saidas", "total_out"]),
        })
        .collect()
}

pub fn normalize_balance(records: &[Value]) -> Vec<BalancePoint> {
    records
        .iter()
        .map(|record| BalancePoint {
            month: month_label(record),
            balance: numeric_field(record, &["balance", "saldo", "total"]),
        })
        .collect()
}

pub fn normalize_categories(records: &[Value]) -> Vec<CategoryTotal> {
    records
        .iter()
        .map(|record| CategoryTotal {
            name: string_field(record, &["name", "categoria", "label"])
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNNAMED_CATEGORY.to_string()),
            total: numeric_field(record, &["total", "valor", "amount"]),
        })
        .collect()
}

pub fn normalize_counts(record: &Value) -> DashboardCounts {
    DashboardCounts {
        sheets: coerce_count(record.get("sheets")),
        categories: coerce_count(record.get("categories")),
        transactions: coerce_count(record.get("transactions")),
        users: coerce_count(record.get("users")),
    }
}
