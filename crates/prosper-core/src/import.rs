//! CSV transaction import
//!
//! Columns are matched by header name (case-insensitive), so their order is
//! free:
//!
//! `date,description,amount,type,category,emotional_state,is_recurring`
//!
//! Only `date`, `description` and `amount` are required.

use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{EmotionalState, Transaction, TransactionType};

const DEFAULT_CATEGORY: &str = "other";

/// Column positions resolved from the header row
struct Columns {
    date: usize,
    description: usize,
    amount: usize,
    transaction_type: Option<usize>,
    category: Option<usize>,
    emotional_state: Option<usize>,
    is_recurring: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| Error::Import(format!("Missing required column: {}", name)))
        };

        Ok(Self {
            date: require("date")?,
            description: require("description")?,
            amount: require("amount")?,
            transaction_type: find("type"),
            category: find("category"),
            emotional_state: find("emotional_state"),
            is_recurring: find("is_recurring"),
        })
    }
}

/// Parse a headered CSV export into transactions
///
/// Transactions come back without ids; the snapshot assigns them on insert.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut transactions = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let tx = parse_record(&record, &columns)
            .map_err(|e| Error::Import(format!("row {}: {}", line, e)))?;
        transactions.push(tx);
    }

    debug!("Parsed {} CSV transactions", transactions.len());
    Ok(transactions)
}

fn parse_record(record: &StringRecord, columns: &Columns) -> std::result::Result<Transaction, String> {
    let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).filter(|s| !s.is_empty());

    let date = parse_date(field(Some(columns.date)).ok_or("missing date")?)?;
    let description = field(Some(columns.description))
        .ok_or("missing description")?
        .to_string();
    let signed_amount = parse_amount(field(Some(columns.amount)).ok_or("missing amount")?)?;

    let transaction_type = match field(columns.transaction_type) {
        Some(s) => s.parse::<TransactionType>()?,
        None => TransactionType::Expense,
    };
    let category = field(columns.category)
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();
    let emotional_state = match field(columns.emotional_state) {
        Some(s) => s.parse::<EmotionalState>()?,
        None => EmotionalState::Neutral,
    };
    let is_recurring = match field(columns.is_recurring) {
        Some(s) => parse_bool(s)?,
        None => false,
    };

    Ok(Transaction {
        id: String::new(),
        amount: signed_amount.abs(),
        transaction_type,
        category,
        description,
        date,
        classification: None,
        emotional_state,
        is_recurring,
    })
}

/// Parse a date, trying ISO, RFC 3339, then day-first and month-first forms
fn parse_date(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%d", // 2026-01-15
        "%d/%m/%Y", // 15/01/2026
        "%m/%d/%Y", // 01/15/2026
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
        }
    }

    Err(format!("unable to parse date: {}", s))
}

/// Parse an amount, handling currency symbols, thousands separators and
/// parentheses for negatives
///
/// A comma followed by one or two trailing digits is a decimal comma
/// (`1.234,56`); any other comma is a thousands separator (`1,234.56`).
fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let kept: String = s
        .trim()
        .replace('(', "-")
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();

    let decimal_comma = kept.rfind(|c: char| c == '.' || c == ',').is_some_and(|pos| {
        let decimals = kept.len() - pos - 1;
        kept[pos..].starts_with(',') && (1..=2).contains(&decimals)
    });
    let cleaned = if decimal_comma {
        kept.replace('.', "").replace(',', ".")
    } else {
        kept.replace(',', "")
    };

    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(format!("unable to parse amount: {}", s)),
    }
}

fn parse_bool(s: &str) -> std::result::Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "sim" => Ok(true),
        "false" | "no" | "0" | "não" | "nao" => Ok(false),
        _ => Err(format!("unable to parse boolean: {}", s)),
    }
}
