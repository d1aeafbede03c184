use chrono::{DateTime, Local, TimeZone};

use crate::models::{DisplayTransaction, RawTransaction};

const PAYMENT_REQUEST_PREVIEW_CHARS: usize = 25;

/// Sort a freshly fetched batch newest first and label every record.
///
/// The output depends only on `raw`; nothing from earlier batches survives.
pub fn normalize(raw: &[RawTransaction]) -> Vec<DisplayTransaction> {
    normalize_in(raw, &Local)
}

/// `normalize` with an explicit time zone for the display date
pub fn normalize_in<Tz: TimeZone>(raw: &[RawTransaction], tz: &Tz) -> Vec<DisplayTransaction>
where
    Tz::Offset: std::fmt::Display,
{
    let mut sorted: Vec<&RawTransaction> = raw.iter().collect();
    // stable, so equal timestamps keep backend order
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    sorted
        .into_iter()
        .map(|tx| DisplayTransaction {
            id: tx.id.clone(),
            created_at: tx.created_at,
            description: describe(tx),
            signed_value: format_value(tx),
            display_date: format_date(tx.created_at, tz),
            unsettled_marker: is_marked_unsettled(tx),
        })
        .collect()
}

/// Human readable one-liner for a transaction.
///
/// Only a literal `settled: false` counts as unpaid here; see
/// `is_marked_unsettled` for the numeric check.
pub fn describe(tx: &RawTransaction) -> String {
    if tx.settled.is_some_and(|s| s.is_false_literal()) {
        return "Unpaid invoice".to_string();
    }

    let direction = if tx.send.is_some_and(|s| s.is_zero_literal()) {
        "Received from"
    } else {
        "Sent to"
    };

    let preview: String = tx
        .payment_request
        .chars()
        .take(PAYMENT_REQUEST_PREVIEW_CHARS)
        .collect();

    format!("{} {}...", direction, preview)
}

/// Value prefixed with `-` for sends and `+` otherwise, e.g. `"+500 sats"`
pub fn format_value(tx: &RawTransaction) -> String {
    let sign = if tx.send.is_some_and(|s| s.is_truthy()) { "-" } else { "+" };
    format!("{}{} sats", sign, tx.value)
}

/// Unsettled marker, set only for a literal numeric `settled: 0`
pub fn is_marked_unsettled(tx: &RawTransaction) -> bool {
    tx.settled.is_some_and(|s| s.is_zero_literal())
}

/// Format epoch seconds like `10/19/2026, 3:04:05 PM`
pub fn format_date<Tz: TimeZone>(created_at: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp(created_at, 0) {
        Some(utc) => utc
            .with_timezone(tz)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        None => "Invalid Date".to_string(),
    }
}
