//! Timezone localization at the write boundary.
//!
//! Clients may submit naive timestamps (no offset). Those are interpreted in
//! a single configured regional zone — expressed as a fixed UTC offset, the
//! zone has no DST — and converted to UTC before anything is stored. All
//! internal scheduling math runs on `DateTime<Utc>` only.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// Default offset: +05:30 (IST), in minutes.
pub const DEFAULT_LOCAL_OFFSET_MINUTES: i32 = 330;

/// Interpret a naive timestamp in the given fixed offset and convert to UTC.
///
/// Falls back to treating the input as UTC if the offset is out of range
/// (|offset| >= 24h), which cannot happen with config-sourced values.
pub fn localize_naive(naive: NaiveDateTime, offset_minutes: i32) -> DateTime<Utc> {
    match FixedOffset::east_opt(offset_minutes * 60) {
        Some(offset) => naive
            .and_local_timezone(offset)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| DateTime::from_naive_utc_and_offset(naive, Utc)),
        None => DateTime::from_naive_utc_and_offset(naive, Utc),
    }
}

// ── Tests ────────────────────────────────────────────────────────────
