//! Cron normalization, parsing, and next-fire computation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use cron::Schedule;

use crate::error::ScheduleError;

/// Normalize a 5-field cron expression to 6-field by prepending "0 " for seconds.
///
/// The `cron` crate requires 6 fields: `sec min hour day-of-month month day-of-week`.
/// Task definitions use standard 5-field cron: `min hour day-of-month month day-of-week`.
pub fn normalize_cron(cron_5field: &str) -> String {
    let trimmed = cron_5field.trim();
    let field_count = trimmed.split_whitespace().count();
    if field_count == 5 {
        format!("0 {}", trimmed)
    } else {
        // Already 6-field or non-standard; pass through as-is.
        trimmed.to_string()
    }
}

/// Parse a cron expression into a reusable [`Schedule`].
pub fn parse_schedule(expr: &str) -> Result<Schedule, ScheduleError> {
    Schedule::from_str(&normalize_cron(expr)).map_err(|source| ScheduleError::Parse {
        expr: expr.to_string(),
        source,
    })
}

/// Validate a task-facing cron expression: exactly 5 fields, and parseable.
///
/// Stricter than [`parse_schedule`], which tolerates pre-normalized 6-field
/// input; the API boundary only accepts the 5-field form.
pub fn validate(expr: &str) -> Result<(), ScheduleError> {
    if expr.split_whitespace().count() != 5 {
        return Err(ScheduleError::FieldCount(expr.trim().to_string()));
    }
    parse_schedule(expr).map(|_| ())
}

/// Earliest fire instant of an already-parsed schedule strictly after `after`.
///
/// `None` only for schedules that run out of matching instants (e.g. a fixed
/// date in the past relative to `after`).
pub fn next_fire_of(schedule: &Schedule, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    schedule.after(&after).next()
}

/// Compute the earliest instant strictly after `after` that satisfies `expr`,
/// in UTC. Pure function of its inputs.
pub fn next_fire(expr: &str, after: DateTime<Utc>) -> Result<DateTime<Utc>, ScheduleError> {
    let schedule = parse_schedule(expr)?;
    next_fire_of(&schedule, after).ok_or_else(|| ScheduleError::Exhausted(expr.to_string()))
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    // -- normalize_cron ----------------------------------------------------

    #[test]
    fn normalize_cron_5_to_6_fields() {
        assert_eq!(normalize_cron("*/15 * * * *"), "0 */15 * * * *");
        assert_eq!(normalize_cron("0 6 * * 1-5"), "0 0 6 * * 1-5");
        assert_eq!(normalize_cron("30 2 1 * *"), "0 30 2 1 * *");
    }

    #[test]
    fn normalize_cron_already_6_fields() {
        assert_eq!(normalize_cron("0 */15 * * * *"), "0 */15 * * * *");
    }

    #[test]
    fn normalize_cron_trims_whitespace() {
        assert_eq!(normalize_cron("  */5 * * * *  "), "0 */5 * * * *");
    }

    // -- next_fire ---------------------------------------------------------

    #[test]
    fn next_fire_is_strictly_after_reference() {
        // Reference sits exactly on a 5-minute boundary; the result must be
        // the next boundary, not the reference itself.
        let t = at(2026, 1, 15, 10, 5, 0);
        let next = next_fire("*/5 * * * *", t).unwrap();
        assert!(next > t);
        assert_eq!(next, at(2026, 1, 15, 10, 10, 0));
    }

    #[test]
    fn next_fire_every_5_minutes_mid_window() {
        let t = at(2026, 1, 15, 10, 2, 30);
        let next = next_fire("*/5 * * * *", t).unwrap();
        assert_eq!(next, at(2026, 1, 15, 10, 5, 0));
    }

    #[test]
    fn next_fire_daily_midnight() {
        let t = at(2026, 1, 15, 10, 0, 0);
        let next = next_fire("0 0 * * *", t).unwrap();
        assert_eq!(next, at(2026, 1, 16, 0, 0, 0));
    }

    #[test]
    fn next_fire_hourly_crosses_day_boundary() {
        let t = at(2026, 1, 15, 23, 30, 0);
        let next = next_fire("0 * * * *", t).unwrap();
        assert_eq!(next, at(2026, 1, 16, 0, 0, 0));
    }

    #[test]
    fn next_fire_day_of_month() {
        let t = at(2026, 1, 15, 0, 0, 0);
        let next = next_fire("30 2 1 * *", t).unwrap();
        assert_eq!(next, at(2026, 2, 1, 2, 30, 0));
    }

    #[test]
    fn next_fire_weekday_range() {
        // 2026-01-16 is a Friday; "0 6 * * 1-5" next fires Friday 06:00,
        // and from Friday 07:00 it skips to Monday.
        let thursday_night = at(2026, 1, 15, 22, 0, 0);
        assert_eq!(
            next_fire("0 6 * * 1-5", thursday_night).unwrap(),
            at(2026, 1, 16, 6, 0, 0)
        );

        let friday_morning = at(2026, 1, 16, 7, 0, 0);
        let next = next_fire("0 6 * * 1-5", friday_morning).unwrap();
        assert_eq!(next, at(2026, 1, 19, 6, 0, 0));
        assert_eq!(next.weekday(), chrono::Weekday::Mon);
    }

    #[test]
    fn next_fire_satisfies_expression() {
        let t = at(2026, 6, 3, 17, 43, 12);
        let next = next_fire("15,45 */2 * * *", t).unwrap();
        assert!(next > t);
        assert!(next.minute() == 15 || next.minute() == 45);
        assert_eq!(next.hour() % 2, 0);
        assert_eq!(next.second(), 0);
    }

    #[test]
    fn next_fire_invalid_expression_is_parse_error() {
        let err = next_fire("not a cron", at(2026, 1, 1, 0, 0, 0)).unwrap_err();
        assert!(matches!(err, ScheduleError::Parse { .. }));
        assert!(err.to_string().contains("not a cron"));
    }

    #[test]
    fn next_fire_out_of_range_minute_is_parse_error() {
        let err = next_fire("61 * * * *", at(2026, 1, 1, 0, 0, 0)).unwrap_err();
        assert!(matches!(err, ScheduleError::Parse { .. }));
    }

    // -- validate ----------------------------------------------------------

    #[test]
    fn validate_accepts_standard_expressions() {
        assert!(validate("*/5 * * * *").is_ok());
        assert!(validate("0 0 * * *").is_ok());
        assert!(validate("15,45 */2 1-15 * 1-5").is_ok());
    }

    #[test]
    fn validate_rejects_wrong_field_count() {
        assert!(matches!(
            validate("* * * *").unwrap_err(),
            ScheduleError::FieldCount(_)
        ));
        assert!(matches!(
            validate("0 * * * * *").unwrap_err(),
            ScheduleError::FieldCount(_)
        ));
    }

    #[test]
    fn validate_rejects_garbage_fields() {
        assert!(validate("a b c d e").is_err());
    }

    // -- parse_schedule reuse ----------------------------------------------

    #[test]
    fn parsed_schedule_can_be_advanced_repeatedly() {
        let schedule = parse_schedule("*/10 * * * *").unwrap();
        let t0 = at(2026, 1, 15, 10, 0, 0);
        let t1 = next_fire_of(&schedule, t0).unwrap();
        let t2 = next_fire_of(&schedule, t1).unwrap();
        assert_eq!(t1, at(2026, 1, 15, 10, 10, 0));
        assert_eq!(t2, at(2026, 1, 15, 10, 20, 0));
    }
}
