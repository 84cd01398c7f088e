//! Date and duration helpers shared by the OT screens.

use chrono::{Datelike, Local, Months, NaiveDate, TimeDelta};
use shared::models::{DayStats, ReportScope};

const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Parse the leading `YYYY-MM-DD` of `raw`.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let head = raw.get(..10)?;
    NaiveDate::parse_from_str(head, DAY_FORMAT).ok()
}

pub fn week_start_monday(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Monday through Sunday of the week starting at `start`.
pub fn week_dates(start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|offset| start + TimeDelta::days(offset as i64))
}

/// `"2025-03-03 → 2025-03-09"` for the week containing `anchor`.
pub fn week_label(anchor: NaiveDate) -> String {
    let start = week_start_monday(anchor);
    let end = start + TimeDelta::days(6);
    format!("{} → {}", format_day(start), format_day(end))
}

fn first_of_month(raw: &str) -> Option<NaiveDate> {
    let year = raw.get(..4)?.parse().ok()?;
    if raw.get(4..5)? != "-" {
        return None;
    }
    let month = raw.get(5..7)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn first_of_year(raw: &str) -> Option<NaiveDate> {
    let year = raw.get(..4)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Snap a user-entered anchor to the start of its reporting period.
///
/// Daily keeps the day, weekly moves to Monday, monthly to the 1st and yearly to
/// January 1st. Input that does not parse falls back to the period containing `today`.
pub fn normalize_anchor(scope: ReportScope, raw: &str, today: NaiveDate) -> NaiveDate {
    let raw = raw.trim();
    match scope {
        ReportScope::Daily => parse_day(raw).unwrap_or(today),
        ReportScope::Weekly => week_start_monday(parse_day(raw).unwrap_or(today)),
        ReportScope::Monthly => first_of_month(raw)
            .or_else(|| today.with_day(1))
            .unwrap_or(today),
        ReportScope::Yearly => first_of_year(raw)
            .or_else(|| NaiveDate::from_ymd_opt(today.year(), 1, 1))
            .unwrap_or(today),
    }
}

/// Move `anchor` by `steps` periods of `scope`, keeping it normalized.
pub fn shift_anchor(scope: ReportScope, anchor: NaiveDate, steps: i32) -> NaiveDate {
    let months = Months::new(steps.unsigned_abs());
    let shifted = match scope {
        ReportScope::Daily => anchor.checked_add_signed(TimeDelta::days(i64::from(steps))),
        ReportScope::Weekly => anchor.checked_add_signed(TimeDelta::weeks(i64::from(steps))),
        ReportScope::Monthly if steps >= 0 => anchor.checked_add_months(months),
        ReportScope::Monthly => anchor.checked_sub_months(months),
        ReportScope::Yearly => anchor.with_year(anchor.year() + steps),
    };
    normalize_anchor(scope, &format_day(shifted.unwrap_or(anchor)), anchor)
}

/// The value an `<input>` for `scope` shows: `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
pub fn anchor_input_value(scope: ReportScope, anchor: NaiveDate) -> String {
    match scope {
        ReportScope::Daily | ReportScope::Weekly => format_day(anchor),
        ReportScope::Monthly => anchor.format("%Y-%m").to_string(),
        ReportScope::Yearly => anchor.year().to_string(),
    }
}

/// Minutes as hours, rounded to two decimals without trailing zeros: `90 → "1.5"`.
pub fn minutes_to_hours(minutes: u32) -> String {
    let hours = (f64::from(minutes) / 60.0 * 100.0).round() / 100.0;
    let text = format!("{hours:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Minutes as `"1h 30m"`.
pub fn minutes_to_human(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Add up a week of per-day stats.
pub fn sum_week(days: &[DayStats]) -> DayStats {
    days.iter().fold(DayStats::default(), |mut acc, day| {
        acc.total += day.total;
        acc.pending += day.pending;
        acc.approved += day.approved;
        acc.rejected += day.rejected;
        acc.hours.normal += day.hours.normal;
        acc.hours.double += day.hours.double;
        acc.hours.triple += day.hours.triple;
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, DAY_FORMAT).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2025-03-09 is a Sunday.
        assert_eq!(week_start_monday(day("2025-03-09")), day("2025-03-03"));
        assert_eq!(week_start_monday(day("2025-03-03")), day("2025-03-03"));
        let dates = week_dates(day("2025-03-03"));
        assert_eq!(dates[6], day("2025-03-09"));
        assert_eq!(week_label(day("2025-03-05")), "2025-03-03 → 2025-03-09");
    }

    #[test]
    fn anchors_snap_to_period_start() {
        let today = day("2025-06-18");
        assert_eq!(
            normalize_anchor(ReportScope::Daily, "2025-02-14T10:00:00Z", today),
            day("2025-02-14")
        );
        assert_eq!(
            normalize_anchor(ReportScope::Weekly, "2025-02-14", today),
            day("2025-02-10")
        );
        assert_eq!(
            normalize_anchor(ReportScope::Monthly, "2025-02", today),
            day("2025-02-01")
        );
        assert_eq!(
            normalize_anchor(ReportScope::Yearly, "2024", today),
            day("2024-01-01")
        );
    }

    #[test]
    fn malformed_anchors_fall_back_to_today() {
        let today = day("2025-06-18");
        assert_eq!(normalize_anchor(ReportScope::Daily, "", today), today);
        assert_eq!(
            normalize_anchor(ReportScope::Weekly, "garbage", today),
            day("2025-06-16")
        );
        assert_eq!(
            normalize_anchor(ReportScope::Monthly, "2025-13", today),
            day("2025-06-01")
        );
        assert_eq!(
            normalize_anchor(ReportScope::Yearly, "20", today),
            day("2025-01-01")
        );
    }

    #[test]
    fn shifting_moves_whole_periods() {
        assert_eq!(
            shift_anchor(ReportScope::Weekly, day("2025-03-03"), -1),
            day("2025-02-24")
        );
        assert_eq!(
            shift_anchor(ReportScope::Monthly, day("2025-01-01"), -1),
            day("2024-12-01")
        );
        assert_eq!(
            shift_anchor(ReportScope::Yearly, day("2025-01-01"), 1),
            day("2026-01-01")
        );
        assert_eq!(
            anchor_input_value(ReportScope::Monthly, day("2025-01-01")),
            "2025-01"
        );
    }

    #[test]
    fn hours_drop_trailing_zeros() {
        assert_eq!(minutes_to_hours(90), "1.5");
        assert_eq!(minutes_to_hours(60), "1");
        assert_eq!(minutes_to_hours(100), "1.67");
        assert_eq!(minutes_to_hours(0), "0");
        assert_eq!(minutes_to_human(90), "1h 30m");
        assert_eq!(minutes_to_human(45), "0h 45m");
    }

    #[test]
    fn week_totals_add_up() {
        let mut monday = DayStats::default();
        monday.total = 3;
        monday.pending = 1;
        monday.hours.normal = 2.5;
        let mut tuesday = DayStats::default();
        tuesday.total = 2;
        tuesday.approved = 2;
        tuesday.hours.normal = 1.0;
        let total = sum_week(&[monday, tuesday]);
        assert_eq!(total.total, 5);
        assert_eq!(total.approved, 2);
        assert!((total.hours.normal - 3.5).abs() < f64::EPSILON);
    }
}
