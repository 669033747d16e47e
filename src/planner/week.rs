use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration};

pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const MONTH_DAY: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none]");

/// serde helpers for `Date` fields carried as "2026-08-17" strings.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    use super::ISO_DATE;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = date.format(ISO_DATE).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&raw)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Date::parse(&raw, ISO_DATE).map_err(serde::de::Error::custom)
    }
}

/// The Monday on or before `date`. Idempotent.
pub fn week_start(date: Date) -> Date {
    // Sunday=0 .. Saturday=6
    let day = i64::from(date.weekday().number_days_from_sunday());
    let offset = if day == 0 { -6 } else { 1 - day };
    date.saturating_add(Duration::days(offset))
}

/// Shift a week boundary by `n` weeks; Monday-aligned input stays aligned.
pub fn shift_weeks(week: Date, n: i64) -> Date {
    week.saturating_add(Duration::weeks(n))
}

/// Display label "<start> – <start+6>" with short month names. Presentational
/// only; no parsing contract.
pub fn format_week_range(week: Date) -> String {
    let end = week.saturating_add(Duration::days(6));
    let start_label = week.format(MONTH_DAY).unwrap_or_default();
    let end_label = end.format(MONTH_DAY).unwrap_or_default();
    format!("{start_label} – {end_label}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Weekday;

    #[test]
    fn week_start_always_falls_on_monday() {
        let mut d = date!(2025 - 12 - 20);
        for _ in 0..60 {
            assert_eq!(week_start(d).weekday(), Weekday::Monday, "input {d}");
            d = d.next_day().unwrap();
        }
    }

    #[test]
    fn week_start_is_idempotent() {
        let mut d = date!(2026 - 08 - 01);
        for _ in 0..30 {
            let w = week_start(d);
            assert_eq!(week_start(w), w);
            d = d.next_day().unwrap();
        }
    }

    #[test]
    fn sunday_maps_to_previous_monday() {
        assert_eq!(week_start(date!(2026 - 08 - 23)), date!(2026 - 08 - 17));
    }

    #[test]
    fn midweek_maps_back_to_monday() {
        assert_eq!(week_start(date!(2026 - 08 - 19)), date!(2026 - 08 - 17));
        assert_eq!(week_start(date!(2026 - 08 - 17)), date!(2026 - 08 - 17));
    }

    #[test]
    fn shift_weeks_roundtrips() {
        let w = week_start(date!(2026 - 02 - 11));
        for n in [-52, -3, -1, 0, 1, 5, 104] {
            assert_eq!(shift_weeks(shift_weeks(w, n), -n), w);
            assert_eq!(shift_weeks(w, n).weekday(), Weekday::Monday);
        }
    }

    #[test]
    fn shift_crosses_year_boundary() {
        assert_eq!(shift_weeks(date!(2025 - 12 - 29), 1), date!(2026 - 01 - 05));
    }

    #[test]
    fn range_label_uses_short_months() {
        assert_eq!(format_week_range(date!(2026 - 01 - 05)), "Jan 5 – Jan 11");
        // range spanning a month boundary
        assert_eq!(format_week_range(date!(2026 - 03 - 30)), "Mar 30 – Apr 5");
    }
}
