use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Count the business days (Monday through Friday) in the inclusive range
/// `start..=end`. Ranges are short in practice, so this iterates day by day
/// rather than using a closed form.
pub fn business_days(start: NaiveDate, end: NaiveDate) -> i64 {
    debug_assert!(start <= end);

    let mut day = start;
    let mut count = 0;
    while day <= end {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            count += 1;
        }
        day += Duration::days(1);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn single_weekday_counts_one() {
        // 2025-01-06 is a Monday.
        assert_eq!(business_days(d("2025-01-06"), d("2025-01-06")), 1);
    }

    #[test]
    fn full_work_week_counts_five() {
        assert_eq!(business_days(d("2025-01-06"), d("2025-01-10")), 5);
    }

    #[test]
    fn weekend_only_counts_zero() {
        assert_eq!(business_days(d("2025-01-11"), d("2025-01-12")), 0);
    }

    #[test]
    fn friday_to_monday_skips_the_weekend() {
        assert_eq!(business_days(d("2025-01-10"), d("2025-01-13")), 2);
    }

    #[test]
    fn two_full_weeks_count_ten() {
        assert_eq!(business_days(d("2025-01-06"), d("2025-01-17")), 10);
    }
}
