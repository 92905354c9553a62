use super::*;
use pretty_assertions::assert_eq;

// === Day counts ===

#[test]
fn base_date_is_day_zero() {
    assert_eq!(days_from_ymd(1990, 1, 1), 0);
    assert_eq!(
        ymd_from_days(0),
        CivilDate {
            year: 1990,
            month: 1,
            day: 1
        }
    );
}

#[test]
fn known_dates() {
    assert_eq!(days_from_ymd(1990, 12, 31), 364);
    assert_eq!(days_from_ymd(1991, 1, 1), 365);
    assert_eq!(days_from_ymd(2024, 1, 1), 12418);
    assert_eq!(days_from_ymd(2024, 3, 1), 12418 + 31 + 29);
}

#[test]
fn day_counts_round_trip_over_whole_range() {
    let last = days_from_ymd(2078, 12, 31);
    for days in 0..=last {
        let days = i32::try_from(days).unwrap();
        let civil = ymd_from_days(days);
        assert!(date_ok(i64::from(civil.year), civil.month, civil.day));
        assert_eq!(
            days_from_ymd(i64::from(civil.year), civil.month, civil.day),
            i64::from(days)
        );
    }
}

#[test]
fn negative_day_counts_fall_before_base_year() {
    assert_eq!(
        ymd_from_days(-1),
        CivilDate {
            year: 1989,
            month: 12,
            day: 31
        }
    );
}

#[test]
fn far_future_day_counts_do_not_panic() {
    let civil = ymd_from_days(i32::MAX);
    assert!(civil.year > 5_000_000);
    assert!((1..=12).contains(&civil.month));
}

// === Validation ===

#[test]
fn leap_years() {
    assert!(is_leap_year(2000));
    assert!(is_leap_year(2024));
    assert!(!is_leap_year(1900));
    assert!(!is_leap_year(2023));
}

#[test]
fn month_lengths() {
    assert_eq!(days_in_month(2, 2024), 29);
    assert_eq!(days_in_month(2, 2023), 28);
    assert_eq!(days_in_month(4, 2023), 30);
    assert_eq!(days_in_month(12, 2023), 31);
    assert_eq!(days_in_month(13, 2023), 0);
}

#[test]
fn date_range_limits() {
    assert!(date_ok(1990, 1, 1));
    assert!(date_ok(2078, 12, 31));
    assert!(!date_ok(1989, 12, 31));
    assert!(!date_ok(2079, 1, 1));
    assert!(!date_ok(2023, 2, 29));
    assert!(!date_ok(2023, 0, 1));
    assert!(!date_ok(2023, 1, 0));
}

#[test]
fn date_from_ymd_rejects_invalid_dates() {
    assert_eq!(date_from_ymd(2024, 1, 6), Ok(12423));
    assert_eq!(date_from_ymd(2024, 2, 30), Err(EvalError::BadDate));
}

// === Weekdays ===

#[test]
fn day_zero_is_monday() {
    assert_eq!(weekday_monday_first(0), 0);
    assert_eq!(weekday_sunday_first(0), 1);
    assert_eq!(DAY_NAMES[weekday_monday_first(0)], "Monday");
}

#[test]
fn new_year_2024_is_monday() {
    let days = date_from_ymd(2024, 1, 1).unwrap();
    assert_eq!(DAY_NAMES[weekday_monday_first(days)], "Monday");
    assert_eq!(weekday_sunday_first(days + 6), 0);
}
