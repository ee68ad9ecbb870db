use chrono::prelude::*;
use chrono_tz::Europe::London;

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, get_month_length(year, month)).unwrap_or_default()
}

/// Month addition with the day clamped into the target month, so adding one
/// month to 31 January gives 28 or 29 February instead of rolling into March.
pub fn add_months_clamped(date: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = date.year() as i64 * 12 + date.month0() as i64 + months as i64;
    let year = zero_based.div_euclid(12) as i32;
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let day = date.day().min(get_month_length(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Year addition with 29 February clamped to 28 February in non leap years.
pub fn add_years_clamped(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(get_month_length(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap_or(date)
}

/// Calendar date in the UK right now, DST aware.
pub fn uk_today(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&London).date_naive()
}

/// Hour of day in the UK right now, DST aware.
pub fn uk_hour(now: DateTime<Utc>) -> u32 {
    now.with_timezone(&London).hour()
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn it_clamps_month_addition_to_end_of_month() {
        assert_eq!(add_months_clamped(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(add_months_clamped(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months_clamped(date(2025, 3, 31), 1), date(2025, 4, 30));
        assert_eq!(add_months_clamped(date(2025, 3, 15), 1), date(2025, 4, 15));
    }

    #[test]
    fn it_crosses_year_boundaries_when_adding_months() {
        assert_eq!(add_months_clamped(date(2025, 12, 31), 2), date(2026, 2, 28));
        assert_eq!(add_months_clamped(date(2025, 6, 30), 9), date(2026, 3, 30));
    }

    #[test]
    fn it_clamps_leap_day_when_adding_years() {
        assert_eq!(add_years_clamped(date(2024, 2, 29), 1), date(2025, 2, 28));
        assert_eq!(add_years_clamped(date(2024, 2, 29), 4), date(2028, 2, 29));
        assert_eq!(add_years_clamped(date(2025, 3, 31), 1), date(2026, 3, 31));
    }

    #[test]
    fn it_knows_the_length_of_february() {
        assert_eq!(last_day_of_month(2024, 2), date(2024, 2, 29));
        assert_eq!(last_day_of_month(2025, 2), date(2025, 2, 28));
        assert_eq!(last_day_of_month(2025, 12), date(2025, 12, 31));
    }

    #[test]
    fn it_tracks_daylight_saving_for_uk_hour() {
        let summer = Utc.with_ymd_and_hms(2025, 6, 18, 8, 30, 0).unwrap();
        assert_eq!(uk_hour(summer), 9);
        let winter = Utc.with_ymd_and_hms(2025, 1, 15, 8, 30, 0).unwrap();
        assert_eq!(uk_hour(winter), 8);
    }

    #[test]
    fn it_rolls_uk_date_over_at_local_midnight() {
        let summer_evening = Utc.with_ymd_and_hms(2025, 6, 30, 23, 30, 0).unwrap();
        assert_eq!(uk_today(summer_evening), date(2025, 7, 1));
        let winter_evening = Utc.with_ymd_and_hms(2025, 1, 15, 23, 30, 0).unwrap();
        assert_eq!(uk_today(winter_evening), date(2025, 1, 15));
    }
}
