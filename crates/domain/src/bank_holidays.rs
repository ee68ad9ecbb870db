use crate::date::last_day_of_month;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankHoliday {
    pub date: NaiveDate,
    pub title: String,
}

impl BankHoliday {
    pub fn new(date: NaiveDate, title: &str) -> Self {
        Self {
            date,
            title: title.to_string(),
        }
    }
}

/// Easter Sunday by the anonymous Gregorian computus.
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).unwrap_or_default()
}

fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default();
    let offset =
        (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;
    first + Duration::days((offset + (n - 1) * 7) as i64)
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> NaiveDate {
    let last = last_day_of_month(year, month);
    let offset =
        (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    last - Duration::days(offset as i64)
}

// Weekend holidays move to the next weekday not already taken by another one.
fn substitute_forward(date: NaiveDate, taken: &HashSet<NaiveDate>) -> NaiveDate {
    let mut date = date;
    while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) || taken.contains(&date) {
        date = date.succ_opt().unwrap_or(date);
    }
    date
}

/// The eight bank holidays observed in England and Wales for a given year,
/// with weekend substitutions applied.
pub fn england_and_wales_holidays(year: i32) -> Vec<BankHoliday> {
    let easter = easter_sunday(year);
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default();
    let dec_25 = NaiveDate::from_ymd_opt(year, 12, 25).unwrap_or_default();
    let dec_26 = NaiveDate::from_ymd_opt(year, 12, 26).unwrap_or_default();

    let christmas = substitute_forward(dec_25, &HashSet::new());
    let mut taken = HashSet::new();
    taken.insert(christmas);
    let boxing = substitute_forward(dec_26, &taken);

    vec![
        BankHoliday::new(substitute_forward(jan_first, &HashSet::new()), "New Year's Day"),
        BankHoliday::new(easter - Duration::days(2), "Good Friday"),
        BankHoliday::new(easter + Duration::days(1), "Easter Monday"),
        BankHoliday::new(
            nth_weekday_of_month(year, 5, Weekday::Mon, 1),
            "Early May bank holiday",
        ),
        BankHoliday::new(
            last_weekday_of_month(year, 5, Weekday::Mon),
            "Spring bank holiday",
        ),
        BankHoliday::new(
            last_weekday_of_month(year, 8, Weekday::Mon),
            "Summer bank holiday",
        ),
        BankHoliday::new(christmas, "Christmas Day"),
        BankHoliday::new(boxing, "Boxing Day"),
    ]
}

pub fn is_working_day(date: NaiveDate, bank_holidays: &HashSet<NaiveDate>) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !bank_holidays.contains(&date)
}

/// The given date if it is a working day, otherwise the first working day
/// after it.
pub fn next_working_day(from: NaiveDate, bank_holidays: &HashSet<NaiveDate>) -> NaiveDate {
    let mut date = from;
    while !is_working_day(date, bank_holidays) {
        date = date.succ_opt().unwrap_or(date);
    }
    date
}
