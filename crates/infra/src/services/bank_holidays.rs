use chrono::NaiveDate;
use practice_scheduler_domain::{england_and_wales_holidays, BankHoliday};
use serde::Deserialize;
use tracing::warn;

// https://www.gov.uk/bank-holidays
const BANK_HOLIDAYS_ENDPOINT: &str = "https://www.gov.uk/bank-holidays.json";

#[derive(Debug, Deserialize)]
struct BankHolidaysResponse {
    #[serde(rename = "england-and-wales")]
    england_and_wales: DivisionEvents,
}

#[derive(Debug, Deserialize)]
struct DivisionEvents {
    events: Vec<HolidayEvent>,
}

#[derive(Debug, Deserialize)]
struct HolidayEvent {
    date: NaiveDate,
    title: String,
}

/// England and Wales bank holidays as published on GOV.UK. Falls back
/// to locally computed dates when the endpoint is unreachable so that
/// send date snapping keeps working offline.
pub async fn fetch_bank_holidays(current_year: i32) -> Vec<BankHoliday> {
    match fetch_published_holidays().await {
        Ok(holidays) => holidays,
        Err(_) => {
            warn!("Unable to fetch bank holidays from GOV.UK. Falling back to computed England and Wales dates.");
            ((current_year - 1)..=(current_year + 2))
                .flat_map(england_and_wales_holidays)
                .collect()
        }
    }
}

async fn fetch_published_holidays() -> Result<Vec<BankHoliday>, ()> {
    let client = reqwest::Client::new();
    let res = client
        .get(BANK_HOLIDAYS_ENDPOINT)
        .send()
        .await
        .map_err(|_| ())?;
    let res = res.json::<BankHolidaysResponse>().await.map_err(|_| ())?;

    Ok(res
        .england_and_wales
        .events
        .into_iter()
        .map(|event| BankHoliday::new(event.date, &event.title))
        .collect())
}
