use crate::filing::FilingType;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Canonical urgency bucket for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLight {
    Grey,
    Red,
    Amber,
    Green,
}

/// One filing as the classifier sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilingSnapshot {
    pub filing_type: FilingType,
    pub deadline_date: NaiveDate,
    pub reminder_sent: bool,
}

/// Strict priority cascade, first match wins.
///
/// 1. grey: reminders paused, or no filings at all
/// 2. red: an unreceived filing whose deadline has passed
/// 3. amber: an unreceived filing with a reminder already sent and the
///    deadline still ahead
/// 4. green: everything else
///
/// Comparisons are date only, so a filing cannot change bucket part way
/// through its deadline day.
pub fn classify(
    reminders_paused: bool,
    records_received_for: &HashSet<FilingType>,
    filings: &[FilingSnapshot],
    today: NaiveDate,
) -> TrafficLight {
    if reminders_paused || filings.is_empty() {
        return TrafficLight::Grey;
    }
    let unreceived = |filing: &&FilingSnapshot| !records_received_for.contains(&filing.filing_type);
    if filings
        .iter()
        .filter(unreceived)
        .any(|filing| filing.deadline_date < today)
    {
        return TrafficLight::Red;
    }
    if filings
        .iter()
        .filter(unreceived)
        .any(|filing| filing.reminder_sent && filing.deadline_date >= today)
    {
        return TrafficLight::Amber;
    }
    TrafficLight::Green
}

/// Finer dashboard band layered over the classifier, for reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmberBand {
    /// An unreceived filing is due within a week.
    Critical,
    /// A reminder is out and the deadline is still more than a week away.
    ApproachingSent,
    /// A deadline is inside a month but no reminder has gone out yet.
    ApproachingUnsent,
}

pub fn amber_band(
    records_received_for: &HashSet<FilingType>,
    filings: &[FilingSnapshot],
    today: NaiveDate,
) -> Option<AmberBand> {
    let upcoming: Vec<&FilingSnapshot> = filings
        .iter()
        .filter(|filing| {
            !records_received_for.contains(&filing.filing_type) && filing.deadline_date >= today
        })
        .collect();
    if upcoming
        .iter()
        .any(|filing| filing.deadline_date < today + Duration::days(7))
    {
        return Some(AmberBand::Critical);
    }
    if upcoming.iter().any(|filing| filing.reminder_sent) {
        return Some(AmberBand::ApproachingSent);
    }
    if upcoming
        .iter()
        .any(|filing| filing.deadline_date < today + Duration::days(30))
    {
        return Some(AmberBand::ApproachingUnsent);
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn filing(filing_type: FilingType, deadline: NaiveDate, sent: bool) -> FilingSnapshot {
        FilingSnapshot {
            filing_type,
            deadline_date: deadline,
            reminder_sent: sent,
        }
    }

    const TODAY: (i32, u32, u32) = (2025, 6, 15);

    fn today() -> NaiveDate {
        date(TODAY.0, TODAY.1, TODAY.2)
    }

    #[test]
    fn it_classifies_paused_clients_grey_even_when_overdue() {
        let filings = vec![filing(FilingType::VatReturn, date(2025, 5, 7), true)];
        assert_eq!(
            classify(true, &HashSet::new(), &filings, today()),
            TrafficLight::Grey
        );
    }

    #[test]
    fn it_classifies_clients_without_filings_grey() {
        assert_eq!(
            classify(false, &HashSet::new(), &[], today()),
            TrafficLight::Grey
        );
    }

    #[test]
    fn it_lets_red_dominate_amber() {
        let filings = vec![
            filing(FilingType::VatReturn, date(2025, 5, 7), false),
            filing(FilingType::Ct600Filing, date(2025, 7, 31), true),
        ];
        assert_eq!(
            classify(false, &HashSet::new(), &filings, today()),
            TrafficLight::Red
        );
    }

    #[test]
    fn it_ignores_overdue_filings_whose_records_are_in() {
        let mut received = HashSet::new();
        received.insert(FilingType::VatReturn);
        let filings = vec![
            filing(FilingType::VatReturn, date(2025, 5, 7), true),
            filing(FilingType::Ct600Filing, date(2025, 7, 31), true),
        ];
        assert_eq!(
            classify(false, &received, &filings, today()),
            TrafficLight::Amber
        );
    }

    #[test]
    fn it_classifies_sent_and_upcoming_as_amber() {
        let filings = vec![filing(FilingType::VatReturn, date(2025, 6, 15), true)];
        assert_eq!(
            classify(false, &HashSet::new(), &filings, today()),
            TrafficLight::Amber
        );
    }

    #[test]
    fn it_classifies_quiet_clients_green() {
        let filings = vec![filing(FilingType::VatReturn, date(2025, 8, 7), false)];
        assert_eq!(
            classify(false, &HashSet::new(), &filings, today()),
            TrafficLight::Green
        );
    }

    #[test]
    fn it_bands_amber_by_urgency() {
        let received = HashSet::new();
        let critical = vec![filing(FilingType::VatReturn, date(2025, 6, 18), true)];
        assert_eq!(
            amber_band(&received, &critical, today()),
            Some(AmberBand::Critical)
        );

        let sent = vec![filing(FilingType::VatReturn, date(2025, 7, 7), true)];
        assert_eq!(
            amber_band(&received, &sent, today()),
            Some(AmberBand::ApproachingSent)
        );

        let unsent = vec![filing(FilingType::VatReturn, date(2025, 7, 7), false)];
        assert_eq!(
            amber_band(&received, &unsent, today()),
            Some(AmberBand::ApproachingUnsent)
        );

        let distant = vec![filing(FilingType::VatReturn, date(2025, 12, 7), false)];
        assert_eq!(amber_band(&received, &distant, today()), None);
    }
}
