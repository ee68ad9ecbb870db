use crate::date::{add_years_clamped, last_day_of_month};
use crate::deadline::{
    companies_house_accounts_deadline, corporation_tax_payment_deadline, ct600_filing_deadline,
    next_vat_quarter_end, vat_return_deadline,
};
use crate::filing::{FilingType, VatStaggerGroup};
use chrono::{Datelike, NaiveDate};

/// Result of advancing a filing one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RolloverOutcome {
    pub next_deadline: NaiveDate,
    /// New year end the client should store, for filings anchored to one.
    pub next_year_end: Option<NaiveDate>,
}

/// Computes the deadline for the cycle after the one `current_deadline`
/// belongs to. `None` means the metadata needed to roll is missing.
///
/// Annual filings are re-anchored to the advanced year end rather than
/// shifted twelve months from the old deadline, so a mid cycle override
/// cannot drift the following years.
pub fn roll_forward(
    filing_type: FilingType,
    year_end_date: Option<NaiveDate>,
    vat_stagger_group: Option<VatStaggerGroup>,
    current_deadline: NaiveDate,
) -> Option<RolloverOutcome> {
    match filing_type {
        FilingType::CorporationTaxPayment => {
            next_annual_cycle(year_end_date?, corporation_tax_payment_deadline)
        }
        FilingType::Ct600Filing => next_annual_cycle(year_end_date?, ct600_filing_deadline),
        FilingType::CompaniesHouseAccounts => {
            next_annual_cycle(year_end_date?, companies_house_accounts_deadline)
        }
        FilingType::VatReturn => {
            let group = vat_stagger_group?;
            // The deadline falls two months after its quarter end month.
            let mut month = current_deadline.month() as i32 - 2;
            let mut year = current_deadline.year();
            if month < 1 {
                month += 12;
                year -= 1;
            }
            let rolled_from = last_day_of_month(year, month as u32);
            let next_quarter_end = next_vat_quarter_end(group, rolled_from);
            Some(RolloverOutcome {
                next_deadline: vat_return_deadline(next_quarter_end),
                next_year_end: None,
            })
        }
        FilingType::SelfAssessment => Some(RolloverOutcome {
            next_deadline: add_years_clamped(current_deadline, 1),
            next_year_end: None,
        }),
    }
}

fn next_annual_cycle(
    year_end: NaiveDate,
    calculator: fn(NaiveDate) -> NaiveDate,
) -> Option<RolloverOutcome> {
    let next_year_end = add_years_clamped(year_end, 1);
    Some(RolloverOutcome {
        next_deadline: calculator(next_year_end),
        next_year_end: Some(next_year_end),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn it_rolls_vat_deadlines_quarter_to_quarter() {
        let mut deadline = date(2025, 2, 7);
        let mut produced = Vec::new();
        for _ in 0..3 {
            let outcome = roll_forward(
                FilingType::VatReturn,
                None,
                Some(VatStaggerGroup::One),
                deadline,
            )
            .unwrap();
            assert_eq!(outcome.next_year_end, None);
            deadline = outcome.next_deadline;
            produced.push(deadline);
        }
        assert_eq!(
            produced,
            vec![date(2025, 5, 7), date(2025, 8, 7), date(2025, 11, 7)]
        );
    }

    #[test]
    fn it_wraps_vat_rollover_at_the_year_boundary() {
        let outcome = roll_forward(
            FilingType::VatReturn,
            None,
            Some(VatStaggerGroup::One),
            date(2025, 11, 7),
        )
        .unwrap();
        assert_eq!(outcome.next_deadline, date(2026, 2, 7));
    }

    #[test]
    fn it_anchors_annual_rollover_to_the_advanced_year_end() {
        let outcome = roll_forward(
            FilingType::CorporationTaxPayment,
            Some(date(2025, 3, 31)),
            None,
            date(2026, 1, 1),
        )
        .unwrap();
        assert_eq!(outcome.next_year_end, Some(date(2026, 3, 31)));
        assert_eq!(outcome.next_deadline, date(2027, 1, 1));

        // An override on the current cycle does not shift the next one.
        let overridden = roll_forward(
            FilingType::CorporationTaxPayment,
            Some(date(2025, 3, 31)),
            None,
            date(2026, 2, 15),
        )
        .unwrap();
        assert_eq!(overridden.next_deadline, date(2027, 1, 1));
    }

    #[test]
    fn it_clamps_leap_year_ends_when_rolling() {
        let outcome = roll_forward(
            FilingType::Ct600Filing,
            Some(date(2024, 2, 29)),
            None,
            date(2025, 2, 28),
        )
        .unwrap();
        assert_eq!(outcome.next_year_end, Some(date(2025, 2, 28)));
        assert_eq!(outcome.next_deadline, date(2026, 2, 28));
    }

    #[test]
    fn it_adds_a_year_for_self_assessment() {
        let outcome =
            roll_forward(FilingType::SelfAssessment, None, None, date(2026, 1, 31)).unwrap();
        assert_eq!(outcome.next_deadline, date(2027, 1, 31));
        assert_eq!(outcome.next_year_end, None);
    }

    #[test]
    fn it_cannot_roll_without_metadata() {
        assert_eq!(
            roll_forward(FilingType::CorporationTaxPayment, None, None, date(2026, 1, 1)),
            None
        );
        assert_eq!(
            roll_forward(FilingType::VatReturn, None, None, date(2025, 5, 7)),
            None
        );
    }
}
