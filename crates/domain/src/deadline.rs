use crate::date::{add_months_clamped, last_day_of_month};
use crate::filing::{FilingType, VatStaggerGroup};
use chrono::{Datelike, Duration, NaiveDate};

/// Corporation tax is due nine months and one day after the year end.
pub fn corporation_tax_payment_deadline(year_end: NaiveDate) -> NaiveDate {
    add_months_clamped(year_end, 9) + Duration::days(1)
}

/// The CT600 return is due twelve months after the year end.
pub fn ct600_filing_deadline(year_end: NaiveDate) -> NaiveDate {
    add_months_clamped(year_end, 12)
}

/// Private company accounts are due at Companies House nine months after the
/// year end.
pub fn companies_house_accounts_deadline(year_end: NaiveDate) -> NaiveDate {
    add_months_clamped(year_end, 9)
}

/// A VAT return is due one month and seven days after the quarter end.
///
/// The one month step preserves end of month shape: a quarter ending on the
/// last day of its month lands on the last day of the following month before
/// the seven days are added. Left to plain month arithmetic, 28 February
/// would step to 28 March instead of 31 March and the deadline would come
/// out three days early.
pub fn vat_return_deadline(quarter_end: NaiveDate) -> NaiveDate {
    let mut one_month_on = add_months_clamped(quarter_end, 1);
    if quarter_end == last_day_of_month(quarter_end.year(), quarter_end.month()) {
        one_month_on = last_day_of_month(one_month_on.year(), one_month_on.month());
    }
    one_month_on + Duration::days(7)
}

/// Self assessment is due on 31 January following the tax year end year.
pub fn self_assessment_deadline(tax_year_end_year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(tax_year_end_year + 1, 1, 31).unwrap_or_default()
}

/// The upcoming 31 January on or after the given date.
pub fn next_self_assessment_deadline(today: NaiveDate) -> NaiveDate {
    let this_years = NaiveDate::from_ymd_opt(today.year(), 1, 31).unwrap_or_default();
    if this_years >= today {
        this_years
    } else {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 31).unwrap_or_default()
    }
}

/// The first quarter end for the stagger group strictly after the given
/// date, wrapping into the next year once all four have passed.
pub fn next_vat_quarter_end(group: VatStaggerGroup, after: NaiveDate) -> NaiveDate {
    for month in group.quarter_end_months() {
        let candidate = last_day_of_month(after.year(), month);
        if candidate > after {
            return candidate;
        }
    }
    last_day_of_month(after.year() + 1, group.quarter_end_months()[0])
}

/// Maps a filing type and the client metadata on hand to a concrete
/// deadline. `None` means required metadata is missing and the filing cannot
/// be scheduled yet, it is not an error.
pub fn resolve_deadline(
    filing_type: FilingType,
    year_end_date: Option<NaiveDate>,
    vat_stagger_group: Option<VatStaggerGroup>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    match filing_type {
        FilingType::CorporationTaxPayment => year_end_date.map(corporation_tax_payment_deadline),
        FilingType::Ct600Filing => year_end_date.map(ct600_filing_deadline),
        FilingType::CompaniesHouseAccounts => {
            year_end_date.map(companies_house_accounts_deadline)
        }
        FilingType::VatReturn => vat_stagger_group
            .map(|group| vat_return_deadline(next_vat_quarter_end(group, today))),
        FilingType::SelfAssessment => Some(next_self_assessment_deadline(today)),
    }
}
