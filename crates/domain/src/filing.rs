use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// The five UK statutory obligations tracked for clients.
///
/// This is a closed set. Every calculator and rollover dispatcher matches
/// exhaustively on it, so adding a filing type is a compile time exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingType {
    CorporationTaxPayment,
    Ct600Filing,
    CompaniesHouseAccounts,
    VatReturn,
    SelfAssessment,
}

impl FilingType {
    pub fn all() -> [FilingType; 5] {
        [
            FilingType::CorporationTaxPayment,
            FilingType::Ct600Filing,
            FilingType::CompaniesHouseAccounts,
            FilingType::VatReturn,
            FilingType::SelfAssessment,
        ]
    }

    /// Stable identifier used in storage and over the API.
    pub fn key(&self) -> &'static str {
        match self {
            FilingType::CorporationTaxPayment => "corporation_tax_payment",
            FilingType::Ct600Filing => "ct600_filing",
            FilingType::CompaniesHouseAccounts => "companies_house_accounts",
            FilingType::VatReturn => "vat_return",
            FilingType::SelfAssessment => "self_assessment",
        }
    }

    /// Human readable name used in rendered reminders.
    pub fn display_name(&self) -> &'static str {
        match self {
            FilingType::CorporationTaxPayment => "Corporation Tax Payment",
            FilingType::Ct600Filing => "CT600 Filing",
            FilingType::CompaniesHouseAccounts => "Companies House Accounts",
            FilingType::VatReturn => "VAT Return",
            FilingType::SelfAssessment => "Self Assessment",
        }
    }

    /// Annual filings anchor to the client year end and roll one year at a time.
    pub fn is_annual(&self) -> bool {
        matches!(
            self,
            FilingType::CorporationTaxPayment
                | FilingType::Ct600Filing
                | FilingType::CompaniesHouseAccounts
        )
    }
}

impl Display for FilingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Error, Debug)]
#[error("Invalid filing type: {0}")]
pub struct InvalidFilingTypeError(pub String);

impl FromStr for FilingType {
    type Err = InvalidFilingTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "corporation_tax_payment" => Ok(FilingType::CorporationTaxPayment),
            "ct600_filing" => Ok(FilingType::Ct600Filing),
            "companies_house_accounts" => Ok(FilingType::CompaniesHouseAccounts),
            "vat_return" => Ok(FilingType::VatReturn),
            "self_assessment" => Ok(FilingType::SelfAssessment),
            _ => Err(InvalidFilingTypeError(s.to_string())),
        }
    }
}

/// UK VAT quarter alignment pattern, serialized as the number HMRC uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum VatStaggerGroup {
    One,
    Two,
    Three,
}

impl VatStaggerGroup {
    /// Months whose last day is a VAT quarter end for this group.
    pub fn quarter_end_months(&self) -> [u32; 4] {
        match self {
            VatStaggerGroup::One => [3, 6, 9, 12],
            VatStaggerGroup::Two => [1, 4, 7, 10],
            VatStaggerGroup::Three => [2, 5, 8, 11],
        }
    }
}

#[derive(Error, Debug)]
#[error("Invalid VAT stagger group: {0}, expected 1, 2 or 3")]
pub struct InvalidStaggerGroupError(pub i16);

impl TryFrom<i16> for VatStaggerGroup {
    type Error = InvalidStaggerGroupError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VatStaggerGroup::One),
            2 => Ok(VatStaggerGroup::Two),
            3 => Ok(VatStaggerGroup::Three),
            _ => Err(InvalidStaggerGroupError(value)),
        }
    }
}

impl From<VatStaggerGroup> for i16 {
    fn from(group: VatStaggerGroup) -> Self {
        match group {
            VatStaggerGroup::One => 1,
            VatStaggerGroup::Two => 2,
            VatStaggerGroup::Three => 3,
        }
    }
}

impl Display for VatStaggerGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", i16::from(*self))
    }
}
