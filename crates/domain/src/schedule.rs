use crate::date::add_months_clamped;
use crate::filing::FilingType;
use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named, ordered sequence of reminder steps counting down to a target
/// date. Filing schedules are bound one to one to a filing type and take
/// their target from each client's resolved deadline. Custom schedules carry
/// their own target and apply to every client not excluded from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub id: ID,
    pub name: String,
    pub kind: ScheduleKind,
    pub steps: Vec<ScheduleStep>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScheduleKind {
    #[serde(rename_all = "camelCase")]
    Filing { filing_type: FilingType },
    #[serde(rename_all = "camelCase")]
    Custom {
        target: CustomTarget,
        /// Overrides the global send hour for this schedule's reminders.
        send_hour: Option<u32>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CustomTarget {
    #[serde(rename_all = "camelCase")]
    Fixed { date: NaiveDate },
    #[serde(rename_all = "camelCase")]
    Recurring {
        rule: RecurrenceRule,
        anchor: NaiveDate,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceRule {
    Monthly,
    Quarterly,
    Annually,
}

impl RecurrenceRule {
    pub fn months(&self) -> u32 {
        match self {
            RecurrenceRule::Monthly => 1,
            RecurrenceRule::Quarterly => 3,
            RecurrenceRule::Annually => 12,
        }
    }

    /// Advances the anchor period by period until it lies strictly in the
    /// future.
    pub fn next_occurrence(&self, anchor: NaiveDate, today: NaiveDate) -> NaiveDate {
        let mut date = anchor;
        while date <= today {
            date = add_months_clamped(date, self.months());
        }
        date
    }
}

/// One reminder within a schedule: which template to send and how many days
/// before the target date it goes out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStep {
    pub step_number: i32,
    pub email_template_id: ID,
    pub delay_days: i64,
}

impl Schedule {
    pub fn new(name: String, kind: ScheduleKind, steps: Vec<ScheduleStep>) -> Self {
        let mut schedule = Self {
            id: Default::default(),
            name,
            kind,
            steps,
            is_active: true,
        };
        schedule.sort_steps();
        schedule
    }

    pub fn set_steps(&mut self, steps: Vec<ScheduleStep>) {
        self.steps = steps;
        self.sort_steps();
    }

    fn sort_steps(&mut self) {
        self.steps.sort_by_key(|step| step.step_number);
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.kind, ScheduleKind::Custom { .. })
    }

    pub fn filing_type(&self) -> Option<FilingType> {
        match &self.kind {
            ScheduleKind::Filing { filing_type } => Some(*filing_type),
            ScheduleKind::Custom { .. } => None,
        }
    }

    pub fn custom_send_hour(&self) -> Option<u32> {
        match &self.kind {
            ScheduleKind::Custom { send_hour, .. } => *send_hour,
            ScheduleKind::Filing { .. } => None,
        }
    }

    /// Target date a custom schedule is currently counting down to. Filing
    /// schedules take their target from each client's deadline instead.
    pub fn next_target_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        match &self.kind {
            ScheduleKind::Filing { .. } => None,
            ScheduleKind::Custom { target, .. } => Some(match target {
                CustomTarget::Fixed { date } => *date,
                CustomTarget::Recurring { rule, anchor } => rule.next_occurrence(*anchor, today),
            }),
        }
    }
}

impl Entity for Schedule {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn step(step_number: i32, delay_days: i64) -> ScheduleStep {
        ScheduleStep {
            step_number,
            email_template_id: Default::default(),
            delay_days,
        }
    }

    #[test]
    fn it_orders_steps_by_step_number() {
        let schedule = Schedule::new(
            "VAT countdown".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::VatReturn,
            },
            vec![step(3, 7), step(1, 30), step(2, 14)],
        );
        let numbers: Vec<i32> = schedule.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn it_advances_recurring_targets_past_today() {
        let rule = RecurrenceRule::Monthly;
        assert_eq!(
            rule.next_occurrence(date(2025, 1, 15), date(2025, 3, 20)),
            date(2025, 4, 15)
        );
        // An anchor already in the future is its own next occurrence.
        assert_eq!(
            rule.next_occurrence(date(2025, 8, 1), date(2025, 3, 20)),
            date(2025, 8, 1)
        );
        // Strictly in the future: landing on today advances once more.
        assert_eq!(
            rule.next_occurrence(date(2025, 1, 15), date(2025, 4, 15)),
            date(2025, 5, 15)
        );
        assert_eq!(
            RecurrenceRule::Quarterly.next_occurrence(date(2024, 11, 30), date(2025, 1, 1)),
            date(2025, 2, 28)
        );
        assert_eq!(
            RecurrenceRule::Annually.next_occurrence(date(2023, 6, 1), date(2025, 6, 1)),
            date(2026, 6, 1)
        );
    }

    #[test]
    fn it_computes_target_dates_for_custom_schedules_only() {
        let today = date(2025, 3, 20);
        let fixed = Schedule::new(
            "AGM notice".into(),
            ScheduleKind::Custom {
                target: CustomTarget::Fixed {
                    date: date(2025, 9, 1),
                },
                send_hour: None,
            },
            vec![step(1, 7)],
        );
        assert_eq!(fixed.next_target_date(today), Some(date(2025, 9, 1)));

        let filing = Schedule::new(
            "CT countdown".into(),
            ScheduleKind::Filing {
                filing_type: FilingType::CorporationTaxPayment,
            },
            vec![step(1, 7)],
        );
        assert_eq!(filing.next_target_date(today), None);
    }

    #[test]
    fn it_serializes_kind_with_a_type_tag() {
        let kind = ScheduleKind::Custom {
            target: CustomTarget::Recurring {
                rule: RecurrenceRule::Quarterly,
                anchor: date(2025, 1, 31),
            },
            send_hour: Some(14),
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "custom");
        assert_eq!(json["sendHour"], 14);
        assert_eq!(json["target"]["type"], "recurring");
        assert_eq!(json["target"]["rule"], "quarterly");
        let parsed: ScheduleKind = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, kind);

        let filing = serde_json::to_value(ScheduleKind::Filing {
            filing_type: FilingType::VatReturn,
        })
        .unwrap();
        assert_eq!(filing["type"], "filing");
        assert_eq!(filing["filingType"], "vat_return");
    }
}
