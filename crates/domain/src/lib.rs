mod audit;
pub mod bank_holidays;
mod client;
pub mod date;
pub mod deadline;
mod filing;
mod reminder;
mod report;
mod rollover;
mod schedule;
mod shared;
mod status;
mod template;

pub use audit::AuditEntry;
pub use bank_holidays::{
    england_and_wales_holidays, is_working_day, next_working_day, BankHoliday,
};
pub use client::{Client, ClientDeadlineOverride, ClientFilingAssignment};
pub use deadline::{next_vat_quarter_end, resolve_deadline};
pub use filing::{FilingType, InvalidFilingTypeError, InvalidStaggerGroupError, VatStaggerGroup};
pub use reminder::{InvalidReminderStatusError, ReminderQueueEntry, ReminderStatus};
pub use report::{BatchOutcome, BatchRunReport, QueueBuildReport};
pub use rollover::{roll_forward, RolloverOutcome};
pub use schedule::{CustomTarget, RecurrenceRule, Schedule, ScheduleKind, ScheduleStep};
pub use shared::entity::{Entity, ID};
pub use status::{amber_band, classify, AmberBand, FilingSnapshot, TrafficLight};
pub use template::{render, EmailTemplate, RenderContext, RenderError, RenderedEmail};
