mod bank_holidays;

pub use bank_holidays::fetch_bank_holidays;
