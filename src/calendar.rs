use chrono::{DateTime, NaiveDate, Utc};

/// The calendar day an instant falls on. Entries are stamped in UTC, so the
/// day boundary is UTC midnight everywhere it is compared.
pub fn calendar_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

pub fn is_same_day(instant: DateTime<Utc>, day: NaiveDate) -> bool {
    calendar_day(instant) == day
}

pub fn today() -> NaiveDate {
    calendar_day(Utc::now())
}
