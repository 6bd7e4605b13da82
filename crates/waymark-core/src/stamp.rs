//! Wall-clock timestamps and the fixed text formats used in context documents.

use std::time::SystemTime;

use time::format_description::well_known::Rfc3339;
use time::formatting::Formattable;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// A point in time in the local offset (UTC when the offset is unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()))
    }

    pub fn from_offset(dt: OffsetDateTime) -> Self {
        Self(dt)
    }

    /// File modification times and the like, shifted to the local offset.
    pub fn from_system_time(st: SystemTime) -> Self {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        Self(OffsetDateTime::from(st).to_offset(offset))
    }

    pub fn inner(&self) -> OffsetDateTime {
        self.0
    }

    /// `2026-10-16 09:30:05`
    pub fn datetime(&self) -> String {
        self.format_with(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
    }

    /// `2026-10-16 09:30`
    pub fn minute(&self) -> String {
        self.format_with(format_description!("[year]-[month]-[day] [hour]:[minute]"))
    }

    /// `2026-10-16`
    pub fn date(&self) -> String {
        self.format_with(format_description!("[year]-[month]-[day]"))
    }

    /// `20261016_093005`, sortable and filename-safe.
    pub fn compact(&self) -> String {
        self.format_with(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
    }

    pub fn rfc3339(&self) -> String {
        self.0
            .format(&Rfc3339)
            .expect("RFC3339 formatting should not fail")
    }

    fn format_with(&self, desc: &(impl Formattable + ?Sized)) -> String {
        self.0
            .format(desc)
            .expect("fixed timestamp formatting should not fail")
    }
}
