//! Pure calendar arithmetic used by the recurrence engine.
//!
//! Every function takes a date by value and returns a new one; nothing here
//! mutates its input. Month arithmetic clamps to the last valid day of the
//! target month (Jan 31 + 1 month = Feb 28/29).

use chrono::{DateTime, Days, Months, NaiveDate, NaiveTime, TimeZone, Utc};

/// `date + days`, or `None` past the end of the representable calendar.
#[inline]
pub fn add_days(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days))
}

/// `date + months`, clamping the day to the end of the target month.
#[inline]
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// 23:59:59.999 local wall-clock time.
pub fn end_of_day_time() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("23:59:59.999 is a valid time")
}

/// The last millisecond of `date` in `tz`, as a UTC instant.
///
/// If the local time is ambiguous the later instant wins. If it does not exist
/// (a DST gap) the naive time is read as UTC.
pub fn end_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(end_of_day_time());
    match tz.from_local_datetime(&naive).latest() {
        Some(local) => local.with_timezone(&Utc),
        None => naive.and_utc(),
    }
}

/// The calendar date of `instant` as seen in `tz`.
#[inline]
pub fn local_date<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}
