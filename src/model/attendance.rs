use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Wire format of the `datetime` form field (`datetime-local` input).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format used when timestamps are shown in the attendance view.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const NOT_CHECKED_OUT: &str = "Not checked out";

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceEntry {
    pub employee_name: String,
    pub check_in: NaiveDateTime,
    pub check_out: Option<NaiveDateTime>,
}

impl AttendanceEntry {
    /// An entry is open until a check-out has been recorded against it.
    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }

    pub fn hours_worked(&self) -> HoursWorked {
        hours_worked(Some(self.check_in), self.check_out)
    }
}

/// Elapsed time between check-in and check-out.
///
/// `NotAvailable` means the duration is unknown (the shift is still open),
/// which is different from zero hours worked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoursWorked {
    Hours(f64),
    NotAvailable,
}

impl fmt::Display for HoursWorked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoursWorked::Hours(hours) => write!(f, "{hours:.2}"),
            HoursWorked::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for HoursWorked {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Hours between two optional timestamps. Negative spans are not clamped.
pub fn hours_worked(
    check_in: Option<NaiveDateTime>,
    check_out: Option<NaiveDateTime>,
) -> HoursWorked {
    match (check_in, check_out) {
        (Some(check_in), Some(check_out)) => {
            let seconds = (check_out - check_in).num_seconds();
            HoursWorked::Hours(seconds as f64 / 3600.0)
        }
        _ => HoursWorked::NotAvailable,
    }
}

/// One flattened ledger entry, as written to the spreadsheet export.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRow {
    pub date: NaiveDate,
    pub employee_name: String,
    pub check_in: NaiveDateTime,
    pub check_out: Option<NaiveDateTime>,
    pub hours_worked: HoursWorked,
}

impl AttendanceRow {
    pub const HEADERS: [&'static str; 5] = [
        "Date",
        "Employee Name",
        "Check In",
        "Check Out",
        "Hours Worked",
    ];

    fn from_entry(date: NaiveDate, entry: &AttendanceEntry) -> Self {
        Self {
            date,
            employee_name: entry.employee_name.clone(),
            check_in: entry.check_in,
            check_out: entry.check_out,
            hours_worked: entry.hours_worked(),
        }
    }
}

/// In-memory attendance records bucketed by the calendar date of check-in.
#[derive(Debug, Clone, Default)]
pub struct AttendanceLedger {
    records: BTreeMap<NaiveDate, Vec<AttendanceEntry>>,
    overnight_lookback_days: u32,
}

impl AttendanceLedger {
    /// `overnight_lookback_days` is how many date buckets before the
    /// check-out's own date a check-out may still close (0 = same day only).
    pub fn new(overnight_lookback_days: u32) -> Self {
        Self {
            records: BTreeMap::new(),
            overnight_lookback_days,
        }
    }

    pub fn record_check_in(&mut self, employee_name: impl Into<String>, at: NaiveDateTime) {
        self.records
            .entry(at.date())
            .or_default()
            .push(AttendanceEntry {
                employee_name: employee_name.into(),
                check_in: at,
                check_out: None,
            });
    }

    /// Closes the earliest open entry for `employee_name`, searching the
    /// check-out's own date first and then earlier dates within the lookback.
    /// Entries checked in after `at` are never closed. Returns whether an
    /// entry was closed.
    pub fn record_check_out(&mut self, employee_name: &str, at: NaiveDateTime) -> bool {
        let newest = at.date();
        let oldest = newest
            .checked_sub_days(Days::new(u64::from(self.overnight_lookback_days)))
            .unwrap_or(NaiveDate::MIN);

        for entries in self.records.range_mut(oldest..=newest).rev().map(|(_, e)| e) {
            let open = entries.iter_mut().find(|entry| {
                entry.employee_name == employee_name && entry.is_open() && entry.check_in <= at
            });
            if let Some(entry) = open {
                entry.check_out = Some(at);
                return true;
            }
        }

        false
    }

    pub fn list_all(&self) -> &BTreeMap<NaiveDate, Vec<AttendanceEntry>> {
        &self.records
    }

    pub fn rows(&self) -> Vec<AttendanceRow> {
        self.records
            .iter()
            .flat_map(|(date, entries)| {
                entries
                    .iter()
                    .map(move |entry| AttendanceRow::from_entry(*date, entry))
            })
            .collect()
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
