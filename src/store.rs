use crate::config::Config;
use crate::model::attendance::{AttendanceEntry, AttendanceLedger, AttendanceRow};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-wide attendance store shared by every worker through `web::Data`.
///
/// Each operation holds the lock for its whole read-modify-write, so two
/// concurrent check-outs can never close the same entry.
#[derive(Debug, Default)]
pub struct AttendanceService {
    ledger: RwLock<AttendanceLedger>,
}

impl AttendanceService {
    pub fn new(overnight_lookback_days: u32) -> Self {
        Self {
            ledger: RwLock::new(AttendanceLedger::new(overnight_lookback_days)),
        }
    }

    // A panicking writer cannot leave the ledger half-updated, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, AttendanceLedger> {
        self.ledger.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AttendanceLedger> {
        self.ledger.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn check_in(&self, employee_name: &str, at: NaiveDateTime) {
        self.write().record_check_in(employee_name, at);
    }

    /// Returns `false` when no open entry matched; callers treat that as a no-op.
    pub fn check_out(&self, employee_name: &str, at: NaiveDateTime) -> bool {
        self.write().record_check_out(employee_name, at)
    }

    /// Copy of every date bucket, so rendering never holds the lock.
    pub fn snapshot(&self) -> BTreeMap<NaiveDate, Vec<AttendanceEntry>> {
        self.read().list_all().clone()
    }

    pub fn rows(&self) -> Vec<AttendanceRow> {
        self.read().rows()
    }

    #[cfg(test)]
    pub fn clear(&self) {
        self.write().clear();
    }
}

pub fn init_store(config: &Config) -> AttendanceService {
    AttendanceService::new(config.overnight_lookback_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::{HoursWorked, TIMESTAMP_FORMAT};
    use std::sync::Arc;
    use std::thread;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn test_service_round_trip() {
        let service = AttendanceService::new(0);
        service.check_in("Alice", ts("2024-01-01T09:00"));
        assert!(service.check_out("Alice", ts("2024-01-01T17:30")));

        let rows = service.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hours_worked.to_string(), "8.50");
    }

    #[test]
    fn test_snapshot_is_detached_from_store() {
        let service = AttendanceService::new(0);
        service.check_in("Alice", ts("2024-01-01T09:00"));
        let snapshot = service.snapshot();

        service.check_in("Bob", ts("2024-01-01T09:30"));
        assert_eq!(snapshot.values().map(Vec::len).sum::<usize>(), 1);
        assert_eq!(service.snapshot().values().map(Vec::len).sum::<usize>(), 2);
    }

    #[test]
    fn test_clear_empties_store() {
        let service = AttendanceService::new(0);
        service.check_in("Alice", ts("2024-01-01T09:00"));
        service.clear();
        assert!(service.snapshot().is_empty());
    }

    #[test]
    fn test_init_store_uses_configured_lookback() {
        let config = Config {
            overnight_lookback_days: 0,
            ..Config::default()
        };
        let service = init_store(&config);
        service.check_in("Dana", ts("2024-01-01T22:00"));
        assert!(!service.check_out("Dana", ts("2024-01-02T06:00")));
    }

    #[test]
    fn test_concurrent_check_outs_close_each_entry_once() {
        let service = Arc::new(AttendanceService::new(0));
        for _ in 0..8 {
            service.check_in("Alice", ts("2024-01-01T09:00"));
        }

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let service = Arc::clone(&service);
                thread::spawn(move || service.check_out("Alice", ts("2024-01-01T17:00")))
            })
            .collect();

        let closed = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|closed| *closed)
            .count();

        assert_eq!(closed, 8);
        assert!(service.rows().iter().all(|r| r.hours_worked == HoursWorked::Hours(8.0)));
    }
}
