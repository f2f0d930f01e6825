//! Reentrant local-time conversion
//!
//! Replaces the classic non-reentrant `localtime()` pattern: `chrono`
//! keeps no shared scratch buffer, so concurrent conversions from any
//! number of threads cannot interleave or corrupt each other.

use chrono::{DateTime, Local, LocalResult, TimeZone, Utc};

/// Convert an absolute UNIX time (seconds since the epoch) into
/// broken-down local time.
///
/// Ambiguous wall-clock instants (DST fold) resolve to the earliest
/// mapping; an instant that does not exist in the local timezone or is
/// out of range falls back to the UNIX epoch.
#[must_use]
pub fn get_local_time(epoch_secs: i64) -> DateTime<Local> {
    match Local.timestamp_opt(epoch_secs, 0) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => DateTime::<Local>::from(DateTime::<Utc>::UNIX_EPOCH),
    }
}

/// Current local time.
#[must_use]
pub fn now_local() -> DateTime<Local> {
    Local::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn epoch_round_trips() {
        let dt = get_local_time(1_000_000_000);
        assert_eq!(dt.timestamp(), 1_000_000_000);
        // 2001-09-09 UTC; any timezone lands within a day of it.
        assert_eq!(dt.year(), 2001);
    }

    #[test]
    fn zero_is_near_nineteen_seventy() {
        let dt = get_local_time(0);
        assert!((1969..=1970).contains(&dt.year()));
    }

    #[test]
    fn concurrent_conversions_do_not_interleave() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    let epoch = 1_600_000_000 + i * 86_400;
                    for _ in 0..1_000 {
                        assert_eq!(get_local_time(epoch).timestamp(), epoch);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
