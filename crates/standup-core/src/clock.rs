use chrono::{NaiveDate, Utc};

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock UTC date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Chat thread key shared by every stand-up posted on `date`.
pub fn thread_key(date: NaiveDate) -> String {
    format!("standup-{}", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn thread_key_is_zero_padded() {
        assert_eq!(thread_key(date(2026, 3, 4)), "standup-2026-03-04");
    }

    #[test]
    fn same_day_same_key() {
        let a = FixedClock(date(2026, 10, 17));
        let b = FixedClock(date(2026, 10, 17));
        assert_eq!(thread_key(a.today()), thread_key(b.today()));
    }

    #[test]
    fn different_days_different_keys() {
        assert_ne!(
            thread_key(date(2026, 10, 17)),
            thread_key(date(2026, 10, 18))
        );
        assert_ne!(
            thread_key(date(2025, 10, 17)),
            thread_key(date(2026, 10, 17))
        );
    }
}
