use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Source of "now" for date-dependent rules.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn year_month(&self) -> (i32, i32) {
        let now = self.now();
        (now.year(), now.month() as i32)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// First day of the given month at midnight UTC. Falls back to the Unix
    /// epoch if the month is out of range.
    pub fn at(year: i32, month: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .single()
            .unwrap_or_default();
        FixedClock(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
