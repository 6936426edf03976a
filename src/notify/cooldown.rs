use chrono::{DateTime, Duration, Utc};

/// The earliest moment the next notification may go out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    ready_at: DateTime<Utc>,
    period: Duration,
}

impl Cooldown {
    /// A cooldown that has already elapsed at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>, period: Duration) -> Self {
        Self {
            ready_at: now.checked_sub_signed(period).unwrap_or(DateTime::<Utc>::MIN_UTC),
            period,
        }
    }

    #[must_use]
    pub fn is_ready(&self, now: DateTime<Utc>) -> bool {
        now >= self.ready_at
    }

    #[must_use]
    pub fn ready_at(&self) -> DateTime<Utc> {
        self.ready_at
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Records a notification sent at `now`.
    pub fn trigger(&mut self, now: DateTime<Utc>) {
        self.ready_at = now.checked_add_signed(self.period).unwrap_or(DateTime::<Utc>::MAX_UTC);
    }
}
