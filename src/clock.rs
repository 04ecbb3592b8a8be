//! Wall-clock source for time fields

use chrono::{Local, NaiveDateTime};

pub trait Clock: Send + Sync {
    /// Returns the current local date and time
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_reasonable() {
        let now = SystemClock.now();
        // after 2024-01-01, before 2100-01-01
        assert!(now.and_utc().timestamp() > 1_704_067_200 - 86_400);
        assert!(now.and_utc().timestamp() < 4_102_444_800);
    }
}
