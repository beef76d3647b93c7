// Wall-clock source and time formatting used by the chat session

use chrono::{DateTime, Local};

/// Source of local wall-clock time for message timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant. Handy for rendering tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Format a timestamp as 24-hour "HH:mm"
pub fn format_time(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_time_zero_pads() {
        let ts = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 59).unwrap();
        assert_eq!(format_time(&ts), "07:05");
    }

    #[test]
    fn test_format_time_uses_24_hour_clock() {
        let ts = Local.with_ymd_and_hms(2024, 3, 9, 23, 41, 0).unwrap();
        assert_eq!(format_time(&ts), "23:41");
    }

    #[test]
    fn test_fixed_clock_is_stable() {
        let ts = Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let clock = FixedClock(ts);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now(), ts);
    }
}
