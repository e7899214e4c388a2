use chrono::{DateTime, Duration, Utc};

/// Wall-clock source for session timestamps; fixed in tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Move a fixed clock forward. No effect on `Clock::System`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// 2023-11-14T22:13:20Z
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Deterministic timestamp for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

/// Compact `1m 05s` / `42s` rendering of a non-negative span.
#[must_use]
pub fn format_span(span: Duration) -> String {
    let seconds = span.num_seconds().max(0);
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    if minutes == 0 {
        format!("{remainder}s")
    } else {
        format!("{minutes}m {remainder:02}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances() {
        let mut clock = fixed_clock();
        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now() - fixed_now(), Duration::seconds(90));
        assert!(matches!(clock, Clock::Fixed(_)));

        let mut system = Clock::system();
        system.advance(Duration::seconds(90));
        assert!(matches!(system, Clock::System));
    }

    #[test]
    fn spans_format_compactly() {
        assert_eq!(format_span(Duration::seconds(42)), "42s");
        assert_eq!(format_span(Duration::seconds(65)), "1m 05s");
        assert_eq!(format_span(Duration::seconds(-3)), "0s");
    }
}
