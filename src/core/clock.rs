use super::state::Ticks;

/// Simulated time. Advances only when the driver consumes an event, always
/// to that event's timestamp.
#[derive(Debug, Default)]
pub struct Clock {
    now: Ticks,
}

impl Clock {
    pub fn new() -> Self {
        Self { now: 0 }
    }

    pub fn current(&self) -> Ticks {
        self.now
    }

    /// Move the clock to `t`. The clock never runs backwards; a regression
    /// is a driver bug, not a recoverable state.
    pub fn advance_to(&mut self, t: Ticks) {
        assert!(
            t >= self.now,
            "clock regression: {} -> {t}",
            self.now
        );
        self.now = t;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(Clock::new().current(), 0);
    }

    #[test]
    fn advances_monotonically() {
        let mut clock = Clock::new();
        clock.advance_to(3);
        assert_eq!(clock.current(), 3);
        clock.advance_to(3);
        assert_eq!(clock.current(), 3);
        clock.advance_to(10);
        assert_eq!(clock.current(), 10);
    }

    #[test]
    #[should_panic(expected = "clock regression")]
    fn rejects_regression() {
        let mut clock = Clock::new();
        clock.advance_to(5);
        clock.advance_to(4);
    }
}
