use std::time::{Duration, Instant};

/// Minimum interval between remote push attempts.
pub const PUSH_MIN_INTERVAL: Duration = Duration::from_secs(2);

/// Min-interval gate for push attempts.
///
/// A denied acquisition means the push is skipped, not queued: the store
/// already holds the mutation, so the next acquired push carries it. The
/// attempt time is recorded only when the gate opens.
#[derive(Debug)]
pub struct PushThrottle {
    min_interval: Duration,
    last_acquired: Option<Instant>,
}

impl PushThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_acquired: None,
        }
    }

    /// Open the gate if the interval has elapsed since the last acquired
    /// push. The first acquisition always succeeds.
    pub fn try_acquire(&mut self) -> bool {
        let now = Instant::now();
        if let Some(last) = self.last_acquired {
            if now.duration_since(last) < self.min_interval {
                return false;
            }
        }
        self.last_acquired = Some(now);
        true
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_acquisition_succeeds() {
        let mut throttle = PushThrottle::new(Duration::from_secs(2));
        assert!(throttle.try_acquire());
    }

    #[test]
    fn denies_within_interval() {
        let mut throttle = PushThrottle::new(Duration::from_secs(2));
        assert!(throttle.try_acquire());
        assert!(!throttle.try_acquire());
        assert!(!throttle.try_acquire());
    }

    #[test]
    fn reopens_after_interval() {
        let mut throttle = PushThrottle::new(Duration::from_millis(10));
        assert!(throttle.try_acquire());
        std::thread::sleep(Duration::from_millis(15));
        assert!(throttle.try_acquire());
    }

    #[test]
    fn denied_attempts_do_not_extend_the_window() {
        let mut throttle = PushThrottle::new(Duration::from_millis(20));
        assert!(throttle.try_acquire());
        std::thread::sleep(Duration::from_millis(12));
        assert!(!throttle.try_acquire());
        std::thread::sleep(Duration::from_millis(12));
        // 24ms since the acquired attempt; the denied one did not reset it
        assert!(throttle.try_acquire());
    }
}
