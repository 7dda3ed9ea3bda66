//! Client-generated record ids.
//!
//! Ids are epoch-millisecond tokens rendered as decimal strings, forced
//! strictly monotonic within the process so two records created in the same
//! millisecond still get distinct ids.

use std::sync::atomic::{AtomicU64, Ordering};

static LAST_ISSUED: AtomicU64 = AtomicU64::new(0);

/// Issue the next id token.
pub fn next_token() -> String {
    let now_ms = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let mut prev = LAST_ISSUED.load(Ordering::Relaxed);
    loop {
        let candidate = now_ms.max(prev + 1);
        match LAST_ISSUED.compare_exchange_weak(
            prev,
            candidate,
            Ordering::SeqCst,
            Ordering::Relaxed,
        ) {
            Ok(_) => return candidate.to_string(),
            Err(actual) => prev = actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_increasing() {
        let tokens: Vec<u64> = (0..100)
            .map(|_| next_token().parse().expect("numeric token"))
            .collect();
        for pair in tokens.windows(2) {
            assert!(pair[1] > pair[0], "{} !> {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn tokens_look_like_epoch_millis() {
        let token: u64 = next_token().parse().unwrap();
        // Sometime after 2020-01-01 in milliseconds.
        assert!(token > 1_577_836_800_000);
    }
}
