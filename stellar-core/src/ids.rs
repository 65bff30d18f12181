use rand::Rng;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

pub const DEFAULT_BOOKING_PREFIX: &str = "DST";

/// How many recent ids `RandomBookingIds` refuses to repeat
pub const DEFAULT_RECENT_WINDOW: usize = 10_000;

// Six-digit space: 100000..=999999
const ID_SPACE: usize = 900_000;

/// Source of human-readable booking identifiers (`PREFIX-123456`)
pub trait BookingIdGenerator: Send + Sync {
    fn next_id(&self) -> String;

    fn prefix(&self) -> &str;
}

#[derive(Default)]
struct RecentIds {
    order: VecDeque<u32>,
    members: HashSet<u32>,
}

/// Random six-digit identifiers, never repeating any of the last `window` ids
pub struct RandomBookingIds {
    prefix: String,
    window: usize,
    recent: Mutex<RecentIds>,
}

impl RandomBookingIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_window(prefix, DEFAULT_RECENT_WINDOW)
    }

    /// `window` is capped at half the id space so a fresh id is always easy to find
    pub fn with_window(prefix: impl Into<String>, window: usize) -> Self {
        Self {
            prefix: prefix.into(),
            window: window.clamp(1, ID_SPACE / 2),
            recent: Mutex::new(RecentIds::default()),
        }
    }

    #[cfg(test)]
    fn remembered(&self) -> usize {
        self.recent.lock().unwrap().members.len()
    }
}

impl Default for RandomBookingIds {
    fn default() -> Self {
        Self::new(DEFAULT_BOOKING_PREFIX)
    }
}

impl BookingIdGenerator for RandomBookingIds {
    fn next_id(&self) -> String {
        let mut recent = self.recent.lock().unwrap_or_else(|e| e.into_inner());
        let mut rng = rand::thread_rng();
        let digits = loop {
            let candidate = rng.gen_range(100_000..1_000_000);
            if recent.members.insert(candidate) {
                break candidate;
            }
        };

        recent.order.push_back(digits);
        if recent.order.len() > self.window {
            if let Some(oldest) = recent.order.pop_front() {
                recent.members.remove(&oldest);
            }
        }
        format!("{}-{}", self.prefix, digits)
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Deterministic identifiers counting up from 1
pub struct SequentialBookingIds {
    prefix: String,
    next: AtomicU32,
}

impl SequentialBookingIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU32::new(1),
        }
    }
}

impl BookingIdGenerator for SequentialBookingIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{:06}", self.prefix, n % 1_000_000)
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// True if `id` is `PREFIX-` followed by exactly six digits
pub fn is_booking_id(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .map(|digits| digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_format_and_uniqueness() {
        let ids = RandomBookingIds::default();
        let mut seen = HashSet::new();

        for _ in 0..500 {
            let id = ids.next_id();
            assert!(is_booking_id(&id, "DST"), "bad id {}", id);
            assert!(seen.insert(id));
        }
    }

    #[test]
    fn test_random_ids_history_is_bounded() {
        let ids = RandomBookingIds::with_window("DST", 50);
        let mut last = VecDeque::new();

        for _ in 0..2_000 {
            let id = ids.next_id();
            assert!(!last.contains(&id), "{} repeated inside the window", id);
            last.push_back(id);
            if last.len() > 50 {
                last.pop_front();
            }
        }
        assert_eq!(ids.remembered(), 50);
    }

    #[test]
    fn test_window_is_clamped() {
        assert_eq!(RandomBookingIds::with_window("DST", 0).window, 1);
        assert_eq!(RandomBookingIds::with_window("DST", usize::MAX).window, ID_SPACE / 2);
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialBookingIds::new("TST");
        assert_eq!(ids.next_id(), "TST-000001");
        assert_eq!(ids.next_id(), "TST-000002");
    }

    #[test]
    fn test_id_pattern() {
        assert!(is_booking_id("DST-123456", "DST"));
        assert!(!is_booking_id("DST-12345", "DST"));
        assert!(!is_booking_id("DST123456", "DST"));
        assert!(!is_booking_id("ABC-123456", "DST"));
        assert!(!is_booking_id("DST-12a456", "DST"));
    }
}
