//! Record id generation.
//!
//! Ids are creation-time tokens: the Unix epoch in milliseconds, rendered as
//! a decimal string. Two calls within the same millisecond would collide, so
//! the generator never hands out a value at or below the last one it issued,
//! and skips any value the caller reports as taken.

use std::cell::Cell;

use chrono::Utc;

#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Cell<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues an id for which `taken` returns false.
    pub fn next_id(&self, taken: impl Fn(&str) -> bool) -> String {
        let mut candidate = Utc::now().timestamp_millis().max(self.last.get() + 1);
        let mut id = candidate.to_string();
        while taken(&id) {
            candidate += 1;
            id = candidate.to_string();
        }
        self.last.set(candidate);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_under_rapid_calls() {
        let ids = IdGenerator::new();
        let issued: HashSet<String> = (0..1000).map(|_| ids.next_id(|_| false)).collect();
        assert_eq!(issued.len(), 1000);
    }

    #[test]
    fn test_ids_increase() {
        let ids = IdGenerator::new();
        let first: i64 = ids.next_id(|_| false).parse().unwrap();
        let second: i64 = ids.next_id(|_| false).parse().unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_skips_taken_ids() {
        let ids = IdGenerator::new();
        let probe: i64 = ids.next_id(|_| false).parse().unwrap();

        let taken: HashSet<String> = (probe + 1..probe + 50).map(|n| n.to_string()).collect();
        let id = ids.next_id(|candidate| taken.contains(candidate));
        assert!(!taken.contains(&id));
    }
}
