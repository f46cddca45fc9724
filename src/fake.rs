//! Fake data helpers.
//!
//! Thin wrappers over a seeded RNG so every random field of the seed script
//! is drawn from one deterministic stream.

use crate::config::StatusWeight;
use crate::model::OrderStatus;
use chrono::{Duration, NaiveDateTime};
use rand::Rng;

/// Fake data generator with deterministic RNG
pub struct FakeData<R: Rng> {
    rng: R,
}

impl<R: Rng> FakeData<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a random integer in range (inclusive)
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        self.rng.random_range(min..=max)
    }

    /// Generate a random count in range (inclusive)
    pub fn count_range(&mut self, min: usize, max: usize) -> usize {
        self.rng.random_range(min..=max)
    }

    /// Pick a random element from a non-empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.random_range(0..items.len())]
    }

    /// Generate a price that is a multiple of `step` within `[min, max]`.
    ///
    /// Both bounds must be multiples of `step`.
    pub fn price(&mut self, min: i64, max: i64, step: i64) -> i64 {
        self.rng.random_range(min / step..=max / step) * step
    }

    /// Generate a timestamp between `start` and `end` at whole-second granularity
    pub fn datetime_between(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> NaiveDateTime {
        let span = (end - start).num_seconds().max(0);
        start + Duration::seconds(self.rng.random_range(0..=span))
    }

    /// Pick an order status according to its relative weight.
    ///
    /// At least one weight must be positive.
    pub fn weighted_status(&mut self, statuses: &[StatusWeight]) -> OrderStatus {
        let total: u64 = statuses.iter().map(|s| u64::from(s.weight)).sum();
        let mut roll = self.rng.random_range(0..total);
        for s in statuses {
            let weight = u64::from(s.weight);
            if roll < weight {
                return s.status;
            }
            roll -= weight;
        }
        // Unreachable while total > 0
        statuses[statuses.len() - 1].status
    }

    /// Pick `amount` distinct ids from `1..=pool`, in draw order
    pub fn distinct_ids(&mut self, pool: usize, amount: usize) -> Vec<i64> {
        rand::seq::index::sample(&mut self.rng, pool, amount)
            .into_iter()
            .map(|idx| idx as i64 + 1)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_datetime;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn fake(seed: u64) -> FakeData<ChaCha8Rng> {
        FakeData::new(ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_deterministic_generation() {
        let mut fake1 = fake(42);
        let mut fake2 = fake(42);

        assert_eq!(fake1.int_range(0, 1000), fake2.int_range(0, 1000));
        assert_eq!(
            fake1.price(1000, 100000, 100),
            fake2.price(1000, 100000, 100)
        );
        assert_eq!(fake1.distinct_ids(50, 5), fake2.distinct_ids(50, 5));
    }

    #[test]
    fn test_price_is_step_aligned() {
        let mut fake = fake(1);
        for _ in 0..1000 {
            let price = fake.price(1000, 100000, 100);
            assert_eq!(price % 100, 0);
            assert!((1000..=100000).contains(&price));
        }
    }

    #[test]
    fn test_datetime_between_stays_in_window() {
        let mut fake = fake(3);
        let start = parse_datetime("2025-01-01 00:00:00").unwrap();
        let end = parse_datetime("2025-01-31 00:00:00").unwrap();
        for _ in 0..500 {
            let ts = fake.datetime_between(start, end);
            assert!(ts >= start && ts <= end);
        }
        assert_eq!(fake.datetime_between(start, start), start);
    }

    #[test]
    fn test_weighted_status_skips_zero_weight() {
        let mut fake = fake(9);
        let statuses = vec![
            StatusWeight {
                status: OrderStatus::Canceled,
                weight: 0,
            },
            StatusWeight {
                status: OrderStatus::Paid,
                weight: 2,
            },
        ];
        for _ in 0..200 {
            assert_eq!(fake.weighted_status(&statuses), OrderStatus::Paid);
        }
    }

    #[test]
    fn test_distinct_ids() {
        let mut fake = fake(11);
        for _ in 0..100 {
            let ids = fake.distinct_ids(10, 5);
            assert_eq!(ids.len(), 5);
            assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 5);
            assert!(ids.iter().all(|id| (1..=10).contains(id)));
        }
        let mut all = fake.distinct_ids(4, 4);
        all.sort_unstable();
        assert_eq!(all, vec![1, 2, 3, 4]);
    }
}
