//! Memoized Collatz stopping times.
use chain_table::{hash_value, ChainStats, ChainTable};
use color_eyre::eyre::{bail, eyre, Result};

/// Number of Collatz steps it takes `start` to reach 1.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StoppingTime {
    pub start: u64,
    pub steps: u32,
}

type MemoTable =
    ChainTable<StoppingTime, fn(&StoppingTime) -> u64, fn(&StoppingTime, &StoppingTime) -> bool>;

fn start_hash(record: &StoppingTime) -> u64 {
    hash_value(record.start)
}

fn same_start(a: &StoppingTime, b: &StoppingTime) -> bool {
    a.start == b.start
}

fn collatz_step(value: u64) -> Result<u64> {
    if value & 1 == 0 {
        Ok(value / 2)
    } else {
        value
            .checked_mul(3)
            .and_then(|tripled| tripled.checked_add(1))
            .ok_or_else(|| eyre!("3 * {value} + 1 does not fit into 64 bits"))
    }
}

/// Returns the Collatz sequence starting at `start`, up to and including the final 1.
pub fn sequence(start: u64) -> Result<Vec<u64>> {
    if start == 0 {
        bail!("the Collatz sequence is not defined for 0");
    }
    let mut values = vec![start];
    let mut value = start;
    while value > 1 {
        value = collatz_step(value)?;
        values.push(value);
    }
    Ok(values)
}

/// Stopping times of every number visited so far, keyed by their starting number.
pub struct StoppingTimes {
    memo: MemoTable,
}

impl StoppingTimes {
    pub fn with_capacity(capacity: usize) -> Self {
        StoppingTimes {
            memo: MemoTable::with_capacity(capacity, start_hash, same_start),
        }
    }

    /// Returns the stopping time of `start` if it has been computed before.
    pub fn lookup(&self, start: u64) -> Option<u32> {
        self.memo
            .find(hash_value(start), |record| record.start == start)
            .map(|record| record.steps)
    }

    /// Computes the stopping time of `start`, remembering it and that of every number visited on
    /// the way.
    pub fn compute(&mut self, start: u64) -> Result<u32> {
        if start == 0 {
            bail!("the Collatz sequence is not defined for 0");
        }

        let mut path = vec![];
        let mut value = start;
        let mut steps = loop {
            if value == 1 {
                break 0;
            }
            if let Some(steps) = self.lookup(value) {
                break steps;
            }
            path.push(value);
            value = collatz_step(value)?;
        };

        for &visited in path.iter().rev() {
            steps += 1;
            let inserted = self.memo.insert(StoppingTime {
                start: visited,
                steps,
            });
            debug_assert!(inserted);
        }
        Ok(steps)
    }

    pub fn stats(&self) -> ChainStats {
        self.memo.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_stopping_times() {
        let mut times = StoppingTimes::with_capacity(8);
        assert_eq!(times.compute(1).unwrap(), 0);
        assert_eq!(times.compute(6).unwrap(), 8);
        assert_eq!(times.compute(27).unwrap(), 111);
        assert_eq!(times.compute(97).unwrap(), 118);
    }

    #[test]
    fn visited_numbers_are_memoized() {
        let mut times = StoppingTimes::with_capacity(1);
        assert_eq!(times.lookup(3), None);
        times.compute(6).unwrap();
        assert_eq!(times.lookup(3), Some(7));
        assert_eq!(times.lookup(16), Some(4));
        assert_eq!(times.lookup(1), None);
        // 6, 3, 10, 5, 16, 8, 4, 2
        assert_eq!(times.stats().len, 8);
        assert_eq!(times.compute(12).unwrap(), 9);
        assert_eq!(times.stats().len, 9);
    }

    #[test]
    fn agrees_with_sequence_length() {
        let mut times = StoppingTimes::with_capacity(8);
        for start in 1..2000 {
            let steps = times.compute(start).unwrap() as usize;
            assert_eq!(steps + 1, sequence(start).unwrap().len());
        }
        assert!(times.stats().capacity >= 2000);
    }

    #[test]
    fn sequence_of_six() {
        assert_eq!(sequence(6).unwrap(), [6, 3, 10, 5, 16, 8, 4, 2, 1]);
        assert_eq!(sequence(1).unwrap(), [1]);
    }

    #[test]
    fn invalid_starts_are_errors() {
        let mut times = StoppingTimes::with_capacity(8);
        assert!(times.compute(0).is_err());
        assert!(times.compute(u64::MAX).is_err());
        assert!(sequence(0).is_err());
        assert_eq!(times.stats().len, 0);
    }
}
