use crate::error::{Result, ServiceError};
use std::collections::HashSet;
use std::fmt;

/// Banknotes available for payout, largest first.
pub const DENOMINATIONS: [u32; 3] = [100, 50, 10];

/// One way of paying out an amount: a count for each denomination used.
///
/// Counts are kept in the engine's denomination order (largest first), which
/// is also the canonical rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combination {
    notes: Vec<(u32, u32)>,
}

impl Combination {
    /// `(denomination, count)` pairs, largest denomination first, counts >= 1.
    pub fn notes(&self) -> &[(u32, u32)] {
        &self.notes
    }

    pub fn total(&self) -> u64 {
        self.notes
            .iter()
            .map(|&(value, count)| u64::from(value) * u64::from(count))
            .sum()
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (value, count)) in self.notes.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{count} x {value} EUR")?;
        }
        Ok(())
    }
}

/// Enumerates every distinct way to pay an amount with a fixed denomination set.
#[derive(Debug, Clone)]
pub struct PayoutEngine {
    denominations: Vec<u32>,
}

impl Default for PayoutEngine {
    fn default() -> Self {
        Self {
            denominations: DENOMINATIONS.to_vec(),
        }
    }
}

impl PayoutEngine {
    /// Builds an engine over a custom denomination set.
    ///
    /// The set is sorted descending and deduplicated; it must be non-empty and
    /// contain only positive values.
    pub fn with_denominations(denominations: &[u32]) -> Result<Self> {
        if denominations.is_empty() || denominations.contains(&0) {
            return Err(ServiceError::InvalidArgument(
                "denominations must be a non-empty set of positive values".to_string(),
            ));
        }
        let mut denominations = denominations.to_vec();
        denominations.sort_unstable_by(|a, b| b.cmp(a));
        denominations.dedup();
        Ok(Self { denominations })
    }

    pub fn denominations(&self) -> &[u32] {
        &self.denominations
    }

    pub fn smallest_denomination(&self) -> u32 {
        // Constructors guarantee at least one denomination.
        self.denominations.last().copied().unwrap_or(1)
    }

    /// Largest amount not above `amount` that is a multiple of the smallest
    /// denomination.
    pub fn closest_payable(&self, amount: u32) -> u32 {
        amount - amount % self.smallest_denomination()
    }

    /// All exact combinations for `amount`, in discovery order.
    ///
    /// An amount of zero yields no combination: paying out nothing is not a
    /// payout.
    pub fn find_combinations(&self, amount: u32) -> Vec<Combination> {
        let mut results = Vec::new();
        if amount == 0 {
            return results;
        }

        // Depth-first over an explicit stack; children are pushed in reverse so
        // they pop largest-denomination first.
        let mut seen = HashSet::new();
        let mut stack = vec![(amount, 0usize, vec![0u32; self.denominations.len()])];
        while let Some((remaining, index, counts)) = stack.pop() {
            if remaining == 0 {
                let combination = self.combination_from(&counts);
                if seen.insert(combination.clone()) {
                    results.push(combination);
                }
                continue;
            }

            for (i, &value) in self.denominations.iter().enumerate().skip(index).rev() {
                if value > remaining {
                    continue;
                }
                let mut branch = counts.clone();
                branch[i] += 1;
                stack.push((remaining - value, i, branch));
            }
        }
        results
    }

    fn combination_from(&self, counts: &[u32]) -> Combination {
        let notes = self
            .denominations
            .iter()
            .zip(counts)
            .filter(|&(_, &count)| count > 0)
            .map(|(&value, &count)| (value, count))
            .collect();
        Combination { notes }
    }
}
