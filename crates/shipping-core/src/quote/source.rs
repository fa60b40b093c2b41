use rand::{Rng, rng};

/// Exclusive upper bound of the synthetic whole-dollar cost.
pub const MAX_DOLLARS: u32 = 100;

/// A source of synthetic shipping costs.
///
/// This abstraction allows plugging in the real random source in production
/// and a fixed one in tests.
///
/// # Example
/// ```
/// use shipping_core::quote::CostSource;
///
/// struct Flat;
/// impl CostSource for Flat {
///     fn sample_dollars(&self) -> u32 {
///         7
///     }
/// }
///
/// assert_eq!(Flat.sample_dollars(), 7);
/// ```
pub trait CostSource {
    /// Returns a whole-dollar cost, expected in `0..MAX_DOLLARS`.
    fn sample_dollars(&self) -> u32;
}

/// A [`CostSource`] drawing uniformly from `0..MAX_DOLLARS` with the
/// thread-local RNG.
///
/// The type does not store the RNG; it accesses the thread-local generator
/// on each call, so it is freely shareable across tasks and threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandomCost;

impl CostSource for ThreadRandomCost {
    fn sample_dollars(&self) -> u32 {
        rng().random_range(0..MAX_DOLLARS)
    }
}

/// A [`CostSource`] that always returns the same cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedCost(pub u32);

impl CostSource for FixedCost {
    fn sample_dollars(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_cost_stays_in_range() {
        let source = ThreadRandomCost;
        for _ in 0..10_000 {
            assert!(source.sample_dollars() < MAX_DOLLARS);
        }
    }
}
