//! Randomness for anonymous visitor ids

use rand::Rng;

/// Source of randomness used when privacy forbids sending the real device id
pub trait RandomNumberGenerator: Send + Sync {
    /// Uniformly distributed integer in `[0, 2^63)`
    fn next_positive_i64(&self) -> i64;
}

/// Thread-local CSPRNG from the `rand` crate; safe for concurrent use
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRandomNumberGenerator;

impl RandomNumberGenerator for DefaultRandomNumberGenerator {
    fn next_positive_i64(&self) -> i64 {
        // masking the sign bit keeps the distribution uniform over [0, 2^63)
        rand::rng().random::<i64>() & i64::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_positive_i64_is_never_negative() {
        let generator = DefaultRandomNumberGenerator;
        for _ in 0..100 {
            assert!(generator.next_positive_i64() >= 0);
        }
    }

    #[test]
    fn test_values_vary() {
        let generator = DefaultRandomNumberGenerator;
        let first = generator.next_positive_i64();
        let any_different = (0..10).any(|_| generator.next_positive_i64() != first);
        assert!(any_different);
    }
}
