//! Hypergeometric distribution for "how many non-owned cards show up in
//! a random sample drawn without replacement".
//!
//! Tail probabilities are summed from exact binomial coefficients held in
//! [`BigUint`] and only turned into `f64` after the final division, so
//! populations of a few hundred cards do not overflow.

use crate::error::{DraftError, Result};
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

/// X ~ Hypergeometric(N, K, n)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hypergeometric {
    population: u64,
    successes: u64,
    sample: u64,
}

impl Hypergeometric {
    /// `population` = N, `successes` = K (non-owned cards), `sample` = n.
    ///
    /// Fails with [`DraftError::InvalidSampleSize`] when n > N and with
    /// [`DraftError::InvalidCounts`] when K > N.
    pub fn new(population: u64, successes: u64, sample: u64) -> Result<Self> {
        if sample > population {
            return Err(DraftError::InvalidSampleSize { sample, population });
        }
        if successes > population {
            return Err(DraftError::InvalidCounts {
                successes,
                population,
            });
        }
        Ok(Self {
            population,
            successes,
            sample,
        })
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn sample(&self) -> u64 {
        self.sample
    }

    /// Smallest and largest value X can take: `max(0, n-(N-K)) ..= min(n, K)`
    pub fn support(&self) -> (u64, u64) {
        let failures = self.population - self.successes;
        let lo = self.sample.saturating_sub(failures);
        let hi = self.sample.min(self.successes);
        (lo, hi)
    }

    /// n * K / N (0 for an empty population)
    pub fn expected_value(&self) -> f64 {
        if self.population == 0 {
            return 0.0;
        }
        self.sample as f64 * self.success_ratio()
    }

    /// n * p * (1 - p) * (N - n) / (N - 1) with p = K / N (0 when N <= 1)
    pub fn variance(&self) -> f64 {
        if self.population <= 1 {
            return 0.0;
        }
        let p = self.success_ratio();
        let n = self.sample as f64;
        let big_n = self.population as f64;
        n * p * (1.0 - p) * (big_n - n) / (big_n - 1.0)
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// P(X = k)
    pub fn pmf(&self, k: u64) -> f64 {
        let (lo, hi) = self.support();
        if k < lo || k > hi {
            return 0.0;
        }
        ratio_to_f64(self.ways(k), binomial(self.population, self.sample))
    }

    /// P(X > threshold), summed exactly over `threshold+1 ..= min(n, K)`
    pub fn p_more_than(&self, threshold: u64) -> f64 {
        let (lo, hi) = self.support();
        if threshold < lo {
            return 1.0;
        }
        if threshold >= hi {
            return 0.0;
        }

        let numerator = (threshold + 1..=hi).fold(BigUint::zero(), |acc, i| acc + self.ways(i));
        ratio_to_f64(numerator, binomial(self.population, self.sample))
    }

    /// Number of samples with exactly `i` successes: C(K, i) * C(N-K, n-i)
    fn ways(&self, i: u64) -> BigUint {
        binomial(self.successes, i)
            * binomial(self.population - self.successes, self.sample - i)
    }

    fn success_ratio(&self) -> f64 {
        self.successes as f64 / self.population as f64
    }
}

/// P(X > threshold) for X ~ Hypergeometric(N, K, n)
pub fn hypergeom_p_more_than(
    population: u64,
    successes: u64,
    sample: u64,
    threshold: u64,
) -> Result<f64> {
    Ok(Hypergeometric::new(population, successes, sample)?.p_more_than(threshold))
}

/// Exact binomial coefficient C(n, k); 0 when k > n
pub fn binomial(n: u64, k: u64) -> BigUint {
    if k > n {
        return BigUint::zero();
    }
    let k = k.min(n - k);
    let mut result = BigUint::one();
    for i in 0..k {
        // Each partial product is C(n, i + 1), so the division is exact.
        result = result * BigUint::from(n - i) / BigUint::from(i + 1);
    }
    result
}

fn ratio_to_f64(numerator: BigUint, denominator: BigUint) -> f64 {
    BigRational::new(BigInt::from(numerator), BigInt::from(denominator))
        .to_f64()
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
#[path = "hypergeometric_tests.rs"]
mod tests;
