//! Prime number checker
//!
//! Trial division up to the square root. Inputs are capped so a single
//! check stays interactive.

use crate::error::CalcError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest number accepted by [`analyze`]
pub const MAX_PRIME_INPUT: u64 = 1_000_000_000_000;

/// One prime in a factorization, e.g. `2^3`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrimeFactor {
    pub prime: u64,
    pub exponent: u32,
}

impl fmt::Display for PrimeFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponent == 1 {
            write!(f, "{}", self.prime)
        } else {
            write!(f, "{}^{}", self.prime, self.exponent)
        }
    }
}

/// Result of checking a number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrimeAnalysis {
    pub number: u64,
    pub is_prime: bool,
    /// All positive divisors, ascending
    pub factors: Vec<u64>,
    pub prime_factors: Vec<PrimeFactor>,
    pub square_root: f64,
}

/// Check primality by trial division over odd candidates
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut i = 3;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// All positive divisors of `n` in ascending order
pub fn factors(n: u64) -> Vec<u64> {
    if n == 0 {
        return Vec::new();
    }

    let mut low = Vec::new();
    let mut high = Vec::new();

    let mut i = 1;
    while i <= n / i {
        if n % i == 0 {
            low.push(i);
            let pair = n / i;
            if pair != i {
                high.push(pair);
            }
        }
        i += 1;
    }

    high.reverse();
    low.extend(high);
    low
}

/// Prime factorization in ascending prime order (empty for n < 2)
pub fn prime_factorization(n: u64) -> Vec<PrimeFactor> {
    let mut result = Vec::new();
    if n < 2 {
        return result;
    }

    let mut remaining = n;
    let mut divisor = 2;

    while divisor <= remaining / divisor {
        let mut exponent = 0;
        while remaining % divisor == 0 {
            remaining /= divisor;
            exponent += 1;
        }
        if exponent > 0 {
            result.push(PrimeFactor {
                prime: divisor,
                exponent,
            });
        }
        divisor += if divisor == 2 { 1 } else { 2 };
    }

    if remaining > 1 {
        result.push(PrimeFactor {
            prime: remaining,
            exponent: 1,
        });
    }

    result
}

/// Render a factorization like `2^3 × 3 × 5`
pub fn format_factorization(factors: &[PrimeFactor]) -> String {
    factors
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(" × ")
}

/// Full analysis of a positive integer
pub fn analyze(n: u64) -> Result<PrimeAnalysis, CalcError> {
    if n == 0 {
        return Err(CalcError::NotPositive(n));
    }
    if n > MAX_PRIME_INPUT {
        return Err(CalcError::TooLarge {
            value: n,
            max: MAX_PRIME_INPUT,
        });
    }

    let factors = factors(n);
    let analysis = PrimeAnalysis {
        number: n,
        is_prime: is_prime(n),
        prime_factors: prime_factorization(n),
        square_root: (n as f64).sqrt(),
        factors,
    };

    tracing::debug!(
        number = n,
        is_prime = analysis.is_prime,
        divisors = analysis.factors.len(),
        "prime analysis"
    );

    Ok(analysis)
}
