//! Integer predicates and decompositions
//!
//! Every function in this module is pure and total over `i64` unless its
//! documentation says otherwise. Magnitudes are taken with `unsigned_abs` so
//! `i64::MIN` is handled without overflow.

use serde::{Serialize, Serializer};

use crate::Error;

/// Factorials are only computed below this bound; 19! is the largest value
/// that fits in a `u64`.
pub const FACTORIAL_LIMIT: i64 = 20;

/// Rendering of [`Factorial::TooLarge`]
pub const FACTORIAL_TOO_LARGE: &str = "too large to calculate";

/// Rendering of [`Factorial::Undefined`]
pub const FACTORIAL_UNDEFINED: &str = "undefined for negative numbers";

const SMALL_PRIMES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Result of a bounded factorial computation
///
/// [`factorial`] only ever produces `Exact` or `TooLarge`. `Undefined` is used
/// by the classifier to describe negative inputs inside a property record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factorial {
    Exact(u64),
    TooLarge,
    Undefined,
}

impl std::fmt::Display for Factorial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Factorial::Exact(value) => write!(f, "{value}"),
            Factorial::TooLarge => f.write_str(FACTORIAL_TOO_LARGE),
            Factorial::Undefined => f.write_str(FACTORIAL_UNDEFINED),
        }
    }
}

impl Serialize for Factorial {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Factorial::Exact(value) => serializer.serialize_u64(*value),
            Factorial::TooLarge => serializer.serialize_str(FACTORIAL_TOO_LARGE),
            Factorial::Undefined => serializer.serialize_str(FACTORIAL_UNDEFINED),
        }
    }
}

pub fn is_even(n: i64) -> bool {
    n % 2 == 0
}

pub fn is_odd(n: i64) -> bool {
    !is_even(n)
}

/// Exact integer square root (floor)
pub fn isqrt(n: u64) -> u64 {
    isqrt_u128(u128::from(n)) as u64
}

fn isqrt_u128(n: u128) -> u128 {
    if n < 2 {
        return n;
    }

    // The float estimate is within one or two of the answer; fix it up exactly.
    let mut root = (n as f64).sqrt() as u128;
    while root.checked_mul(root).map_or(true, |square| square > n) {
        root -= 1;
    }
    while (root + 1)
        .checked_mul(root + 1)
        .is_some_and(|square| square <= n)
    {
        root += 1;
    }

    root
}

fn is_square_u128(n: u128) -> bool {
    let root = isqrt_u128(n);
    root * root == n
}

/// Primality test
///
/// Numbers below 2, negatives included, are not prime. Uses a Miller-Rabin
/// test with the first twelve primes as witnesses, which is deterministic for
/// every 64-bit input.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let n = n as u64;

    for p in SMALL_PRIMES {
        if n % p == 0 {
            return n == p;
        }
    }

    let mut d = n - 1;
    let s = d.trailing_zeros();
    d >>= s;

    'witness: for a in SMALL_PRIMES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }

    true
}

fn mul_mod(a: u64, b: u64, modulus: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(modulus)) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    let mut result = 1;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exp >>= 1;
    }
    result
}

/// Fibonacci membership through the `5n² ± 4` identity
///
/// The identity only looks at `n²`, so a negative input is reported as
/// Fibonacci whenever its magnitude is. When `5n² + 4` does not fit in a
/// `u128` the sequence is walked instead, which gives the same answer.
pub fn is_fibonacci(n: i64) -> bool {
    let magnitude = u128::from(n.unsigned_abs());

    let plus_four = magnitude
        .checked_mul(magnitude)
        .and_then(|square| square.checked_mul(5))
        .and_then(|five_square| five_square.checked_add(4));

    match plus_four {
        Some(plus) => is_square_u128(plus) || (plus >= 8 && is_square_u128(plus - 8)),
        None => in_fibonacci_sequence(magnitude),
    }
}

fn in_fibonacci_sequence(target: u128) -> bool {
    let (mut current, mut next) = (0u128, 1u128);
    while current < target {
        (current, next) = (next, current + next);
    }
    current == target
}

/// Negative numbers have no integer square root and are never perfect squares
pub fn is_perfect_square(n: i64) -> bool {
    if n < 0 {
        return false;
    }
    let root = isqrt(n as u64);
    root * root == n as u64
}

/// Perfect cube test, negative-aware
///
/// `cbrt` is only an estimate once `|n|` grows past ~10^15, so the rounded
/// root and its two neighbours are cubed exactly in `i128`.
pub fn is_perfect_cube(n: i64) -> bool {
    let estimate = (n as f64).cbrt().round() as i128;
    let target = i128::from(n);

    (estimate - 1..=estimate + 1).any(|root| root * root * root == target)
}

pub fn is_power_of_two(n: i64) -> bool {
    n > 0 && n & (n - 1) == 0
}

/// Positive divisors of `|n|`, ascending and without duplicates
///
/// `factors(0)` is empty.
pub fn factors(n: i64) -> Vec<u64> {
    let magnitude = n.unsigned_abs();
    if magnitude == 0 {
        return Vec::new();
    }

    let mut small = Vec::new();
    let mut large = Vec::new();

    for i in 1..=isqrt(magnitude) {
        if magnitude % i == 0 {
            small.push(i);
            let pair = magnitude / i;
            if pair != i {
                large.push(pair);
            }
        }
    }

    large.reverse();
    small.extend(large);
    small
}

fn decimal_digits(n: i64) -> Vec<u32> {
    n.unsigned_abs()
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect()
}

pub fn digit_sum(n: i64) -> u32 {
    decimal_digits(n).iter().sum()
}

pub fn binary_digits(n: i64) -> String {
    format!("{:b}", n.unsigned_abs())
}

pub fn hex_digits(n: i64) -> String {
    format!("{:x}", n.unsigned_abs())
}

/// Bounded factorial
///
/// Returns [`Error::InvalidArgument`] for negative input and
/// [`Factorial::TooLarge`] from [`FACTORIAL_LIMIT`] upwards.
pub fn factorial(n: i64) -> Result<Factorial, Error> {
    if n < 0 {
        return Err(Error::InvalidArgument(format!(
            "factorial is undefined for negative numbers (got {n})"
        )));
    }

    if n >= FACTORIAL_LIMIT {
        return Ok(Factorial::TooLarge);
    }

    Ok(Factorial::Exact((1..=n as u64).product()))
}

pub fn is_armstrong(n: i64) -> bool {
    let digits = decimal_digits(n);
    let count = digits.len() as u32;
    let total: u128 = digits.iter().map(|d| u128::from(*d).pow(count)).sum();

    total == u128::from(n.unsigned_abs())
}

/// Perfect number test
///
/// Sums the proper divisors from [`factors`] instead of scanning `1..n`.
pub fn is_perfect_number(n: i64) -> bool {
    is_perfect_from_factors(n, &factors(n))
}

/// Perfect number test over an already computed divisor list of `n`
pub fn is_perfect_from_factors(n: i64, factors: &[u64]) -> bool {
    if n <= 0 {
        return false;
    }

    let divisor_sum: u128 = factors.iter().map(|f| u128::from(*f)).sum();
    divisor_sum - n as u128 == n as u128
}
