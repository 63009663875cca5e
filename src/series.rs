//! Triangular numbers: `1 + 2 + … + n`, three ways.
//!
//! All three take a dynamically typed argument and share the same guard:
//! only a JSON number holding a non-negative integer is accepted (`5.0`
//! counts). Arithmetic is checked, so large `n` is an error instead of a
//! wrapped result.

use crate::error::SumError;
use serde_json::Value;

/// Deepest recursion `sum_to_n_recursive` will attempt.
pub const MAX_RECURSION_DEPTH: u64 = 10_000;

/// Accept `n` if it is a non-negative integer.
pub fn validate(n: &Value) -> Result<u64, SumError> {
    let Value::Number(num) = n else {
        return Err(SumError::NotANumber(n.to_string()));
    };

    if let Some(v) = num.as_u64() {
        return Ok(v);
    }
    if num.as_i64().is_some() {
        return Err(SumError::Negative(num.to_string()));
    }

    let f = num.as_f64().ok_or_else(|| SumError::NotANumber(num.to_string()))?;
    if !f.is_finite() {
        return Err(SumError::NotANumber(num.to_string()));
    }
    if f.fract() != 0.0 {
        return Err(SumError::NotAnInteger(num.to_string()));
    }
    if f < 0.0 {
        return Err(SumError::Negative(num.to_string()));
    }
    if f >= u64::MAX as f64 {
        return Err(SumError::Overflow(u64::MAX));
    }
    Ok(f as u64)
}

/// Loop from 1 to n.
pub fn sum_to_n_iterative(n: &Value) -> Result<u64, SumError> {
    let n = validate(n)?;
    // Overflowing n is rejected before the loop starts.
    triangular(n).ok_or(SumError::Overflow(n))?;
    let mut sum: u64 = 0;
    for i in 1..=n {
        sum = sum.checked_add(i).ok_or(SumError::Overflow(n))?;
    }
    Ok(sum)
}

/// Closed form `n(n+1)/2`.
pub fn sum_to_n_formula(n: &Value) -> Result<u64, SumError> {
    let n = validate(n)?;
    triangular(n).ok_or(SumError::Overflow(n))
}

fn triangular(n: u64) -> Option<u64> {
    // Halve whichever factor is even first so the product overflows only
    // when the result does.
    let (a, b) = if n % 2 == 0 { (n / 2, n + 1) } else { (n, n / 2 + 1) };
    a.checked_mul(b)
}

/// `n + sum(n - 1)`, bounded by [`MAX_RECURSION_DEPTH`].
pub fn sum_to_n_recursive(n: &Value) -> Result<u64, SumError> {
    let n = validate(n)?;
    if n > MAX_RECURSION_DEPTH {
        return Err(SumError::RecursionLimit {
            n,
            limit: MAX_RECURSION_DEPTH,
        });
    }
    Ok(recurse(n))
}

fn recurse(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    // n <= MAX_RECURSION_DEPTH keeps this far from u64::MAX
    n + recurse(n - 1)
}
