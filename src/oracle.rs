//! Plaintext ground truth for the operator battery.
//!
//! Pure functions over integer slot vectors; the driver compares every
//! decrypted ciphertext result against these.

use crate::error::HarnessError;
use itertools::izip;

fn check_len(a: &[i64], b: &[i64]) -> Result<(), HarnessError> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(HarnessError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        })
    }
}

/// Element-wise sum.
pub fn add(a: &[i64], b: &[i64]) -> Result<Vec<i64>, HarnessError> {
    check_len(a, b)?;
    Ok(izip!(a, b).map(|(x, y)| x + y).collect())
}

/// Element-wise difference.
pub fn sub(a: &[i64], b: &[i64]) -> Result<Vec<i64>, HarnessError> {
    check_len(a, b)?;
    Ok(izip!(a, b).map(|(x, y)| x - y).collect())
}

/// Element-wise product.
pub fn mul(a: &[i64], b: &[i64]) -> Result<Vec<i64>, HarnessError> {
    check_len(a, b)?;
    Ok(izip!(a, b).map(|(x, y)| x * y).collect())
}

/// Scalar product: sum of element-wise products.
pub fn dot(a: &[i64], b: &[i64]) -> Result<i64, HarnessError> {
    check_len(a, b)?;
    Ok(izip!(a, b).map(|(x, y)| x * y).sum())
}

/// Element-wise integer power, computed as repeated element-wise
/// multiplication rather than a generic exponentiation, matching how the
/// ciphertext side raises powers via repeated homomorphic multiplication.
pub fn pow(a: &[i64], k: u32) -> Result<Vec<i64>, HarnessError> {
    let mut acc = a.to_vec();
    for _ in 1..k {
        acc = mul(&acc, a)?;
    }
    Ok(acc)
}
