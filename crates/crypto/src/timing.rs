//! Constant-time operations for security.

use subtle::{Choice, ConstantTimeEq};

/// Compare two byte slices in constant time.
///
/// Runs in time proportional to `expected.len()` regardless of where or
/// whether the inputs differ. A length mismatch does not return early: it
/// is folded into the result alongside the byte comparison.
///
/// # Arguments
/// * `supplied` - Untrusted value, e.g. a signature from a request
/// * `expected` - Value computed locally
///
/// # Returns
/// true if slices are equal, false otherwise
pub fn constant_time_compare(supplied: &[u8], expected: &[u8]) -> bool {
    let len_eq = (supplied.len() as u64).ct_eq(&(expected.len() as u64));

    let mut bytes_eq = Choice::from(1u8);
    for (i, byte) in expected.iter().enumerate() {
        let other = supplied.get(i).copied().unwrap_or(!*byte);
        bytes_eq &= other.ct_eq(byte);
    }

    (len_eq & bytes_eq).into()
}
