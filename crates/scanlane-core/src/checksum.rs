//! # Modulo Check
//!
//! UPC-A check digit over the first eleven digits of a numeric code.
//!
//! ```text
//!   index:   0  1  2  3  4  5  6  7  8  9  10 | 11
//!   weight:  3  1  3  1  3  1  3  1  3  1  3  | check
//!
//!   total    = 3 × Σ(even indices) + Σ(odd indices)
//!   expected = (10 − total mod 10) mod 10
//! ```
//!
//! The outer `mod 10` maps a zero remainder to check digit 0 rather than 10.

use crate::codec::CODE_LENGTH;
use crate::error::{BarcodeError, BarcodeResult};
use crate::validation::validate_numeric_code;

/// Digits covered by the check digit.
const PAYLOAD_LENGTH: usize = CODE_LENGTH - 1;

/// Computes the expected check digit.
///
/// Accepts either the 11-digit payload or a full 12-digit code (the last digit
/// is ignored).
///
/// ## Example
/// ```rust
/// use scanlane_core::checksum::check_digit;
///
/// assert_eq!(check_digit("03600029145").unwrap(), 2);
/// assert_eq!(check_digit("036000291452").unwrap(), 2);
/// ```
pub fn check_digit(code: &str) -> BarcodeResult<u8> {
    let valid_len = code.len() == PAYLOAD_LENGTH || code.len() == CODE_LENGTH;
    if !valid_len || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BarcodeError::invalid_code(code));
    }

    let total: u32 = code
        .bytes()
        .take(PAYLOAD_LENGTH)
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 {
                digit * 3
            } else {
                digit
            }
        })
        .sum();

    Ok(((10 - total % 10) % 10) as u8)
}

/// Verifies the check digit of a 12-digit code.
///
/// ## Errors
/// - `InvalidCode` if the input is not 12 decimal digits
/// - `ChecksumMismatch` if the last digit is wrong
pub fn verify_checksum(code: &str) -> BarcodeResult<()> {
    validate_numeric_code(code)?;

    let expected = check_digit(code)?;
    let found = code.as_bytes()[PAYLOAD_LENGTH] - b'0';
    if expected != found {
        return Err(BarcodeError::ChecksumMismatch { expected, found });
    }
    Ok(())
}

/// Appends the check digit to an 11-digit payload.
pub fn complete_code(payload: &str) -> BarcodeResult<String> {
    if payload.len() != PAYLOAD_LENGTH {
        return Err(BarcodeError::invalid_code(payload));
    }
    let digit = check_digit(payload)?;
    Ok(format!("{payload}{digit}"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_good_codes() {
        for code in [
            "252109613999",
            "012345678905",
            "036000291452",
            "257274767454",
            "149234073227",
        ] {
            assert!(verify_checksum(code).is_ok(), "{code} should verify");
        }
    }

    #[test]
    fn test_known_bad_code() {
        assert_eq!(check_digit("03600029143").unwrap(), 8);
        assert_eq!(
            verify_checksum("036000291439"),
            Err(BarcodeError::ChecksumMismatch {
                expected: 8,
                found: 9
            })
        );
    }

    #[test]
    fn test_zero_remainder_yields_zero() {
        // 3 × 0 + 0 = 0 → check digit 0, not 10
        assert_eq!(check_digit("00000000000").unwrap(), 0);
        assert!(verify_checksum("000000000000").is_ok());
    }

    #[test]
    fn test_formula_matches_constructed_codes() {
        for payload in ["04011200000", "21345678901", "11234500001", "99999999999"] {
            let code = complete_code(payload).unwrap();
            let digits: Vec<u32> = code.bytes().map(|b| u32::from(b - b'0')).collect();
            let odd_sum: u32 = digits[..11].iter().step_by(2).sum();
            let even_sum: u32 = digits[1..11].iter().step_by(2).sum();
            assert_eq!((10 - (3 * odd_sum + even_sum) % 10) % 10, digits[11]);
            assert!(verify_checksum(&code).is_ok());
        }
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            verify_checksum("12345"),
            Err(BarcodeError::InvalidCode { .. })
        ));
        assert!(matches!(
            check_digit("0360002914x"),
            Err(BarcodeError::InvalidCode { .. })
        ));
        assert!(complete_code("036000291452").is_err());
    }
}
