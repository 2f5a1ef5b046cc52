//! Container identifier (ISO 6346) type.

use std::fmt;

/// Error returned when parsing an invalid container number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidContainerNumber {
    /// The normalized code was not exactly 11 characters.
    #[error("container number must be 11 characters, got {0}")]
    WrongLength(usize),

    /// The first 4 characters were not all letters.
    #[error("first 4 characters must be letters (owner code and category)")]
    BadOwnerCode,

    /// Characters 5-10 were not all digits.
    #[error("characters 5-10 must be digits (serial number)")]
    BadSerial,

    /// The 11th character was not a digit.
    #[error("character 11 must be a digit (check digit)")]
    BadCheckDigitFormat,

    /// The check digit did not match the computed value.
    #[error("check digit mismatch: expected {expected}, found {found}")]
    CheckDigitMismatch { expected: u8, found: u8 },
}

/// ISO 6346 numeric values for A-Z. Multiples of 11 are skipped
/// per the standard, so the sequence runs 10, 12..21, 23..32, 34..38.
const LETTER_VALUES: [u32; 26] = [
    10, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 34, 35,
    36, 37, 38,
];

/// A valid 11-character ISO 6346 container number.
///
/// The format is a 3-letter owner code, a 1-letter equipment category
/// (almost always `U`), a 6-digit serial number, and a check digit
/// computed from the first 10 characters. This type guarantees that any
/// `ContainerNumber` value passed the full check-digit validation.
///
/// Parsing normalizes first: all whitespace is stripped and letters are
/// uppercased, so codes typed with spacing ("CSQU 305438 3") validate
/// the same as the compact form.
///
/// # Examples
///
/// ```
/// use drayage_server::domain::ContainerNumber;
///
/// let code = ContainerNumber::parse("CSQU3054383").unwrap();
/// assert_eq!(code.as_str(), "CSQU3054383");
///
/// // Whitespace and case are normalized before validation
/// let code = ContainerNumber::parse("csqu 305 4383").unwrap();
/// assert_eq!(code.as_str(), "CSQU3054383");
///
/// // A wrong check digit is rejected
/// assert!(ContainerNumber::parse("CSQU3054380").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerNumber([u8; 11]);

impl ContainerNumber {
    /// Parse a container number from a string.
    ///
    /// The input is normalized (whitespace stripped, uppercased) and then
    /// checked: 4 letters, 6 digits, and a check digit that matches the
    /// ISO 6346 computation over the first 10 characters.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: wrong length, non-letter owner
    /// code, non-digit serial, non-digit check digit, or a check-digit
    /// mismatch (reported with both the expected and found digit).
    pub fn parse(code: &str) -> Result<Self, InvalidContainerNumber> {
        let normalized: String = code
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let char_count = normalized.chars().count();
        if char_count != 11 {
            return Err(InvalidContainerNumber::WrongLength(char_count));
        }

        // Byte-wise checks; any multi-byte character fails its class check,
        // so after these pass the string is exactly 11 ASCII bytes.
        let bytes = normalized.as_bytes();
        if !bytes[..4].iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidContainerNumber::BadOwnerCode);
        }
        if !bytes[4..10].iter().all(u8::is_ascii_digit) {
            return Err(InvalidContainerNumber::BadSerial);
        }
        if !bytes[10].is_ascii_digit() {
            return Err(InvalidContainerNumber::BadCheckDigitFormat);
        }

        // Safe: shape checks above guarantee a 10-char alphanumeric prefix
        let expected = compute_check_digit(&normalized[..10]).unwrap();
        let found = bytes[10] - b'0';
        if expected != found {
            return Err(InvalidContainerNumber::CheckDigitMismatch { expected, found });
        }

        let mut stored = [0u8; 11];
        stored.copy_from_slice(bytes);
        Ok(ContainerNumber(stored))
    }

    /// Returns the full normalized code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII letters and digits
        std::str::from_utf8(&self.0).unwrap()
    }

    /// Returns the 3-letter owner code (e.g. "CSQ").
    pub fn owner_code(&self) -> &str {
        &self.as_str()[..3]
    }

    /// Returns the equipment category letter (the 4th character).
    pub fn category(&self) -> char {
        self.0[3] as char
    }

    /// Returns the 6-digit serial number as a string slice.
    pub fn serial(&self) -> &str {
        &self.as_str()[4..10]
    }

    /// Returns the check digit value (0-9).
    pub fn check_digit(&self) -> u8 {
        self.0[10] - b'0'
    }
}

impl fmt::Debug for ContainerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContainerNumber({})", self.as_str())
    }
}

impl fmt::Display for ContainerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the ISO 6346 check digit for a 10-character prefix
/// (owner code, category letter, and serial).
///
/// Each character maps to its numeric value (digits to themselves,
/// letters per the standard's table), weighted by 2^position, summed,
/// and reduced mod 11; a remainder of 10 maps to 0.
///
/// Returns `None` unless `prefix` is exactly 10 ASCII uppercase letters
/// and digits.
///
/// # Examples
///
/// ```
/// use drayage_server::domain::compute_check_digit;
///
/// assert_eq!(compute_check_digit("CSQU305438"), Some(3));
/// assert_eq!(compute_check_digit("MSCU123456"), Some(6));
/// assert_eq!(compute_check_digit("too short"), None);
/// ```
pub fn compute_check_digit(prefix: &str) -> Option<u8> {
    let bytes = prefix.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    let mut sum: u32 = 0;
    for (i, &b) in bytes.iter().enumerate() {
        sum += char_value(b)? << i;
    }

    let rem = sum % 11;
    Some(if rem == 10 { 0 } else { rem as u8 })
}

fn char_value(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some((b - b'0') as u32),
        b'A'..=b'Z' => Some(LETTER_VALUES[(b - b'A') as usize]),
        _ => None,
    }
}
