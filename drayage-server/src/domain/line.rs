//! Steamship line (SCAC) code type.

use std::fmt;

/// Error returned when parsing an invalid SCAC code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid SCAC code: {reason}")]
pub struct InvalidScac {
    reason: &'static str,
}

/// A valid 4-letter SCAC (Standard Carrier Alpha Code) for a steamship line.
///
/// Ocean carriers use 4-letter SCACs ending in `U` (e.g., "MAEU" for Maersk,
/// "MSCU" for MSC). This type only enforces the 4-uppercase-letter shape;
/// the trailing-`U` convention is not universal enough to reject on.
///
/// # Examples
///
/// ```
/// use drayage_server::domain::ScacCode;
///
/// let maersk = ScacCode::parse("MAEU").unwrap();
/// assert_eq!(maersk.as_str(), "MAEU");
///
/// // Lowercase is folded, not rejected: dispatchers type these by hand
/// assert_eq!(ScacCode::parse("maeu").unwrap(), maersk);
///
/// // Wrong length is rejected
/// assert!(ScacCode::parse("MAE").is_err());
/// assert!(ScacCode::parse("MAEUX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScacCode([u8; 4]);

impl ScacCode {
    /// Parse a SCAC code from a string.
    ///
    /// The input must be exactly 4 ASCII letters; lowercase is uppercased.
    pub fn parse(s: &str) -> Result<Self, InvalidScac> {
        let bytes = s.as_bytes();

        if bytes.len() != 4 {
            return Err(InvalidScac {
                reason: "must be exactly 4 characters",
            });
        }

        let mut stored = [0u8; 4];
        for (i, &b) in bytes.iter().enumerate() {
            if !b.is_ascii_alphabetic() {
                return Err(InvalidScac {
                    reason: "must be ASCII letters A-Z",
                });
            }
            stored[i] = b.to_ascii_uppercase();
        }

        Ok(ScacCode(stored))
    }

    /// Returns the SCAC code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for ScacCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScacCode({})", self.as_str())
    }
}

impl fmt::Display for ScacCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
