// 🔢 CNPJ - 14-digit company identifier
// 12-digit base followed by 2 check digits (two-pass weighted modulo 11)
//
// Layout of the formatted value:
//
//   11.222.333/0001-81
//   └─┬──────┘ └┬─┘ └┤
//    root    branch  check digits
//
// The value is kept as a plain integer. Whether the check digits must be
// correct is decided at construction time by `Validation`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DIGITS: usize = 14;
const WEIGHTS_FIRST: [u64; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const WEIGHTS_SECOND: [u64; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

// ============================================================================
// VALIDATION MODE
// ============================================================================

/// How strictly a CNPJ is checked when it is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validation {
    /// Check digits must match, otherwise construction fails
    Strict,

    /// Any value is admitted (synthetic and test data)
    #[default]
    Permissive,
}

// ============================================================================
// CHECKSUM
// ============================================================================

/// Split a value into 14 decimal digits, most significant first.
/// Shorter values come out left-padded with zeros.
fn digits(value: u64) -> [u64; DIGITS] {
    let mut digits = [0; DIGITS];
    let mut rest = value;
    for slot in digits.iter_mut().rev() {
        *slot = rest % 10;
        rest /= 10;
    }
    digits
}

fn check_digit(digits: &[u64], weights: &[u64]) -> u64 {
    let sum: u64 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let check = 11 - sum % 11;
    if check >= 10 {
        0
    } else {
        check
    }
}

/// Check both verification digits of a 14-digit value
pub fn validate(value: u64) -> bool {
    if value > Cnpj::MAX {
        return false;
    }

    let d = digits(value);
    if check_digit(&d[..12], &WEIGHTS_FIRST) != d[12] {
        return false;
    }
    check_digit(&d[..13], &WEIGHTS_SECOND) == d[13]
}

/// Compute the two check digits for a 12-digit base
pub fn compute_check_digits(base: u64) -> Result<(u8, u8)> {
    if base > Cnpj::MAX_BASE {
        return Err(Error::format(base.to_string(), "base exceeds 12 digits"));
    }

    let mut d = digits(base * 100);
    let first = check_digit(&d[..12], &WEIGHTS_FIRST);
    d[12] = first;
    let second = check_digit(&d[..13], &WEIGHTS_SECOND);

    Ok((first as u8, second as u8))
}

/// Accumulate every ASCII digit of `text`, left to right, skipping the rest.
///
/// Text without digits yields zero. Values that grow past 14 significant
/// digits are rejected instead of wrapping.
pub fn parse_digits(text: &str) -> Result<u64> {
    text.chars()
        .filter_map(|c| c.to_digit(10))
        .try_fold(0u64, |acc, digit| {
            acc.checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(digit)))
                .filter(|v| *v <= Cnpj::MAX)
                .ok_or_else(|| Error::format(text, "more than 14 significant digits"))
        })
}

// ============================================================================
// CNPJ
// ============================================================================

/// A CNPJ number. Equality and ordering follow the numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Cnpj(u64);

impl Cnpj {
    /// Largest 14-digit value
    pub const MAX: u64 = 99_999_999_999_999;

    /// Largest 12-digit base
    pub const MAX_BASE: u64 = 999_999_999_999;

    /// Strict construction: fails unless the check digits match
    pub fn new(value: u64) -> Result<Self> {
        Self::with_validation(value, Validation::Strict)
    }

    /// Raw construction: no range or checksum check at all
    pub const fn new_unchecked(value: u64) -> Self {
        Cnpj(value)
    }

    /// Values above `Cnpj::MAX` are rejected in both modes; only strict mode
    /// looks at the check digits.
    pub fn with_validation(value: u64, mode: Validation) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::format(value.to_string(), "more than 14 significant digits"));
        }

        let cnpj = Cnpj(value);
        match mode {
            Validation::Strict if !cnpj.is_valid() => Err(Error::InvalidIdentifier(cnpj)),
            _ => Ok(cnpj),
        }
    }

    /// Parse free-form text such as `"11.222.333/0001-81"`.
    ///
    /// Only digits are consumed; separators and any other characters are
    /// ignored, so `"11222333000181"` and `"CNPJ: 11 222 333 0001 81"` parse
    /// to the same value.
    pub fn parse(text: &str, mode: Validation) -> Result<Self> {
        let value = parse_digits(text)?;
        Self::with_validation(value, mode)
    }

    /// Build a valid CNPJ from its 12-digit base
    pub fn from_base(base: u64) -> Result<Self> {
        let (first, second) = compute_check_digits(base)?;
        Ok(Cnpj(base * 100 + u64::from(first) * 10 + u64::from(second)))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        validate(self.0)
    }

    /// Render as `XX.XXX.XXX/XXXX-XX`. Does not validate.
    pub fn formatted(&self) -> String {
        let n = self.0;
        format!(
            "{:02}.{:03}.{:03}/{:04}-{:02}",
            n / 1_000_000_000_000,
            (n / 1_000_000_000) % 1000,
            (n / 1_000_000) % 1000,
            (n / 100) % 10000,
            n % 100
        )
    }

    /// Leading two digits
    pub fn region(&self) -> u64 {
        self.0 / 1_000_000_000_000
    }

    /// First eight digits, shared by every branch of a company
    pub fn root(&self) -> u64 {
        self.0 / 1_000_000
    }

    /// Branch number (0001 is the head office)
    pub fn branch(&self) -> u16 {
        ((self.0 / 100) % 10000) as u16
    }

    pub fn check_digits(&self) -> u8 {
        (self.0 % 100) as u8
    }

    pub fn last_digit(&self) -> u8 {
        (self.0 % 10) as u8
    }

    /// True when both numbers belong to the same company (same root)
    pub fn same_company(&self, other: &Cnpj) -> bool {
        self.root() == other.root()
    }

    /// Shift the raw value by `delta`.
    ///
    /// Arithmetic only exists in permissive mode: the result is never
    /// checked against the checksum, only against the 14-digit range.
    pub fn offset(self, delta: i64) -> Result<Self> {
        let shifted = self
            .0
            .checked_add_signed(delta)
            .filter(|v| *v <= Self::MAX)
            .ok_or_else(|| {
                Error::format(
                    format!("{} {:+}", self.0, delta),
                    "offset leaves the 14-digit range",
                )
            })?;

        Self::with_validation(shifted, Validation::Permissive)
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl TryFrom<u64> for Cnpj {
    type Error = Error;

    /// Permissive, range-checked
    fn try_from(value: u64) -> Result<Self> {
        Cnpj::with_validation(value, Validation::Permissive)
    }
}

impl From<Cnpj> for u64 {
    fn from(cnpj: Cnpj) -> u64 {
        cnpj.0
    }
}

impl FromStr for Cnpj {
    type Err = Error;

    /// Strict parse
    fn from_str(s: &str) -> Result<Self> {
        Cnpj::parse(s, Validation::Strict)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: u64 = 11_222_333_000_181;
    const INVALID: u64 = 11_222_333_000_182;

    #[test]
    fn test_known_vectors() {
        assert!(validate(VALID));
        assert!(!validate(INVALID));
    }

    #[test]
    fn test_first_check_digit_mismatch() {
        // Second digit would still be computed from a wrong first digit
        assert!(!validate(11_222_333_000_171));
    }

    #[test]
    fn test_value_above_max_is_invalid() {
        assert!(!validate(Cnpj::MAX + 1));
        assert!(!validate(u64::MAX));
    }

    #[test]
    fn test_compute_check_digits() {
        assert_eq!(compute_check_digits(112_223_330_001).unwrap(), (8, 1));
    }

    #[test]
    fn test_compute_check_digits_rejects_long_base() {
        let err = compute_check_digits(Cnpj::MAX_BASE + 1).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn test_from_base_matches_known_vector() {
        let cnpj = Cnpj::from_base(112_223_330_001).unwrap();
        assert_eq!(cnpj.value(), VALID);
        assert!(cnpj.is_valid());
    }

    #[test]
    fn test_from_base_always_valid() {
        for base in (0..Cnpj::MAX_BASE).step_by(7_919_191_919) {
            let cnpj = Cnpj::from_base(base).unwrap();
            assert!(cnpj.is_valid(), "{} should be valid", cnpj);

            // Any other final digit breaks the checksum
            let last = cnpj.value() % 10;
            let wrong = cnpj.value() - last + (last + 1) % 10;
            assert!(!validate(wrong), "{} should be invalid", wrong);
        }
    }

    #[test]
    fn test_short_value_is_zero_padded() {
        // Fewer than 14 significant digits behave as if left-padded
        assert!(validate(0));
        assert!(validate(Cnpj::from_base(1).unwrap().value()));
        assert_eq!(Cnpj::new_unchecked(1_234).formatted(), "00.000.000/0012-34");
    }

    #[test]
    fn test_formatted() {
        let cnpj = Cnpj::new(VALID).unwrap();
        assert_eq!(cnpj.formatted(), "11.222.333/0001-81");
        assert_eq!(cnpj.to_string(), "11.222.333/0001-81");
    }

    #[test]
    fn test_parse_formatted_text() {
        let cnpj = Cnpj::parse("11.222.333/0001-81", Validation::Strict).unwrap();
        assert_eq!(cnpj.value(), VALID);
    }

    #[test]
    fn test_parse_ignores_arbitrary_characters() {
        let cnpj = Cnpj::parse("CNPJ: 11 222 333 / 0001 - 81 (matriz)", Validation::Strict).unwrap();
        assert_eq!(cnpj.value(), VALID);
    }

    #[test]
    fn test_parse_strict_rejects_bad_checksum() {
        let err = Cnpj::parse("11.222.333/0001-82", Validation::Strict).unwrap_err();
        match err {
            Error::InvalidIdentifier(cnpj) => assert_eq!(cnpj.value(), INVALID),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_permissive_accepts_bad_checksum() {
        let cnpj = Cnpj::parse("11.222.333/0001-82", Validation::Permissive).unwrap();
        assert_eq!(cnpj.value(), INVALID);
        assert!(!cnpj.is_valid());
    }

    #[test]
    fn test_parse_without_digits_is_zero() {
        let cnpj = Cnpj::parse("no digits here", Validation::Permissive).unwrap();
        assert_eq!(cnpj.value(), 0);
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let err = Cnpj::parse("111.222.333/0001-81", Validation::Permissive).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));

        let err = parse_digits("99999999999999999999999").unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn test_parse_leading_zeros_do_not_count() {
        assert_eq!(parse_digits("0000-11.222.333/0001-81").unwrap(), VALID);
    }

    #[test]
    fn test_format_parse_round_trip() {
        for value in [VALID, INVALID, 22_333_444_000_192, 1_234_567_000_101, Cnpj::MAX] {
            let cnpj = Cnpj::new_unchecked(value);
            let back = Cnpj::parse(&cnpj.formatted(), Validation::Permissive).unwrap();
            assert_eq!(back, cnpj);
            assert_eq!(back.is_valid(), cnpj.is_valid());
        }
    }

    #[test]
    fn test_strict_and_permissive_construction() {
        assert!(Cnpj::new(VALID).is_ok());
        assert!(matches!(Cnpj::new(INVALID), Err(Error::InvalidIdentifier(_))));
        assert!(Cnpj::with_validation(INVALID, Validation::Permissive).is_ok());
    }

    #[test]
    fn test_construction_rejects_more_than_14_digits() {
        for mode in [Validation::Permissive, Validation::Strict] {
            assert!(matches!(
                Cnpj::with_validation(123_456_789_012_345_678, mode),
                Err(Error::Format { .. })
            ));
            assert!(matches!(
                Cnpj::with_validation(Cnpj::MAX + 1, mode),
                Err(Error::Format { .. })
            ));
        }
        assert!(Cnpj::with_validation(Cnpj::MAX, Validation::Permissive).is_ok());
        assert!(Cnpj::try_from(Cnpj::MAX + 1).is_err());
    }

    #[test]
    fn test_from_str_is_strict() {
        let cnpj: Cnpj = "11.222.333/0001-81".parse().unwrap();
        assert_eq!(cnpj.value(), VALID);
        assert!("11.222.333/0001-82".parse::<Cnpj>().is_err());
    }

    #[test]
    fn test_components() {
        let cnpj = Cnpj::new(VALID).unwrap();
        assert_eq!(cnpj.region(), 11);
        assert_eq!(cnpj.root(), 11_222_333);
        assert_eq!(cnpj.branch(), 1);
        assert_eq!(cnpj.check_digits(), 81);
        assert_eq!(cnpj.last_digit(), 1);
    }

    #[test]
    fn test_same_company() {
        let head_office = Cnpj::new(VALID).unwrap();
        let branch = Cnpj::from_base(112_223_330_002).unwrap();
        let other = Cnpj::from_base(223_334_440_001).unwrap();

        assert_eq!(branch.branch(), 2);
        assert!(head_office.same_company(&branch));
        assert!(!head_office.same_company(&other));
    }

    #[test]
    fn test_offset_permissive() {
        let cnpj = Cnpj::new(VALID).unwrap();
        let shifted = cnpj.offset(10).unwrap();
        assert_eq!(shifted.value(), VALID + 10);
        assert!(!shifted.is_valid());

        let back = shifted.offset(-10).unwrap();
        assert_eq!(back, cnpj);
    }

    #[test]
    fn test_offset_never_checks_checksum() {
        // Leaving a valid number is fine, and so is landing on one
        let broken = Cnpj::new(VALID).unwrap().offset(1).unwrap();
        assert_eq!(broken.value(), INVALID);

        let fixed = broken.offset(-1).unwrap();
        assert_eq!(fixed.value(), VALID);
        assert!(fixed.is_valid());
    }

    #[test]
    fn test_offset_out_of_range() {
        assert!(matches!(
            Cnpj::new_unchecked(5).offset(-10),
            Err(Error::Format { .. })
        ));
        assert!(matches!(
            Cnpj::new_unchecked(Cnpj::MAX).offset(1),
            Err(Error::Format { .. })
        ));
    }

    #[test]
    fn test_ordering_follows_value() {
        let a = Cnpj::new_unchecked(VALID);
        let b = Cnpj::new_unchecked(22_333_444_000_192);
        assert!(a < b);
        assert_eq!(a, Cnpj::new_unchecked(VALID));
    }

    #[test]
    fn test_serializes_as_number() {
        let cnpj = Cnpj::new(VALID).unwrap();
        assert_eq!(serde_json::to_string(&cnpj).unwrap(), "11222333000181");

        let back: Cnpj = serde_json::from_str("11222333000181").unwrap();
        assert_eq!(back, cnpj);
        assert_eq!(u64::from(back), VALID);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Cnpj>("123456789012345678").is_err());
        assert!(serde_json::from_str::<Cnpj>("100000000000000").is_err());

        // Permissive: a bad checksum still deserializes
        let cnpj: Cnpj = serde_json::from_str("11222333000182").unwrap();
        assert!(!cnpj.is_valid());
    }

    #[test]
    fn test_validation_mode_names() {
        let mode: Validation = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(mode, Validation::Strict);
        assert_eq!(Validation::default(), Validation::Permissive);
    }
}
