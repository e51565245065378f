//! Random SQL literal generation driven by parsed column types.
//!
//! [`ValueSynthesizer`] owns an injectable random source so tests (and the
//! `--seed` flag) get reproducible output. Literals come back as SQL text,
//! already quoted where the column type needs it.

use crate::schema::{parse_type_spec, BaseType, TypeSpec};
use chrono::{Duration, Local, NaiveDate};
use rand::Rng;

/// Emitted for unparsable or unsupported column types
pub const UNKNOWN_LITERAL: &str = "'Unknown'";

/// Emitted for DECIMAL(M,D) with D > M
pub const DEGENERATE_DECIMAL_LITERAL: &str = "'0.0'";

const ASCII_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length range for CHAR/VARCHAR without a declared length
const DEFAULT_STRING_LEN: std::ops::RangeInclusive<usize> = 5..=20;

/// Digits generated for a bare DECIMAL, i.e. DECIMAL(10,0)
const DEFAULT_DECIMAL_DIGITS: u32 = 10;

const DEFAULT_FLOAT_SCALE: u32 = 2;

/// Width of the DATE and DATETIME windows
const DATE_SPAN_DAYS: i64 = 365 * 5;

/// Generates literals for column types
pub struct ValueSynthesizer<R: Rng> {
    rng: R,
    today: NaiveDate,
}

impl<R: Rng> ValueSynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            today: Local::now().date_naive(),
        }
    }

    /// Pin the date DATETIME values are generated around
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Generate a literal for a raw type string.
    ///
    /// A type string that cannot be parsed yields [`UNKNOWN_LITERAL`].
    pub fn generate(&mut self, raw_type: &str) -> String {
        match parse_type_spec(raw_type) {
            Ok(spec) => self.generate_for(&spec),
            Err(e) => {
                tracing::trace!(error = %e, "type parse failed, using sentinel");
                UNKNOWN_LITERAL.to_string()
            }
        }
    }

    /// Generate a literal for an already parsed type
    pub fn generate_for(&mut self, spec: &TypeSpec) -> String {
        match &spec.base_type {
            BaseType::Char | BaseType::Varchar => {
                let len = spec
                    .length
                    .filter(|&n| n > 0)
                    .map(|n| n as usize)
                    .unwrap_or_else(|| self.rng.random_range(DEFAULT_STRING_LEN));
                format!("'{}'", self.letters(len))
            }
            BaseType::Int | BaseType::Integer => self.rng.random_range(1..=1000u32).to_string(),
            BaseType::BigInt => self.rng.random_range(1..=1_000_000_000u64).to_string(),
            BaseType::Bit => self.rng.random_range(0..=1u8).to_string(),
            BaseType::Decimal => self.decimal(spec.length, spec.precision),
            BaseType::Float | BaseType::Double => {
                let scale = spec
                    .precision
                    .filter(|&p| p > 0)
                    .unwrap_or(DEFAULT_FLOAT_SCALE) as usize;
                let value: f64 = self.rng.random_range(0.0..1000.0);
                format!("{:.*}", scale, value)
            }
            BaseType::Date => {
                let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();
                format!("'{}'", self.date_from(start))
            }
            BaseType::DateTime => {
                let start = self.today - Duration::days(DATE_SPAN_DAYS);
                format!("'{}'", self.date_from(start))
            }
            BaseType::Boolean => {
                if self.rng.random_bool(0.5) {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
            BaseType::Unknown(_) => UNKNOWN_LITERAL.to_string(),
        }
    }

    /// DECIMAL(M,D): at most M-D integer digits and a random 0..=D
    /// fractional digits. No decimal point when no fractional digits
    /// are drawn.
    fn decimal(&mut self, length: Option<u32>, precision: Option<u32>) -> String {
        let Some(total) = length.filter(|&m| m > 0) else {
            return self.integer_with_digits(DEFAULT_DECIMAL_DIGITS);
        };
        let scale = precision.unwrap_or(0);
        if scale > total {
            return DEGENERATE_DECIMAL_LITERAL.to_string();
        }

        let integer_part = self.integer_with_digits(total - scale);
        if scale == 0 {
            return integer_part;
        }

        let fraction_len = self.rng.random_range(0..=scale);
        if fraction_len == 0 {
            return integer_part;
        }

        format!("{}.{}", integer_part, self.digits(fraction_len))
    }

    /// Uniform integer in [0, 10^n - 1] rendered without leading zeros
    fn integer_with_digits(&mut self, n: u32) -> String {
        let digits = self.digits(n);
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    fn digits(&mut self, n: u32) -> String {
        (0..n)
            .map(|_| char::from(b'0' + self.rng.random_range(0..10u8)))
            .collect()
    }

    fn letters(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(ASCII_LETTERS[self.rng.random_range(0..ASCII_LETTERS.len())]))
            .collect()
    }

    fn date_from(&mut self, start: NaiveDate) -> String {
        let offset = self.rng.random_range(0..=DATE_SPAN_DAYS);
        (start + Duration::days(offset))
            .format("%Y-%m-%d")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn synth(seed: u64) -> ValueSynthesizer<StdRng> {
        ValueSynthesizer::new(StdRng::seed_from_u64(seed))
            .with_today(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
    }

    fn unquote(literal: &str) -> &str {
        literal
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .expect("quoted literal")
    }

    #[test]
    fn test_same_seed_same_values() {
        let mut a = synth(7);
        let mut b = synth(7);
        for raw in ["INT", "VARCHAR(12)", "DECIMAL(8,3)", "DATE", "BOOLEAN", "FLOAT"] {
            assert_eq!(a.generate(raw), b.generate(raw));
        }
    }

    #[test]
    fn test_varchar_declared_length() {
        let mut s = synth(1);
        for _ in 0..50 {
            let v = s.generate("VARCHAR(12)");
            let inner = unquote(&v);
            assert_eq!(inner.len(), 12);
            assert!(inner.chars().all(|c| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_char_without_length_is_5_to_20() {
        let mut s = synth(2);
        for _ in 0..100 {
            let v = s.generate("CHAR");
            let len = unquote(&v).len();
            assert!((5..=20).contains(&len), "len {}", len);
        }
    }

    #[test]
    fn test_integer_ranges() {
        let mut s = synth(3);
        for _ in 0..200 {
            let n: u32 = s.generate("INT").parse().unwrap();
            assert!((1..=1000).contains(&n));
            let n: u64 = s.generate("BIGINT NOT NULL").parse().unwrap();
            assert!((1..=1_000_000_000).contains(&n));
            let bit = s.generate("BIT");
            assert!(bit == "0" || bit == "1");
        }
    }

    #[test]
    fn test_decimal_digit_budget() {
        let mut s = synth(4);
        for _ in 0..500 {
            let v = s.generate("DECIMAL(5,2)");
            let (int_part, frac) = match v.split_once('.') {
                Some((i, f)) => (i, f),
                None => (v.as_str(), ""),
            };
            assert!(int_part.len() <= 3, "{}", v);
            assert!(frac.len() <= 2, "{}", v);
            assert!(int_part.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_decimal_zero_scale_has_no_point() {
        let mut s = synth(5);
        for _ in 0..100 {
            let v = s.generate("DECIMAL(4,0)");
            assert!(!v.contains('.'));
            assert!(v.parse::<u32>().unwrap() <= 9999);
            let v = s.generate("DECIMAL(4)");
            assert!(!v.contains('.'));
        }
    }

    #[test]
    fn test_decimal_all_fractional() {
        let mut s = synth(6);
        for _ in 0..100 {
            let v = s.generate("DECIMAL(3,3)");
            assert!(v == "0" || v.starts_with("0."), "{}", v);
        }
    }

    #[test]
    fn test_decimal_degenerate_and_default() {
        let mut s = synth(8);
        assert_eq!(s.generate("DECIMAL(2,5)"), DEGENERATE_DECIMAL_LITERAL);
        for _ in 0..50 {
            let v = s.generate("DECIMAL");
            assert!(v.len() <= 10);
            assert!(v.parse::<u64>().unwrap() <= 9_999_999_999);
        }
    }

    #[test]
    fn test_decimal_wide_digit_budget() {
        let mut s = synth(9);
        let v = s.generate("DECIMAL(65,0)");
        assert!(v.len() <= 65);
        assert!(v.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_float_scale() {
        let mut s = synth(10);
        for _ in 0..50 {
            let v = s.generate("DOUBLE");
            let (_, frac) = v.split_once('.').unwrap();
            assert_eq!(frac.len(), 2);
            let v = s.generate("FLOAT(10,4)");
            let (int_part, frac) = v.split_once('.').unwrap();
            assert_eq!(frac.len(), 4);
            assert!(int_part.parse::<u32>().unwrap() <= 1000);
        }
    }

    #[test]
    fn test_dates() {
        let mut s = synth(11);
        let epoch = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let today = s.today();
        for _ in 0..100 {
            let v = s.generate("DATE");
            let d = NaiveDate::parse_from_str(unquote(&v), "%Y-%m-%d").unwrap();
            assert!(d >= epoch && d <= epoch + Duration::days(DATE_SPAN_DAYS));

            let v = s.generate("DATETIME");
            let d = NaiveDate::parse_from_str(unquote(&v), "%Y-%m-%d").unwrap();
            assert!(d >= today - Duration::days(DATE_SPAN_DAYS) && d <= today);
        }
    }

    #[test]
    fn test_boolean() {
        let mut s = synth(12);
        let values: Vec<_> = (0..50).map(|_| s.generate("BOOLEAN")).collect();
        assert!(values.iter().all(|v| v == "TRUE" || v == "FALSE"));
        assert!(values.iter().any(|v| v == "TRUE"));
        assert!(values.iter().any(|v| v == "FALSE"));
    }

    #[test]
    fn test_unknown_and_unparsable_types() {
        let mut s = synth(13);
        assert_eq!(s.generate("GEOMETRY"), UNKNOWN_LITERAL);
        assert_eq!(s.generate("(5,2)"), UNKNOWN_LITERAL);
        assert_eq!(s.generate(""), UNKNOWN_LITERAL);
    }
}
