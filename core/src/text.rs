use crate::error::QFixedError;
use crate::qfixed::QFixed;
use std::fmt;
use std::str::FromStr;

/// Largest precision `format_decimal` honours.
pub const MAX_PRECISION: usize = 10;

/// Fractional digits rendered by `Display`. Six digits are enough for
/// `parse(to_string(x)) == x` under round-to-nearest parsing.
const DISPLAY_PRECISION: usize = 6;

/// Fractional digits weighed by the parser. Any Q16.16 value is a terminating
/// decimal of at most 16 digits, so digits past this cannot change the result.
const PARSE_FRAC_DIGITS: usize = 20;

impl QFixed {
    /// Parse `[+|-]digits[.digits]`, rounding the fraction to the nearest 1/65536.
    pub fn parse_decimal(text: &str) -> Result<Self, QFixedError> {
        let fail = |reason: &'static str| QFixedError::Parse {
            input: text.to_string(),
            reason,
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(fail("empty input"));
        }
        let (negative, body) = if let Some(rest) = trimmed.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix('+') {
            (false, rest)
        } else {
            (false, trimmed)
        };

        let (int_digits, frac_digits) = body.split_once('.').unwrap_or((body, ""));
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(fail("no digits"));
        }
        if !int_digits
            .bytes()
            .chain(frac_digits.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(fail("unexpected character"));
        }

        // 2^31 is the largest magnitude any value (MIN) can have
        let limit = 1i64 << 31;
        let mut int_value: i64 = 0;
        for b in int_digits.bytes() {
            int_value = int_value * 10 + i64::from(b - b'0');
            if int_value << QFixed::FRAC_BITS > limit {
                return Err(fail("out of range"));
            }
        }

        let (frac_value, scale) = frac_digits
            .bytes()
            .take(PARSE_FRAC_DIGITS)
            .fold((0u128, 1u128), |(value, scale), b| {
                (value * 10 + u128::from(b - b'0'), scale * 10)
            });
        let frac_raw = ((frac_value << QFixed::FRAC_BITS) + scale / 2) / scale;

        let magnitude = (int_value << QFixed::FRAC_BITS) + frac_raw as i64;
        let raw = if negative { -magnitude } else { magnitude };
        i32::try_from(raw)
            .map(QFixed::from_raw)
            .map_err(|_| fail("out of range"))
    }

    /// Sign, integer part and exactly `precision` truncated fractional digits.
    /// `precision` is capped at [`MAX_PRECISION`]; zero omits the point.
    pub fn format_decimal(self, precision: usize) -> String {
        let precision = precision.min(MAX_PRECISION);
        let magnitude = self.to_raw().unsigned_abs();

        let mut out = String::new();
        if self.is_negative() {
            out.push('-');
        }
        out.push_str(&(magnitude >> QFixed::FRAC_BITS).to_string());
        if precision > 0 {
            out.push('.');
            let mut frac = magnitude & QFixed::FRAC_MASK as u32;
            for _ in 0..precision {
                frac *= 10;
                out.push(char::from(b'0' + (frac >> QFixed::FRAC_BITS) as u8));
                frac &= QFixed::FRAC_MASK as u32;
            }
        }
        out
    }
}

impl FromStr for QFixed {
    type Err = QFixedError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse_decimal(text)
    }
}

impl fmt::Display for QFixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.format_decimal(DISPLAY_PRECISION);
        f.pad(s.trim_end_matches('0').trim_end_matches('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers_and_fractions() {
        assert_eq!("3.5".parse::<QFixed>(), Ok(QFixed::from_parts(3, 0x8000)));
        assert_eq!("42".parse::<QFixed>(), Ok(QFixed::from_int(42)));
        assert_eq!(" +0.25 ".parse::<QFixed>(), Ok(QFixed::from_parts(0, 0x4000)));
        assert_eq!(".5".parse::<QFixed>(), Ok(QFixed::HALF));
        assert_eq!("7.".parse::<QFixed>(), Ok(QFixed::from_int(7)));
    }

    #[test]
    fn parses_negative_through_raw_view() {
        assert_eq!("-0.25".parse::<QFixed>(), Ok(QFixed::from_parts(-1, 0xC000)));
        assert_eq!("-1.5".parse::<QFixed>(), Ok(-QFixed::from_parts(1, 0x8000)));
        assert_eq!("-32768".parse::<QFixed>(), Ok(QFixed::MIN));
    }

    #[test]
    fn parse_rounds_to_nearest() {
        assert_eq!("3.14159265".parse::<QFixed>(), Ok(QFixed::PI));
        assert_eq!("2.71828183".parse::<QFixed>(), Ok(QFixed::E));
        assert_eq!("0.00001".parse::<QFixed>(), Ok(QFixed::from_raw(1)));
        assert_eq!("0.000007".parse::<QFixed>(), Ok(QFixed::ZERO));
        assert_eq!(
            "1.000000000000000000000000001".parse::<QFixed>(),
            Ok(QFixed::ONE)
        );
    }

    #[test]
    fn parse_rejects_bad_input() {
        for bad in ["", "   ", "-", ".", "1.2.3", "abc", "1e5", "--1", "0x10"] {
            let err = bad.parse::<QFixed>().unwrap_err();
            assert_eq!(err.code(), "E_PARSE", "input {bad:?}");
        }
        assert!(matches!(
            "32768".parse::<QFixed>(),
            Err(QFixedError::Parse { reason: "out of range", .. })
        ));
        assert!("-32768.5".parse::<QFixed>().is_err());
        assert!("99999999999999999999".parse::<QFixed>().is_err());
        assert_eq!("32767.99998".parse::<QFixed>(), Ok(QFixed::MAX));
    }

    #[test]
    fn format_decimal_truncates() {
        assert_eq!(QFixed::PI.format_decimal(4), "3.1415");
        assert_eq!(QFixed::from_int(5).format_decimal(2), "5.00");
        assert_eq!(QFixed::from_parts(-2, 0x8000).format_decimal(3), "-1.500");
        assert_eq!(QFixed::E.format_decimal(0), "2");
        assert_eq!(QFixed::MIN.format_decimal(1), "-32768.0");
        assert_eq!(QFixed::HALF.format_decimal(99).len(), 2 + MAX_PRECISION);
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(QFixed::from_int(10).to_string(), "10");
        assert_eq!(QFixed::from_parts(3, 0x8000).to_string(), "3.5");
        assert_eq!((-QFixed::HALF).to_string(), "-0.5");
        assert_eq!(QFixed::PI.to_string(), "3.141586");
        assert_eq!(QFixed::ZERO.to_string(), "0");
        assert_eq!(format!("[{:>5}]", QFixed::ONE), "[    1]");
    }

    #[test]
    fn display_parses_back() {
        for raw in [1, -1, 12_345, -98_765, i32::MAX, i32::MIN, 0x7FFF_0001] {
            let x = QFixed::from_raw(raw);
            assert_eq!(x.to_string().parse::<QFixed>(), Ok(x), "raw {raw}");
        }
    }
}
