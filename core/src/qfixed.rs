use crate::error::QFixedError;
use crate::signals::{FaultContext, Signal, SignalSink};
use std::fmt;
use tracing::trace;

/// Q16.16 fixed-point value, raw_value = value * 2^16
///
/// The value is held as one two's-complement `i32`. The split layout used by
/// 16-bit targets (`integer: i16`, `frac: u16`) is derived on demand and always
/// satisfies `raw == (integer << 16) | frac`; for negative values the fraction
/// is *not* a signed magnitude, e.g. -0.25 is `{ integer: -1, frac: 0xC000 }`.
///
/// Ordering is the ordering of the raw value, which is the same as comparing
/// `integer` first and `frac` second.
#[repr(transparent)]
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct QFixed {
    raw: i32,
}

impl QFixed {
    pub const FRAC_BITS: u32 = 16;
    pub const FRAC_MASK: i32 = 0xFFFF;
    pub const ONE_RAW: i32 = 1 << Self::FRAC_BITS;

    pub const ZERO: QFixed = QFixed::from_parts(0, 0);
    pub const ONE: QFixed = QFixed::from_parts(1, 0);
    pub const HALF: QFixed = QFixed::from_parts(0, 0x8000);
    pub const TWO: QFixed = QFixed::from_parts(2, 0);
    pub const NEG_ONE: QFixed = QFixed::from_parts(-1, 0);

    /// 3.14159265
    pub const PI: QFixed = QFixed::from_parts(3, 0x243F);
    /// 2.71828183
    pub const E: QFixed = QFixed::from_parts(2, 0xB7E1);
    /// 1.41421356
    pub const SQRT2: QFixed = QFixed::from_parts(1, 0x6A09);
    pub const PI_HALF: QFixed = QFixed::from_parts(1, 0x921F);
    /// Exactly twice `PI` in raw units.
    pub const TWO_PI: QFixed = QFixed::from_parts(6, 0x487E);

    pub const MIN: QFixed = QFixed { raw: i32::MIN };
    pub const MAX: QFixed = QFixed { raw: i32::MAX };

    /// Legacy result of a division (or reciprocal) by zero: `{0x7FFF, 0xFFFF}`,
    /// positive whatever the operand signs.
    pub const OVERFLOW_SENTINEL: QFixed = QFixed::MAX;

    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self { raw }
    }

    #[inline]
    pub const fn to_raw(self) -> i32 {
        self.raw
    }

    #[inline]
    pub const fn from_parts(integer: i16, frac: u16) -> Self {
        Self {
            raw: ((integer as i32) << Self::FRAC_BITS) | frac as i32,
        }
    }

    #[inline]
    pub const fn integer_part(self) -> i16 {
        (self.raw >> Self::FRAC_BITS) as i16
    }

    #[inline]
    pub const fn frac_part(self) -> u16 {
        (self.raw & Self::FRAC_MASK) as u16
    }

    #[inline]
    pub const fn from_int(value: i16) -> Self {
        Self::from_parts(value, 0)
    }

    /// Integer part; rounds toward negative infinity.
    #[inline]
    pub const fn to_int(self) -> i16 {
        self.integer_part()
    }

    /// Integer part, plus one when the fraction is at least one half.
    #[inline]
    pub const fn to_int_round(self) -> i16 {
        if self.frac_part() >= 0x8000 {
            self.integer_part().wrapping_add(1)
        } else {
            self.integer_part()
        }
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.raw == 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.raw < 0
    }

    /// Fraction sum with carry into the integer half; the integer half wraps.
    #[inline]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_add(rhs.raw))
    }

    /// Fraction difference with borrow from the integer half; the integer half wraps.
    #[inline]
    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_sub(rhs.raw))
    }

    /// Two's-complement negation of the raw view. `MIN` negates to itself.
    #[inline]
    pub const fn wrapping_neg(self) -> Self {
        Self::from_raw(self.raw.wrapping_neg())
    }

    #[inline]
    pub const fn abs(self) -> Self {
        if self.is_negative() {
            self.wrapping_neg()
        } else {
            self
        }
    }

    /// Product of the magnitudes, truncated toward zero, with the sign applied
    /// last. Bits above the 32-bit result are dropped.
    #[inline]
    pub const fn wrapping_mul(self, rhs: Self) -> Self {
        let negative = self.is_negative() != rhs.is_negative();
        let product = (self.raw.unsigned_abs() as u64) * (rhs.raw.unsigned_abs() as u64);
        let magnitude = (product >> Self::FRAC_BITS) as u32;
        Self::from_raw(magnitude as i32).with_sign(negative)
    }

    pub fn checked_div(self, rhs: Self) -> Result<Self, QFixedError> {
        if rhs.is_zero() {
            return Err(QFixedError::DivisionByZero);
        }
        Ok(div_magnitudes(self, rhs))
    }

    /// Division with the legacy contract: a zero divisor yields
    /// [`QFixed::OVERFLOW_SENTINEL`].
    pub fn div_or_sentinel(self, rhs: Self) -> Self {
        match self.checked_div(rhs) {
            Ok(quotient) => quotient,
            Err(_) => {
                trace!(dividend = self.raw, "division by zero, returning sentinel");
                Self::OVERFLOW_SENTINEL
            }
        }
    }

    /// `self <- self / rhs`. On a zero divisor the assignment is dropped and an
    /// arithmetic fault is emitted instead.
    pub fn div_assign_det(&mut self, rhs: Self, ctx: FaultContext, sink: &mut dyn SignalSink) {
        match self.checked_div(rhs) {
            Ok(quotient) => *self = quotient,
            Err(err) => {
                if let Some(kind) = err.fault_kind() {
                    sink.emit(Signal::ArithmeticFault { ctx, kind });
                }
            }
        }
    }

    #[inline]
    pub(crate) const fn halve(self) -> Self {
        Self::from_raw(self.raw >> 1)
    }

    #[inline]
    const fn with_sign(self, negative: bool) -> Self {
        if negative {
            self.wrapping_neg()
        } else {
            self
        }
    }
}

fn div_magnitudes(dividend: QFixed, divisor: QFixed) -> QFixed {
    let negative = dividend.is_negative() != divisor.is_negative();
    let dividend_mag = dividend.raw.unsigned_abs();
    let divisor_mag = divisor.raw.unsigned_abs();

    let quotient_high = dividend_mag / divisor_mag;
    let remainder = dividend_mag % divisor_mag;
    // remainder < divisor, so quotient_low fits in the low 16 bits
    let quotient_low = ((remainder as u64) << QFixed::FRAC_BITS) / divisor_mag as u64;

    let combined = (quotient_high << QFixed::FRAC_BITS) | quotient_low as u32;
    QFixed::from_raw(combined as i32).with_sign(negative)
}

impl core::ops::Add for QFixed {
    type Output = QFixed;
    #[inline]
    fn add(self, rhs: QFixed) -> QFixed {
        self.wrapping_add(rhs)
    }
}

impl core::ops::Sub for QFixed {
    type Output = QFixed;
    #[inline]
    fn sub(self, rhs: QFixed) -> QFixed {
        self.wrapping_sub(rhs)
    }
}

impl core::ops::Mul for QFixed {
    type Output = QFixed;
    #[inline]
    fn mul(self, rhs: QFixed) -> QFixed {
        self.wrapping_mul(rhs)
    }
}

/// Never panics: a zero divisor yields [`QFixed::OVERFLOW_SENTINEL`].
impl core::ops::Div for QFixed {
    type Output = QFixed;
    #[inline]
    fn div(self, rhs: QFixed) -> QFixed {
        self.div_or_sentinel(rhs)
    }
}

impl core::ops::Neg for QFixed {
    type Output = QFixed;
    #[inline]
    fn neg(self) -> QFixed {
        self.wrapping_neg()
    }
}

impl core::ops::AddAssign for QFixed {
    #[inline]
    fn add_assign(&mut self, rhs: QFixed) {
        *self = self.wrapping_add(rhs);
    }
}

impl core::ops::SubAssign for QFixed {
    #[inline]
    fn sub_assign(&mut self, rhs: QFixed) {
        *self = self.wrapping_sub(rhs);
    }
}

impl From<i16> for QFixed {
    fn from(value: i16) -> Self {
        Self::from_int(value)
    }
}

impl fmt::Debug for QFixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QFixed {{ integer: {}, frac: {:#06x} }}",
            self.integer_part(),
            self.frac_part()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{ArithmeticFaultKind, VecSignalSink};

    #[test]
    fn parts_match_raw_layout() {
        let x = QFixed::from_parts(3, 0x8000);
        assert_eq!(x.to_raw(), 0x0003_8000);
        assert_eq!(QFixed::from_raw(x.to_raw()), x);

        // -0.25: integer -1, fraction 0.75
        let quarter = -QFixed::from_parts(0, 0x4000);
        assert_eq!(quarter.integer_part(), -1);
        assert_eq!(quarter.frac_part(), 0xC000);
        assert_eq!(QFixed::from_parts(-1, 0xC000), quarter);
    }

    #[test]
    fn constants_have_legacy_bits() {
        assert_eq!(QFixed::PI.to_raw(), 205_887);
        assert_eq!(QFixed::TWO_PI.to_raw(), 2 * QFixed::PI.to_raw());
        assert_eq!(QFixed::E.frac_part(), 0xB7E1);
        assert_eq!(QFixed::SQRT2.integer_part(), 1);
        assert_eq!(QFixed::OVERFLOW_SENTINEL.integer_part(), 0x7FFF);
        assert_eq!(QFixed::OVERFLOW_SENTINEL.frac_part(), 0xFFFF);
    }

    #[test]
    fn add_carries_out_of_fraction() {
        let a = QFixed::from_parts(1, 0xC000);
        let b = QFixed::from_parts(2, 0x8000);
        assert_eq!(a + b, QFixed::from_parts(4, 0x4000));
        assert_eq!(QFixed::from_int(3) + QFixed::HALF, QFixed::from_parts(3, 0x8000));
    }

    #[test]
    fn sub_borrows_from_integer() {
        let a = QFixed::from_parts(5, 0x2000);
        let b = QFixed::from_parts(2, 0x8000);
        assert_eq!(a - b, QFixed::from_parts(2, 0xA000));
        assert_eq!(QFixed::from_int(5) - QFixed::from_int(2), QFixed::from_int(3));
        assert_eq!(QFixed::from_int(-3) + QFixed::from_int(2), QFixed::NEG_ONE);
    }

    #[test]
    fn integer_overflow_wraps() {
        let max_int = QFixed::from_int(i16::MAX);
        assert_eq!(max_int + QFixed::ONE, QFixed::from_int(i16::MIN));
        assert_eq!(QFixed::MIN - QFixed::from_raw(1), QFixed::MAX);
    }

    #[test]
    fn neg_goes_through_raw_view() {
        let x = QFixed::from_parts(1, 0x4000); // 1.25
        let n = -x;
        assert_eq!(n.integer_part(), -2);
        assert_eq!(n.frac_part(), 0xC000);
        assert_eq!(-n, x);
        assert_eq!(-QFixed::MIN, QFixed::MIN);
        assert_eq!(QFixed::MIN.abs(), QFixed::MIN);
        assert_eq!(n.abs(), x);
    }

    #[test]
    fn mul_applies_sign_after_magnitudes() {
        assert_eq!(QFixed::from_int(4) * QFixed::HALF, QFixed::TWO);
        let a = -QFixed::from_parts(1, 0x8000); // -1.5
        let b = QFixed::from_parts(2, 0x8000); // 2.5
        assert_eq!(a * b, -QFixed::from_parts(3, 0xC000));
        assert_eq!(a * a, QFixed::from_parts(2, 0x4000));
        assert_eq!(QFixed::from_raw(-12_345) * QFixed::ONE, QFixed::from_raw(-12_345));
    }

    #[test]
    fn mul_truncates_toward_zero() {
        let tiny = QFixed::from_raw(1);
        assert_eq!(tiny * QFixed::HALF, QFixed::ZERO);
        assert_eq!(-tiny * QFixed::HALF, QFixed::ZERO);
    }

    #[test]
    fn div_keeps_fraction_bits() {
        let q = QFixed::from_int(10) / QFixed::from_int(4);
        assert_eq!(q.integer_part(), 2);
        assert_eq!(q.frac_part(), 0x8000);

        let third = QFixed::ONE / QFixed::from_int(3);
        assert_eq!(third.to_raw(), 21_845);
        assert_eq!(-QFixed::ONE / QFixed::from_int(3), -third);
        assert_eq!(
            QFixed::from_int(-7) / QFixed::from_int(-2),
            QFixed::from_parts(3, 0x8000)
        );
    }

    #[test]
    fn div_by_zero_returns_positive_sentinel() {
        assert_eq!(QFixed::ONE / QFixed::ZERO, QFixed::OVERFLOW_SENTINEL);
        assert_eq!(-QFixed::PI / QFixed::ZERO, QFixed::OVERFLOW_SENTINEL);
        assert_eq!(
            QFixed::ONE.checked_div(QFixed::ZERO),
            Err(QFixedError::DivisionByZero)
        );
    }

    #[test]
    fn div_by_zero_assignment_is_dropped_and_emits_fault() {
        let mut sink = VecSignalSink::default();
        let ctx = FaultContext::at("test:div0").with_expr("x / 0");

        let mut x = QFixed::from_int(5);
        x.div_assign_det(QFixed::ZERO, ctx.clone(), &mut sink);
        assert_eq!(x, QFixed::from_int(5));
        assert_eq!(sink.signals.len(), 1);
        assert_eq!(
            sink.signals[0],
            Signal::ArithmeticFault { ctx: ctx.clone(), kind: ArithmeticFaultKind::DivByZero }
        );
        assert_eq!(sink.signals[0].name(), "div_by_zero");

        x.div_assign_det(QFixed::TWO, ctx, &mut sink);
        assert_eq!(x, QFixed::from_parts(2, 0x8000));
        assert_eq!(sink.signals.len(), 1);
    }

    #[test]
    fn int_conversions() {
        assert_eq!(QFixed::from_int(-7).to_int(), -7);
        assert_eq!(QFixed::from_parts(2, 0x7FFF).to_int_round(), 2);
        assert_eq!(QFixed::from_parts(2, 0x8000).to_int_round(), 3);
        assert_eq!(QFixed::from_parts(i16::MAX, 0x8000).to_int_round(), i16::MIN);
        assert_eq!(QFixed::from(12i16), QFixed::from_int(12));
    }

    #[test]
    fn ordering_is_integer_then_fraction() {
        let a = QFixed::from_parts(-1, 0xFFFF);
        let b = QFixed::ZERO;
        let c = QFixed::from_parts(0, 1);
        assert!(a < b && b < c);
        assert!(QFixed::from_int(5) > QFixed::from_int(3));
    }

    #[test]
    fn debug_shows_parts() {
        assert_eq!(
            format!("{:?}", QFixed::from_parts(3, 0x8000)),
            "QFixed { integer: 3, frac: 0x8000 }"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_raw_value() {
        let x = QFixed::from_parts(-1, 0xC000);
        assert_eq!(serde_json::to_string(&x).unwrap(), "-16384");
        assert_eq!(serde_json::from_str::<QFixed>("-16384").unwrap(), x);
    }
}
