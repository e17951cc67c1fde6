use crate::error::QFixedError;
use crate::qfixed::QFixed;
use crate::signals::{FaultContext, Signal, SignalSink};
use tracing::trace;

/// Newton-Raphson step cap; enough for 16 fractional bits.
pub const NEWTON_MAX_ITERATIONS: usize = 8;

const PI_RAW: i64 = QFixed::PI.to_raw() as i64;
const TWO_PI_RAW: i64 = QFixed::TWO_PI.to_raw() as i64;
const PI_HALF_RAW: i32 = QFixed::PI_HALF.to_raw();
const QUARTER_PI_RAW: i32 = 51_471;

// 1/6, 1/120, 1/5040 as ONE / n
const SIN_C3: QFixed = QFixed::from_raw(10_922);
const SIN_C5: QFixed = QFixed::from_raw(546);
const SIN_C7: QFixed = QFixed::from_raw(13);
// 1/24, 1/720
const COS_C4: QFixed = QFixed::from_raw(2_730);
const COS_C6: QFixed = QFixed::from_raw(91);

impl QFixed {
    pub fn checked_sqrt(self) -> Result<Self, QFixedError> {
        if self.is_negative() {
            return Err(QFixedError::NegativeSqrt);
        }
        if self.is_zero() {
            return Ok(Self::ZERO);
        }
        let initial = if self.integer_part() >= 1 {
            self.halve()
        } else {
            Self::HALF
        };
        Ok(newton("sqrt", initial, |guess| (guess + self / guess).halve()))
    }

    /// Legacy square root: a negative input yields `ZERO`.
    pub fn sqrt(self) -> Self {
        self.checked_sqrt().unwrap_or_else(|err| {
            trace!(raw = self.to_raw(), %err, "sqrt domain error, returning zero");
            Self::ZERO
        })
    }

    /// Square root that reports a negative input to `sink` and yields `ZERO`.
    pub fn sqrt_det(self, ctx: FaultContext, sink: &mut dyn SignalSink) -> Self {
        match self.checked_sqrt() {
            Ok(root) => root,
            Err(err) => {
                if let Some(kind) = err.fault_kind() {
                    sink.emit(Signal::ArithmeticFault { ctx, kind });
                }
                Self::ZERO
            }
        }
    }

    /// `1 / self` by Newton-Raphson from a guess bucketed on `|self|`.
    /// The iteration only converges for a starting guess below `2 / |self|`,
    /// which the buckets give for magnitudes under 4.
    pub fn checked_reciprocal(self) -> Result<Self, QFixedError> {
        if self.is_zero() {
            return Err(QFixedError::DivisionByZero);
        }
        let magnitude = self.abs().integer_part();
        let initial = if magnitude >= 2 {
            Self::HALF
        } else if magnitude >= 1 {
            Self::ONE
        } else {
            Self::TWO
        };
        Ok(newton("reciprocal", initial, |guess| {
            guess * (Self::TWO - self * guess)
        }))
    }

    /// Legacy reciprocal: zero yields [`QFixed::OVERFLOW_SENTINEL`].
    pub fn reciprocal(self) -> Self {
        self.checked_reciprocal().unwrap_or_else(|_| {
            trace!("reciprocal of zero, returning sentinel");
            Self::OVERFLOW_SENTINEL
        })
    }

    pub fn sin(self) -> Self {
        let mut x = reduce_angle(self.to_raw());
        if x > PI_HALF_RAW {
            x = PI_RAW as i32 - x;
        } else if x < -PI_HALF_RAW {
            x = -(PI_RAW as i32) - x;
        }

        let folded = QFixed::from_raw(x);
        if x.abs() <= QUARTER_PI_RAW {
            return sine_series(folded);
        }
        let c = cosine_series(Self::PI_HALF - folded.abs());
        if folded.is_negative() {
            -c
        } else {
            c
        }
    }

    /// `sin(self + PI/2)`.
    pub fn cos(self) -> Self {
        (self + Self::PI_HALF).sin()
    }

    pub fn sin_cos(self) -> (Self, Self) {
        (self.sin(), self.cos())
    }

    /// `sin / cos`; a zero cosine yields the division sentinel.
    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    pub fn checked_tan(self) -> Result<Self, QFixedError> {
        self.sin().checked_div(self.cos())
    }
}

fn newton(label: &'static str, initial: QFixed, step: impl Fn(QFixed) -> QFixed) -> QFixed {
    let mut guess = initial;
    for iteration in 0..NEWTON_MAX_ITERATIONS {
        let next = step(guess);
        if next == guess {
            trace!(label, iteration, "newton converged");
            return guess;
        }
        guess = next;
    }
    trace!(label, raw = guess.to_raw(), "newton hit iteration cap");
    guess
}

/// Reduce into `[-PI, PI]` by whole turns. Matches repeatedly subtracting
/// (or adding) `TWO_PI` until the value is in range, in constant time.
fn reduce_angle(raw: i32) -> i32 {
    let x = raw as i64;
    let reduced = if x > PI_RAW {
        x - ceil_div(x - PI_RAW, TWO_PI_RAW) * TWO_PI_RAW
    } else if x < -PI_RAW {
        x + ceil_div(-PI_RAW - x, TWO_PI_RAW) * TWO_PI_RAW
    } else {
        x
    };
    reduced as i32
}

fn ceil_div(num: i64, den: i64) -> i64 {
    (num + den - 1) / den
}

/// x - x^3/6 + x^5/120 - x^7/5040
fn sine_series(x: QFixed) -> QFixed {
    let x2 = x * x;
    let x3 = x2 * x;
    let x5 = x3 * x2;
    let x7 = x5 * x2;
    x - x3 * SIN_C3 + x5 * SIN_C5 - x7 * SIN_C7
}

/// 1 - y^2/2 + y^4/24 - y^6/720
fn cosine_series(y: QFixed) -> QFixed {
    let y2 = y * y;
    let y4 = y2 * y2;
    let y6 = y4 * y2;
    QFixed::ONE - y2 * QFixed::HALF + y4 * COS_C4 - y6 * COS_C6
}
