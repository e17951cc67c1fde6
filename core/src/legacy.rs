//! Free-function surface with the sentinel error policy.
//!
//! Code ported from the 16-bit runtime calls `add(a, b)`, `sqrt(x)` and so on
//! and checks results against [`QFixed::OVERFLOW_SENTINEL`] or `ZERO` rather
//! than handling a `Result`. Everything here forwards to `QFixed`.

use crate::qfixed::QFixed;
use tracing::trace;

pub fn add(a: QFixed, b: QFixed) -> QFixed {
    a + b
}

pub fn sub(a: QFixed, b: QFixed) -> QFixed {
    a - b
}

pub fn mul(a: QFixed, b: QFixed) -> QFixed {
    a * b
}

/// Zero divisor -> `OVERFLOW_SENTINEL`, for either sign of `a`.
pub fn div(a: QFixed, b: QFixed) -> QFixed {
    a.div_or_sentinel(b)
}

pub fn neg(x: QFixed) -> QFixed {
    -x
}

pub fn abs(x: QFixed) -> QFixed {
    x.abs()
}

pub fn eq(a: QFixed, b: QFixed) -> bool {
    a == b
}

pub fn lt(a: QFixed, b: QFixed) -> bool {
    a < b
}

pub fn le(a: QFixed, b: QFixed) -> bool {
    lt(a, b) || eq(a, b)
}

pub fn gt(a: QFixed, b: QFixed) -> bool {
    lt(b, a)
}

pub fn ge(a: QFixed, b: QFixed) -> bool {
    !lt(a, b)
}

pub fn from_int(value: i16) -> QFixed {
    QFixed::from_int(value)
}

pub fn to_int(x: QFixed) -> i16 {
    x.to_int()
}

pub fn to_int_round(x: QFixed) -> i16 {
    x.to_int_round()
}

pub fn floor(x: QFixed) -> QFixed {
    x.floor()
}

pub fn ceil(x: QFixed) -> QFixed {
    x.ceil()
}

pub fn round(x: QFixed) -> QFixed {
    x.round()
}

pub fn min(a: QFixed, b: QFixed) -> QFixed {
    a.min(b)
}

pub fn max(a: QFixed, b: QFixed) -> QFixed {
    a.max(b)
}

pub fn clamp(x: QFixed, lo: QFixed, hi: QFixed) -> QFixed {
    x.clamp(lo, hi)
}

pub fn lerp(a: QFixed, b: QFixed, t: QFixed) -> QFixed {
    a.lerp(b, t)
}

/// Negative input -> `ZERO`.
pub fn sqrt(x: QFixed) -> QFixed {
    x.sqrt()
}

/// Zero -> `OVERFLOW_SENTINEL`.
pub fn reciprocal(x: QFixed) -> QFixed {
    x.reciprocal()
}

pub fn sin(x: QFixed) -> QFixed {
    x.sin()
}

pub fn cos(x: QFixed) -> QFixed {
    x.cos()
}

pub fn tan(x: QFixed) -> QFixed {
    x.tan()
}

/// Unparseable text -> `ZERO`.
pub fn from_string(text: &str) -> QFixed {
    text.parse().unwrap_or_else(|err| {
        trace!(%err, "from_string failed, returning zero");
        QFixed::ZERO
    })
}

pub fn to_string(x: QFixed, precision: usize) -> String {
    x.format_decimal(precision)
}
