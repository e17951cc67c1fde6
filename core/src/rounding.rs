use crate::qfixed::QFixed;

impl QFixed {
    /// Drops the fraction. A negative value with a non-zero fraction is moved
    /// one further down, so `floor(-1.5)` (`{ integer: -2, frac: 0x8000 }`)
    /// yields -3.
    pub const fn floor(self) -> Self {
        let integer = self.integer_part();
        if integer < 0 && self.frac_part() > 0 {
            Self::from_int(integer.wrapping_sub(1))
        } else {
            Self::from_int(integer)
        }
    }

    pub const fn ceil(self) -> Self {
        let integer = self.integer_part();
        if self.frac_part() > 0 {
            Self::from_int(integer.wrapping_add(1))
        } else {
            Self::from_int(integer)
        }
    }

    /// Round half up.
    pub const fn round(self) -> Self {
        Self::from_int(self.to_int_round())
    }

    // Inherent min/max/clamp shadow the `Ord` versions; `clamp` must not panic
    // when `lo > hi`.

    pub fn min(self, other: Self) -> Self {
        if self < other {
            self
        } else {
            other
        }
    }

    pub fn max(self, other: Self) -> Self {
        if self > other {
            self
        } else {
            other
        }
    }

    /// `lo` below the range, `hi` above it. With `lo > hi` the `lo` check wins.
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        if self < lo {
            lo
        } else if self > hi {
            hi
        } else {
            self
        }
    }

    /// `a + (b - a) * t`, with `self` as `a`.
    pub fn lerp(self, to: Self, t: Self) -> Self {
        self + (to - self) * t
    }
}
