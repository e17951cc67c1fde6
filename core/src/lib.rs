//! Deterministic Q16.16 fixed-point arithmetic.
//!
//! Everything is built from integer operations only, so results are
//! bit-identical on every platform, including targets without floating point.
//! [`QFixed`] carries the `Result`-returning API and the operator traits;
//! [`legacy`] mirrors the free-function surface with sentinel error values.

pub mod detmath;
pub mod determinism;
pub mod error;
pub mod legacy;
pub mod qfixed;
pub mod rounding;
pub mod signals;
pub mod text;

pub use detmath::NEWTON_MAX_ITERATIONS;
pub use determinism::DETERMINISM_SCHEMA_V1;
pub use error::QFixedError;
pub use qfixed::QFixed;
pub use signals::{ArithmeticFaultKind, FaultContext, Signal, SignalSink, VecSignalSink};
pub use text::MAX_PRECISION;
