use thiserror::Error;

use crate::signals::ArithmeticFaultKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QFixedError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("square root of a negative value")]
    NegativeSqrt,
    #[error("cannot parse '{input}' as Q16.16: {reason}")]
    Parse { input: String, reason: &'static str },
}

impl QFixedError {
    pub fn code(&self) -> &'static str {
        match self {
            QFixedError::DivisionByZero => "E_MATH_DIV_ZERO",
            QFixedError::NegativeSqrt => "E_MATH_DOMAIN",
            QFixedError::Parse { .. } => "E_PARSE",
        }
    }

    /// Arithmetic faults map onto a signal kind; parse errors do not.
    pub fn fault_kind(&self) -> Option<ArithmeticFaultKind> {
        match self {
            QFixedError::DivisionByZero => Some(ArithmeticFaultKind::DivByZero),
            QFixedError::NegativeSqrt => Some(ArithmeticFaultKind::NegativeSqrt),
            QFixedError::Parse { .. } => None,
        }
    }
}
