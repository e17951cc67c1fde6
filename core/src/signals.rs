#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultContext {
    /// Caller-chosen site label, e.g. "physics:normalize".
    pub location: &'static str,
    pub expr: Option<String>,
}

impl FaultContext {
    pub fn at(location: &'static str) -> Self {
        Self {
            location,
            expr: None,
        }
    }

    pub fn with_expr(mut self, expr: impl Into<String>) -> Self {
        self.expr = Some(expr.into());
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithmeticFaultKind {
    DivByZero,
    NegativeSqrt,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    ArithmeticFault { ctx: FaultContext, kind: ArithmeticFaultKind },
}

impl Signal {
    pub fn name(&self) -> &'static str {
        match self {
            Signal::ArithmeticFault {
                kind: ArithmeticFaultKind::DivByZero,
                ..
            } => "div_by_zero",
            Signal::ArithmeticFault {
                kind: ArithmeticFaultKind::NegativeSqrt,
                ..
            } => "negative_sqrt",
        }
    }
}

pub trait SignalSink {
    fn emit(&mut self, signal: Signal);
}

#[derive(Default)]
pub struct VecSignalSink {
    pub signals: Vec<Signal>,
}

impl SignalSink for VecSignalSink {
    fn emit(&mut self, signal: Signal) {
        self.signals.push(signal);
    }
}
