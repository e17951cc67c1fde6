use qfixed_core::{legacy, QFixed, QFixedError};
use serde::Serialize;

/// Operations reachable from the command line, named as in `legacy`.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpArg {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Abs,
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
    ToInt,
    ToIntRound,
    Floor,
    Ceil,
    Round,
    Min,
    Max,
    Clamp,
    Lerp,
    Sqrt,
    Reciprocal,
    Sin,
    Cos,
    Tan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    Fixed(QFixed),
    Bool(bool),
    Int(i16),
}

impl Outcome {
    pub fn render(&self, precision: Option<usize>) -> String {
        match self {
            Outcome::Fixed(x) => match precision {
                Some(p) => x.format_decimal(p),
                None => x.to_string(),
            },
            Outcome::Bool(b) => b.to_string(),
            Outcome::Int(n) => n.to_string(),
        }
    }
}

impl OpArg {
    pub fn name(self) -> &'static str {
        match self {
            OpArg::Add => "add",
            OpArg::Sub => "sub",
            OpArg::Mul => "mul",
            OpArg::Div => "div",
            OpArg::Neg => "neg",
            OpArg::Abs => "abs",
            OpArg::Eq => "eq",
            OpArg::Lt => "lt",
            OpArg::Le => "le",
            OpArg::Gt => "gt",
            OpArg::Ge => "ge",
            OpArg::ToInt => "to_int",
            OpArg::ToIntRound => "to_int_round",
            OpArg::Floor => "floor",
            OpArg::Ceil => "ceil",
            OpArg::Round => "round",
            OpArg::Min => "min",
            OpArg::Max => "max",
            OpArg::Clamp => "clamp",
            OpArg::Lerp => "lerp",
            OpArg::Sqrt => "sqrt",
            OpArg::Reciprocal => "reciprocal",
            OpArg::Sin => "sin",
            OpArg::Cos => "cos",
            OpArg::Tan => "tan",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            OpArg::Neg
            | OpArg::Abs
            | OpArg::ToInt
            | OpArg::ToIntRound
            | OpArg::Floor
            | OpArg::Ceil
            | OpArg::Round
            | OpArg::Sqrt
            | OpArg::Reciprocal
            | OpArg::Sin
            | OpArg::Cos
            | OpArg::Tan => 1,
            OpArg::Clamp | OpArg::Lerp => 3,
            _ => 2,
        }
    }

    /// Unary and fixed-valued: usable as a `table` column.
    pub fn is_tabulable(self) -> bool {
        self.arity() == 1 && !matches!(self, OpArg::ToInt | OpArg::ToIntRound)
    }

    /// `checked` routes the four fallible operations through their
    /// `Result` forms instead of the sentinel forms. `args` must hold exactly
    /// `arity()` values.
    pub fn apply(self, args: &[QFixed], checked: bool) -> Result<Outcome, String> {
        let math = |e: QFixedError| format!("{} {}", e.code(), e);
        let outcome = match (self, args) {
            (OpArg::Add, &[a, b]) => Outcome::Fixed(legacy::add(a, b)),
            (OpArg::Sub, &[a, b]) => Outcome::Fixed(legacy::sub(a, b)),
            (OpArg::Mul, &[a, b]) => Outcome::Fixed(legacy::mul(a, b)),
            (OpArg::Div, &[a, b]) if checked => Outcome::Fixed(a.checked_div(b).map_err(math)?),
            (OpArg::Div, &[a, b]) => Outcome::Fixed(legacy::div(a, b)),
            (OpArg::Neg, &[x]) => Outcome::Fixed(legacy::neg(x)),
            (OpArg::Abs, &[x]) => Outcome::Fixed(legacy::abs(x)),
            (OpArg::Eq, &[a, b]) => Outcome::Bool(legacy::eq(a, b)),
            (OpArg::Lt, &[a, b]) => Outcome::Bool(legacy::lt(a, b)),
            (OpArg::Le, &[a, b]) => Outcome::Bool(legacy::le(a, b)),
            (OpArg::Gt, &[a, b]) => Outcome::Bool(legacy::gt(a, b)),
            (OpArg::Ge, &[a, b]) => Outcome::Bool(legacy::ge(a, b)),
            (OpArg::ToInt, &[x]) => Outcome::Int(legacy::to_int(x)),
            (OpArg::ToIntRound, &[x]) => Outcome::Int(legacy::to_int_round(x)),
            (OpArg::Floor, &[x]) => Outcome::Fixed(legacy::floor(x)),
            (OpArg::Ceil, &[x]) => Outcome::Fixed(legacy::ceil(x)),
            (OpArg::Round, &[x]) => Outcome::Fixed(legacy::round(x)),
            (OpArg::Min, &[a, b]) => Outcome::Fixed(legacy::min(a, b)),
            (OpArg::Max, &[a, b]) => Outcome::Fixed(legacy::max(a, b)),
            (OpArg::Clamp, &[x, lo, hi]) => Outcome::Fixed(legacy::clamp(x, lo, hi)),
            (OpArg::Lerp, &[a, b, t]) => Outcome::Fixed(legacy::lerp(a, b, t)),
            (OpArg::Sqrt, &[x]) if checked => Outcome::Fixed(x.checked_sqrt().map_err(math)?),
            (OpArg::Sqrt, &[x]) => Outcome::Fixed(legacy::sqrt(x)),
            (OpArg::Reciprocal, &[x]) if checked => {
                Outcome::Fixed(x.checked_reciprocal().map_err(math)?)
            }
            (OpArg::Reciprocal, &[x]) => Outcome::Fixed(legacy::reciprocal(x)),
            (OpArg::Sin, &[x]) => Outcome::Fixed(legacy::sin(x)),
            (OpArg::Cos, &[x]) => Outcome::Fixed(legacy::cos(x)),
            (OpArg::Tan, &[x]) if checked => Outcome::Fixed(x.checked_tan().map_err(math)?),
            (OpArg::Tan, &[x]) => Outcome::Fixed(legacy::tan(x)),
            _ => {
                return Err(format!(
                    "E_CLI_ARITY {} expects {} argument(s), got {}",
                    self.name(),
                    self.arity(),
                    args.len()
                ))
            }
        };
        Ok(outcome)
    }
}

/// Parse a decimal command-line argument, reporting the stable error code.
pub fn parse_arg(text: &str) -> Result<QFixed, String> {
    text.parse::<QFixed>()
        .map_err(|e| format!("{} {}", e.code(), e))
}
