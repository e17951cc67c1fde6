use qfixed_core::QFixed;
use serde::Serialize;
use tracing::debug;

use super::ops::{parse_arg, OpArg, Outcome};

const EVAL_SCHEMA: &str = "qfixed.eval.v1";

#[derive(Serialize)]
struct EvalReport<'a> {
    schema: &'static str,
    op: &'static str,
    args: &'a [QFixed],
    result: Outcome,
    text: String,
}

pub struct EvalOptions {
    pub json: bool,
    pub precision: Option<usize>,
    pub checked: bool,
}

pub fn run_eval(op: OpArg, raw_args: &[String], options: &EvalOptions) -> Result<(), String> {
    let out = render_eval(op, raw_args, options)?;
    println!("{out}");
    Ok(())
}

pub fn render_eval(op: OpArg, raw_args: &[String], options: &EvalOptions) -> Result<String, String> {
    let args = raw_args
        .iter()
        .map(|text| parse_arg(text))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(op = op.name(), ?args, checked = options.checked, "eval");

    let result = op.apply(&args, options.checked)?;
    let text = result.render(options.precision);

    if options.json {
        let report = EvalReport {
            schema: EVAL_SCHEMA,
            op: op.name(),
            args: &args,
            result,
            text,
        };
        return serde_json::to_string(&report).map_err(|e| format!("E_CLI_JSON {}", e));
    }

    let mut lines = vec![format!("value={text}")];
    if let Outcome::Fixed(x) = result {
        lines.push(format!("raw={}", x.to_raw()));
        lines.push(format!("integer={}", x.integer_part()));
        lines.push(format!("frac=0x{:04X}", x.frac_part()));
    }
    Ok(lines.join("\n"))
}
