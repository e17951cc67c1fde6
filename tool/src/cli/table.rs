use qfixed_core::QFixed;
use serde::Serialize;
use tracing::debug;

use super::ops::{parse_arg, OpArg, Outcome};

pub const MAX_TABLE_ROWS: i64 = 100_000;

#[derive(Serialize)]
struct TableRow {
    x: QFixed,
    y: QFixed,
}

pub struct TableRange<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub step: &'a str,
}

pub fn run_table(
    op: OpArg,
    range: &TableRange<'_>,
    json: bool,
    precision: Option<usize>,
) -> Result<(), String> {
    let out = render_table(op, range, json, precision)?;
    println!("{out}");
    Ok(())
}

pub fn render_table(
    op: OpArg,
    range: &TableRange<'_>,
    json: bool,
    precision: Option<usize>,
) -> Result<String, String> {
    if !op.is_tabulable() {
        return Err(format!("E_TABLE_OP {} is not a unary fixed-point operation", op.name()));
    }
    let from = parse_arg(range.from)?;
    let to = parse_arg(range.to)?;
    let step = parse_arg(range.step)?;
    if step <= QFixed::ZERO {
        return Err(format!("E_TABLE_STEP step must be positive, got {}", step));
    }
    if from > to {
        return Err(format!("E_TABLE_RANGE from {} is past to {}", from, to));
    }

    // i64 keeps from + i * step exact up to `to`
    let (from_raw, step_raw) = (i64::from(from.to_raw()), i64::from(step.to_raw()));
    let rows = (i64::from(to.to_raw()) - from_raw) / step_raw + 1;
    if rows > MAX_TABLE_ROWS {
        return Err(format!("E_TABLE_TOO_LARGE {} rows exceeds {}", rows, MAX_TABLE_ROWS));
    }
    debug!(op = op.name(), %from, %to, %step, rows, "table");

    let mut table = Vec::new();
    for index in 0..rows {
        let raw = i32::try_from(from_raw + index * step_raw)
            .map_err(|_| "E_TABLE_RANGE row outside Q16.16".to_string())?;
        let x = QFixed::from_raw(raw);
        let y = match op.apply(&[x], false)? {
            Outcome::Fixed(y) => y,
            other => return Err(format!("E_TABLE_OP unexpected result {:?}", other)),
        };
        table.push(TableRow { x, y });
    }

    if json {
        return serde_json::to_string(&table).map_err(|e| format!("E_CLI_JSON {}", e));
    }
    // `precision` truncates the result column only; x always uses `Display`
    let render_y = |v: QFixed| match precision {
        Some(p) => v.format_decimal(p),
        None => v.to_string(),
    };
    let mut lines = vec![format!("x\t{}(x)", op.name())];
    lines.extend(
        table
            .iter()
            .map(|row| format!("{}\t{}", row.x, render_y(row.y))),
    );
    Ok(lines.join("\n"))
}
