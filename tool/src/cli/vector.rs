use qfixed_core::{QFixed, DETERMINISM_SCHEMA_V1};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Serialize)]
struct VectorReport {
    schema: &'static str,
    status: &'static str,
    blake3: String,
    raw_i32: Vec<i32>,
    expected_raw_i32: Vec<i32>,
}

fn join_raws(values: &[i32]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Returns the rendered report and whether the vector matched.
pub fn render_vector(json: bool) -> Result<(String, bool), String> {
    let actual = QFixed::determinism_vector_v1();
    let expected = QFixed::DETERMINISM_VECTOR_V1_EXPECTED;
    let pass = actual == expected;
    let status = if pass { "pass" } else { "fail" };
    let digest = QFixed::determinism_digest(&actual);
    debug!(%digest, status, "determinism vector");
    if !pass {
        for (index, (got, want)) in actual.iter().zip(expected.iter()).enumerate() {
            if got != want {
                warn!(index, got, want, "determinism vector mismatch");
            }
        }
    }

    let out = if json {
        let report = VectorReport {
            schema: DETERMINISM_SCHEMA_V1,
            status,
            blake3: digest,
            raw_i32: actual.to_vec(),
            expected_raw_i32: expected.to_vec(),
        };
        serde_json::to_string(&report).map_err(|e| format!("E_CLI_JSON {}", e))?
    } else {
        [
            format!("schema={DETERMINISM_SCHEMA_V1}"),
            format!("status={status}"),
            format!("blake3={digest}"),
            format!("raw_i32={}", join_raws(&actual)),
            format!("expected_raw_i32={}", join_raws(&expected)),
        ]
        .join("\n")
    };
    Ok((out, pass))
}

pub fn run_vector(json: bool) -> Result<bool, String> {
    let (out, pass) = render_vector(json)?;
    println!("{out}");
    Ok(pass)
}
