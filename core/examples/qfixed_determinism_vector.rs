use qfixed_core::{QFixed, DETERMINISM_SCHEMA_V1};

fn main() {
    let actual = QFixed::determinism_vector_v1();
    let expected = QFixed::DETERMINISM_VECTOR_V1_EXPECTED;

    let values = actual
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let expected_values = expected
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let status = if actual == expected { "pass" } else { "fail" };

    println!("schema={DETERMINISM_SCHEMA_V1}");
    println!("status={status}");
    println!("blake3={}", QFixed::determinism_digest(&actual));
    println!("raw_i32={values}");
    println!("expected_raw_i32={expected_values}");

    if status != "pass" {
        std::process::exit(2);
    }
}
