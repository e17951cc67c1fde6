use crate::qfixed::QFixed;

pub const DETERMINISM_SCHEMA_V1: &str = "qfixed.determinism_vector.v1";

impl QFixed {
    // raw i32 determinism vector reference values (v1)
    pub const DETERMINISM_VECTOR_V1_EXPECTED: [i32; 10] = [
        0x0003_8000,  // 3 + 0.5
        -0x0000_8000, // 0.5 - 1
        -0x0003_C000, // -1.5 * 2.5
        0x0002_8000,  // 10 / 4
        -205_887,     // -PI
        92_681,       // sqrt(2)
        21_845,       // reciprocal(3)
        55_147,       // sin(1)
        -27_272,      // cos(2)
        -0x0002_0000, // floor(-0.25)
    ];

    /// Raw results of a fixed operation list, for cross-platform comparison (v1).
    pub fn determinism_vector_v1() -> [i32; 10] {
        let half = QFixed::HALF;
        let one_and_half = QFixed::from_parts(1, 0x8000);
        let two_and_half = QFixed::from_parts(2, 0x8000);
        let quarter = QFixed::from_parts(0, 0x4000);
        [
            (QFixed::from_int(3) + half).to_raw(),
            (half - QFixed::ONE).to_raw(),
            (-one_and_half * two_and_half).to_raw(),
            (QFixed::from_int(10) / QFixed::from_int(4)).to_raw(),
            (-QFixed::PI).to_raw(),
            QFixed::TWO.sqrt().to_raw(),
            QFixed::from_int(3).reciprocal().to_raw(),
            QFixed::ONE.sin().to_raw(),
            QFixed::TWO.cos().to_raw(),
            (-quarter).floor().to_raw(),
        ]
    }

    /// blake3 of the vector's little-endian raws, hex encoded.
    pub fn determinism_digest(values: &[i32]) -> String {
        let mut hasher = blake3::Hasher::new();
        for value in values {
            hasher.update(&value.to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}
