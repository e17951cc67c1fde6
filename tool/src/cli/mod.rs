pub mod eval;
pub mod ops;
pub mod table;
pub mod vector;
