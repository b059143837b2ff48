pub mod deterministic;
pub mod text;
