pub mod correlate;
pub mod patterns;

pub use correlate::{attach_seeds, correlate_seeds};
