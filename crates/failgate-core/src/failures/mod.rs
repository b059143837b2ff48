pub mod model;

pub use model::{FailureKey, FailureRecord};
