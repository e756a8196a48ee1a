mod engine;
mod types;

pub use engine::compute;
pub use types::{Inputs, Projection, SeriesPoint};
