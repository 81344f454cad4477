//! Batch orchestration library behind the `censo-etl` binary.

pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;
