//! Driver library for the CNPJ table normalizer.

pub mod logging;
pub mod pipeline;
pub mod progress;
