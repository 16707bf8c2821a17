//! CLI library components for the HVF export converter.

pub mod logging;
pub mod paths;
pub mod pipeline;
