//! CLI library components for the Broadband Facts label generator.

pub mod logging;
pub mod pipeline;
