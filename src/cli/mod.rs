//! CLI command implementations

pub mod context;
pub mod run;
pub mod status;
pub mod style;
