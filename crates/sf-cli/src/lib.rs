//! storfleet CLI library: fleet orchestration and console output

pub mod fleet;
pub mod output;
