//! Command handlers, one per mode of the binary.

pub mod apply;
pub mod completions;
pub mod settings;
