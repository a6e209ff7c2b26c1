//! Application layer for dirforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TreeService, ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! tree rules itself. All validation lives in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ApplyOptions,
    ApplyReport, // DTO for run results
    Outcome,
    ScaffoldService,
    TreeService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TreeParser};

pub use error::ApplicationError;
