//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "load a tree description" or "materialize a tree".

pub mod report;
pub mod scaffold_service;
pub mod tree_service;

pub use report::{ApplyOptions, ApplyReport, Outcome};
pub use scaffold_service::ScaffoldService;
pub use tree_service::TreeService;
