//! Dirforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for dirforge, a
//! tool that materializes a declarative directory tree on disk.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          dirforge-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (TreeService, ScaffoldService)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │      (Driven: Filesystem, TreeParser)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    dirforge-adapters (Infrastructure)   │
//! │ (LocalFilesystem, IndentParser, Yaml..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │    (DirectoryTree, Layout, Mode, Owner) │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dirforge_core::application::{ApplyOptions, ScaffoldService, TreeService};
//!
//! // Adapters come from dirforge-adapters.
//! let loader = TreeService::new(filesystem.clone(), parsers);
//! let tree = loader.load("layout.yaml".as_ref(), None).unwrap();
//!
//! let service = ScaffoldService::new(filesystem);
//! let report = service.apply(&tree, "./out".as_ref(), &ApplyOptions::default()).unwrap();
//! println!("{} directories created", report.directories_created());
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplyOptions, ApplyReport, Outcome, ScaffoldService, TreeService,
        ports::{Filesystem, TreeParser},
    };
    pub use crate::domain::{
        ConfigFormat, DirectoryTree, Layout, LayoutEntry, Mode, Owner, TreeNode,
    };
    pub use crate::error::{DirforgeError, DirforgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
