pub mod layout;
pub mod tree;

pub use crate::domain::DomainError;
pub use layout::Layout;
pub use tree::{DirectoryTree, TreeNode};
