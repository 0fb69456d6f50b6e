//! Domain layer: menu trees and text decoration
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod content;
pub mod decorator;
pub mod error;
pub mod output;

pub use arena::{MenuArena, NodeId, NodeKind, TreeNode};
pub use builder::{build_definition, Menu, MenuBuilder, MenuDefinition};
pub use content::ContentSource;
pub use decorator::{DecoratorChain, DecoratorKind};
pub use error::{DomainError, TreeResult};
pub use output::StructuredOutput;
