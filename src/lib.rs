//! Menu trees and stackable text decoration.
//!
//! The [`domain`] layer holds the engine: an arena of leaf and composite menu
//! nodes rendered into a [`domain::StructuredOutput`], and a
//! [`domain::DecoratorChain`] that wraps text in a fixed nesting order.
//! [`application`] adds file loading and output projections, [`cli`] the
//! command-line front end.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
