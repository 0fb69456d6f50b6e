//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod menu;
mod text;

pub use menu::{sample_menu, MenuService, OutputFormat, RenderOptions};
pub use text::TextService;
