//! Menu rendering service
//!
//! Loads menu definitions from disk, builds them and projects the render
//! result into one of the supported output formats.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Menu, MenuDefinition, StructuredOutput};

/// Projection used when printing a rendered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Box-drawing tree
    #[default]
    Tree,
    /// `{label, children}` objects
    Json,
    /// Nested `<ul>`/`<li>` lists
    Html,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Tree => "tree",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(OutputFormat::Tree),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(ApplicationError::Config {
                message: format!("unknown output format: {}", other),
            }),
        }
    }
}

/// Formatting switches applied on top of the chosen [`OutputFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub indent_html: bool,
    pub pretty_json: bool,
}

/// Service for building and projecting menus.
#[derive(Debug, Default)]
pub struct MenuService {
    options: RenderOptions,
}

impl MenuService {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Read a definition, picking the parser from the file extension
    /// (`.toml` or `.json`).
    #[instrument(level = "debug", skip(self))]
    pub fn load_definition(&self, path: &Path) -> ApplicationResult<MenuDefinition> {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        if !matches!(format.as_deref(), Some("toml") | Some("json")) {
            return Err(ApplicationError::UnsupportedFormat(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Definition {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let definition: Result<MenuDefinition, String> = if format.as_deref() == Some("toml") {
            toml::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        };

        definition.map_err(|message| ApplicationError::Definition {
            path: path.to_path_buf(),
            message,
        })
    }

    #[instrument(level = "debug", skip_all, fields(root = %definition.label))]
    pub fn render_definition(&self, definition: &MenuDefinition) -> ApplicationResult<StructuredOutput> {
        let menu = Menu::from_definition(definition)?;
        debug!("built menu with {} nodes", menu.arena.len());
        Ok(menu.render()?)
    }

    pub fn render_file(&self, path: &Path, format: OutputFormat) -> ApplicationResult<String> {
        let definition = self.load_definition(path)?;
        let output = self.render_definition(&definition)?;
        self.project(&output, format)
    }

    pub fn project(&self, output: &StructuredOutput, format: OutputFormat) -> ApplicationResult<String> {
        match format {
            OutputFormat::Tree => Ok(output.to_tree().to_string()),
            OutputFormat::Html => Ok(output.to_html(self.options.indent_html)),
            OutputFormat::Json => {
                output
                    .to_json(self.options.pretty_json)
                    .map_err(|e| ApplicationError::OperationFailed {
                        context: "serialize menu".to_string(),
                        source: Box::new(e),
                    })
            }
        }
    }
}

/// Demo menu: five top-level entries, two of them with sub-items.
pub fn sample_menu() -> MenuDefinition {
    MenuDefinition::composite(
        "Menu",
        vec![
            MenuDefinition::leaf("Element 1"),
            MenuDefinition::leaf("Element 2"),
            MenuDefinition::composite(
                "Element 3",
                vec![
                    MenuDefinition::leaf("Element 3.1"),
                    MenuDefinition::leaf("Element 3.2"),
                ],
            ),
            MenuDefinition::leaf("Element 4"),
            MenuDefinition::composite(
                "Element 5",
                vec![
                    MenuDefinition::leaf("Element 5.1"),
                    MenuDefinition::leaf("Element 5.2"),
                    MenuDefinition::leaf("Element 5.3"),
                ],
            ),
        ],
    )
}
