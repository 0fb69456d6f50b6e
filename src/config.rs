//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/menudeco/menudeco.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `MENUDECO_*` prefix

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::services::{OutputFormat, RenderOptions};
use crate::application::ApplicationError;
use crate::domain::DecoratorKind;

/// Raw settings for intermediate parsing.
///
/// Every field is optional so a layer only overrides what it names.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub format: Option<OutputFormat>,
    pub indent_html: Option<bool>,
    pub pretty_json: Option<bool>,
    /// Decorator names; a `!` prefix removes a kind in merging layers
    pub decorators: Option<Vec<String>>,
}

/// Unified configuration for menudeco.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Projection used by `menu render` when `--format` is absent
    pub format: OutputFormat,
    /// Put every HTML tag on its own, indented line
    pub indent_html: bool,
    /// Pretty-print JSON output
    pub pretty_json: bool,
    /// Decorator kinds text sessions accept, in canonical order
    pub decorators: Vec<DecoratorKind>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Tree,
            indent_html: false,
            pretty_json: true,
            decorators: DecoratorKind::ALL.to_vec(),
        }
    }
}

/// Get the XDG config directory for menudeco.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "menudeco").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("menudeco.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn parse_kinds<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<DecoratorKind>, ApplicationError> {
    let kinds: BTreeSet<DecoratorKind> = names
        .into_iter()
        .map(|name| {
            name.parse::<DecoratorKind>()
                .map_err(|e| ApplicationError::Config {
                    message: e.to_string(),
                })
        })
        .collect::<Result<_, _>>()?;
    Ok(kinds.into_iter().collect())
}

impl Settings {
    /// Merge decorator names onto a base set.
    ///
    /// - Names from overlay are added to base
    /// - Names prefixed with `!` remove the corresponding kind
    /// - Result is de-duplicated and in canonical order
    ///
    /// # Examples
    /// ```ignore
    /// merge_decorators(&[Bold, Italic], &["underline"]) // → [Bold, Italic, Underline]
    /// merge_decorators(&[Bold, Italic], &["!bold"])     // → [Italic]
    /// ```
    pub fn merge_decorators(
        base: &[DecoratorKind],
        overlay: &[String],
    ) -> Result<Vec<DecoratorKind>, ApplicationError> {
        let mut result: BTreeSet<DecoratorKind> = base.iter().copied().collect();

        for name in overlay {
            if let Some(negated) = name.strip_prefix('!') {
                for kind in parse_kinds([negated])? {
                    result.remove(&kind);
                }
            } else {
                result.extend(parse_kinds([name.as_str()])?);
            }
        }

        Ok(result.into_iter().collect())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            indent_html: self.indent_html,
            pretty_json: self.pretty_json,
        }
    }

    /// Apply global config onto defaults.
    ///
    /// A decorator list in the global file REPLACES the default list.
    fn apply_global(&self, global: &RawSettings) -> Result<Self, ApplicationError> {
        let decorators = match &global.decorators {
            Some(names) => parse_kinds(names.iter().map(String::as_str))?,
            None => self.decorators.clone(),
        };
        Ok(Self {
            format: global.format.unwrap_or(self.format),
            indent_html: global.indent_html.unwrap_or(self.indent_html),
            pretty_json: global.pretty_json.unwrap_or(self.pretty_json),
            decorators,
        })
    }

    /// Merge local config onto self.
    ///
    /// Scalars: overlay wins if set. Decorators: union with `!` negation.
    fn merge_with(&self, overlay: &RawSettings) -> Result<Self, ApplicationError> {
        let decorators = match &overlay.decorators {
            Some(names) => Self::merge_decorators(&self.decorators, names)?,
            None => self.decorators.clone(),
        };
        Ok(Self {
            format: overlay.format.unwrap_or(self.format),
            indent_html: overlay.indent_html.unwrap_or(self.indent_html),
            pretty_json: overlay.pretty_json.unwrap_or(self.pretty_json),
            decorators,
        })
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_config` - Optional config file; it must exist when given
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config (decorator list REPLACES defaults)
    /// 3. Local config (decorator list UNIONS, `!name` removes)
    /// 4. Environment variables: `MENUDECO_*` (REPLACE)
    pub fn load(local_config: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw)?;
            }
        }

        if let Some(path) = local_config {
            let expanded = PathBuf::from(expand_path(path));
            debug!("local config: {}", expanded.display());
            let raw = load_raw_settings(&expanded)?;
            current = current.merge_with(&raw)?;
        }

        Self::apply_env_overrides(current)
    }

    /// Apply MENUDECO_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("MENUDECO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("decorators"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("format") {
            settings.format = val.parse()?;
        }
        if let Ok(val) = config.get_bool("indent_html") {
            settings.indent_html = val;
        }
        if let Ok(val) = config.get_bool("pretty_json") {
            settings.pretty_json = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("decorators") {
            settings.decorators = parse_kinds(val.iter().map(String::as_str))?;
        }

        Ok(settings)
    }

    /// Render settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

/// Expand `~` and `$VAR` in a user-supplied path.
fn expand_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.into_owned())
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DecoratorKind::*;

    #[test]
    fn given_overlay_names_when_merging_then_union_in_canonical_order() {
        let merged = Settings::merge_decorators(&[Underline], &["bold".into()]).unwrap();
        assert_eq!(merged, vec![Bold, Underline]);
    }

    #[test]
    fn given_negated_name_when_merging_then_removed() {
        let merged =
            Settings::merge_decorators(&[Bold, Italic, Underline], &["!italic".into()]).unwrap();
        assert_eq!(merged, vec![Bold, Underline]);
    }

    #[test]
    fn given_unknown_name_when_merging_then_config_error() {
        let result = Settings::merge_decorators(&[Bold], &["blink".into()]);
        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }

    #[test]
    fn given_global_list_when_applied_then_replaces_defaults() {
        let raw = RawSettings {
            decorators: Some(vec!["italic".into()]),
            format: Some(OutputFormat::Html),
            ..Default::default()
        };
        let settings = Settings::default().apply_global(&raw).unwrap();
        assert_eq!(settings.decorators, vec![Italic]);
        assert_eq!(settings.format, OutputFormat::Html);
        assert!(settings.pretty_json);
    }

    #[test]
    fn given_defaults_when_serialized_then_lowercase_names() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains(r#"format = "tree""#));
        assert!(toml.contains(r#""underline""#));
    }
}
