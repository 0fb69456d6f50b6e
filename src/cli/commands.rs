//! Command dispatch: wires parsed arguments to the application services.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{sample_menu, MenuService, OutputFormat, TextService};
use crate::cli::args::{Cli, Commands, ConfigCommands, MenuCommands, TextCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::DecoratorKind;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Menu { command }) => execute_menu(command, &load_settings(cli)?),
        Some(Commands::Text { command }) => execute_text(command, &load_settings(cli)?),
        Some(Commands::Config { command }) => execute_config(command, &load_settings(cli)?),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn execute_menu(command: &MenuCommands, settings: &Settings) -> CliResult<()> {
    let service = MenuService::new(settings.render_options());
    match command {
        MenuCommands::Render { file, format } => {
            _menu_render(&service, file, format.unwrap_or(settings.format))
        }
        MenuCommands::Demo { format } => _menu_demo(&service, format.unwrap_or(settings.format)),
    }
}

#[instrument(skip(service))]
fn _menu_render(service: &MenuService, file: &Path, format: OutputFormat) -> CliResult<()> {
    let rendered = service.render_file(file, format)?;
    output::info(rendered.trim_end());
    Ok(())
}

#[instrument(skip(service))]
fn _menu_demo(service: &MenuService, format: OutputFormat) -> CliResult<()> {
    let menu = service.render_definition(&sample_menu())?;
    let rendered = service.project(&menu, format)?;
    output::info(rendered.trim_end());
    Ok(())
}

fn execute_text(command: &TextCommands, settings: &Settings) -> CliResult<()> {
    let mut service = TextService::new(settings.decorators.iter().copied());
    match command {
        TextCommands::Decorate {
            text,
            bold,
            italic,
            underline,
            with,
        } => {
            let names = decorator_names(*bold, *italic, *underline, with);
            _text_decorate(&mut service, text, &names)
        }
        TextCommands::List => {
            for kind in DecoratorKind::ALL {
                let (open, close) = kind.markup();
                let state = if service.chain().is_registered(kind) {
                    "registered"
                } else {
                    "not registered"
                };
                output::info(&format!("{:<10} {}…{}  ({})", kind.name(), open, close, state));
            }
            Ok(())
        }
    }
}

/// Flag switches first, then `--with` names in the order given.
fn decorator_names(bold: bool, italic: bool, underline: bool, with: &[String]) -> Vec<String> {
    [
        (DecoratorKind::Bold, bold),
        (DecoratorKind::Italic, italic),
        (DecoratorKind::Underline, underline),
    ]
    .iter()
    .filter(|(_, enabled)| *enabled)
    .map(|(kind, _)| kind.name().to_string())
    .chain(with.iter().cloned())
    .collect()
}

#[instrument(skip(service))]
fn _text_decorate(service: &mut TextService, text: &str, names: &[String]) -> CliResult<()> {
    service.set_text(text);
    service.enable_all(names)?;
    debug!(
        "decorating with [{}]",
        service.chain().active_kinds().iter().join(", ")
    );
    output::info(&service.render());
    Ok(())
}

fn execute_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("# effective settings");
            output::info(settings.to_toml()?.trim_end());
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                if !path.exists() {
                    output::warning("global config file does not exist yet");
                }
                output::info(&path.display());
            }
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}
