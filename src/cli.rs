//! Command-line interface implementation for changeme.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Command, CommandFactory, Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Named operations the tool can run.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Substitute placeholders, rename paths and regenerate the logo assets
    #[value(name = "init", alias = "instantiate")]
    Init,
    /// Regenerate the logo assets from assets/images/logo.png
    #[value(name = "ulogo")]
    UpdateLogo,
    /// Propagate scripts/data/DESC to every CHANGEME_DESC placeholder
    #[value(name = "udesc")]
    UpdateDescription,
}

/// Command-line arguments structure for changeme.
#[derive(Parser, Debug)]
#[command(author, version, about = "changeme: turn the project skeleton into your repository", long_about = None)]
pub struct Args {
    /// Operation to run
    #[arg(value_enum, value_name = "ACTION")]
    pub action: Action,

    /// Root of the skeleton (the scripts/ folder is accepted too)
    #[arg(short, long, value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command used to print the help when no action is given.
pub fn help_command() -> Command {
    Args::command().help_template(
        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
    )
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 and the help text if no action is given
/// * With clap's default error handling for other argument errors,
///   including an unknown action
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                // runs before the logger is initialised
                if let Err(err) = help_command().print_help() {
                    eprintln!("Failed to print help: {}", err);
                }
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

/// Canonicalizes the root. When pointed at the skeleton's `scripts/`
/// folder, its parent is used instead.
pub fn resolve_root<P: AsRef<Path>>(root: P) -> Result<PathBuf> {
    let root = root.as_ref();
    let root = root.canonicalize().map_err(|e| Error::io(root, e))?;
    if root.file_name().is_some_and(|name| name == "scripts") {
        if let Some(parent) = root.parent() {
            return Ok(parent.to_path_buf());
        }
    }
    Ok(root)
}
