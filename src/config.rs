//! Configuration handling for changeme.
//! Loads the optional settings file and reads the raw external values
//! (git remote, email addresses, description) from their source files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use git2::Repository;
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;

use crate::assets::AssetLayout;
use crate::constants::{
    CONFIG_FILES, DEFAULT_SKIP_DIRS, DESCRIPTION_FILE, PRIMARY_EMAIL_FILE, SECONDARY_EMAIL_FILE,
};
use crate::error::{Error, Result};
use crate::variables::ExternalValues;

/// Settings for a run. Every field has a default matching the skeleton layout.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Root-relative directories excluded from rewriting and renaming.
    pub skip_dirs: Vec<String>,
    /// Extra file name globs added to the denylist.
    pub ignore: Vec<String>,
    /// Git remote the owner and repository name are read from.
    pub remote: String,
    /// Directory holding PMAIL, SMAIL, DESC and the settings file.
    pub data_dir: PathBuf,
    /// Master logo image.
    pub logo: PathBuf,
    /// Directory containing the platform bundles.
    pub resources_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            ignore: Vec::new(),
            remote: "origin".to_string(),
            data_dir: PathBuf::from("scripts").join("data"),
            logo: PathBuf::from("assets").join("images").join("logo.png"),
            resources_dir: PathBuf::from("resources"),
        }
    }
}

impl Settings {
    /// Loads settings from the first settings file found in the default data
    /// directory, or returns the defaults when there is none.
    ///
    /// # Arguments
    /// * `root` - Root of the skeleton being instantiated
    ///
    /// # Returns
    /// * `Result<Settings>` - Parsed settings, or the defaults
    ///
    /// # Errors
    /// * `Error::IoError` if a settings file exists but cannot be read
    /// * `Error::ConfigError` if its content is neither valid JSON nor YAML
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let data_dir = root.as_ref().join(Settings::default().data_dir);
        match load_config(&data_dir, &CONFIG_FILES)? {
            Some(content) => parse_settings(&content),
            None => {
                debug!("No settings file in {}, using defaults", data_dir.display());
                Ok(Settings::default())
            }
        }
    }

    pub fn asset_layout(&self) -> AssetLayout {
        AssetLayout { logo: self.logo.clone(), resources_dir: self.resources_dir.clone() }
    }
}

/// Returns the contents of the first existing file among `config_files`.
///
/// # Arguments
/// * `dir` - Directory the settings files are looked up in
/// * `config_files` - Candidate file names, in lookup order
///
/// # Returns
/// * `Result<Option<String>>` - Contents of the first file found, `None` if none exists
///
/// # Errors
/// * `Error::IoError` if the file found cannot be read
pub fn load_config<P: AsRef<Path>>(dir: P, config_files: &[&str]) -> Result<Option<String>> {
    for file in config_files {
        let config_path = dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading settings from {}", config_path.display());
            let content =
                fs::read_to_string(&config_path).map_err(|e| Error::io(&config_path, e))?;
            return Ok(Some(content));
        }
    }
    Ok(None)
}

/// Parses settings as JSON, falling back to YAML.
///
/// # Arguments
/// * `content` - Raw settings file content
///
/// # Returns
/// * `Result<Settings>` - Settings with omitted fields defaulted
///
/// # Errors
/// * `Error::ConfigError` if parsing fails or an unknown field is present
pub fn parse_settings(content: &str) -> Result<Settings> {
    match serde_json::from_str(content) {
        Ok(settings) => Ok(settings),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid settings format: {}", e))),
    }
}

fn remote_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:https?://[^/]+/|ssh://[^/]+/|[^@/\s]+@[^:/\s]+:)([^/\s]+)/([^/\s]+?)(?:\.git)?/?$")
            .expect("remote url regex is valid")
    })
}

/// Splits a remote URL into `(owner, repository)`.
///
/// # Example
/// ```ignore
/// let (owner, repo) = parse_remote_url("git@github.com:acme/Rocket.git").unwrap();
/// assert_eq!((owner.as_str(), repo.as_str()), ("acme", "Rocket"));
/// ```
pub fn parse_remote_url(url: &str) -> Option<(String, String)> {
    let caps = remote_url_regex().captures(url.trim())?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Reads the URL of `remote` from the repository at `root`.
/// A missing repository or remote yields `None`.
pub fn read_remote_url<P: AsRef<Path>>(root: P, remote: &str) -> Option<String> {
    let repo = match Repository::open(root.as_ref()) {
        Ok(repo) => repo,
        Err(e) => {
            debug!("No git repository at {}: {}", root.as_ref().display(), e);
            return None;
        }
    };
    let found = match repo.find_remote(remote) {
        Ok(found) => found,
        Err(e) => {
            debug!("Remote '{}' not found: {}", remote, e);
            return None;
        }
    };
    found.url().map(str::to_string)
}

/// First line of a data file, trimmed. `None` when missing or blank.
pub fn read_first_line<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("{} does not exist", path.display());
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(content.lines().next().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string))
}

/// Whole data file with line breaks removed. `None` when missing.
pub fn read_joined<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("{} does not exist", path.display());
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(Some(content.replace(['\r', '\n'], "")))
}

/// Gathers every raw external value the actions may need.
///
/// Absent values are left as `None`; resolution decides which are required.
///
/// # Arguments
/// * `root` - Root of the skeleton, expected to be a git repository
/// * `settings` - Settings naming the remote and the data directory
///
/// # Returns
/// * `Result<ExternalValues>` - Owner, repository, emails and description
///
/// # Errors
/// * `Error::ConfigResolutionError` if the remote URL cannot be split into owner and name
/// * `Error::IoError` if a data file exists but cannot be read
pub fn load_external_values<P: AsRef<Path>>(root: P, settings: &Settings) -> Result<ExternalValues> {
    let root = root.as_ref();
    let data_dir = root.join(&settings.data_dir);

    let (owner, repo) = match read_remote_url(root, &settings.remote) {
        Some(url) => {
            let (owner, repo) = parse_remote_url(&url).ok_or_else(|| {
                Error::ConfigResolutionError(format!(
                    "remote '{}' has an unrecognised URL '{}'",
                    settings.remote, url
                ))
            })?;
            (Some(owner), Some(repo))
        }
        None => {
            warn!("Git remote '{}' is not configured", settings.remote);
            (None, None)
        }
    };

    Ok(ExternalValues {
        owner,
        repo,
        primary_email: read_first_line(data_dir.join(PRIMARY_EMAIL_FILE))?,
        secondary_email: read_first_line(data_dir.join(SECONDARY_EMAIL_FILE))?,
        description: read_joined(data_dir.join(DESCRIPTION_FILE))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote_url_forms() {
        let expected = Some(("acme".to_string(), "Rocket".to_string()));
        assert_eq!(parse_remote_url("https://github.com/acme/Rocket"), expected);
        assert_eq!(parse_remote_url("https://github.com/acme/Rocket.git"), expected);
        assert_eq!(parse_remote_url("git@github.com:acme/Rocket.git"), expected);
        assert_eq!(parse_remote_url("ssh://git@github.com/acme/Rocket.git"), expected);
        assert_eq!(parse_remote_url("https://github.com/acme"), None);
        assert_eq!(parse_remote_url("/local/path/repo"), None);
    }
}
