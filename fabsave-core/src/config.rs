use std::env;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use tracing::{debug, info};

use crate::error::{Result, SaveError};

/// Directory where saved files land (required)
pub const OUTPUT_PATH_VAR: &str = "FABRIC_OUTPUT_PATH";
/// Default tag-set written into frontmatter unless `--nofabric` is given
pub const FRONTMATTER_TAGS_VAR: &str = "FABRIC_FRONTMATTER_TAGS";
/// strftime pattern for the filename prefix; empty disables the prefix
pub const DATE_FORMAT_VAR: &str = "SAVE_DATE_FORMAT";

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Process-wide settings, resolved once at startup and passed by reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveConfig {
    /// Existing directory, with `~` already expanded
    pub output_dir: PathBuf,
    /// `None` when date prefixing is disabled
    pub date_format: Option<String>,
    /// Raw value of the default tag-set, if configured
    pub frontmatter_tags: Option<String>,
}

impl SaveConfig {
    /// Build config from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup
    ///
    /// Fails if the output directory is unset or missing on disk, or if the
    /// date format cannot be rendered.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_dir = lookup(OUTPUT_PATH_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| SaveError::configuration(format!("{} is not set", OUTPUT_PATH_VAR)))?;

        let output_dir = expand_home(raw_dir.trim());
        if !output_dir.is_dir() {
            return Err(SaveError::missing_directory(output_dir));
        }

        let date_format = match lookup(DATE_FORMAT_VAR) {
            None => Some(DEFAULT_DATE_FORMAT.to_string()),
            Some(format) if format.is_empty() => None,
            Some(format) => {
                validate_date_format(&format)?;
                Some(format)
            }
        };

        let frontmatter_tags = lookup(FRONTMATTER_TAGS_VAR);

        debug!(
            output_dir = %output_dir.display(),
            date_format = ?date_format,
            frontmatter_tags = ?frontmatter_tags,
            "resolved save config"
        );

        Ok(Self {
            output_dir,
            date_format,
            frontmatter_tags,
        })
    }

    /// Default tag-set, or `None` if unset or blank
    pub fn default_tags(&self) -> Option<&str> {
        self.frontmatter_tags
            .as_deref()
            .map(str::trim)
            .filter(|tags| !tags.is_empty())
    }
}

/// Reject patterns chrono would fail to render
fn validate_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(SaveError::configuration(format!(
            "{} {:?} is not a valid date format",
            DATE_FORMAT_VAR, format
        )));
    }
    Ok(())
}

/// Expand a leading `~` to the home directory
pub fn expand_home(raw: &str) -> PathBuf {
    let home = match dirs::home_dir() {
        Some(home) => home,
        None => return PathBuf::from(raw),
    };

    if raw == "~" {
        home
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(raw)
    }
}

/// Location of the shared env file: ~/.config/fabric/.env
pub fn env_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("fabric").join(".env"))
}

/// Load the shared env file into the process environment
///
/// Variables already set in the environment are left alone. Returns the
/// path that was loaded, if any.
pub fn load_env_file() -> Option<PathBuf> {
    let env_file = env_file_path()?;
    load_env_file_from(&env_file)
}

fn load_env_file_from(env_file: &Path) -> Option<PathBuf> {
    if !env_file.exists() {
        debug!("No env file at {}", env_file.display());
        return None;
    }

    match dotenvy::from_path(env_file) {
        Ok(()) => {
            info!("Loaded configuration from {}", env_file.display());
            Some(env_file.to_path_buf())
        }
        Err(e) => {
            debug!("Failed to load {}: {}", env_file.display(), e);
            None
        }
    }
}
