//! Keeps the CDN bypass token between runs in a small file under the user's config dir.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::debug;

use crate::env::get_env_var;

const APP_DIR: &str = "validator-report";
const TOKEN_FILE: &str = "bypass-token";

pub fn default_token_path() -> Option<PathBuf> {
    if let Some(path) = get_env_var("VALIDATOR_REPORT_TOKEN_FILE") {
        return Some(PathBuf::from(path));
    }

    get_env_var("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| get_env_var("HOME").map(|home| Path::new(&home).join(".config")))
        .map(|config_dir| config_dir.join(APP_DIR).join(TOKEN_FILE))
}

/// None when no token was ever stored, or the stored one is blank.
pub fn load_token(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let token = contents.trim();
            debug!(path = %path.display(), "loaded stored bypass token");
            Ok((!token.is_empty()).then(|| token.to_string()))
        }
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(error) => {
            Err(error).with_context(|| format!("failed to read token from {}", path.display()))
        }
    }
}

pub fn save_token(path: &Path, token: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    fs::write(path, format!("{}\n", token.trim()))
        .with_context(|| format!("failed to write token to {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .with_context(|| format!("failed to restrict permissions of {}", path.display()))?;
    }

    Ok(())
}

/// Returns whether there was a token to remove.
pub fn clear_token(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
        Err(error) => {
            Err(error).with_context(|| format!("failed to remove token at {}", path.display()))
        }
    }
}
