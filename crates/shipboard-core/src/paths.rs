use crate::error::{Result, ShipboardError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SHIPBOARD_DIR: &str = ".shipboard";
pub const APPS_DIR: &str = ".shipboard/apps";

pub const CONFIG_FILE: &str = ".shipboard/config.yaml";
pub const STATE_FILE: &str = ".shipboard/state.yaml";

pub const APP_MANIFEST: &str = "app.yaml";
pub const FEATURES_SUBDIR: &str = "features";
pub const RELEASES_SUBDIR: &str = "releases";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn shipboard_dir(root: &Path) -> PathBuf {
    root.join(SHIPBOARD_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

pub fn apps_dir(root: &Path) -> PathBuf {
    root.join(APPS_DIR)
}

pub fn app_dir(root: &Path, app_id: &str) -> PathBuf {
    apps_dir(root).join(app_id)
}

pub fn app_manifest(root: &Path, app_id: &str) -> PathBuf {
    app_dir(root, app_id).join(APP_MANIFEST)
}

pub fn features_dir(root: &Path, app_id: &str) -> PathBuf {
    app_dir(root, app_id).join(FEATURES_SUBDIR)
}

pub fn feature_file(root: &Path, app_id: &str, feature_id: &str) -> PathBuf {
    features_dir(root, app_id).join(format!("{feature_id}.yaml"))
}

pub fn releases_dir(root: &Path, app_id: &str) -> PathBuf {
    app_dir(root, app_id).join(RELEASES_SUBDIR)
}

pub fn release_file(root: &Path, app_id: &str, release_id: &str) -> PathBuf {
    releases_dir(root, app_id).join(format!("{release_id}.yaml"))
}

// ---------------------------------------------------------------------------
// Id validation
// ---------------------------------------------------------------------------

static ID_RE: OnceLock<Regex> = OnceLock::new();

fn id_re() -> &'static Regex {
    ID_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

/// Ids become file names, so they are restricted to a safe alphabet.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 64 || !id_re().is_match(id) {
        return Err(ShipboardError::InvalidId(id.to_string()));
    }
    Ok(())
}

/// Generate a fresh record id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
