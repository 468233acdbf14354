use crate::error::{Result, ShipboardError};
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: String,
    /// App that commands act on when none is named.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_app: Option<String>,
    pub last_updated: DateTime<Utc>,
}

fn default_version() -> u32 {
    1
}

impl State {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            version: 1,
            project: project.into(),
            active_app: None,
            last_updated: Utc::now(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::state_path(root);
        if !path.exists() {
            return Err(ShipboardError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let state: State = serde_yaml::from_str(&data)?;
        Ok(state)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::state_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn set_active_app(&mut self, app_id: &str) {
        self.active_app = Some(app_id.to_string());
        self.last_updated = Utc::now();
    }

    /// `explicit` if given, else the active app.
    pub fn resolve_app<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        explicit
            .or(self.active_app.as_deref())
            .ok_or(ShipboardError::NoActiveApp)
    }
}
