use crate::error::{Result, ShipboardError};
use crate::paths;
use crate::types::AppKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A planned product. Every release and feature belongs to exactly one app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: AppKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl App {
    pub fn new(name: &str, kind: AppKind) -> Result<Self> {
        let name = normalize_name(name)?;
        let now = Utc::now();
        Ok(Self {
            id: paths::new_id(),
            name,
            kind,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn rename(&mut self, name: &str) -> Result<()> {
        self.name = normalize_name(name)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Trim a user-supplied name, rejecting blank input.
pub(crate) fn normalize_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ShipboardError::EmptyName);
    }
    Ok(trimmed.to_string())
}
