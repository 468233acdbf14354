use crate::error::{Result, ShipboardError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A batch of releases and their features, as produced by a planning pass
/// over a requirements document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub releases: Vec<PlannedRelease>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRelease {
    pub name: String,
    #[serde(default)]
    pub features: Vec<PlannedFeature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedFeature {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// What an import created.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub releases: usize,
    pub features: usize,
}

impl Plan {
    /// Read a plan from a `.json` file, or YAML for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(serde_yaml::from_str(&data)?)
        }
    }

    /// Reject blank names up front so an import never stops half-way on
    /// bad input.
    pub fn validate(&self) -> Result<()> {
        for (ri, release) in self.releases.iter().enumerate() {
            if release.name.trim().is_empty() {
                return Err(ShipboardError::InvalidPlan(format!(
                    "release #{} has an empty name",
                    ri + 1
                )));
            }
            for (fi, feature) in release.features.iter().enumerate() {
                if feature.name.trim().is_empty() {
                    return Err(ShipboardError::InvalidPlan(format!(
                        "feature #{} in release '{}' has an empty name",
                        fi + 1,
                        release.name.trim()
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn feature_count(&self) -> usize {
        self.releases.iter().map(|r| r.features.len()).sum()
    }
}
