use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FeatureStatus
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    #[default]
    Backlog,
    InProgress,
    Testing,
    Complete,
    Live,
}

impl FeatureStatus {
    /// Column order of the status board.
    pub fn all() -> &'static [FeatureStatus] {
        &[
            FeatureStatus::Backlog,
            FeatureStatus::InProgress,
            FeatureStatus::Testing,
            FeatureStatus::Complete,
            FeatureStatus::Live,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureStatus::Backlog => "backlog",
            FeatureStatus::InProgress => "in_progress",
            FeatureStatus::Testing => "testing",
            FeatureStatus::Complete => "complete",
            FeatureStatus::Live => "live",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FeatureStatus::Backlog => "Backlog",
            FeatureStatus::InProgress => "In Progress",
            FeatureStatus::Testing => "Testing",
            FeatureStatus::Complete => "Complete",
            FeatureStatus::Live => "Live",
        }
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FeatureStatus {
    type Err = crate::error::ShipboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backlog" => Ok(FeatureStatus::Backlog),
            "in_progress" | "in-progress" => Ok(FeatureStatus::InProgress),
            "testing" => Ok(FeatureStatus::Testing),
            "complete" => Ok(FeatureStatus::Complete),
            "live" => Ok(FeatureStatus::Live),
            _ => Err(crate::error::ShipboardError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// AppKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppKind {
    #[default]
    Web,
    Mobile,
    Desktop,
}

impl AppKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AppKind::Web => "web",
            AppKind::Mobile => "mobile",
            AppKind::Desktop => "desktop",
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppKind {
    type Err = crate::error::ShipboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "web" => Ok(AppKind::Web),
            "mobile" => Ok(AppKind::Mobile),
            "desktop" => Ok(AppKind::Desktop),
            _ => Err(crate::error::ShipboardError::InvalidAppKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// BoardView
// ---------------------------------------------------------------------------

/// The two board views over the same feature collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardView {
    #[default]
    Release,
    Status,
}

impl BoardView {
    pub fn as_str(self) -> &'static str {
        match self {
            BoardView::Release => "release",
            BoardView::Status => "status",
        }
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BoardView {
    type Err = crate::error::ShipboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" | "releases" => Ok(BoardView::Release),
            "status" | "progress" => Ok(BoardView::Status),
            _ => Err(crate::error::ShipboardError::InvalidView(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
