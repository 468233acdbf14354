use crate::app::normalize_name;
use crate::error::Result;
use crate::grouping::GroupKey;
use crate::paths;
use crate::rank::Ranked;
use crate::types::FeatureStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Feature
// ---------------------------------------------------------------------------

/// A planned feature. It sits in one release (or none) and in one status
/// column at the same time; `order` ranks it within whichever group a board
/// view partitions by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub app_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: FeatureStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_id: Option<String>,
    pub order: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Feature {
    pub fn new(app_id: impl Into<String>, draft: NewFeature, order: f64) -> Result<Self> {
        let now = Utc::now();
        Ok(Self {
            id: paths::new_id(),
            app_id: app_id.into(),
            name: normalize_name(&draft.name)?,
            description: draft.description.trim().to_string(),
            status: draft.status,
            release_id: draft.release_id,
            order,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a patch in place. Group and rank land together.
    pub fn apply(&mut self, patch: &FeaturePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(release_id) = &patch.release_id {
            self.release_id = release_id.clone();
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        self.updated_at = Utc::now();
    }
}

impl Ranked for Feature {
    fn id(&self) -> &str {
        &self.id
    }

    fn rank(&self) -> f64 {
        self.order
    }
}

// ---------------------------------------------------------------------------
// NewFeature
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewFeature {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: FeatureStatus,
    #[serde(default)]
    pub release_id: Option<String>,
}

impl NewFeature {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn in_release(mut self, release_id: impl Into<String>) -> Self {
        self.release_id = Some(release_id.into());
        self
    }

    pub fn with_status(mut self, status: FeatureStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

// ---------------------------------------------------------------------------
// FeaturePatch
// ---------------------------------------------------------------------------

/// Single-record patch. `None` leaves a field untouched; for `release_id`,
/// `Some(None)` clears the reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<FeatureStatus>,
    pub release_id: Option<Option<String>>,
    pub order: Option<f64>,
}

impl FeaturePatch {
    /// Move into `group` at rank `order`.
    pub fn placement(group: &GroupKey, order: f64) -> Self {
        let mut patch = Self {
            order: Some(order),
            ..Self::default()
        };
        match group {
            GroupKey::Release(release_id) => patch.release_id = Some(release_id.clone()),
            GroupKey::Status(status) => patch.status = Some(*status),
        }
        patch
    }

    /// Clear the release reference, keeping the rank.
    pub fn unassign() -> Self {
        Self {
            release_id: Some(None),
            ..Self::default()
        }
    }

    /// Set the release reference, keeping the rank.
    pub fn assign(release_id: impl Into<String>) -> Self {
        Self {
            release_id: Some(Some(release_id.into())),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// FeatureEdit
// ---------------------------------------------------------------------------

/// A user edit of a feature's details. Unlike a move, an edit never touches
/// the rank, even when it changes status or release.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<FeatureStatus>,
    /// `Some(None)` unassigns the feature.
    pub release_id: Option<Option<String>>,
}

impl FeatureEdit {
    pub fn into_patch(self) -> Result<FeaturePatch> {
        let name = self.name.as_deref().map(normalize_name).transpose()?;
        Ok(FeaturePatch {
            name,
            description: self.description.map(|d| d.trim().to_string()),
            status: self.status,
            release_id: self.release_id,
            order: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
