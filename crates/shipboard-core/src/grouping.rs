//! Partitioning features into ordered board groups.
//!
//! A board view is a [`GroupingStrategy`]: it decides which groups exist and in
//! what order, and which group a feature belongs to. [`ByRelease`] derives
//! groups from stored, independently ranked releases plus an "unassigned"
//! pseudo-group; [`ByStatus`] uses the fixed status columns.

use crate::feature::Feature;
use crate::rank::sort_by_rank;
use crate::release::Release;
use crate::types::FeatureStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Container id of the release view's pseudo-group for features with no release.
pub const UNASSIGNED: &str = "unassigned";

pub const DEFAULT_UNASSIGNED_TITLE: &str = "Unassigned";

// ---------------------------------------------------------------------------
// GroupKey
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "key", rename_all = "snake_case")]
pub enum GroupKey {
    /// A release, or `None` for the unassigned pseudo-group.
    Release(Option<String>),
    Status(FeatureStatus),
}

impl GroupKey {
    /// The id a board uses for this group's drop container.
    pub fn container_id(&self) -> &str {
        match self {
            GroupKey::Release(Some(id)) => id,
            GroupKey::Release(None) => UNASSIGNED,
            GroupKey::Status(status) => status.as_str(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.container_id())
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupHeader {
    pub key: GroupKey,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureGroup {
    pub key: GroupKey,
    pub title: String,
    pub features: Vec<Feature>,
}

// ---------------------------------------------------------------------------
// GroupingStrategy
// ---------------------------------------------------------------------------

pub trait GroupingStrategy {
    /// Ordered group headers for the scope that `features` belong to.
    fn groups_for(&self, features: &[Feature]) -> Vec<GroupHeader>;

    fn key_of(&self, feature: &Feature) -> GroupKey;

    /// The group whose drop container carries `id`, if any.
    fn container(&self, id: &str) -> Option<GroupKey>;
}

/// Partition `features` into the strategy's groups, each sorted by rank.
///
/// Pure: the same input always yields the same output, ties keeping their
/// input order.
pub fn group_features<S: GroupingStrategy + ?Sized>(
    strategy: &S,
    features: &[Feature],
) -> Vec<FeatureGroup> {
    strategy
        .groups_for(features)
        .into_iter()
        .map(|header| {
            let features = members(strategy, features, &header.key);
            FeatureGroup {
                key: header.key,
                title: header.title,
                features,
            }
        })
        .collect()
}

/// Features in `key`'s group, sorted by rank.
pub fn members<S: GroupingStrategy + ?Sized>(
    strategy: &S,
    features: &[Feature],
    key: &GroupKey,
) -> Vec<Feature> {
    let mut selected: Vec<Feature> = features
        .iter()
        .filter(|f| &strategy.key_of(f) == key)
        .cloned()
        .collect();
    sort_by_rank(&mut selected);
    selected
}

// ---------------------------------------------------------------------------
// ByRelease
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ByRelease<'a> {
    releases: &'a [Release],
    unassigned_title: String,
}

impl<'a> ByRelease<'a> {
    pub fn new(releases: &'a [Release]) -> Self {
        Self {
            releases,
            unassigned_title: DEFAULT_UNASSIGNED_TITLE.to_string(),
        }
    }

    pub fn with_unassigned_title(mut self, title: impl Into<String>) -> Self {
        self.unassigned_title = title.into();
        self
    }
}

impl GroupingStrategy for ByRelease<'_> {
    fn groups_for(&self, features: &[Feature]) -> Vec<GroupHeader> {
        let mut releases: Vec<&Release> = self.releases.iter().collect();
        sort_by_rank(&mut releases);

        let mut headers: Vec<GroupHeader> = releases
            .into_iter()
            .map(|r| GroupHeader {
                key: GroupKey::Release(Some(r.id.clone())),
                title: r.name.clone(),
            })
            .collect();

        // Always leave one droppable area when there are no releases.
        let any_unassigned = features.iter().any(|f| f.release_id.is_none());
        if any_unassigned || self.releases.is_empty() {
            headers.push(GroupHeader {
                key: GroupKey::Release(None),
                title: self.unassigned_title.clone(),
            });
        }
        headers
    }

    fn key_of(&self, feature: &Feature) -> GroupKey {
        GroupKey::Release(feature.release_id.clone())
    }

    fn container(&self, id: &str) -> Option<GroupKey> {
        if id == UNASSIGNED {
            return Some(GroupKey::Release(None));
        }
        self.releases
            .iter()
            .find(|r| r.id == id)
            .map(|r| GroupKey::Release(Some(r.id.clone())))
    }
}

// ---------------------------------------------------------------------------
// ByStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct ByStatus;

impl GroupingStrategy for ByStatus {
    fn groups_for(&self, _features: &[Feature]) -> Vec<GroupHeader> {
        FeatureStatus::all()
            .iter()
            .map(|&status| GroupHeader {
                key: GroupKey::Status(status),
                title: status.label().to_string(),
            })
            .collect()
    }

    fn key_of(&self, feature: &Feature) -> GroupKey {
        GroupKey::Status(feature.status)
    }

    fn container(&self, id: &str) -> Option<GroupKey> {
        FeatureStatus::all()
            .iter()
            .find(|s| s.as_str() == id)
            .map(|&s| GroupKey::Status(s))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
