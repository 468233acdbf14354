use crate::app::normalize_name;
use crate::error::Result;
use crate::paths;
use crate::rank::Ranked;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Release
// ---------------------------------------------------------------------------

/// A named release. Releases are ordered among themselves by `order`,
/// independently of the feature ranks inside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: String,
    pub app_id: String,
    pub name: String,
    pub order: f64,
    pub created_at: DateTime<Utc>,
}

impl Release {
    pub fn new(app_id: impl Into<String>, name: &str, order: f64) -> Result<Self> {
        Ok(Self {
            id: paths::new_id(),
            app_id: app_id.into(),
            name: normalize_name(name)?,
            order,
            created_at: Utc::now(),
        })
    }

    pub fn apply(&mut self, patch: &ReleasePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }
}

impl Ranked for Release {
    fn id(&self) -> &str {
        &self.id
    }

    fn rank(&self) -> f64 {
        self.order
    }
}

// ---------------------------------------------------------------------------
// ReleasePatch
// ---------------------------------------------------------------------------

/// Partial update of a release record. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleasePatch {
    pub name: Option<String>,
    pub order: Option<f64>,
}

impl ReleasePatch {
    pub fn rename(name: &str) -> Result<Self> {
        Ok(Self {
            name: Some(normalize_name(name)?),
            order: None,
        })
    }

    pub fn reorder(order: f64) -> Self {
        Self {
            name: None,
            order: Some(order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_touches_set_fields() {
        let mut r = Release::new("app", "MVP", 1.0).unwrap();
        r.apply(&ReleasePatch::reorder(0.5));
        assert_eq!(r.name, "MVP");
        assert_eq!(r.order, 0.5);

        r.apply(&ReleasePatch::rename(" v2 ").unwrap());
        assert_eq!(r.name, "v2");
        assert_eq!(r.order, 0.5);
    }

    #[test]
    fn blank_rename_rejected() {
        assert!(ReleasePatch::rename("").is_err());
    }
}
