use super::Store;
use crate::app::App;
use crate::error::{Result, ShipboardError};
use crate::feature::{Feature, FeaturePatch};
use crate::release::{Release, ReleasePatch};

/// Ephemeral store for tests and embedding. Records list in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    apps: Vec<App>,
    features: Vec<Feature>,
    releases: Vec<Release>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn app_exists(&self, app_id: &str) -> Result<()> {
        if self.apps.iter().any(|a| a.id == app_id) {
            Ok(())
        } else {
            Err(ShipboardError::AppNotFound(app_id.to_string()))
        }
    }

    fn feature_mut(&mut self, app_id: &str, feature_id: &str) -> Result<&mut Feature> {
        self.features
            .iter_mut()
            .find(|f| f.app_id == app_id && f.id == feature_id)
            .ok_or_else(|| ShipboardError::FeatureNotFound(feature_id.to_string()))
    }

    fn release_mut(&mut self, app_id: &str, release_id: &str) -> Result<&mut Release> {
        self.releases
            .iter_mut()
            .find(|r| r.app_id == app_id && r.id == release_id)
            .ok_or_else(|| ShipboardError::ReleaseNotFound(release_id.to_string()))
    }
}

impl Store for MemoryStore {
    fn list_apps(&self) -> Result<Vec<App>> {
        Ok(self.apps.clone())
    }

    fn load_app(&self, app_id: &str) -> Result<App> {
        self.apps
            .iter()
            .find(|a| a.id == app_id)
            .cloned()
            .ok_or_else(|| ShipboardError::AppNotFound(app_id.to_string()))
    }

    fn save_app(&mut self, app: &App) -> Result<()> {
        match self.apps.iter_mut().find(|a| a.id == app.id) {
            Some(existing) => *existing = app.clone(),
            None => self.apps.push(app.clone()),
        }
        Ok(())
    }

    fn list_features(&self, app_id: &str) -> Result<Vec<Feature>> {
        self.app_exists(app_id)?;
        Ok(self
            .features
            .iter()
            .filter(|f| f.app_id == app_id)
            .cloned()
            .collect())
    }

    fn load_feature(&self, app_id: &str, feature_id: &str) -> Result<Feature> {
        self.app_exists(app_id)?;
        self.features
            .iter()
            .find(|f| f.app_id == app_id && f.id == feature_id)
            .cloned()
            .ok_or_else(|| ShipboardError::FeatureNotFound(feature_id.to_string()))
    }

    fn insert_feature(&mut self, feature: &Feature) -> Result<()> {
        self.app_exists(&feature.app_id)?;
        self.features.push(feature.clone());
        Ok(())
    }

    fn update_feature(
        &mut self,
        app_id: &str,
        feature_id: &str,
        patch: &FeaturePatch,
    ) -> Result<Feature> {
        self.app_exists(app_id)?;
        let feature = self.feature_mut(app_id, feature_id)?;
        feature.apply(patch);
        Ok(feature.clone())
    }

    fn delete_feature(&mut self, app_id: &str, feature_id: &str) -> Result<()> {
        self.app_exists(app_id)?;
        let before = self.features.len();
        self.features
            .retain(|f| !(f.app_id == app_id && f.id == feature_id));
        if self.features.len() == before {
            return Err(ShipboardError::FeatureNotFound(feature_id.to_string()));
        }
        Ok(())
    }

    fn list_releases(&self, app_id: &str) -> Result<Vec<Release>> {
        self.app_exists(app_id)?;
        Ok(self
            .releases
            .iter()
            .filter(|r| r.app_id == app_id)
            .cloned()
            .collect())
    }

    fn load_release(&self, app_id: &str, release_id: &str) -> Result<Release> {
        self.app_exists(app_id)?;
        self.releases
            .iter()
            .find(|r| r.app_id == app_id && r.id == release_id)
            .cloned()
            .ok_or_else(|| ShipboardError::ReleaseNotFound(release_id.to_string()))
    }

    fn insert_release(&mut self, release: &Release) -> Result<()> {
        self.app_exists(&release.app_id)?;
        self.releases.push(release.clone());
        Ok(())
    }

    fn update_release(
        &mut self,
        app_id: &str,
        release_id: &str,
        patch: &ReleasePatch,
    ) -> Result<Release> {
        self.app_exists(app_id)?;
        let release = self.release_mut(app_id, release_id)?;
        release.apply(patch);
        Ok(release.clone())
    }

    fn delete_release(&mut self, app_id: &str, release_id: &str) -> Result<()> {
        self.app_exists(app_id)?;
        let before = self.releases.len();
        self.releases
            .retain(|r| !(r.app_id == app_id && r.id == release_id));
        if self.releases.len() == before {
            return Err(ShipboardError::ReleaseNotFound(release_id.to_string()));
        }
        Ok(())
    }
}
