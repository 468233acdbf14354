use super::Store;
use crate::app::App;
use crate::error::{Result, ShipboardError};
use crate::feature::{Feature, FeaturePatch};
use crate::io;
use crate::paths;
use crate::release::{Release, ReleasePatch};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// One YAML file per record under `.shipboard/apps/<app>/`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn app_exists(&self, app_id: &str) -> Result<()> {
        paths::validate_id(app_id)?;
        if !paths::app_manifest(&self.root, app_id).exists() {
            return Err(ShipboardError::AppNotFound(app_id.to_string()));
        }
        Ok(())
    }
}

/// Load every `*.yaml` record in `dir`. A missing directory is an empty list.
fn load_records<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut records = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
            continue;
        }
        records.push(io::read_yaml(&path)?);
    }
    Ok(records)
}

impl Store for FileStore {
    fn list_apps(&self) -> Result<Vec<App>> {
        let apps_dir = paths::apps_dir(&self.root);
        if !apps_dir.exists() {
            return Ok(Vec::new());
        }
        let mut apps = Vec::new();
        for entry in std::fs::read_dir(&apps_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                let id = entry.file_name().to_string_lossy().into_owned();
                match self.load_app(&id) {
                    Ok(app) => apps.push(app),
                    Err(ShipboardError::AppNotFound(_)) | Err(ShipboardError::InvalidId(_)) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        apps.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(apps)
    }

    fn load_app(&self, app_id: &str) -> Result<App> {
        self.app_exists(app_id)?;
        io::read_yaml(&paths::app_manifest(&self.root, app_id))
    }

    fn save_app(&mut self, app: &App) -> Result<()> {
        paths::validate_id(&app.id)?;
        io::write_yaml(&paths::app_manifest(&self.root, &app.id), app)
    }

    // -----------------------------------------------------------------------
    // Features
    // -----------------------------------------------------------------------

    fn list_features(&self, app_id: &str) -> Result<Vec<Feature>> {
        self.app_exists(app_id)?;
        let mut features: Vec<Feature> = load_records(&paths::features_dir(&self.root, app_id))?;
        // Directory order is arbitrary; creation order is the stable base.
        features.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(features)
    }

    fn load_feature(&self, app_id: &str, feature_id: &str) -> Result<Feature> {
        self.app_exists(app_id)?;
        paths::validate_id(feature_id)?;
        let path = paths::feature_file(&self.root, app_id, feature_id);
        if !path.exists() {
            return Err(ShipboardError::FeatureNotFound(feature_id.to_string()));
        }
        io::read_yaml(&path)
    }

    fn insert_feature(&mut self, feature: &Feature) -> Result<()> {
        self.app_exists(&feature.app_id)?;
        paths::validate_id(&feature.id)?;
        io::write_yaml(
            &paths::feature_file(&self.root, &feature.app_id, &feature.id),
            feature,
        )
    }

    fn update_feature(
        &mut self,
        app_id: &str,
        feature_id: &str,
        patch: &FeaturePatch,
    ) -> Result<Feature> {
        let mut feature = self.load_feature(app_id, feature_id)?;
        feature.apply(patch);
        io::write_yaml(&paths::feature_file(&self.root, app_id, feature_id), &feature)?;
        Ok(feature)
    }

    fn delete_feature(&mut self, app_id: &str, feature_id: &str) -> Result<()> {
        self.app_exists(app_id)?;
        paths::validate_id(feature_id)?;
        if !io::remove_if_exists(&paths::feature_file(&self.root, app_id, feature_id))? {
            return Err(ShipboardError::FeatureNotFound(feature_id.to_string()));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Releases
    // -----------------------------------------------------------------------

    fn list_releases(&self, app_id: &str) -> Result<Vec<Release>> {
        self.app_exists(app_id)?;
        let mut releases: Vec<Release> = load_records(&paths::releases_dir(&self.root, app_id))?;
        releases.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(releases)
    }

    fn load_release(&self, app_id: &str, release_id: &str) -> Result<Release> {
        self.app_exists(app_id)?;
        paths::validate_id(release_id)?;
        let path = paths::release_file(&self.root, app_id, release_id);
        if !path.exists() {
            return Err(ShipboardError::ReleaseNotFound(release_id.to_string()));
        }
        io::read_yaml(&path)
    }

    fn insert_release(&mut self, release: &Release) -> Result<()> {
        self.app_exists(&release.app_id)?;
        paths::validate_id(&release.id)?;
        io::write_yaml(
            &paths::release_file(&self.root, &release.app_id, &release.id),
            release,
        )
    }

    fn update_release(
        &mut self,
        app_id: &str,
        release_id: &str,
        patch: &ReleasePatch,
    ) -> Result<Release> {
        let mut release = self.load_release(app_id, release_id)?;
        release.apply(patch);
        io::write_yaml(&paths::release_file(&self.root, app_id, release_id), &release)?;
        Ok(release)
    }

    fn delete_release(&mut self, app_id: &str, release_id: &str) -> Result<()> {
        self.app_exists(app_id)?;
        paths::validate_id(release_id)?;
        if !io::remove_if_exists(&paths::release_file(&self.root, app_id, release_id))? {
            return Err(ShipboardError::ReleaseNotFound(release_id.to_string()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
