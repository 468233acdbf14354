//! Record storage.
//!
//! Boards read whole collections per app and write one record at a time.
//! Each `update_*` call is a single atomic record write: a feature's group
//! and rank always change together or not at all.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::app::App;
use crate::error::Result;
use crate::feature::{Feature, FeaturePatch};
use crate::release::{Release, ReleasePatch};

pub trait Store {
    fn list_apps(&self) -> Result<Vec<App>>;
    fn load_app(&self, app_id: &str) -> Result<App>;
    fn save_app(&mut self, app: &App) -> Result<()>;

    /// All features of an app, in a stable listing order.
    fn list_features(&self, app_id: &str) -> Result<Vec<Feature>>;
    fn load_feature(&self, app_id: &str, feature_id: &str) -> Result<Feature>;
    fn insert_feature(&mut self, feature: &Feature) -> Result<()>;
    fn update_feature(
        &mut self,
        app_id: &str,
        feature_id: &str,
        patch: &FeaturePatch,
    ) -> Result<Feature>;
    fn delete_feature(&mut self, app_id: &str, feature_id: &str) -> Result<()>;

    fn list_releases(&self, app_id: &str) -> Result<Vec<Release>>;
    fn load_release(&self, app_id: &str, release_id: &str) -> Result<Release>;
    fn insert_release(&mut self, release: &Release) -> Result<()>;
    fn update_release(
        &mut self,
        app_id: &str,
        release_id: &str,
        patch: &ReleasePatch,
    ) -> Result<Release>;
    fn delete_release(&mut self, app_id: &str, release_id: &str) -> Result<()>;
}
