//! Board operations for one app.
//!
//! Every operation reads a fresh snapshot from the store, computes what to
//! write, and issues the writes. Nothing is cached between calls, so a failed
//! write leaves the board exactly as the store last saw it.

use crate::config::BoardConfig;
use crate::error::{Result, ShipboardError};
use crate::feature::{Feature, FeatureEdit, FeaturePatch, NewFeature};
use crate::grouping::{group_features, members, ByRelease, ByStatus, FeatureGroup, GroupingStrategy};
use crate::moves::{plan_move, resolve_drop};
use crate::plan::{ImportSummary, Plan};
use crate::rank::{compute_new_rank, next_rank, sort_by_rank, DropReference};
use crate::release::{Release, ReleasePatch};
use crate::store::Store;
use crate::types::{BoardView, FeatureStatus};
use tracing::{debug, info, warn};

pub struct Board<'s, S: Store + ?Sized> {
    store: &'s mut S,
    app_id: String,
    config: BoardConfig,
}

/// Build the grouping strategy for `view` over a release snapshot.
pub fn strategy_for<'a>(
    view: BoardView,
    releases: &'a [Release],
    config: &BoardConfig,
) -> Box<dyn GroupingStrategy + 'a> {
    match view {
        BoardView::Release => Box::new(
            ByRelease::new(releases).with_unassigned_title(config.unassigned_title.clone()),
        ),
        BoardView::Status => Box::new(ByStatus),
    }
}

impl<'s, S: Store + ?Sized> Board<'s, S> {
    /// Open the board of `app_id`. Fails if the app does not exist.
    pub fn open(store: &'s mut S, app_id: &str, config: BoardConfig) -> Result<Self> {
        store.load_app(app_id)?;
        Ok(Self {
            store,
            app_id: app_id.to_string(),
            config,
        })
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn features(&self) -> Result<Vec<Feature>> {
        self.store.list_features(&self.app_id)
    }

    pub fn feature(&self, feature_id: &str) -> Result<Feature> {
        self.store.load_feature(&self.app_id, feature_id)
    }

    /// Releases in board order.
    pub fn releases(&self) -> Result<Vec<Release>> {
        let mut releases = self.store.list_releases(&self.app_id)?;
        sort_by_rank(&mut releases);
        Ok(releases)
    }

    pub fn grouped(&self, view: BoardView) -> Result<Vec<FeatureGroup>> {
        let features = self.features()?;
        let releases = self.store.list_releases(&self.app_id)?;
        let strategy = strategy_for(view, &releases, &self.config);
        Ok(group_features(strategy.as_ref(), &features))
    }

    // -----------------------------------------------------------------------
    // Releases
    // -----------------------------------------------------------------------

    /// Create a release after the current last one.
    pub fn create_release(&mut self, name: &str) -> Result<Release> {
        let releases = self.store.list_releases(&self.app_id)?;
        let release = Release::new(&self.app_id, name, next_rank(&releases))?;
        self.store.insert_release(&release)?;
        info!(app = %self.app_id, release = %release.id, order = release.order, "release created");
        Ok(release)
    }

    pub fn rename_release(&mut self, release_id: &str, name: &str) -> Result<Release> {
        let patch = ReleasePatch::rename(name)?;
        self.store.update_release(&self.app_id, release_id, &patch)
    }

    /// Move a release before `before`, or to the end when `before` is `None`.
    pub fn move_release(&mut self, release_id: &str, before: Option<&str>) -> Result<Release> {
        let releases = self.releases()?;
        if !releases.iter().any(|r| r.id == release_id) {
            return Err(ShipboardError::ReleaseNotFound(release_id.to_string()));
        }
        let reference = match before {
            Some(id) if !releases.iter().any(|r| r.id == id) => {
                return Err(ShipboardError::ReleaseNotFound(id.to_string()));
            }
            Some(id) => DropReference::Before(id),
            None => DropReference::Container,
        };
        let order = compute_new_rank(release_id, reference, &releases);
        debug!(app = %self.app_id, release = %release_id, order, "release move computed");
        let release =
            self.store
                .update_release(&self.app_id, release_id, &ReleasePatch::reorder(order))?;
        info!(app = %self.app_id, release = %release_id, order, "release moved");
        Ok(release)
    }

    /// Delete a release. Its features become unassigned and keep their ranks.
    /// Returns the features that were unassigned.
    ///
    /// If any write fails, features already unassigned are put back in the
    /// release before the error is returned.
    pub fn delete_release(&mut self, release_id: &str) -> Result<Vec<Feature>> {
        self.store.load_release(&self.app_id, release_id)?;

        let orphans: Vec<Feature> = self
            .features()?
            .into_iter()
            .filter(|f| f.release_id.as_deref() == Some(release_id))
            .collect();

        let mut unassigned = Vec::with_capacity(orphans.len());
        for feature in &orphans {
            match self
                .store
                .update_feature(&self.app_id, &feature.id, &FeaturePatch::unassign())
            {
                Ok(updated) => unassigned.push(updated),
                Err(e) => return Err(self.restore_release(release_id, &unassigned, e)),
            }
        }

        if let Err(e) = self.store.delete_release(&self.app_id, release_id) {
            return Err(self.restore_release(release_id, &unassigned, e));
        }
        info!(
            app = %self.app_id,
            release = %release_id,
            unassigned = unassigned.len(),
            "release deleted"
        );
        Ok(unassigned)
    }

    /// Undo a partial release delete and hand back the error that stopped it.
    fn restore_release(
        &mut self,
        release_id: &str,
        unassigned: &[Feature],
        error: ShipboardError,
    ) -> ShipboardError {
        warn!(
            app = %self.app_id,
            release = %release_id,
            error = %error,
            restoring = unassigned.len(),
            "release delete not persisted"
        );
        let patch = FeaturePatch::assign(release_id);
        for feature in unassigned {
            if let Err(e) = self.store.update_feature(&self.app_id, &feature.id, &patch) {
                warn!(
                    app = %self.app_id,
                    feature = %feature.id,
                    error = %e,
                    "feature left unassigned"
                );
            }
        }
        error
    }

    // -----------------------------------------------------------------------
    // Features
    // -----------------------------------------------------------------------

    /// Create a feature at the end of its group in `view`.
    pub fn create_feature(&mut self, draft: NewFeature, view: BoardView) -> Result<Feature> {
        if let Some(release_id) = &draft.release_id {
            self.store.load_release(&self.app_id, release_id)?;
        }

        let features = self.features()?;
        let releases = self.store.list_releases(&self.app_id)?;
        let strategy = strategy_for(view, &releases, &self.config);

        let mut feature = Feature::new(&self.app_id, draft, 0.0)?;
        let siblings = members(strategy.as_ref(), &features, &strategy.key_of(&feature));
        feature.order = next_rank(&siblings);

        self.store.insert_feature(&feature)?;
        info!(app = %self.app_id, feature = %feature.id, order = feature.order, "feature created");
        Ok(feature)
    }

    /// Apply a details edit. The rank is left alone, even when the edit
    /// changes status or release: the feature then sits in its new group with
    /// the rank it had in the old one. Use [`Board::move_feature`] to place a
    /// feature with a rank computed from its new neighbors.
    pub fn edit_feature(&mut self, feature_id: &str, edit: FeatureEdit) -> Result<Feature> {
        if let Some(Some(release_id)) = &edit.release_id {
            self.store.load_release(&self.app_id, release_id)?;
        }
        let patch = edit.into_patch()?;
        self.store.update_feature(&self.app_id, feature_id, &patch)
    }

    pub fn delete_feature(&mut self, feature_id: &str) -> Result<()> {
        self.store.delete_feature(&self.app_id, feature_id)?;
        info!(app = %self.app_id, feature = %feature_id, "feature deleted");
        Ok(())
    }

    /// Handle a drag of `feature_id` that ended over `over_id` in `view`.
    ///
    /// Returns `Ok(None)` when `over_id` names nothing droppable. Otherwise
    /// exactly one record is written: the moved feature's group and rank.
    pub fn move_feature(
        &mut self,
        feature_id: &str,
        over_id: &str,
        view: BoardView,
    ) -> Result<Option<Feature>> {
        let features = self.features()?;
        if !features.iter().any(|f| f.id == feature_id) {
            return Err(ShipboardError::FeatureNotFound(feature_id.to_string()));
        }
        let releases = self.store.list_releases(&self.app_id)?;
        let strategy = strategy_for(view, &releases, &self.config);

        let Some(target) = resolve_drop(strategy.as_ref(), &features, over_id) else {
            debug!(app = %self.app_id, feature = %feature_id, over = %over_id, "drop ignored");
            return Ok(None);
        };

        let planned = plan_move(strategy.as_ref(), &features, feature_id, &target);
        debug!(
            app = %self.app_id,
            feature = %feature_id,
            group = %planned.group,
            order = planned.order,
            "move computed"
        );

        match self
            .store
            .update_feature(&self.app_id, feature_id, &planned.patch())
        {
            Ok(feature) => {
                info!(
                    app = %self.app_id,
                    feature = %feature_id,
                    group = %planned.group,
                    order = planned.order,
                    "feature moved"
                );
                Ok(Some(feature))
            }
            Err(e) => {
                warn!(app = %self.app_id, feature = %feature_id, error = %e, "move not persisted");
                Err(e)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Import
    // -----------------------------------------------------------------------

    /// Create every release and feature in `plan`. Releases go after the
    /// existing ones; features are ranked 1..=n inside their release.
    pub fn import_plan(&mut self, plan: &Plan) -> Result<ImportSummary> {
        plan.validate()?;
        debug!(
            app = %self.app_id,
            releases = plan.releases.len(),
            features = plan.feature_count(),
            "importing plan"
        );

        let base = next_rank(&self.store.list_releases(&self.app_id)?);
        let mut summary = ImportSummary::default();

        for (ri, planned) in plan.releases.iter().enumerate() {
            let release = Release::new(&self.app_id, &planned.name, base + ri as f64)?;
            self.store.insert_release(&release)?;
            summary.releases += 1;

            for (fi, pf) in planned.features.iter().enumerate() {
                let draft = NewFeature::named(pf.name.as_str())
                    .with_description(pf.description.as_str())
                    .with_status(FeatureStatus::Backlog)
                    .in_release(release.id.as_str());
                let feature = Feature::new(&self.app_id, draft, (fi + 1) as f64)?;
                self.store.insert_feature(&feature)?;
                summary.features += 1;
            }
        }

        info!(
            app = %self.app_id,
            releases = summary.releases,
            features = summary.features,
            "plan imported"
        );
        Ok(summary)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::grouping::GroupKey;
    use crate::plan::{PlannedFeature, PlannedRelease};
    use crate::store::MemoryStore;
    use crate::types::AppKind;

    fn setup() -> (MemoryStore, String) {
        let mut store = MemoryStore::new();
        let app = App::new("Launchpad", AppKind::Web).unwrap();
        store.save_app(&app).unwrap();
        (store, app.id)
    }

    fn names(group: &FeatureGroup) -> Vec<&str> {
        group.features.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn open_unknown_app_fails() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            Board::open(&mut store, "ghost", BoardConfig::default()),
            Err(ShipboardError::AppNotFound(_))
        ));
    }

    #[test]
    fn releases_created_in_sequence() {
        let (mut store, app) = setup();
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        let a = board.create_release("MVP").unwrap();
        let b = board.create_release("V2").unwrap();
        assert_eq!(a.order, 1.0);
        assert_eq!(b.order, 2.0);
    }

    #[test]
    fn feature_created_one_past_group_max() {
        let (mut store, app) = setup();
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        let r1 = board.create_release("MVP").unwrap();

        let a = board
            .create_feature(NewFeature::named("a").in_release(&r1.id), BoardView::Release)
            .unwrap();
        let b = board
            .create_feature(NewFeature::named("b").in_release(&r1.id), BoardView::Release)
            .unwrap();
        let loose = board
            .create_feature(NewFeature::named("loose"), BoardView::Release)
            .unwrap();
        assert_eq!(a.order, 1.0);
        assert_eq!(b.order, 2.0);
        // Different group: starts at 1 again.
        assert_eq!(loose.order, 1.0);

        let live = board
            .create_feature(
                NewFeature::named("shipped").with_status(FeatureStatus::Live),
                BoardView::Status,
            )
            .unwrap();
        assert_eq!(live.order, 1.0);
    }

    #[test]
    fn create_feature_in_unknown_release_fails() {
        let (mut store, app) = setup();
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        assert!(matches!(
            board.create_feature(NewFeature::named("x").in_release("ghost"), BoardView::Release),
            Err(ShipboardError::ReleaseNotFound(_))
        ));
    }

    #[test]
    fn move_before_neighbor_then_regroup() {
        let (mut store, app) = setup();
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        let r1 = board.create_release("R1").unwrap();
        let r2 = board.create_release("R2").unwrap();
        for name in ["A", "B", "C"] {
            board
                .create_feature(NewFeature::named(name).in_release(&r1.id), BoardView::Release)
                .unwrap();
        }
        let d = board
            .create_feature(NewFeature::named("D").in_release(&r2.id), BoardView::Release)
            .unwrap();
        let b_id = board
            .features()
            .unwrap()
            .into_iter()
            .find(|f| f.name == "B")
            .unwrap()
            .id;

        let moved = board
            .move_feature(&d.id, &b_id, BoardView::Release)
            .unwrap()
            .unwrap();
        assert_eq!(moved.order, 1.5);
        assert_eq!(moved.release_id.as_deref(), Some(r1.id.as_str()));

        let groups = board.grouped(BoardView::Release).unwrap();
        assert_eq!(names(&groups[0]), vec!["A", "D", "B", "C"]);
        assert!(groups[1].features.is_empty());
    }

    /// Delegates to a `MemoryStore`, except that the `fail_on`-th feature
    /// update (1-based) fails.
    struct FlakyStore {
        inner: MemoryStore,
        fail_on: usize,
        updates: usize,
    }

    impl FlakyStore {
        fn new(inner: MemoryStore, fail_on: usize) -> Self {
            Self {
                inner,
                fail_on,
                updates: 0,
            }
        }
    }

    impl Store for FlakyStore {
        fn list_apps(&self) -> Result<Vec<App>> {
            self.inner.list_apps()
        }
        fn load_app(&self, app_id: &str) -> Result<App> {
            self.inner.load_app(app_id)
        }
        fn save_app(&mut self, app: &App) -> Result<()> {
            self.inner.save_app(app)
        }
        fn list_features(&self, app_id: &str) -> Result<Vec<Feature>> {
            self.inner.list_features(app_id)
        }
        fn load_feature(&self, app_id: &str, feature_id: &str) -> Result<Feature> {
            self.inner.load_feature(app_id, feature_id)
        }
        fn insert_feature(&mut self, feature: &Feature) -> Result<()> {
            self.inner.insert_feature(feature)
        }
        fn update_feature(
            &mut self,
            app_id: &str,
            feature_id: &str,
            patch: &FeaturePatch,
        ) -> Result<Feature> {
            self.updates += 1;
            if self.updates == self.fail_on {
                return Err(ShipboardError::Persistence("disk full".to_string()));
            }
            self.inner.update_feature(app_id, feature_id, patch)
        }
        fn delete_feature(&mut self, app_id: &str, feature_id: &str) -> Result<()> {
            self.inner.delete_feature(app_id, feature_id)
        }
        fn list_releases(&self, app_id: &str) -> Result<Vec<Release>> {
            self.inner.list_releases(app_id)
        }
        fn load_release(&self, app_id: &str, release_id: &str) -> Result<Release> {
            self.inner.load_release(app_id, release_id)
        }
        fn insert_release(&mut self, release: &Release) -> Result<()> {
            self.inner.insert_release(release)
        }
        fn update_release(
            &mut self,
            app_id: &str,
            release_id: &str,
            patch: &ReleasePatch,
        ) -> Result<Release> {
            self.inner.update_release(app_id, release_id, patch)
        }
        fn delete_release(&mut self, app_id: &str, release_id: &str) -> Result<()> {
            self.inner.delete_release(app_id, release_id)
        }
    }

    #[test]
    fn failed_move_changes_nothing() {
        let (inner, app) = setup();
        let mut store = FlakyStore::new(inner, 1);
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        let r1 = board.create_release("R1").unwrap();
        let a = board
            .create_feature(NewFeature::named("A").in_release(&r1.id), BoardView::Release)
            .unwrap();
        let before = board.grouped(BoardView::Release).unwrap();

        let err = board
            .move_feature(&a.id, "unassigned", BoardView::Release)
            .unwrap_err();
        assert!(matches!(err, ShipboardError::Persistence(_)));
        assert_eq!(board.grouped(BoardView::Release).unwrap(), before);
    }

    /// Group keys, feature names and ranks, ignoring timestamps.
    fn layout<S: Store + ?Sized>(board: &Board<'_, S>) -> Vec<(String, Vec<(String, f64)>)> {
        board
            .grouped(BoardView::Release)
            .unwrap()
            .into_iter()
            .map(|g| {
                let features = g.features.into_iter().map(|f| (f.name, f.order)).collect();
                (g.key.to_string(), features)
            })
            .collect()
    }

    #[test]
    fn failed_release_delete_restores_features() {
        let (inner, app) = setup();
        let mut store = FlakyStore::new(inner, 2);
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        let r1 = board.create_release("release1").unwrap();
        for name in ["X", "Y"] {
            board
                .create_feature(NewFeature::named(name).in_release(&r1.id), BoardView::Release)
                .unwrap();
        }
        let before = layout(&board);
        assert_eq!(before.len(), 1);

        let err = board.delete_release(&r1.id).unwrap_err();
        assert!(matches!(err, ShipboardError::Persistence(_)));
        assert_eq!(layout(&board), before);
        assert_eq!(board.releases().unwrap().len(), 1);
        assert!(board
            .features()
            .unwrap()
            .iter()
            .all(|f| f.release_id.as_deref() == Some(r1.id.as_str())));
    }

    #[test]
    fn move_to_unknown_target_is_ignored() {
        let (mut store, app) = setup();
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        let f = board
            .create_feature(NewFeature::named("x"), BoardView::Release)
            .unwrap();
        assert_eq!(board.move_feature(&f.id, "nowhere", BoardView::Release).unwrap(), None);
        assert_eq!(board.feature(&f.id).unwrap().order, f.order);
    }

    #[test]
    fn move_unknown_feature_fails() {
        let (mut store, app) = setup();
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        assert!(matches!(
            board.move_feature("ghost", "unassigned", BoardView::Release),
            Err(ShipboardError::FeatureNotFound(_))
        ));
    }

    #[test]
    fn drop_on_status_column_appends() {
        let (mut store, app) = setup();
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        let a = board
            .create_feature(NewFeature::named("a").with_status(FeatureStatus::Testing), BoardView::Status)
            .unwrap();
        let b = board
            .create_feature(NewFeature::named("b"), BoardView::Status)
            .unwrap();
        let moved = board
            .move_feature(&b.id, "testing", BoardView::Status)
            .unwrap()
            .unwrap();
        assert_eq!(moved.status, FeatureStatus::Testing);
        assert_eq!(moved.order, a.order + 1.0);
    }

    #[test]
    fn delete_release_unassigns_and_keeps_ranks() {
        let (mut store, app) = setup();
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        let r1 = board.create_release("release1").unwrap();
        let x = board
            .create_feature(NewFeature::named("X").in_release(&r1.id), BoardView::Release)
            .unwrap();
        let y = board
            .create_feature(NewFeature::named("Y").in_release(&r1.id), BoardView::Release)
            .unwrap();

        let unassigned = board.delete_release(&r1.id).unwrap();
        assert_eq!(unassigned.len(), 2);
        assert!(unassigned.iter().all(|f| f.release_id.is_none()));
        assert!(board.releases().unwrap().is_empty());

        let groups = board.grouped(BoardView::Release).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, GroupKey::Release(None));
        assert_eq!(names(&groups[0]), vec!["X", "Y"]);
        assert_eq!(groups[0].features[0].order, x.order);
        assert_eq!(groups[0].features[1].order, y.order);
    }

    #[test]
    fn move_release_reorders_board() {
        let (mut store, app) = setup();
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        let a = board.create_release("A").unwrap();
        let b = board.create_release("B").unwrap();
        let c = board.create_release("C").unwrap();

        let moved = board.move_release(&c.id, Some(&a.id)).unwrap();
        assert_eq!(moved.order, 0.5);
        board.move_release(&a.id, None).unwrap();

        let order: Vec<_> = board
            .releases()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(order, vec!["C", "B", "A"]);
        assert!(matches!(
            board.move_release(&b.id, Some("ghost")),
            Err(ShipboardError::ReleaseNotFound(_))
        ));
    }

    #[test]
    fn edit_keeps_rank() {
        let (mut store, app) = setup();
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        let r1 = board.create_release("R1").unwrap();
        let f = board
            .create_feature(NewFeature::named("f").in_release(&r1.id), BoardView::Release)
            .unwrap();
        let edited = board
            .edit_feature(
                &f.id,
                FeatureEdit {
                    description: Some("details".to_string()),
                    status: Some(FeatureStatus::Complete),
                    release_id: Some(None),
                    ..FeatureEdit::default()
                },
            )
            .unwrap();
        assert_eq!(edited.order, f.order);
        assert_eq!(edited.status, FeatureStatus::Complete);
        assert_eq!(edited.release_id, None);
        assert_eq!(edited.description, "details");
    }

    #[test]
    fn import_plan_ranks_releases_after_existing() {
        let (mut store, app) = setup();
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        board.create_release("Existing").unwrap();

        let plan = Plan {
            releases: vec![
                PlannedRelease {
                    name: "MVP".to_string(),
                    features: vec![
                        PlannedFeature {
                            name: "Sign up".to_string(),
                            description: String::new(),
                        },
                        PlannedFeature {
                            name: "Profile".to_string(),
                            description: "Edit profile".to_string(),
                        },
                    ],
                },
                PlannedRelease {
                    name: "V2".to_string(),
                    features: Vec::new(),
                },
            ],
        };
        let summary = board.import_plan(&plan).unwrap();
        assert_eq!(summary, ImportSummary { releases: 2, features: 2 });

        let releases = board.releases().unwrap();
        let orders: Vec<_> = releases.iter().map(|r| (r.name.as_str(), r.order)).collect();
        assert_eq!(orders, vec![("Existing", 1.0), ("MVP", 2.0), ("V2", 3.0)]);

        let groups = board.grouped(BoardView::Release).unwrap();
        assert_eq!(names(&groups[1]), vec!["Sign up", "Profile"]);
        assert!(groups[1]
            .features
            .iter()
            .all(|f| f.status == FeatureStatus::Backlog));
    }

    #[test]
    fn invalid_plan_writes_nothing() {
        let (mut store, app) = setup();
        let mut board = Board::open(&mut store, &app, BoardConfig::default()).unwrap();
        let plan = Plan {
            releases: vec![PlannedRelease {
                name: "  ".to_string(),
                features: Vec::new(),
            }],
        };
        assert!(board.import_plan(&plan).is_err());
        assert!(board.releases().unwrap().is_empty());
    }
}
