use crate::feature::{Feature, FeaturePatch};
use crate::grouping::{members, GroupKey, GroupingStrategy};
use crate::rank::{compute_new_rank, DropReference};
use serde::Serialize;

/// Where a drag ended, resolved against a board view.
#[derive(Debug, Clone, PartialEq)]
pub enum DropTarget {
    /// Empty space inside a group.
    Container(GroupKey),
    /// On top of a feature card in `group`.
    Item { group: GroupKey, feature_id: String },
}

impl DropTarget {
    pub fn group(&self) -> &GroupKey {
        match self {
            DropTarget::Container(group) => group,
            DropTarget::Item { group, .. } => group,
        }
    }

    fn reference(&self) -> DropReference<'_> {
        match self {
            DropTarget::Container(_) => DropReference::Container,
            DropTarget::Item { feature_id, .. } => DropReference::Before(feature_id),
        }
    }
}

/// The single record write a move produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedMove {
    pub feature_id: String,
    pub group: GroupKey,
    pub order: f64,
}

impl PlannedMove {
    pub fn patch(&self) -> FeaturePatch {
        FeaturePatch::placement(&self.group, self.order)
    }
}

/// Resolve the id a drag ended over. Container ids win over feature ids;
/// an id that is neither yields `None` and the drop is ignored.
pub fn resolve_drop<S: GroupingStrategy + ?Sized>(
    strategy: &S,
    features: &[Feature],
    over_id: &str,
) -> Option<DropTarget> {
    if let Some(group) = strategy.container(over_id) {
        return Some(DropTarget::Container(group));
    }
    features
        .iter()
        .find(|f| f.id == over_id)
        .map(|f| DropTarget::Item {
            group: strategy.key_of(f),
            feature_id: f.id.clone(),
        })
}

/// Compute the move for `feature_id` dropped on `target`, using the snapshot
/// in `features`. Nothing is written.
pub fn plan_move<S: GroupingStrategy + ?Sized>(
    strategy: &S,
    features: &[Feature],
    feature_id: &str,
    target: &DropTarget,
) -> PlannedMove {
    let group = target.group().clone();
    let siblings = members(strategy, features, &group);
    let order = compute_new_rank(feature_id, target.reference(), &siblings);
    PlannedMove {
        feature_id: feature_id.to_string(),
        group,
        order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::NewFeature;
    use crate::grouping::{group_features, ByRelease, ByStatus};
    use crate::release::Release;
    use crate::types::FeatureStatus;

    fn feature(id: &str, release: Option<&str>, status: FeatureStatus, order: f64) -> Feature {
        let mut draft = NewFeature::named(id).with_status(status);
        draft.release_id = release.map(str::to_string);
        let mut f = Feature::new("app", draft, order).unwrap();
        f.id = id.to_string();
        f
    }

    fn release(id: &str, order: f64) -> Release {
        let mut r = Release::new("app", id, order).unwrap();
        r.id = id.to_string();
        r
    }

    fn apply(features: &mut [Feature], planned: &PlannedMove) {
        let f = features
            .iter_mut()
            .find(|f| f.id == planned.feature_id)
            .unwrap();
        f.apply(&planned.patch());
    }

    #[test]
    fn resolve_release_containers_and_items() {
        let releases = vec![release("r1", 1.0)];
        let features = vec![feature("a", Some("r1"), FeatureStatus::Backlog, 1.0)];
        let strategy = ByRelease::new(&releases);

        assert_eq!(
            resolve_drop(&strategy, &features, "unassigned"),
            Some(DropTarget::Container(GroupKey::Release(None)))
        );
        assert_eq!(
            resolve_drop(&strategy, &features, "r1"),
            Some(DropTarget::Container(GroupKey::Release(Some("r1".into()))))
        );
        assert_eq!(
            resolve_drop(&strategy, &features, "a"),
            Some(DropTarget::Item {
                group: GroupKey::Release(Some("r1".into())),
                feature_id: "a".into(),
            })
        );
        assert_eq!(resolve_drop(&strategy, &features, "nowhere"), None);
    }

    #[test]
    fn resolve_status_item_uses_its_column() {
        let features = vec![feature("a", Some("r1"), FeatureStatus::Testing, 1.0)];
        assert_eq!(
            resolve_drop(&ByStatus, &features, "a"),
            Some(DropTarget::Item {
                group: GroupKey::Status(FeatureStatus::Testing),
                feature_id: "a".into(),
            })
        );
        assert_eq!(
            resolve_drop(&ByStatus, &features, "complete"),
            Some(DropTarget::Container(GroupKey::Status(FeatureStatus::Complete)))
        );
    }

    #[test]
    fn move_between_releases_lands_before_reference() {
        let releases = vec![release("r1", 1.0), release("r2", 2.0)];
        let mut features = vec![
            feature("a", Some("r1"), FeatureStatus::Backlog, 1.0),
            feature("b", Some("r1"), FeatureStatus::Backlog, 2.0),
            feature("c", Some("r1"), FeatureStatus::Backlog, 3.0),
            feature("d", Some("r2"), FeatureStatus::Backlog, 5.0),
        ];
        let strategy = ByRelease::new(&releases);
        let target = resolve_drop(&strategy, &features, "b").unwrap();
        let planned = plan_move(&strategy, &features, "d", &target);

        assert_eq!(planned.order, 1.5);
        assert_eq!(planned.group, GroupKey::Release(Some("r1".into())));

        apply(&mut features, &planned);
        let groups = group_features(&strategy, &features);
        let order: Vec<_> = groups[0].features.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(order, vec!["a", "d", "b", "c"]);
        assert!(groups[1].features.is_empty());
    }

    #[test]
    fn move_to_unassigned_container_appends() {
        let releases = vec![release("r1", 1.0)];
        let features = vec![
            feature("a", Some("r1"), FeatureStatus::Backlog, 1.0),
            feature("x", None, FeatureStatus::Backlog, 4.0),
        ];
        let strategy = ByRelease::new(&releases);
        let target = resolve_drop(&strategy, &features, "unassigned").unwrap();
        let planned = plan_move(&strategy, &features, "a", &target);
        assert_eq!(planned.order, 5.0);
        assert_eq!(planned.patch().release_id, Some(None));
    }

    #[test]
    fn move_into_empty_status_column_gets_one() {
        let features = vec![feature("a", None, FeatureStatus::Backlog, 9.0)];
        let target = resolve_drop(&ByStatus, &features, "live").unwrap();
        let planned = plan_move(&ByStatus, &features, "a", &target);
        assert_eq!(planned.order, 1.0);
        let patch = planned.patch();
        assert_eq!(patch.status, Some(FeatureStatus::Live));
        assert_eq!(patch.release_id, None);
    }

    #[test]
    fn reorder_within_status_column_to_head() {
        let mut features = vec![
            feature("a", None, FeatureStatus::Backlog, 4.0),
            feature("b", None, FeatureStatus::Backlog, 6.0),
        ];
        let target = resolve_drop(&ByStatus, &features, "a").unwrap();
        let planned = plan_move(&ByStatus, &features, "b", &target);
        assert_eq!(planned.order, 2.0);
        apply(&mut features, &planned);
        let groups = group_features(&ByStatus, &features);
        let order: Vec<_> = groups[0].features.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn stale_snapshots_may_choose_the_same_rank() {
        let features = vec![
            feature("a", None, FeatureStatus::Backlog, 1.0),
            feature("b", None, FeatureStatus::Backlog, 2.0),
            feature("x", None, FeatureStatus::Testing, 1.0),
            feature("y", None, FeatureStatus::Testing, 2.0),
        ];
        let target = resolve_drop(&ByStatus, &features, "b").unwrap();
        let first = plan_move(&ByStatus, &features, "x", &target);
        let second = plan_move(&ByStatus, &features, "y", &target);
        // Each is consistent with the snapshot it saw.
        assert_eq!(first.order, 1.5);
        assert_eq!(second.order, 1.5);
    }
}
