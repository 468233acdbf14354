//! Fractional ranks.
//!
//! Every ordered record carries a plain `f64` rank. Moving a record computes a
//! single new rank from its destination neighbors, so a move rewrites exactly
//! one record no matter how large the group is. Ranks are never renormalized:
//! repeated inserts at the same boundary halve the gap each time and will
//! eventually collide. Collisions are tolerated; sorting is stable, so tied
//! records keep their listing order.

/// Anything ordered by a fractional rank within its group.
pub trait Ranked {
    fn id(&self) -> &str;
    fn rank(&self) -> f64;
}

impl<T: Ranked + ?Sized> Ranked for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn rank(&self) -> f64 {
        (**self).rank()
    }
}

/// Where a dragged record was dropped inside its destination group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReference<'a> {
    /// Dropped on the group itself: append to the end.
    Container,
    /// Dropped on a sibling: take its place, pushing it down.
    Before(&'a str),
}

/// Rank of a record created in (or appended to) a group.
///
/// One past the current maximum, or `1.0` for an empty group.
pub fn next_rank<T: Ranked>(items: &[T]) -> f64 {
    max_rank(items.iter()).map_or(1.0, |max| max + 1.0)
}

/// Compute the new rank for `moved_id` dropped at `reference`.
///
/// `siblings` are the destination group's records sorted by rank. The moved
/// record is skipped if present, so a reorder within the same group and a
/// move across groups take the same path.
///
/// A `Before` reference that names no sibling falls back to appending. This
/// also covers a record dropped onto itself.
pub fn compute_new_rank<T: Ranked>(
    moved_id: &str,
    reference: DropReference<'_>,
    siblings: &[T],
) -> f64 {
    let others: Vec<&T> = siblings.iter().filter(|s| s.id() != moved_id).collect();

    let Some(max) = max_rank(others.iter().copied()) else {
        return 1.0;
    };

    let DropReference::Before(reference_id) = reference else {
        return max + 1.0;
    };

    match others.iter().position(|s| s.id() == reference_id) {
        Some(0) => others[0].rank() / 2.0,
        Some(i) => (others[i - 1].rank() + others[i].rank()) / 2.0,
        None => max + 1.0,
    }
}

/// Stable ascending sort by rank.
pub fn sort_by_rank<T: Ranked>(items: &mut [T]) {
    items.sort_by(|a, b| a.rank().total_cmp(&b.rank()));
}

fn max_rank<'a, T: Ranked + 'a>(items: impl Iterator<Item = &'a T>) -> Option<f64> {
    items.map(T::rank).reduce(f64::max)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
