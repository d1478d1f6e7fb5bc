use std::cmp::Ordering;

use crate::data::model::{Group, GroupKey, TypeRank};

// ---------------------------------------------------------------------------
// Point order
// ---------------------------------------------------------------------------

fn cmp_keys(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Stable-sort a group's points by ordering key and record its minimum.
pub fn sort_points(group: &mut Group<'_>) {
    group.points.sort_by(|a, b| cmp_keys(a.key, b.key));
    group.min_key = group.points.first().map(|p| p.key);
}

// ---------------------------------------------------------------------------
// Group order
// ---------------------------------------------------------------------------

/// Order groups by their smallest ordering key; equal minima keep the order
/// in which the groups first appeared in the input.
pub fn order_by_min_key(groups: &mut [Group<'_>]) {
    groups.iter_mut().for_each(sort_points);
    groups.sort_by(|a, b| {
        cmp_keys(
            a.min_key.unwrap_or(f64::INFINITY),
            b.min_key.unwrap_or(f64::INFINITY),
        )
        .then(a.first_seen.cmp(&b.first_seen))
    });
}

/// Order by feature type: all polyline groups first, by type then counter,
/// then all isolated points by type. Types and counters use [`TypeRank`]
/// (numeric before text). Ties keep first-appearance order.
pub fn order_by_type(groups: &mut [Group<'_>]) {
    groups.iter_mut().for_each(sort_points);
    groups.sort_by(|a, b| {
        rank(a)
            .cmp(&rank(b))
            .then(a.first_seen.cmp(&b.first_seen))
    });
}

/// (isolated?, type rank, counter rank) for [`order_by_type`].
fn rank<'g>(group: &'g Group<'_>) -> (bool, TypeRank<'g>, Option<TypeRank<'g>>) {
    match &group.key {
        GroupKey::Polyline {
            feature_type,
            counter,
        } => (false, TypeRank::of(feature_type), Some(TypeRank::of(counter))),
        GroupKey::Isolated(_) => {
            let feature_type = group
                .points
                .first()
                .map(|p| p.code.feature_type.as_str())
                .unwrap_or("");
            (true, TypeRank::of(feature_type), None)
        }
    }
}
