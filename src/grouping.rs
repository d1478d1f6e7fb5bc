use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::{debug, info};

use crate::code::{parse_record, Notation};
use crate::data::model::{Group, GroupKey, Point, Record};

// ---------------------------------------------------------------------------
// Grouping engine
// ---------------------------------------------------------------------------

/// Partition `records` by (type, counter) in one forward pass.
///
/// Points of a polyline may be scattered anywhere in the input and still
/// land in the same group. Records without a counter each get a singleton
/// group of their own. Groups come back in order of first appearance.
pub fn group_records<'a>(
    records: &'a [Record],
    key_field: usize,
    notation: &Notation,
) -> Vec<Group<'a>> {
    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut isolated = 0usize;

    for (seq, record) in records.iter().enumerate() {
        let code = parse_record(record, notation);
        let key = match &code.counter {
            Some(counter) => GroupKey::Polyline {
                feature_type: code.feature_type.clone(),
                counter: counter.clone(),
            },
            None => {
                isolated += 1;
                GroupKey::Isolated(isolated - 1)
            }
        };
        let point = Point {
            record,
            key: record.ordering_key(key_field),
            seq,
            code,
        };

        if let GroupKey::Isolated(_) = key {
            debug!("line {}: isolated point {:?}", record.line, record.code());
            groups.push(Group::new(key, point));
            continue;
        }

        match index.entry(key) {
            Entry::Occupied(slot) => groups[*slot.get()].points.push(point),
            Entry::Vacant(slot) => {
                let group = Group::new(slot.key().clone(), point);
                slot.insert(groups.len());
                groups.push(group);
            }
        }
    }

    info!(
        "grouped {} records into {} groups ({} isolated)",
        records.len(),
        groups.len(),
        isolated
    );
    groups
}
