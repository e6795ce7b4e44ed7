use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::ir::Entity;

pub const ZONE_SEPARATOR: &str = "+";
/// Key of the zone holding entities with no (resolvable) membership.
pub const UNASSIGNED_ZONE: &str = "";

/// Canonical key for a membership set: sorted, de-duplicated ids joined by `+`.
pub fn zone_key<S: AsRef<str>>(membership: &[S]) -> String {
    let ids: BTreeSet<&str> = membership.iter().map(|id| id.as_ref()).collect();
    ids.into_iter().collect::<Vec<_>>().join(ZONE_SEPARATOR)
}

/// The entity's membership restricted to known groups, sorted and de-duplicated.
pub fn effective_membership(entity: &Entity, known_groups: &BTreeSet<&str>) -> Vec<String> {
    let mut ids = BTreeSet::new();
    for id in &entity.membership {
        if known_groups.contains(id.as_str()) {
            ids.insert(id.as_str());
        } else {
            debug!(entity:% = entity.id, group:% = id; "Dropping membership in unknown group");
        }
    }
    ids.into_iter().map(str::to_string).collect()
}

/// Zone members in index-within-zone order, keyed by zone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneIndex {
    zones: BTreeMap<String, Vec<usize>>,
}

impl ZoneIndex {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.zones
            .iter()
            .map(|(key, members)| (key.as_str(), members.as_slice()))
    }

    pub fn members(&self, key: &str) -> &[usize] {
        self.zones.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// Buckets entity indices by zone key. Zones iterate in key order and members
/// keep the order of `keys`, so index-within-zone never depends on hashing.
pub fn group_by_zone<S: AsRef<str>>(keys: &[S]) -> ZoneIndex {
    let mut zones: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, key) in keys.iter().enumerate() {
        zones.entry(key.as_ref().to_string()).or_default().push(idx);
    }
    ZoneIndex { zones }
}
