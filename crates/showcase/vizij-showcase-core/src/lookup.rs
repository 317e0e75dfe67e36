//! Name → animation group resolution.
//!
//! Built once at attach time from the host's scene groups. The car subset holds the
//! groups animating any node under the root (root included). Lookup order:
//! exact car name, exact scene name, then (fuzzy policy only) the first car group
//! whose normalized name contains the normalized query, then the first scene group.

use hashbrown::{HashMap, HashSet};

use crate::config::MatchPolicy;
use crate::host::Host;
use crate::ids::{GroupId, NodeId};

/// Trimmed, lowercased form used for substring matching.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Clone, Debug)]
struct Entry {
    id: GroupId,
    name: String,
    normalized: String,
}

#[derive(Clone, Debug, Default)]
pub struct GroupIndex {
    scene: Vec<Entry>,
    car: Vec<Entry>,
    scene_by_name: HashMap<String, GroupId>,
    car_by_name: HashMap<String, GroupId>,
    policy: MatchPolicy,
}

/// Root plus every descendant the host reports. A failed walk keeps just the root.
pub fn collect_hierarchy(host: &dyn Host, root: NodeId) -> HashSet<NodeId> {
    let mut set = HashSet::new();
    set.insert(root);
    match host.descendants(root) {
        Ok(nodes) => set.extend(nodes),
        Err(err) => log::debug!("descendant walk from {root:?} failed: {err}"),
    }
    set
}

/// Later duplicates overwrite earlier ones, as with a map filled in scene order.
fn name_map(entries: &[Entry]) -> HashMap<String, GroupId> {
    let mut map = HashMap::with_capacity(entries.len());
    for e in entries {
        map.insert(e.name.clone(), e.id);
    }
    map
}

impl GroupIndex {
    /// Snapshot the scene's groups and split out those targeting `car_nodes`.
    pub fn build(host: &dyn Host, car_nodes: &HashSet<NodeId>, policy: MatchPolicy) -> Self {
        let mut scene = Vec::new();
        let mut car = Vec::new();
        for id in host.animation_groups() {
            let Some(info) = host.group_info(id) else {
                continue;
            };
            let entry = Entry {
                id,
                normalized: normalize_name(&info.name),
                name: info.name,
            };
            if host
                .group_targets(id)
                .iter()
                .any(|node| car_nodes.contains(node))
            {
                car.push(entry.clone());
            }
            scene.push(entry);
        }
        Self {
            scene_by_name: name_map(&scene),
            car_by_name: name_map(&car),
            scene,
            car,
            policy,
        }
    }

    pub fn scene_groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.scene.iter().map(|e| e.id)
    }

    pub fn car_groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.car.iter().map(|e| e.id)
    }

    pub fn find(&self, name: &str) -> Option<GroupId> {
        if let Some(id) = self
            .car_by_name
            .get(name)
            .or_else(|| self.scene_by_name.get(name))
        {
            return Some(*id);
        }
        if self.policy == MatchPolicy::Exact {
            return None;
        }
        let query = normalize_name(name);
        if query.is_empty() {
            log::debug!("blank group name {name:?} skips the substring fallback");
            return None;
        }
        Self::find_containing(&self.car, &query)
            .or_else(|| Self::find_containing(&self.scene, &query))
    }

    fn find_containing(entries: &[Entry], query: &str) -> Option<GroupId> {
        let mut hits = entries.iter().filter(|e| e.normalized.contains(query));
        let first = hits.next()?;
        let others: Vec<&str> = hits.map(|e| e.name.as_str()).collect();
        if !others.is_empty() {
            log::debug!("'{query}' also matches {others:?}; using '{}'", first.name);
        }
        Some(first.id)
    }

    /// Resolve each name, dropping the ones that do not match.
    pub fn find_all<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Vec<GroupId> {
        names.into_iter().filter_map(|n| self.find(n)).collect()
    }
}
