//! Parsed inventory: ordered records plus a `domain → role → name` index.
//!
//! `objects` keeps every record in stream order, duplicates included.  The
//! index keeps one entry per `(domain, role, name)`; when a key repeats, the
//! later record wins.  Only `objects` is serialised — the index is rebuilt on
//! load, so a JSON snapshot can never disagree with itself.

use std::collections::HashMap;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use crate::record::ObjectRecord;

/// role → name → position in `objects`.
pub type RoleIndex = HashMap<String, HashMap<String, usize>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Inventory {
    pub project: String,
    pub version: String,
    objects:     Vec<ObjectRecord>,
    #[serde(skip)]
    domains:     HashMap<String, RoleIndex>,
}

// Helper used only during deserialization; the index is derived data.
#[derive(Deserialize)]
struct InventoryRaw {
    project: String,
    version: String,
    #[serde(default)]
    objects: Vec<ObjectRecord>,
}

impl<'de> Deserialize<'de> for Inventory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = InventoryRaw::deserialize(deserializer)?;
        let mut inventory = Inventory::new(raw.project, raw.version);
        for object in raw.objects {
            inventory.add_object(object);
        }
        Ok(inventory)
    }
}

impl Inventory {
    pub fn new(project: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            version: version.into(),
            objects: Vec::new(),
            domains: HashMap::new(),
        }
    }

    /// Append `object` and point its `(domain, role, name)` slot at it.
    pub fn add_object(&mut self, object: ObjectRecord) {
        let position = self.objects.len();
        let previous = self.domains
            .entry(object.domain.clone())
            .or_default()
            .entry(object.role.clone())
            .or_default()
            .insert(object.name.clone(), position);
        if let Some(previous) = previous {
            debug!(
                "duplicate inventory key {}:{} {:?}: record #{} replaces #{} in the domain index",
                object.domain, object.role, object.name, position, previous
            );
        }
        self.objects.push(object);
    }

    /// All records, in stream order.
    pub fn objects(&self) -> &[ObjectRecord] {
        &self.objects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObjectRecord> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Last record added under `(domain, role, name)`.
    pub fn get(&self, domain: &str, role: &str, name: &str) -> Option<&ObjectRecord> {
        let position = *self.domains.get(domain)?.get(role)?.get(name)?;
        self.objects.get(position)
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    pub fn roles(&self, domain: &str) -> impl Iterator<Item = &str> {
        self.domains
            .get(domain)
            .into_iter()
            .flat_map(|roles| roles.keys().map(String::as_str))
    }

    /// Indexed records of one `(domain, role)` pair, keyed by name.
    pub fn role(&self, domain: &str, role: &str) -> HashMap<&str, &ObjectRecord> {
        self.domains
            .get(domain)
            .and_then(|roles| roles.get(role))
            .map(|names| {
                names.iter()
                    .map(|(name, &pos)| (name.as_str(), &self.objects[pos]))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a ObjectRecord;
    type IntoIter = std::slice::Iter<'a, ObjectRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
