use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::{Map, Value};
use tracing::debug;

use crate::projection::{ContainerShape, ProjectedValue, ProjectionError};

/// One populated slot: resolved name, realized value and visibility tag.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    /// `None` when the name computation produced null at evaluation time.
    pub name: Option<String>,
    pub value: ProjectedValue,
    pub auto_selected: bool,
}

impl PropertyEntry {
    pub fn new(name: Option<String>, value: ProjectedValue, auto_selected: bool) -> Self {
        Self { name, value, auto_selected }
    }

    fn is_visible(&self, include_auto_selected: bool) -> bool {
        include_auto_selected || !self.auto_selected
    }
}

/// Realized projection for one row.
///
/// Each level holds exactly `shape.capacity()` entries; an overflow level also
/// owns the container with the remaining entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyContainer {
    shape: ContainerShape,
    entries: Vec<PropertyEntry>,
    next: Option<Box<PropertyContainer>>,
}

impl PropertyContainer {
    pub fn empty() -> Self {
        Self { shape: ContainerShape::Empty, entries: Vec::new(), next: None }
    }

    /// Assemble a level by hand, validating it against its shape.
    pub fn from_parts(
        shape: ContainerShape,
        entries: Vec<PropertyEntry>,
        next: Option<PropertyContainer>,
    ) -> Result<Self, ProjectionError> {
        shape.check(entries.len(), next.is_some())?;
        Ok(Self { shape, entries, next: next.map(Box::new) })
    }

    /// Level built by a compiled plan, whose shapes are correct by construction.
    pub(crate) fn assemble(shape: ContainerShape, entries: Vec<PropertyEntry>, next: Option<PropertyContainer>) -> Self {
        debug_assert!(
            shape.check(entries.len(), next.is_some()).is_ok(),
            "container level does not match shape {shape}"
        );
        Self { shape, entries, next: next.map(Box::new) }
    }

    pub fn shape(&self) -> ContainerShape {
        self.shape
    }

    /// Entries of this level only.
    pub fn entries(&self) -> &[PropertyEntry] {
        &self.entries
    }

    /// Nested overflow container.
    pub fn next(&self) -> Option<&PropertyContainer> {
        self.next.as_deref()
    }

    /// All entries across the overflow chain, in declaration order.
    pub fn iter(&self) -> Entries<'_> {
        Entries { level: Some(self), index: 0 }
    }

    /// Total entries across the overflow chain.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Flatten into an ordered name/value mapping.
    ///
    /// Auto-selected entries are skipped unless `include_auto_selected`.
    /// Entries whose name resolved to null are always skipped. When two
    /// entries share a name the later value wins.
    pub fn to_dictionary(&self, include_auto_selected: bool) -> IndexMap<String, ProjectedValue> {
        let mut out = IndexMap::with_capacity(self.len());
        for entry in self.iter() {
            if !entry.is_visible(include_auto_selected) {
                continue;
            }
            match &entry.name {
                Some(name) => { out.insert(name.clone(), entry.value.clone()); }
                None => debug!("skipping projected property whose name resolved to null"),
            }
        }
        out
    }

    /// Owning variant of [`Self::to_dictionary`].
    pub fn into_dictionary(self, include_auto_selected: bool) -> IndexMap<String, ProjectedValue> {
        let mut out = IndexMap::new();
        let mut level = Some(self);
        while let Some(container) = level {
            for entry in container.entries {
                if !entry.is_visible(include_auto_selected) {
                    continue;
                }
                if let Some(name) = entry.name {
                    out.insert(name, entry.value);
                }
            }
            level = container.next.map(|next| *next);
        }
        out
    }

    /// Materialize as a JSON object, recursively.
    pub fn to_json(&self, include_auto_selected: bool) -> Value {
        let mut out = Map::new();
        for (name, value) in self.to_dictionary(include_auto_selected) {
            out.insert(name, value.to_json(include_auto_selected));
        }
        Value::Object(out)
    }
}

impl Default for PropertyContainer {
    fn default() -> Self {
        Self::empty()
    }
}

/// Serializes the client-visible view (auto-selected entries hidden).
impl Serialize for PropertyContainer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let dict = self.to_dictionary(false);
        let mut map = serializer.serialize_map(Some(dict.len()))?;
        for (name, value) in &dict {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Iterator over the entries of a container and its overflow chain.
pub struct Entries<'a> {
    level: Option<&'a PropertyContainer>,
    index: usize,
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a PropertyEntry;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(level) = self.level {
            if let Some(entry) = level.entries.get(self.index) {
                self.index += 1;
                return Some(entry);
            }
            self.level = level.next();
            self.index = 0;
        }
        None
    }
}

impl<'a> IntoIterator for &'a PropertyContainer {
    type Item = &'a PropertyEntry;
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
