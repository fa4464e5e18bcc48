use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::model::AnnotationOccurrence;

/// Read-only catalog of annotation usages.
pub trait AnnotationIndex {
    /// Occurrences of the annotation with this fully qualified name, in index order.
    fn annotations_named(&self, name: &str) -> Vec<&AnnotationOccurrence>;
}

/// Serialized form of an annotation index, as written by `reflect-registrar index`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    #[serde(default)]
    pub occurrences: Vec<AnnotationOccurrence>,
    #[serde(default)]
    pub nested_classes: BTreeMap<String, Vec<String>>,
}

impl IndexDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read index: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse index: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write index: {}", path.display()))
    }

    /// Appends `other`'s occurrences after ours. Nested-class lists for a class
    /// known to both are unioned, keeping first-seen order.
    pub fn merge(&mut self, other: IndexDocument) {
        self.occurrences.extend(other.occurrences);
        for (class, nested) in other.nested_classes {
            let entry = self.nested_classes.entry(class).or_default();
            for name in nested {
                if !entry.contains(&name) {
                    entry.push(name);
                }
            }
        }
    }
}

impl AnnotationIndex for IndexDocument {
    fn annotations_named(&self, name: &str) -> Vec<&AnnotationOccurrence> {
        self.occurrences
            .iter()
            .filter(|o| o.annotation == name)
            .collect()
    }
}

impl AnnotationIndex for [AnnotationOccurrence] {
    fn annotations_named(&self, name: &str) -> Vec<&AnnotationOccurrence> {
        self.iter().filter(|o| o.annotation == name).collect()
    }
}

impl AnnotationIndex for Vec<AnnotationOccurrence> {
    fn annotations_named(&self, name: &str) -> Vec<&AnnotationOccurrence> {
        self.as_slice().annotations_named(name)
    }
}
