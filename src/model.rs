use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The declaration an annotation is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationTarget {
    Class { name: String },
    Method { class: String, name: String },
    Field { class: String, name: String },
}

impl AnnotationTarget {
    pub fn as_class(&self) -> Option<&str> {
        match self {
            AnnotationTarget::Class { name } => Some(name),
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            AnnotationTarget::Class { name } => format!("class {name}"),
            AnnotationTarget::Method { class, name } => format!("method {class}#{name}"),
            AnnotationTarget::Field { class, name } => format!("field {class}#{name}"),
        }
    }
}

/// A literal annotation parameter value as recorded by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AnnotationValue {
    Boolean(bool),
    String(String),
    Integer(i64),
    Class(String),
    ClassArray(Vec<String>),
    Other(String),
}

impl AnnotationValue {
    pub fn kind(&self) -> &'static str {
        match self {
            AnnotationValue::Boolean(_) => "boolean",
            AnnotationValue::String(_) => "string",
            AnnotationValue::Integer(_) => "integer",
            AnnotationValue::Class(_) => "class",
            AnnotationValue::ClassArray(_) => "class_array",
            AnnotationValue::Other(_) => "other",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnnotationValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// A single class literal counts as a one-element array.
    pub fn as_class_array(&self) -> Option<Vec<String>> {
        match self {
            AnnotationValue::Class(name) => Some(vec![name.clone()]),
            AnnotationValue::ClassArray(names) => Some(names.clone()),
            _ => None,
        }
    }
}

/// One usage of an annotation found in the index.
///
/// A key mapped to `None` is present in the source but carries no value;
/// lookups treat it the same as a missing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationOccurrence {
    pub annotation: String,
    pub target: AnnotationTarget,
    #[serde(default)]
    pub values: BTreeMap<String, Option<AnnotationValue>>,
}

impl AnnotationOccurrence {
    pub fn new(annotation: impl Into<String>, target: AnnotationTarget) -> Self {
        Self {
            annotation: annotation.into(),
            target,
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.values.insert(name.into(), Some(value));
        self
    }

    pub fn value(&self, name: &str) -> Option<&AnnotationValue> {
        self.values.get(name).and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub class_name: String,
    pub include_methods: bool,
    pub include_fields: bool,
}

impl RegistrationRecord {
    pub fn new(class_name: impl Into<String>, include_methods: bool, include_fields: bool) -> Self {
        Self {
            class_name: class_name.into(),
            include_methods,
            include_fields,
        }
    }
}
