use std::collections::{BTreeMap, HashMap};

use crate::error::ResolveError;

/// Looks up the classes declared directly inside a class.
pub trait ClassResolver {
    /// Binary names (`pkg.Outer$Inner`) of the member classes of `class_name`.
    fn nested_classes(&self, class_name: &str) -> Result<Vec<String>, ResolveError>;
}

/// Resolver over a precomputed class -> nested classes table.
#[derive(Debug, Clone, Default)]
pub struct NestedClassMap {
    classes: HashMap<String, Vec<String>>,
}

impl NestedClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class_name: impl Into<String>, nested: Vec<String>) {
        self.classes.insert(class_name.into(), nested);
    }
}

impl From<BTreeMap<String, Vec<String>>> for NestedClassMap {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            classes: map.into_iter().collect(),
        }
    }
}

impl ClassResolver for NestedClassMap {
    fn nested_classes(&self, class_name: &str) -> Result<Vec<String>, ResolveError> {
        self.classes
            .get(class_name)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(class_name.to_string()))
    }
}

/// Asks each resolver in turn. The first success wins; when all fail, the
/// first error other than `NotFound` is reported, else `NotFound`.
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn ClassResolver>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, resolver: impl ClassResolver + 'static) {
        self.resolvers.push(Box::new(resolver));
    }
}

impl ClassResolver for ResolverChain {
    fn nested_classes(&self, class_name: &str) -> Result<Vec<String>, ResolveError> {
        let mut failure = None;
        for resolver in &self.resolvers {
            match resolver.nested_classes(class_name) {
                Ok(nested) => return Ok(nested),
                Err(err) if err.is_not_found() => {}
                Err(err) => {
                    if failure.is_none() {
                        failure = Some(err);
                    }
                }
            }
        }
        Err(failure.unwrap_or_else(|| ResolveError::NotFound(class_name.to_string())))
    }
}
