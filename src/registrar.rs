//! Reflection registration for classes carrying the marker annotation.
//!
//! Every occurrence of the marker in the index is turned into one record per
//! target class. With `includeNested` set, the member classes of each target
//! are registered as well, all the way down. Records are produced in
//! depth-first pre-order and are never deduplicated.

use serde::Serialize;

use crate::error::{RegistrationError, ResolveError, error_chain};
use crate::index::AnnotationIndex;
use crate::model::{AnnotationOccurrence, AnnotationValue, RegistrationRecord};
use crate::resolver::ClassResolver;

pub const DEFAULT_ANNOTATION: &str = "io.quarkus.runtime.annotations.RegisterForReflection";

const METHODS: &str = "methods";
const FIELDS: &str = "fields";
const INCLUDE_NESTED: &str = "includeNested";
const TARGETS: &str = "targets";

/// Append-only destination for registration records.
pub trait RecordSink {
    fn produce(&mut self, record: RegistrationRecord);
}

impl RecordSink for Vec<RegistrationRecord> {
    fn produce(&mut self, record: RegistrationRecord) {
        self.push(record);
    }
}

/// Receives nested-class lookup failures. Must not fail or block.
pub trait FailureLog {
    fn report(&self, message: &str, error: &ResolveError);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFailureLog;

impl FailureLog for TracingFailureLog {
    fn report(&self, message: &str, error: &ResolveError) {
        let cause = error_chain(error);
        tracing::error!(error = %cause, "{message}");
    }
}

/// Parameters of one occurrence with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectionOptions {
    pub methods: bool,
    pub fields: bool,
    pub include_nested: bool,
}

impl Default for ReflectionOptions {
    fn default() -> Self {
        Self {
            methods: true,
            fields: true,
            include_nested: true,
        }
    }
}

impl ReflectionOptions {
    pub fn from_occurrence(occurrence: &AnnotationOccurrence) -> Result<Self, RegistrationError> {
        Ok(Self {
            methods: boolean_parameter(occurrence, METHODS)?,
            fields: boolean_parameter(occurrence, FIELDS)?,
            include_nested: boolean_parameter(occurrence, INCLUDE_NESTED)?,
        })
    }
}

/// An occurrence's configuration, resolved before any class is visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub options: ReflectionOptions,
    pub targets: Vec<String>,
}

impl Registration {
    pub fn from_occurrence(occurrence: &AnnotationOccurrence) -> Result<Self, RegistrationError> {
        let options = ReflectionOptions::from_occurrence(occurrence)?;
        let targets = match occurrence.value(TARGETS) {
            None => {
                let class = occurrence.target.as_class().ok_or_else(|| {
                    RegistrationError::NonClassTarget {
                        annotation: occurrence.annotation.clone(),
                        target: occurrence.target.describe(),
                    }
                })?;
                vec![class.to_string()]
            }
            Some(value) => value
                .as_class_array()
                .ok_or_else(|| invalid_parameter(occurrence, TARGETS, "a class array", value))?,
        };
        Ok(Self { options, targets })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub occurrences: usize,
    pub records: usize,
    pub resolution_failures: usize,
}

#[derive(Debug, Clone)]
pub struct Registrar {
    annotation: String,
}

impl Default for Registrar {
    fn default() -> Self {
        Self::new(DEFAULT_ANNOTATION)
    }
}

impl Registrar {
    pub fn new(annotation: impl Into<String>) -> Self {
        Self {
            annotation: annotation.into(),
        }
    }

    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    /// Emits records for every occurrence of the marker annotation.
    ///
    /// A malformed occurrence aborts the scan; records already handed to
    /// `sink` stay there. Nested-class lookup failures are reported to `log`
    /// and only cut off the failing branch.
    pub fn scan<I, R, S, L>(
        &self,
        index: &I,
        resolver: &R,
        sink: &mut S,
        log: &L,
    ) -> Result<ScanSummary, RegistrationError>
    where
        I: AnnotationIndex + ?Sized,
        R: ClassResolver + ?Sized,
        S: RecordSink + ?Sized,
        L: FailureLog + ?Sized,
    {
        let mut summary = ScanSummary::default();
        for occurrence in index.annotations_named(&self.annotation) {
            let registration = Registration::from_occurrence(occurrence)?;
            summary.occurrences += 1;
            tracing::debug!(
                annotated = %occurrence.target.describe(),
                classes = registration.targets.len(),
                "registering for reflection"
            );
            for class_name in &registration.targets {
                register_class(
                    class_name,
                    registration.options,
                    resolver,
                    sink,
                    log,
                    &mut summary,
                );
            }
        }
        Ok(summary)
    }
}

/// Registers `class_name` and, when asked, its whole nested-class subtree.
///
/// Pending classes live on an explicit stack; children are pushed in reverse
/// so they pop in resolver order. Below the first level nesting is always
/// followed.
pub fn register_class<R, S, L>(
    class_name: &str,
    options: ReflectionOptions,
    resolver: &R,
    sink: &mut S,
    log: &L,
    summary: &mut ScanSummary,
) where
    R: ClassResolver + ?Sized,
    S: RecordSink + ?Sized,
    L: FailureLog + ?Sized,
{
    let mut pending = vec![(class_name.to_string(), options.include_nested)];
    while let Some((name, include_nested)) = pending.pop() {
        sink.produce(RegistrationRecord::new(
            name.as_str(),
            options.methods,
            options.fields,
        ));
        summary.records += 1;

        if !include_nested {
            continue;
        }

        match resolver.nested_classes(&name) {
            Ok(nested) => pending.extend(nested.into_iter().rev().map(|n| (n, true))),
            Err(err) => {
                summary.resolution_failures += 1;
                log.report(&format!("Failed to load class {name}"), &err);
            }
        }
    }
}

fn boolean_parameter(
    occurrence: &AnnotationOccurrence,
    name: &'static str,
) -> Result<bool, RegistrationError> {
    match occurrence.value(name) {
        None => Ok(true),
        Some(value) => value
            .as_bool()
            .ok_or_else(|| invalid_parameter(occurrence, name, "a boolean", value)),
    }
}

fn invalid_parameter(
    occurrence: &AnnotationOccurrence,
    parameter: &'static str,
    expected: &'static str,
    found: &AnnotationValue,
) -> RegistrationError {
    RegistrationError::InvalidParameter {
        annotation: occurrence.annotation.clone(),
        target: occurrence.target.describe(),
        parameter,
        expected,
        found: found.kind(),
    }
}
