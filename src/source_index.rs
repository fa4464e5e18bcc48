//! Annotation indexer for Java sources.
//!
//! Parses compilation units with tree-sitter and records every annotation
//! placed on a type, method, or field declaration, together with the member
//! types each declared type contains. Type names are resolved through the
//! types the file declares itself, its single-type imports, its on-demand
//! imports (for names listed as known), `java.lang`, and finally the file's
//! package. Nested types get binary names (`pkg.Outer$Inner`).

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser};

use crate::index::IndexDocument;
use crate::model::{AnnotationOccurrence, AnnotationTarget, AnnotationValue};
use crate::scan::scan_all_java_sources;

const TYPE_DECLARATIONS: [&str; 5] = [
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

/// Public top-level types of `java.lang`, implicitly imported by every file.
const JAVA_LANG: &[&str] = &[
    "Appendable",
    "AutoCloseable",
    "CharSequence",
    "Cloneable",
    "Comparable",
    "Iterable",
    "Readable",
    "Runnable",
    "Boolean",
    "Byte",
    "Character",
    "Class",
    "ClassLoader",
    "ClassValue",
    "Double",
    "Enum",
    "Float",
    "InheritableThreadLocal",
    "Integer",
    "Long",
    "Math",
    "Module",
    "ModuleLayer",
    "Number",
    "Object",
    "Package",
    "Process",
    "ProcessBuilder",
    "ProcessHandle",
    "Record",
    "Runtime",
    "RuntimePermission",
    "SecurityManager",
    "Short",
    "StackTraceElement",
    "StackWalker",
    "StrictMath",
    "String",
    "StringBuffer",
    "StringBuilder",
    "System",
    "Thread",
    "ThreadGroup",
    "ThreadLocal",
    "Throwable",
    "Void",
    "ArithmeticException",
    "ArrayIndexOutOfBoundsException",
    "ArrayStoreException",
    "ClassCastException",
    "ClassNotFoundException",
    "CloneNotSupportedException",
    "EnumConstantNotPresentException",
    "Exception",
    "IllegalAccessException",
    "IllegalArgumentException",
    "IllegalCallerException",
    "IllegalMonitorStateException",
    "IllegalStateException",
    "IllegalThreadStateException",
    "IndexOutOfBoundsException",
    "InstantiationException",
    "InterruptedException",
    "LayerInstantiationException",
    "MatchException",
    "NegativeArraySizeException",
    "NoSuchFieldException",
    "NoSuchMethodException",
    "NullPointerException",
    "NumberFormatException",
    "ReflectiveOperationException",
    "RuntimeException",
    "SecurityException",
    "StringIndexOutOfBoundsException",
    "TypeNotPresentException",
    "UnsupportedOperationException",
    "WrongThreadException",
    "AbstractMethodError",
    "AssertionError",
    "BootstrapMethodError",
    "ClassCircularityError",
    "ClassFormatError",
    "Error",
    "ExceptionInInitializerError",
    "IllegalAccessError",
    "IncompatibleClassChangeError",
    "InstantiationError",
    "InternalError",
    "LinkageError",
    "NoClassDefFoundError",
    "NoSuchFieldError",
    "NoSuchMethodError",
    "OutOfMemoryError",
    "StackOverflowError",
    "ThreadDeath",
    "UnknownError",
    "UnsatisfiedLinkError",
    "UnsupportedClassVersionError",
    "VerifyError",
    "VirtualMachineError",
    "Deprecated",
    "FunctionalInterface",
    "Override",
    "SafeVarargs",
    "SuppressWarnings",
];

#[derive(Debug, Default, serde::Serialize)]
pub struct SourceIndexStats {
    pub files: usize,
    pub unparsed_files: usize,
    pub occurrences: usize,
    pub classes: usize,
}

/// Indexes every `.java` file under `roots`. Files are processed in parallel
/// but merged in path order, so the resulting occurrence order is stable.
///
/// `known` lists fully qualified names a simple name may resolve to through
/// an on-demand (`.*`) import, typically the marker annotation.
pub fn index_sources(
    roots: &[PathBuf],
    known: &[String],
) -> Result<(IndexDocument, SourceIndexStats)> {
    let files = scan_all_java_sources(roots)?;

    let parsed: Vec<(PathBuf, Option<IndexDocument>)> = files
        .par_iter()
        .map(|path| index_file(path, known).map(|doc| (path.clone(), doc)))
        .collect::<Result<_>>()?;

    let mut document = IndexDocument::default();
    let mut stats = SourceIndexStats {
        files: parsed.len(),
        ..SourceIndexStats::default()
    };
    for (path, doc) in parsed {
        match doc {
            Some(doc) => document.merge(doc),
            None => {
                stats.unparsed_files += 1;
                tracing::warn!(path = %path.display(), "skipping unparseable source file");
            }
        }
    }
    stats.occurrences = document.occurrences.len();
    stats.classes = document.nested_classes.len();
    Ok((document, stats))
}

pub fn index_file(path: &Path, known: &[String]) -> Result<Option<IndexDocument>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {}", path.display()))?;
    Ok(index_source(&source, known))
}

/// Indexes one compilation unit. `None` when the source cannot be parsed.
pub fn index_source(source: &str, known: &[String]) -> Option<IndexDocument> {
    if source.trim().is_empty() {
        return Some(IndexDocument::default());
    }

    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .ok()?;
    let tree = parser.parse(source, None)?;
    let root = tree.root_node();

    let mut unit = CompilationUnit::new(source.as_bytes(), known);
    let mut cursor = root.walk();
    let top_level: Vec<Node> = root.children(&mut cursor).collect();

    for child in &top_level {
        match child.kind() {
            "package_declaration" => unit.package = unit.package_name(child),
            "import_declaration" => unit.add_import(child),
            _ => {}
        }
    }

    for child in top_level.iter().filter(|c| is_type_declaration(c)) {
        if let Some(name) = declaration_name(child, unit.source) {
            let binary = unit.qualify(&name);
            unit.declare(child, &name, &binary);
        }
    }

    let mut document = IndexDocument::default();
    for child in top_level.iter().filter(|c| is_type_declaration(c)) {
        if let Some(name) = declaration_name(child, unit.source) {
            let binary = unit.qualify(&name);
            unit.visit_type(child, &binary, &mut document);
        }
    }
    Some(document)
}

struct CompilationUnit<'a> {
    source: &'a [u8],
    package: String,
    imports: HashMap<String, String>,
    // Packages (or types) imported with `.*`.
    on_demand: Vec<String>,
    known: &'a [String],
    // Dotted names relative to the file ("Outer", "Outer.Inner") and bare
    // simple names, both mapped to binary names.
    declared: HashMap<String, String>,
}

impl<'a> CompilationUnit<'a> {
    fn new(source: &'a [u8], known: &'a [String]) -> Self {
        Self {
            source,
            package: String::new(),
            imports: HashMap::new(),
            on_demand: Vec::new(),
            known,
            declared: HashMap::new(),
        }
    }

    fn package_name(&self, node: &Node) -> String {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "scoped_identifier" || child.kind() == "identifier" {
                return node_text(&child, self.source).to_string();
            }
        }
        String::new()
    }

    fn add_import(&mut self, node: &Node) {
        let mut path = String::new();
        let mut on_demand = false;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "static" => return,
                "asterisk" => on_demand = true,
                "scoped_identifier" | "identifier" => {
                    path = node_text(&child, self.source).to_string();
                }
                _ => {}
            }
        }
        if path.is_empty() {
            return;
        }
        if on_demand {
            self.on_demand.push(path);
        } else if let Some(simple) = path.rsplit('.').next().filter(|s| !s.is_empty()) {
            let binary = canonical_to_binary(&path);
            self.imports.insert(simple.to_string(), binary);
        }
    }

    fn qualify(&self, simple: &str) -> String {
        if self.package.is_empty() {
            simple.to_string()
        } else {
            format!("{}.{simple}", self.package)
        }
    }

    fn declare(&mut self, node: &Node, relative: &str, binary: &str) {
        self.declared
            .insert(relative.to_string(), binary.to_string());
        if let Some(simple) = relative.rsplit('.').next() {
            self.declared
                .entry(simple.to_string())
                .or_insert_with(|| binary.to_string());
        }

        for member in body_members(node) {
            if !is_type_declaration(&member) {
                continue;
            }
            if let Some(name) = declaration_name(&member, self.source) {
                self.declare(
                    &member,
                    &format!("{relative}.{name}"),
                    &format!("{binary}${name}"),
                );
            }
        }
    }

    /// Resolves a type as written in source to a binary name.
    fn resolve_type(&self, written: &str) -> String {
        let cleaned: String = written
            .split('<')
            .next()
            .unwrap_or(written)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let parts: Vec<&str> = cleaned.split('.').filter(|p| !p.is_empty()).collect();
        if parts.is_empty() {
            return cleaned;
        }

        for i in (1..=parts.len()).rev() {
            if let Some(binary) = self.declared.get(&parts[..i].join(".")) {
                return append_nested(binary, &parts[i..]);
            }
        }

        if let Some(binary) = self.imports.get(parts[0]) {
            return append_nested(binary, &parts[1..]);
        }

        if starts_lowercase(parts[0]) {
            return canonical_to_binary(&cleaned);
        }

        if let Some(binary) = self.on_demand_import(parts[0]) {
            return append_nested(&binary, &parts[1..]);
        }

        if JAVA_LANG.contains(&parts[0]) {
            return append_nested(&format!("java.lang.{}", parts[0]), &parts[1..]);
        }

        append_nested(&self.qualify(parts[0]), &parts[1..])
    }

    /// A known type reachable through one of the file's `.*` imports.
    fn on_demand_import(&self, simple: &str) -> Option<String> {
        self.on_demand
            .iter()
            .map(|prefix| canonical_to_binary(&format!("{prefix}.{simple}")))
            .find(|candidate| self.known.iter().any(|k| k == candidate))
    }

    fn visit_type(&self, node: &Node, binary: &str, document: &mut IndexDocument) {
        let target = AnnotationTarget::Class {
            name: binary.to_string(),
        };
        self.collect_annotations(node, &target, document);

        let mut nested = Vec::new();
        for member in body_members(node) {
            match member.kind() {
                kind if TYPE_DECLARATIONS.contains(&kind) => {
                    if let Some(name) = declaration_name(&member, self.source) {
                        let child = format!("{binary}${name}");
                        self.visit_type(&member, &child, document);
                        nested.push(child);
                    }
                }
                "method_declaration" | "annotation_type_element_declaration" => {
                    if let Some(name) = declaration_name(&member, self.source) {
                        let target = AnnotationTarget::Method {
                            class: binary.to_string(),
                            name,
                        };
                        self.collect_annotations(&member, &target, document);
                    }
                }
                "constructor_declaration" | "compact_constructor_declaration" => {
                    let target = AnnotationTarget::Method {
                        class: binary.to_string(),
                        name: "<init>".to_string(),
                    };
                    self.collect_annotations(&member, &target, document);
                }
                "field_declaration" | "constant_declaration" => {
                    let mut cursor = member.walk();
                    let declarators: Vec<Node> = member
                        .children_by_field_name("declarator", &mut cursor)
                        .collect();
                    for declarator in declarators {
                        if let Some(name) = declaration_name(&declarator, self.source) {
                            let target = AnnotationTarget::Field {
                                class: binary.to_string(),
                                name,
                            };
                            self.collect_annotations(&member, &target, document);
                        }
                    }
                }
                _ => {}
            }
        }
        document
            .nested_classes
            .insert(binary.to_string(), nested);
    }

    fn collect_annotations(
        &self,
        node: &Node,
        target: &AnnotationTarget,
        document: &mut IndexDocument,
    ) {
        let Some(modifiers) = child_of_kind(node, "modifiers") else {
            return;
        };
        let mut cursor = modifiers.walk();
        for child in modifiers.children(&mut cursor) {
            if child.kind() != "annotation" && child.kind() != "marker_annotation" {
                continue;
            }
            let Some(name) = child.child_by_field_name("name") else {
                continue;
            };
            let mut occurrence = AnnotationOccurrence::new(
                self.resolve_type(node_text(&name, self.source)),
                target.clone(),
            );
            if let Some(arguments) = child.child_by_field_name("arguments") {
                self.collect_arguments(&arguments, &mut occurrence);
            }
            document.occurrences.push(occurrence);
        }
    }

    fn collect_arguments(&self, arguments: &Node, occurrence: &mut AnnotationOccurrence) {
        let mut cursor = arguments.walk();
        for argument in arguments.named_children(&mut cursor) {
            if is_comment(&argument) {
                continue;
            }
            if argument.kind() == "element_value_pair" {
                let (Some(key), Some(value)) = (
                    argument.child_by_field_name("key"),
                    argument.child_by_field_name("value"),
                ) else {
                    continue;
                };
                occurrence.values.insert(
                    node_text(&key, self.source).to_string(),
                    Some(self.element_value(&value)),
                );
            } else {
                occurrence
                    .values
                    .insert("value".to_string(), Some(self.element_value(&argument)));
            }
        }
    }

    fn element_value(&self, node: &Node) -> AnnotationValue {
        let text = node_text(node, self.source);
        match node.kind() {
            "true" => AnnotationValue::Boolean(true),
            "false" => AnnotationValue::Boolean(false),
            "class_literal" => {
                let written = text.trim().trim_end_matches("class").trim_end();
                let written = written.strip_suffix('.').unwrap_or(written);
                AnnotationValue::Class(self.resolve_type(written))
            }
            "string_literal" => AnnotationValue::String(
                text.trim()
                    .trim_start_matches('"')
                    .trim_end_matches('"')
                    .to_string(),
            ),
            "decimal_integer_literal" => text
                .trim()
                .trim_end_matches(['l', 'L'])
                .replace('_', "")
                .parse::<i64>()
                .map(AnnotationValue::Integer)
                .unwrap_or_else(|_| AnnotationValue::Other(normalize_whitespace(text))),
            "element_value_array_initializer" => {
                let mut cursor = node.walk();
                let items: Vec<AnnotationValue> = node
                    .named_children(&mut cursor)
                    .filter(|c| !is_comment(c))
                    .map(|c| self.element_value(&c))
                    .collect();
                let mut classes = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        AnnotationValue::Class(name) => classes.push(name),
                        _ => return AnnotationValue::Other(normalize_whitespace(text)),
                    }
                }
                AnnotationValue::ClassArray(classes)
            }
            "parenthesized_expression" => node
                .named_child(0)
                .map(|inner| self.element_value(&inner))
                .unwrap_or_else(|| AnnotationValue::Other(normalize_whitespace(text))),
            _ => AnnotationValue::Other(normalize_whitespace(text)),
        }
    }
}

fn is_type_declaration(node: &Node) -> bool {
    TYPE_DECLARATIONS.contains(&node.kind())
}

fn is_comment(node: &Node) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

fn declaration_name(node: &Node, source: &[u8]) -> Option<String> {
    node.child_by_field_name("name")
        .map(|n| node_text(&n, source).to_string())
        .filter(|n| !n.is_empty())
}

fn child_of_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// Member declarations of a type body, including those after enum constants.
fn body_members<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let Some(body) = node.child_by_field_name("body") else {
        return Vec::new();
    };
    let mut members = Vec::new();
    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        if child.kind() == "enum_body_declarations" {
            let mut inner_cursor = child.walk();
            members.extend(child.named_children(&mut inner_cursor));
        } else {
            members.push(child);
        }
    }
    members
}

/// `a.b.Outer.Inner` -> `a.b.Outer$Inner`, splitting at the first segment
/// that starts with an upper-case letter.
fn canonical_to_binary(canonical: &str) -> String {
    let parts: Vec<&str> = canonical.split('.').collect();
    match parts.iter().position(|p| !starts_lowercase(p)) {
        Some(first_type) => {
            let package = parts[..first_type].join(".");
            let types = parts[first_type..].join("$");
            if package.is_empty() {
                types
            } else {
                format!("{package}.{types}")
            }
        }
        None => canonical.to_string(),
    }
}

fn append_nested(binary: &str, rest: &[&str]) -> String {
    if rest.is_empty() {
        binary.to_string()
    } else {
        format!("{binary}${}", rest.join("$"))
    }
}

fn starts_lowercase(segment: &str) -> bool {
    segment.chars().next().is_some_and(|c| c.is_lowercase())
}

fn node_text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::AnnotationIndex;

    const MARKER: &str = "io.quarkus.runtime.annotations.RegisterForReflection";

    fn index(source: &str) -> IndexDocument {
        index_source(source, &[MARKER.to_string()]).unwrap()
    }

    fn occurrences_named<'d>(doc: &'d IndexDocument, name: &str) -> Vec<&'d AnnotationOccurrence> {
        doc.occurrences
            .iter()
            .filter(|o| o.annotation == name)
            .collect()
    }

    #[test]
    fn indexes_marker_on_class_with_parameters() {
        let source = r#"
package com.example;

import io.quarkus.runtime.annotations.RegisterForReflection;

@RegisterForReflection(methods = false, includeNested = true)
public class Foo {
    private String name;
}
"#;
        let doc = index(source);
        let found = occurrences_named(&doc, MARKER);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target.as_class(), Some("com.example.Foo"));
        assert_eq!(found[0].value("methods"), Some(&AnnotationValue::Boolean(false)));
        assert_eq!(
            found[0].value("includeNested"),
            Some(&AnnotationValue::Boolean(true))
        );
        assert_eq!(found[0].value("fields"), None);
        assert_eq!(doc.nested_classes["com.example.Foo"], Vec::<String>::new());
    }

    #[test]
    fn resolves_targets_through_imports_and_local_types() {
        let source = r#"
package com.example;

import io.quarkus.runtime.annotations.RegisterForReflection;
import org.acme.model.Order;

@RegisterForReflection(targets = { Order.class, Order.Line.class, Local.Part.class, Sibling.class, java.util.UUID.class })
public class Holder {
}

class Local {
    static class Part {}
}
"#;
        let doc = index(source);
        let found = occurrences_named(&doc, MARKER);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].value("targets"),
            Some(&AnnotationValue::ClassArray(vec![
                "org.acme.model.Order".to_string(),
                "org.acme.model.Order$Line".to_string(),
                "com.example.Local$Part".to_string(),
                "com.example.Sibling".to_string(),
                "java.util.UUID".to_string(),
            ]))
        );
    }

    #[test]
    fn single_class_literal_and_fully_qualified_marker() {
        let source = r#"
package p;

@io.quarkus.runtime.annotations.RegisterForReflection(targets = String.class)
class Holder {}
"#;
        let doc = index(source);
        let found = occurrences_named(&doc, MARKER);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].value("targets"),
            Some(&AnnotationValue::Class("java.lang.String".to_string()))
        );
    }

    #[test]
    fn records_nested_types_with_binary_names() {
        let source = r#"
package a;

@RegisterForReflection
public class Outer {
    public static class Inner1 {
        class Inner2 {}
    }
    interface Api {}
    enum Mode {
        ON, OFF;
        static class Helper {}
    }
    void run() {
        class LocalOnly {}
    }
}
"#;
        let doc = index(source);
        assert_eq!(
            doc.nested_classes["a.Outer"],
            vec![
                "a.Outer$Inner1".to_string(),
                "a.Outer$Api".to_string(),
                "a.Outer$Mode".to_string()
            ]
        );
        assert_eq!(
            doc.nested_classes["a.Outer$Inner1"],
            vec!["a.Outer$Inner1$Inner2".to_string()]
        );
        assert_eq!(
            doc.nested_classes["a.Outer$Mode"],
            vec!["a.Outer$Mode$Helper".to_string()]
        );
        // Unimported marker resolves against the file's own package.
        assert_eq!(occurrences_named(&doc, "a.RegisterForReflection").len(), 1);
    }

    #[test]
    fn annotations_on_members_get_member_targets() {
        let source = r#"
package a;

import io.quarkus.runtime.annotations.RegisterForReflection;

public class Service {
    @RegisterForReflection
    public void handle() {}

    @RegisterForReflection(targets = Dto.class)
    private Object first, second;

    @Deprecated
    public Service() {}
}
"#;
        let doc = index(source);
        let found = occurrences_named(&doc, MARKER);
        let targets: Vec<&AnnotationTarget> = found.iter().map(|o| &o.target).collect();
        assert_eq!(
            targets,
            vec![
                &AnnotationTarget::Method {
                    class: "a.Service".to_string(),
                    name: "handle".to_string()
                },
                &AnnotationTarget::Field {
                    class: "a.Service".to_string(),
                    name: "first".to_string()
                },
                &AnnotationTarget::Field {
                    class: "a.Service".to_string(),
                    name: "second".to_string()
                },
            ]
        );

        let deprecated = occurrences_named(&doc, "java.lang.Deprecated");
        assert_eq!(deprecated.len(), 1);
        assert_eq!(
            deprecated[0].target,
            AnnotationTarget::Method {
                class: "a.Service".to_string(),
                name: "<init>".to_string()
            }
        );
    }

    #[test]
    fn non_literal_values_are_kept_as_other() {
        let source = r#"
package a;

@RegisterForReflection(methods = Flags.METHODS, targets = {})
class Holder {}
"#;
        let doc = index(source);
        let found = occurrences_named(&doc, "a.RegisterForReflection");
        assert_eq!(
            found[0].value("methods"),
            Some(&AnnotationValue::Other("Flags.METHODS".to_string()))
        );
        assert_eq!(
            found[0].value("targets"),
            Some(&AnnotationValue::ClassArray(vec![]))
        );
    }

    #[test]
    fn wildcard_import_resolves_known_marker() {
        let source = r#"
package com.example;

import io.quarkus.runtime.annotations.*;
import static java.util.Objects.*;

@RegisterForReflection(targets = { Math.class, StringBuffer.class, Thread.State.class })
public class Foo {}
"#;
        let doc = index(source);
        let found = doc.annotations_named(MARKER);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target.as_class(), Some("com.example.Foo"));
        assert_eq!(
            found[0].value("targets"),
            Some(&AnnotationValue::ClassArray(vec![
                "java.lang.Math".to_string(),
                "java.lang.StringBuffer".to_string(),
                "java.lang.Thread$State".to_string(),
            ]))
        );

        // Without the marker listed as known, the package guess stands.
        let unknown = index_source(source, &[]).unwrap();
        assert!(unknown.annotations_named(MARKER).is_empty());
        assert_eq!(unknown.annotations_named("com.example.RegisterForReflection").len(), 1);
    }

    #[test]
    fn local_declarations_win_over_wildcard_imports() {
        let source = r#"
package com.example;

import io.quarkus.runtime.annotations.*;

@RegisterForReflection
public class Foo {
    @interface RegisterForReflection {}
}
"#;
        let doc = index(source);
        assert!(doc.annotations_named(MARKER).is_empty());
        assert_eq!(
            doc.annotations_named("com.example.Foo$RegisterForReflection").len(),
            1
        );
    }

    #[test]
    fn canonical_names_split_at_first_type_segment() {
        assert_eq!(canonical_to_binary("a.b.Outer.Inner"), "a.b.Outer$Inner");
        assert_eq!(canonical_to_binary("Outer"), "Outer");
        assert_eq!(canonical_to_binary("a.b"), "a.b");
    }

    #[test]
    fn empty_source_yields_empty_index() {
        let doc = index("  ");
        assert!(doc.occurrences.is_empty());
        assert!(doc.nested_classes.is_empty());
    }
}
