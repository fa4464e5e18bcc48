use anyhow::{Context, Result};
use memmap2::Mmap;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

use crate::cache::{CatalogCache, file_mtime};
use crate::error::ResolveError;
use crate::resolver::ClassResolver;
use crate::scan::{class_name_to_class_path, class_path_to_class_name, scan_jars};

/// Resolves nested classes from compiled classes on a classpath.
///
/// Jars are cataloged up front. Class directories are consulted lazily, one
/// directory listing per lookup.
#[derive(Debug, Default)]
pub struct ClasspathResolver {
    known: HashSet<String>,
    nested: HashMap<String, Vec<String>>,
    class_dirs: Vec<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
pub struct ClasspathStats {
    pub jars: usize,
    pub cached_jars: usize,
    pub failed_jars: usize,
    pub class_dirs: usize,
    pub jar_classes: usize,
}

impl ClasspathResolver {
    /// Each entry is a jar, or a directory holding `.class` files and/or jars.
    pub fn open(entries: &[PathBuf], cache: Option<&CatalogCache>) -> Result<(Self, ClasspathStats)> {
        let mut resolver = Self::default();
        let mut jars = Vec::new();

        for entry in entries {
            if entry.is_dir() {
                resolver.class_dirs.push(entry.clone());
                jars.extend(scan_jars(entry)?);
            } else if entry.is_file() {
                jars.push(entry.clone());
            } else {
                tracing::warn!(path = %entry.display(), "classpath entry does not exist");
            }
        }

        let mut stats = ClasspathStats {
            jars: jars.len(),
            class_dirs: resolver.class_dirs.len(),
            ..ClasspathStats::default()
        };

        let mut pending = Vec::new();
        for jar in jars {
            let jar_key = jar.to_string_lossy().to_string();
            let mtime = file_mtime(&jar);
            let cached = match cache {
                Some(cache) => cache.get(&jar_key, mtime)?,
                None => None,
            };
            match cached {
                Some(classes) => {
                    stats.cached_jars += 1;
                    resolver.add_classes(classes);
                }
                None => pending.push((jar, jar_key, mtime)),
            }
        }

        let cataloged: Vec<(String, u64, Result<Vec<String>>)> = pending
            .par_iter()
            .map(|(jar, jar_key, mtime)| (jar_key.clone(), *mtime, catalog_jar(jar)))
            .collect();

        let mut fresh = Vec::with_capacity(cataloged.len());
        for (jar_key, mtime, result) in cataloged {
            match result {
                Ok(classes) => {
                    resolver.add_classes(classes.iter().cloned());
                    fresh.push((jar_key, mtime, classes));
                }
                Err(err) => {
                    stats.failed_jars += 1;
                    let cause = format!("{err:#}");
                    tracing::warn!(jar = %jar_key, error = %cause, "failed to catalog jar");
                }
            }
        }
        if let Some(cache) = cache {
            cache.put_all(&fresh)?;
        }

        for nested in resolver.nested.values_mut() {
            nested.sort();
            nested.dedup();
        }
        stats.jar_classes = resolver.known.len();
        Ok((resolver, stats))
    }

    fn add_classes(&mut self, classes: impl IntoIterator<Item = String>) {
        for class in classes {
            if let Some((outer, simple)) = class.rsplit_once('$')
                && is_member_class_name(simple)
            {
                self.nested
                    .entry(outer.to_string())
                    .or_default()
                    .push(class.clone());
            }
            self.known.insert(class);
        }
    }

    fn nested_in_class_dir(&self, class_name: &str) -> Option<Result<Vec<String>, ResolveError>> {
        let class_path = class_name_to_class_path(class_name);
        let file = self
            .class_dirs
            .iter()
            .map(|dir| dir.join(&class_path))
            .find(|p| p.is_file())?;
        let dir = file.parent()?;
        let simple = class_name.rsplit('.').next().unwrap_or(class_name);
        let prefix = format!("{simple}$");

        let listing = match std::fs::read_dir(dir) {
            Ok(listing) => listing,
            Err(source) => {
                return Some(Err(ResolveError::Io {
                    class: class_name.to_string(),
                    source,
                }));
            }
        };

        let mut nested = Vec::new();
        for entry in listing {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(ResolveError::Io {
                        class: class_name.to_string(),
                        source,
                    }));
                }
            };
            let file_name = entry.file_name().to_string_lossy().to_string();
            let Some(member) = file_name
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(".class"))
            else {
                continue;
            };
            if !member.contains('$') && is_member_class_name(member) {
                nested.push(format!("{class_name}${member}"));
            }
        }
        nested.sort();
        Some(Ok(nested))
    }
}

impl ClassResolver for ClasspathResolver {
    fn nested_classes(&self, class_name: &str) -> Result<Vec<String>, ResolveError> {
        if self.known.contains(class_name) {
            return Ok(self.nested.get(class_name).cloned().unwrap_or_default());
        }
        self.nested_in_class_dir(class_name)
            .unwrap_or_else(|| Err(ResolveError::NotFound(class_name.to_string())))
    }
}

/// Binary names of all classes in a jar, nested ones included.
pub fn catalog_jar(jar_path: &Path) -> Result<Vec<String>> {
    let file = File::open(jar_path)
        .with_context(|| format!("Failed to open jar: {}", jar_path.display()))?;
    // SAFETY: The file is opened read-only and remains valid for the lifetime of the mmap.
    // The mmap is dropped before the file, ensuring memory safety.
    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to mmap jar: {}", jar_path.display()))?;
    let mut archive = ZipArchive::new(Cursor::new(&mmap[..]))
        .with_context(|| format!("Failed to read zip structure: {}", jar_path.display()))?;

    let mut classes = Vec::new();
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name();
        if name.starts_with("META-INF/") {
            continue;
        }
        if name.ends_with("module-info.class") || name.ends_with("package-info.class") {
            continue;
        }
        if let Some(class_name) = class_path_to_class_name(name) {
            classes.push(class_name);
        }
    }
    Ok(classes)
}

/// Anonymous and local classes (`Outer$1`, `Outer$1Local`) are not members.
fn is_member_class_name(simple: &str) -> bool {
    simple
        .chars()
        .next()
        .is_some_and(|c| !c.is_ascii_digit())
}
