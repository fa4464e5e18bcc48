use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

pub fn scan_jars(base_path: &Path) -> Result<Vec<PathBuf>> {
    scan_files(base_path, "jar")
}

pub fn scan_java_sources(base_path: &Path) -> Result<Vec<PathBuf>> {
    scan_files(base_path, "java")
}

/// Files under `base_path` with the given extension, sorted by path.
pub fn scan_files(base_path: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !base_path.exists() {
        anyhow::bail!("Path does not exist: {}", base_path.display());
    }

    let (tx, rx) = mpsc::channel();

    let walker = WalkBuilder::new(base_path)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .build_parallel();

    walker.run(|| {
        let tx = tx.clone();
        Box::new(move |entry| {
            if let Ok(entry) = entry {
                let path = entry.path();
                if path.is_file() && path.extension().is_some_and(|e| e == extension) {
                    let _ = tx.send(path.to_path_buf());
                }
            }
            ignore::WalkState::Continue
        })
    });

    drop(tx);
    let mut files: Vec<PathBuf> = rx.iter().collect();
    files.sort();
    Ok(files)
}

pub fn scan_all_java_sources(roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        files.extend(
            scan_java_sources(root)
                .with_context(|| format!("Failed to scan source root: {}", root.display()))?,
        );
    }
    Ok(files)
}

pub fn class_name_to_class_path(class_name: &str) -> String {
    format!("{}.class", class_name.replace('.', "/"))
}

/// `a/b/Outer$Inner.class` -> `a.b.Outer$Inner`.
pub fn class_path_to_class_name(entry: &str) -> Option<String> {
    let stem = entry.strip_suffix(".class")?;
    Some(stem.replace(['/', '\\'], "."))
}
