use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::cli::Cli;

pub const CLASSPATH_ENV: &str = "REFLECT_CLASSPATH";

pub fn resolve_classpath(cli: &Cli) -> Vec<PathBuf> {
    if !cli.classpath.is_empty() {
        return cli.classpath.clone();
    }

    match env::var_os(CLASSPATH_ENV) {
        Some(raw) => env::split_paths(&raw)
            .filter(|p| !p.as_os_str().is_empty())
            .collect(),
        None => Vec::new(),
    }
}

/// Cache location for scans; `None` when caching is disabled.
pub fn resolve_cache_path(cli: &Cli) -> Result<Option<PathBuf>> {
    if cli.no_cache {
        return Ok(None);
    }
    resolve_db_path(cli).map(Some)
}

pub fn resolve_db_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(p) = cli.cache.clone() {
        return Ok(p);
    }

    Ok(registrar_home()?.join("catalog.lmdb"))
}

fn registrar_home() -> Result<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::cache_dir)
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Failed to resolve data directory"))?;
    Ok(base.join("reflect-registrar"))
}
