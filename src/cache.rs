//! Persistent catalog of jar contents.
//!
//! Uses LMDB (via heed) to remember the class entries of every jar the
//! classpath resolver has read, keyed by jar path and invalidated by the
//! jar's modification time. Later builds skip re-reading unchanged jars.

use anyhow::{Context, Result};
use heed::types::Str;
use heed::{Database, Env, EnvFlags, EnvOpenOptions, RoTxn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

pub const JAR_CATALOG_DB: &str = "jar_catalog";

const DEFAULT_MAP_SIZE: usize = 512 * 1024 * 1024;
const DEFAULT_MAX_DBS: u32 = 4;

type StrDb = Database<Str, Str>;

#[derive(Debug, Serialize, Deserialize)]
struct CatalogRow {
    mtime: u64,
    classes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CatalogCache {
    env: Arc<Env>,
    db_path: PathBuf,
    jar_catalog: StrDb,
}

#[derive(Debug, Serialize)]
pub struct CatalogStats {
    pub db_path: String,
    pub cataloged_jars: u64,
}

impl CatalogCache {
    pub fn open(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create cache directory: {}", parent.display())
            })?;
        }

        let env = Arc::new(open_env(&db_path)?);

        let mut wtxn = env.write_txn()?;
        let jar_catalog = env.create_database::<Str, Str>(&mut wtxn, Some(JAR_CATALOG_DB))?;
        wtxn.commit()?;

        Ok(Self {
            env,
            db_path,
            jar_catalog,
        })
    }

    /// Cached class entries for `jar_key`, unless the jar changed since.
    pub fn get(&self, jar_key: &str, mtime: u64) -> Result<Option<Vec<String>>> {
        let rtxn = self.env.read_txn()?;
        let Some(raw) = self.jar_catalog.get(&rtxn, jar_key)? else {
            return Ok(None);
        };
        let Ok(row) = serde_json::from_str::<CatalogRow>(raw) else {
            return Ok(None);
        };
        Ok((row.mtime == mtime).then_some(row.classes))
    }

    pub fn put_all(&self, entries: &[(String, u64, Vec<String>)]) -> Result<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        let mut wtxn = self.env.write_txn()?;
        for (jar_key, mtime, classes) in entries {
            let row = CatalogRow {
                mtime: *mtime,
                classes: classes.clone(),
            };
            let json = serde_json::to_string(&row)?;
            self.jar_catalog
                .put(&mut wtxn, jar_key.as_str(), json.as_str())?;
        }
        wtxn.commit()?;
        Ok(entries.len())
    }

    pub fn stats(&self) -> Result<CatalogStats> {
        let rtxn = self.env.read_txn()?;
        Ok(CatalogStats {
            db_path: self.db_path.to_string_lossy().to_string(),
            cataloged_jars: table_len(&self.jar_catalog, &rtxn)?,
        })
    }
}

pub fn file_mtime(path: &Path) -> u64 {
    let mtime = path
        .metadata()
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH);
    let nanos = mtime
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    u64::try_from(nanos).unwrap_or(u64::MAX)
}

pub fn clear_cache(db_path: &Path) -> Result<bool> {
    let existed = db_path.exists();
    remove_file_if_exists(db_path, "cache")?;
    remove_file_if_exists(&lmdb_lock_path(db_path), "cache lock")?;
    Ok(existed)
}

fn open_env(db_path: &Path) -> Result<Env> {
    let mut options = EnvOpenOptions::new();
    options.map_size(DEFAULT_MAP_SIZE);
    options.max_dbs(DEFAULT_MAX_DBS);
    // SAFETY: We do not use NO_LOCK and keep default LMDB locking guarantees.
    // NO_SUB_DIR keeps the cache a single file at the --cache path.
    unsafe {
        options.flags(EnvFlags::NO_SUB_DIR);
        options
            .open(db_path)
            .with_context(|| format!("Failed to create/open cache env: {}", db_path.display()))
    }
}

fn table_len(db: &StrDb, rtxn: &RoTxn<'_>) -> Result<u64> {
    let mut count = 0u64;
    for item in db.iter(rtxn)? {
        let _ = item?;
        count += 1;
    }
    Ok(count)
}

fn lmdb_lock_path(db_path: &Path) -> PathBuf {
    let mut os = db_path.as_os_str().to_os_string();
    os.push("-lock");
    PathBuf::from(os)
}

fn remove_file_if_exists(path: &Path, kind: &str) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove {kind} file: {}", path.display()))?;
    }
    Ok(())
}
