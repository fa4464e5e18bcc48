use anyhow::{Result, bail};
use clap::Parser;
use reflect_registrar::cache::{CatalogCache, clear_cache};
use reflect_registrar::classpath::ClasspathResolver;
use reflect_registrar::cli::{Cli, Commands};
use reflect_registrar::config::{resolve_cache_path, resolve_classpath, resolve_db_path};
use reflect_registrar::index::IndexDocument;
use reflect_registrar::logging;
use reflect_registrar::output::{ScanReport, render_report, write_output};
use reflect_registrar::registrar::{Registrar, TracingFailureLog};
use reflect_registrar::resolver::{ClassResolver, NestedClassMap, ResolverChain};
use reflect_registrar::source_index::index_sources;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command.clone() {
        Commands::Index { sources, output } => {
            let known = std::slice::from_ref(&cli.annotation);
            let (document, stats) = index_sources(&sources, known)?;
            tracing::info!(
                files = stats.files,
                unparsed = stats.unparsed_files,
                occurrences = stats.occurrences,
                classes = stats.classes,
                "indexed sources"
            );
            let json = serde_json::to_string_pretty(&document)?;
            write_output(&json, output.as_deref())?;
        }
        Commands::Scan {
            indexes,
            sources,
            format,
            output,
        } => {
            let report = scan(&cli, &indexes, &sources)?;
            write_output(&render_report(&report, format)?, output.as_deref())?;
        }
        Commands::Nested { class_name } => {
            let Some(resolver) = open_classpath(&cli)? else {
                bail!("No classpath given: use --classpath or set REFLECT_CLASSPATH");
            };
            let nested = resolver.nested_classes(&class_name)?;
            let result = NestedResult { class_name, nested };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Stats => {
            let cache = CatalogCache::open(resolve_db_path(&cli)?)?;
            let stats = cache.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Clear => {
            let db_path = resolve_db_path(&cli)?;
            let removed = clear_cache(&db_path)?;
            let result = ClearResult {
                cache: db_path.to_string_lossy().to_string(),
                removed,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct NestedResult {
    class_name: String,
    nested: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ClearResult {
    cache: String,
    removed: bool,
}

fn scan(cli: &Cli, indexes: &[PathBuf], sources: &[PathBuf]) -> Result<ScanReport> {
    if indexes.is_empty() && sources.is_empty() {
        bail!("Nothing to scan: pass --index and/or --source");
    }

    let start = Instant::now();
    let mut document = IndexDocument::default();
    for path in indexes {
        document.merge(IndexDocument::load(path)?);
    }
    if !sources.is_empty() {
        let (indexed, _) = index_sources(sources, std::slice::from_ref(&cli.annotation))?;
        document.merge(indexed);
    }

    let mut resolver = ResolverChain::new();
    resolver.push(NestedClassMap::from(document.nested_classes.clone()));
    if let Some(classpath) = open_classpath(cli)? {
        resolver.push(classpath);
    }

    let registrar = Registrar::new(cli.annotation.clone());
    let mut records = Vec::new();
    let summary = registrar.scan(&document, &resolver, &mut records, &TracingFailureLog)?;
    tracing::info!(
        occurrences = summary.occurrences,
        records = summary.records,
        failures = summary.resolution_failures,
        "scan finished"
    );

    Ok(ScanReport {
        annotation: registrar.annotation().to_string(),
        summary,
        duration_ms: start.elapsed().as_millis() as u64,
        records,
    })
}

fn open_classpath(cli: &Cli) -> Result<Option<ClasspathResolver>> {
    let entries = resolve_classpath(cli);
    if entries.is_empty() {
        return Ok(None);
    }

    let cache = match resolve_cache_path(cli)? {
        Some(path) => Some(CatalogCache::open(path)?),
        None => None,
    };
    let (resolver, stats) = ClasspathResolver::open(&entries, cache.as_ref())?;
    tracing::info!(
        jars = stats.jars,
        cached = stats.cached_jars,
        failed = stats.failed_jars,
        class_dirs = stats.class_dirs,
        classes = stats.jar_classes,
        "classpath cataloged"
    );
    Ok(Some(resolver))
}
