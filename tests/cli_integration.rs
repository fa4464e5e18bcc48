use serde_json::Value;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(name: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!(
        "reflect_registrar_it_{}_{}_{}",
        std::process::id(),
        nanos,
        name
    ))
}

fn write_file(path: &std::path::Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

fn write_jar(path: &std::path::Path, entries: &[&str]) -> anyhow::Result<()> {
    use std::io::Write;
    use zip::write::FileOptions;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let mut zip = zip::ZipWriter::new(file);
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for name in entries {
        zip.start_file(*name, options)?;
        zip.write_all(b"")?;
    }
    zip.finish()?;
    Ok(())
}

fn run(args: &[&str]) -> anyhow::Result<Output> {
    let bin = env!("CARGO_BIN_EXE_reflect-registrar");
    Ok(Command::new(bin)
        .args(args)
        .env_remove("REFLECT_CLASSPATH")
        .output()?)
}

fn run_json(args: &[&str]) -> anyhow::Result<Value> {
    let out = run(args)?;
    if !out.status.success() {
        return Err(anyhow::anyhow!(
            "command failed: status={:?}, stderr={}",
            out.status.code(),
            String::from_utf8_lossy(&out.stderr)
        ));
    }
    Ok(serde_json::from_slice(&out.stdout)?)
}

fn class_names(report: &Value) -> Vec<String> {
    report["records"]
        .as_array()
        .map(|records| {
            records
                .iter()
                .filter_map(|r| r["class_name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn scan_sources_registers_nested_classes_in_pre_order() -> anyhow::Result<()> {
    let base = temp_dir("scan_sources");
    let src = base.join("src");
    write_file(
        &src.join("com/example/Foo.java"),
        r#"
package com.example;

import io.quarkus.runtime.annotations.*;

@RegisterForReflection(methods = false)
public class Foo {
}
"#,
    )?;
    write_file(
        &src.join("com/example/Outer.java"),
        r#"
package com.example;

import io.quarkus.runtime.annotations.RegisterForReflection;

@RegisterForReflection(fields = false)
public class Outer {
    public static class Inner1 {
        public static class Inner2 {}
    }
}
"#,
    )?;

    let report = run_json(&[
        "--no-cache",
        "scan",
        "--source",
        src.to_string_lossy().as_ref(),
    ])?;

    assert_eq!(
        class_names(&report),
        vec![
            "com.example.Foo",
            "com.example.Outer",
            "com.example.Outer$Inner1",
            "com.example.Outer$Inner1$Inner2"
        ]
    );
    assert_eq!(report["records"][0]["include_methods"], Value::Bool(false));
    assert_eq!(report["records"][0]["include_fields"], Value::Bool(true));
    assert_eq!(report["records"][3]["include_methods"], Value::Bool(true));
    assert_eq!(report["records"][3]["include_fields"], Value::Bool(false));
    assert_eq!(report["summary"]["occurrences"], Value::from(2));
    assert_eq!(report["summary"]["resolution_failures"], Value::from(0));

    let _ = std::fs::remove_dir_all(base);
    Ok(())
}

#[test]
fn targets_resolve_through_jar_classpath_and_keep_duplicates() -> anyhow::Result<()> {
    let base = temp_dir("scan_classpath");
    let src = base.join("src");
    let jar = base.join("lib/model-1.0.jar");
    let cache = base.join("catalog.lmdb");
    write_jar(
        &jar,
        &[
            "org/acme/model/Order.class",
            "org/acme/model/Order$Line.class",
            "org/acme/model/Order$Line$Tax.class",
            "org/acme/model/Order$1.class",
        ],
    )?;
    write_file(
        &src.join("com/example/Holder.java"),
        r#"
package com.example;

import io.quarkus.runtime.annotations.RegisterForReflection;
import org.acme.model.Order;

@RegisterForReflection(targets = { Order.class, Order.Line.Tax.class, Missing.class })
public class Holder {}
"#,
    )?;

    let args = [
        "--classpath",
        jar.to_str().unwrap_or_default(),
        "--cache",
        cache.to_str().unwrap_or_default(),
        "scan",
        "--source",
        src.to_str().unwrap_or_default(),
    ];
    let report = run_json(&args)?;

    assert_eq!(
        class_names(&report),
        vec![
            "org.acme.model.Order",
            "org.acme.model.Order$Line",
            "org.acme.model.Order$Line$Tax",
            "org.acme.model.Order$Line$Tax",
            "com.example.Missing"
        ]
    );
    assert_eq!(report["summary"]["resolution_failures"], Value::from(1));

    // Second run is served from the jar catalog cache with the same output.
    let again = run_json(&args)?;
    assert_eq!(class_names(&again), class_names(&report));

    let stats = run_json(&["--cache", cache.to_str().unwrap_or_default(), "stats"])?;
    assert_eq!(stats["cataloged_jars"], Value::from(1));

    let cleared = run_json(&["--cache", cache.to_str().unwrap_or_default(), "clear"])?;
    assert_eq!(cleared["removed"], Value::Bool(true));
    assert!(!cache.exists());

    let _ = std::fs::remove_dir_all(base);
    Ok(())
}

#[test]
fn index_then_scan_from_index_file() -> anyhow::Result<()> {
    let base = temp_dir("index_then_scan");
    let src = base.join("src");
    let index = base.join("out/index.json");
    write_file(
        &src.join("a/Outer.java"),
        r#"
package a;

@io.quarkus.runtime.annotations.RegisterForReflection(includeNested = false)
class Outer {
    class Hidden {}
}
"#,
    )?;

    let out = run(&[
        "index",
        "--source",
        src.to_string_lossy().as_ref(),
        "-o",
        index.to_string_lossy().as_ref(),
    ])?;
    assert!(out.status.success());

    let document: Value = serde_json::from_str(&std::fs::read_to_string(&index)?)?;
    assert_eq!(
        document["nested_classes"]["a.Outer"][0],
        Value::String("a.Outer$Hidden".to_string())
    );

    let report = run_json(&[
        "--no-cache",
        "scan",
        "--index",
        index.to_string_lossy().as_ref(),
    ])?;
    assert_eq!(class_names(&report), vec!["a.Outer"]);

    let _ = std::fs::remove_dir_all(base);
    Ok(())
}

#[test]
fn marker_on_method_without_targets_fails_the_scan() -> anyhow::Result<()> {
    let base = temp_dir("scan_fatal");
    let src = base.join("src");
    write_file(
        &src.join("a/Service.java"),
        r#"
package a;

import io.quarkus.runtime.annotations.RegisterForReflection;

class Service {
    @RegisterForReflection
    void handle() {}
}
"#,
    )?;

    let out = run(&[
        "--no-cache",
        "scan",
        "--source",
        src.to_string_lossy().as_ref(),
    ])?;
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("must annotate a class"), "stderr: {stderr}");

    let _ = std::fs::remove_dir_all(base);
    Ok(())
}

#[test]
fn nested_lists_direct_members_from_class_directory() -> anyhow::Result<()> {
    let base = temp_dir("nested_dir");
    let classes = base.join("classes/org/example");
    for name in ["Outer.class", "Outer$A.class", "Outer$A$B.class", "Outer$3.class"] {
        write_file(&classes.join(name), "")?;
    }

    let result = run_json(&[
        "--no-cache",
        "--classpath",
        base.join("classes").to_string_lossy().as_ref(),
        "nested",
        "org.example.Outer",
    ])?;
    assert_eq!(
        result["nested"],
        Value::Array(vec![Value::String("org.example.Outer$A".to_string())])
    );

    let _ = std::fs::remove_dir_all(base);
    Ok(())
}

#[test]
fn text_format_lists_records() -> anyhow::Result<()> {
    let base = temp_dir("scan_text");
    let index = base.join("index.json");
    write_file(
        &index,
        r#"{
  "occurrences": [
    {
      "annotation": "com.acme.Reflective",
      "target": {"kind": "class", "name": "com.example.Foo"},
      "values": {"methods": {"type": "boolean", "value": false}, "fields": null}
    }
  ],
  "nested_classes": {"com.example.Foo": []}
}"#,
    )?;

    let out = run(&[
        "--no-cache",
        "--annotation",
        "com.acme.Reflective",
        "scan",
        "--index",
        index.to_string_lossy().as_ref(),
        "-f",
        "text",
    ])?;
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("- com.example.Foo methods=false fields=true"));

    let _ = std::fs::remove_dir_all(base);
    Ok(())
}
