//! Developer tasks (schema generation, explain coverage, report normalization).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;

/// Workspace root: the parent of the xtask directory.
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return Ok(parent.to_path_buf());
    }
    Ok(manifest_dir)
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(depgate_types::DepgateReportV1)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(depgate_settings::DepgateConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "depgate.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "depgate.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Pretty-printed JSON with a trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for entry in schema_specs() {
        let json = serialize_schema(&(entry.generate)())?;
        let path = dir.join(entry.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Fails when a checked-in schema is missing or differs from the generated one.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for entry in schema_specs() {
        let path = dir.join(entry.filename);
        if !path.exists() {
            missing.push(entry.filename);
            continue;
        }

        let expected = serialize_schema(&(entry.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(entry.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = depgate_types::explain::all_check_ids();
    let codes = depgate_types::explain::all_codes();

    let mut errors = Vec::new();
    for (kind, ids) in [("Check ID", check_ids), ("Code", codes)] {
        for id in ids {
            match depgate_types::explain::lookup_explanation(id) {
                Some(exp) => {
                    if exp.title.is_empty() {
                        errors.push(format!("{kind} '{id}' has empty title"));
                    }
                    if exp.description.is_empty() {
                        errors.push(format!("{kind} '{id}' has empty description"));
                    }
                    if exp.remediation.is_empty() {
                        errors.push(format!("{kind} '{id}' has empty remediation"));
                    }
                }
                None => errors.push(format!("{kind} '{id}' has no explanation")),
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        return Ok(());
    }

    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!(
        "Explain coverage validation failed with {} errors",
        errors.len()
    )
}

/// Print a report with run-dependent fields replaced, for golden comparisons.
fn normalize_report(path: Option<&str>) -> anyhow::Result<()> {
    let Some(path) = path else {
        bail!("usage: cargo xtask normalize-report <report.json>");
    };
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {path}"))?;
    let normalized = depgate_test_util::normalize_nondeterministic(value);
    println!("{}", serde_json::to_string_pretty(&normalized)?);
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
    eprintln!("  normalize-report  Print a report with timestamps and version masked");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "explain-coverage" => explain_coverage(),
        "normalize-report" => normalize_report(args.get(2).map(String::as_str)),
        "print-schema-ids" => {
            for entry in schema_specs() {
                println!("{}", entry.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
