use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Abstraction for managing the generator test environment.
struct ModelgenTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl ModelgenTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let project_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .context("Workspace root not found")?
            .join("demos/boteco");

        let dest = tmp.path().join("boteco");
        Self::copy_dir(&project_root, &dest)?;

        Ok(Self {
            _tmp: tmp,
            root: dest,
        })
    }

    fn copy_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
        let mut options = fs_extra::dir::CopyOptions::new();
        options.skip_exist = true;
        options.content_only = true;

        std::fs::create_dir_all(dst)?;
        fs_extra::dir::copy(src, dst, &options)
            .map(|_| ())
            .map_err(|e| std::io::Error::other(e.to_string()))
    }

    fn modelgen(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("modelgen"));
        cmd.current_dir(&self.root);
        cmd.env_remove("MODELGEN_SCHEMA_DIR");
        cmd.env_remove("MODELGEN_TEMPLATE_DIR");
        cmd.env_remove("MODELGEN_OUTPUT_DIR");
        cmd
    }

    fn schema(&self, name: &str, content: &str) -> Result<()> {
        fs::write(self.root.join("db-meta/schemas").join(name), content)?;
        Ok(())
    }

    fn generated(&self) -> PathBuf {
        self.root.join("generated")
    }

    fn generated_files(&self) -> Vec<String> {
        let root = self.generated();
        let mut files: Vec<String> = walkdir::WalkDir::new(&root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.path()
                    .strip_prefix(&root)
                    .ok()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect();
        files.sort();
        files
    }
}

#[test]
fn test_generates_every_entity_and_target() -> Result<()> {
    let env = ModelgenTestEnv::new()?;

    env.modelgen()
        .assert()
        .success()
        .stdout(predicate::str::diff("Generated 3 models\n"));

    assert_eq!(
        env.generated_files(),
        vec![
            "python/diningtable_model.py",
            "python/order_model.py",
            "python/product_model.py",
            "sql/diningtable_table.sql",
            "sql/order_table.sql",
            "sql/product_table.sql",
        ]
    );

    let product_sql = fs::read_to_string(env.generated().join("sql/product_table.sql"))?;
    assert!(product_sql.contains(r#"CREATE TABLE IF NOT EXISTS "boteco"."products""#));
    assert!(product_sql.contains("price REAL NOT NULL"));
    assert!(product_sql.contains("barcode TEXT,"));
    assert!(product_sql.contains("CREATE UNIQUE INDEX"));

    // storage.schema wins over metadata.default_schema
    let order_sql = fs::read_to_string(env.generated().join("sql/order_table.sql"))?;
    assert!(order_sql.contains(r#""sales"."orders""#));

    // No storage block: lower-cased entity name
    let table_py = fs::read_to_string(env.generated().join("python/diningtable_model.py"))?;
    assert!(table_py.contains(r#"__tablename__ = "diningtable""#));
    assert!(table_py.contains("class TableStatus(str, Enum):"));
    assert!(table_py.contains("order_ref: Optional[str] = None"));

    Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> Result<()> {
    let env = ModelgenTestEnv::new()?;

    env.modelgen().assert().success();
    let first: Vec<(String, Vec<u8>)> = env
        .generated_files()
        .into_iter()
        .map(|f| fs::read(env.generated().join(&f)).map(|bytes| (f, bytes)))
        .collect::<std::io::Result<_>>()?;

    env.modelgen().assert().success();
    let second: Vec<(String, Vec<u8>)> = env
        .generated_files()
        .into_iter()
        .map(|f| fs::read(env.generated().join(&f)).map(|bytes| (f, bytes)))
        .collect::<std::io::Result<_>>()?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_invalid_yaml_fails_before_any_output() -> Result<()> {
    let env = ModelgenTestEnv::new()?;
    env.schema("zz_broken.yaml", "botecopro_domain:\n  entities: [unclosed\n")?;

    env.modelgen()
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: "))
        .stderr(predicate::str::contains("zz_broken.yaml"));

    assert!(!env.generated().exists());
    Ok(())
}

#[test]
fn test_no_marker_anywhere() -> Result<()> {
    let env = ModelgenTestEnv::new()?;
    let schemas = env.root.join("db-meta/schemas");
    fs::remove_dir_all(&schemas)?;
    fs::create_dir_all(&schemas)?;
    env.schema("unrelated.yaml", "rules:\n  strict: true\n")?;

    env.modelgen()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: no domain entries found under"));

    Ok(())
}

#[test]
fn test_last_fragment_replaces_entity() -> Result<()> {
    let env = ModelgenTestEnv::new()?;
    env.schema(
        "zz_override.yaml",
        "botecopro_domain:\n  entities:\n    Product:\n      attributes:\n        name: str\n",
    )?;

    env.modelgen().assert().success();

    let product_py = fs::read_to_string(env.generated().join("python/product_model.py"))?;
    assert!(product_py.contains("name: str"));
    assert!(!product_py.contains("barcode"));
    // The overriding definition has no storage block
    assert!(product_py.contains(r#"__tablename__ = "product""#));
    Ok(())
}

#[test]
fn test_anchored_attributes_are_merged() -> Result<()> {
    let env = ModelgenTestEnv::new()?;
    env.schema(
        "zz_audit.yaml",
        "audit: &audit\n  created_at: str\nbotecopro_domain:\n  entities:\n    Receipt:\n      attributes:\n        <<: *audit\n        total: float\n",
    )?;

    env.modelgen().assert().success();

    let receipt_sql = fs::read_to_string(env.generated().join("sql/receipt_table.sql"))?;
    assert!(receipt_sql.contains("created_at TEXT"));
    assert!(receipt_sql.contains("total REAL"));
    assert!(!receipt_sql.contains("<<"));
    Ok(())
}

#[test]
fn test_missing_template_is_fatal() -> Result<()> {
    let env = ModelgenTestEnv::new()?;
    fs::remove_file(env.root.join("templates/sqlite_model.j2"))?;

    env.modelgen()
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: template `sqlite_model.j2` not found",
        ));

    assert!(!env.generated().exists());
    Ok(())
}

#[test]
fn test_output_dir_override() -> Result<()> {
    let env = ModelgenTestEnv::new()?;

    env.modelgen()
        .env("MODELGEN_OUTPUT_DIR", "build/out")
        .assert()
        .success();

    assert!(env.root.join("build/out/sql/order_table.sql").exists());
    assert!(!env.generated().exists());
    Ok(())
}

#[test]
fn test_config_file_fallback_schema() -> Result<()> {
    let env = ModelgenTestEnv::new()?;
    fs::write(env.root.join("modelgen.yaml"), "fallback-schema: public\n")?;
    // Drop the shared metadata so the fallback applies
    fs::remove_file(env.root.join("db-meta/schemas/00_shared.yaml"))?;

    env.modelgen().assert().success();

    let table_sql = fs::read_to_string(env.generated().join("sql/diningtable_table.sql"))?;
    assert!(table_sql.contains(r#""public"."diningtable""#));
    Ok(())
}
