use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const PROJECT_CONFIG: &str = "name: cli-fixture\nrule-paths: [rules]\n";

const RULES: &str = r#"
- id: belief
  source: Road Traffic Act 1988 s.6(2)
  kind: mandatory_prerequisite
  condition:
    operator: AND
    conditions: [reason to believe, driven a motor vehicle]
  on_success: { result: COMPLIANT, message: Grounds recorded }
  on_failure: { result: NON_COMPLIANT, message: No grounds recorded, severity: high }

- id: caution
  source: PACE 1984 Code C para 10.1
  kind: mandatory_procedure
  condition:
    operator: IF-THEN
    antecedent: { element: arrest, options: [arrested] }
    consequent: { element: caution, options: [cautioned] }
  on_success: { result: COMPLIANT, message: Caution recorded }
  on_failure:
    result: NON_COMPLIANT
    message: No caution recorded after arrest
    severity: critical
    consequence: Interview may be excluded
"#;

const COMPLIANT_STATEMENT: &str = "The officer had reason to believe the accused had driven a motor vehicle. \
He was arrested and cautioned at the roadside.";

const UNCAUTIONED_STATEMENT: &str = "The officer had reason to believe the accused had driven a motor vehicle. \
He was arrested at the roadside.";

/// Temporary project with a config file, one rule file and a document.
struct ForensicTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl ForensicTestEnv {
    fn new(rules: &str) -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().to_path_buf();
        fs::write(root.join("forensic.yaml"), PROJECT_CONFIG)?;
        fs::create_dir_all(root.join("rules"))?;
        fs::write(root.join("rules").join("statutes.yaml"), rules)?;
        Ok(Self { _tmp: tmp, root })
    }

    fn document(&self, text: &str) -> Result<PathBuf> {
        let path = self.root.join("statement.txt");
        fs::write(&path, text)?;
        Ok(path)
    }

    fn forensic(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("forensic"));
        cmd.current_dir(&self.root);
        cmd
    }
}

#[test]
fn test_check_compliant_document() -> Result<()> {
    let env = ForensicTestEnv::new(RULES)?;
    let document = env.document(COMPLIANT_STATEMENT)?;

    env.forensic()
        .arg("check")
        .arg(&document)
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: COMPLIANT"))
        .stdout(predicate::str::contains("=== Rule caution ==="));
    Ok(())
}

#[test]
fn test_check_mode_fails_on_critical_failure() -> Result<()> {
    let env = ForensicTestEnv::new(RULES)?;
    let document = env.document(UNCAUTIONED_STATEMENT)?;

    env.forensic()
        .arg("check")
        .arg(&document)
        .arg("--check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Critical failures (1):"))
        .stdout(predicate::str::contains("Consequence: Interview may be excluded"))
        .stderr(predicate::str::contains("--check mode"));
    Ok(())
}

#[test]
fn test_check_without_check_flag_reports_but_succeeds() -> Result<()> {
    let env = ForensicTestEnv::new(RULES)?;
    let document = env.document(UNCAUTIONED_STATEMENT)?;

    env.forensic()
        .arg("check")
        .arg(&document)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: NON-COMPLIANT"));
    Ok(())
}

#[test]
fn test_check_json_output_with_selected_and_unknown_rules() -> Result<()> {
    let env = ForensicTestEnv::new(RULES)?;
    let document = env.document(UNCAUTIONED_STATEMENT)?;

    let output = env
        .forensic()
        .args(["check", "--format", "json", "--rule", "belief", "--rule", "ghost"])
        .arg(&document)
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["total_rules"], 2);
    assert_eq!(report["compliant"], 1);
    assert_eq!(report["errors"], 1);
    assert_eq!(report["overall_compliant"], true);
    assert_eq!(report["results"][1]["status"], "error");
    assert_eq!(report["results"][1]["rule_id"], "ghost");
    Ok(())
}

#[test]
fn test_rust_log_controls_verbosity() -> Result<()> {
    let env = ForensicTestEnv::new(RULES)?;
    let document = env.document(COMPLIANT_STATEMENT)?;

    env.forensic()
        .env("RUST_LOG", "debug")
        .arg("check")
        .arg(&document)
        .assert()
        .success()
        .stderr(predicate::str::contains("Rule evaluated"));

    env.forensic()
        .env("RUST_LOG", "warn")
        .arg("check")
        .arg(&document)
        .assert()
        .success()
        .stderr(predicate::str::contains("Rule set evaluated").not())
        .stderr(predicate::str::contains("Rule evaluated").not());
    Ok(())
}

#[test]
fn test_check_missing_document_fails() -> Result<()> {
    let env = ForensicTestEnv::new(RULES)?;

    env.forensic()
        .args(["check", "nowhere.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read document"));
    Ok(())
}

#[test]
fn test_validate_reports_invalid_rules() -> Result<()> {
    let broken = format!(
        "{}\n- id: xor-rule\n  source: Nowhere\n  kind: mandatory_procedure\n  condition: {{ operator: XOR, conditions: [a] }}\n  on_success: {{ result: A, message: a }}\n  on_failure: {{ result: B, message: b }}\n",
        RULES
    );
    let env = ForensicTestEnv::new(&broken)?;

    env.forensic()
        .arg("validate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("3 total, 2 valid, 1 rejected"))
        .stderr(predicate::str::contains("xor-rule"));
    Ok(())
}

#[test]
fn test_validate_clean_project() -> Result<()> {
    let env = ForensicTestEnv::new(RULES)?;

    env.forensic()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("All rule definitions are valid"));
    Ok(())
}

#[test]
fn test_rules_lists_every_rule() -> Result<()> {
    let env = ForensicTestEnv::new(RULES)?;

    env.forensic()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("belief"))
        .stdout(predicate::str::contains("caution"))
        .stdout(predicate::str::contains("IF-THEN"));
    Ok(())
}

#[test]
fn test_export_writes_rule_set() -> Result<()> {
    let env = ForensicTestEnv::new(RULES)?;
    let output = env.root.join("out").join("rules.json");

    env.forensic()
        .arg("export")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let exported: Vec<serde_json::Value> = serde_json::from_str(&fs::read_to_string(&output)?)?;
    let ids: Vec<&str> = exported
        .iter()
        .filter_map(|rule| rule["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["belief", "caution"]);
    Ok(())
}

#[test]
fn test_demo_project_evaluates() -> Result<()> {
    let demo = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .context("Workspace root not found")?
        .join("demos/drink-driving");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("forensic"));
    cmd.arg("check")
        .arg(demo.join("statement.txt"))
        .arg("--project-dir")
        .arg(&demo)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rule_id\": \"pace-c10-caution\""))
        .stdout(predicate::str::contains("\"rule_id\": \"pace-s78-oppression\""));
    Ok(())
}
