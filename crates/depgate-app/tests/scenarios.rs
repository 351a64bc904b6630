//! End-to-end check runs against in-memory collaborators.

use depgate_app::{CheckError, CheckInput, render_console, run_check, to_renderable};
use depgate_domain::policy::{EffectiveConfig, PolicyMode};
use depgate_remote::{PolicyFetchError, PolicySource};
use depgate_repo::{ManifestReadError, ManifestReader};
use depgate_types::{ManifestStatus, PackageRef, RepoPath, Verdict, ids};
use std::cell::Cell;
use std::collections::BTreeMap;

#[derive(Default)]
struct FakeRepo {
    files: BTreeMap<String, String>,
}

impl FakeRepo {
    fn with(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }
}

impl ManifestReader for FakeRepo {
    fn read_manifest(&self, path: &RepoPath) -> Result<String, ManifestReadError> {
        self.files
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| ManifestReadError {
                path: path.as_str().to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }
}

struct FakePolicy {
    body: String,
    fetches: Cell<usize>,
}

impl FakePolicy {
    fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            fetches: Cell::new(0),
        }
    }
}

impl PolicySource for FakePolicy {
    fn fetch_policy(&self, _url: &str) -> Result<String, PolicyFetchError> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(self.body.clone())
    }
}

fn input(mode: PolicyMode, changed: &[&str]) -> CheckInput {
    CheckInput {
        config: EffectiveConfig {
            mode,
            policy_url: "https://policy.test/packages.json".to_string(),
            fail_if_violations: false,
            include_dev_dependencies: false,
        },
        changed_files: changed.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn allow_policy_accepts_matching_caret_version() {
    let repo = FakeRepo::default().with("package.json", r#"{ "dependencies": { "lodash": "^4.17.21" } }"#);
    let policy = FakePolicy::new(r#"{ "lodash": "4.17.21" }"#);

    let out = run_check(&input(PolicyMode::Allow, &["package.json"]), &repo, &policy).expect("check");

    assert_eq!(out.report.verdict, Verdict::Pass);
    assert!(out.report.violations.is_empty());
    assert_eq!(out.report.data.manifests[0].status, ManifestStatus::Conforming);
    assert_eq!(out.report.data.manifests[0].dependencies_evaluated, 1);
}

#[test]
fn prohibit_wildcard_flags_any_version() {
    let repo = FakeRepo::default().with("package.json", r#"{ "dependencies": { "left-pad": "1.0.0" } }"#);
    let policy = FakePolicy::new(r#"{ "left-pad": "*" }"#);

    let out = run_check(&input(PolicyMode::Prohibit, &["package.json"]), &repo, &policy).expect("check");

    assert_eq!(out.report.verdict, Verdict::Warn);
    assert_eq!(out.report.violations.len(), 1);
    assert_eq!(out.report.violations[0].file_path, "package.json");
    assert_eq!(out.report.violations[0].packages, vec![PackageRef::new("left-pad", "1.0.0")]);
    assert_eq!(out.report.violations[0].packages[0].to_string(), "left-pad : 1.0.0");
}

#[test]
fn allow_with_empty_policy_flags_everything() {
    let repo = FakeRepo::default().with("package.json", r#"{ "dependencies": { "axios": "1.0.0" } }"#);
    let policy = FakePolicy::new("{}");

    let mut i = input(PolicyMode::Allow, &["package.json"]);
    i.config.fail_if_violations = true;
    let out = run_check(&i, &repo, &policy).expect("check");

    assert_eq!(out.report.verdict, Verdict::Fail);
    assert_eq!(out.report.data.violations_total, 1);
    assert_eq!(out.report.violations[0].packages, vec![PackageRef::new("axios", "1.0.0")]);
    assert!(out.result.as_ref().is_some_and(|r| r.should_fail));
}

#[test]
fn no_manifest_change_skips_without_fetching_policy() {
    let repo = FakeRepo::default();
    let policy = FakePolicy::new("{}");

    let out = run_check(
        &input(PolicyMode::Allow, &["src/index.ts", "README.md", "package-lock.json"]),
        &repo,
        &policy,
    )
    .expect("check");

    assert_eq!(policy.fetches.get(), 0);
    assert_eq!(out.report.verdict, Verdict::Skip);
    assert!(out.report.violations.is_empty());
    assert!(out.result.is_none());
    assert_eq!(out.report.data.files_changed, 3);
    assert_eq!(out.report.data.manifests_changed, 0);
    assert_eq!(
        render_console(&to_renderable(&out.report)),
        "No package updates detected.\n"
    );
}

#[test]
fn invalid_manifest_fails_even_without_fail_if_violations() {
    let repo = FakeRepo::default()
        .with("package.json", "{ invalid json")
        .with("web/package.json", r#"{ "dependencies": { "lodash": "4.17.21" } }"#);
    let policy = FakePolicy::new(r#"{ "lodash": "4.17.21" }"#);

    let i = input(PolicyMode::Allow, &["package.json", "web/package.json"]);
    assert!(!i.config.fail_if_violations);
    let out = run_check(&i, &repo, &policy).expect("check");

    assert_eq!(out.report.verdict, Verdict::Fail);
    assert!(out.report.violations.is_empty());
    let broken = &out.report.data.manifests[0];
    assert_eq!(broken.status, ManifestStatus::Invalid);
    assert_eq!(
        broken.error.as_ref().map(|e| e.code.as_str()),
        Some(ids::CODE_MANIFEST_INVALID)
    );
    assert_eq!(out.report.data.manifests[1].status, ManifestStatus::Conforming);
}

#[test]
fn dev_dependencies_ignored_unless_included() {
    let repo = FakeRepo::default().with(
        "package.json",
        r#"{ "devDependencies": { "jest": "^29.7.0", "eslint": "~8.0.0" } }"#,
    );
    let policy = FakePolicy::new("{}");

    let out = run_check(&input(PolicyMode::Allow, &["package.json"]), &repo, &policy).expect("check");
    assert_eq!(out.report.verdict, Verdict::Pass);
    assert_eq!(out.report.data.manifests[0].dependencies_evaluated, 0);

    let mut i = input(PolicyMode::Allow, &["package.json"]);
    i.config.include_dev_dependencies = true;
    let out = run_check(&i, &repo, &policy).expect("check");
    assert_eq!(out.report.verdict, Verdict::Warn);
    assert_eq!(
        out.report.violations[0].packages,
        vec![PackageRef::new("jest", "29.7.0"), PackageRef::new("eslint", "8.0.0")]
    );
}

#[test]
fn manifests_are_keyed_by_lowercased_path_and_read_by_original() {
    let repo = FakeRepo::default()
        .with("Web/Package.json", r#"{ "dependencies": { "axios": "1.6.0" } }"#);
    let policy = FakePolicy::new("{}");

    let out = run_check(
        &input(PolicyMode::Allow, &["Web/Package.json", "web/package.json"]),
        &repo,
        &policy,
    )
    .expect("check");

    assert_eq!(out.report.data.manifests_changed, 1);
    assert_eq!(out.report.violations[0].file_path, "web/package.json");
}

#[test]
fn missing_manifest_file_is_scoped_failure() {
    let repo = FakeRepo::default();
    let policy = FakePolicy::new("{}");

    let out = run_check(&input(PolicyMode::Allow, &["gone/package.json"]), &repo, &policy).expect("check");

    assert_eq!(out.report.verdict, Verdict::Fail);
    assert_eq!(
        out.report.data.manifests[0].error.as_ref().map(|e| e.code.as_str()),
        Some(ids::CODE_MANIFEST_UNREADABLE)
    );
}

#[test]
fn malformed_policy_aborts_the_run() {
    let repo = FakeRepo::default().with("package.json", r#"{ "dependencies": { "a": "1.0.0" } }"#);
    let policy = FakePolicy::new(r#"{ "a": 1 }"#);

    let err = run_check(&input(PolicyMode::Allow, &["package.json"]), &repo, &policy)
        .expect_err("policy parse");
    assert!(matches!(err, CheckError::PolicyParse(_)));
    assert_eq!(err.code(), ids::CODE_POLICY_PARSE_ERROR);
}

#[test]
fn violation_block_lists_every_manifest_in_discovery_order() {
    let repo = FakeRepo::default()
        .with("b/package.json", r#"{ "dependencies": { "zod": "3.22.4" } }"#)
        .with("a/package.json", r#"{ "dependencies": { "axios": "1.6.0", "lodash": "^4.17.21" } }"#);
    let policy = FakePolicy::new(r#"{ "lodash": "4.17.21" }"#);

    let out = run_check(
        &input(PolicyMode::Allow, &["b/package.json", "a/package.json"]),
        &repo,
        &policy,
    )
    .expect("check");

    let paths: Vec<_> = out.report.violations.iter().map(|v| v.file_path.as_str()).collect();
    assert_eq!(paths, vec!["b/package.json", "a/package.json"]);

    let console = render_console(&to_renderable(&out.report));
    assert!(console.contains("PACKAGE POLICY LIST"));
    assert!(console.contains("lodash - 4.17.21"));
    assert!(console.contains("Package Manifest: b/package.json\n - zod : 3.22.4\n"));
    assert!(console.contains("Package Manifest: a/package.json\n - axios : 1.6.0\n"));
}

#[test]
fn each_declaration_of_a_repeated_name_is_evaluated() {
    let repo = FakeRepo::default().with(
        "package.json",
        r#"{ "dependencies": { "lodash": "4.17.20", "axios": "1.0.0", "lodash": "^4.17.21" } }"#,
    );
    let policy = FakePolicy::new(r#"{ "lodash": "4.17.21", "axios": "*" }"#);

    let out = run_check(&input(PolicyMode::Allow, &["package.json"]), &repo, &policy).expect("check");

    assert_eq!(out.report.data.manifests[0].dependencies_evaluated, 3);
    assert_eq!(
        out.report.violations[0].packages,
        vec![PackageRef::new("lodash", "4.17.20")]
    );
}
