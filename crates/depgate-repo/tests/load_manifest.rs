use camino::{Utf8Path, Utf8PathBuf};
use depgate_repo::{FsManifestReader, ManifestError, load_manifest, locate_manifests};
use depgate_types::ids;
use tempfile::TempDir;

fn write_file(path: &Utf8Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, content).expect("write file");
}

fn setup_repo() -> (TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path");

    write_file(
        &root.join("package.json"),
        r#"{ "dependencies": { "lodash": "^4.17.21" }, "devDependencies": { "jest": "~29.7.0" } }"#,
    );
    write_file(
        &root.join("web").join("Package.json"),
        r#"{ "dependencies": { "react": "18.2.0" } }"#,
    );
    write_file(&root.join("broken").join("package.json"), "{ invalid json");

    (temp, root)
}

#[test]
fn reads_manifests_using_their_original_case() {
    let (_temp, root) = setup_repo();
    let reader = FsManifestReader::new(root);

    let found = locate_manifests(["web/Package.json", "package.json"]);
    let records: Vec<_> = found
        .iter()
        .map(|loc| load_manifest(&reader, loc, true).expect("load"))
        .collect();

    assert_eq!(records[0].file_path, "web/package.json");
    assert_eq!(records[0].packages.len(), 1);
    assert_eq!(records[0].packages[0].name, "react");

    assert_eq!(records[1].file_path, "package.json");
    let versions: Vec<_> = records[1]
        .packages
        .iter()
        .map(|p| p.version.as_str())
        .collect();
    assert_eq!(versions, vec!["4.17.21", "29.7.0"]);
}

#[test]
fn invalid_manifest_is_a_parse_error() {
    let (_temp, root) = setup_repo();
    let reader = FsManifestReader::new(root);

    let found = locate_manifests(["broken/package.json"]);
    let err = load_manifest(&reader, &found[0], false).expect_err("invalid json");
    assert!(matches!(err, ManifestError::Parse { ref path, .. } if path == "broken/package.json"));
    assert_eq!(err.code(), ids::CODE_MANIFEST_INVALID);
}

#[test]
fn deleted_manifest_is_a_read_error() {
    let (_temp, root) = setup_repo();
    let reader = FsManifestReader::new(root);

    let found = locate_manifests(["gone/package.json"]);
    let err = load_manifest(&reader, &found[0], false).expect_err("missing file");
    assert!(matches!(err, ManifestError::Read(_)));
    assert_eq!(err.code(), ids::CODE_MANIFEST_UNREADABLE);
    assert!(err.to_string().contains("gone/package.json"));
}
