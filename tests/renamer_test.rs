use changeme::error::Error;
use changeme::ignore::{build_denylist, ExclusionSet};
use changeme::renamer::{apply_renames, plan_renames, rename_tree, Rename};
use changeme::variables::VariableMap;
use changeme::walker::TreeWalker;
use std::fs;
use tempfile::TempDir;

fn variables() -> VariableMap {
    VariableMap::from_pairs([("CHANGEME_BIN", "foo"), ("CHANGEME", "Foo")]).unwrap()
}

#[test]
fn test_rename_nested_directory_and_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("CHANGEME")).unwrap();
    fs::write(root.join("CHANGEME/CHANGEME_file.txt"), "body").unwrap();

    let exclusions = ExclusionSet::default();
    let denylist = build_denylist(&[]).unwrap();
    let walker = TreeWalker::new(root, &exclusions, &denylist);
    let report = rename_tree(&walker, &variables()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.renamed.len(), 2);
    assert!(root.join("Foo").is_dir());
    assert_eq!(fs::read_to_string(root.join("Foo/Foo_file.txt")).unwrap(), "body");
    assert!(!root.join("CHANGEME").exists());
    assert!(!root.join("Foo/CHANGEME_file.txt").exists());
    assert_eq!(fs::read_dir(root).unwrap().count(), 1);
}

#[test]
fn test_plan_is_deepest_first() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("CHANGEME/CHANGEME_BIN")).unwrap();
    fs::write(root.join("CHANGEME/CHANGEME_BIN/CHANGEME.rs"), "").unwrap();

    let exclusions = ExclusionSet::default();
    let denylist = build_denylist(&[]).unwrap();
    let walker = TreeWalker::new(root, &exclusions, &denylist);
    let plan = plan_renames(&walker, &variables()).unwrap();

    let depths: Vec<usize> = plan.iter().map(|r| r.from.components().count()).collect();
    assert_eq!(plan.len(), 3);
    assert!(depths.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(plan[0].to, root.join("CHANGEME/CHANGEME_BIN/Foo.rs"));
    assert_eq!(plan[1].to, root.join("CHANGEME/foo"));
    assert_eq!(plan[2].to, root.join("Foo"));

    let report = apply_renames(plan);
    assert!(report.is_success());
    assert!(root.join("Foo/foo/Foo.rs").is_file());
}

#[test]
fn test_excluded_paths_are_not_renamed() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("target/CHANGEME")).unwrap();
    fs::write(root.join("CHANGEME.png"), "").unwrap();

    let exclusions = ExclusionSet::from_root(root, &["target"]);
    let denylist = build_denylist(&[]).unwrap();
    let walker = TreeWalker::new(root, &exclusions, &denylist);
    let plan = plan_renames(&walker, &variables()).unwrap();

    assert!(plan.is_empty());
}

#[test]
fn test_conflict_does_not_stop_other_renames() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("CHANGEME.txt"), "template").unwrap();
    fs::write(root.join("Foo.txt"), "existing").unwrap();
    fs::write(root.join("CHANGEME_BIN.sh"), "script").unwrap();

    let exclusions = ExclusionSet::default();
    let denylist = build_denylist(&[]).unwrap();
    let walker = TreeWalker::new(root, &exclusions, &denylist);
    let report = rename_tree(&walker, &variables()).unwrap();

    assert!(!report.is_success());
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0], Error::RenameConflict { .. }));
    assert_eq!(report.renamed.len(), 1);
    assert!(root.join("foo.sh").is_file());
    assert_eq!(fs::read_to_string(root.join("Foo.txt")).unwrap(), "existing");
    assert_eq!(fs::read_to_string(root.join("CHANGEME.txt")).unwrap(), "template");
}

#[test]
fn test_os_failure_is_recorded_and_later_renames_run() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("CHANGEME_BIN.sh"), "script").unwrap();

    let missing = root.join("CHANGEME_gone.txt");
    let plan = vec![
        Rename { from: missing.clone(), to: root.join("Foo_gone.txt") },
        Rename { from: root.join("CHANGEME_BIN.sh"), to: root.join("foo.sh") },
    ];
    let report = apply_renames(plan);

    assert_eq!(report.failures.len(), 1);
    match &report.failures[0] {
        Error::IoError { path, .. } => assert_eq!(path, &missing),
        other => panic!("Expected IoError, got {:?}", other),
    }
    assert_eq!(report.renamed.len(), 1);
    assert_eq!(fs::read_to_string(root.join("foo.sh")).unwrap(), "script");
    assert!(!root.join("Foo_gone.txt").exists());
}
