use dupfind::duplicates::{DuplicateFinder, FinderConfig};
use dupfind::scanner::{ExclusionSet, Walker, WalkerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn walk(root: &Path, exclusions: &[&str]) -> Vec<PathBuf> {
    let config = WalkerConfig::new(ExclusionSet::new(exclusions.iter().copied()), false);
    Walker::new(root, config)
        .walk()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn test_hidden_files_and_directories_never_emitted() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(&root.join(".env"), b"secret");
    write(&root.join(".git/config"), b"secret");
    write(&root.join("visible/.cache/blob"), b"secret");
    write(&root.join("visible/keep"), b"secret");

    let paths = walk(root, &[]);

    assert_eq!(paths, vec![root.join("visible/keep")]);
}

#[test]
fn test_dot_inside_name_is_not_hidden() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(&root.join("archive.tar.gz"), b"1");
    write(&root.join("v1.2/notes"), b"2");

    let paths = walk(root, &[]);

    assert_eq!(paths, vec![root.join("archive.tar.gz"), root.join("v1.2/notes")]);
}

#[test]
fn test_exclusion_matches_at_any_depth() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(&root.join("node_modules/pkg/index.js"), b"x");
    write(&root.join("app/node_modules/lib.js"), b"x");
    write(&root.join("app/src/deep/node_modules/a/b.js"), b"x");
    write(&root.join("app/src/main.js"), b"x");

    let paths = walk(root, &["node_modules"]);

    assert_eq!(paths, vec![root.join("app/src/main.js")]);
}

#[test]
fn test_exclusion_is_exact_basename() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(&root.join("node_modules2/kept.js"), b"x");
    write(&root.join("my_node_modules/kept.js"), b"x");
    write(&root.join("node_modules/dropped.js"), b"x");

    let paths = walk(root, &["node_modules"]);

    assert_eq!(
        paths,
        vec![
            root.join("my_node_modules/kept.js"),
            root.join("node_modules2/kept.js"),
        ]
    );
}

#[test]
fn test_exclusion_applies_to_directories_only() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(&root.join("build"), b"a file named like the exclusion");

    let paths = walk(root, &["build"]);

    assert_eq!(paths, vec![root.join("build")]);
}

#[test]
fn test_hidden_or_excluded_root_is_still_walked() {
    let dir = tempdir().unwrap();
    let hidden_root = dir.path().join(".config");
    write(&hidden_root.join("settings"), b"x");
    let excluded_root = dir.path().join("repos");
    write(&excluded_root.join("readme"), b"x");

    assert_eq!(walk(&hidden_root, &[]), vec![hidden_root.join("settings")]);
    assert_eq!(
        walk(&excluded_root, &["repos"]),
        vec![excluded_root.join("readme")]
    );
}

#[test]
fn test_excluded_duplicates_do_not_form_groups() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(&root.join("src/lib.rs"), b"fn main() {}");
    write(&root.join("target/copy/lib.rs"), b"fn main() {}");
    write(&root.join(".backup/lib.rs"), b"fn main() {}");

    let config = FinderConfig::default().with_exclusions(ExclusionSet::new(["target"]));
    let (groups, summary) = DuplicateFinder::new(config)
        .find_duplicates(root)
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[test]
fn test_empty_exclusion_name_is_ignored() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(&root.join("a/file"), b"x");

    let paths = walk(root, &[""]);

    assert_eq!(paths, vec![root.join("a/file")]);
}
