//! Strict (fail fast) versus lenient (skip and record) error handling.

use dupfind::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use dupfind::error::ExitCode;
use dupfind::scanner::{ExclusionSet, ScanError, WalkerConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn following() -> WalkerConfig {
    WalkerConfig::new(ExclusionSet::default(), true)
}

#[test]
#[cfg(unix)]
fn test_strict_scan_aborts_on_broken_link() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), b"same");
    write(&dir.path().join("b"), b"same");
    symlink(dir.path().join("gone"), dir.path().join("link")).unwrap();

    let config = FinderConfig::default().with_walker_config(following());
    let err = DuplicateFinder::new(config)
        .find_duplicates(dir.path())
        .unwrap_err();

    assert!(matches!(err, FinderError::Scan(ScanError::NotFound(_))));
}

#[test]
#[cfg(unix)]
fn test_lenient_scan_records_and_continues() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), b"same");
    write(&dir.path().join("b"), b"same");
    symlink(dir.path().join("gone"), dir.path().join("link")).unwrap();

    let config = FinderConfig::default()
        .with_walker_config(following())
        .with_strict(false);
    let (groups, summary) = DuplicateFinder::new(config)
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].path().ends_with("link"));
    assert_eq!(
        ExitCode::from_scan(&groups, &summary),
        ExitCode::PartialSuccess
    );
}

#[test]
#[cfg(unix)]
fn test_symlinks_ignored_without_following() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    write(&dir.path().join("real"), b"data");
    symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();
    symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    // The alias is not a second copy of the content
    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
    assert!(!summary.has_errors());
}

#[test]
#[cfg(unix)]
fn test_unreadable_file_policy() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked.txt");
    write(&dir.path().join("a"), b"same");
    write(&dir.path().join("b"), b"same");
    write(&locked, b"same");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read the file regardless of its mode
    if fs::File::open(&locked).is_ok() {
        return;
    }

    let strict = DuplicateFinder::with_defaults().find_duplicates(dir.path());
    let lenient = DuplicateFinder::new(FinderConfig::default().with_strict(false))
        .find_duplicates(dir.path());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert!(matches!(
        strict,
        Err(FinderError::Scan(ScanError::Hash(_)))
    ));
    let (groups, summary) = lenient.unwrap();
    assert_eq!(groups[0].files.len(), 2);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].path().ends_with("locked.txt"));
}

#[test]
fn test_clean_scan_exit_codes() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), b"one");
    write(&dir.path().join("b"), b"two");

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();
    assert_eq!(
        ExitCode::from_scan(&groups, &summary),
        ExitCode::NoDuplicates
    );

    write(&dir.path().join("c"), b"one");
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();
    assert_eq!(ExitCode::from_scan(&groups, &summary), ExitCode::Success);
}
