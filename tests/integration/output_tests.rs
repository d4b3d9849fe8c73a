use dupfind::duplicates::{DuplicateFinder, DuplicateGroup, FinderConfig, ScanSummary};
use dupfind::error::ExitCode;
use dupfind::output::text::HEADER;
use dupfind::output::{CsvOutput, JsonOutput, TextOutput};
use dupfind::scanner::ExclusionSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn reference_tree(root: &Path) {
    write(&root.join("a.txt"), b"X");
    write(&root.join("sub/b.txt"), b"X");
    write(&root.join(".hidden/c.txt"), b"X");
    write(&root.join("skipme/d.txt"), b"X");
    write(&root.join("e.txt"), b"Y");
}

fn scan(root: &Path) -> (Vec<DuplicateGroup>, ScanSummary) {
    let config = FinderConfig::default().with_exclusions(ExclusionSet::new(["skipme"]));
    DuplicateFinder::new(config).find_duplicates(root).unwrap()
}

#[test]
fn test_text_report_for_reference_tree() {
    let dir = tempdir().unwrap();
    reference_tree(dir.path());
    let (groups, _) = scan(dir.path());

    let report = TextOutput::new(&groups).to_string().unwrap();

    let expected = format!(
        "{HEADER}\n{}|{}\n",
        dir.path().join("a.txt").display(),
        dir.path().join("sub/b.txt").display()
    );
    assert_eq!(report, expected);
}

#[test]
fn test_json_report_for_reference_tree() {
    let dir = tempdir().unwrap();
    reference_tree(dir.path());
    let (groups, summary) = scan(dir.path());
    let exit_code = ExitCode::from_scan(&groups, &summary);

    let json = JsonOutput::new(&groups, &summary, exit_code)
        .to_json()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let duplicates = parsed["duplicates"].as_array().unwrap();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0]["size"], 1);
    assert_eq!(duplicates[0]["files"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["summary"]["total_files"], 3);
    assert_eq!(parsed["summary"]["exit_code"], 0);
    assert_eq!(parsed["summary"]["exit_code_name"], "DF000");
}

#[test]
fn test_csv_report_for_reference_tree() {
    let dir = tempdir().unwrap();
    reference_tree(dir.path());
    let (groups, _) = scan(dir.path());

    let csv = CsvOutput::new(&groups).to_string().unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[0][1], groups[0].hash_hex());
    assert_eq!(&rows[0][2], dir.path().join("a.txt").to_string_lossy());
    assert_eq!(&rows[1][2], dir.path().join("sub/b.txt").to_string_lossy());
    assert_eq!(&rows[1][3], "1");
}

#[test]
fn test_group_serde_uses_hex_hash() {
    let dir = tempdir().unwrap();
    reference_tree(dir.path());
    let (groups, _) = scan(dir.path());

    let json = serde_json::to_string(&groups[0]).unwrap();
    let back: DuplicateGroup = serde_json::from_str(&json).unwrap();

    assert!(json.contains(&groups[0].hash_hex()));
    assert_eq!(back, groups[0]);
}
