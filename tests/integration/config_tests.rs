use clap::Parser;
use dupfind::cli::{Cli, OutputFormat};
use dupfind::config::Config;
use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .extract()
        .unwrap();

    assert!(config.strict);
    assert!(!config.follow_symlinks);
    assert_eq!(config.buffer_size, 64 * 1024);
    assert_eq!(config.output, OutputFormat::Text);
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    let toml_content = r#"
search_dir_paths = ["/Users/chuck/Documents", "/Users/chuck/Desktop"]
excluded_dir_names = ["repos", "node_modules"]
strict = false
output = "csv"
"#;
    fs::write(&config_path, toml_content).unwrap();

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .extract()
        .unwrap();

    assert_eq!(
        config.search_dir_paths,
        vec![
            PathBuf::from("/Users/chuck/Documents"),
            PathBuf::from("/Users/chuck/Desktop")
        ]
    );
    assert_eq!(config.excluded_dir_names, vec!["repos", "node_modules"]);
    assert!(!config.strict);
    assert_eq!(config.output, OutputFormat::Csv);
    // Keys absent from the file keep their defaults
    assert_eq!(config.buffer_size, 64 * 1024);
}

#[test]
fn test_config_rejects_bad_value() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "output = \"xml\"\n").unwrap();

    let result: Result<Config, _> = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .extract();

    assert!(result.is_err());
}

#[test]
fn test_config_load_from_env() {
    std::env::set_var("DUPFIND_BUFFER_SIZE", "4096");
    std::env::set_var("DUPFIND_FOLLOW_SYMLINKS", "true");

    use figment::providers::Env;
    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("DUPFIND_").split("__"))
        .extract()
        .unwrap();

    assert_eq!(config.buffer_size, 4096);
    assert!(config.follow_symlinks);

    std::env::remove_var("DUPFIND_BUFFER_SIZE");
    std::env::remove_var("DUPFIND_FOLLOW_SYMLINKS");
}

#[test]
fn test_cli_overrides_config_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "search_dir_paths = [\"/from/file\"]\nexcluded_dir_names = [\"repos\"]\n",
    )
    .unwrap();
    let file_config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .extract()
        .unwrap();

    let cli = Cli::try_parse_from(["dupfind", "-x", "target,build", "--follow-symlinks"]).unwrap();
    let config = file_config.with_cli_overrides(&cli);

    assert_eq!(config.search_dir_paths, vec![PathBuf::from("/from/file")]);
    assert_eq!(config.excluded_dir_names, vec!["target", "build"]);
    assert!(config.follow_symlinks);
    assert!(config.strict);
}

#[test]
fn test_config_save_round_trip() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    let config = Config {
        search_dir_paths: vec![PathBuf::from("/data")],
        excluded_dir_names: vec!["node_modules".to_string()],
        buffer_size: 8192,
        ..Config::default()
    };

    config.save(&config_path).unwrap();
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("node_modules"));

    let loaded = Config::load(Some(&config_path)).unwrap();
    assert_eq!(loaded.search_dir_paths, config.search_dir_paths);
    assert_eq!(loaded.excluded_dir_names, config.excluded_dir_names);
}

#[test]
fn test_default_path_is_config_toml() {
    if let Some(path) = Config::default_path() {
        assert!(path.ends_with("config.toml"));
    }
}
