// src/infra/paths.rs — Config file location
//
// Respects the TWEETFORGE_HOME environment variable for isolation (useful
// in tests). When unset, config lives under ~/.tweetforge/.

use std::path::PathBuf;

/// Returns the TWEETFORGE_HOME override, if set.
fn tweetforge_home() -> Option<PathBuf> {
    std::env::var_os("TWEETFORGE_HOME").map(PathBuf::from)
}

/// Configuration directory: $TWEETFORGE_HOME/ or ~/.tweetforge/
pub fn config_dir() -> PathBuf {
    if let Some(home) = tweetforge_home() {
        return home;
    }
    dirs_home().join(".tweetforge")
}

/// Home directory
pub fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .expect("Could not determine home directory")
        .home_dir()
        .to_path_buf()
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
