use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("cubik"),
            )
        } else {
            ProjectDirs::from("", "", "cubik").map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }

    /// Persisted time log (JSON array of millisecond durations).
    pub fn times_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("times.json"))
    }

    /// Append-only per-solve journal.
    pub fn history_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("history.csv"))
    }
}
