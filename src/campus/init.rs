use crate::api::{CampusApi, CampusPaths};
use crate::avatar::FsMediaProvider;
use crate::config::CampusConfig;
use crate::controller::StudentList;
use crate::error::{CampusError, Result};
use crate::store::sqlite::SqliteStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "CAMPUS_HOME";

pub struct CampusContext {
    pub list: StudentList<SqliteStore>,
    pub config: CampusConfig,
}

impl CampusContext {
    pub fn paths(&self) -> &CampusPaths {
        self.list.api().paths()
    }

    /// A media provider honoring the configured grants.
    pub fn media_provider(&self) -> FsMediaProvider {
        FsMediaProvider::new(
            self.paths().media_dir(),
            self.config.allow_camera,
            self.config.allow_gallery,
        )
    }
}

/// Resolve the campus home: explicit override, then `CAMPUS_HOME`, then the
/// platform data directory.
pub fn resolve_home(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "campus", "campus")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CampusError::Config("Could not determine data directory".to_string()))
}

/// Build the store, API and list controller for `home`. The store is not
/// opened here; the first `load()` does that.
pub fn initialize(home: &Path) -> CampusContext {
    let config = CampusConfig::load_or_default(home);
    let paths = CampusPaths::new(home).with_db_file(&config.db_file);
    let store = SqliteStore::new(paths.db_path());
    let api = CampusApi::new(store, paths);

    CampusContext {
        list: StudentList::new(api),
        config,
    }
}
