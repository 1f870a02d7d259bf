//! Game resources (singleton configuration and asset handles).

use bevy::prelude::*;
use std::env;
use std::path::PathBuf;

use super::{DEFAULT_SAVE_PATH, SAVE_PATH_ENV};

/// Runtime settings resolved once at startup.
#[derive(Resource, Debug, Clone)]
pub struct Settings {
    pub save_path: PathBuf,
}

impl Settings {
    /// Reads the save path override from the environment.
    pub fn from_env() -> Self {
        Self::with_override(env::var_os(SAVE_PATH_ENV).map(PathBuf::from))
    }

    fn with_override(save_path: Option<PathBuf>) -> Self {
        Settings {
            save_path: save_path
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH)),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_override(None)
    }
}

/// Image handles loaded at startup.
#[derive(Resource, Clone)]
pub struct GameAssets {
    pub bird: Handle<Image>,
    pub trophy: Handle<Image>,
    pub star: Handle<Image>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_save_path_is_relative_save_file() {
        assert_eq!(Settings::default().save_path, PathBuf::from("save"));
    }

    #[test]
    fn override_replaces_default_path() {
        let settings = Settings::with_override(Some(PathBuf::from("/tmp/best.json")));
        assert_eq!(settings.save_path, PathBuf::from("/tmp/best.json"));
    }

    #[test]
    fn empty_override_falls_back_to_default() {
        let settings = Settings::with_override(Some(PathBuf::new()));
        assert_eq!(settings.save_path, PathBuf::from("save"));
    }
}
