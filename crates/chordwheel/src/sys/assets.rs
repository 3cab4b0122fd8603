//! Versioned on-disk cache for the handful of static files the app ships.
//!
//! Installing copies the bundled assets into `<cache>/<name>` once per cache
//! name. Fetching is cache-first with a caller-supplied fallback. Activating
//! removes caches left behind by other versions.

use crate::config::{self, DEFAULT_CONFIG};
use fs_err as fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CACHE_NAME: &str = "chordwheel-cache-v1";

pub const STYLESHEET: &str = "style.css";
pub const DEFAULT_CONFIG_FILE: &str = "default_config.toml";

#[derive(Debug, Clone, Copy)]
pub struct Asset {
    pub name: &'static str,
    pub bytes: &'static [u8],
}

pub const BUNDLED: &[Asset] = &[
    Asset {
        name: STYLESHEET,
        bytes: include_bytes!("../gui/style.css"),
    },
    Asset {
        name: DEFAULT_CONFIG_FILE,
        bytes: DEFAULT_CONFIG.as_bytes(),
    },
];

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to determine cache directory")]
    CacheDirNotFound,
    #[error("Unknown asset '{0}'")]
    Unknown(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn bundled(name: &str) -> Result<Vec<u8>, AssetError> {
    BUNDLED
        .iter()
        .find(|a| a.name == name)
        .map(|a| a.bytes.to_vec())
        .ok_or_else(|| AssetError::Unknown(name.to_string()))
}

#[derive(Debug, Clone)]
pub struct AssetCache {
    root: PathBuf,
    name: String,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
        }
    }

    pub fn open_default() -> Result<Self, AssetError> {
        let dirs = config::project_dirs().ok_or(AssetError::CacheDirNotFound)?;
        Ok(Self::new(dirs.cache_dir(), CACHE_NAME))
    }

    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// Writes `assets` unless this cache version is already installed.
    pub fn install(&self, assets: &[Asset]) -> Result<bool, AssetError> {
        let dir = self.dir();
        if dir.exists() {
            return Ok(false);
        }
        // stage first so a half-written cache never looks installed
        let staging = self.root.join(format!(".{}.partial", self.name));
        fs::create_dir_all(&staging)?;
        for asset in assets {
            fs::write(staging.join(asset.name), asset.bytes)?;
        }
        fs::rename(&staging, &dir)?;
        log::info!("Installed {} assets into {}", assets.len(), dir.display());
        Ok(true)
    }

    pub fn fetch(
        &self,
        name: &str,
        fallback: impl FnOnce(&str) -> Result<Vec<u8>, AssetError>,
    ) -> Result<Vec<u8>, AssetError> {
        let path = self.dir().join(name);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                log::debug!("Cache miss for {}: {}", name, e);
                fallback(name)
            }
        }
    }

    /// Removes sibling caches with any other name; returns how many.
    pub fn activate(&self) -> Result<usize, AssetError> {
        if !self.root.exists() {
            return Ok(0);
        }
        let mut removed = 0;
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_name().to_string_lossy() == self.name.as_str()
                || !entry.file_type()?.is_dir()
            {
                continue;
            }
            remove_stale(&entry.path())?;
            removed += 1;
        }
        Ok(removed)
    }
}

fn remove_stale(path: &Path) -> Result<(), AssetError> {
    log::info!("Removing stale cache {}", path.display());
    fs::remove_dir_all(path)?;
    Ok(())
}

/// Installs and activates the default cache, then reads the stylesheet from
/// it. Any cache failure falls back to the bundled copy.
pub fn prepare() -> (Option<AssetCache>, String) {
    let cache = match AssetCache::open_default() {
        Ok(cache) => cache,
        Err(e) => {
            log::warn!("Asset cache unavailable: {}", e);
            return (None, text(bundled(STYLESHEET)));
        }
    };

    if let Err(e) = cache.install(BUNDLED).and_then(|_| cache.activate()) {
        log::warn!("Failed to prepare asset cache: {}", e);
    }

    let css = text(cache.fetch(STYLESHEET, bundled));
    (Some(cache), css)
}

pub fn text(bytes: Result<Vec<u8>, AssetError>) -> String {
    match bytes {
        Ok(b) => String::from_utf8_lossy(&b).into_owned(),
        Err(e) => {
            log::error!("Failed to read asset: {}", e);
            String::new()
        }
    }
}
