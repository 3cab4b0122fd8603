use crate::events::AppEvent;
use async_channel::Sender;
use detent::segment::parse_color;
use detent::{Detent, RotationMode, SegmentError, Segments};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SegmentConfig {
    pub major: String,
    pub minor: String,
    /// `#rrggbb`, checked when the table is built.
    pub color: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub mode: RotationMode,
    #[serde(default = "default_initial_position")]
    pub initial_position: usize,
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
    #[serde(default)]
    pub segments: Vec<SegmentConfig>,
}

fn default_initial_position() -> usize {
    3
}

fn default_transition_ms() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: RotationMode::default(),
            initial_position: default_initial_position(),
            transition_ms: default_transition_ms(),
            segments: Vec::new(),
        }
    }
}

impl Config {
    pub fn initial_detent(&self) -> Detent {
        Detent::new(self.initial_position)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Configured segment table, or the built-in one when absent or invalid.
    pub fn segments(&self) -> Segments {
        if self.segments.is_empty() {
            return Segments::default();
        }
        self.try_segments().unwrap_or_else(|e| {
            log::error!("Ignoring configured segments: {}", e);
            Segments::default()
        })
    }

    fn try_segments(&self) -> Result<Segments, SegmentError> {
        let entries = self
            .segments
            .iter()
            .map(|s| Ok((s.major.clone(), s.minor.clone(), parse_color(&s.color)?)))
            .collect::<Result<Vec<_>, SegmentError>>()?;
        Segments::try_from_iter(entries)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "chordwheel", "chordwheel")
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs = project_dirs().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("CHORDWHEEL").try_parsing(true))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

pub fn write_default_config(contents: &[u8]) -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, contents)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Editors often save in several writes; they collapse into one reload.
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(150);

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_config(&tx).await {
        log::error!("Config watcher stopped, live reload disabled: {}", e);
    }
}

async fn watch_config(tx: &Sender<AppEvent>) -> Result<(), ConfigError> {
    let config_path = get_config_path()?;
    let config_dir = config_path
        .parent()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .to_path_buf();
    fs_err::create_dir_all(&config_dir)?;

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(&config_dir, RecursiveMode::NonRecursive)?;
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if touches(&event, &config_path) => {}
            Ok(_) => continue,
            Err(e) => {
                log::warn!("Watch error: {}", e);
                continue;
            }
        }
        while let Ok(Ok(_)) = tokio::time::timeout(RELOAD_DEBOUNCE, bridge_rx.recv()).await {}
        if tx.send(AppEvent::ConfigReload).await.is_err() {
            break;
        }
    }
    Ok(())
}

fn touches(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(s: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_watcher_only_reacts_to_config_file() {
        use notify::event::{AccessKind, CreateKind, ModifyKind};

        let path = Path::new("/tmp/chordwheel/config.toml");
        let modify = notify::Event::new(EventKind::Modify(ModifyKind::Any)).add_path(path.into());
        assert!(touches(&modify, path));

        let create = notify::Event::new(EventKind::Create(CreateKind::File)).add_path(path.into());
        assert!(touches(&create, path));

        let access = notify::Event::new(EventKind::Access(AccessKind::Any)).add_path(path.into());
        assert!(!touches(&access, path));

        let sibling = notify::Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path("/tmp/chordwheel/config.toml.swp".into());
        assert!(!touches(&sibling, path));
    }

    #[test]
    fn test_bundled_default_config_parses() {
        let config = from_toml(DEFAULT_CONFIG);
        assert_eq!(config.mode, RotationMode::Discrete);
        assert_eq!(config.initial_detent(), Detent::new(3));
        assert_eq!(config.transition(), Duration::from_millis(300));
        assert_eq!(config.segments(), Segments::circle_of_fifths());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = from_toml("");
        assert_eq!(config.mode, RotationMode::Discrete);
        assert_eq!(config.initial_position, 3);
        assert_eq!(config.segments(), Segments::default());
    }

    #[test]
    fn test_mode_and_position() {
        let config = from_toml("mode = \"Continuous\"\ninitial_position = 14\n");
        assert_eq!(config.mode, RotationMode::Continuous);
        assert_eq!(config.initial_detent(), Detent::new(2));
    }

    #[test]
    fn test_wrong_segment_count_falls_back() {
        let config = from_toml(
            "[[segments]]\nmajor = \"C\"\nminor = \"Am\"\ncolor = \"#B05050\"\n",
        );
        assert_eq!(config.segments.len(), 1);
        assert_eq!(config.segments(), Segments::default());
    }

    fn segment_table(color: impl Fn(usize) -> &'static str) -> String {
        (0..12)
            .map(|i| {
                format!(
                    "[[segments]]\nmajor = \"M{i}\"\nminor = \"m{i}\"\ncolor = \"{}\"\n",
                    color(i)
                )
            })
            .collect()
    }

    #[test]
    fn test_bad_color_only_drops_segments() {
        let toml = format!(
            "mode = \"free\"\ninitial_position = 5\n{}",
            segment_table(|i| if i == 2 { "purple" } else { "#B05050" })
        );
        let config = from_toml(&toml);
        assert_eq!(config.mode, RotationMode::Free);
        assert_eq!(config.initial_detent(), Detent::new(5));
        assert_eq!(config.segments.len(), 12);
        assert_eq!(config.segments(), Segments::default());
        assert_eq!(
            config.try_segments().unwrap_err(),
            SegmentError::BadColor("purple".to_string())
        );
    }

    #[test]
    fn test_configured_segments_are_used() {
        let segments = from_toml(&segment_table(|_| "#102030")).segments();
        let first = segments.get(0).unwrap();
        assert_eq!(first.outer_label.as_str(), "M0");
        assert_eq!(first.color, palette::Srgb::new(0x10, 0x20, 0x30));
    }
}
