use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use dpad::Settings;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, LoadError> {
    let proj_dirs =
        ProjectDirs::from("org", "dpad", "dpad-demo").ok_or(LoadError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_settings(path: &Path) -> Result<Settings, LoadError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path.to_path_buf()).required(false))
        .add_source(config::Environment::with_prefix("DPAD"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default(path: &Path) -> Settings {
    load_settings(path).unwrap_or_else(|e| {
        log::warn!("Using default settings: {}", e);
        Settings::default()
    })
}

pub fn write_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    let file_name = config_path.file_name();
    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p.file_name() == file_name)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpad::config::ColorDefaults;
    use dpad::style::{CenterIconSizeMode, TextStyle};

    fn parse(toml: &str) -> Settings {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config_parses() {
        let config = parse(DEFAULT_CONFIG).resolve(&ColorDefaults::default());
        assert_eq!(config.padding, 24.0);
        assert_eq!(config.center_circle_ratio, 4.0);
        assert_eq!(config.center_icon_size_mode, CenterIconSizeMode::Fixed);
        assert_eq!(config.center_icon, None);
        assert_eq!(config.center_text_style, TextStyle::from(7));
        assert!(config.has_center_text());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_string_numbers_fall_back() {
        let config = parse(
            r#"
            padding = "wide"
            center_circle_ratio = "2.5"
            "#,
        )
        .resolve(&ColorDefaults::default());
        assert_eq!(config.padding, 20.0);
        assert_eq!(config.center_circle_ratio, 2.5);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = load_or_default(Path::new("/nonexistent/dpad-demo/config.toml"));
        let config = settings.resolve(&ColorDefaults::default());
        assert_eq!(config.padding, 20.0);
    }
}
