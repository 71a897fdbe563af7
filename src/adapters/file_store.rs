//! Directory-backed key-value store.
//!
//! Each `namespace/key` pair is one file under the root directory:
//!
//! ```text
//! <root>/
//!   kitchen/kitchenTimer-menuList    postcard catalog blob
//!   fryertimer/config.json           TimerConfig (JSON, hand-editable)
//! ```
//!
//! Writes go to a sibling temp file and are renamed into place, so a
//! reader sees either the old value or the new one.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort, StorageError, StoragePort};
use crate::config::{TimerConfig, validate_config};

use super::memory_store::CONFIG_NAMESPACE;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            warn!("FileStore: cannot create {}: {}", root.display(), e);
            StorageError::IoError
        })?;
        info!("FileStore: rooted at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, namespace: &str, key: &str) -> Result<PathBuf, StorageError> {
        if !is_safe_component(namespace) || !is_safe_component(key) {
            return Err(StorageError::InvalidKey);
        }
        Ok(self.root.join(namespace).join(key))
    }
}

/// One plain path component: no separators, no traversal, not empty.
fn is_safe_component(s: &str) -> bool {
    !s.is_empty()
        && s != "."
        && s != ".."
        && !s.contains(['/', '\\', '\0'])
}

fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    // Suffix the whole name: `with_extension` would map `menu.v2` onto `menu.tmp`.
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)
}

impl StoragePort for FileStore {
    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(namespace, key)?;
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound,
            _ => {
                warn!("FileStore: read {} failed: {}", path.display(), e);
                StorageError::IoError
            }
        })
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(namespace, key)?;
        write_atomic(&path, data).map_err(|e| {
            warn!("FileStore: write {} failed: {}", path.display(), e);
            StorageError::IoError
        })
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.path_for(namespace, key)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }
}

impl ConfigPort for FileStore {
    fn load(&self) -> Result<TimerConfig, ConfigError> {
        let path = self.root.join(CONFIG_NAMESPACE).join(CONFIG_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("FileStore: no {}, using defaults", path.display());
                return Ok(TimerConfig::default());
            }
            Err(_) => return Err(ConfigError::IoError),
        };
        let cfg: TimerConfig = serde_json::from_str(&text).map_err(|e| {
            warn!("FileStore: {} unreadable: {}", path.display(), e);
            ConfigError::Corrupted
        })?;
        validate_config(&cfg)?;
        info!("FileStore: loaded config from {}", path.display());
        Ok(cfg)
    }

    fn save(&self, config: &TimerConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        let path = self.root.join(CONFIG_NAMESPACE).join(CONFIG_FILE);
        let text = serde_json::to_string_pretty(config).map_err(|_| ConfigError::IoError)?;
        write_atomic(&path, text.as_bytes()).map_err(|_| ConfigError::IoError)?;
        info!("FileStore: config saved to {}", path.display());
        Ok(())
    }
}
