//! In-process key-value store.
//!
//! Implements both [`StoragePort`] and [`ConfigPort`] on a `HashMap`.
//! Nothing survives the process; used by tests and by the binary when no
//! data directory is wanted.

use core::cell::RefCell;
use std::collections::HashMap;

use log::info;

use crate::app::ports::{ConfigError, ConfigPort, StorageError, StoragePort};
use crate::config::{TimerConfig, validate_config};

/// Namespace/key the config blob lives under.
pub const CONFIG_NAMESPACE: &str = "fryertimer";
pub const CONFIG_KEY: &str = "config";

#[derive(Debug, Default)]
pub struct MemoryStore {
    store: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }

    /// Number of stored keys across all namespaces.
    pub fn len(&self) -> usize {
        self.store.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.borrow().is_empty()
    }
}

fn check_key(namespace: &str, key: &str) -> Result<(), StorageError> {
    if namespace.is_empty() || key.is_empty() {
        return Err(StorageError::InvalidKey);
    }
    Ok(())
}

impl StoragePort for MemoryStore {
    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        check_key(namespace, key)?;
        self.store
            .borrow()
            .get(&Self::composite_key(namespace, key))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        check_key(namespace, key)?;
        self.store
            .borrow_mut()
            .insert(Self::composite_key(namespace, key), data.to_vec());
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store
            .borrow()
            .contains_key(&Self::composite_key(namespace, key))
    }
}

impl ConfigPort for MemoryStore {
    fn load(&self) -> Result<TimerConfig, ConfigError> {
        let key = Self::composite_key(CONFIG_NAMESPACE, CONFIG_KEY);
        match self.store.borrow().get(&key) {
            Some(bytes) => {
                let cfg: TimerConfig =
                    postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
                validate_config(&cfg)?;
                info!("MemoryStore: loaded config");
                Ok(cfg)
            }
            None => {
                info!("MemoryStore: no stored config, using defaults");
                Ok(TimerConfig::default())
            }
        }
    }

    fn save(&self, config: &TimerConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.store
            .borrow_mut()
            .insert(Self::composite_key(CONFIG_NAMESPACE, CONFIG_KEY), bytes);
        info!("MemoryStore: config saved");
        Ok(())
    }
}
