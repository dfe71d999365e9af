//! Login state: at most one bearer token, persisted through a [`TokenStore`].

use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Key the token is saved under.
pub const TOKEN_KEY: &str = "auth_token";

pub trait TokenStore: Send + Sync {
    fn load(&self) -> ClientResult<Option<String>>;
    fn save(&self, token: &str) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

/// JSON file holding `{"auth_token": "..."}`. Other keys are preserved.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> ClientResult<Map<String, Value>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Map::new()),
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => Ok(map),
                Ok(_) | Err(_) => Err(ClientError::Session(format!("{} is not a JSON object", self.path.display()))),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> ClientResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(map).map_err(|e| ClientError::Session(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> ClientResult<Option<String>> {
        let map = self.read_map()?;
        Ok(map.get(TOKEN_KEY).and_then(Value::as_str).map(str::to_string))
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        let mut map = self.read_map()?;
        map.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_map(&map)
    }

    fn clear(&self) -> ClientResult<()> {
        let mut map = self.read_map()?;
        if map.remove(TOKEN_KEY).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> ClientResult<Option<String>> {
        Ok(self.token.lock().unwrap_or_else(|p| p.into_inner()).clone())
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        *self.token.lock().unwrap_or_else(|p| p.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.token.lock().unwrap_or_else(|p| p.into_inner()) = None;
        Ok(())
    }
}

/// Current token, loaded once from the store and written through on change.
pub struct Session {
    store: Box<dyn TokenStore>,
    token: RwLock<Option<String>>,
}

impl Session {
    pub fn load(store: impl TokenStore + 'static) -> ClientResult<Self> {
        let token = store.load()?;
        debug!(logged_in = token.is_some(), "session loaded");
        Ok(Self { store: Box::new(store), token: RwLock::new(token) })
    }

    pub fn in_memory() -> Self {
        Self { store: Box::new(MemoryTokenStore::default()), token: RwLock::new(None) }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.read().unwrap_or_else(|p| p.into_inner()).is_some()
    }

    pub fn set(&self, token: &str) -> ClientResult<()> {
        self.store.save(token)?;
        *self.token.write().unwrap_or_else(|p| p.into_inner()) = Some(token.to_string());
        Ok(())
    }

    /// Forget the token in memory even if the store cannot be written.
    pub fn clear(&self) -> ClientResult<()> {
        *self.token.write().unwrap_or_else(|p| p.into_inner()) = None;
        self.store.clear()
    }
}
