use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::Rng;

/// File name under the store directory for the session-scoped key.
pub const API_KEY_FILE: &str = "av_api_key";

/// File name for the persistent key, stored obfuscated.
pub const PERSISTENT_API_KEY_FILE: &str = "av_api_key_persistent";

/// Key/value collaborator holding a single API key string.
///
/// The interface is infallible: storage-layer absence or failure reads as "no
/// key", and writes that fail are dropped silently. No storage error ever
/// propagates to a caller.
pub trait KeyStore: Send + Sync {
    fn get(&self) -> Option<String>;

    /// Stores `value`; an empty value clears the slot instead.
    fn set(&self, value: &str);

    fn clear(&self);
}

/// Process-lifetime store, the session-storage analog. Doubles as the test
/// stand-in.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    slot: Mutex<Option<String>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(value: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(value.into())),
        }
    }
}

impl KeyStore for MemoryKeyStore {
    fn get(&self) -> Option<String> {
        self.slot
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
            .filter(|value| !value.is_empty())
    }

    fn set(&self, value: &str) {
        if value.is_empty() {
            self.clear();
            return;
        }
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(value.to_owned());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

/// File-backed store.
///
/// Plain mode writes the key verbatim. Obfuscated mode applies a salted XOR
/// plus base64 (`salt:payload`), enough to keep the key out of casual file
/// listings without pretending to be real encryption.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
    obfuscate: bool,
}

impl FileKeyStore {
    pub fn plain(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            obfuscate: false,
        }
    }

    pub fn obfuscated(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            obfuscate: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyStore for FileKeyStore {
    fn get(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let raw = raw.trim_end_matches('\n');
        let value = if self.obfuscate {
            deobfuscate(raw)?
        } else {
            raw.to_owned()
        };
        Some(value).filter(|value| !value.is_empty())
    }

    fn set(&self, value: &str) {
        if value.is_empty() {
            self.clear();
            return;
        }

        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let stored = if self.obfuscate {
            obfuscate(value)
        } else {
            value.to_owned()
        };
        if std::fs::write(&self.path, stored).is_err() {
            tracing::warn!(path = %self.path.display(), "failed to persist api key");
        }
    }

    fn clear(&self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// First-hit-wins chain over several stores.
///
/// `get` returns the first store's non-empty key; `set` writes to the first
/// store; `clear` clears all of them.
#[derive(Clone, Default)]
pub struct StackedKeyStore {
    stores: Vec<Arc<dyn KeyStore>>,
}

impl StackedKeyStore {
    pub fn new(stores: Vec<Arc<dyn KeyStore>>) -> Self {
        Self { stores }
    }

    pub fn push(mut self, store: Arc<dyn KeyStore>) -> Self {
        self.stores.push(store);
        self
    }
}

impl KeyStore for StackedKeyStore {
    fn get(&self) -> Option<String> {
        self.stores.iter().find_map(|store| store.get())
    }

    fn set(&self, value: &str) {
        if let Some(store) = self.stores.first() {
            store.set(value);
        }
    }

    fn clear(&self) {
        for store in &self.stores {
            store.clear();
        }
    }
}

/// Per-user directory for key files, `None` when the platform offers no
/// config directory.
pub fn default_store_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("avdash"))
}

fn obfuscate(value: &str) -> String {
    let salt: String = {
        let mut rng = rand::thread_rng();
        (0..8)
            .map(|_| {
                char::from_digit(rng.gen_range(0..36), 36).unwrap_or('0')
            })
            .collect()
    };

    let mixed: Vec<u8> = value
        .bytes()
        .zip(salt.bytes().cycle())
        .map(|(byte, key)| byte ^ key)
        .collect();

    format!("{salt}:{}", BASE64.encode(mixed))
}

fn deobfuscate(stored: &str) -> Option<String> {
    let (salt, payload) = stored.split_once(':')?;
    if salt.is_empty() {
        return None;
    }

    let mixed = BASE64.decode(payload).ok()?;
    let bytes: Vec<u8> = mixed
        .into_iter()
        .zip(salt.bytes().cycle())
        .map(|(byte, key)| byte ^ key)
        .collect();

    String::from_utf8(bytes).ok()
}
