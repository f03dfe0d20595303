use std::{
    collections::HashMap,
    io::ErrorKind,
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering},
        RwLock,
    },
};

/// Byte storage keyed by namespace idents, the durable-state surface of the
/// hub. The local backend maps idents to files under a base directory; the
/// memory backend mirrors browser-local-storage semantics for tests.
pub trait StorageManager: Send + Sync {
    fn write(&self, ident: &str, data: &[u8]) -> std::io::Result<()>;
    fn read(&self, ident: &str) -> std::io::Result<Vec<u8>>;
    fn exists(&self, ident: &str) -> bool;
    fn delete(&self, ident: &str) -> std::io::Result<()>;
    fn list(&self) -> Vec<String>;
}

#[derive(Clone)]
pub struct BackendLocal {
    pub base_dir: PathBuf,
}

impl BackendLocal {
    pub fn new(storage_dir: &str) -> std::io::Result<Self> {
        let path = PathBuf::from(storage_dir);
        std::fs::create_dir_all(&path)?;
        Ok(BackendLocal { base_dir: path })
    }
}

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

// unique-per-process temp suffix so concurrent writers never collide
fn temp_token() -> String {
    format!(
        "{}-{}",
        std::process::id(),
        TEMP_SEQ.fetch_add(1, Ordering::Relaxed)
    )
}

impl StorageManager for BackendLocal {
    fn exists(&self, ident: &str) -> bool {
        std::fs::metadata(self.base_dir.join(ident)).is_ok()
    }

    fn read(&self, ident: &str) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.base_dir.join(ident))
    }

    fn write(&self, ident: &str, data: &[u8]) -> std::io::Result<()> {
        let path = self.base_dir.join(ident);
        let temp_path = self.base_dir.join(format!(".{ident}-{}", temp_token()));

        std::fs::write(&temp_path, data)?;

        std::fs::rename(&temp_path, &path)
    }

    fn delete(&self, ident: &str) -> std::io::Result<()> {
        std::fs::remove_file(self.base_dir.join(ident))
    }

    fn list(&self) -> Vec<String> {
        std::fs::read_dir(&self.base_dir)
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .filter_map(|entry| {
                        let path = entry.path();
                        if path.is_file() {
                            path.file_name()
                                .and_then(|name| name.to_str())
                                .map(|s| s.to_string())
                        } else {
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Volatile storage with the same key semantics as the local backend.
#[derive(Default)]
pub struct BackendMemory {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl StorageManager for BackendMemory {
    fn exists(&self, ident: &str) -> bool {
        self.entries.read().unwrap().contains_key(ident)
    }

    fn read(&self, ident: &str) -> std::io::Result<Vec<u8>> {
        self.entries
            .read()
            .unwrap()
            .get(ident)
            .cloned()
            .ok_or_else(|| std::io::Error::new(ErrorKind::NotFound, format!("no entry {ident}")))
    }

    fn write(&self, ident: &str, data: &[u8]) -> std::io::Result<()> {
        self.entries
            .write()
            .unwrap()
            .insert(ident.to_string(), data.to_vec());
        Ok(())
    }

    fn delete(&self, ident: &str) -> std::io::Result<()> {
        self.entries
            .write()
            .unwrap()
            .remove(ident)
            .map(|_| ())
            .ok_or_else(|| std::io::Error::new(ErrorKind::NotFound, format!("no entry {ident}")))
    }

    fn list(&self) -> Vec<String> {
        self.entries.read().unwrap().keys().cloned().collect()
    }
}
