//! Persistence for the chat session id.
//!
//! The session client only ever needs one value, so a [`SessionStore`] is a
//! single-slot `get`/`set`/`clear` interface. The CLI uses
//! [`FileSessionStore`]; tests inject [`MemorySessionStore`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use jola_config::ChatConfig;

use crate::error::ChatError;

const SESSION_FILE_NAME: &str = "chat_session_id";

pub trait SessionStore: Send + Sync {
    /// The persisted session id, if any.
    ///
    /// # Errors
    ///
    /// `ChatError::Store` when the backing storage cannot be read.
    fn get(&self) -> Result<Option<String>, ChatError>;

    /// # Errors
    ///
    /// `ChatError::Store` when the id cannot be persisted.
    fn set(&self, session_id: &str) -> Result<(), ChatError>;

    /// Remove the persisted id. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// `ChatError::Store` when the backing storage cannot be modified.
    fn clear(&self) -> Result<(), ChatError>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session_id: &str) -> Self {
        Self {
            slot: Mutex::new(Some(session_id.to_string())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, ChatError> {
        self.slot
            .lock()
            .map_err(|_| ChatError::Store("session store lock poisoned".into()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<String>, ChatError> {
        Ok(self.lock()?.clone())
    }

    fn set(&self, session_id: &str) -> Result<(), ChatError> {
        *self.lock()? = Some(session_id.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ChatError> {
        *self.lock()? = None;
        Ok(())
    }
}

/// One file holding the session id, readable only by its owner on unix.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `session_file` from config, else `<data dir>/jola/chat_session_id`.
    ///
    /// # Errors
    ///
    /// `ChatError::Store` if no path is configured and the platform has no
    /// data directory.
    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        if let Some(path) = config.session_file_path() {
            return Ok(Self::new(path));
        }
        dirs::data_dir()
            .map(|dir| Self::new(dir.join("jola").join(SESSION_FILE_NAME)))
            .ok_or_else(|| ChatError::Store("no data directory to keep the chat session in".into()))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<String>, ChatError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let id = contents.trim();
                Ok((!id.is_empty()).then(|| id.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ChatError::Store(format!("read {}: {e}", self.path.display()))),
        }
    }

    fn set(&self, session_id: &str) -> Result<(), ChatError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_private_dir(parent)
                .map_err(|e| ChatError::Store(format!("mkdir {}: {e}", parent.display())))?;
        }
        write_private_file(&self.path, session_id)
            .map_err(|e| ChatError::Store(format!("write {}: {e}", self.path.display())))?;

        #[cfg(unix)]
        {
            // Creation mode does not touch a file that already existed.
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|e| ChatError::Store(format!("chmod {}: {e}", self.path.display())))?;
        }

        tracing::debug!(path = %self.path.display(), "persisted chat session id");
        Ok(())
    }

    fn clear(&self) -> Result<(), ChatError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ChatError::Store(format!("remove {}: {e}", self.path.display()))),
        }
    }
}

/// Missing directories are created 0700 on unix; existing ones are left alone.
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}

/// The file is created 0600 on unix so the id is never readable by others.
fn write_private_file(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::io::Write;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)?.write_all(contents.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get().unwrap(), None);
        store.set("abc").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("abc"));
        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session");

        FileSessionStore::new(&path).set("abc-123").unwrap();
        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.get().unwrap().as_deref(), Some("abc-123"));

        reopened.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(reopened.get().unwrap(), None);
        reopened.clear().unwrap();
    }

    #[test]
    fn blank_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        fs::write(&path, "  \n").unwrap();
        assert_eq!(FileSessionStore::new(&path).get().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        FileSessionStore::new(&path).set("abc").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn created_parent_dirs_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("data").join("jola");
        FileSessionStore::new(parent.join("session")).set("abc").unwrap();
        let mode = fs::metadata(&parent).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[cfg(unix)]
    #[test]
    fn existing_loose_file_is_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileSessionStore::new(&path);
        store.set("new").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("new"));
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn configured_path_wins() {
        let config = ChatConfig {
            session_file: "/tmp/jola-test/session".into(),
            ..Default::default()
        };
        let store = FileSessionStore::from_config(&config).unwrap();
        assert_eq!(store.path(), Path::new("/tmp/jola-test/session"));
    }
}
