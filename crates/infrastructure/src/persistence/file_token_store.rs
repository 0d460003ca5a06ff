//! File-backed token store.
//!
//! The session is kept in memory and mirrored to a JSON file after every
//! change, so a later process starts signed in:
//! ```json
//! {
//!   "token": "eyJhbGciOi...",
//!   "refreshToken": "eyJhbGciOi...",
//!   "user": { "id": "...", "email": "dj@label.example", ... }
//! }
//! ```
//! Clearing the session removes the file.

use std::io;
use std::path::{Path, PathBuf};

use flockloop_application::{InMemoryTokenStore, SessionEvent, TokenStore};
use flockloop_domain::{Session, TokenPair, UserRead};
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Errors raised while opening the session file.
#[derive(Debug, Error)]
pub enum SessionFileError {
    /// The file exists but could not be read.
    #[error("failed to read session file {path}: {source}")]
    Read {
        /// Session file path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

/// Token store persisted to a JSON file.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    inner: InMemoryTokenStore,
    /// Orders mutation and write so the file always holds the latest session.
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    /// Opens the store at `path`, loading any saved session.
    ///
    /// A missing file means signed out. A file that does not parse is
    /// logged and treated as signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionFileError> {
        let path = path.into();
        let session = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<Session>(&bytes).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring unreadable session file");
                Session::default()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Session::default(),
            Err(source) => return Err(SessionFileError::Read { path, source }),
        };
        debug!(path = %path.display(), signed_in = session.is_authenticated(), "session loaded");

        Ok(Self {
            path,
            inner: InMemoryTokenStore::with_session(session),
            write_lock: Mutex::new(()),
        })
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.subscribe()
    }

    fn update(&self, mutate: impl FnOnce(&InMemoryTokenStore)) {
        let _guard = self.write_lock.lock();
        mutate(&self.inner);
        if let Err(e) = self.persist(&self.inner.session()) {
            warn!(path = %self.path.display(), error = %e, "failed to persist session");
        }
    }

    fn persist(&self, session: &Session) -> io::Result<()> {
        if *session == Session::default() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut bytes = serde_json::to_vec_pretty(session).map_err(io::Error::other)?;
        bytes.push(b'\n');

        let staging = self.path.with_extension("json.tmp");
        write_private(&staging, &bytes)?;
        std::fs::rename(&staging, &self.path)
    }
}

/// Writes `bytes` to a file only the owner can read.
///
/// The mode is set before any byte lands on disk. A stale file left at
/// `path` by an interrupted write is narrowed to 0600 first.
#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    std::fs::write(path, bytes)
}

impl TokenStore for FileTokenStore {
    fn session(&self) -> Session {
        self.inner.session()
    }

    fn set_session(&self, session: Session) {
        self.update(|inner| inner.set_session(session));
    }

    fn set_tokens(&self, tokens: TokenPair) {
        self.update(|inner| inner.set_tokens(tokens));
    }

    fn set_user(&self, user: UserRead) {
        self.update(|inner| inner.set_user(user));
    }

    fn clear(&self) {
        self.update(InMemoryTokenStore::clear);
    }

    fn access_token(&self) -> Option<String> {
        self.inner.access_token()
    }

    fn refresh_token(&self) -> Option<String> {
        self.inner.refresh_token()
    }
}
