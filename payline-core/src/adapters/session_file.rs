//! File-backed session store
//!
//! Keeps the token in `session.json` inside the payline directory so it
//! survives restarts until logout clears it.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::SessionToken;
use crate::ports::SessionStore;

const SESSION_FILENAME: &str = "session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    token: Option<SessionToken>,
}

/// Session store backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store the session in `dir/session.json`
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(SESSION_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, file: &SessionFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(file)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut out = options.open(&self.path)?;

        // A file created before this store existed keeps its old mode
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            out.set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        out.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<SessionToken>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let file: SessionFile = serde_json::from_str(&content).map_err(|e| {
            Error::Session(format!("Unreadable session file {:?}: {}", self.path, e))
        })?;
        Ok(file.token.filter(|t| !t.as_str().is_empty()))
    }

    fn set(&self, token: &SessionToken) -> Result<()> {
        self.write(&SessionFile {
            token: Some(token.clone()),
        })
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
