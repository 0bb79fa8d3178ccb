use std::fs;
use std::path::{Path, PathBuf};

use crate::*;

/// File name used when the records live next to the executable.
pub const RECORDS_FILE: &str = "records";

/// Encrypted on-disk home of a [`ScoreRecord`].
#[derive(Clone, Debug)]
pub struct RecordStore {
    path: PathBuf,
    cipher: Cipher,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_cipher(path, Cipher::default())
    }

    pub fn with_cipher(path: impl Into<PathBuf>, cipher: Cipher) -> Self {
        Self {
            path: path.into(),
            cipher,
        }
    }

    /// Store at `records` in the directory of the running executable, or the working directory
    /// if that cannot be determined.
    pub fn beside_executable() -> Self {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        Self::new(dir.join(RECORDS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the record, treating every failure as "nothing stored".
    pub fn load(&self) -> Option<ScoreRecord> {
        match self.try_load() {
            Ok(record) => Some(record),
            Err(RecordsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No records at {}", self.path.display());
                None
            }
            Err(err) => {
                log::warn!("Ignoring unreadable records at {}: {}", self.path.display(), err);
                None
            }
        }
    }

    /// Like [`Self::load`] but reports why nothing could be loaded.
    ///
    /// A record that parses but has a table out of time order is rejected too.
    pub fn try_load(&self) -> Result<ScoreRecord> {
        let ciphertext = fs::read(&self.path)?;
        let plaintext = String::from_utf8(self.cipher.decrypt(&ciphertext)?)?;
        let record: ScoreRecord = serde_json::from_str(&plaintext)?;
        if !record.is_well_ordered() {
            return Err(RecordsError::Unordered);
        }
        Ok(record)
    }

    /// Encrypts and writes the record, replacing any previous file in one rename.
    pub fn save(&self, record: &ScoreRecord) -> Result<()> {
        let plaintext = serde_json::to_string(record)?;
        let ciphertext = self.cipher.encrypt(plaintext.as_bytes());

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        fs::write(&staging, ciphertext)?;
        if let Err(err) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        log::debug!("Saved records to {}", self.path.display());
        Ok(())
    }
}
