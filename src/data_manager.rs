use crate::store::AppData;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const STATE_FILE_NAME: &str = "tempo-focus-flow-storage.json";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type DataResult<T> = Result<T, DataError>;

/// Reads and writes the single persisted state blob.
#[derive(Debug, Clone)]
pub struct DataManager {
    base_dir: PathBuf,
    state_path: PathBuf,
}

impl DataManager {
    pub fn new(base_dir: impl Into<PathBuf>) -> DataResult<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        let state_path = base_dir.join(STATE_FILE_NAME);
        Ok(Self {
            base_dir,
            state_path,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn load_state(&self) -> DataResult<AppData> {
        if !self.state_path.exists() {
            return Ok(AppData::default());
        }
        let contents = fs::read_to_string(&self.state_path)?;
        if contents.trim().is_empty() {
            return Ok(AppData::default());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save_state(&self, state: &AppData) -> DataResult<()> {
        write_json(&self.state_path, state)
    }

    pub fn clear_state(&self) -> DataResult<()> {
        match fs::remove_file(&self.state_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes a dated copy of `state` next to the live blob.
    pub fn export_backup(&self, state: &AppData, date: NaiveDate) -> DataResult<PathBuf> {
        let path = self
            .base_dir
            .join(format!("tempofocus-backup-{}.json", date.format("%Y-%m-%d")));
        write_json(&path, state)?;
        Ok(path)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> DataResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("tmp");
    let file = fs::File::create(&temp_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    drop(writer);

    match fs::rename(&temp_path, path) {
        Ok(()) => Ok(()),
        Err(_err) if path.exists() => {
            let _ = fs::remove_file(path);
            fs::rename(&temp_path, path).map_err(DataError::from)
        }
        Err(err) => Err(DataError::from(err)),
    }
}
