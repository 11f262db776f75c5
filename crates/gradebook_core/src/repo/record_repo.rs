//! Record repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Persist one `<reg_no>.json` document per student record.
//! - Enumerate and load persisted records.
//!
//! # Invariants
//! - The record directory is created on first write, never on read.
//! - A missing directory lists as empty.
//! - Saving an existing `reg_no` replaces the previous document.
//! - `*.json` files whose stem is not a usable `reg_no` are reported, not dropped.

use crate::model::grade::ValidationError;
use crate::model::record::{RecordId, StudentRecord};
use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

const RECORD_EXTENSION: &str = "json";
const JSON_INDENT: &[u8] = b"    ";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for record persistence, export and loading.
#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Persisted content is not valid JSON or does not match the schema.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Whether the error means the target file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == ErrorKind::NotFound)
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Io { path, source } => write!(f, "I/O error on `{}`: {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "malformed record `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// A stored entry that looks like a record but cannot be addressed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    /// File name as found on disk (lossy for non-UTF-8 names).
    pub file_name: String,
    pub reason: String,
}

/// Result of enumerating a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordScan {
    /// Sorted ascending.
    pub ids: Vec<RecordId>,
    pub rejected: Vec<RejectedEntry>,
}

/// Storage contract for student records.
pub trait RecordRepository {
    fn save(&self, record: &StudentRecord) -> StoreResult<()>;
    /// Ids of all persisted records, sorted ascending.
    fn list(&self) -> StoreResult<Vec<RecordId>>;
    fn load(&self, id: &RecordId) -> StoreResult<StudentRecord>;

    /// Ids plus entries that could not be turned into ids.
    fn scan(&self) -> StoreResult<RecordScan> {
        Ok(RecordScan {
            ids: self.list()?,
            rejected: Vec::new(),
        })
    }
}

/// Flat directory of JSON record files.
#[derive(Debug, Clone)]
pub struct FileRecordRepository {
    dir: PathBuf,
}

impl FileRecordRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document backing `id`.
    pub fn record_path(&self, id: &RecordId) -> PathBuf {
        self.dir.join(format!("{}.{RECORD_EXTENSION}", id.as_str()))
    }

    fn write_record(&self, path: &Path, record: &StudentRecord) -> StoreResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|err| StoreError::io(&self.dir, err))?;

        let mut body = Vec::new();
        let formatter = PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut body, formatter);
        record
            .serialize(&mut serializer)
            .map_err(|err| StoreError::io(path, err.into()))?;
        body.push(b'\n');

        std::fs::write(path, body).map_err(|err| StoreError::io(path, err))
    }
}

impl RecordRepository for FileRecordRepository {
    fn save(&self, record: &StudentRecord) -> StoreResult<()> {
        record.validate()?;
        let id = record.id()?;
        let path = self.record_path(&id);
        let started_at = Instant::now();

        match self.write_record(&path, record) {
            Ok(()) => {
                info!(
                    "event=record_save module=store status=ok reg_no={} subjects={} duration_ms={}",
                    id,
                    record.subjects.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=record_save module=store status=error reg_no={} duration_ms={} error={}",
                    id,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn list(&self) -> StoreResult<Vec<RecordId>> {
        Ok(self.scan()?.ids)
    }

    fn load(&self, id: &RecordId) -> StoreResult<StudentRecord> {
        let path = self.record_path(id);
        let body = std::fs::read_to_string(&path).map_err(|err| StoreError::io(&path, err))?;
        let record: StudentRecord =
            serde_json::from_str(&body).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?;
        record.validate().map_err(|err| StoreError::Parse {
            path: path.clone(),
            source: <serde_json::Error as serde::de::Error>::custom(err),
        })?;

        debug!("event=record_load module=store status=ok reg_no={}", id);
        Ok(record)
    }

    fn scan(&self) -> StoreResult<RecordScan> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=record_list module=store status=ok count=0 reason=missing_dir dir={}",
                    self.dir.display()
                );
                return Ok(RecordScan::default());
            }
            Err(err) => return Err(StoreError::io(&self.dir, err)),
        };

        let mut scan = RecordScan::default();
        for entry in entries {
            let entry = entry.map_err(|err| StoreError::io(&self.dir, err))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            let is_file = entry
                .file_type()
                .map_err(|err| StoreError::io(&path, err))?
                .is_file();
            if !is_file {
                continue;
            }

            match record_id_from_path(&path) {
                Ok(id) => scan.ids.push(id),
                Err(reason) => {
                    let file_name = entry.file_name().to_string_lossy().into_owned();
                    warn!(
                        "event=record_list module=store status=rejected file={} reason={}",
                        file_name, reason
                    );
                    scan.rejected.push(RejectedEntry { file_name, reason });
                }
            }
        }
        scan.ids.sort();
        scan.rejected.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        debug!(
            "event=record_list module=store status=ok count={} rejected={}",
            scan.ids.len(),
            scan.rejected.len()
        );
        Ok(scan)
    }
}

fn record_id_from_path(path: &Path) -> Result<RecordId, String> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| "file name is not valid UTF-8".to_string())?;
    RecordId::new(stem).map_err(|err| err.to_string())
}
